pub(crate) mod common;
pub mod import;
pub mod list;
pub mod resolve;
pub mod validate;
