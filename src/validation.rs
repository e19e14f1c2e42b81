//! Input validation for values that end up in file paths.
//!
//! Blueprint domains and suggested filenames come from remote content, so
//! every segment is checked before it is joined onto the blueprints directory.

/// Maximum allowed length for a single path segment.
pub const MAX_SEGMENT_LENGTH: usize = 128;

/// Reserved names that cannot be used as segments (case-insensitive).
const RESERVED_NAMES: &[&str] = &[
    ".", "..", "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
    "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Validates a blueprint domain, which becomes a directory of its own.
///
/// A domain is valid if:
/// - It is not empty
/// - It is no longer than MAX_SEGMENT_LENGTH characters
/// - It contains only ASCII letters and digits, dashes, underscores and dots
/// - It does not start with a dot
/// - It does not use reserved system names
///
/// # Examples
///
/// ```
/// use blueprint_import::validation::validate_domain;
///
/// assert!(validate_domain("automation").is_ok());
/// assert!(validate_domain("script").is_ok());
/// assert!(validate_domain("").is_err());
/// assert!(validate_domain("..").is_err());
/// ```
pub fn validate_domain(domain: &str) -> Result<(), String> {
    check_length(domain)?;

    let valid_chars = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !valid_chars {
        return Err(format!("'{domain}' contains invalid characters. Use only ASCII letters, digits, dashes (-), underscores (_) and dots (.)"));
    }

    if domain.starts_with('.') {
        return Err(format!("'{domain}' cannot start with a dot"));
    }

    let lower = domain.to_lowercase();
    if RESERVED_NAMES.contains(&lower.as_str()) {
        return Err(format!("'{domain}' uses a reserved name"));
    }

    Ok(())
}

/// Validates one segment of a suggested filename.
///
/// Names come from forum usernames and gist file names, so anything is
/// accepted that stays inside its directory: no `.` or `..`, no separators,
/// no NUL byte.
pub fn validate_segment(segment: &str) -> Result<(), String> {
    check_length(segment)?;

    if segment == "." || segment == ".." {
        return Err(format!("'{segment}' is not allowed"));
    }

    if segment.contains(['/', '\\', '\0']) {
        return Err(format!("'{segment}' contains a path separator"));
    }

    Ok(())
}

fn check_length(segment: &str) -> Result<(), String> {
    if segment.is_empty() {
        return Err("cannot be empty".to_string());
    }

    let len = segment.chars().count();
    if len > MAX_SEGMENT_LENGTH {
        return Err(format!(
            "too long: {len} characters (max {MAX_SEGMENT_LENGTH})"
        ));
    }

    Ok(())
}

/// Validates a relative, `/`-separated path such as `balloob/motion_light`.
pub fn validate_relative_path(path: &str) -> Result<(), String> {
    if path.starts_with('/') {
        return Err("absolute paths are not allowed".to_string());
    }
    for segment in path.split('/') {
        validate_segment(segment)?;
    }
    Ok(())
}

/// Clap value parser for validating domain arguments.
pub fn clap_domain_validator(s: &str) -> Result<String, String> {
    validate_domain(s)?;
    Ok(s.to_string())
}
