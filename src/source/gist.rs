//! Blueprints shared as GitHub gists.
//!
//! Gists are read through the GitHub API, which returns every file of the
//! gist with its content inline. Files over the API's inline limit come back
//! truncated and are downloaded separately from their `raw_url`.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

use crate::blueprint::{is_blueprint_config, Blueprint};
use crate::error::{ImportError, Result};
use crate::fetch::Fetch;
use crate::yaml::parse_yaml;

use super::ImportedBlueprint;

const GIST_PREFIX: &str = "https://gist.github.com/";
const GIST_API_BASE: &str = "https://api.github.com/gists/";

/// Gist JSON as returned by the GitHub API, limited to the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub owner: Option<GistOwner>,
    /// Files in the order the API lists them.
    #[serde(deserialize_with = "deserialize_files")]
    pub files: Vec<GistFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GistOwner {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GistFile {
    /// Taken from the key of the `files` map.
    #[serde(skip)]
    pub filename: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub raw_url: Option<String>,
}

fn deserialize_files<'de, D>(deserializer: D) -> std::result::Result<Vec<GistFile>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FilesVisitor;

    impl<'de> Visitor<'de> for FilesVisitor {
        type Value = Vec<GistFile>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of gist files")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut files = Vec::new();
            while let Some((filename, mut file)) = map.next_entry::<String, GistFile>()? {
                file.filename = filename;
                files.push(file);
            }
            Ok(files)
        }
    }

    deserializer.deserialize_map(FilesVisitor)
}

/// The gist id from a gist page URL.
pub fn gist_id(url: &str) -> Result<&str> {
    let unsupported = || ImportError::UnsupportedUrl(url.to_string());

    let path = url.strip_prefix(GIST_PREFIX).ok_or_else(unsupported)?;
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let id = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()))
        .ok_or_else(unsupported)?;

    Ok(id)
}

pub fn api_url(gist_id: &str) -> String {
    format!("{GIST_API_BASE}{gist_id}")
}

/// Fetch a gist and extract the first blueprint file.
pub fn fetch(fetcher: &dyn Fetch, url: &str) -> Result<ImportedBlueprint> {
    let api_url = api_url(gist_id(url)?);
    tracing::debug!(url, api_url = %api_url, "importing from gist");

    let body = fetcher.get_text(&api_url)?;
    let mut gist: Gist =
        serde_json::from_str(&body).map_err(|e| ImportError::invalid_response(&api_url, e))?;

    load_truncated_files(fetcher, &mut gist)?;
    extract_blueprint(&gist)
}

/// Replace the content of truncated YAML files with the full raw file.
pub fn load_truncated_files(fetcher: &dyn Fetch, gist: &mut Gist) -> Result<()> {
    for file in gist
        .files
        .iter_mut()
        .filter(|file| file.truncated && is_yaml_file(&file.filename))
    {
        let Some(raw_url) = &file.raw_url else {
            continue;
        };
        tracing::debug!(file = %file.filename, "downloading truncated gist file");
        file.content = Some(fetcher.get_text(raw_url)?);
    }
    Ok(())
}

/// Find the first `.yaml` file in the gist that holds a blueprint.
pub fn extract_blueprint(gist: &Gist) -> Result<ImportedBlueprint> {
    for file in &gist.files {
        if !is_yaml_file(&file.filename) {
            continue;
        }
        let Some(content) = &file.content else {
            tracing::debug!(file = %file.filename, "gist file has no content");
            continue;
        };

        let data = parse_yaml(content)?;
        if !is_blueprint_config(&data) {
            continue;
        }

        let blueprint = Blueprint::new(data, None)?;
        let namespace = gist
            .owner
            .as_ref()
            .map(|owner| owner.login.as_str())
            .unwrap_or(gist.id.as_str());
        let name = file
            .filename
            .strip_suffix(".yaml")
            .unwrap_or(&file.filename);

        return Ok(ImportedBlueprint {
            suggested_filename: format!("{namespace}/{name}"),
            raw_data: content.clone(),
            blueprint,
        });
    }

    Err(ImportError::NoBlueprintFound(
        "gist. The blueprint file needs to end with '.yaml'".into(),
    ))
}

fn is_yaml_file(filename: &str) -> bool {
    filename.ends_with(".yaml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockFetcher;

    const BLUEPRINT: &str = "blueprint:\n  name: Light\n  domain: automation\n";

    fn gist_json(files: &str) -> String {
        format!(
            r#"{{"id": "abc123", "owner": {{"login": "balloob"}}, "files": {{{files}}}}}"#
        )
    }

    #[test]
    fn test_gist_id() {
        assert_eq!(
            gist_id("https://gist.github.com/balloob/e717ce85dd0d2f1bdcdfc884ea25a344").unwrap(),
            "e717ce85dd0d2f1bdcdfc884ea25a344"
        );
        assert_eq!(
            gist_id("https://gist.github.com/balloob/e717ce85/").unwrap(),
            "e717ce85"
        );
        assert_eq!(
            gist_id("https://gist.github.com/balloob/e717ce85#file-light-yaml").unwrap(),
            "e717ce85"
        );
    }

    #[test]
    fn test_gist_id_unsupported() {
        for url in [
            "https://gist.github.com/",
            "https://gist.github.com/balloob/not-an-id",
            "https://github.com/balloob/e717ce85dd0d2f1bdcdfc884ea25a344",
        ] {
            assert!(gist_id(url).unwrap_err().is_unsupported_url(), "{url}");
        }
    }

    #[test]
    fn test_api_url() {
        assert_eq!(api_url("abc123"), "https://api.github.com/gists/abc123");
    }

    #[test]
    fn test_files_keep_api_order() {
        let gist: Gist = serde_json::from_str(&gist_json(
            r#""z.txt": {"content": "z"}, "b.yaml": {"content": "b"}, "a.yaml": {"content": "a"}"#,
        ))
        .unwrap();
        let names: Vec<_> = gist.files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["z.txt", "b.yaml", "a.yaml"]);
    }

    #[test]
    fn test_extract_first_yaml_blueprint() {
        let files = format!(
            r#""README.md": {{"content": "blueprint: nope"}},
"notes.yaml": {{"content": "just: notes"}},
"light.yaml": {{"content": {}}}"#,
            serde_json::to_string(BLUEPRINT).unwrap()
        );
        let gist: Gist = serde_json::from_str(&gist_json(&files)).unwrap();

        let imported = extract_blueprint(&gist).unwrap();
        assert_eq!(imported.suggested_filename, "balloob/light");
        assert_eq!(imported.raw_data, BLUEPRINT);
    }

    #[test]
    fn test_extract_without_owner_uses_gist_id() {
        let json = format!(
            r#"{{"id": "abc123", "owner": null, "files": {{"light.yaml": {{"content": {}}}}}}}"#,
            serde_json::to_string(BLUEPRINT).unwrap()
        );
        let gist: Gist = serde_json::from_str(&json).unwrap();
        assert_eq!(
            extract_blueprint(&gist).unwrap().suggested_filename,
            "abc123/light"
        );
    }

    #[test]
    fn test_extract_no_yaml_file() {
        let gist: Gist =
            serde_json::from_str(&gist_json(r#""light.yml": {"content": "x: 1"}"#)).unwrap();
        let err = extract_blueprint(&gist).unwrap_err();
        assert!(err.to_string().contains("needs to end with '.yaml'"));
    }

    #[test]
    fn test_extract_invalid_yaml_file() {
        let gist: Gist =
            serde_json::from_str(&gist_json(r#""bad.yaml": {"content": "invalid: yaml: 2"}"#))
                .unwrap();
        assert!(matches!(
            extract_blueprint(&gist),
            Err(ImportError::InvalidYaml(_))
        ));
    }

    #[test]
    fn test_truncated_file_is_downloaded() {
        let raw_url = "https://gist.githubusercontent.com/balloob/abc123/raw/light.yaml";
        let mut gist: Gist = serde_json::from_str(&gist_json(&format!(
            r#""light.yaml": {{"content": "blueprint:", "truncated": true, "raw_url": "{raw_url}"}}"#
        )))
        .unwrap();

        let fetcher = MockFetcher::new().with_body(raw_url, BLUEPRINT);
        load_truncated_files(&fetcher, &mut gist).unwrap();

        assert_eq!(gist.files[0].content.as_deref(), Some(BLUEPRINT));
        assert_eq!(fetcher.requests(), vec![raw_url.to_string()]);
        assert_eq!(extract_blueprint(&gist).unwrap().blueprint.name(), "Light");
    }
}
