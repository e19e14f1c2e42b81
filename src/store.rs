//! On-disk blueprint store.
//!
//! Blueprints live at `<root>/<domain>/<namespace>/<name>.yaml`, the layout
//! the home-automation platform reads them from.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::blueprint::Blueprint;
use crate::error::{ImportError, Result};
use crate::source::ImportedBlueprint;
use crate::validation::{validate_domain, validate_relative_path};
use crate::yaml::parse_yaml;

const EXTENSION: &str = "yaml";

/// A file found while listing the store.
#[derive(Debug)]
pub struct StoredBlueprint {
    pub domain: String,
    /// Path relative to the domain directory, without extension.
    pub path: String,
    pub file: PathBuf,
    /// The parsed blueprint, or the reason it could not be loaded.
    pub blueprint: Result<Blueprint>,
}

pub struct BlueprintStore {
    root: PathBuf,
}

impl BlueprintStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a blueprint would be stored at.
    pub fn blueprint_path(&self, domain: &str, path: &str) -> Result<PathBuf> {
        validate_domain(domain).map_err(|reason| ImportError::InvalidPath {
            path: domain.to_string(),
            reason,
        })?;
        validate_relative_path(path).map_err(|reason| ImportError::InvalidPath {
            path: path.to_string(),
            reason,
        })?;

        let mut file = self.root.join(domain);
        let mut segments = path.split('/').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                file.push(segment);
            } else {
                file.push(format!("{segment}.{EXTENSION}"));
            }
        }
        Ok(file)
    }

    /// Write an imported blueprint under its domain and suggested filename.
    pub fn save(&self, imported: &ImportedBlueprint, overwrite: bool) -> Result<PathBuf> {
        let file = self.blueprint_path(
            imported.blueprint.domain(),
            &imported.suggested_filename,
        )?;

        let content = imported.blueprint.to_yaml()?;
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }

        if overwrite {
            fs::write(&file, content)?;
        } else {
            let mut handle = match OpenOptions::new().write(true).create_new(true).open(&file) {
                Ok(handle) => handle,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    return Err(ImportError::AlreadyExists(file));
                }
                Err(e) => return Err(e.into()),
            };
            handle.write_all(content.as_bytes())?;
        }

        tracing::info!(file = %file.display(), "blueprint saved");
        Ok(file)
    }

    /// Load and validate a stored blueprint.
    pub fn load(&self, domain: &str, path: &str) -> Result<Blueprint> {
        let file = self.blueprint_path(domain, path)?;
        load_file(&file, Some(domain))
    }

    /// All stored blueprints, optionally limited to one domain, sorted by path.
    ///
    /// Files that fail to load are included with their error.
    pub fn list(&self, domain: Option<&str>) -> Result<Vec<StoredBlueprint>> {
        let domains = match domain {
            Some(domain) => {
                validate_domain(domain).map_err(|reason| ImportError::InvalidPath {
                    path: domain.to_string(),
                    reason,
                })?;
                vec![domain.to_string()]
            }
            None => self.domains()?,
        };

        let mut stored = Vec::new();
        for domain in domains {
            let domain_dir = self.root.join(&domain);
            if !domain_dir.is_dir() {
                continue;
            }
            for file in collect_yaml_files(&domain_dir)? {
                let path = relative_name(&domain_dir, &file);
                let blueprint = load_file(&file, Some(&domain));
                if let Err(e) = &blueprint {
                    tracing::warn!(file = %file.display(), error = %e, "unable to load blueprint");
                }
                stored.push(StoredBlueprint {
                    domain: domain.clone(),
                    path,
                    file,
                    blueprint,
                });
            }
        }
        Ok(stored)
    }

    fn domains(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut domains = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if validate_domain(name).is_ok() {
                    domains.push(name.to_string());
                }
            }
        }
        domains.sort();
        Ok(domains)
    }
}

/// Read a blueprint file from anywhere on disk.
pub fn load_file(file: &Path, expected_domain: Option<&str>) -> Result<Blueprint> {
    let content = fs::read_to_string(file)?;
    Blueprint::new(parse_yaml(&content)?, expected_domain)
}

/// `.yaml` files under `dir`. Symlinked directories are not descended into.
fn collect_yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == EXTENSION) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn relative_name(domain_dir: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(domain_dir).unwrap_or(file);
    let relative = relative.with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn imported(domain: &str, suggested_filename: &str) -> ImportedBlueprint {
        let raw = format!("blueprint:\n  name: Test\n  domain: {domain}\n");
        let mut blueprint = Blueprint::new(parse_yaml(&raw).unwrap(), None).unwrap();
        blueprint.update_metadata("https://example.com/test.yaml");
        ImportedBlueprint {
            suggested_filename: suggested_filename.to_string(),
            raw_data: raw,
            blueprint,
        }
    }

    #[test]
    fn test_blueprint_path() {
        let store = BlueprintStore::new("/bp");
        assert_eq!(
            store
                .blueprint_path("automation", "balloob/motion_light")
                .unwrap(),
            PathBuf::from("/bp/automation/balloob/motion_light.yaml")
        );
        assert_eq!(
            store.blueprint_path("automation", "someone/light.v2").unwrap(),
            PathBuf::from("/bp/automation/someone/light.v2.yaml")
        );
    }

    #[test]
    fn test_blueprint_path_rejects_traversal() {
        let store = BlueprintStore::new("/bp");
        assert!(matches!(
            store.blueprint_path("automation", "../../etc/passwd"),
            Err(ImportError::InvalidPath { .. })
        ));
        assert!(store.blueprint_path("..", "a/b").is_err());
        assert!(store.blueprint_path("automation", "/etc/passwd").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = BlueprintStore::new(temp_dir.path());

        let file = store
            .save(&imported("automation", "balloob/test"), false)
            .unwrap();
        assert_eq!(file, temp_dir.path().join("automation/balloob/test.yaml"));

        let loaded = store.load("automation", "balloob/test").unwrap();
        assert_eq!(loaded.name(), "Test");
        assert_eq!(loaded.source_url(), Some("https://example.com/test.yaml"));
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let store = BlueprintStore::new(temp_dir.path());
        let bp = imported("automation", "balloob/test");

        store.save(&bp, false).unwrap();
        assert!(matches!(
            store.save(&bp, false),
            Err(ImportError::AlreadyExists(_))
        ));
        assert!(store.save(&bp, true).is_ok());
    }

    #[test]
    fn test_load_checks_domain() {
        let temp_dir = TempDir::new().unwrap();
        let store = BlueprintStore::new(temp_dir.path());
        let file = store.save(&imported("script", "a/b"), false).unwrap();

        // Move the script blueprint into the automation folder
        let wrong = temp_dir.path().join("automation/a/b.yaml");
        fs::create_dir_all(wrong.parent().unwrap()).unwrap();
        fs::rename(file, &wrong).unwrap();

        assert!(matches!(
            store.load("automation", "a/b"),
            Err(ImportError::InvalidBlueprint(_))
        ));
    }

    #[test]
    fn test_list() {
        let temp_dir = TempDir::new().unwrap();
        let store = BlueprintStore::new(temp_dir.path());
        store.save(&imported("automation", "b/two"), false).unwrap();
        store.save(&imported("automation", "a/one"), false).unwrap();
        store.save(&imported("script", "c/three"), false).unwrap();
        fs::write(
            temp_dir.path().join("automation/a/broken.yaml"),
            "invalid: yaml: 2",
        )
        .unwrap();
        fs::write(temp_dir.path().join("automation/a/notes.txt"), "x").unwrap();

        let all = store.list(None).unwrap();
        let names: Vec<_> = all
            .iter()
            .map(|s| format!("{}:{}", s.domain, s.path))
            .collect();
        assert_eq!(
            names,
            vec![
                "automation:a/broken",
                "automation:a/one",
                "automation:b/two",
                "script:c/three"
            ]
        );
        assert!(all[0].blueprint.is_err());
        assert!(all[1].blueprint.is_ok());

        let scripts = store.list(Some("script")).unwrap();
        assert_eq!(scripts.len(), 1);
    }

    #[test]
    fn test_save_refusal_keeps_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = BlueprintStore::new(temp_dir.path());
        let file = store.save(&imported("automation", "a/b"), false).unwrap();
        fs::write(&file, "edited by hand").unwrap();

        let err = store.save(&imported("automation", "a/b"), false).unwrap_err();
        assert!(matches!(err, ImportError::AlreadyExists(ref path) if path == &file));
        assert_eq!(fs::read_to_string(&file).unwrap(), "edited by hand");
    }

    #[test]
    fn test_save_name_with_spaces() {
        let temp_dir = TempDir::new().unwrap();
        let store = BlueprintStore::new(temp_dir.path());

        let file = store
            .save(&imported("automation", "balloob/Motion Light"), false)
            .unwrap();
        assert_eq!(
            file,
            temp_dir.path().join("automation/balloob/Motion Light.yaml")
        );
        assert_eq!(store.list(None).unwrap()[0].path, "balloob/Motion Light");
    }

    #[cfg(unix)]
    #[test]
    fn test_list_does_not_follow_symlinked_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let store = BlueprintStore::new(temp_dir.path());
        store.save(&imported("automation", "a/one"), false).unwrap();

        let domain_dir = temp_dir.path().join("automation");
        std::os::unix::fs::symlink(&domain_dir, domain_dir.join("a/loop")).unwrap();

        let stored = store.list(None).unwrap();
        let paths: Vec<_> = stored.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["a/one"]);
    }

    #[test]
    fn test_list_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let store = BlueprintStore::new(temp_dir.path().join("missing"));
        assert!(store.list(None).unwrap().is_empty());
    }
}
