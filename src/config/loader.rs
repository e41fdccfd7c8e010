//! Configuration file loading and saving

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::ShotdiffError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .shotdiff.toml in the given directory
    ///
    /// A missing file yields the all-defaults configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shotdiff::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Configured widths: {:?}", config.widths);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        // Read directly instead of checking existence first
        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(ShotdiffError::ConfigParse {
                    path: config_path,
                    message: e.to_string(),
                })
                .context("Failed to read .shotdiff.toml");
            }
        };

        let config: ConfigFile = toml_edit::de::from_str(&contents)
            .map_err(|e| ShotdiffError::ConfigParse {
                path: config_path.clone(),
                message: e.to_string(),
            })
            .context("Failed to parse .shotdiff.toml")?;

        Ok(config)
    }

    /// Save config to .shotdiff.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shotdiff::config::{ConfigFile, ConfigLoader};
    /// use std::path::Path;
    ///
    /// ConfigLoader::save(&ConfigFile::with_defaults(), Path::new("."))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn save(config: &ConfigFile, project_root: &Path) -> Result<()> {
        Self::save_with_fs(config, project_root, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        config: &ConfigFile,
        project_root: &Path,
        fs: &FS,
    ) -> Result<()> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .context("Failed to write .shotdiff.toml")?;

        Ok(())
    }

    /// Check if config file exists in project
    pub fn exists(project_root: &Path) -> bool {
        Self::exists_with_fs(project_root, &RealFileSystem)
    }

    /// Check for the config file with a custom filesystem implementation
    pub fn exists_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> bool {
        fs.exists(&project_root.join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    // Mock FileSystem for testing
    struct MockFileSystem {
        file_content: Option<String>,
        should_fail_read: bool,
        should_fail_write: bool,
        written_content: Arc<Mutex<Option<String>>>,
    }

    impl MockFileSystem {
        fn new() -> Self {
            Self {
                file_content: None,
                should_fail_read: false,
                should_fail_write: false,
                written_content: Arc::new(Mutex::new(None)),
            }
        }

        fn with_content(content: &str) -> Self {
            Self {
                file_content: Some(content.to_string()),
                ..Self::new()
            }
        }

        fn with_read_error() -> Self {
            Self {
                should_fail_read: true,
                ..Self::new()
            }
        }

        fn with_write_error() -> Self {
            Self {
                should_fail_write: true,
                ..Self::new()
            }
        }

        fn get_written_content(&self) -> Option<String> {
            self.written_content.lock().unwrap().clone()
        }
    }

    impl FileSystem for MockFileSystem {
        fn exists(&self, _path: &Path) -> bool {
            self.file_content.is_some()
        }

        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            if self.should_fail_read {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            self.file_content
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
        }

        fn write(&self, _path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
            if self.should_fail_write {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            let contents_str = String::from_utf8_lossy(contents.as_ref()).to_string();
            *self.written_content.lock().unwrap() = Some(contents_str);
            Ok(())
        }

        fn read(&self, _path: &Path) -> io::Result<Vec<u8>> {
            unimplemented!()
        }

        fn list_dir(&self, _path: &Path) -> io::Result<Vec<PathBuf>> {
            unimplemented!()
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            unimplemented!()
        }

        fn remove_file(&self, _path: &Path) -> io::Result<()> {
            unimplemented!()
        }
    }

    #[test]
    fn test_loader_loads_from_valid_toml() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);

        let toml_content = r#"
widths = [768]

[diff]
threshold = 0.25
"#;
        std::fs::write(&config_path, toml_content).unwrap();

        let config = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(config.widths, Some(vec![768]));
        assert_eq!(config.diff.unwrap().threshold, Some(0.25));
    }

    #[test]
    fn test_loader_with_missing_file_uses_defaults() {
        let fs = MockFileSystem::new();
        let config = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_loader_with_invalid_toml_returns_config_error() {
        let fs = MockFileSystem::with_content("invalid { toml syntax");
        let err = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap_err();

        let cause = err.downcast_ref::<ShotdiffError>().unwrap();
        assert!(matches!(cause, ShotdiffError::ConfigParse { .. }));
        assert_eq!(cause.exit_code(), 78);
    }

    #[test]
    fn test_loader_with_permission_error_returns_error() {
        let fs = MockFileSystem::with_read_error();
        let result = ConfigLoader::load_with_fs(Path::new("/test"), &fs);

        // PermissionDenied must be propagated, not treated as a missing file
        let err_msg = format!("{:#}", result.unwrap_err());
        assert!(err_msg.contains("Failed to read"));
        assert!(err_msg.contains("permission denied"));
    }

    #[test]
    fn test_save_writes_valid_toml() {
        let fs = MockFileSystem::new();
        ConfigLoader::save_with_fs(&ConfigFile::with_defaults(), Path::new("/test"), &fs)
            .unwrap();

        let content = fs.get_written_content().unwrap();
        assert!(content.contains("widths"));
        assert!(content.contains("[diff]"));
        assert!(content.contains("[report]"));
    }

    #[test]
    fn test_save_with_write_error_returns_error() {
        let fs = MockFileSystem::with_write_error();
        let result = ConfigLoader::save_with_fs(&ConfigFile::default(), Path::new("/test"), &fs);

        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to write"));
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let temp = tempfile::tempdir().unwrap();

        ConfigLoader::save(&ConfigFile::with_defaults(), temp.path()).unwrap();
        let loaded = ConfigLoader::load(temp.path()).unwrap();

        assert_eq!(loaded, ConfigFile::with_defaults());
    }

    #[test]
    fn test_exists_reflects_file_presence() {
        let temp = tempfile::tempdir().unwrap();
        assert!(!ConfigLoader::exists(temp.path()));

        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "").unwrap();
        assert!(ConfigLoader::exists(temp.path()));
    }

    #[test]
    fn test_loader_handles_empty_file() {
        let fs = MockFileSystem::with_content("");
        let config = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(config, ConfigFile::default());
    }
}
