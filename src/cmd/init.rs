//! Init command implementation
//!
//! Handles the `shotdiff init` command which writes a `.shotdiff.toml`
//! with every setting at its default.

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::config::{self, ConfigFile, ConfigLoader};
use crate::fmt::{icon, CHECKMARK, SPARKLES, WARNING};

/// Write the default configuration file under `root`
///
/// An existing file is left untouched unless `force` is set.
///
/// # Examples
///
/// ```no_run
/// use shotdiff::cmd::init::cmd_init;
/// use std::path::Path;
///
/// cmd_init(Path::new("."), false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init(root: &Path, force: bool) -> Result<()> {
    println!(
        "{}{} Initializing shotdiff",
        icon(&SPARKLES),
        style(" shotdiff init").bold()
    );
    println!();

    if ConfigLoader::exists(root) && !force {
        println!(
            "{} Config file already exists: {}",
            icon(&WARNING),
            style(config::CONFIG_FILE_NAME).cyan()
        );
        println!("   Re-run with --force to overwrite it.");
        return Ok(());
    }

    let file = ConfigFile::with_defaults();
    ConfigLoader::save(&file, root)?;

    println!(
        "{} Created {}",
        icon(&CHECKMARK),
        style(config::CONFIG_FILE_NAME).cyan().bold()
    );
    println!();
    println!("{}", style("Next Steps:").bold());
    println!(
        "   {} Put baseline screenshots in {}",
        style("1.").dim(),
        style("baselines/<key>__<width>.png").cyan()
    );
    println!(
        "   {} Capture the current build into {}",
        style("2.").dim(),
        style("artifacts/current/").cyan()
    );
    println!(
        "   {} Run {} to compare and build the report",
        style("3.").dim(),
        style("shotdiff run").cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cmd_init_writes_defaults() {
        let temp = TempDir::new().unwrap();
        cmd_init(temp.path(), false).unwrap();

        let loaded = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(loaded, ConfigFile::with_defaults());
    }

    #[test]
    fn test_cmd_init_keeps_existing_file_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(config::CONFIG_FILE_NAME);
        std::fs::write(&path, "widths = [800]\n").unwrap();

        cmd_init(temp.path(), false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "widths = [800]\n");
    }

    #[test]
    fn test_cmd_init_force_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(config::CONFIG_FILE_NAME);
        std::fs::write(&path, "widths = [800]\n").unwrap();

        cmd_init(temp.path(), true).unwrap();
        let loaded = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(loaded.widths, Some(vec![375, 1400]));
    }
}
