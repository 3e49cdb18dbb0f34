//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use shelf_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "library_file": config.library_file,
                    "library_path": config.library_path(),
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.library_path().display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:     {}", config.data_dir.display());
            println!("  library_file: {}", config.library_file);
            println!(
                "  log_file:     {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Library:     {}", config.library_path().display());
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Print the path of the config file in effect
pub fn path(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let effective_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "config_file": effective_path,
                    "exists": effective_path.exists()
                })
            );
        }
        _ => println!("{}", effective_path.display()),
    }

    Ok(())
}

/// Set a configuration value
///
/// Only the file's own contents are rewritten; `SHELF_*` overrides active in
/// this process are not persisted.
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);

    let mut config =
        Config::load_file_only(&save_path).context("Failed to load configuration")?;

    apply_setting(&mut config, &key, &value)?;

    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply one `key = value` setting to a config
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            if value.is_empty() {
                bail!("data_dir cannot be empty");
            }
            config.data_dir = value.into();
        }
        "library_file" => {
            if value.is_empty() {
                bail!("library_file cannot be empty");
            }
            config.library_file = value.to_string();
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, library_file, log_file",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Sets one env var for the life of the guard, restoring it on drop
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        name: &'static str,
        saved: Option<String>,
    }

    impl<'a> EnvGuard<'a> {
        fn set(name: &'static str, value: &str) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = env::var(name).ok();
            env::set_var(name, value);
            Self {
                _lock: lock,
                name,
                saved,
            }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            match &self.saved {
                Some(v) => env::set_var(self.name, v),
                None => env::remove_var(self.name),
            }
        }
    }

    #[test]
    fn test_set_does_not_persist_env_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "data_dir = \"/home/me/books\"\n").unwrap();

        let _guard = EnvGuard::set("SHELF_DATA_DIR", "/tmp/one-off");
        set(
            "log_file".to_string(),
            "/tmp/x.log".to_string(),
            Some(&path),
            &Output::new(OutputFormat::Quiet),
        )
        .unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.contains("/home/me/books"));
        assert!(!saved.contains("/tmp/one-off"));
        assert!(saved.contains("/tmp/x.log"));

        let reloaded = Config::load_file_only(&path).unwrap();
        assert_eq!(reloaded.data_dir, PathBuf::from("/home/me/books"));
        assert_eq!(reloaded.log_file, Some(PathBuf::from("/tmp/x.log")));
    }

    #[test]
    fn test_set_creates_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        set(
            "library_file".to_string(),
            "reading.json".to_string(),
            Some(&path),
            &Output::new(OutputFormat::Quiet),
        )
        .unwrap();

        let reloaded = Config::load_file_only(&path).unwrap();
        assert_eq!(reloaded.library_file, "reading.json");
    }

    #[test]
    fn test_apply_setting() {
        let mut config = Config::default();

        apply_setting(&mut config, "data_dir", "/books").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/books"));

        apply_setting(&mut config, "library_file", "mine.json").unwrap();
        assert_eq!(config.library_path(), PathBuf::from("/books/mine.json"));

        apply_setting(&mut config, "log_file", "/tmp/shelf.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/shelf.log")));

        apply_setting(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_setting_rejects_bad_input() {
        let mut config = Config::default();

        assert!(apply_setting(&mut config, "colour", "blue").is_err());
        assert!(apply_setting(&mut config, "data_dir", "").is_err());
        assert!(apply_setting(&mut config, "library_file", "").is_err());
    }
}
