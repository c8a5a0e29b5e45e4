use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::cli::Cli;
use crate::error::{NutriError, Result};

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub storage_path: PathBuf,
    pub timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let backend_url = cli.backend_url.trim().to_string();
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(NutriError::InvalidInput(format!(
                "backend URL must start with http:// or https://, got '{}'",
                backend_url
            )));
        }

        let storage_path = match &cli.storage {
            Some(path) => path.clone(),
            None => default_storage_path()?,
        };

        Ok(Config {
            backend_url,
            storage_path,
            timeout: Duration::from_secs(cli.timeout_secs.max(1)),
        })
    }
}

fn default_storage_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "nutritrack").ok_or_else(|| {
        NutriError::InvalidInput("could not determine home directory".to_string())
    })?;
    Ok(proj_dirs.data_dir().join("storage.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_explicit_storage_and_url() {
        let cli = Cli::parse_from([
            "nutritrack",
            "--backend-url",
            "https://plans.example.org",
            "--storage",
            "/tmp/nt.json",
            "load",
        ]);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.backend_url, "https://plans.example.org");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/nt.json"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let cli = Cli::parse_from(["nutritrack", "--backend-url", "ftp://x", "--storage", "s.json"]);
        assert!(Config::from_cli(&cli).is_err());
    }
}
