use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, short, default_value_t = 3)]
    pub verbosity: usize,
    #[arg(long, short, default_value_t = false)]
    pub quiet: bool,
    /// JSON configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// Overrides the configured port
    #[arg(long, short, env = "PORT")]
    pub port: Option<u16>,
    /// Overrides the configured PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub postgres: Option<String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error opening configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    /// Without a connection string albums are kept in memory only.
    pub postgres: Option<String>,
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 3000,
            postgres: None,
            max_connections: 5,
        }
    }
}

impl Config {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads the file named on the command line, if any, then applies the
    /// command line and environment overrides.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => {
                let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_owned(),
                    source,
                })?;
                Self::from_json(&source)?
            }
            None => Config::default(),
        };
        if let Some(port) = args.port {
            config.port = port;
        }
        if let Some(postgres) = &args.postgres {
            config.postgres = Some(postgres.to_owned());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["albumcave"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::from_json(r#"{ "postgres": "postgres://localhost/albums" }"#).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.postgres.as_deref(), Some("postgres://localhost/albums"));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Config::from_json("{ port: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn unreadable_file_is_reported() {
        let result = Config::load(&args(&["--config", "/nonexistent/albumcave.json"]));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn command_line_overrides_win() {
        let config = Config::load(&args(&["--port", "8080", "--postgres", "postgres://db/albums"])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.postgres.as_deref(), Some("postgres://db/albums"));
    }
}
