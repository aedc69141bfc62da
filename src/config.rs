use std::path::{Path, PathBuf};
use clap::{Parser, Subcommand};
use log::info;
use serde::{Deserialize, Serialize};
use crate::error::MediaLogError;
use crate::stats::DEFAULT_DONE_MARKERS;
use crate::utils::collation_utils::DEFAULT_COLLATION_LOCALE;

pub const DEFAULT_DATA_PATH: &str = "data.json";
const CONFIG_DIR_NAME: &str = ".medialog";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Parser, Debug)]
#[command(name = "medialog", version, about = "A personal log of books, movies, podcasts and songs")]
pub struct Cli {
    #[arg(long, env = "MEDIALOG_CONFIG", global = true, help = "Path to the config file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "MEDIALOG_DATA", global = true, help = "Path to the JSON data file")]
    pub data: Option<PathBuf>,

    #[arg(long, env = "MEDIALOG_LOG", global = true, default_value = "info", help = "Log level (off, error, warn, info, debug, trace)")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List catalog records matching a filter, most recent first
    List {
        #[arg(long = "type", help = "book, movie, podcast, song or all")]
        media_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long, short)]
        keyword: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show the selectable tag and status values
    Options {
        #[arg(long)]
        json: bool,
    },
    /// Show collection-wide quick stats
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Show a yearly or monthly report
    Report {
        #[arg(long, help = "Defaults to the newest year with a completion")]
        year: Option<i32>,
        #[arg(long, default_value = "all", help = "1-12 or all")]
        month: String,
        #[arg(long)]
        json: bool,
    },
    /// Serve the catalog and report pages
    Serve {
        #[arg(long, env = "MEDIALOG_PORT")]
        port: Option<u16>,
    },
    /// Read or change the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    Get { key: String },
    Set { key: String, value: String },
}

/// Settings persisted in the config file. Every field is optional.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_markers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation_locale: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub config_path: PathBuf,
    pub file_config: FileConfig,
    pub data_path: PathBuf,
    pub port: Option<u16>,
    pub done_markers: Vec<String>,
    pub collation_locale: String,
}

impl AppConfig {
    /// Flags and environment win over the file config, which wins over defaults.
    pub fn new(config_path: PathBuf, file_config: FileConfig, data_override: Option<PathBuf>, port_override: Option<u16>) -> Self {
        let data_path = data_override
            .or_else(|| file_config.data_path.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let port = port_override.or(file_config.port);
        let done_markers = file_config.done_markers.clone()
            .unwrap_or_else(|| DEFAULT_DONE_MARKERS.iter().map(|x| x.to_string()).collect());
        let collation_locale = file_config.collation_locale.clone()
            .unwrap_or_else(|| DEFAULT_COLLATION_LOCALE.to_string());
        Self { config_path, file_config, data_path, port, done_markers, collation_locale }
    }

    pub fn load(cli: &Cli) -> Result<Self, MediaLogError> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };
        let file_config = get_or_create_file_config(&config_path)?;
        let port_override = match &cli.command {
            Command::Serve { port } => *port,
            _ => None,
        };
        let config = Self::new(config_path, file_config, cli.data.clone(), port_override);
        info!("config_path: {}", config.config_path.display());
        info!("data_path: {}", config.data_path.display());
        Ok(config)
    }
}

pub fn default_config_path() -> Result<PathBuf, MediaLogError> {
    let home = home::home_dir().ok_or(MediaLogError::HomeDirNotFound)?;
    Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

pub fn get_or_create_file_config(config_path: &Path) -> Result<FileConfig, MediaLogError> {
    if !config_path.exists() {
        let file_config = FileConfig::default();
        write_file_config(config_path, &file_config)?;
        return Ok(file_config);
    }
    read_file_config(config_path)
}

pub fn read_file_config(config_path: &Path) -> Result<FileConfig, MediaLogError> {
    let file_str = std::fs::read_to_string(config_path).map_err(MediaLogError::ConfigIOError)?;
    if file_str.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_json::from_str(&file_str).map_err(MediaLogError::ConfigSerializationError)
}

pub fn write_file_config(config_path: &Path, file_config: &FileConfig) -> Result<(), MediaLogError> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(MediaLogError::ConfigIOError)?;
    }
    let file_str = serde_json::to_string_pretty(file_config).map_err(MediaLogError::ConfigSerializationError)?;
    std::fs::write(config_path, file_str).map_err(MediaLogError::ConfigIOError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new(PathBuf::from("c.json"), FileConfig::default(), None, None);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.port, None);
        assert_eq!(config.done_markers, vec!["已", "done", "finished"]);
        assert_eq!(config.collation_locale, "zh");
    }

    #[test]
    fn test_overrides_win_over_file_config() {
        let file_config = FileConfig {
            data_path: Some("from-file.json".to_string()),
            port: Some(8080),
            done_markers: Some(vec!["watched".to_string()]),
            collation_locale: Some("en".to_string()),
        };
        let config = AppConfig::new(PathBuf::from("c.json"), file_config.clone(), None, None);
        assert_eq!(config.data_path, PathBuf::from("from-file.json"));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.done_markers, vec!["watched"]);
        assert_eq!(config.collation_locale, "en");

        let config = AppConfig::new(PathBuf::from("c.json"), file_config, Some(PathBuf::from("cli.json")), Some(9000));
        assert_eq!(config.data_path, PathBuf::from("cli.json"));
        assert_eq!(config.port, Some(9000));
    }

    #[test]
    fn test_file_config_is_created_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.json");
        assert_eq!(get_or_create_file_config(&config_path).unwrap(), FileConfig::default());
        assert!(config_path.exists());

        let file_config = FileConfig { port: Some(4000), ..Default::default() };
        write_file_config(&config_path, &file_config).unwrap();
        assert_eq!(read_file_config(&config_path).unwrap(), file_config);
    }

    #[test]
    fn test_invalid_file_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, "{ nope").unwrap();
        assert!(matches!(read_file_config(&config_path), Err(MediaLogError::ConfigSerializationError(_))));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["medialog", "--data", "log.json", "report", "--year", "2024", "--month", "3"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("log.json")));
        match cli.command {
            Command::Report { year, month, json } => {
                assert_eq!(year, Some(2024));
                assert_eq!(month, "3");
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
