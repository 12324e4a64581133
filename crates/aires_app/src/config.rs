//! Startup configuration: built-in defaults, then an optional RON file, then
//! command-line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use aires_core::{AppState, ResumeId, UploadedResume};
use aires_engine::ApiSettings;
use aires_logging::LogDestination;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "aires.ron";
const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

#[derive(Debug, Parser)]
#[command(name = "aires", version, about = "AI resume enhancement client")]
pub struct Cli {
    /// Resume to validate and upload on startup.
    pub file: Option<PathBuf>,

    /// RON configuration file (defaults to ./aires.ron when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the resume service.
    #[arg(long, env = "AIRES_API_URL")]
    pub api_url: Option<String>,

    /// Directory that receives improved_resume.pdf.
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Open an already uploaded resume instead of uploading a file.
    #[arg(long, requires = "original", conflicts_with = "file")]
    pub resume_id: Option<ResumeId>,

    /// Text file holding the original content of `--resume-id`.
    #[arg(long, requires = "resume_id")]
    pub original: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub log: Option<LogChoice>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Seconds to wait for a response; 0 waits indefinitely.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogChoice {
    Terminal,
    File,
    Both,
}

impl From<LogChoice> for LogDestination {
    fn from(choice: LogChoice) -> Self {
        match choice {
            LogChoice::Terminal => LogDestination::Terminal,
            LogChoice::File => LogDestination::File,
            LogChoice::Both => LogDestination::Both,
        }
    }
}

/// Contents of `aires.ron`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub download_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub max_pdf_bytes: Option<u64>,
    pub log: Option<LogChoice>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// A file config together with the problems found while loading it.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub file: FileConfig,
    pub warnings: Vec<String>,
}

/// Loads the RON config. An explicit path must exist and parse; the implicit
/// `./aires.ron` is optional and a broken one only produces a warning.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = parse(path, &text)?;
        return Ok(LoadedConfig {
            file,
            warnings: Vec::new(),
        });
    }

    let path = PathBuf::from(CONFIG_FILENAME);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(LoadedConfig::default()),
        Err(err) => {
            return Ok(LoadedConfig {
                file: FileConfig::default(),
                warnings: vec![format!("Failed to read {path:?}: {err}")],
            })
        }
    };
    match parse(&path, &text) {
        Ok(file) => Ok(LoadedConfig {
            file,
            warnings: Vec::new(),
        }),
        Err(err) => Ok(LoadedConfig {
            file: FileConfig::default(),
            warnings: vec![format!("Ignoring config: {err}")],
        }),
    }
}

fn parse(path: &Path, text: &str) -> Result<FileConfig, ConfigError> {
    ron::from_str(text).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Startup {
    Empty,
    Upload(PathBuf),
    Open {
        resume_id: ResumeId,
        original: PathBuf,
    },
}

impl Startup {
    /// Builds the first application state, reading the original text when
    /// an existing resume is opened.
    pub fn initial_state(&self) -> Result<AppState, ConfigError> {
        match self {
            Startup::Empty | Startup::Upload(_) => Ok(AppState::new()),
            Startup::Open {
                resume_id,
                original,
            } => {
                let original_text =
                    fs::read_to_string(original).map_err(|source| ConfigError::Read {
                        path: original.clone(),
                        source,
                    })?;
                Ok(AppState::with_resume(UploadedResume {
                    id: *resume_id,
                    original_text,
                }))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub download_dir: PathBuf,
    pub log: LogDestination,
    pub level: LevelFilter,
    pub startup: Startup,
}

impl Settings {
    /// Flags win over the file, the file wins over built-in defaults.
    pub fn resolve(cli: Cli, file: FileConfig) -> Self {
        let defaults = ApiSettings::default();

        let request_secs = cli.request_timeout_secs.or(file.request_timeout_secs);
        let request_timeout = match request_secs {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.request_timeout,
        };
        let api = ApiSettings {
            base_url: cli.api_url.or(file.api_url).unwrap_or(defaults.base_url),
            connect_timeout: file
                .connect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            request_timeout,
            max_pdf_bytes: file.max_pdf_bytes.unwrap_or(defaults.max_pdf_bytes),
        };

        let verbose = cli.verbose || file.verbose.unwrap_or(false);
        let startup = match (cli.resume_id, cli.original, cli.file) {
            (Some(resume_id), Some(original), _) => Startup::Open {
                resume_id,
                original,
            },
            (_, _, Some(path)) => Startup::Upload(path),
            _ => Startup::Empty,
        };

        Self {
            api,
            download_dir: cli
                .download_dir
                .or(file.download_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
            log: cli.log.or(file.log).unwrap_or(LogChoice::File).into(),
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            startup,
        }
    }
}
