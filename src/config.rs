use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// What happens to the reader comments found in the export
#[derive(Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CommentMode {
    /// Comments are appended to the post file
    Merge,
    /// Comments go to a `<slug>-comments.md` file next to the post
    #[default]
    Split,
    /// Comments are not written at all
    Drop,
}

impl CommentMode {
    /// Accepts the single letter used on the command line. Only the first
    /// character matters and anything unknown means split.
    pub fn from_letter(value: &str) -> CommentMode {
        match value.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('m') => CommentMode::Merge,
            Some('d') => CommentMode::Drop,
            _ => CommentMode::Split,
        }
    }
}

/// What to do with a comment whose post is not in the export
#[derive(Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OrphanPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Log {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default = "default_log_to_console")]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: LogLevel::default(),
            log_to_console: true,
            location: None,
        }
    }
}

fn default_log_to_console() -> bool {
    true
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Conversion {
    pub comments: CommentMode,
    pub date_directories: bool,
    pub import_flag: bool,
    pub orphans: OrphanPolicy,
}

/// Values that can come from a TOML file. Paths are only taken from the command line.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct FileConfig {
    pub conversion: Conversion,
    pub log: Log,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub conversion: Conversion,
    pub log: Log,
}

impl Config {
    pub fn new(input_file: PathBuf, output_dir: PathBuf) -> Config {
        Config {
            input_file,
            output_dir,
            conversion: Conversion::default(),
            log: Log::default(),
        }
    }

    pub fn with_file_config(input_file: PathBuf, output_dir: PathBuf, file_config: FileConfig) -> Config {
        Config {
            input_file,
            output_dir,
            conversion: file_config.conversion,
            log: file_config.log,
        }
    }
}

pub fn read_config(cfg_path: &Path) -> Result<FileConfig> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(Error::Config {
            path: cfg_path.to_path_buf(),
            message: format!("Error opening configuration file: {}", e),
        }),
    };

    parse_config(cfg_path, &cfg_content)
}

fn parse_config(cfg_path: &Path, cfg_content: &str) -> Result<FileConfig> {
    toml::from_str::<FileConfig>(cfg_content).map_err(|e| Error::Config {
        path: cfg_path.to_path_buf(),
        message: format!("Error parsing configuration file: {}", e),
    })
}
