use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use spdlog::{debug, error};

use crate::error::{Error, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WriteMode {
    Overwrite,
    Append,
}

/// Writes `content` to `path`, creating the missing parent directories first.
/// Failures are logged and returned, the caller decides whether to carry on.
pub fn write_file(path: &Path, content: &str, mode: WriteMode) -> Result<()> {
    debug!("going to {} {}", verb(mode), path.display());

    match try_write(path, content, mode) {
        Ok(()) => {
            debug!("Successfully {} {}", past_verb(mode), path.display());
            Ok(())
        }
        Err(e) => {
            error!("while {} {} - {}", gerund(mode), path.display(), e);
            Err(Error::Write {
                path: path.to_path_buf(),
                source: e,
            })
        }
    }
}

fn try_write(path: &Path, content: &str, mode: WriteMode) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    match mode {
        WriteMode::Overwrite => fs::write(path, content),
        WriteMode::Append => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(content.as_bytes())
        }
    }
}

fn verb(mode: WriteMode) -> &'static str {
    match mode {
        WriteMode::Overwrite => "write to",
        WriteMode::Append => "append to",
    }
}

fn past_verb(mode: WriteMode) -> &'static str {
    match mode {
        WriteMode::Overwrite => "written to",
        WriteMode::Append => "appended to",
    }
}

fn gerund(mode: WriteMode) -> &'static str {
    match mode {
        WriteMode::Overwrite => "writing to",
        WriteMode::Append => "appending to",
    }
}
