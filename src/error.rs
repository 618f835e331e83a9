use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error parsing xml file ({}): {message}", path.display())]
    Parse {
        path: PathBuf,
        message: String,
    },

    #[error("Post {post_id} referenced by comment {comment_id} was not found")]
    PostNotFound {
        post_id: String,
        comment_id: String,
    },

    #[error("Error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error in configuration file {}: {message}", path.display())]
    Config {
        path: PathBuf,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
