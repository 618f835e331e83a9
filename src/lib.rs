pub mod config;
pub mod error;
pub mod logger;
pub mod importer;
pub mod feed;
pub mod content;
pub mod post;
pub mod comments;
pub mod writer;
mod text_utils;
mod test_data;
