use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use spdlog::{info, warn};

use blogport::config::CommentMode;
use blogport::importer::Importer;
use blogport::logger::configure_logger;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "blogport.toml";

/// Converts a Blogger (or WordPress to Blogger) export into markdown files with TOML front matter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Export file (Atom XML)
    input: PathBuf,

    /// Directory where the markdown files are written
    output: PathBuf,

    /// m to merge comments into the post, s to split them in a separate file (default), d to drop them
    comments: Option<String>,

    /// Feature flags: yymm to emit in yyyy/mm sub directories from the post date,
    /// flagged to emit a blogImport flag, debug for a verbose log
    features: Vec<String>,

    /// Config path. If empty, blogport.toml is looked up in the current and user config directories
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// What to do with a comment whose post is not in the export
    #[arg(long, value_enum)]
    orphans: Option<OrphanArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrphanArg {
    /// Stop the import
    Abort,
    /// Log a warning and carry on
    Skip,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, unknown_features) = match open_config(&args) {
        Ok(res) => res,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run blogport --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config.log) {
        eprintln!("Error creating logger sinks. Using the default logger instead. Desc={}", err);
    }

    for feature in unknown_features {
        warn!("Unknown feature flag {} ignored", feature);
    }

    match config.conversion.comments {
        CommentMode::Merge => info!("Comments requested to be merged along with posts. (m)"),
        CommentMode::Drop => info!("Comments will be dropped. (d)"),
        CommentMode::Split => info!("Comments requested to be a separate .md file (s - default)"),
    }

    let stats = Importer::new(&config).run()?;

    info!("{} posts and {} comments imported, {} comment files written",
        stats.posts, stats.comments, stats.comment_files);
    if stats.orphan_comments > 0 {
        warn!("{} comments skipped, their post is not in the export", stats.orphan_comments);
    }
    if stats.write_failures > 0 {
        warn!("{} files could not be written", stats.write_failures);
    }

    Ok(())
}
