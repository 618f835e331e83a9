use std::env;
use std::path::PathBuf;

use blogport::config::{read_config, CommentMode, Config, FileConfig, LogLevel, OrphanPolicy};

use crate::{Args, OrphanArg, CFG_FILE_NAME};

const FEATURES: [&str; 3] = ["yymm", "flagged", "debug"];

fn get_config_path() -> Option<PathBuf> {
    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let cfg_dir = dirs::config_dir()?.join("blogport");
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

/// Builds the run configuration: the TOML file when there is one, then the command line on top of it.
/// Feature flags that are not known are returned to be reported once the logger is up.
pub(crate) fn open_config(args: &Args) -> Result<(Config, Vec<String>), String> {
    let file_config = match args.config_path.clone().or_else(get_config_path) {
        Some(config_path) => {
            println!("Reading config from {}", config_path.display());
            read_config(&config_path).map_err(|e| e.to_string())?
        }
        None => FileConfig::default(),
    };

    let mut config = Config::with_file_config(args.input.clone(), args.output.clone(), file_config);

    // A feature flag in the comment mode position is a feature flag, the mode stays the default
    let mut features: Vec<&String> = vec![];
    match args.comments {
        Some(ref token) if FEATURES.contains(&token.as_str()) => features.push(token),
        Some(ref token) => config.conversion.comments = CommentMode::from_letter(token),
        None => {}
    }
    features.extend(args.features.iter());

    if let Some(orphans) = args.orphans {
        config.conversion.orphans = match orphans {
            OrphanArg::Abort => OrphanPolicy::Abort,
            OrphanArg::Skip => OrphanPolicy::Skip,
        };
    }

    let mut unknown = vec![];
    for feature in features {
        match feature.as_str() {
            "yymm" => config.conversion.date_directories = true,
            "flagged" => config.conversion.import_flag = true,
            "debug" => config.log.level = LogLevel::Debug,
            _ => unknown.push(feature.clone()),
        }
    }

    Ok((config, unknown))
}
