use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use postsync::config::{read_config, Config};
use postsync::slug::SlugMode;

use crate::{Args, CFG_FILE_NAME};

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok().and_then(|p| p.parent().map(|d| d.to_path_buf()));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir();

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// Loads the configuration file, or the built-in defaults when none is found,
/// then applies the command line overrides.
pub(crate) fn open_config(args: &Args) -> Result<Config> {
    let config_path = args.config_path.as_ref().map(PathBuf::from).or_else(get_config_path);

    let mut config = match config_path {
        Some(config_path) => {
            println!("Reading config from {}", config_path.display());
            read_config(&config_path)
                .with_context(|| format!("Could not load configuration {}", config_path.display()))?
        }
        None => {
            println!("No {} found, using defaults", CFG_FILE_NAME);
            Config::default()
        }
    };

    if let Some(ref input_dir) = args.input_dir {
        config.paths.input_dir = PathBuf::from(input_dir);
    }

    if let Some(ref endpoint) = args.endpoint {
        config.publisher.endpoint = endpoint.clone();
    }

    if args.use_filename_as_url {
        config.slug.mode = SlugMode::Filename;
    }

    Ok(config)
}
