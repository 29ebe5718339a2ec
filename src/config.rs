use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::slug::SlugOptions;

pub const DEFAULT_INPUT_DIR: &str = "./content/content";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Paths {
    pub input_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self { input_dir: PathBuf::from(DEFAULT_INPUT_DIR) }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Publisher {
    pub endpoint: String,
    /// Also sends the post body as `content`
    pub include_content: bool,
    /// No timeout when unset
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default = "default_log_to_console")]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

fn default_log_to_console() -> bool {
    true
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub publisher: Publisher,
    pub slug: SlugOptions,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };

    if !str_path.starts_with("${exe_dir}") {
        return path;
    }

    match env::current_exe().ok().as_deref().and_then(Path::parent) {
        Some(exe_dir) => PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())),
        None => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        input_dir: parse_path(cfg.paths.input_dir),
    };

    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path);
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use crate::slug::SlugMode;

    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.paths.input_dir, PathBuf::from("./content/content"));
        assert_eq!(cfg.publisher.endpoint, "");
        assert_eq!(cfg.publisher.timeout_secs, None);
        assert_eq!(cfg.slug.mode, SlugMode::Title);
        assert!(!cfg.slug.transliterate);
        assert!(cfg.log.is_none());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_full_config() {
        let toml_str = r##"
[paths]
input_dir = "posts"

[publisher]
endpoint = "https://example.com/api/posts"
include_content = true
timeout_secs = 30

[slug]
mode = "filename"

[log]
level = "Debug"
location = "/tmp/postsync.log"
"##;
        let cfg = parse_config(toml_str).unwrap();
        assert_eq!(cfg.paths.input_dir, PathBuf::from("posts"));
        assert_eq!(cfg.publisher.endpoint, "https://example.com/api/posts");
        assert!(cfg.publisher.include_content);
        assert_eq!(cfg.publisher.timeout_secs, Some(30));
        assert_eq!(cfg.slug.mode, SlugMode::Filename);

        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert!(log.log_to_console);
        assert_eq!(log.location, Some(PathBuf::from("/tmp/postsync.log")));
    }

    #[test]
    fn test_exe_dir_path() {
        let cfg = parse_config("[paths]\ninput_dir = \"${exe_dir}/posts\"").unwrap();
        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(cfg.paths.input_dir, exe_dir.join("posts"));
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[slug]\nmode = \"random\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let err = read_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
