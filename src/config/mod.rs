use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub input_file: Option<String>,
    pub timeout: Option<usize>,
    pub proxy: Option<String>,
    pub header: Option<String>,
    pub no_color: Option<bool>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub script: Option<String>,
    pub log_level: Option<String>,
}

const CONFIG_DIR: &str = ".adminlist";
const CONFIG_NAME: &str = "config.yml";
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .iter()
        .find_map(|key| env::var_os(key).filter(|v| !v.is_empty()))
        .map(PathBuf::from)
}

pub fn default_config_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_NAME))
}

/// Expands a leading `~/` against the home directory; anything else is
/// returned untouched.
pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).display().to_string()
}

impl ConfigFile {
    fn check(self, path: &Path) -> Result<Self, String> {
        if let Some(level) = self.log_level.as_deref() {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(format!(
                    "invalid log_level '{level}' in '{}', expected one of {}",
                    path.display(),
                    LOG_LEVELS.join(", ")
                ));
            }
        }
        Ok(self)
    }
}

/// A missing file yields the defaults only when `allow_missing` is set,
/// which is how the implicit `~/.adminlist/config.yml` is read.
pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if allow_missing {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(ConfigFile::default());
            }
            return Err(format!("config file not found '{}'", path.display()));
        }
        Err(e) => return Err(format!("cannot read config '{}': {e}", path.display())),
    };
    serde_yaml::from_str::<ConfigFile>(&contents)
        .map_err(|e| format!("cannot parse config '{}': {e}", path.display()))?
        .check(path)
}

fn default_config_yaml() -> String {
    r#"# adminlist config
#
# Location (default):
#   ~/.adminlist/config.yml

# Record source (choose one; a local file wins over the url)
url: https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json
# input_file: ./members.json

# HTTP (optional)
# timeout: 10            # seconds; unset waits on the transport indefinitely
# proxy: http://127.0.0.1:8080
# header: "Key: Value"

# Session
# script: ./actions.txt  # run commands from a file instead of stdin

# Export (optional, written when the session ends)
# output: ./users.json
# output_format: json

# Output styling
no_color: false
# log_level: warn
"#
    .to_string()
}

/// Returns `true` when a new file was written.
pub fn ensure_default_config_file(path: &Path) -> Result<bool, String> {
    if path.is_file() {
        return Ok(false);
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("cannot create '{}': {e}", dir.display()))?;
    }
    std::fs::write(path, default_config_yaml())
        .map_err(|e| format!("cannot write '{}': {e}", path.display()))?;
    Ok(true)
}
