use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_template")]
    pub template: PathBuf,

    #[serde(default = "default_base_path")]
    pub base_path: String,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}
fn default_template() -> PathBuf {
    PathBuf::from("template.html")
}
fn default_base_path() -> String {
    "/".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            content_dir: default_content_dir(),
            static_dir: default_static_dir(),
            output_dir: default_output_dir(),
            template: default_template(),
            base_path: default_base_path(),
        }
    }
}

impl Config {
    /// Files tried, in order, when no config path is given.
    pub const DEFAULT_PATHS: &'static [&'static str] =
        &["mdsite.config.json", "config/mdsite.config.json"];

    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// First existing file from `DEFAULT_PATHS` under `dir`, else defaults.
    pub fn discover(dir: &Path) -> Result<Config> {
        for p in Self::DEFAULT_PATHS {
            let path = dir.join(p);
            if path.is_file() {
                log::info!("using config {}", path.display());
                return Config::load(&path);
            }
        }
        Ok(Config::default())
    }
}
