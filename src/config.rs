use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::content::RenderOptions;

const EXE_DIR_VAR: &str = "${exe_dir}";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            content_dir: PathBuf::from("content"),
            out_dir: PathBuf::from("out"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub render: RenderOptions,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };
    if !str_path.starts_with(EXE_DIR_VAR) {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .and_then(|dir| dir.to_str())
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Could not find the executable directory"))?;
    Ok(PathBuf::from(str_path.replace(EXE_DIR_VAR, exe_dir)))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
        out_dir: parse_path(cfg.paths.out_dir)?,
    };

    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path).transpose()?;
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
