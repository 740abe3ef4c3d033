use std::env;
use std::path::PathBuf;

use postpress::config::{read_config, Config};
use postpress::logger::default_log_location;

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let cur_dir = env::current_dir().ok();

    [exe_dir, cur_dir, dirs::config_dir()]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// Reads the configuration from `cfg_path` or from the first `postpress.toml`
/// found. Without any file the defaults are used.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let Some(config_path) = cfg_path.or_else(get_config_path) else {
        eprintln!("No {} found. Using defaults", CFG_FILE_NAME);
        return Ok(Config::default());
    };

    eprintln!("Reading config from {}", config_path.display());
    let mut config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    if let Some(mut log) = config.log {
        let location = log.location.unwrap_or_else(default_log_location);
        eprintln!("Log enabled. Files will be written in {}", location.display());
        log.location = Some(location);
        config.log = Some(log);
    }

    Ok(config)
}
