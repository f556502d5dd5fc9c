use serde::Deserialize;
use serde_json;

use std::fs::File;
use std::path::Path;

#[derive(Deserialize, Default)]
pub struct Config {
    pub device: Option<String>,
}

pub fn read_config(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        println!("Configuration file does not exist, using defaults");
        return Ok(Config::default());
    }

    let fh = match File::open(path) {
        Ok(fh) => fh,
        Err(e) => return Err(format!("Cannot open configuration file: {}", e)),
    };

    match serde_json::from_reader(fh) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(format!("Cannot parse configuration file: {}", e)),
    }
}
