use serde::Deserialize;
use std::path::PathBuf;

use crate::mesh::StlFormat;

fn default_verbose() -> bool {
    false
}

fn default_drop_degenerate() -> bool {
    false
}

/// Settings read from `svg2stl.toml`; every field can be overridden on the
/// command line
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// Extrusion height in mm
    #[serde(default)]
    pub height: Option<f64>,
    /// Directory for the generated STL files
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub format: Option<StlFormat>,
    #[serde(default = "default_drop_degenerate")]
    pub drop_degenerate: bool,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl FileConfig {
    /// Load the first readable config file from the search paths
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("svg2stl.toml"));
    paths.push(PathBuf::from(".svg2stl.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("svg2stl").join("config.toml"));
        paths.push(config_dir.join("svg2stl.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".svg2stl.toml"));
    }

    paths
}
