use serde::Deserialize;
use std::path::PathBuf;

fn default_radius() -> f64 {
    5000.0
}
fn default_store_name() -> String {
    "My Store".to_string()
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_store_name")]
    pub store_name: String,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl FileConfig {
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

    paths.push(PathBuf::from("storefence.toml"));
    paths.push(PathBuf::from(".storefence.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("storefence").join("config.toml"));
        paths.push(config_dir.join("storefence.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".storefence.toml"));
        paths.push(home.join(".config").join("storefence").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.radius, 5000.0);
        assert_eq!(config.store_name, "My Store");
        assert!(config.lat.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_full_config_parses() {
        let toml = r#"
            lat = 51.5
            lon = -0.10
            radius = 2500.0
            store_name = "Borough Market"
            output = "borough.geojson"
        "#;
        let config: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.lat, Some(51.5));
        assert_eq!(config.radius, 2500.0);
        assert_eq!(config.store_name, "Borough Market");
        assert_eq!(config.output, Some(PathBuf::from("borough.geojson")));
    }
}
