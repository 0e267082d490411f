use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

impl Config {
    /// Load the configuration from a YAML file.
    pub fn load(yml_path: &str) -> anyhow::Result<Self> {
        let yml = std::fs::read_to_string(yml_path)?;
        let config = serde_yaml::from_str(&yml)?;
        Ok(config)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "DatabaseConfig::default_pool_size")]
    pub pool_size: u32,
}

impl DatabaseConfig {
    fn default_pool_size() -> u32 {
        4
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/recipes.db".to_string(),
            pool_size: Self::default_pool_size(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct HistoryConfig {
    /// List the most recent revision first.
    #[serde(default)]
    pub newest_first: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = serde_yaml::from_str("history:\n  newest_first: true\n").unwrap();
        assert_eq!(config.database.path, "data/recipes.db");
        assert_eq!(config.database.pool_size, 4);
        assert!(config.history.newest_first);

        let config: Config = serde_yaml::from_str("database:\n  path: /tmp/x.db\n").unwrap();
        assert_eq!(config.database.path, "/tmp/x.db");
        assert_eq!(config.database.pool_size, 4);
        assert!(!config.history.newest_first);
    }
}
