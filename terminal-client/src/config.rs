use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::tictactoe::{BotType, Mark};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(
    path: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, ClientConfig, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(&get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct ClientConfig {
    /// Skips the mark prompt when set.
    #[serde(default)]
    pub player_mark: Option<Mark>,
    #[serde(default)]
    pub bot: BotType,
    /// Fixes the random bot's choices.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        if self.player_mark == Some(Mark::Empty) {
            return Err("player_mark must be X or O".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigError, ConfigSerializer};

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_config_{}.yaml", random_number));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_config_survives_yaml() {
        let default_config = ClientConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: ClientConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let serializer = YamlConfigSerializer::new();
        let config: ClientConfig = serializer.deserialize("player_mark: O\n").unwrap();
        assert_eq!(config.player_mark, Some(Mark::O));
        assert_eq!(config.bot, BotType::Minimax);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_empty_mark_is_invalid() {
        let config = ClientConfig {
            player_mark: Some(Mark::Empty),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_manager_reads_written_file() {
        let file_path = get_temp_file_path();
        let manager = get_config_manager(Some(&file_path));
        let config = ClientConfig {
            player_mark: Some(Mark::X),
            bot: BotType::Random,
            seed: Some(17),
        };
        manager.set_config(&config).unwrap();

        let fresh = get_config_manager(Some(&file_path));
        assert_eq!(fresh.get_config().unwrap(), config);

        let provider = FileContentConfigProvider::new(file_path.clone());
        let content = provider.get_config_content().unwrap().unwrap();
        assert!(content.contains("bot: random"));
        let _ = std::fs::remove_file(&file_path);
    }

    #[test]
    fn test_manager_rejects_invalid_file() {
        let file_path = get_temp_file_path();
        std::fs::write(&file_path, "player_mark: Empty\n").unwrap();
        let result = get_config_manager(Some(&file_path)).get_config();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        let _ = std::fs::remove_file(&file_path);
    }
}
