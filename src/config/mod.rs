use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::utils::{CardError, CardResult};

pub const ENV_PREFIX: &str = "GREETING_CARD";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gate: GateConfig,
    pub timing: TimingConfig,
    pub ui: UiConfig,
    pub paths: PathConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    pub secret: String,
    pub recipient_name: String,
    pub error_message: String,
    /// Drop everything but digits from the typed code before comparing.
    pub digits_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    pub card_open_delay_ms: u64,
    pub wish_cycle_secs: u64,
    pub animation_speed: AnimationSpeed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub theme: String,
    pub show_progress_header: bool,
    pub text_width: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    pub content_dir: PathBuf,
    pub photos_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationSpeed {
    None,
    Slow,
    Medium,
    Fast,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            secret: "1999200120092012".to_string(),
            recipient_name: "Dad".to_string(),
            error_message: "Hmm, that doesn't seem right. Try again!".to_string(),
            digits_only: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gate: GateConfig::default(),
            timing: TimingConfig {
                card_open_delay_ms: 1000,
                wish_cycle_secs: 10,
                animation_speed: AnimationSpeed::Medium,
            },
            ui: UiConfig {
                theme: "default".to_string(),
                show_progress_header: true,
                text_width: 80,
            },
            paths: PathConfig {
                content_dir: PathBuf::from("./assets/content"),
                photos_dir: PathBuf::from("./assets/photos"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> CardResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CardError::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| CardError::configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Defaults, then the optional TOML file, then `GREETING_CARD__SECTION__KEY`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> CardResult<Self> {
        Self::load_with_env(path, Self::environment())
    }

    // Values stay strings so a secret like "0123" keeps its leading zero;
    // numeric fields are still parsed when deserialized.
    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).separator("__")
    }

    fn load_with_env(path: Option<&Path>, environment: config::Environment) -> CardResult<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        let layered = builder.add_source(environment).build()?;

        let config: Config = layered.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CardResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| CardError::configuration(format!("Failed to create config directory: {}", e)))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .map_err(|e| CardError::configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_content)
            .map_err(|e| CardError::configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn get_content_dir(&self) -> &Path {
        &self.paths.content_dir
    }

    pub fn get_photos_dir(&self) -> &Path {
        &self.paths.photos_dir
    }

    pub fn validate(&self) -> CardResult<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(CardError::configuration("Invalid logging level")),
        }

        if self.gate.secret.is_empty() {
            return Err(CardError::configuration("Gate secret cannot be empty"));
        }
        if self.gate.digits_only && !self.gate.secret.chars().all(|c| c.is_ascii_digit()) {
            return Err(CardError::configuration("Gate secret must be digits when digits_only is set"));
        }
        if self.gate.error_message.trim().is_empty() {
            return Err(CardError::configuration("Gate error message cannot be empty"));
        }
        if self.timing.wish_cycle_secs == 0 {
            return Err(CardError::configuration("Wish cycle period must be greater than 0"));
        }
        if self.ui.text_width < 40 {
            return Err(CardError::configuration("Text width must be at least 40"));
        }
        if self.paths.content_dir.as_os_str().is_empty() {
            return Err(CardError::configuration("Content directory path cannot be empty"));
        }

        Ok(())
    }

    pub fn merge_with_cli(&mut self, cli_config: CliConfig) {
        if let Some(content_dir) = cli_config.content_dir {
            self.paths.content_dir = content_dir;
        }
        if let Some(log_level) = cli_config.log_level {
            self.logging.level = log_level;
        }
        if cli_config.debug {
            self.logging.level = "debug".to_string();
        }
        if let Some(theme) = cli_config.theme {
            self.ui.theme = theme;
        }
    }

    pub fn get_animation_delay_ms(&self) -> u64 {
        match self.timing.animation_speed {
            AnimationSpeed::None => 0,
            AnimationSpeed::Slow => 150,
            AnimationSpeed::Medium => 75,
            AnimationSpeed::Fast => 25,
        }
    }
}

// Configuration that can be overridden by CLI arguments
#[derive(Debug, Default)]
pub struct CliConfig {
    pub content_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub debug: bool,
    pub theme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Gate;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.gate.secret, "1999200120092012");
        assert_eq!(config.timing.card_open_delay_ms, 1000);
        assert_eq!(config.timing.wish_cycle_secs, 10);
        assert_eq!(config.ui.theme, "default");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());

        config = Config::default();
        config.timing.wish_cycle_secs = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.gate.secret = "abc".to_string();
        assert!(config.validate().is_err());

        config.gate.digits_only = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut original_config = Config::default();
        original_config.gate.recipient_name = "Papa".to_string();
        original_config.save_to_file(&config_path).unwrap();

        let loaded_config = Config::from_file(&config_path).unwrap();

        assert_eq!(loaded_config.gate.recipient_name, "Papa");
        assert_eq!(original_config.ui.theme, loaded_config.ui.theme);
        assert_eq!(original_config.timing.animation_speed, loaded_config.timing.animation_speed);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("fresh").join("config.toml");

        let config = Config::from_file(&config_path).unwrap();
        assert!(config_path.exists());
        assert_eq!(config.gate.secret, Config::default().gate.secret);
    }

    #[test]
    fn test_layered_load_reads_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.timing.wish_cycle_secs = 3;
        config.ui.theme = "pastel".to_string();
        config.save_to_file(&config_path).unwrap();

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.timing.wish_cycle_secs, 3);
        assert_eq!(loaded.ui.theme, "pastel");
        assert_eq!(loaded.gate.secret, "1999200120092012");
    }

    #[test]
    fn test_env_overrides_keep_strings() {
        let mut vars = config::Map::new();
        vars.insert("GREETING_CARD__GATE__SECRET".to_string(), "0123".to_string());
        vars.insert("GREETING_CARD__TIMING__WISH_CYCLE_SECS".to_string(), "4".to_string());
        vars.insert("GREETING_CARD__UI__SHOW_PROGRESS_HEADER".to_string(), "false".to_string());

        let loaded = Config::load_with_env(None, Config::environment().source(Some(vars))).unwrap();

        assert_eq!(loaded.gate.secret, "0123");
        assert_eq!(loaded.timing.wish_cycle_secs, 4);
        assert!(!loaded.ui.show_progress_header);
        assert!(Gate::new(&loaded.gate).check("0123").is_accepted());
        assert!(!Gate::new(&loaded.gate).check("123").is_accepted());
    }

    #[test]
    fn test_cli_config_merge() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            log_level: Some("debug".to_string()),
            debug: false,
            theme: Some("dark".to_string()),
            ..Default::default()
        };

        config.merge_with_cli(cli_config);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.ui.theme, "dark");
    }

    #[test]
    fn test_animation_delay() {
        let mut config = Config::default();

        config.timing.animation_speed = AnimationSpeed::None;
        assert_eq!(config.get_animation_delay_ms(), 0);

        config.timing.animation_speed = AnimationSpeed::Slow;
        assert_eq!(config.get_animation_delay_ms(), 150);

        config.timing.animation_speed = AnimationSpeed::Fast;
        assert_eq!(config.get_animation_delay_ms(), 25);
    }
}
