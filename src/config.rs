use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub game: GameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Event-level game tuning. Values are frozen for the duration of one event;
/// changing them mid-event changes pacing semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Plays per pacing window.
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
    /// Max winners inside one pacing window.
    #[serde(default = "default_prizes_per_batch")]
    pub prizes_per_batch: u64,
    /// Base win probability on [0, 1] when no override applies.
    #[serde(default = "default_win_probability")]
    pub win_probability: f64,
    /// Minimum tenure in days to be eligible for a win.
    #[serde(default = "default_min_tenure_days")]
    pub min_tenure_days: i64,
    /// Identifiers exempt from the one-play rule and forced to win
    /// (inventory permitting). Used for on-site demos and smoke checks.
    #[serde(default = "default_test_participant_ids")]
    pub test_participant_ids: Vec<String>,
    /// Prize catalog JSON produced by the stock-sheet conversion step.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    /// Stock-sheet summary row to drop from the catalog; it is a total,
    /// not an assignable prize.
    #[serde(default = "default_grand_total_label")]
    pub grand_total_label: String,
}

fn default_batch_size() -> u64 {
    250
}
fn default_prizes_per_batch() -> u64 {
    20
}
fn default_win_probability() -> f64 {
    0.15
}
fn default_min_tenure_days() -> i64 {
    90
}
fn default_test_participant_ids() -> Vec<String> {
    vec!["9999".to_string()]
}
fn default_catalog_path() -> String {
    "prizes.json".to_string()
}
fn default_grand_total_label() -> String {
    "TOTAL DE BONOS".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            batch_size: default_batch_size(),
            prizes_per_batch: default_prizes_per_batch(),
            win_probability: default_win_probability(),
            min_tenure_days: default_min_tenure_days(),
            test_participant_ids: default_test_participant_ids(),
            catalog_path: default_catalog_path(),
            grand_total_label: default_grand_total_label(),
        }
    }
}

impl GameConfig {
    pub fn is_test_participant(&self, participant_id: &str) -> bool {
        self.test_participant_ids
            .iter()
            .any(|id| id == participant_id)
    }

    fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("game.batch_size must be positive".to_string());
        }
        if self.prizes_per_batch == 0 {
            return Err("game.prizes_per_batch must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.win_probability) {
            return Err(format!(
                "game.win_probability must be within [0, 1], got {}",
                self.win_probability
            ));
        }
        if self.min_tenure_days < 0 {
            return Err("game.min_tenure_days must not be negative".to_string());
        }
        Ok(())
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Read the config file if present, otherwise build entirely from
        // environment variables.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str)
                    .map_err(|e| format!("Failed to parse config file: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // Without a config file the database URL has to come from the
                // environment.
                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and no config.toml was found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    game: GameConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Environment overrides (applied even when the file exists).
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("GAME_BATCH_SIZE")
            && let Ok(n) = v.parse()
        {
            config.game.batch_size = n;
        }
        if let Ok(v) = env::var("GAME_PRIZES_PER_BATCH")
            && let Ok(n) = v.parse()
        {
            config.game.prizes_per_batch = n;
        }
        if let Ok(v) = env::var("GAME_WIN_PROBABILITY")
            && let Ok(p) = v.parse()
        {
            config.game.win_probability = p;
        }
        if let Ok(v) = env::var("GAME_MIN_TENURE_DAYS")
            && let Ok(d) = v.parse()
        {
            config.game.min_tenure_days = d;
        }
        if let Ok(v) = env::var("GAME_TEST_PARTICIPANT_IDS") {
            config.game.test_participant_ids = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = env::var("GAME_CATALOG_PATH") {
            config.game.catalog_path = v;
        }
        if let Ok(v) = env::var("GAME_GRAND_TOTAL_LABEL") {
            config.game.grand_total_label = v;
        }

        config.game.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_defaults() {
        let game = GameConfig::default();
        assert_eq!(game.batch_size, 250);
        assert_eq!(game.prizes_per_batch, 20);
        assert_eq!(game.min_tenure_days, 90);
        assert!(game.is_test_participant("9999"));
        assert!(!game.is_test_participant("1000"));
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let game = GameConfig {
            win_probability: 1.5,
            ..GameConfig::default()
        };
        assert!(game.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_batch() {
        let game = GameConfig {
            batch_size: 0,
            ..GameConfig::default()
        };
        assert!(game.validate().is_err());
    }
}
