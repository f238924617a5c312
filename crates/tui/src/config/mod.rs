use std::path::PathBuf;

use clap::Parser;
use engine::Account;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/zapdesk.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pre-filled on the login screen.
    pub username: String,
    pub accounts: Vec<Account>,
    pub currency_symbol: String,
    /// JSON file replacing the built-in demo data.
    pub seed_file: Option<PathBuf>,
    pub log_file: PathBuf,
    pub log_level: String,
    pub timezone: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            accounts: vec![Account {
                username: "admin".to_string(),
                password: "admin".to_string(),
            }],
            currency_symbol: "₹".to_string(),
            seed_file: None,
            log_file: PathBuf::from("zapdesk.log"),
            log_level: "info".to_string(),
            timezone: "Asia/Kolkata".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "zapdesk_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override username (password is never read from CLI).
    #[arg(long)]
    username: Option<String>,
    /// Load records from this JSON file instead of the demo data.
    #[arg(long)]
    seed_file: Option<PathBuf>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
}

impl Args {
    fn apply(self, settings: &mut AppConfig) {
        if let Some(username) = self.username {
            settings.username = username;
        }
        if let Some(seed_file) = self.seed_file {
            settings.seed_file = Some(seed_file);
        }
        if let Some(log_file) = self.log_file {
            settings.log_file = log_file;
        }
        if let Some(log_level) = self.log_level {
            settings.log_level = log_level;
        }
        if let Some(timezone) = self.timezone {
            settings.timezone = timezone;
        }
    }
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("ZAPDESK"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    args.apply(&mut settings);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_file, PathBuf::from("zapdesk.log"));
        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.accounts[0].username, "admin");
        assert!(config.seed_file.is_none());
    }

    #[test]
    fn cli_overrides_win() {
        let args = Args::try_parse_from([
            "zapdesk_tui",
            "--username",
            "mihir",
            "--seed-file",
            "data.json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.username, "mihir");
        assert_eq!(config.seed_file, Some(PathBuf::from("data.json")));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.timezone, "Asia/Kolkata");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "currency_symbol = \"$\"\n[[accounts]]\nusername = \"ops\"\npassword = \"pw\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.accounts[0].username, "ops");
        assert_eq!(config.log_level, "info");
    }
}
