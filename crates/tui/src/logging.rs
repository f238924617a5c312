use std::{fs::OpenOptions, sync::Mutex};

use crate::{config::AppConfig, error::Result};

/// Send `tracing` output to the configured log file; stdout belongs to the UI.
pub fn init(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_directives(&config.log_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn filter_directives(level: &str) -> String {
    format!("zapdesk_tui={level},engine={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_covers_both_crates() {
        assert_eq!(filter_directives("debug"), "zapdesk_tui=debug,engine=debug");
    }
}
