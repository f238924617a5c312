mod app;
mod collab;
mod config;
mod error;
mod logging;
mod ui;

use engine::Stores;

use crate::error::Result;

fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;

    let stores = match config.seed_file.as_ref() {
        Some(path) => Stores::load(path)?,
        None => Stores::seeded()?,
    };
    tracing::info!("starting zapdesk");

    let mut app = app::App::new(config, stores);
    app.run()?;
    Ok(())
}
