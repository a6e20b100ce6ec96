mod app;
mod client;
mod commands;
mod config;
mod error;
mod logging;
mod source;
mod ui;

use chrono::Local;

use crate::{config::Command, error::Result, source::AppSource};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, command) = config::load()?;
    logging::init(&config, !matches!(command, Command::Tui))?;

    let source = AppSource::from_config(&config)?;
    tracing::debug!(source = %source.describe(), "movement source ready");

    match command {
        Command::Tui => {
            let mut app = app::App::new(&config, source);
            app.run().await?;
        }
        Command::Summary { json } => {
            let today = Local::now().date_naive();
            let mut stdout = std::io::stdout().lock();
            commands::summary(&source, &config, today, json, &mut stdout).await?;
        }
        Command::List => {
            let mut stdout = std::io::stdout().lock();
            commands::list(&source, config.currency, &mut stdout).await?;
        }
        Command::Export { path } => {
            let count = commands::export(&source, &path).await?;
            println!("exported {count} movements to {}", path.display());
        }
    }

    Ok(())
}
