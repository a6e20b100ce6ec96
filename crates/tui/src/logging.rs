use std::{fs::OpenOptions, sync::Mutex};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

fn filter(level: &str) -> String {
    format!("fincontrol_tui={level},engine={level}")
}

/// Installs the global tracing subscriber.
///
/// The TUI owns the terminal, so without a `log_file` logs are dropped unless
/// `stderr_fallback` is set (used by the one-shot commands).
pub fn init(config: &AppConfig, stderr_fallback: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(&config.log_level));

    match (&config.log_file, stderr_fallback) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| AppError::Logging(err.to_string()))
        }
        (None, true) => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| AppError::Logging(err.to_string())),
        (None, false) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_covers_both_crates() {
        assert_eq!(filter("debug"), "fincontrol_tui=debug,engine=debug");
    }
}
