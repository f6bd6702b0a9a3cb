use std::str::FromStr;
use crate::core::domain::Configuration;

pub fn setup_tracing(config: &Configuration) {
    let level = tracing::Level::from_str(config.log_level.as_str()).unwrap_or(tracing::Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false);
    // try_init so a second call (tests, embedding) keeps the first subscriber
    let _ = if config.log_json {
        builder.with_ansi(false).json().try_init()
    } else {
        builder.try_init()
    };
}
