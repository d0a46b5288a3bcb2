use {
    tracing::Level,
    tracing_subscriber::{prelude::*, filter::filter_fn},
};

// model downloads pull these in; their info-level chatter drowns the step logs
const NOISY_TARGETS: &[&str] = &["cached_path", "hyper", "reqwest", "rustls"];

pub fn init_logging(level: &str) {
    tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(parse_level(level))
        .finish()
        .with(filter_fn(|metadata| {
            if NOISY_TARGETS.iter().any(|target| metadata.target().starts_with(target)) {
                metadata.level() <= &Level::WARN
            } else {
                true
            }
        }))
        .init();
}

pub fn parse_level(level: &str) -> Level {
    level.parse().unwrap_or(Level::INFO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_parse() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("chatty"), Level::INFO);
    }
}
