use env_logger::{Builder, Env};

fn builder(env: Env) -> Builder {
    let mut builder = Builder::from_env(env.default_filter_or("info"));
    builder.format_timestamp_secs().format_target(false);
    builder
}

/// Sends log output to stderr so it stays apart from the report on stdout.
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging() {
    builder(Env::default()).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{LevelFilter, Log};

    #[test]
    fn defaults_to_info() {
        let logger = builder(Env::new().filter("CORRIDOR_TEST_UNSET_LOG")).build();
        assert_eq!(logger.filter(), LevelFilter::Info);
        let debug = log::Metadata::builder().level(log::Level::Debug).build();
        assert!(!logger.enabled(&debug));
    }
}
