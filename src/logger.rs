use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install the `env_logger` backend once per process. Defaults to `warn`;
/// `RUST_LOG` overrides, e.g. `RUST_LOG=probe_table=debug` to see rehashes.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .format_timestamp_millis()
            .parse_default_env();

        // Tests or an embedding binary may have installed a logger already.
        let _ = builder.try_init();
    });
}
