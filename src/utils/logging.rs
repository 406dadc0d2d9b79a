// src/utils/logging.rs
//! Logging configuration
//!
//! Sets up `env_logger` with the compact `[ts level module:line] msg` layout
//! used by every log line of the manager.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;

/// Initializes the logging subsystem
///
/// # Configuration
/// - Logs to stdout
/// - Default log level: Info
/// - Respects `RUST_LOG` environment variable if set
pub fn init_logging() {
    let mut builder = common_log_config();

    if env::var("RUST_LOG").is_err() {
        builder.filter_level(LevelFilter::Info);
    } else {
        builder.parse_env("RUST_LOG");
    }

    builder.init();
}

/// Initializes logging for tests, ignoring repeated initialization
///
/// Output goes through the test harness capture so it only shows up for
/// failing tests.
pub fn init_test_logging() {
    let _ = common_log_config()
        .filter_level(LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

fn common_log_config() -> Builder {
    let mut builder = Builder::new();

    builder
        .format(|buf, record| {
            use std::io::Write;
            let ts = buf.timestamp_millis();
            let level = record.level();
            let module = record.module_path().unwrap_or_default();
            let line = record.line().unwrap_or(0);

            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                ts,
                level,
                module,
                line,
                record.args()
            )
        })
        .target(Target::Stdout);

    builder
}
