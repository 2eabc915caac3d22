// src/log.rs
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

pub fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Filter directives when `RUST_LOG` is unset: dependencies stay at `info`,
/// this crate logs at `level`.
pub fn default_filters(level: LevelFilter) -> String {
    format!("{},{}={}", LevelFilter::Info, env!("CARGO_CRATE_NAME"), level).to_lowercase()
}

/// Install the global logger.
///
/// Lines look like `[00:01:02.345][INFO] msg`. `RUST_LOG` overrides `level`.
/// With `file` set, output is appended there instead of stderr.
pub fn init(level: LevelFilter, file: Option<&Path>) -> std::io::Result<()> {
    start();

    let filters = default_filters(level);
    let mut builder = Builder::from_env(Env::default().default_filter_or(filters.as_str()));
    builder.format(|buf, record| {
        let elapsed = fmt_elapsed(start().elapsed().as_millis());
        writeln!(buf, "[{elapsed}][{}] {}", record.level(), record.args())
    });

    if let Some(path) = file {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(f)));
    }

    // A second init (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
    Ok(())
}
