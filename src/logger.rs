use log::{Level, LevelFilter, Metadata, Record};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

const LEVEL_ENV: &str = "SHADERPACK_LOG";

struct Logger {
    time_start: Instant,
    level: LevelFilter,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
            && (metadata.target().starts_with(env!("CARGO_PKG_NAME"))
                || metadata.target().starts_with("codegen"))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let time_now = Instant::now();
            let time = (time_now - self.time_start).as_secs_f64();
            let level = match record.level() {
                Level::Error => "\x1B[1;31mERRO\x1B[0m",
                Level::Warn => "\x1B[1;33mWARN\x1B[0m",
                Level::Info => "\x1B[1;32mINFO\x1B[0m",
                Level::Debug => "\x1B[1;36mDEBG\x1B[0m",
                Level::Trace => "\x1B[1;34mTRCE\x1B[0m",
            };
            match record.level() {
                Level::Error | Level::Warn => {
                    eprintln!("[{time:>12.6}] {level} {}", record.args())
                }
                _ => println!("[{time:>12.6}] {level} {}", record.args()),
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn initialize_logger() {
    let time_start = Instant::now();
    let level = std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|level| LevelFilter::from_str(&level).ok())
        .unwrap_or(LevelFilter::Info)
        .max(LevelFilter::Error);
    let logger = LOGGER.get_or_init(|| Logger { time_start, level });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}
