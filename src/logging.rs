use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Maps `-v` counts to a level; `RUST_LOG` still applies when no flag is
/// given.
pub fn level_for_verbosity(verbosity: u8) -> Option<LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// Installs a stderr logger whose lines start with `c`, so they read as
/// comments next to an edge list.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_default_env();
    builder.format(|buf, record| writeln!(buf, "c {} - {}", record.level(), record.args()));
    if let Some(level) = level {
        builder.filter(None, level);
    }
    builder.init();
}
