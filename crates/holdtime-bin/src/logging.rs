use log::LevelFilter;

/// Initialize the logging system with env_logger.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects debug output for
/// the workspace crates and info for everything else.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("holdtime", level)
        .filter_module("holdtime_core", level)
        .filter_module("osr_model", level)
        .parse_default_env()
        .init();
}
