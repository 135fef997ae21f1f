use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

/// Initializes the terminal logger once from an optional loglevel string.
/// "off" / "none" skip initialization entirely; a second call is a no-op
/// because the global logger can only be set once per process.
pub fn init_term_logger(loglevel: &Option<String>) {
    if let Some(level) = loglevel {
        if level == "off" || level == "none" {
            return;
        }
    }
    let filter = match loglevel.as_deref() {
        None | Some("debug") => LevelFilter::Debug,
        Some("info") => LevelFilter::Info,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        Some(other) => panic!("loglevel {} is not supported", other),
    };
    let _ = CombinedLogger::init(vec![TermLogger::new(
        filter,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
