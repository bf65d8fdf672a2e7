/// Pick the log level: `-v` flags win, then `SYSTEMD_LOG_LEVEL`, then `warn`.
pub fn level_filter(verbose: u8, env_level: Option<&str>) -> log::LevelFilter {
    match verbose {
        0 => env_level
            .and_then(|l| match l.to_lowercase().as_str() {
                "debug" | "7" => Some(log::LevelFilter::Debug),
                "info" | "6" => Some(log::LevelFilter::Info),
                "notice" | "5" | "warning" | "4" => Some(log::LevelFilter::Warn),
                "err" | "3" | "crit" | "2" | "alert" | "1" | "emerg" | "0" => {
                    Some(log::LevelFilter::Error)
                }
                _ => None,
            })
            .unwrap_or(log::LevelFilter::Warn),
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Log to stderr so that a script written to stdout stays clean.
pub fn setup_logging(level: log::LevelFilter) -> Result<(), String> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][systemd2rc][{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| format!("Error while setting up logger: {e}"))
}
