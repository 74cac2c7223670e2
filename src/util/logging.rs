pub fn configure(verbose: bool) {
    let mut builder = builder(verbose);
    builder.parse_default_env();
    builder.init();
}

fn builder(verbose: bool) -> env_logger::Builder {
    let level = if verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .filter_module("hms_duration", level);
    builder
}
