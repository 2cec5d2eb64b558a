use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

const PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";

/// Sets up log4rs from `path` when that file exists, otherwise logs to the
/// console at info level. Failing to set up logging is not fatal.
pub fn init(path: &Path) {
    let result = if path.exists() {
        log4rs::init_file(path, Default::default()).map_err(|err| err.to_string())
    } else {
        console_config().and_then(|config| {
            log4rs::init_config(config)
                .map(|_| ())
                .map_err(|err| err.to_string())
        })
    };
    if let Err(err) = result {
        eprintln!("logging disabled: {}", err);
    }
}

fn console_config() -> Result<Config, String> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .map_err(|err| err.to_string())
}
