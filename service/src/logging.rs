use crate::config::Config;
use log::LevelFilter;
use simplelog::{self, ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Dependencies whose records are dropped unless the level is Trace.
const FILTERED_MODULES: &[&str] = &[
    "sqlx",
    "sea_orm",
    "sea_orm_migration",
    "tower",
    "tower_http",
    "hyper",
    "axum",
    "tungstenite",
];

/// Everything the terminal logger needs, derived from [`Config`].
#[derive(Debug, PartialEq)]
struct LogSettings {
    level: LevelFilter,
    filter_dependencies: bool,
    color: bool,
}

impl LogSettings {
    fn from_config(config: &Config) -> Self {
        Self {
            level: config.log_level_filter,
            filter_dependencies: config.log_level_filter != LevelFilter::Trace,
            // Production output goes to a log collector, not a terminal.
            color: !config.is_production(),
        }
    }

    fn build(&self) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if self.filter_dependencies {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }

    fn color_choice(&self) -> ColorChoice {
        if self.color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }
}

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger.
    ///
    /// Verbose dependency logs are hidden for every level except Trace.
    pub fn init_logger(config: &Config) {
        let settings = LogSettings::from_config(config);

        if let Err(e) = TermLogger::init(
            settings.level,
            settings.build(),
            TerminalMode::Mixed,
            settings.color_choice(),
        ) {
            eprintln!("Logger already initialized: {e}");
        }
    }
}
