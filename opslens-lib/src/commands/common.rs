//! Processing shared by every store-backed command.

use super::Host;
use super::config::Config;
use crate::Result;
use crate::reports::{Report, generate_console, generate_json};
use crate::storage::JsonStore;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use directories::BaseDirs;
use ohno::IntoAppError;
use std::io::Write;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Output format of command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Console,

    /// Pretty-printed JSON
    Json,
}

/// Arguments shared by every store-backed command
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `opslens.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory holding stored runs
    #[arg(long, value_name = "PATH", env = "OPSLENS_STORE_DIR")]
    pub store_dir: Option<Utf8PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "console")]
    pub format: OutputFormat,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Everything a command needs: the host, configuration, and store.
pub struct Session<'a, H: Host> {
    pub config: Config,
    pub store: JsonStore,
    host: &'a mut H,
    color: ColorMode,
    format: OutputFormat,
}

impl<'a, H: Host> Session<'a, H> {
    /// Initialize logging, then load the configuration and open the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the store cannot be opened
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;

        let store_dir = if let Some(dir) = &args.store_dir {
            dir.as_std_path().to_path_buf()
        } else {
            BaseDirs::new()
                .into_app_err("could not determine data directory")?
                .data_dir()
                .join("opslens")
        };

        let store = JsonStore::open(store_dir)?;

        Ok(Self {
            config,
            store,
            host,
            color: args.color,
            format: args.format,
        })
    }

    pub fn host(&mut self) -> &mut H {
        self.host
    }

    fn use_colors(&self) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        }
    }

    /// Render a report in the selected format and write it to the host's output.
    pub fn report(&mut self, report: &Report<'_>) -> Result<()> {
        let mut text = String::new();
        match self.format {
            OutputFormat::Console => generate_console(report, self.use_colors(), &mut text)?,
            OutputFormat::Json => generate_json(report, &mut text)?,
        }

        let _ = write!(self.host.output(), "{text}");
        Ok(())
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a second command run in the same process keeps the first logger
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
