// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, IsTerminal, Write};
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subfixer::app_config::{self, Config};
use subfixer::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subfixer
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Subfixer - align a desynchronized subtitle file against a good one
#[derive(Parser, Debug)]
#[command(name = "subfixer")]
#[command(version)]
#[command(about = "Manual subtitle alignment and repair tool")]
#[command(long_about = "Subfixer loads a good and a bad subtitle file side by side and lets you
shift, copy and merge lines until the bad file lines up, then saves both.

EXAMPLES:
    subfixer --good movie.en.srt --bad movie.fr.srt
    subfixer --good a.srt --bad b.srt --script fixes.txt
    subfixer completions bash > subfixer.bash

Type 'help' at the prompt for the list of commands.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Reference subtitle file
    #[arg(long, value_name = "PATH")]
    good: Option<PathBuf>,

    /// Subtitle file to repair
    #[arg(long, value_name = "PATH")]
    bad: Option<PathBuf>,

    /// Read shell commands from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "subfixer.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subfixer", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::from_file(&cli.config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config_path))?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.into());

    let mut controller = Controller::with_config(config)?;
    controller.open_initial(cli.good.as_deref(), cli.bad.as_deref());

    let mut stdout = std::io::stdout();
    match &cli.script {
        Some(script) => {
            let file = File::open(script)
                .with_context(|| format!("Failed to open script: {:?}", script))?;
            info!("Running commands from {:?}", script);
            controller.run(BufReader::new(file), &mut stdout, false)?;
        }
        None => {
            let stdin = std::io::stdin();
            let interactive = stdin.is_terminal();
            controller.run(stdin.lock(), &mut stdout, interactive)?;
        }
    }

    Ok(())
}
