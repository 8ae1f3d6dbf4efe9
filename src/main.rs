// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info, warn};
use std::io::Write;
use std::path::PathBuf;

use smi2ass::app_config::{self, LANGUAGE_FILE, STYLE_FILE};
use smi2ass::color;
use smi2ass::file_utils::FileManager;
use smi2ass::language_utils::get_language_name;
use smi2ass::{AppError, StyleComposer};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Render the ASS header (Script Info, Styles, Events format)
    Header(HeaderArgs),

    /// Resolve SMI language codes to ASS language codes
    Lang {
        /// SMI language codes (e.g. KRCC, ENCC)
        #[arg(value_name = "CODE", required = true)]
        codes: Vec<String>,
    },

    /// Convert color names to hex (or ASS) notation
    Color {
        /// CSS color names (e.g. white, lightsteelblue)
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,

        /// Print ASS &HBBGGRR& notation instead of #rrggbb
        #[arg(long)]
        ass: bool,
    },

    /// Load both setting files and report problems
    Check,

    /// Generate shell completions for smi2ass
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct HeaderArgs {
    /// Video title written to Script Info
    #[arg(short, long)]
    title: Option<String>,

    /// Playback width (PlayResX)
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Playback height (PlayResY)
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Font name of the default style
    #[arg(long)]
    font_name: Option<String>,

    /// Font size of the default style
    #[arg(long)]
    font_size: Option<f64>,

    /// Write the header to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long, requires = "output")]
    force_overwrite: bool,
}

/// smi2ass - SAMI to ASS subtitle styling
///
/// Builds the header of an .ass subtitle from lan_code.json and
/// ass_styles.json, and exposes the language and color lookups used while
/// converting SMI files.
#[derive(Parser, Debug)]
#[command(name = "smi2ass")]
#[command(version)]
#[command(about = "SMI to ASS subtitle header and style tool")]
#[command(long_about = "smi2ass renders ASS subtitle headers from JSON style settings.

EXAMPLES:
    smi2ass header                                   # Header with the configured defaults
    smi2ass header -t \"Episode 01\" --width 1280 --height 720
    smi2ass header --font-name \"Noto Sans\" -o ep01.ass
    smi2ass lang KRCC ENCC                           # Resolve SMI language classes
    smi2ass color white --ass                        # &HFFFFFF&
    smi2ass check                                    # Validate the setting files
    smi2ass completions bash > smi2ass.bash

SETTINGS:
    lan_code.json and ass_styles.json are read from --setting-dir, then
    $SMI2ASS_SETTING_DIR, then a 'setting' directory next to the executable,
    then <config dir>/smi2ass.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Directory containing lan_code.json and ass_styles.json
    #[arg(short, long, global = true)]
    setting_dir: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true, default_value = "info")]
    log_level: CliLogLevel,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    let cli = CommandLineOptions::parse();

    let level = app_config::LogLevel::from(cli.log_level).to_level_filter();
    CustomLogger::init(level)?;

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "smi2ass", &mut std::io::stdout());
            Ok(())
        }
        Commands::Color { names, ass } => Ok(run_color(&names, ass)?),
        Commands::Header(args) => {
            let composer = load_composer(cli.setting_dir)?;
            Ok(run_header(composer, args)?)
        }
        Commands::Lang { codes } => {
            let composer = load_composer(cli.setting_dir)?;
            for code in codes {
                println!("{}\t{}", code, composer.resolve_language_code(&code));
            }
            Ok(())
        }
        Commands::Check => {
            let composer = load_composer(cli.setting_dir)?;
            run_check(&composer);
            Ok(())
        }
    }
}

fn load_composer(setting_dir: Option<PathBuf>) -> Result<StyleComposer, AppError> {
    let (dir, source) = app_config::locate_setting_dir(setting_dir.as_deref())?;
    debug!("Reading {} and {} from {:?} ({})", LANGUAGE_FILE, STYLE_FILE, dir, source);
    Ok(StyleComposer::new(Some(&dir))?)
}

fn run_header(mut composer: StyleComposer, args: HeaderArgs) -> Result<(), AppError> {
    if let Some(title) = &args.title {
        composer.set_title(title);
    }

    if let (Some(width), Some(height)) = (args.width, args.height) {
        composer.set_resolution(width, height);
    }

    if let Some(font_name) = &args.font_name {
        composer.set_font_name(font_name);
    }

    if let Some(font_size) = args.font_size {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(AppError::InvalidArgument(format!(
                "font size must be a positive number, got {}",
                font_size
            )));
        }
        composer.set_font_size(font_size);
    }

    let (width, height) = composer.get_resolution();
    debug!(
        "Rendering header: title={:?} resolution={}x{} font={} {}",
        composer.get_title(),
        width,
        height,
        composer.get_font_name(),
        composer.get_font_size()
    );

    let header = composer.render_header();

    match args.output {
        Some(path) => {
            if FileManager::file_exists(&path) && !args.force_overwrite {
                warn!("Output file already exists: {:?}. Use -f to force overwrite.", path);
                return Ok(());
            }
            FileManager::write_to_file(&path, &header)
                .map_err(|e| AppError::File(format!("{:#}", e)))?;
            info!("Success: {:?}", path);
        }
        None => print!("{}", header),
    }

    Ok(())
}

fn run_color(names: &[String], ass: bool) -> Result<(), AppError> {
    for name in names {
        let converted = if ass {
            color::color_name_to_ass(name)?
        } else {
            color::color_name_to_hex(name)?
        };
        println!("{}\t{}", name, converted);
    }
    Ok(())
}

fn run_check(composer: &StyleComposer) {
    let languages = composer.languages();
    let styles = composer.styles();

    if let Some(dir) = composer.setting_dir() {
        info!("Setting directory: {:?}", dir);
    }
    info!(
        "{}: {} codes, fallback \"{}\"",
        LANGUAGE_FILE,
        languages.len(),
        languages.fallback()
    );

    for (smi, ass) in languages.entries() {
        match get_language_name(ass) {
            Ok(name) => debug!("{} -> {} ({})", smi, ass, name),
            Err(_) => debug!("{} -> {}", smi, ass),
        }
    }

    for (smi, ass) in languages.unrecognized_codes() {
        warn!("{} maps to \"{}\", which is not an ISO 639 code", smi, ass);
    }

    let (width, height) = composer.get_resolution();
    info!(
        "{}: title \"{}\", {}x{}, {} style fields ({} {})",
        STYLE_FILE,
        composer.get_title(),
        width,
        height,
        styles.style.fields.len(),
        composer.get_font_name(),
        composer.get_font_size()
    );
}
