// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, LevelFilter, Level, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use viewlingo::app_config::{self, split_list, Config, MAX_CONCURRENT_REQUESTS};
use viewlingo::app_controller::{keys_for_file, Controller, RunSummary};
use viewlingo::file_utils::FileManager;
use viewlingo::shredder::MarkdownShredder;
use viewlingo::translation::SourceTextTranslator;

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
    /// Wrap view text in @Localizer lookups without touching resource stores
    Wrap(ProjectArgs),

    /// Print the localization keys found in a view or C# file
    Keys {
        /// File to scan
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the translatable and static chunks of a content file
    Shred {
        /// File to shred
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum characters per chunk
        #[arg(short, long)]
        max_length: Option<usize>,
    },

    /// Localize views and seed their resource stores
    SeedViews(SeedArgs),

    /// Extract C# keys and seed their resource stores
    SeedCsharp(SeedArgs),

    /// Copy controller [RenderInNavBar] labels into ViewModelArgsInjector._useless_for_localizer()
    InjectNavLabels(ProjectArgs),

    /// Translate the content files of a folder into another folder
    TranslateFolder(FolderArgs),

    /// Generate shell completions for viewlingo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ProjectArgs {
    /// Project root to scan
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    path: PathBuf,

    /// Report what would change without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct SeedArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Target cultures, comma separated (e.g. 'zh-CN,ja-JP')
    #[arg(short, long)]
    languages: Option<String>,

    /// Keys translated at the same time for one file
    #[arg(short = 'c', long)]
    concurrent_requests: Option<usize>,
}

#[derive(Args, Debug)]
struct FolderArgs {
    /// Folder holding the files to translate
    #[arg(short, long)]
    source: PathBuf,

    /// Folder receiving the translated files
    #[arg(short, long)]
    destination: PathBuf,

    /// Target culture (e.g. 'zh-CN')
    #[arg(short, long)]
    language: String,

    /// File extensions to translate, comma separated (e.g. 'md,html')
    #[arg(short, long)]
    extensions: Option<String>,

    /// Only translate the top level of the source folder
    #[arg(long)]
    no_recursive: bool,

    /// Leave destination files that already exist
    #[arg(long)]
    skip_existing: bool,

    /// Report what would change without writing anything
    #[arg(long)]
    dry_run: bool,
}

/// viewlingo - localization tooling for Razor views and C# sources
///
/// Wraps view text in localizer lookups, extracts keys from views and C#
/// sources, and keeps .resx resource stores in sync with them.
#[derive(Parser, Debug)]
#[command(name = "viewlingo")]
#[command(version)]
#[command(about = "Localize Razor views and C# sources into .resx resource stores")]
#[command(long_about = "viewlingo localizes server-rendered views and C# sources.

EXAMPLES:
    viewlingo wrap --path ./MyApp                     # Wrap view text in @Localizer lookups
    viewlingo keys ./MyApp/Views/Home/Index.cshtml    # List keys found in a file
    viewlingo seed-views --path ./MyApp -l en-GB      # Seed view resource stores
    viewlingo seed-csharp --path ./MyApp --dry-run    # Preview C# resource stores
    viewlingo inject-nav-labels --path ./MyApp        # Expose navigation labels to the localizer
    viewlingo translate-folder -s docs -d docs-zh -l zh-CN
    viewlingo completions bash > viewlingo.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short = 'C', long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger; verbosity is adjusted with `log::set_max_level`
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
                "\x1B[{}m{} {:<5} {}\x1B[0m",
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

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "viewlingo", &mut std::io::stdout());
            Ok(())
        }
        Commands::Keys { file } => {
            let content = FileManager::read_to_string(&file)?;
            for key in keys_for_file(&file, &content) {
                println!("{}", key);
            }
            Ok(())
        }
        Commands::Shred { file, max_length } => {
            let content = FileManager::read_to_string(&file)?;
            let max_length = max_length.unwrap_or(viewlingo::shredder::DEFAULT_MAX_LENGTH);
            for chunk in MarkdownShredder::new().shred(&content, max_length) {
                println!("{}", chunk);
            }
            Ok(())
        }
        Commands::Wrap(args) => {
            let config = load_config(&cli.config_path, cli.log_level.is_some())?;
            let controller = build_controller(config)?;
            let summary = controller.wrap_views(&args.path, !args.dry_run).await?;
            report(&summary)
        }
        Commands::SeedViews(args) => {
            let config = seed_config(&cli.config_path, cli.log_level.is_some(), &args)?;
            let languages = config.target_languages.clone();
            let controller = build_controller(config)?;
            let summary = controller
                .generate_view_resources(&args.project.path, &languages, !args.project.dry_run)
                .await?;
            report(&summary)
        }
        Commands::SeedCsharp(args) => {
            let config = seed_config(&cli.config_path, cli.log_level.is_some(), &args)?;
            let languages = config.target_languages.clone();
            let controller = build_controller(config)?;
            let summary = controller
                .generate_csharp_resources(&args.project.path, &languages, !args.project.dry_run)
                .await?;
            report(&summary)
        }
        Commands::InjectNavLabels(args) => {
            let config = load_config(&cli.config_path, cli.log_level.is_some())?;
            let controller = build_controller(config)?;
            let summary = controller.generate_view_injections(&args.path, !args.dry_run).await?;
            report(&summary)
        }
        Commands::TranslateFolder(args) => {
            let mut config = load_config(&cli.config_path, cli.log_level.is_some())?;
            if let Some(extensions) = &args.extensions {
                config.folder.extensions = split_list(extensions);
            }
            if args.no_recursive {
                config.folder.recursive = false;
            }
            if args.skip_existing {
                config.folder.skip_existing = true;
            }
            let controller = build_controller(config)?;
            let summary = controller
                .translate_folder(&args.source, &args.destination, &args.language, !args.dry_run)
                .await?;
            report(&summary)
        }
    }
}

/// Load or create the configuration and apply its log level
fn load_config(config_path: &str, log_level_from_cli: bool) -> Result<Config> {
    let config = Config::load_or_create(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    if !log_level_from_cli {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

/// Configuration for the seed commands, with CLI overrides applied
fn seed_config(config_path: &str, log_level_from_cli: bool, args: &SeedArgs) -> Result<Config> {
    let mut config = load_config(config_path, log_level_from_cli)?;

    if let Some(languages) = &args.languages {
        config.target_languages = split_list(languages);
    }
    if let Some(concurrent_requests) = args.concurrent_requests {
        config.translation.max_concurrent_requests = concurrent_requests.clamp(1, MAX_CONCURRENT_REQUESTS);
    }

    Ok(config)
}

fn build_controller(config: Config) -> Result<Controller> {
    Controller::with_config(config, Arc::new(SourceTextTranslator)).context("Invalid configuration")
}

fn report(summary: &RunSummary) -> Result<()> {
    info!(
        "Done: {} processed, {} skipped, {} failed",
        summary.processed, summary.skipped, summary.failed
    );
    if summary.failed > 0 {
        anyhow::bail!("{} file(s) failed", summary.failed);
    }
    Ok(())
}
