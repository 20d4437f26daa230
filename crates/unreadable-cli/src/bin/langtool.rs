use std::path::PathBuf;

use clap::{Parser, Subcommand};

use unreadable_cli::commands::{
    config_ops, convert_ops, fetch_ops, fix_ops, generate_ops, pack_ops,
};
use unreadable_cli::project::{Project, ProjectError};
use unreadable_cli::trace_init::init_tracing;
use unreadable_core::SchemeId;

#[derive(Parser)]
#[command(name = "langtool", about = "Unreadable language pack generator")]
struct Cli {
    /// Project root (data, source and output directories live here)
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,
    /// Settings TOML (default: <root>/langtool.toml, else built-in defaults)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the source maps with every scheme and write the outputs
    Generate {
        /// Only these schemes (output names, e.g. zh_py)
        #[arg(long, num_args = 1..)]
        only: Vec<SchemeId>,
    },
    /// Preview one string in a scheme
    Convert {
        /// Scheme output name
        scheme: SchemeId,
        /// Text to convert
        text: String,
        /// Split on whitespace instead of segmenting
        #[arg(long)]
        whitespace: bool,
    },
    /// Regenerate the per-scheme fixup files from the pre-tokenized source
    FixData,
    /// Build the resource pack ZIP from the outputs
    Pack,
    /// Download the latest English language file
    Fetch,
    /// List the schemes
    Schemes,
    /// Export default romaji mappings as TOML
    RomajiExport,
    /// Validate a custom romaji TOML file
    RomajiValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let load = || die_project(Project::load(&cli.root, cli.settings.as_deref()));

    match cli.command {
        Command::Generate { only } => generate_ops::generate(&load(), &only),
        Command::Convert {
            scheme,
            text,
            whitespace,
        } => convert_ops::convert_cmd(&load(), scheme, &text, whitespace),
        Command::FixData => fix_ops::fix_data(&load()),
        Command::Pack => pack_ops::pack(&load()),
        Command::Fetch => fetch_ops::fetch(&load()),
        Command::Schemes => config_ops::schemes(),
        Command::RomajiExport => config_ops::romaji_export(),
        Command::RomajiValidate { file } => config_ops::romaji_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}

fn die_project(result: Result<Project, ProjectError>) -> Project {
    result.unwrap_or_else(|e| {
        eprintln!("Error loading settings: {e}");
        std::process::exit(1);
    })
}
