//! `dna-export`: export a DNA Matrix project file from the command line.

use clap::{Parser, Subcommand};
use dnamatrix_blocks::validator::Severity;
use dnamatrix_blocks::{lint_project, BlockError};
use dnamatrix_export::{
    read_project, write_artifact, ExportConfig, ExportError, ExportKind, ExportResult,
    ExportSession,
};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "dna-export")]
#[command(version, about = "Export DNA Matrix projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML export configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Single-file production site (index.html)
    Site(Target),
    /// Vite/React project archive (.zip)
    Archive(Target),
    /// Normalized project JSON
    Json(Target),
    /// Static preview rendered without the runtime
    Preview(Target),
    /// Parse, validate and lint a project file
    Validate {
        /// Project JSON file
        project: PathBuf,

        /// Treat lint warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[derive(clap::Args)]
struct Target {
    /// Project JSON file
    project: PathBuf,

    /// Directory the artifact is written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Site(target) => export(ExportKind::Site, target, config),
        Commands::Archive(target) => export(ExportKind::Archive, target, config),
        Commands::Json(target) => export(ExportKind::Json, target, config),
        Commands::Preview(target) => export(ExportKind::Preview, target, config),
        Commands::Validate { project, strict } => validate(project, *strict),
    };

    if let Err(e) = result {
        eprintln!("✗ {}:", failure_header(&cli.command));
        print_error(&e);
        process::exit(1);
    }
}

fn failure_header(command: &Commands) -> String {
    match command {
        Commands::Site(_) => "site export failed".to_string(),
        Commands::Archive(_) => "archive export failed".to_string(),
        Commands::Json(_) => "json export failed".to_string(),
        Commands::Preview(_) => "preview export failed".to_string(),
        Commands::Validate { project, .. } => format!("{} has errors", project.display()),
    }
}

fn load_config(path: Option<&Path>) -> ExportResult<ExportConfig> {
    match path {
        Some(path) => ExportConfig::load(path),
        None => Ok(ExportConfig::default()),
    }
}

fn export(kind: ExportKind, target: &Target, config: Option<&Path>) -> ExportResult<()> {
    let config = load_config(config)?;
    let state = read_project(&target.project)?;
    let session = ExportSession::new();
    let artifact = session.export(kind, &state, &config)?;
    let path = write_artifact(&target.out_dir, &artifact)?;
    println!("✓ {} written to {}", kind, path.display());
    Ok(())
}

fn validate(project: &Path, strict: bool) -> ExportResult<()> {
    let state = read_project(project)?;
    let diagnostics = lint_project(&state);
    for diagnostic in &diagnostics {
        println!("  {}", diagnostic);
    }
    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    if strict && warnings > 0 {
        eprintln!("✗ {} has {} warning(s)", project.display(), warnings);
        process::exit(1);
    }
    println!("✓ {} is valid", project.display());
    Ok(())
}

fn print_error(error: &ExportError) {
    match error {
        ExportError::Project(BlockError::MalformedProject(msg)) => {
            eprintln!("  Malformed project:");
            eprintln!("    {}", msg);
        }
        ExportError::Project(BlockError::Json(msg)) => {
            eprintln!("  Project file is not valid JSON:");
            eprintln!("    {}", msg);
        }
        ExportError::Project(BlockError::PageNotFound { page }) => {
            eprintln!("  Page '{}' does not exist in the project", page);
            eprintln!("    Set `page` in the export config to an existing page");
        }
        ExportError::Project(e) => {
            eprintln!("  {}", e);
        }
        ExportError::Config(msg) => {
            eprintln!("  Config error:");
            eprintln!("    {}", msg);
        }
        ExportError::Io(e) => {
            eprintln!("  I/O error:");
            eprintln!("    {}", e);
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}
