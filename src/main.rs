use aapt_lite::config::Config;
use aapt_lite::merge::{DeclaredOutputs, ResourceMerger, SourceSet};
use aapt_lite::{compile, CompileRequest};
use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// aapt-lite - Android resource merging and data-binding stub generation
#[derive(Parser, Debug)]
#[command(name = "aapt-lite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only output errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge resource and asset source sets, last declared wins
    Merge(MergeArgs),

    /// Parse data-binding layouts and generate R, BR and binding stub classes
    Compile(CompileArgs),
}

#[derive(clap::Args, Debug)]
struct MergeArgs {
    /// Build label of the merge, used in log output
    #[arg(long, default_value = "")]
    label: String,

    /// Merge for an application instead of a library
    #[arg(long)]
    is_binary: bool,

    /// Root that relative source set paths are resolved against
    #[arg(long, default_value = ".")]
    target: PathBuf,

    /// Package of the merged module
    #[arg(long, default_value = "")]
    package_name: String,

    /// Source sets as `resources:assets:manifest` (comma-separated, lowest priority first)
    #[arg(long, value_delimiter = ',', value_name = "SOURCE_SET")]
    source_sets: Vec<String>,

    /// Destination of the merged manifest
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Declared output files of the merge (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "FILE")]
    output: Vec<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct CompileArgs {
    /// Package of the module
    #[arg(long)]
    package: String,

    /// Resource files of the module (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "FILE")]
    resource_files: Vec<PathBuf>,

    /// Dependency class-info documents (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "FILE")]
    class_infos: Vec<PathBuf>,

    /// Dependency R.txt files (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "FILE")]
    r_txts: Vec<PathBuf>,

    /// Only include the module's own symbols in R
    #[arg(long)]
    non_transitive_r_class: bool,

    /// Output directory for R.java and BR.java
    #[arg(long, value_name = "DIR")]
    r_class_output: PathBuf,

    /// Output directory for the binding stubs
    #[arg(long, value_name = "DIR")]
    stubs_output: PathBuf,

    /// Build target name
    #[arg(long, default_value = "")]
    name: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("aapt-lite v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Merge(args) => {
            let config = load_config(&cli, &args.target)?;
            run_merge(&config, args, cli.quiet)
        }
        Command::Compile(args) => {
            let config = load_config(&cli, Path::new("."))?;
            run_compile(&config, args, cli.quiet)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli, root: &Path) -> Result<Config> {
    if let Some(config_path) = &cli.config {
        Config::from_file(config_path)
    } else {
        // Try to load from default locations
        Config::from_default_locations(root)
    }
}

fn run_merge(config: &Config, args: &MergeArgs, quiet: bool) -> Result<()> {
    let start_time = Instant::now();
    debug!("Merging {} ({})", args.label, args.package_name);

    let source_sets = SourceSet::parse_all(&args.target, &args.source_sets)?;
    info!("Merging {} source sets", source_sets.len());

    let declared = DeclaredOutputs::new(args.output.iter().cloned());
    let output_dir = declared.output_dir();

    let report = ResourceMerger::new(&config.merge).merge(
        args.is_binary,
        &source_sets,
        output_dir.as_deref(),
        args.manifest.as_deref(),
    )?;
    let filled = declared.fill_missing()?;

    if !quiet {
        println!(
            "{}",
            format!(
                "Merged {} files ({} overridden, {} placeholders) in {:.2}s",
                report.written,
                report.overridden.len(),
                filled.len(),
                start_time.elapsed().as_secs_f64()
            )
            .green()
        );
    }

    Ok(())
}

fn run_compile(config: &Config, args: &CompileArgs, quiet: bool) -> Result<()> {
    let start_time = Instant::now();

    let request = CompileRequest {
        package_name: args.package.clone(),
        resource_files: args.resource_files.clone(),
        class_infos: args.class_infos.clone(),
        r_txts: args.r_txts.clone(),
        non_transitive_r_class: args.non_transitive_r_class,
        r_class_output: args.r_class_output.clone(),
        stubs_output: args.stubs_output.clone(),
        target_name: args.name.clone(),
    };

    let summary = compile(&request, config)?;

    if !quiet {
        println!(
            "{}",
            format!(
                "Compiled {} layouts: {} binding stubs, {} R symbols in {:.2}s",
                summary.layouts,
                summary.stubs,
                summary.r_symbols,
                start_time.elapsed().as_secs_f64()
            )
            .green()
        );
    }

    Ok(())
}
