//! CLI entry point and command handlers for cruiser.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use cruiser::init::{determine_rules_file_name, write_starter_rule_set};
use cruiser::options::{Defaults, OptionNormalizer, OptionValue, RawOptions};
use cruiser::specifier::decompose;

#[derive(Parser)]
#[command(name = "cruiser")]
#[command(version)]
#[command(about = "Normalize dependency cruise options and inspect module specifiers", long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML file overriding built-in defaults (output, rule file search list, wrapper configs)
    #[arg(long, value_name = "FILE", global = true)]
    defaults: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize cruise options and print them as JSON
    Options(OptionArgs),
    /// Split module specifiers into module, protocol and mime type
    Specifier {
        /// Specifiers as found in source (e.g. node:fs, data:text/css,a.css)
        #[arg(required = true)]
        specifiers: Vec<String>,
    },
    /// Write a starter rule set
    Init {
        /// File to write (default: .cruiser.json; .yaml/.yml writes YAML)
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cruise options as they come off the command line. Options taking an
/// optional value are `Some(None)` when given as a bare flag.
#[derive(Args)]
struct OptionArgs {
    /// Validate against a rule set; without FILE the default rule files are searched
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    validate: Option<Option<String>>,
    /// Alias of --validate
    #[arg(short, long, value_name = "FILE", num_args = 0..=1)]
    config: Option<Option<String>>,
    /// File to write the report to ("-" for stdout)
    #[arg(short = 'f', long, value_name = "FILE")]
    output_to: Option<String>,
    /// Report type (err, json, dot, html, baseline...)
    #[arg(short = 'T', long, value_name = "TYPE")]
    output_type: Option<String>,
    /// Comma separated module systems to look for (amd,cjs,es6,tsd)
    #[arg(short = 'M', long, value_name = "SYSTEMS")]
    module_systems: Option<String>,
    /// Show progress; optionally the progress type (cli-feedback, performance-log, ndjson)
    #[arg(long, value_name = "TYPE", num_args = 0..=1)]
    progress: Option<Option<String>>,
    /// Ignore violations listed in a known-violations baseline
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    ignore_known: Option<Option<String>>,
    /// Webpack config to resolve aliases with
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    webpack_config: Option<Option<String>>,
    /// TypeScript config to resolve paths with
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    ts_config: Option<Option<String>>,
    /// Babel config to resolve with
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    babel_config: Option<Option<String>>,
    /// Base directory to resolve from
    #[arg(long, value_name = "DIR")]
    base_dir: Option<String>,
    /// Do not follow modules matching the pattern
    #[arg(short = 'X', long, value_name = "REGEX")]
    do_not_follow: Option<String>,
    /// Exclude modules matching the pattern
    #[arg(short = 'x', long, value_name = "REGEX")]
    exclude: Option<String>,
    /// Only include modules matching the pattern
    #[arg(short = 'I', long, value_name = "REGEX")]
    include_only: Option<String>,
    /// Only include modules matching the pattern and their neighbours
    #[arg(short = 'F', long, value_name = "REGEX")]
    focus: Option<String>,
    /// Collapse modules to folder depth or pattern
    #[arg(short = 'S', long, value_name = "REGEX|DEPTH")]
    collapse: Option<String>,
    /// Maximum cruise depth
    #[arg(short = 'd', long, value_name = "N")]
    max_depth: Option<u32>,
    /// Prefix for links in reports
    #[arg(long, value_name = "PREFIX")]
    prefix: Option<String>,
    /// Calculate stability metrics
    #[arg(long)]
    metrics: bool,
    /// Leave symlinks unchanged
    #[arg(long)]
    preserve_symlinks: bool,
    /// Detect dependencies that only exist before TypeScript compilation
    #[arg(long)]
    ts_pre_compilation_deps: bool,
    /// Raw options as a JSON object; flags given on the command line win
    #[arg(long, value_name = "JSON")]
    raw: Option<String>,
}

impl OptionArgs {
    /// Translate parsed arguments into the raw option map normalization takes.
    fn into_raw_options(self) -> Result<RawOptions> {
        let mut raw = match self.raw.as_deref() {
            Some(json) => match serde_json::from_str(json).context("Failed to parse --raw")? {
                Value::Object(map) => map,
                _ => anyhow::bail!("--raw must be a JSON object"),
            },
            None => RawOptions::new(),
        };

        let mut flag_or_value = |key: &str, value: Option<Option<String>>| {
            if let Some(value) = value {
                let value = value.map_or(Value::Bool(true), Value::String);
                raw.insert(key.to_string(), value);
            }
        };
        flag_or_value("validate", self.validate);
        flag_or_value("config", self.config);
        flag_or_value("progress", self.progress);
        flag_or_value("ignoreKnown", self.ignore_known);
        flag_or_value("webpackConfig", self.webpack_config);
        flag_or_value("tsConfig", self.ts_config);
        flag_or_value("babelConfig", self.babel_config);

        let strings = [
            ("outputTo", self.output_to),
            ("outputType", self.output_type),
            ("moduleSystems", self.module_systems),
            ("baseDir", self.base_dir),
            ("doNotFollow", self.do_not_follow),
            ("exclude", self.exclude),
            ("includeOnly", self.include_only),
            ("focus", self.focus),
            ("collapse", self.collapse),
            ("prefix", self.prefix),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                raw.insert(key.to_string(), Value::String(value));
            }
        }

        if let Some(max_depth) = self.max_depth {
            raw.insert("maxDepth".to_string(), max_depth.into());
        }

        let flags = [
            ("metrics", self.metrics),
            ("preserveSymlinks", self.preserve_symlinks),
            ("tsPreCompilationDeps", self.ts_pre_compilation_deps),
        ];
        for (key, set) in flags {
            if set {
                raw.insert(key.to_string(), Value::Bool(true));
            }
        }

        Ok(raw)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::from(1)
        }
    }
}

/// `RUST_LOG` wins over the verbosity flag when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let defaults = match &cli.defaults {
        Some(path) => Defaults::load_from(path)
            .with_context(|| format!("Failed to load defaults from {}", path.display()))?,
        None => Defaults::default(),
    };

    match cli.command {
        Commands::Options(args) => cmd_options(args, defaults),
        Commands::Specifier { specifiers } => cmd_specifier(&specifiers),
        Commands::Init { file, force } => cmd_init(file, force, &defaults),
        Commands::Completion { shell } => cmd_completion(shell),
    }
}

fn cmd_options(args: OptionArgs, defaults: Defaults) -> Result<()> {
    let raw = args.into_raw_options()?;
    let options = OptionNormalizer::new().with_defaults(defaults).normalize(&raw)?;

    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

fn cmd_specifier(specifiers: &[String]) -> Result<()> {
    for specifier in specifiers {
        println!("{}", serde_json::to_string(&decompose(specifier))?);
    }
    Ok(())
}

fn cmd_init(file: Option<String>, force: bool, defaults: &Defaults) -> Result<()> {
    let file = file.map(OptionValue::Text);
    let path = determine_rules_file_name(file.as_ref(), defaults);

    write_starter_rule_set(&path, force)?;
    println!("{} Wrote {}", "✓".green(), path.display());
    Ok(())
}

/// Generate shell completion script
fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "cruiser", &mut io::stdout());
    Ok(())
}
