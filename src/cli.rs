use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Parser, ValueEnum};
use dialoguer::Select;
use structviz::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::demos::Demo;

#[derive(Debug, Clone, PartialEq, Eq)]
enum OutputDestination {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Parser)]
#[command(
    name = "structviz",
    about = "Render in-memory data structures as Graphviz DOT diagrams."
)]
pub struct RenderArgs {
    /// Sample structure to render. Prompted for when omitted.
    #[arg(value_enum)]
    demo: Option<Demo>,

    /// Path to the output file. Use '-' to write to stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// JSON file with graph attributes and trace options.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Label drawn for the whole graph.
    #[arg(long = "label")]
    label: Option<String>,

    /// Maximum traversal depth before giving up.
    #[arg(long = "max-depth")]
    max_depth: Option<usize>,

    /// Number of linked list elements placed on one rank.
    #[arg(long = "rank-group")]
    rank_group: Option<usize>,

    /// List the available samples and exit.
    #[arg(long = "list", action = ArgAction::SetTrue, conflicts_with = "demo")]
    list: bool,

    /// Suppress informational output.
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

pub fn dispatch() -> Result<()> {
    let cli = RenderArgs::parse();
    init_logging(cli.verbose);
    run_render(cli)
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn run_render(cli: RenderArgs) -> Result<()> {
    if cli.list {
        for demo in Demo::value_variants() {
            println!("{:<10} {}", demo.name(), demo.description());
        }
        return Ok(());
    }

    let output_dest = parse_output(cli.output.as_deref())?;
    let config = load_config(&cli)?;
    let demo = match cli.demo {
        Some(demo) => demo,
        None => select_demo()?,
    };

    info!(demo = demo.name(), "rendering sample");
    let dot = demo
        .render(&config)
        .with_context(|| format!("failed to trace the '{}' sample", demo.name()))?;

    write_output(output_dest, dot.as_bytes(), cli.quiet)
}

fn load_config(cli: &RenderArgs) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(label) = &cli.label {
        config.graph.label = Some(label.clone());
    }
    if let Some(max_depth) = cli.max_depth {
        config.trace.max_depth = max_depth;
    }
    if let Some(group) = cli.rank_group {
        config.trace.list_rank_group = Some(group);
    }

    config.validate()?;
    Ok(config)
}

fn select_demo() -> Result<Demo> {
    let variants = Demo::value_variants();

    if !io::stdin().is_terminal() {
        let names: Vec<&str> = variants.iter().map(|demo| demo.name()).collect();
        bail!("no sample given; choose one of: {}", names.join(", "));
    }

    let options: Vec<String> = variants
        .iter()
        .map(|demo| format!("{}: {}", demo.name(), demo.description()))
        .collect();

    let selection = Select::new()
        .with_prompt("Select a sample structure")
        .items(&options)
        .default(0)
        .interact()
        .context("sample selection was cancelled")?;

    Ok(variants[selection])
}

fn parse_output(output: Option<&str>) -> Result<OutputDestination> {
    match output {
        None | Some("-") => Ok(OutputDestination::Stdout),
        Some(path_str) => {
            let path = PathBuf::from(path_str);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(anyhow!(
                        "output directory '{}' does not exist",
                        parent.display()
                    ));
                }
            }
            Ok(OutputDestination::File(path))
        }
    }
}

fn write_output(dest: OutputDestination, bytes: &[u8], quiet: bool) -> Result<()> {
    match dest {
        OutputDestination::Stdout => {
            let mut stdout = io::stdout();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
        OutputDestination::File(path) => {
            fs::write(&path, bytes)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            if !quiet {
                println!("Generated diagram -> {}", path.display());
            }
        }
    }
    Ok(())
}
