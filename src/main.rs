//! docinfer: resolve JSDoc comments in parsed JavaScript into a
//! documentation tree.
//!
//! Reads source units (Babel syntax trees with their doc comments, as JSON)
//! and writes the resolved comment forest as JSON:
//!
//! - **stdin mode**: `docinfer < unit.json`
//! - **file mode**: `docinfer -o api.json 'build/ast/**/*.json'`

use anyhow::{Context, Result};
use clap::Parser;
use docinfer::config::Config;
use docinfer::filter::{self, AccessLevel};
use docinfer::sort::SortOrder;
use docinfer::syntax::{self, SyntaxTree};
use docinfer::{lint, output};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "DOCINFER_LOG";

#[derive(Parser)]
#[command(
    name = "docinfer",
    about = "Resolve JSDoc comments against their syntax trees into a documentation model"
)]
struct Cli {
    /// Source unit files, directories or glob patterns. If omitted, reads
    /// one unit from stdin.
    inputs: Vec<String>,

    /// Write JSON here instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Config file (default: docinfer.toml when present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Treat names matching this pattern as private
    #[arg(long, value_name = "REGEX")]
    infer_private: Option<String>,

    /// Access levels to keep. Can be specified multiple times.
    #[arg(short = 'a', long, value_enum)]
    access: Vec<AccessLevel>,

    #[arg(long, value_enum)]
    sort_order: Option<SortOrder>,

    /// Report diagnostics on stderr and fail when there are any
    #[arg(long)]
    lint: bool,
}

impl Cli {
    /// Layer the flags over the config file.
    fn config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(pattern) = &self.infer_private {
            config.infer_private = Some(pattern.clone());
        }
        if !self.access.is_empty() {
            config.access = self.access.clone();
        }
        if let Some(order) = self.sort_order {
            config.sort_order = order;
        }
        config.lint |= self.lint;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    let options = config.options()?;

    let units = if cli.inputs.is_empty() {
        vec![read_stdin()?]
    } else {
        read_files(&expand_globs(&cli.inputs)?)?
    };

    // Lint sees every record, including those the access filter drops.
    let forest = docinfer::resolve(&units, &options)?;
    let diagnostics = if options.lint {
        lint::report(&forest)
    } else {
        Vec::new()
    };
    for line in &diagnostics {
        eprintln!("{}", line);
    }

    let mut forest = filter::filter_access(forest, &options.access);

    output::strip_errors(&mut forest);
    let json = output::to_json(&forest)?;
    match &cli.output {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", json),
    }

    if !diagnostics.is_empty() {
        anyhow::bail!("{} lint diagnostic(s)", diagnostics.len());
    }
    Ok(())
}

fn read_stdin() -> Result<Arc<SyntaxTree>> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    syntax::load(&input).context("failed to load source unit from stdin")
}

/// Load every file. Files that are not source units are skipped with a
/// warning.
fn read_files(paths: &[PathBuf]) -> Result<Vec<Arc<SyntaxTree>>> {
    let mut units = Vec::new();
    for path in paths {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match syntax::load(&content) {
            Ok(unit) => units.push(unit),
            Err(e) => warn!("skipping {}: {:#}", path.display(), e),
        }
    }
    Ok(units)
}

/// Turn inputs into a sorted, deduplicated list of source unit files.
///
/// An input naming a file is taken as is, even without a `.json`
/// extension. A directory contributes its `.json` files (not recursing).
/// Anything else is a glob pattern.
fn expand_globs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            files.extend(units_in(path)?);
        } else {
            let matched = glob_files(input)?;
            if matched.is_empty() {
                warn!("no files matched: {}", input);
            }
            files.extend(matched);
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn glob_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern: {}", pattern))? {
        match entry {
            Ok(p) if p.is_file() => files.push(p),
            Ok(_) => {}
            Err(e) => warn!("unreadable glob match: {}", e),
        }
    }
    Ok(files)
}

fn units_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?;
    Ok(entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect())
}
