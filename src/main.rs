use clap::{Parser, ValueEnum};
use cppfuse::report::{render_detailed, render_json, render_plain};
use cppfuse::{FuseConfig, InlinePolicy, Result, classify, fuse, fuse_to_string, list_directives};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const LONG_HELP: &str = r#"
Behavior:
  #include "file"   - Inlined once per run when its kind matches the input
                      (headers into headers, sources into sources)
  #include <file>   - Always kept as is
  missing files     - Directive kept as is
  cycles            - Fatal error, no output written

Examples:
  # Fuse a header, searching ./include after the including file's directory
  cppfuse include/gtest/gtest.h fused/gtest/gtest.h include
  # Fuse a source file and print it
  cppfuse src/gtest-all.cc - include .
  # Inline headers into a source file too
  cppfuse src/app.cc app_single.cc --inline-headers -I include
  # Show where each directive resolves
  cppfuse src/gtest-all.cc --list=detailed -I include
  # Same, as JSON
  cppfuse src/gtest-all.cc --list=json -I include
"#;

/// Fuse C/C++ files into a single file by inlining #include directives.
#[derive(Parser, Debug)]
#[command(
    name = "cppfuse",
    version,
    about = "Fuse C/C++ files into a single file by inlining #include directives.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Top-level file to fuse
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file. Omit or use '-' for stdout.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Search directories, in order (defaults to '.')
    #[arg(value_name = "DIRS")]
    dirs: Vec<PathBuf>,

    /// Additional search directories, searched after DIRS
    #[arg(
        short = 'I',
        long = "include-dir",
        value_name = "DIR",
        env = "CPPFUSE_INCLUDE_PATH",
        value_delimiter = ':',
        action = clap::ArgAction::Append
    )]
    include_dirs: Vec<PathBuf>,

    /// Inline header files regardless of the input's kind
    #[arg(long)]
    inline_headers: bool,

    /// Inline source files regardless of the input's kind
    #[arg(long)]
    inline_sources: bool,

    /// Reference always inlined along with sources (repeatable, replaces defaults)
    #[arg(long = "force-inline", value_name = "REF", action = clap::ArgAction::Append)]
    force_inline: Vec<String>,

    /// Prefix of references commented out instead of kept
    #[arg(long, value_name = "PREFIX")]
    comment_prefix: Option<String>,

    /// Reference exempt from --comment-prefix
    #[arg(long, value_name = "REF")]
    entry_header: Option<String>,

    /// List directives of INPUT instead of fusing (plain, detailed, json)
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "plain")]
    list: Option<ListFormat>,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum ListFormat {
    /// Simple list of references
    Plain,
    /// Resolution details for each directive
    Detailed,
    /// JSON output for scripting
    Json,
}

impl Cli {
    fn search_path(&self) -> Vec<PathBuf> {
        let mut path = if self.dirs.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.dirs.clone()
        };
        path.extend(self.include_dirs.iter().cloned());
        path
    }

    /// `None` keeps the kind-derived defaults
    fn policy(&self) -> Option<InlinePolicy> {
        let customized = self.inline_headers
            || self.inline_sources
            || !self.force_inline.is_empty()
            || self.comment_prefix.is_some()
            || self.entry_header.is_some();
        if !customized {
            return None;
        }

        let mut policy = InlinePolicy::for_kind(classify(&self.input));
        policy.inline_interfaces |= self.inline_headers;
        policy.inline_implementations |= self.inline_sources;
        if !self.force_inline.is_empty() {
            policy.forced_sources.clone_from(&self.force_inline);
        }
        if let Some(prefix) = &self.comment_prefix {
            policy.commented_prefix = Some(prefix.clone()).filter(|p| !p.is_empty());
        }
        if let Some(header) = &self.entry_header {
            policy.entry_header = Some(header.clone());
        }
        Some(policy)
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    init_tracing(level);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::try_from_env("CPPFUSE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let search_path = cli.search_path();

    if let Some(format) = cli.list {
        let reports = list_directives(&cli.input, &search_path)?;
        let rendered = match format {
            ListFormat::Plain => render_plain(&reports),
            ListFormat::Detailed => render_detailed(&reports),
            ListFormat::Json => render_json(&reports)? + "\n",
        };
        print!("{rendered}");
        io::stdout().flush()?;
        return Ok(());
    }

    let config = FuseConfig {
        search_path,
        policy: cli.policy(),
    };

    match cli.output.as_deref() {
        Some(output) if output != Path::new("-") => {
            fuse(&cli.input, output, &config)?;
        }
        _ => {
            let summary = fuse_to_string(&cli.input, &config)?;
            print!("{}", summary.output);
            io::stdout().flush()?;
            info!(inlined = summary.inlined, "fused to stdout");
        }
    }

    Ok(())
}
