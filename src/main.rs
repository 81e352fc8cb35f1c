use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use stitch::{ComposerBuilder, HeadPolicy, StitchError};

/// Resolves <fragment src="…"> placeholders in an HTML document.
#[derive(Parser, Debug)]
#[command(name = "stitch", version, about)]
struct Cli {
    /// Input document. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Write the composed document here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serve fragment sources from a local directory instead of over HTTP.
    #[arg(long)]
    fragments_dir: Option<PathBuf>,

    /// Whole-request timeout for each fetch, in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Deepest level of nested placeholders that is still fetched.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Leave <link> elements in place when the document has no <head>.
    #[arg(long)]
    ignore_missing_head: bool,

    #[arg(long)]
    user_agent: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("stitch: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), StitchError> {
    let mut builder = ComposerBuilder::new();
    if let Some(path) = &cli.config {
        builder = builder.with_config_file(path)?;
    }
    if let Some(dir) = cli.fragments_dir {
        builder = builder.with_fragments_dir(dir);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.with_timeout(secs);
    }
    if let Some(depth) = cli.max_depth {
        builder = builder.with_max_depth(Some(depth));
    }
    if cli.ignore_missing_head {
        builder = builder.with_missing_head(HeadPolicy::Ignore);
    }
    if let Some(agent) = cli.user_agent {
        builder = builder.with_user_agent(agent);
    }
    let composer = builder.build()?;

    let input: Box<dyn Read> = match &cli.input {
        Some(path) if path.as_os_str() != "-" => Box::new(File::open(path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to open input '{}': {}", path.display(), e),
            )
        })?),
        _ => Box::new(io::stdin().lock()),
    };
    let output = composer.compose(input)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &output)?;
            log::info!("Wrote {} bytes to {}", output.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&output)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
