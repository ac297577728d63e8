use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

use invigil::logging::configure_logging;
use invigil::schedule::emit;
use invigil::{ExamPipeline, InvigilatorPipeline, PayloadSource, PipelineConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file (thresholds, venue aliases, fill columns)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extractor payload to read instead of stdin (JSON or base64 JSON)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Indent the JSON result
    #[arg(short, long)]
    pretty: bool,

    /// Also write daily log files to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group an invigilator duty table by invigilator
    Invigilators,

    /// Flatten an exam timetable
    Exams,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_logging(cli.log_dir.as_deref());

    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    let payload = match &cli.input {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read payload from stdin")?;
            buffer
        }
    };
    info!("Read {} payload bytes", payload.len());

    let source = PayloadSource::new(payload);
    let json = match cli.command {
        Commands::Invigilators => {
            let schedule = InvigilatorPipeline::new(config)?.run(&source)?;
            emit(&schedule, cli.pretty)?
        }
        Commands::Exams => {
            let schedule = ExamPipeline::new(config)?.run(&source)?;
            emit(&schedule, cli.pretty)?
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json).context("Failed to write result")?;
    Ok(())
}
