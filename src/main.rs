use anyhow::{Context, Result};
use clap::Parser;
use rmhfile::{RmhFile, ABSENT};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "rmh")]
#[command(about = "Print the sentences of RMH corpus TEI-XML files")]
#[command(version)]
struct Args {
    /// TEI-XML files to read
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Emit one JSON object per sentence instead of index<TAB>text lines
    #[arg(long)]
    json: bool,

    /// Only report whether <id>.tsv and <id>.desc.xml exist in this directory
    #[arg(long, value_name = "DIR")]
    check_dir: Option<PathBuf>,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,
}

fn main() -> Result<()> {
    // WHY: stdout carries the sentence data, so JSON logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    if let Some(dir) = &args.check_dir {
        if !dir.is_dir() {
            anyhow::bail!("Check directory is not a directory: {}", dir.display());
        }
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failed = 0usize;

    for path in &args.files {
        let file = RmhFile::new(path);
        let result = process_file(&file, &args, &mut out)
            .with_context(|| format!("Failed to process {}", path.display()));
        match result {
            Ok(records) => info!("Processed {}: {} records", path.display(), records),
            Err(e) if args.fail_fast => return Err(e),
            Err(e) => {
                warn!("{:#}", e);
                failed += 1;
            }
        }
    }
    out.flush()?;

    info!("Finished: {} files, {} failed", args.files.len(), failed);
    if failed > 0 {
        anyhow::bail!("{failed} of {} files could not be processed", args.files.len());
    }
    Ok(())
}

/// Write one file's output and return the number of records written
fn process_file(file: &RmhFile, args: &Args, out: &mut impl Write) -> Result<usize> {
    if let Some(dir) = &args.check_dir {
        let on_disk = file.is_on_disk(dir)?;
        let identifier = file.identifier()?.unwrap_or(ABSENT);
        writeln!(out, "{}\t{}\t{}", file.as_path().display(), identifier, on_disk)?;
        return Ok(1);
    }

    let mut records = 0;
    if args.json {
        for sentence in file.sentences()? {
            serde_json::to_writer(&mut *out, &sentence)?;
            writeln!(out)?;
            records += 1;
        }
    } else {
        for (index, text) in file.indexed_sentence_text()? {
            writeln!(out, "{index}\t{text}")?;
            records += 1;
        }
    }
    Ok(records)
}
