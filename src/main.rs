use anyhow::{Context, Result};
use clap::Parser;
use sales_reader::{read_data_lines, report_outcome, CandidateEncoding, ReaderOptions};
use serde::Serialize;
use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Print the data lines of a sales file, header and blank lines removed"
)]
struct Args {
    /// File to read; its first line is treated as the header
    path: PathBuf,

    /// Encoding to try, repeatable, in order (default: utf-8, latin-1, cp1252)
    #[arg(short, long = "encoding", value_name = "ENC")]
    encodings: Vec<CandidateEncoding>,

    /// Emit a JSON object instead of one line per record
    #[arg(long)]
    json: bool,

    /// Fail on a missing or undecodable file instead of printing nothing
    #[arg(long)]
    strict: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    path: &'a Path,
    encoding: Option<CandidateEncoding>,
    lines: &'a [String],
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // status goes to stderr so stdout carries only data
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&args, &mut out)?;
    out.flush().context("flushing stdout")?;

    Ok(())
}

/// Read `args.path` and write its data lines to `out`. An `Err` here means a
/// non-zero exit.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let options = if args.encodings.is_empty() {
        ReaderOptions::default()
    } else {
        ReaderOptions::with_encodings(args.encodings.iter().copied())
    };

    // ─── 2) read ─────────────────────────────────────────────────────
    let decoded = match read_data_lines(&args.path, &options) {
        Err(err) if args.strict => {
            return Err(err).with_context(|| format!("reading {}", args.path.display()));
        }
        result => report_outcome(result)
            .with_context(|| format!("reading {}", args.path.display()))?,
    };
    let (encoding, lines) = match decoded {
        Some(d) => (Some(d.encoding), d.lines),
        None => (None, Vec::new()),
    };

    // ─── 3) emit ─────────────────────────────────────────────────────
    if args.json {
        let output = Output {
            path: &args.path,
            encoding,
            lines: &lines,
        };
        serde_json::to_writer_pretty(&mut *out, &output).context("writing JSON output")?;
        writeln!(out)?;
    } else {
        for line in &lines {
            writeln!(out, "{}", line)?;
        }
    }

    Ok(())
}
