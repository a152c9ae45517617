use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mimalloc::MiMalloc;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tagfinder::snapshot::format_decomposition;
use tagfinder::{DecomposeConfig, Decomposer, Decomposition};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Compact JSON, one document per line
    Json,
    /// Indented JSON
    Pretty,
    /// One `TAG`/`CONTENT` line per segment
    Text,
}

#[derive(Parser)]
#[command(name = "tagfinder")]
#[command(about = "Decompose HTML markup into content segments and opening-tag descriptors")]
struct Args {
    /// Markup file to read; `-` or nothing reads stdin
    file: Option<PathBuf>,

    /// Decompose this markup instead of reading a file
    #[arg(long, conflicts_with = "file")]
    html: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Keep comments in normal content so the segments concatenate back to the input
    #[arg(long)]
    keep_comments: bool,

    /// Print decomposition counters to stderr
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let input = read_input(&args)?;

    let mut decomposer = Decomposer::new(DecomposeConfig {
        strip_comments: !args.keep_comments,
    });
    let result = decomposer.decompose(&input);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_output(&mut out, &result, args.format).context("failed to write output")?;

    if args.stats {
        let stats = decomposer.stats();
        eprintln!(
            "tags={} raw_text={} comments={} cdata={} literal_lt={} transitions={}",
            stats.tags,
            stats.raw_text_captures,
            stats.comments,
            stats.cdata_sections,
            stats.literal_angle_brackets,
            stats.state_transitions
        );
    }
    Ok(())
}

fn read_input(args: &Args) -> Result<String> {
    if let Some(html) = &args.html {
        return Ok(html.clone());
    }
    match &args.file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(out: &mut impl Write, result: &Decomposition, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, result)?;
            writeln!(out)?;
        }
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut *out, result)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for line in format_decomposition(result) {
                writeln!(out, "{line}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
