//! pngrid CLI - decode a PNG into a pixel grid
//!
//! Decodes 8-bit RGB/RGBA PNG files and prints a summary, dumps the
//! `[row][column][channel]` grid as text, or writes the pixels as PPM/PAM.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, ValueEnum};

use pngrid::chunk::ChunkReader;
use pngrid::decode::MAX_DIMENSION;
use pngrid::{decode_file, ColorMode, DecodeOptions, Raster};

/// Decode an RGB or RGBA PNG into a grid of samples.
#[derive(Parser, Debug)]
#[command(name = "pngrid")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PNG file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output format (defaults to pnm for .ppm/.pam outputs, summary otherwise)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// List the chunks in the file instead of decoding it
    #[arg(long)]
    list_chunks: bool,

    /// Reject non-8-bit depths and non-zero compression/filter/interlace methods
    #[arg(long)]
    strict: bool,

    /// Largest accepted width or height
    #[arg(
        long,
        default_value_t = MAX_DIMENSION,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_dimension: u32,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Dimensions and color mode
    Summary,
    /// Nested [row][column][channel] text dump
    Grid,
    /// Binary PPM (RGB) or PAM (RGBA)
    Pnm,
}

fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<pngrid::Error>() {
            Some(err) => eprintln!("Error: {}: {err}", err.kind()),
            None => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list_chunks {
        return list_chunks(&args.input);
    }

    let options = DecodeOptions {
        max_dimension: args.max_dimension,
        strict_header: args.strict,
    };

    let start = Instant::now();
    let raster = decode_file(&args.input, &options)?;
    let decode_time = start.elapsed();

    log::info!("Decoded: {:?}", args.input);
    log::info!("  Dimensions: {}x{}", raster.width(), raster.height());
    log::info!("  Color mode: {}", raster.color_mode());
    log::info!("  Decode time: {:.2?}", decode_time);

    let format = determine_format(&args);
    match &args.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_output(&raster, format, &mut out)?;
            out.flush()?;
            log::info!("Output: {:?} ({:?})", path, format);
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_output(&raster, format, &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Print every chunk's offset, type and payload length.
fn list_chunks(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(path)
        .map_err(|e| pngrid::Error::Io(format!("{}: {e}", path.display())))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let consumed = write_chunk_list(&data, &mut out)?;
    log::info!("Read {consumed} of {} bytes", data.len());
    Ok(())
}

/// Write one line per chunk and return the offset just past the last one.
fn write_chunk_list<W: Write>(
    data: &[u8],
    out: &mut W,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut reader = ChunkReader::new(data)?;
    for c in reader.by_ref() {
        let c = c?;
        let kind = if c.chunk_type.is_critical() {
            "critical"
        } else {
            "ancillary"
        };
        writeln!(
            out,
            "{:>10}  {}  {:>10}  {}",
            c.offset, c.chunk_type, c.length, kind
        )?;
    }
    Ok(reader.position())
}

fn determine_format(args: &Args) -> OutputFormat {
    args.format.unwrap_or_else(|| {
        args.output
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .and_then(|e| match e.to_lowercase().as_str() {
                "ppm" | "pam" | "pnm" => Some(OutputFormat::Pnm),
                _ => None,
            })
            .unwrap_or(OutputFormat::Summary)
    })
}

fn write_output<W: Write>(raster: &Raster, format: OutputFormat, out: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Summary => writeln!(
            out,
            "{}x{} {} ({} channels)",
            raster.width(),
            raster.height(),
            raster.color_mode(),
            raster.channels()
        ),
        OutputFormat::Grid => writeln!(out, "{:?}", raster.to_nested()),
        OutputFormat::Pnm => write_pnm(raster, out),
    }
}

/// Write P6 for RGB and P7 (PAM) for RGBA.
fn write_pnm<W: Write>(raster: &Raster, out: &mut W) -> io::Result<()> {
    match raster.color_mode() {
        ColorMode::Truecolor => {
            write!(out, "P6\n{} {}\n255\n", raster.width(), raster.height())?;
        }
        ColorMode::TruecolorAlpha => {
            write!(
                out,
                "P7\nWIDTH {}\nHEIGHT {}\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n",
                raster.width(),
                raster.height()
            )?;
        }
    }
    out.write_all(raster.as_bytes())
}
