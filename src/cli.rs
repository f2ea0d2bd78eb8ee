//! Command-line shell: argument parsing, file handling and exit statuses.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use log::{debug, info};

use crate::bmp::Bitmap;
use crate::error::BmpError;
use crate::filters::Filter;

/// Apply one filter to an uncompressed 24-bit BMP image
#[derive(Parser, Debug)]
#[command(name = "filter", version, about)]
pub struct CliArgs {
    /// Blur the image with a 3x3 box average
    #[arg(short = 'b', long)]
    pub blur: bool,

    /// Detect edges with the Sobel operator
    #[arg(short = 'e', long)]
    pub edges: bool,

    /// Convert to grayscale
    #[arg(short = 'g', long)]
    pub grayscale: bool,

    /// Mirror the image horizontally
    #[arg(short = 'r', long)]
    pub reflect: bool,

    /// Worker threads for blur and edges (default: one per core)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Input file followed by output file
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl CliArgs {
    fn selected_filters(&self) -> Vec<Filter> {
        [
            (self.blur, Filter::Blur),
            (self.edges, Filter::Edges),
            (self.grayscale, Filter::Grayscale),
            (self.reflect, Filter::Reflect),
        ]
        .into_iter()
        .filter_map(|(on, filter)| on.then_some(filter))
        .collect()
    }
}

/// A validated request: exactly one filter and both file paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub filter: Filter,
    pub input: PathBuf,
    pub output: PathBuf,
    pub threads: Option<usize>,
    pub verbose: u8,
}

/// Everything that can stop a run, each with its own exit status.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// `--help` or `--version` output; not a failure.
    #[error("{0}")]
    Info(clap::Error),

    #[error("Invalid filter.")]
    InvalidFilter,

    #[error("Only one filter allowed.")]
    MultipleFilters,

    #[error("Usage: filter [flag] infile outfile")]
    Usage,

    #[error("Could not open {}.", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create {}.", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file format.")]
    UnsupportedFormat(#[source] BmpError),

    #[error("Not enough memory to store image.")]
    Allocation(#[source] BmpError),

    #[error("Could not start worker threads.")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Info(_) => 0,
            CliError::InvalidFilter => 1,
            CliError::MultipleFilters => 2,
            CliError::Usage | CliError::ThreadPool(_) => 3,
            CliError::OpenInput { .. } => 4,
            CliError::CreateOutput { .. } => 5,
            CliError::UnsupportedFormat(_) => 6,
            CliError::Allocation(_) => 7,
        }
    }
}

fn from_clap(err: clap::Error) -> CliError {
    debug!("argument error: {err}");
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => CliError::Info(err),
        ErrorKind::UnknownArgument => CliError::InvalidFilter,
        // a filter flag given twice
        ErrorKind::ArgumentConflict => CliError::MultipleFilters,
        _ => CliError::Usage,
    }
}

/// Parse and validate command-line arguments (including the program name).
pub fn parse_args<I, T>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = CliArgs::try_parse_from(args).map_err(from_clap)?;

    let filters = args.selected_filters();
    if filters.len() > 1 {
        return Err(CliError::MultipleFilters);
    }
    let [input, output]: [PathBuf; 2] = args.files.try_into().map_err(|_| CliError::Usage)?;
    let filter = *filters.first().ok_or(CliError::Usage)?;

    Ok(Invocation {
        filter,
        input,
        output,
        threads: args.threads,
        verbose: args.verbose,
    })
}

/// Read, filter and write one image.
pub fn run(invocation: &Invocation) -> Result<(), CliError> {
    let bytes = fs::read(&invocation.input).map_err(|source| CliError::OpenInput {
        path: invocation.input.clone(),
        source,
    })?;

    let create_error = |source| CliError::CreateOutput {
        path: invocation.output.clone(),
        source,
    };
    let file = File::create(&invocation.output).map_err(create_error)?;

    let mut bitmap = Bitmap::decode(&bytes).map_err(|err| match err {
        BmpError::Allocation { .. } => CliError::Allocation(err),
        other => CliError::UnsupportedFormat(other),
    })?;

    let (height, width) = bitmap.grid().dim();
    info!(
        "{} -> {}: {} on {}x{} image",
        invocation.input.display(),
        invocation.output.display(),
        invocation.filter,
        height,
        width
    );

    match invocation.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
            pool.install(|| bitmap.apply(invocation.filter));
        }
        None => bitmap.apply(invocation.filter),
    }

    let mut writer = BufWriter::new(file);
    bitmap.write_to(&mut writer).map_err(|err| match err {
        BmpError::Io(source) => create_error(source),
        other => CliError::UnsupportedFormat(other),
    })?;

    info!("wrote {}", invocation.output.display());
    Ok(())
}
