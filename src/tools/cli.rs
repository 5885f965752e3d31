use clap::Parser;
use log::{info, warn, LevelFilter};
use std::{fmt::Display, fmt::Formatter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map -v counts to a verbosity. No -v means errors only.
    pub fn from_count(count: u64) -> Self {
        match count {
            0 => Verbosity::Errors,
            1 => Verbosity::Warnings,
            2 => Verbosity::Info,
            3 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Everything the program needs to know to do its job.
#[derive(Debug, Clone, PartialEq)]
pub struct HuffOpts {
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// File holding the symbol weights
    pub weights: Option<String>,
    /// Count weights from the input instead of reading them
    pub count: bool,
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Location where output is sent
    pub output: Output,
    /// Print the code table
    pub show_table: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            op_mode: Mode::Zip,
            weights: None,
            count: false,
            files: vec![],
            force_overwrite: false,
            output: Output::File,
            show_table: false,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman coding of text files",
    long_about = "
    Builds a huffman code from a table of symbol weights (one `symbol;weight` per line) and
    uses it to pack text files. The same weights are needed to unpack them again, either the
    same weights file or the .freq file written by --count."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Compress the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Compress, decompress and compare without writing anything
    #[clap(short = 't', long = "test", conflicts_with_all = &["compress", "decompress"])]
    test: bool,

    /// File of symbol weights, one `symbol;weight` per line
    #[clap(short = 'w', long = "weights")]
    weights: Option<String>,

    /// Count symbol weights from the input instead of reading them
    #[clap(long = "count", conflicts_with = "weights")]
    count: bool,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Print the code table
    #[clap(long = "table")]
    table: bool,

    /// Suppress error messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Be verbose (repeat for more, up to -vvvv)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u64,
}

impl Args {
    /// Put command line information from CLAP into our internal structure.
    pub fn into_opts(self) -> HuffOpts {
        let mut opts = HuffOpts::new();
        opts.op_mode = if self.test {
            Mode::Test
        } else if self.decompress {
            Mode::Unzip
        } else {
            Mode::Zip
        };
        opts.weights = self.weights;
        opts.count = self.count;
        opts.files = self.files;
        opts.force_overwrite = self.force;
        if self.stdout {
            opts.output = Output::Stdout;
        }
        opts.show_table = self.table;
        opts.verbose = if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::from_count(self.verbose)
        };
        opts
    }
}

/// Parse the command line, set the log level and report what we are going to do.
pub fn huffopts_init() -> HuffOpts {
    let opts = Args::parse().into_opts();

    // Set the log level
    log::set_max_level(opts.verbose.level());

    // Below we report initialization status to the user
    info!("---- huffpack Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match &opts.weights {
        Some(s) => info!("Getting weights from the file {}", s),
        None if opts.count => info!("Counting weights from the input"),
        None => warn!("No weights given"),
    }
    info!("Output goes to {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    info!("---- huffpack Initialization End ----\n");
    opts
}
