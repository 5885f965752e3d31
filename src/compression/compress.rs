use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::compression::container::write_packed;
use crate::error::HuffError;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::codec::encode;
use crate::huffman_coding::forest::build_tree;
use crate::huffman_coding::node::Node;
use crate::tools::cli::{HuffOpts, Output};
use crate::tools::freq_count::freqs;
use crate::tools::freq_table::FreqTable;

/// Suffix added to compressed files.
pub const SUFFIX: &str = ".huf";
/// Suffix of the weights file written next to the output in --count mode.
pub const FREQ_SUFFIX: &str = ".freq";

/// Everything built from one set of symbol weights.
pub struct Codebook {
    pub weights: FreqTable,
    pub root: Node,
    pub table: CodeTable,
}

impl Codebook {
    /// Build the tree and the code table for a set of weights.
    pub fn new(weights: FreqTable) -> Result<Self, HuffError> {
        let root = build_tree(weights.entries())?;
        let table = CodeTable::from_tree(&root);
        info!(
            "Code table holds {} symbols, longest code is {} bits.",
            table.len(),
            table.max_len()
        );
        debug!(
            "Average code length is {:.3} bits.",
            table.mean_len(weights.entries())
        );
        Ok(Self {
            weights,
            root,
            table,
        })
    }

    /// Weights from the --weights file, or counted from text in --count mode.
    pub fn from_opts(opts: &HuffOpts, text: &str) -> Result<Self, HuffError> {
        match &opts.weights {
            Some(file) => Self::new(FreqTable::load(file)?),
            None if opts.count => Self::new(freqs(text)),
            None => Err(HuffError::MissingWeights),
        }
    }
}

/// Compress every input file named in opts, or stdin to stdout when there are none.
pub fn compress(opts: &HuffOpts) -> Result<(), HuffError> {
    if opts.files.is_empty() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        let book = Codebook::from_opts(opts, &text)?;
        if opts.count {
            warn!("The counted weights are not saved when writing to stdout.");
        }
        show_table(opts, &book);
        let stdout = io::stdout();
        compress_text(&book, &text, &mut stdout.lock())?;
        return Ok(());
    }
    for name in &opts.files {
        compress_file(opts, name)?;
    }
    Ok(())
}

/// Pack text and write it with its header. Returns the number of bytes written.
pub fn compress_text<W: Write>(book: &Codebook, text: &str, writer: &mut W) -> Result<usize, HuffError> {
    let packed = encode(&book.table, text.chars())?;
    write_packed(writer, &packed)
}

/// Compress one file into <name>.huf.
fn compress_file(opts: &HuffOpts, name: &str) -> Result<(), HuffError> {
    info!("Compressing {}.", name);
    let text = fs::read_to_string(name)?;
    let book = Codebook::from_opts(opts, &text)?;
    show_table(opts, &book);

    let written = match opts.output {
        Output::Stdout => {
            if opts.count {
                warn!(
                    "The counted weights for {} are not saved when writing to stdout.",
                    name
                );
            }
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            compress_text(&book, &text, &mut lock)?
        }
        Output::File => {
            let out_name = format!("{}{}", name, SUFFIX);
            let freq_name = format!("{}{}", out_name, FREQ_SUFFIX);
            if opts.count {
                check_output(&freq_name, opts.force_overwrite)?;
            }
            let mut f_out = create_output(&out_name, opts.force_overwrite)?;
            let written = compress_text(&book, &text, &mut f_out)?;
            if opts.count {
                book.weights.save(&freq_name)?;
                info!("Saved the counted weights to {}.", freq_name);
            }
            info!("Wrote {}.", out_name);
            written
        }
    };
    report(text.len(), written);
    Ok(())
}

/// Refuse to clobber an existing file unless forced.
pub(crate) fn check_output(name: &str, force: bool) -> Result<(), HuffError> {
    if !force && Path::new(name).exists() {
        return Err(HuffError::OutputExists(name.to_string()));
    }
    Ok(())
}

pub(crate) fn create_output(name: &str, force: bool) -> Result<BufWriter<File>, HuffError> {
    check_output(name, force)?;
    Ok(BufWriter::new(File::create(name)?))
}

pub(crate) fn show_table(opts: &HuffOpts, book: &Codebook) {
    if opts.show_table {
        println!("{}", book.table);
    }
}

pub(crate) fn report(original: usize, packed: usize) {
    if original > 0 {
        info!(
            "{} bytes in, {} bytes out, {:.2}% of the original.",
            original,
            packed,
            packed as f64 * 100.0 / original as f64
        );
    } else {
        info!("Empty input, {} bytes out.", packed);
    }
}
