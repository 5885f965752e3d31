use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};

use log::info;

use super::compress::{
    compress_text, create_output, report, show_table, Codebook, FREQ_SUFFIX, SUFFIX,
};
use super::container::{read_header, read_packed};
use crate::error::HuffError;
use crate::huffman_coding::codec::{decode_from, decode_with_table};
use crate::tools::cli::{HuffOpts, Output};
use crate::tools::freq_table::FreqTable;

/// Decompress every input file named in opts, or stdin to stdout when there are none.
pub fn decompress(opts: &HuffOpts) -> Result<(), HuffError> {
    if opts.files.is_empty() {
        let book = match &opts.weights {
            Some(file) => Codebook::new(FreqTable::load(file)?)?,
            None => return Err(HuffError::MissingWeights),
        };
        show_table(opts, &book);
        let text = decompress_stream(&book, &mut io::stdin().lock())?;
        io::stdout().lock().write_all(text.as_bytes())?;
        return Ok(());
    }
    for name in &opts.files {
        decompress_file(opts, name)?;
    }
    Ok(())
}

/// Read a packed stream (header included) and unpack it while reading.
pub fn decompress_stream<R: Read>(book: &Codebook, reader: &mut R) -> Result<String, HuffError> {
    let bit_len = read_header(reader)?;
    let symbols = decode_from(&book.root, reader, bit_len)?;
    Ok(symbols.into_iter().collect())
}

/// Weights for unpacking name: the --weights file, or the .freq file written by --count.
fn codebook_for(opts: &HuffOpts, name: &str) -> Result<Codebook, HuffError> {
    match &opts.weights {
        Some(file) => Codebook::new(FreqTable::load(file)?),
        None if opts.count => Codebook::new(FreqTable::load(format!("{}{}", name, FREQ_SUFFIX))?),
        None => Err(HuffError::MissingWeights),
    }
}

/// Output name: strip .huf, or add .out to names without it.
pub fn output_name(name: &str) -> String {
    match name.strip_suffix(SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}.out", name),
    }
}

fn decompress_file(opts: &HuffOpts, name: &str) -> Result<(), HuffError> {
    info!("Decompressing {}.", name);
    let book = codebook_for(opts, name)?;
    show_table(opts, &book);
    let mut br = BufReader::new(File::open(name)?);
    let text = decompress_stream(&book, &mut br)?;

    match opts.output {
        Output::Stdout => io::stdout().lock().write_all(text.as_bytes())?,
        Output::File => {
            let out_name = output_name(name);
            let mut f_out = create_output(&out_name, opts.force_overwrite)?;
            f_out.write_all(text.as_bytes())?;
            f_out.flush()?;
            info!("Wrote {}.", out_name);
        }
    }
    Ok(())
}

/// Compress in memory, unpack again with both the tree and the table, and compare.
pub fn verify(opts: &HuffOpts) -> Result<(), HuffError> {
    if opts.files.is_empty() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return verify_text(opts, &text);
    }
    for name in &opts.files {
        info!("Testing {}.", name);
        let text = fs::read_to_string(name)?;
        verify_text(opts, &text)?;
        info!("{}: ok", name);
    }
    Ok(())
}

fn verify_text(opts: &HuffOpts, text: &str) -> Result<(), HuffError> {
    let book = Codebook::from_opts(opts, text)?;
    show_table(opts, &book);

    let mut packed_file = Vec::new();
    let written = compress_text(&book, text, &mut packed_file)?;
    let unpacked = decompress_stream(&book, &mut packed_file.as_slice())?;
    if unpacked != text {
        return Err(HuffError::Mismatch);
    }

    let packed = read_packed(&mut packed_file.as_slice())?;
    let by_table: String = decode_with_table(&book.table, &packed)?.into_iter().collect();
    if by_table != text {
        return Err(HuffError::Mismatch);
    }
    report(text.len(), written);
    Ok(())
}
