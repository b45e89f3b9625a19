//! `logmask mask`: masks a file or stdin.

use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};

use anyhow::{Context, Result};
use log::{debug, info};

use logmask_core::Masker;

use crate::cli::MaskCommand;
use crate::commands::info_msg;

/// Masks `reader` line by line into `writer`, flushing after every line.
///
/// Line endings are preserved as read. Returns the number of lines processed.
pub fn mask_lines<R: BufRead, W: Write>(masker: &Masker, mut reader: R, writer: &mut W) -> Result<usize> {
    let mut line = String::new();
    let mut count = 0usize;
    loop {
        line.clear();
        let read = reader.read_line(&mut line).context("Failed to read input line")?;
        if read == 0 {
            break;
        }
        let (body, ending) = split_line_ending(&line);
        write!(writer, "{}{}", masker.mask(body), ending)?;
        writer.flush()?;
        count += 1;
    }
    Ok(count)
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

pub fn run_mask(masker: &Masker, cmd: &MaskCommand, quiet: bool) -> Result<()> {
    info!("Starting mask operation with {} rule(s).", masker.len());

    let mut writer: Box<dyn Write> = match &cmd.output {
        Some(path) => {
            if !quiet {
                info_msg(format!("Writing masked content to file: {}", path.display()));
            }
            Box::new(
                fs::File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?,
            )
        }
        None => Box::new(io::stdout().lock()),
    };

    if cmd.line_buffered {
        let lines = match &cmd.input_file {
            Some(path) => {
                let file = fs::File::open(path)
                    .with_context(|| format!("Failed to open input file: {}", path.display()))?;
                mask_lines(masker, BufReader::new(file), &mut writer)?
            }
            None => mask_lines(masker, io::stdin().lock(), &mut writer)?,
        };
        debug!("Masked {} line(s).", lines);
    } else {
        let input = match &cmd.input_file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?,
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
                buf
            }
        };
        let masked = masker.mask(&input);
        debug!(
            "Content masked. Original length: {}, masked length: {}",
            input.len(),
            masked.len()
        );
        writer.write_all(masked.as_bytes())?;
        writer.flush()?;
    }

    info!("Mask operation completed.");
    Ok(())
}
