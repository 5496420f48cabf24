use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

/// Process exit statuses besides success and clap's usage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    GeneralError = 1,
    SignalPipe = 141, // 128 + SIGPIPE (13)
}

impl ExitCode {
    pub fn exit(self) -> ! {
        process::exit(self as i32)
    }
}

/// Write `lines` to `outfile` when given, otherwise to stdout.
///
/// The output file is truncated first. A reader closing stdout early ends
/// the process quietly with status 141.
pub fn write_lines(lines: &[String], outfile: Option<&str>) -> Result<()> {
    match outfile {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create output file '{}'", path))?;
            write_all_lines(BufWriter::new(file), lines)
                .with_context(|| format!("Output file write failed '{}'", path))
        }
        None => match write_all_lines(BufWriter::new(io::stdout().lock()), lines) {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SignalPipe.exit(),
            result => result.context("Failed to write to stdout"),
        },
    }
}

fn write_all_lines<W: Write>(mut out: W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
