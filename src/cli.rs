// CLI-specific types and structures
// This module contains the command-line interface definitions and parsing logic

use clap::Parser;

use crate::config::{ErrorReportStyle, FieldFile};

// CLI structure - contains all command-line arguments and options
#[derive(Parser, Debug, Clone)]
#[command(name = "numstat")]
#[command(about = "Compute count, min, max, sum, average, median and percentiles of numeric input")]
#[command(
    long_about = "Compute count, min, max, sum, average, median and percentiles of numeric input\n\nEach input line is parsed as one number; lines that are not numbers are skipped with a warning.\nWith several input files every file becomes one output record, computed in parallel.\n\nCOMMON EXAMPLES:\n  seq 100 | numstat\n  numstat -H -m -p 95 latency.txt\n  numstat -d , -F 2 -I 1 data.csv\n  numstat -f 1:a.csv -f 3:b.csv -d ,"
)]
#[command(version)]
#[command(disable_version_flag = true)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Input files (stdin if not specified)
    pub files: Vec<String>,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// Output the number of values
    #[arg(short = 'c', long = "count", help_heading = "Statistics")]
    pub count: bool,

    /// Output the minimum
    #[arg(short = 'n', long = "min", help_heading = "Statistics")]
    pub min: bool,

    /// Output the maximum
    #[arg(short = 'x', long = "max", help_heading = "Statistics")]
    pub max: bool,

    /// Output the sum
    #[arg(short = 'u', long = "sum", help_heading = "Statistics")]
    pub sum: bool,

    /// Output the average
    #[arg(short = 'a', long = "avg", help_heading = "Statistics")]
    pub average: bool,

    /// Output the median (lower middle value for even counts)
    #[arg(short = 'm', long = "median", help_heading = "Statistics")]
    pub median: bool,

    /// Output the Nth percentile (1-100, larger values are clamped to 100)
    #[arg(short = 'p', long = "percentile", default_value_t = 0, help_heading = "Statistics")]
    pub percentile: i64,

    /// Input field delimiter
    #[arg(short = 'd', long = "in-delimiter", default_value = "\t", help_heading = "Input Options")]
    pub in_delimiter: String,

    /// 1-based field to read from each line (0 reads the whole line)
    #[arg(short = 'F', long = "field", default_value_t = 0, help_heading = "Input Options")]
    pub field: i64,

    /// Input file with its own field index, as N:PATH (repeatable; replaces positional files)
    #[arg(
        short = 'f',
        long = "field-file",
        value_parser = crate::config::parse_field_file,
        help_heading = "Input Options"
    )]
    pub field_files: Vec<FieldFile>,

    /// Number of leading rows to ignore in every input
    #[arg(short = 'I', long = "ignore-header", default_value_t = 0, help_heading = "Input Options")]
    pub ignore_header: usize,

    /// Input is already sorted ascending; skip sorting for median/percentile
    #[arg(short = 's', long = "sorted", help_heading = "Input Options")]
    pub sorted: bool,

    /// Print a header row naming the columns
    #[arg(short = 'H', long = "header", help_heading = "Output Options")]
    pub header: bool,

    /// Do not print the input file name column
    #[arg(short = 'N', long = "no-filename", help_heading = "Output Options")]
    pub no_filename: bool,

    /// Output field delimiter
    #[arg(
        short = 'D',
        long = "out-delimiter",
        default_value = "\t",
        help_heading = "Output Options"
    )]
    pub out_delimiter: String,

    /// Write output to a file instead of stdout (overwrites)
    #[arg(short = 'o', long = "outfile", help_heading = "Output Options")]
    pub outfile: Option<String>,

    /// How to show warnings about skipped lines and unreadable files
    #[arg(long = "error-report", value_enum, default_value = "print", help_heading = "Diagnostics")]
    pub error_report: ErrorReportStyle,

    /// Write a JSON summary of warnings to this file (with --error-report summary)
    #[arg(long = "error-report-file", help_heading = "Diagnostics")]
    pub error_report_file: Option<String>,

    /// Number of worker threads for multiple files (0 = number of CPUs)
    #[arg(short = 'j', long = "threads", default_value_t = 0, help_heading = "Performance")]
    pub threads: usize,
}
