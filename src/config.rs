use clap::ValueEnum;
use std::io::IsTerminal;

use crate::aggregate::AggregateConfig;
use crate::cli::Cli;
use crate::error_handling::{create_soft_error, DiagnosticSink};
use crate::parallel::SourceDescriptor;

/// Main configuration struct for numstat
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub processing: ProcessingConfig,
    pub performance: PerformanceConfig,
}

/// Input configuration
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub files: Vec<String>,
    pub field_files: Vec<FieldFile>,
    pub delimiter: String,
    pub field_index: i64,
    pub ignore_header_rows: usize,
    pub sorted: bool,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub selection: StatSelection,
    pub header: bool,
    pub no_filename: bool,
    pub delimiter: String,
    pub outfile: Option<String>,
}

/// Processing configuration
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub error_report: ErrorReportConfig,
}

/// Performance configuration
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    pub threads: usize,
}

/// Which statistics end up in the output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatSelection {
    pub count: bool,
    pub min: bool,
    pub max: bool,
    pub sum: bool,
    pub average: bool,
    pub median: bool,
    /// Percentile rank; `<= 0` disables the column
    pub percentile: i64,
}

impl StatSelection {
    fn nothing_selected(&self) -> bool {
        !self.count
            && !self.min
            && !self.max
            && !self.sum
            && !self.average
            && !self.median
            && self.percentile <= 0
    }

    /// Apply defaults: an empty selection turns on count, min, max, sum and
    /// average; a rank above 100 is clamped. Returns a warning when clamped.
    pub fn normalize(&mut self) -> Option<String> {
        if self.nothing_selected() {
            self.count = true;
            self.min = true;
            self.max = true;
            self.sum = true;
            self.average = true;
        }
        if self.percentile > 100 {
            let warning = format!(
                "percentile is from 1 to 100. percentile={}",
                self.percentile
            );
            self.percentile = 100;
            return Some(warning);
        }
        None
    }
}

/// Input file paired with the field index to read from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFile {
    pub field_index: i64,
    pub path: String,
}

/// Parse an `N:PATH` pair. A value without `:` is a path read at field 1.
pub fn parse_field_file(value: &str) -> Result<FieldFile, String> {
    if value.trim().is_empty() {
        return Err("empty value is not allowed".to_string());
    }

    let Some((index, path)) = value.split_once(':') else {
        return Ok(FieldFile {
            field_index: 1,
            path: value.to_string(),
        });
    };

    let index = index.trim();
    if index.is_empty() || path.is_empty() {
        return Err(format!("value is empty. index={} filename={}", index, path));
    }

    let field_index: i64 = index
        .parse()
        .map_err(|_| format!("expected an integer before ':', got '{}'", index))?;
    if field_index < 1 {
        return Err(format!("field index must be 1 or more, got {}", field_index));
    }

    Ok(FieldFile {
        field_index,
        path: path.to_string(),
    })
}

/// Error reporting configuration
#[derive(Debug, Clone)]
pub struct ErrorReportConfig {
    pub style: ErrorReportStyle,
    pub file: Option<String>,
}

impl ErrorReportConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            style: cli.error_report.clone(),
            file: cli.error_report_file.clone(),
        }
    }
}

/// How non-fatal diagnostics are surfaced
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum ErrorReportStyle {
    /// Track silently
    Off,
    /// Print each diagnostic to stderr as it happens
    Print,
    /// Print a JSON summary at the end
    Summary,
}

impl StatsConfig {
    /// Create configuration from CLI arguments.
    /// Setup warnings (percentile clamp, ignored files) go to `diagnostics`.
    pub fn from_cli(cli: &Cli, diagnostics: &dyn DiagnosticSink) -> Self {
        let mut selection = StatSelection {
            count: cli.count,
            min: cli.min,
            max: cli.max,
            sum: cli.sum,
            average: cli.average,
            median: cli.median,
            percentile: cli.percentile,
        };
        if let Some(warning) = selection.normalize() {
            diagnostics.report(create_soft_error(warning, None));
        }

        if !cli.field_files.is_empty() && !cli.files.is_empty() {
            diagnostics.report(create_soft_error(
                format!(
                    "--field-file given; ignoring positional files: {}",
                    cli.files.join(" ")
                ),
                None,
            ));
        }

        Self {
            input: InputConfig {
                files: cli.files.clone(),
                field_files: cli.field_files.clone(),
                delimiter: cli.in_delimiter.clone(),
                field_index: cli.field,
                ignore_header_rows: cli.ignore_header,
                sorted: cli.sorted,
            },
            output: OutputConfig {
                selection,
                header: cli.header,
                no_filename: cli.no_filename,
                delimiter: cli.out_delimiter.clone(),
                outfile: cli.outfile.clone(),
            },
            processing: ProcessingConfig {
                error_report: ErrorReportConfig::from_cli(cli),
            },
            performance: PerformanceConfig {
                threads: cli.threads,
            },
        }
    }

    /// Aggregation settings derived from the input and output configuration
    pub fn aggregate_config(&self) -> AggregateConfig {
        let selection = &self.output.selection;
        AggregateConfig {
            need_values: selection.median || selection.percentile > 0,
            delimiter: self.input.delimiter.clone(),
            field_index: self.input.field_index,
            ignore_header_rows: self.input.ignore_header_rows,
            sorted_hint: self.input.sorted,
            median: selection.median,
            percentile_rank: selection.percentile.max(0),
        }
    }

    /// Enumerate the sources in submission order. `--field-file` entries,
    /// when present, replace the positional files. Empty means stdin.
    pub fn source_descriptors(&self) -> Vec<SourceDescriptor> {
        if !self.input.field_files.is_empty() {
            return self
                .input
                .field_files
                .iter()
                .enumerate()
                .map(|(original_index, field_file)| SourceDescriptor {
                    original_index,
                    location: field_file.path.clone(),
                    field_index_override: field_file.field_index,
                })
                .collect();
        }

        self.input
            .files
            .iter()
            .enumerate()
            .map(|(original_index, path)| SourceDescriptor {
                original_index,
                location: path.clone(),
                field_index_override: 0,
            })
            .collect()
    }

    /// Get effective thread count with defaults
    pub fn effective_threads(&self) -> usize {
        if self.performance.threads == 0 {
            num_cpus::get()
        } else {
            self.performance.threads
        }
    }
}

/// Prefix a diagnostic for stderr, with a marker when stderr is a terminal
pub fn format_error_message_auto(message: &str) -> String {
    let decorate = std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err();
    if decorate {
        format!("⚠️  numstat: {}", message)
    } else {
        format!("numstat: {}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::{ErrorReporter, ErrorSeverity};
    use clap::Parser;

    fn quiet() -> ErrorReporter {
        ErrorReporter::new(ErrorReportConfig {
            style: ErrorReportStyle::Off,
            file: None,
        })
    }

    fn config_for(args: &[&str]) -> (StatsConfig, ErrorReporter) {
        let mut full = vec!["numstat"];
        full.extend_from_slice(args);
        let cli = Cli::try_parse_from(full).unwrap();
        let reporter = quiet();
        let config = StatsConfig::from_cli(&cli, &reporter);
        (config, reporter)
    }

    #[test]
    fn test_default_selection() {
        let (config, _) = config_for(&[]);
        assert_eq!(
            config.output.selection,
            StatSelection {
                count: true,
                min: true,
                max: true,
                sum: true,
                average: true,
                median: false,
                percentile: 0,
            }
        );
        let aggregate = config.aggregate_config();
        assert!(!aggregate.need_values);
        assert!(!aggregate.wants_order_stats());
    }

    #[test]
    fn test_explicit_selection_is_kept() {
        let (config, _) = config_for(&["-m"]);
        let selection = &config.output.selection;
        assert!(selection.median);
        assert!(!selection.count && !selection.min && !selection.max);
        assert!(config.aggregate_config().need_values);

        let (config, _) = config_for(&["-p", "95"]);
        assert_eq!(config.output.selection.percentile, 95);
        assert!(!config.output.selection.count);
    }

    #[test]
    fn test_percentile_clamped_with_warning() {
        let (config, reporter) = config_for(&["-p", "150"]);
        assert_eq!(config.output.selection.percentile, 100);
        assert_eq!(config.aggregate_config().percentile_rank, 100);
        assert_eq!(reporter.count_of(ErrorSeverity::Soft), 1);
    }

    #[test]
    fn test_negative_percentile_disabled() {
        let mut selection = StatSelection {
            percentile: -4,
            ..Default::default()
        };
        assert!(selection.normalize().is_none());
        assert!(selection.count);
    }

    #[test]
    fn test_source_descriptors_from_files() {
        let (config, _) = config_for(&["-F", "2", "a.txt", "b.txt"]);
        let descriptors = config.source_descriptors();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].original_index, 0);
        assert_eq!(descriptors[0].location, "a.txt");
        assert_eq!(descriptors[0].field_index_override, 0);
        assert_eq!(descriptors[1].location, "b.txt");
        assert_eq!(config.aggregate_config().field_index, 2);
    }

    #[test]
    fn test_field_files_replace_positional_files() {
        let (config, reporter) = config_for(&["-f", "2:a.csv", "-f", "b.csv", "c.txt"]);
        let descriptors = config.source_descriptors();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].location, "a.csv");
        assert_eq!(descriptors[0].field_index_override, 2);
        assert_eq!(descriptors[1].location, "b.csv");
        assert_eq!(descriptors[1].field_index_override, 1);
        assert_eq!(reporter.count_of(ErrorSeverity::Soft), 1);
    }

    #[test]
    fn test_parse_field_file() {
        assert_eq!(
            parse_field_file("3:data.csv"),
            Ok(FieldFile {
                field_index: 3,
                path: "data.csv".to_string()
            })
        );
        assert_eq!(
            parse_field_file(" 2 :data.csv"),
            Ok(FieldFile {
                field_index: 2,
                path: "data.csv".to_string()
            })
        );
        assert_eq!(
            parse_field_file("data.csv"),
            Ok(FieldFile {
                field_index: 1,
                path: "data.csv".to_string()
            })
        );
        assert!(parse_field_file("").is_err());
        assert!(parse_field_file("   ").is_err());
        assert!(parse_field_file(":data.csv").is_err());
        assert!(parse_field_file("1:").is_err());
        assert!(parse_field_file("one:data.csv").is_err());
        assert!(parse_field_file("0:data.csv").is_err());
        assert!(parse_field_file("-1:data.csv").is_err());
    }

    #[test]
    fn test_effective_threads() {
        let (config, _) = config_for(&[]);
        assert_eq!(config.effective_threads(), num_cpus::get());
        let (config, _) = config_for(&["-j", "3"]);
        assert_eq!(config.effective_threads(), 3);
    }

    #[test]
    fn test_plain_error_prefix() {
        assert!(format_error_message_auto("boom").ends_with("numstat: boom"));
    }
}
