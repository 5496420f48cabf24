//! Output record assembly
//!
//! Turns per-source results into delimiter-joined text lines, optionally
//! preceded by a header row.

use crate::config::{OutputConfig, StatSelection};
use crate::stats::AggregationResult;

pub const HEADER_FILE_NAME: &str = "filename";
pub const HEADER_COUNT: &str = "count";
pub const HEADER_MIN: &str = "min";
pub const HEADER_MAX: &str = "max";
pub const HEADER_SUM: &str = "sum";
pub const HEADER_AVERAGE: &str = "avg";
pub const HEADER_MEDIAN: &str = "median";
pub const HEADER_PERCENTILE: &str = "percentile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    FileName,
    Count,
    Min,
    Max,
    Sum,
    Average,
    Median,
    Percentile,
}

/// Formats aggregation results as delimited records
pub struct RecordFormatter {
    columns: Vec<Column>,
    delimiter: String,
    header: bool,
    percentile_rank: i64,
}

impl RecordFormatter {
    /// Column layout is fixed by the selection; the file name column is
    /// shown when `with_file_name` is set and `--no-filename` is not.
    pub fn new(output: &OutputConfig, with_file_name: bool) -> Self {
        let mut columns = Vec::new();
        if with_file_name && !output.no_filename {
            columns.push(Column::FileName);
        }
        columns.extend(selected_columns(&output.selection));

        Self {
            columns,
            delimiter: output.delimiter.clone(),
            header: output.header,
            percentile_rank: output.selection.percentile,
        }
    }

    /// Builds a formatter for `results`: the file name column follows the
    /// first record's label
    pub fn for_results(output: &OutputConfig, results: &[AggregationResult]) -> Self {
        let with_file_name = results
            .first()
            .and_then(|r| r.source_label.as_deref())
            .is_some_and(|label| !label.is_empty());
        Self::new(output, with_file_name)
    }

    pub fn format_header(&self) -> String {
        self.columns
            .iter()
            .map(|column| self.column_name(*column))
            .collect::<Vec<_>>()
            .join(&self.delimiter)
    }

    pub fn format_record(&self, result: &AggregationResult) -> String {
        self.columns
            .iter()
            .map(|column| match column {
                Column::FileName => result.source_label.clone().unwrap_or_default(),
                Column::Count => result.count.to_string(),
                Column::Min => format_float(result.min),
                Column::Max => format_float(result.max),
                Column::Sum => format_float(result.sum),
                Column::Average => format_float(result.average),
                Column::Median => format_float(result.median),
                Column::Percentile => format_float(result.percentile),
            })
            .collect::<Vec<_>>()
            .join(&self.delimiter)
    }

    /// All output lines: the header (when enabled) followed by one record
    /// per result
    pub fn format_all(&self, results: &[AggregationResult]) -> Vec<String> {
        let mut lines = Vec::with_capacity(results.len() + 1);
        if self.header {
            lines.push(self.format_header());
        }
        lines.extend(results.iter().map(|r| self.format_record(r)));
        lines
    }

    fn column_name(&self, column: Column) -> String {
        match column {
            Column::FileName => HEADER_FILE_NAME.to_string(),
            Column::Count => HEADER_COUNT.to_string(),
            Column::Min => HEADER_MIN.to_string(),
            Column::Max => HEADER_MAX.to_string(),
            Column::Sum => HEADER_SUM.to_string(),
            Column::Average => HEADER_AVERAGE.to_string(),
            Column::Median => HEADER_MEDIAN.to_string(),
            Column::Percentile => format!("{}{}", self.percentile_rank, HEADER_PERCENTILE),
        }
    }
}

fn selected_columns(selection: &StatSelection) -> Vec<Column> {
    [
        (selection.count, Column::Count),
        (selection.min, Column::Min),
        (selection.max, Column::Max),
        (selection.sum, Column::Sum),
        (selection.average, Column::Average),
        (selection.median, Column::Median),
        (selection.percentile > 0, Column::Percentile),
    ]
    .into_iter()
    .filter_map(|(enabled, column)| enabled.then_some(column))
    .collect()
}

/// Two decimals with trailing zeros and a dangling point removed
pub fn format_float(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    if !formatted.contains('.') {
        return formatted;
    }
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(selection: StatSelection) -> OutputConfig {
        OutputConfig {
            selection,
            header: true,
            no_filename: false,
            delimiter: "\t".to_string(),
            outfile: None,
        }
    }

    fn default_selection() -> StatSelection {
        let mut selection = StatSelection::default();
        selection.normalize();
        selection
    }

    fn sample(label: Option<&str>) -> AggregationResult {
        AggregationResult {
            source_label: label.map(str::to_string),
            count: 100,
            min: 1.0,
            max: 100.0,
            sum: 5050.0,
            average: 50.5,
            median: 50.0,
            percentile: 95.0,
        }
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(3.0), "3");
        assert_eq!(format_float(50.5), "50.5");
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(100.0), "100");
        assert_eq!(format_float(1.005), "1");
        assert_eq!(format_float(2.345678), "2.35");
        assert_eq!(format_float(-4.10), "-4.1");
    }

    #[test]
    fn test_default_columns_with_file_name() {
        let results = vec![sample(Some("data.txt"))];
        let formatter = RecordFormatter::for_results(&output(default_selection()), &results);
        assert_eq!(
            formatter.format_all(&results),
            vec![
                "filename\tcount\tmin\tmax\tsum\tavg".to_string(),
                "data.txt\t100\t1\t100\t5050\t50.5".to_string(),
            ]
        );
    }

    #[test]
    fn test_stdin_has_no_file_name_column() {
        let results = vec![sample(None)];
        let formatter = RecordFormatter::for_results(&output(default_selection()), &results);
        assert_eq!(formatter.format_header(), "count\tmin\tmax\tsum\tavg");
    }

    #[test]
    fn test_no_filename_flag() {
        let mut config = output(default_selection());
        config.no_filename = true;
        config.header = false;
        let results = vec![sample(Some("a.txt")), sample(Some("b.txt"))];
        let formatter = RecordFormatter::for_results(&config, &results);
        let lines = formatter.format_all(&results);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "100\t1\t100\t5050\t50.5");
    }

    #[test]
    fn test_median_and_percentile_columns() {
        let selection = StatSelection {
            median: true,
            percentile: 95,
            ..Default::default()
        };
        let mut config = output(selection);
        config.delimiter = ",".to_string();
        let results = vec![sample(Some("x"))];
        let formatter = RecordFormatter::for_results(&config, &results);
        assert_eq!(
            formatter.format_all(&results),
            vec!["filename,median,95percentile".to_string(), "x,50,95".to_string()]
        );
    }

    #[test]
    fn test_empty_results() {
        let formatter = RecordFormatter::for_results(&output(default_selection()), &[]);
        assert_eq!(formatter.format_all(&[]), vec!["count\tmin\tmax\tsum\tavg".to_string()]);
    }
}
