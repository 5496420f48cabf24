use clap::Parser;

use numstat::config::{format_error_message_auto, ErrorReportConfig};
use numstat::error_handling::{create_fatal_error, DiagnosticSink, ErrorReporter};
use numstat::platform::{write_lines, ExitCode};
use numstat::{Cli, RecordFormatter, StatsConfig};

fn main() {
    // Exits with usage errors (status 2), help and version on its own
    let cli = Cli::parse();

    let reporter = ErrorReporter::new(ErrorReportConfig::from_cli(&cli));
    let config = StatsConfig::from_cli(&cli, &reporter);

    let results = match numstat::run(&config, &reporter) {
        Ok(results) => results,
        Err(e) => {
            reporter.report(create_fatal_error(format!("{:#}", e), None));
            finish(&reporter);
            ExitCode::GeneralError.exit();
        }
    };

    let formatter = RecordFormatter::for_results(&config.output, &results);
    let lines = formatter.format_all(&results);

    if let Err(e) = write_lines(&lines, config.output.outfile.as_deref()) {
        reporter.report(create_fatal_error(format!("{:#}", e), None));
        finish(&reporter);
        ExitCode::GeneralError.exit();
    }

    finish(&reporter);
}

/// Emit the diagnostic summary, if one was requested
fn finish(reporter: &ErrorReporter) {
    reporter.print_summary();
    if let Err(e) = reporter.write_summary_to_file() {
        eprintln!("{}", format_error_message_auto(&format!("{:#}", e)));
    }
}
