use std::path::Path;
use std::process;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use cohesion::config::{find_config_pyproject_toml, load_config, merge_config};
use cohesion::models::FileReport;
use cohesion::{analyze_path, AnalysisOptions};

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Terminal,
    Json,
}

/// Exit codes used by the analyzer
mod exit_codes {
    pub const SUCCESS: i32 = 0; // All classes within thresholds
    pub const THRESHOLD_VIOLATION: i32 = 1; // Classes outside --below/--above
    pub const FILE_ERROR: i32 = 3; // Path not found or I/O error
    pub const PARSE_ERROR: i32 = 4; // Failed to parse Python files
}

#[derive(Parser, Debug)]
#[command(
    name = "cohesion",
    author,
    version,
    about = "Measure class cohesion in Python code",
    long_about = "Measure class cohesion in Python code.\n\nIf no paths are provided, the current directory is analyzed recursively."
)]
struct Args {
    /// Paths to analyze (files or directories)
    ///
    /// Examples: cohesion (current dir), cohesion src/, cohesion file.py
    #[arg(default_value = ".")]
    paths: Vec<String>,

    /// Path to a pyproject.toml with a [tool.cohesion] section
    ///
    /// Example: cohesion --config pyproject.toml
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Output format
    ///
    /// Example: -f json (for CI/CD)
    #[arg(
        short = 'f',
        long = "output-format",
        value_enum,
        default_value = "terminal"
    )]
    output_format: OutputFormat,

    /// Report only classes with cohesion below this percentage, and exit
    /// non-zero when any exist
    ///
    /// Example: cohesion --below 50
    #[arg(short = 'b', long = "below")]
    below: Option<f64>,

    /// Report only classes with cohesion above this percentage, and exit
    /// non-zero when any exist
    ///
    /// Example: cohesion --above 95
    #[arg(short = 'a', long = "above", conflicts_with = "below")]
    above: Option<f64>,

    /// Show per-method breakdowns
    ///
    /// Example: cohesion -v src/
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Skip files matching pattern
    #[arg(long = "skip", hide = true)]
    skip: Vec<String>,

    /// Disable parallel processing
    ///
    /// Example: cohesion --no-parallel
    #[arg(long = "no-parallel")]
    no_parallel: bool,

    /// Show timing information
    #[arg(long = "timing", hide = true)]
    timing: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let start = Instant::now();

    let mut had_file_errors = false;
    let mut had_parse_errors = false;

    // Load configuration from pyproject.toml, preferring an explicit
    // --config path, then the analyzed path, then the current directory.
    let config = if let Some(config_path) = &args.config {
        load_config(Some(Path::new(config_path)))
    } else {
        let start_path = Path::new(&args.paths[0]);
        let abs_path = start_path
            .canonicalize()
            .unwrap_or_else(|_| start_path.to_path_buf());
        if let Some(pyproject) = find_config_pyproject_toml(&abs_path) {
            if args.verbose {
                eprintln!(
                    "Found pyproject.toml with [tool.cohesion] at: {}",
                    pyproject.display()
                );
            }
            load_config(Some(&pyproject))
        } else {
            load_config(None)
        }
    };

    let (below, above, skip_patterns) =
        merge_config(config.as_ref(), args.below, args.above, &args.skip);

    let options = AnalysisOptions {
        skip_patterns,
        parallel: !args.no_parallel,
        ..Default::default()
    };

    let mut reports: Vec<FileReport> = Vec::new();
    let mut total_files = 0;

    for path_str in &args.paths {
        let path = Path::new(path_str);

        if !path.exists() {
            eprintln!("Error: Path not found: {}", path.display());
            had_file_errors = true;
            continue;
        }

        match analyze_path(path, &options) {
            Ok(result) => {
                total_files += result.files_analyzed;
                if result.files_with_errors > 0 {
                    had_file_errors = true;
                }
                if result.parse_errors > 0 {
                    had_parse_errors = true;
                }
                reports.extend(result.files);
            }
            Err(e) => {
                eprintln!("Error processing path {}: {}", path.display(), e);
                had_file_errors = true;
            }
        }
    }

    // Threshold filters narrow the report to the offending classes.
    let mut threshold_violations = 0;
    if below.is_some() || above.is_some() {
        for report in &mut reports {
            report.classes.retain(|class| {
                let Some(score) = class.cohesion else {
                    return false;
                };
                match (below, above) {
                    (Some(limit), _) => score < limit,
                    (_, Some(limit)) => score > limit,
                    _ => false,
                }
            });
        }
        threshold_violations = reports.iter().map(|r| r.classes.len()).sum();
    }

    match args.output_format {
        OutputFormat::Terminal => report_terminal(&reports, args.verbose),
        OutputFormat::Json => report_json(&reports)?,
    }

    if args.timing {
        let elapsed = start.elapsed().as_secs_f64();
        eprintln!("\nFiles analyzed: {}", total_files);
        eprintln!("Time: {:.2}s", elapsed);
    }

    let exit_code = if had_parse_errors {
        exit_codes::PARSE_ERROR
    } else if had_file_errors {
        exit_codes::FILE_ERROR
    } else if threshold_violations > 0 {
        exit_codes::THRESHOLD_VIOLATION
    } else {
        exit_codes::SUCCESS
    };

    if exit_code != exit_codes::SUCCESS {
        process::exit(exit_code);
    }

    Ok(())
}

fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(score) => format!("{:.2}%", score),
        None => "-".to_string(),
    }
}

fn report_terminal(reports: &[FileReport], verbose: bool) {
    let mut sorted: Vec<&FileReport> = reports.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    for report in sorted {
        if report.classes.is_empty() {
            continue;
        }

        println!("File: {}", report.path.display());
        for class in &report.classes {
            println!("  Class: {} ({})", class.name, class.location);
            if verbose {
                for method in &class.methods {
                    println!(
                        "    Function: {} {}/{} {}",
                        method.name,
                        method.variables.len(),
                        class.variable_count,
                        format_percentage(Some(method.percentage)),
                    );
                }
            }
            println!("    Total: {}", format_percentage(class.cohesion));
        }
    }
}

fn report_json(reports: &[FileReport]) -> Result<()> {
    let mut sorted: Vec<&FileReport> = reports.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    println!("{}", serde_json::to_string_pretty(&sorted)?);
    Ok(())
}
