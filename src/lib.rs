#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! cohesion — class cohesion analysis for Python source code
//!
//! Cohesion measures how tightly a class's methods are bound to its data:
//! how many methods touch how many of the class's distinct variables. This
//! crate parses Python source, extracts per-class structural facts (methods,
//! class variables, per-method instance variable usage), and scores each
//! class as the mean share of variables its methods use.
//!
//! The extraction layer is purely syntactic: it pattern-matches over the
//! parsed tree with no type inference, control-flow analysis, or
//! cross-module resolution.

pub mod attributes;
pub mod config;
pub mod filesystem;
pub mod location;
pub mod members;
pub mod metrics;
pub mod models;
pub mod names;
pub mod walk;

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use rustpython_ast::Mod;
use rustpython_parser::{parse, Mode};

use crate::location::LineIndex;
use crate::models::{ClassReport, FileReport};

/// Options for an analysis run.
#[derive(Clone)]
pub struct AnalysisOptions {
    /// First-parameter name marking a method as instance-bound.
    pub bound_name: String,
    /// Path patterns pruned during file discovery.
    pub skip_patterns: Vec<String>,
    /// Analyze files in parallel.
    pub parallel: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            bound_name: members::BOUND_METHOD_ARGUMENT_NAME.to_string(),
            skip_patterns: vec![],
            parallel: true,
        }
    }
}

/// Result of analyzing one path.
pub struct AnalysisResult {
    pub files: Vec<FileReport>,
    pub files_analyzed: usize,
    pub files_with_errors: usize,
    pub parse_errors: usize,
}

/// Parse Python source into a module tree.
///
/// Malformed source is a hard failure surfaced to the caller; no partial
/// recovery is attempted here.
pub fn parse_module(source: &str, path: &str) -> Result<Mod> {
    Ok(parse(source, Mode::Module, path)?)
}

/// Analyze one source text: every class in the module, at any nesting
/// depth, gets a cohesion report.
pub fn analyze_source(source: &str, path: &str, bound_name: &str) -> Result<Vec<ClassReport>> {
    let ast = parse_module(source, path)?;
    let index = LineIndex::new(source);

    Ok(attributes::module_classes(&ast)
        .into_iter()
        .map(|class| metrics::class_report(class, bound_name, &index))
        .collect())
}

fn analyze_file(path: &Path, bound_name: &str) -> Result<Vec<ClassReport>> {
    let content = filesystem::read_file_contents(path)?;
    analyze_source(&content, &path.to_string_lossy(), bound_name)
}

/// Analyze a file or directory tree.
///
/// A file that fails to read or parse is counted and skipped; the other
/// files still produce reports.
pub fn analyze_path(path: &Path, options: &AnalysisOptions) -> Result<AnalysisResult> {
    let files = if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        filesystem::find_python_files(path, &options.skip_patterns)
    };
    let files_analyzed = files.len();

    let analyze = |file: &PathBuf| (file.clone(), analyze_file(file, &options.bound_name));
    let results: Vec<(PathBuf, Result<Vec<ClassReport>>)> = if options.parallel {
        files.par_iter().map(analyze).collect()
    } else {
        files.iter().map(analyze).collect()
    };

    let mut reports = Vec::new();
    let mut files_with_errors = 0;
    let mut parse_errors = 0;

    for (file, result) in results {
        match result {
            Ok(classes) => reports.push(FileReport {
                path: file,
                classes,
            }),
            Err(e) => {
                eprintln!("Error analyzing {}: {}", file.display(), e);
                files_with_errors += 1;
                if e.downcast_ref::<rustpython_parser::ParseError>().is_some() {
                    parse_errors += 1;
                }
            }
        }
    }

    Ok(AnalysisResult {
        files: reports,
        files_analyzed,
        files_with_errors,
        parse_errors,
    })
}
