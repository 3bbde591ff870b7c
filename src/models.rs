//! Report structures produced by the analyzer

use std::path::PathBuf;

use serde::Serialize;

use crate::location::SourceLocation;

/// Cohesion facts for one method.
#[derive(Debug, Clone, Serialize)]
pub struct MethodReport {
    pub name: String,
    pub location: SourceLocation,
    pub bound: bool,
    pub classmethod: bool,
    pub staticmethod: bool,
    /// Instance variable names this method uses, sorted.
    pub variables: Vec<String>,
    /// Percentage of the class's variables this method touches.
    pub percentage: f64,
}

/// Cohesion facts for one class.
#[derive(Debug, Clone, Serialize)]
pub struct ClassReport {
    pub name: String,
    pub location: SourceLocation,
    /// Distinct class and instance variable names in the class.
    pub variable_count: usize,
    pub methods: Vec<MethodReport>,
    /// Mean of the method percentages; absent for a class with no methods.
    pub cohesion: Option<f64>,
}

/// All class reports from one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub classes: Vec<ClassReport>,
}

impl FileReport {
    /// Mean cohesion over the file's scored classes.
    pub fn cohesion(&self) -> Option<f64> {
        let scored: Vec<f64> = self.classes.iter().filter_map(|c| c.cohesion).collect();
        if scored.is_empty() {
            None
        } else {
            Some(scored.iter().sum::<f64>() / scored.len() as f64)
        }
    }
}
