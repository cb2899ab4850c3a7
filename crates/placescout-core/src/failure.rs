//! Per-item failures collected during a run instead of aborting it.

use serde::Serialize;

/// Pipeline stage in which a recoverable failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// A summary search for one place type.
    Search,
    /// A details lookup for one place.
    Details,
    /// Email extraction for one website.
    Website,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureStage::Search => write!(f, "search"),
            FailureStage::Details => write!(f, "details"),
            FailureStage::Website => write!(f, "website"),
        }
    }
}

/// One recoverable failure. `subject` is the place type for searches and the
/// place id otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub stage: FailureStage,
    pub subject: String,
    pub message: String,
}

impl Failure {
    #[must_use]
    pub fn new(stage: FailureStage, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            stage,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Failures of one stage, summarised for the end-of-run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureGroup {
    pub stage: FailureStage,
    pub count: usize,
    pub subjects: Vec<String>,
}

/// Groups failures by stage (in stage order), keeping subjects in the order
/// they were recorded.
#[must_use]
pub fn group_failures(failures: &[Failure]) -> Vec<FailureGroup> {
    let mut groups: Vec<FailureGroup> = Vec::new();
    for stage in [
        FailureStage::Search,
        FailureStage::Details,
        FailureStage::Website,
    ] {
        let subjects: Vec<String> = failures
            .iter()
            .filter(|f| f.stage == stage)
            .map(|f| f.subject.clone())
            .collect();
        if !subjects.is_empty() {
            groups.push(FailureGroup {
                stage,
                count: subjects.len(),
                subjects,
            });
        }
    }
    groups
}
