use thiserror::Error;

/// Failure of one import stage. Each variant short-circuits the pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Import cancelled before it started")]
    Cancelled,

    #[error("Unknown institution: {0}")]
    UnknownInstitution(String),

    #[error("Invalid semester start date: {0}")]
    InvalidStartDate(String),

    #[error("Failed to fetch timetable: {0}")]
    Fetch(String),

    /// The source delivered nothing usable at all (missing or malformed
    /// collection). Retrying the fetch may help.
    #[error("No schedule data: {0}")]
    NoData(String),

    /// The source delivered rows but every one failed validation.
    #[error("No valid courses after filtering ({rejected} occurrences rejected)")]
    NoCourses { rejected: usize },

    #[error("Failed to save courses: {0}")]
    Persist(String),

    /// Courses were saved but a later payload was not.
    #[error("Import incomplete: courses saved but {stage} failed: {reason}")]
    Incomplete { stage: &'static str, reason: String },

    /// Normalization ran on the blocking pool and panicked or was cancelled.
    #[error("Normalization task failed: {0}")]
    Interrupted(String),
}
