use derive_more::{AsRef, Deref, Display};

/// Name of an exercise as it appears in the workout log and the metadata table.
///
/// Names are compared by exact, case-sensitive equality. Surrounding
/// whitespace is significant, as the join key must match the source data.
#[derive(AsRef, Deref, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseName(String);

impl ExerciseName {
    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.trim().is_empty() {
            return Err(NameError::Empty);
        }

        Ok(ExerciseName(name.to_string()))
    }
}

#[derive(AsRef, Deref, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MuscleGroup(String);

impl MuscleGroup {
    /// Returns `None` for blank values, which represent a missing muscle group.
    #[must_use]
    pub fn new(name: &str) -> Option<Self> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return None;
        }

        Some(MuscleGroup(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
}
