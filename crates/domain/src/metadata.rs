use std::{collections::BTreeMap, io::Read};

use crate::{ExerciseName, MetadataLoadError, MuscleGroup};

pub const COLUMN_EXERCISE: &str = "Exercise";
pub const COLUMN_PRIMARY_MUSCLE_GROUP: &str = "Primary muscle group";
pub const COLUMN_SECONDARY_MUSCLE_GROUP: &str = "Secondary muscle group";
pub const COLUMN_MEV: &str = "MEV";
pub const COLUMN_MRV: &str = "MRV";

pub trait MetadataRepository {
    fn read_metadata(&self) -> Result<Metadata, MetadataLoadError>;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseMetadata {
    pub primary_muscle_group: Option<MuscleGroup>,
    pub secondary_muscle_group: Option<MuscleGroup>,
    /// Minimum effective volume in sets.
    pub mev: Option<f32>,
    /// Maximum recoverable volume in sets.
    pub mrv: Option<f32>,
}

/// Static exercise table keyed by exercise name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Metadata(BTreeMap<ExerciseName, ExerciseMetadata>);

impl Metadata {
    /// Load the comma-delimited exercise table.
    ///
    /// The table must contain the columns `Exercise`, `Primary muscle group`,
    /// `Secondary muscle group`, `MEV` and `MRV`. Further columns are ignored.
    /// Empty and absent cells are treated as missing values.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MetadataLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| MetadataLoadError::MissingColumn(name.to_string()))
        };
        let exercise_idx = column(COLUMN_EXERCISE)?;
        let primary_idx = column(COLUMN_PRIMARY_MUSCLE_GROUP)?;
        let secondary_idx = column(COLUMN_SECONDARY_MUSCLE_GROUP)?;
        let mev_idx = column(COLUMN_MEV)?;
        let mrv_idx = column(COLUMN_MRV)?;

        let mut exercises = BTreeMap::new();

        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = i + 1;
            let field = |idx: usize| record.get(idx).unwrap_or_default();

            let name = ExerciseName::new(field(exercise_idx)).map_err(|_| {
                MetadataLoadError::InvalidValue {
                    row,
                    column: COLUMN_EXERCISE.to_string(),
                    value: field(exercise_idx).to_string(),
                }
            })?;

            let metadata = ExerciseMetadata {
                primary_muscle_group: MuscleGroup::new(field(primary_idx)),
                secondary_muscle_group: MuscleGroup::new(field(secondary_idx)),
                mev: parse_optional_number(field(mev_idx), row, COLUMN_MEV)?,
                mrv: parse_optional_number(field(mrv_idx), row, COLUMN_MRV)?,
            };

            if exercises.contains_key(&name) {
                return Err(MetadataLoadError::DuplicateExercise(name.to_string()));
            }

            exercises.insert(name, metadata);
        }

        log::debug!("loaded metadata for {} exercises", exercises.len());

        Ok(Metadata(exercises))
    }

    #[must_use]
    pub fn get(&self, name: &ExerciseName) -> Option<&ExerciseMetadata> {
        self.0.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ExerciseName, ExerciseMetadata)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (ExerciseName, ExerciseMetadata)>>(iter: T) -> Self {
        Metadata(iter.into_iter().collect())
    }
}

fn parse_optional_number(
    value: &str,
    row: usize,
    column: &str,
) -> Result<Option<f32>, MetadataLoadError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(Some)
        .ok_or_else(|| MetadataLoadError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
        })
}
