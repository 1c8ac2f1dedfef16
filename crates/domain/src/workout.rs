use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use derive_more::{Display, Into};

use crate::{DateParseError, ExerciseName, ParseError, SchemaValidationError};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const COLUMN_DATE: &str = "Date";
pub const COLUMN_EXERCISE_NAME: &str = "Exercise Name";
pub const COLUMN_WEIGHT: &str = "Weight";
pub const COLUMN_REPS: &str = "Reps";

/// Columns every workout log must contain, in the order they are validated.
pub const REQUIRED_COLUMNS: [&str; 13] = [
    COLUMN_DATE,
    "Workout Name",
    COLUMN_EXERCISE_NAME,
    "Set Order",
    COLUMN_WEIGHT,
    COLUMN_REPS,
    "RPE",
    "Distance",
    "Distance Unit",
    "Seconds",
    "Notes",
    "Workout Notes",
    "Workout Duration",
];

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub fn new(value: f64) -> Result<Self, WeightError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        match trimmed.parse::<f64>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be a non-negative number")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        if let Ok(parsed_value) = trimmed.parse::<u32>() {
            return Ok(Self(parsed_value));
        }
        match trimmed.parse::<f64>() {
            Ok(parsed_value)
                if parsed_value.fract() == 0.0
                    && (0.0..=f64::from(u32::MAX)).contains(&parsed_value) =>
            {
                Ok(Self(parsed_value as u32))
            }
            Ok(_) => Err(RepsError::OutOfRange),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be a non-negative integer")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// One logged set.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSet {
    pub date: NaiveDate,
    pub exercise: ExerciseName,
    pub weight: Weight,
    pub reps: Reps,
}

/// Parse a semicolon-delimited workout log.
///
/// The header must contain all of [`REQUIRED_COLUMNS`]; the first missing one
/// is reported. Only date, exercise name, weight and reps are kept. Dates are
/// parsed with `date_format` and reduced to the calendar date.
///
/// Rows shorter than the header are padded with empty cells. Any invalid row
/// rejects the whole log.
pub fn parse_workouts<R: Read>(reader: R, date_format: &str) -> Result<Vec<WorkoutSet>, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    validate_columns(&headers)?;

    let position = |name: &str| headers.iter().position(|h| h == name).unwrap_or_default();
    let date_idx = position(COLUMN_DATE);
    let exercise_idx = position(COLUMN_EXERCISE_NAME);
    let weight_idx = position(COLUMN_WEIGHT);
    let reps_idx = position(COLUMN_REPS);

    let mut sets = vec![];

    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let field = |idx: usize| record.get(idx).unwrap_or_default();
        let invalid_value = |column: &str, value: &str| ParseError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
        };

        let date = parse_date(field(date_idx), date_format).ok_or_else(|| DateParseError {
            row,
            value: field(date_idx).to_string(),
            format: date_format.to_string(),
        })?;
        let exercise = ExerciseName::new(field(exercise_idx))
            .map_err(|_| invalid_value(COLUMN_EXERCISE_NAME, field(exercise_idx)))?;
        let weight = Weight::try_from(field(weight_idx))
            .map_err(|_| invalid_value(COLUMN_WEIGHT, field(weight_idx)))?;
        let reps = Reps::try_from(field(reps_idx))
            .map_err(|_| invalid_value(COLUMN_REPS, field(reps_idx)))?;

        sets.push(WorkoutSet {
            date,
            exercise,
            weight,
            reps,
        });
    }

    log::debug!("parsed {} sets", sets.len());

    Ok(sets)
}

fn validate_columns(headers: &csv::StringRecord) -> Result<(), SchemaValidationError> {
    match REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        Some(column) => Err(SchemaValidationError::MissingColumn((*column).to_string())),
        None => Ok(()),
    }
}

fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(value, format)
        .map(|date_time| date_time.date())
        .or_else(|_| NaiveDate::parse_from_str(value, format))
        .ok()
}
