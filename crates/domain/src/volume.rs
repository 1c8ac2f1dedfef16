use std::{
    iter::Sum,
    ops::{Add, AddAssign, Mul},
};

use derive_more::{Display, Into};

use crate::{ExerciseMetadata, Metadata, MuscleGroup, Reps, Weight, WorkoutSet};

/// Training load of a set (weight × reps).
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Volume(f64);

impl Mul<Reps> for Weight {
    type Output = Volume;

    fn mul(self, rhs: Reps) -> Self::Output {
        Volume(f64::from(self) * f64::from(u32::from(rhs)))
    }
}

impl Add for Volume {
    type Output = Volume;

    fn add(self, rhs: Self) -> Self::Output {
        Volume(self.0 + rhs.0)
    }
}

impl AddAssign for Volume {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Volume {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Volume::default(), Add::add)
    }
}

/// A set together with its volume and the metadata of its exercise.
///
/// `metadata` is `None` if the exercise is not part of the metadata table.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSet {
    pub set: WorkoutSet,
    pub volume: Volume,
    pub metadata: Option<ExerciseMetadata>,
}

impl EnrichedSet {
    #[must_use]
    pub fn primary_muscle_group(&self) -> Option<&MuscleGroup> {
        self.metadata
            .as_ref()
            .and_then(|m| m.primary_muscle_group.as_ref())
    }

    #[must_use]
    pub fn secondary_muscle_group(&self) -> Option<&MuscleGroup> {
        self.metadata
            .as_ref()
            .and_then(|m| m.secondary_muscle_group.as_ref())
    }
}

/// Compute the volume of every set and left join the exercise metadata.
///
/// Every input set yields exactly one enriched set, in input order.
#[must_use]
pub fn enrich(sets: Vec<WorkoutSet>, metadata: &Metadata) -> Vec<EnrichedSet> {
    let enriched = sets
        .into_iter()
        .map(|set| EnrichedSet {
            volume: set.weight * set.reps,
            metadata: metadata.get(&set.exercise).cloned(),
            set,
        })
        .collect::<Vec<_>>();

    let unmatched = enriched.iter().filter(|s| s.metadata.is_none()).count();
    if unmatched > 0 {
        log::debug!("{unmatched} sets without exercise metadata");
    }

    enriched
}
