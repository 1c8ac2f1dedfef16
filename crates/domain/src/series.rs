use crate::{
    EnrichedSet, ExerciseDailySeries, MuscleGroupSeries, aggregate_exercises,
    aggregate_muscle_groups,
};

pub const EXERCISE_PREFIX: &str = "ex_";
pub const MUSCLE_GROUP_PREFIX: &str = "mg_";

/// A fully aggregated series handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum NamedSeries {
    Exercise(ExerciseDailySeries),
    MuscleGroup(MuscleGroupSeries),
}

impl NamedSeries {
    /// Name of the artifact rendered from this series (`ex_<exercise>` or `mg_<muscle group>`).
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            NamedSeries::Exercise(series) => format!("{EXERCISE_PREFIX}{}", series.exercise),
            NamedSeries::MuscleGroup(series) => {
                format!("{MUSCLE_GROUP_PREFIX}{}", series.muscle_group)
            }
        }
    }
}

/// Result of analyzing one workout log.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    pub exercises: Vec<ExerciseDailySeries>,
    pub muscle_groups: Vec<MuscleGroupSeries>,
}

impl Report {
    #[must_use]
    pub fn new(sets: &[EnrichedSet]) -> Self {
        Self {
            exercises: aggregate_exercises(sets),
            muscle_groups: aggregate_muscle_groups(sets),
        }
    }

    /// All series, exercises first, each group in its sorted order.
    pub fn series(&self) -> impl Iterator<Item = NamedSeries> + '_ {
        self.exercises
            .iter()
            .cloned()
            .map(NamedSeries::Exercise)
            .chain(
                self.muscle_groups
                    .iter()
                    .cloned()
                    .map(NamedSeries::MuscleGroup),
            )
    }
}
