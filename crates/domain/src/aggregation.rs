use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::{EnrichedSet, ExerciseName, MuscleGroup, Volume};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ExerciseDay {
    pub date: NaiveDate,
    pub volume: Volume,
    pub reps: u64,
    pub sets: u32,
}

/// Daily totals of one exercise, ordered by date.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDailySeries {
    pub exercise: ExerciseName,
    pub days: Vec<ExerciseDay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Role {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCount {
    pub date: NaiveDate,
    pub sets: u32,
}

/// Daily set counts of one muscle group, split by the role the muscle group
/// has in the trained exercises.
///
/// `mrv` and `mev` stem from the first set that trains the muscle group as
/// primary muscle group. Both are `None` if there is no such set.
#[derive(Debug, Clone, PartialEq)]
pub struct MuscleGroupSeries {
    pub muscle_group: MuscleGroup,
    pub primary: Vec<SetCount>,
    pub secondary: Vec<SetCount>,
    pub mrv: Option<f32>,
    pub mev: Option<f32>,
}

impl MuscleGroupSeries {
    #[must_use]
    pub fn sets(&self, role: Role) -> &[SetCount] {
        match role {
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
        }
    }
}

/// Sum volume and reps and count the sets per exercise and date.
///
/// The result is ordered by exercise name.
#[must_use]
pub fn aggregate_exercises(sets: &[EnrichedSet]) -> Vec<ExerciseDailySeries> {
    let mut exercises: BTreeMap<&ExerciseName, BTreeMap<NaiveDate, ExerciseDay>> =
        BTreeMap::new();

    for s in sets {
        let day = exercises
            .entry(&s.set.exercise)
            .or_default()
            .entry(s.set.date)
            .or_insert(ExerciseDay {
                date: s.set.date,
                ..ExerciseDay::default()
            });
        day.volume += s.volume;
        day.reps += u64::from(u32::from(s.set.reps));
        day.sets += 1;
    }

    exercises
        .into_iter()
        .map(|(exercise, days)| ExerciseDailySeries {
            exercise: exercise.clone(),
            days: days.into_values().collect(),
        })
        .collect()
}

/// Count the sets per muscle group and date, separately for the primary and
/// the secondary role.
///
/// Sets without metadata or without muscle groups are ignored. The result is
/// ordered by muscle group name.
#[must_use]
pub fn aggregate_muscle_groups(sets: &[EnrichedSet]) -> Vec<MuscleGroupSeries> {
    let muscle_groups = sets
        .iter()
        .flat_map(|s| [s.primary_muscle_group(), s.secondary_muscle_group()])
        .flatten()
        .collect::<BTreeSet<_>>();

    muscle_groups
        .into_iter()
        .map(|muscle_group| {
            let primary = sets
                .iter()
                .filter(|s| s.primary_muscle_group() == Some(muscle_group))
                .collect::<Vec<_>>();
            let secondary = sets
                .iter()
                .filter(|s| s.secondary_muscle_group() == Some(muscle_group))
                .collect::<Vec<_>>();
            let landmarks = primary.first().and_then(|s| s.metadata.as_ref());

            MuscleGroupSeries {
                muscle_group: muscle_group.clone(),
                mrv: landmarks.and_then(|m| m.mrv),
                mev: landmarks.and_then(|m| m.mev),
                primary: count_sets_per_day(&primary),
                secondary: count_sets_per_day(&secondary),
            }
        })
        .collect()
}

fn count_sets_per_day(sets: &[&EnrichedSet]) -> Vec<SetCount> {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();

    for s in sets {
        *counts.entry(s.set.date).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(date, sets)| SetCount { date, sets })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;

    use crate::{ExerciseMetadata, Metadata, Reps, Weight, WorkoutSet, enrich};

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn set(day: u32, exercise: &str, weight: f64, reps: u32) -> WorkoutSet {
        WorkoutSet {
            date: date(day),
            exercise: ExerciseName::new(exercise).unwrap(),
            weight: Weight::new(weight).unwrap(),
            reps: Reps::new(reps),
        }
    }

    fn metadata() -> Metadata {
        [
            ("Bench Press", Some("Chest"), Some("Triceps"), Some(8.0), Some(22.0)),
            ("Dips", Some("Triceps"), Some("Chest"), Some(6.0), Some(18.0)),
            ("Skull Crusher", Some("Triceps"), None, Some(4.0), Some(14.0)),
            ("Face Pull", Some("Rear Delts"), Some("Traps"), None, None),
        ]
        .into_iter()
        .map(|(name, primary, secondary, mev, mrv)| {
            (
                ExerciseName::new(name).unwrap(),
                ExerciseMetadata {
                    primary_muscle_group: primary.and_then(MuscleGroup::new),
                    secondary_muscle_group: secondary.and_then(MuscleGroup::new),
                    mev,
                    mrv,
                },
            )
        })
        .collect()
    }

    #[test]
    fn test_aggregate_exercises_single_set() {
        let sets = enrich(vec![set(1, "Bench Press", 100.0, 10)], &metadata());

        assert_eq!(
            aggregate_exercises(&sets),
            vec![ExerciseDailySeries {
                exercise: ExerciseName::new("Bench Press").unwrap(),
                days: vec![ExerciseDay {
                    date: date(1),
                    volume: Weight::new(1000.0).unwrap() * Reps::new(1),
                    reps: 10,
                    sets: 1,
                }],
            }]
        );
    }

    #[test]
    fn test_aggregate_exercises_sums_per_day() {
        let sets = enrich(
            vec![
                set(2, "Bench Press", 50.0, 10),
                set(1, "Squat", 100.0, 5),
                set(2, "Bench Press", 60.0, 8),
                set(3, "Bench Press", 60.0, 6),
            ],
            &metadata(),
        );

        let series = aggregate_exercises(&sets);

        assert_eq!(
            series
                .iter()
                .map(|s| s.exercise.to_string())
                .collect::<Vec<_>>(),
            vec!["Bench Press", "Squat"]
        );
        assert_eq!(
            series[0]
                .days
                .iter()
                .map(|d| (d.date, d.reps, d.sets))
                .collect::<Vec<_>>(),
            vec![(date(2), 18, 2), (date(3), 6, 1)]
        );
        assert_approx_eq!(f64::from(series[0].days[0].volume), 980.0);
        assert_approx_eq!(f64::from(series[0].days[1].volume), 360.0);
        assert_eq!(
            series[1].days,
            vec![ExerciseDay {
                date: date(1),
                volume: Weight::new(500.0).unwrap() * Reps::new(1),
                reps: 5,
                sets: 1,
            }]
        );
    }

    #[test]
    fn test_aggregate_exercises_sorts_by_name() {
        let sets = enrich(
            vec![
                set(1, "b", 1.0, 1),
                set(1, "A", 1.0, 1),
                set(1, "a", 1.0, 1),
                set(1, "B", 1.0, 1),
            ],
            &Metadata::default(),
        );

        assert_eq!(
            aggregate_exercises(&sets)
                .iter()
                .map(|s| s.exercise.to_string())
                .collect::<Vec<_>>(),
            vec!["A", "B", "a", "b"]
        );
    }

    #[test]
    fn test_aggregate_exercises_sets_match_rows() {
        let rows = vec![
            set(1, "Dips", 0.0, 12),
            set(1, "Dips", 0.0, 10),
            set(1, "Dips", 10.0, 8),
            set(4, "Dips", 0.0, 15),
        ];
        let sets = enrich(rows.clone(), &metadata());

        let series = aggregate_exercises(&sets);

        assert_eq!(
            series[0].days.iter().map(|d| d.sets).sum::<u32>() as usize,
            rows.len()
        );
        assert_eq!(series[0].days[0].sets, 3);
        assert_eq!(series[0].days[0].reps, 30);
        assert_approx_eq!(f64::from(series[0].days[0].volume), 80.0);
    }

    #[test]
    fn test_aggregate_exercises_large_reps() {
        let sets = enrich(
            vec![
                set(1, "Plank", 0.0, 4_000_000_000),
                set(1, "Plank", 0.0, 4_000_000_000),
            ],
            &Metadata::default(),
        );

        let series = aggregate_exercises(&sets);

        assert_eq!(series[0].days[0].reps, 8_000_000_000);
        assert_eq!(series[0].days[0].sets, 2);
    }

    #[test]
    fn test_aggregate_exercises_volume_precision() {
        let sets = enrich(
            std::iter::repeat_n(set(1, "Curl", 22.7, 7), 200).collect(),
            &Metadata::default(),
        );

        let series = aggregate_exercises(&sets);

        assert_approx_eq!(f64::from(series[0].days[0].volume), 31780.0);
    }

    #[test]
    fn test_aggregate_muscle_groups() {
        let sets = enrich(
            vec![
                set(1, "Bench Press", 100.0, 10),
                set(1, "Bench Press", 100.0, 8),
                set(1, "Dips", 0.0, 12),
                set(2, "Skull Crusher", 30.0, 10),
                set(3, "Unknown", 10.0, 10),
            ],
            &metadata(),
        );

        assert_eq!(
            aggregate_muscle_groups(&sets),
            vec![
                MuscleGroupSeries {
                    muscle_group: MuscleGroup::new("Chest").unwrap(),
                    primary: vec![SetCount {
                        date: date(1),
                        sets: 2
                    }],
                    secondary: vec![SetCount {
                        date: date(1),
                        sets: 1
                    }],
                    mrv: Some(22.0),
                    mev: Some(8.0),
                },
                MuscleGroupSeries {
                    muscle_group: MuscleGroup::new("Triceps").unwrap(),
                    primary: vec![
                        SetCount {
                            date: date(1),
                            sets: 1
                        },
                        SetCount {
                            date: date(2),
                            sets: 1
                        }
                    ],
                    secondary: vec![SetCount {
                        date: date(1),
                        sets: 2
                    }],
                    mrv: Some(18.0),
                    mev: Some(6.0),
                },
            ]
        );
    }

    #[test]
    fn test_aggregate_muscle_groups_without_primary_role() {
        let sets = enrich(vec![set(5, "Face Pull", 20.0, 15)], &metadata());

        let series = aggregate_muscle_groups(&sets);

        assert_eq!(
            series
                .iter()
                .map(|s| s.muscle_group.to_string())
                .collect::<Vec<_>>(),
            vec!["Rear Delts", "Traps"]
        );
        let traps = &series[1];
        assert_eq!(traps.primary, vec![]);
        assert_eq!(
            traps.sets(Role::Secondary),
            &[SetCount {
                date: date(5),
                sets: 1
            }]
        );
        assert_eq!(traps.mrv, None);
        assert_eq!(traps.mev, None);
    }

    #[test]
    fn test_aggregate_muscle_groups_ignores_unknown_exercises() {
        let sets = enrich(vec![set(1, "Unknown", 10.0, 10)], &metadata());

        assert_eq!(aggregate_muscle_groups(&sets), vec![]);
        assert_eq!(aggregate_exercises(&sets).len(), 1);
    }
}
