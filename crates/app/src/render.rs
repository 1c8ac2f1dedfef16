use gainz_domain::{ExerciseDailySeries, MuscleGroupSeries, NamedSeries, Role, SetCount};
use strum::IntoEnumIterator;

use crate::{
    Artifact,
    chart::{self, ChartOptions, Interval, PlotData, PlotParams},
};

/// Turns aggregated series into artifacts.
pub trait Renderer {
    fn render(&self, series: &NamedSeries) -> Result<Artifact, RenderError>;
}

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("no data to render for {0}")]
    NoData(String),
    #[error("failed to render {name}: {reason}")]
    Chart { name: String, reason: String },
}

pub struct SvgRenderer {
    options: ChartOptions,
}

impl SvgRenderer {
    #[must_use]
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, series: &NamedSeries) -> Result<Artifact, RenderError> {
        let name = series.name();
        let (data, interval) = match series {
            NamedSeries::Exercise(series) => exercise_plot_data(series),
            NamedSeries::MuscleGroup(series) => muscle_group_plot_data(series),
        }
        .ok_or_else(|| RenderError::NoData(name.clone()))?;

        let svg = chart::plot(&name, &data, &interval, &self.options).map_err(|err| {
            RenderError::Chart {
                name: name.clone(),
                reason: err.to_string(),
            }
        })?;

        log::debug!("rendered {name}");

        Ok(Artifact::svg(name, svg))
    }
}

/// Volume on the primary axis, reps on the secondary axis.
fn exercise_plot_data(series: &ExerciseDailySeries) -> Option<(Vec<PlotData>, Interval)> {
    let interval = Interval::from_dates(series.days.iter().map(|d| d.date))?;

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let data = vec![
        PlotData {
            label: "Volume".to_string(),
            values: series
                .days
                .iter()
                .map(|d| (d.date, f64::from(d.volume) as f32))
                .collect(),
            plots: chart::plot_line_with_markers(chart::COLOR_VOLUME),
            params: PlotParams::PRIMARY,
        },
        PlotData {
            label: "Reps".to_string(),
            values: series.days.iter().map(|d| (d.date, d.reps as f32)).collect(),
            plots: chart::plot_line_with_markers(chart::COLOR_REPS),
            params: PlotParams::SECONDARY,
        },
    ];

    Some((data, interval))
}

/// Set counts per role, with MRV and MEV as reference lines if known.
fn muscle_group_plot_data(series: &MuscleGroupSeries) -> Option<(Vec<PlotData>, Interval)> {
    let interval = Interval::from_dates(
        series
            .primary
            .iter()
            .chain(&series.secondary)
            .map(|s| s.date),
    )?;

    let mut data = Role::iter()
        .map(|role| PlotData {
            label: role.to_string(),
            values: set_values(series.sets(role)),
            plots: chart::plot_line_with_markers(match role {
                Role::Primary => chart::COLOR_PRIMARY_SETS,
                Role::Secondary => chart::COLOR_SECONDARY_SETS,
            }),
            params: PlotParams::PRIMARY,
        })
        .collect::<Vec<_>>();

    if let Some(mrv) = series.mrv {
        data.push(PlotData::reference("MRV", mrv, &interval, chart::COLOR_MRV));
    }
    if let Some(mev) = series.mev {
        data.push(PlotData::reference("MEV", mev, &interval, chart::COLOR_MEV));
    }

    Some((data, interval))
}

#[allow(clippy::cast_precision_loss)]
fn set_values(sets: &[SetCount]) -> Vec<(chrono::NaiveDate, f32)> {
    sets.iter().map(|s| (s.date, s.sets as f32)).collect()
}
