use std::borrow::BorrowMut;

use chrono::{Days, NaiveDate};
use plotters::{
    chart::{ChartBuilder, SeriesLabelPosition},
    element::PathElement,
    prelude::{Circle, IntoDrawingArea, SVGBackend},
    series::LineSeries,
    style::{Color, IntoFont, Palette, Palette99, RGBColor, ShapeStyle, TextStyle, WHITE},
};

use crate::Theme;

pub const COLOR_VOLUME: usize = 6;
pub const COLOR_REPS: usize = 4;
pub const COLOR_PRIMARY_SETS: usize = 3;
pub const COLOR_SECONDARY_SETS: usize = 0;
pub const COLOR_MRV: usize = 1;
pub const COLOR_MEV: usize = 1;

pub const OPACITY_LINE: f64 = 0.9;
pub const OPACITY_REFERENCE: f64 = 0.5;

pub const WIDTH_LINE: u32 = 2;
pub const WIDTH_REFERENCE: u32 = 1;
pub const SIZE_MARKER: u32 = 3;

pub const FONT: (&str, u32) = ("sans-serif", 13);
pub const FONT_CAPTION: (&str, u32) = ("sans-serif", 16);

#[derive(Clone)]
pub enum PlotType {
    Circle(usize, f64, u32),
    Line(usize, f64, u32),
}

#[must_use]
pub fn plot_line_with_markers(color: usize) -> Vec<PlotType> {
    vec![
        PlotType::Line(color, OPACITY_LINE, WIDTH_LINE),
        PlotType::Circle(color, OPACITY_LINE, SIZE_MARKER),
    ]
}

#[must_use]
pub fn plot_reference(color: usize) -> Vec<PlotType> {
    vec![PlotType::Line(color, OPACITY_REFERENCE, WIDTH_REFERENCE)]
}

#[derive(Default, Clone, Copy)]
pub struct PlotParams {
    pub y_min_opt: Option<f32>,
    pub secondary: bool,
}

impl PlotParams {
    pub const PRIMARY: Self = Self {
        y_min_opt: Some(0.),
        secondary: false,
    };

    pub const SECONDARY: Self = Self {
        y_min_opt: Some(0.),
        secondary: true,
    };
}

#[derive(Clone)]
pub struct PlotData {
    pub label: String,
    pub values: Vec<(NaiveDate, f32)>,
    pub plots: Vec<PlotType>,
    pub params: PlotParams,
}

impl PlotData {
    /// A horizontal line at `value` spanning the whole interval.
    #[must_use]
    pub fn reference(label: &str, value: f32, interval: &Interval, color: usize) -> Self {
        Self {
            label: label.to_string(),
            values: vec![(interval.first, value), (interval.last, value)],
            plots: plot_reference(color),
            params: PlotParams::PRIMARY,
        }
    }
}

/// The date range shown on the x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Interval {
    /// Smallest interval containing all dates.
    ///
    /// A single date is padded by one day on each side.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        let mut dates = dates.into_iter();
        let first_date = dates.next()?;
        let (first, last) = dates.fold((first_date, first_date), |(first, last), d| {
            (first.min(d), last.max(d))
        });

        if first == last {
            return Some(Interval {
                first: first.checked_sub_days(Days::new(1)).unwrap_or(first),
                last: last.checked_add_days(Days::new(1)).unwrap_or(last),
            });
        }

        Some(Interval { first, last })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub theme: Theme,
}

#[derive(Clone, Copy, Default)]
struct Bounds {
    min: f32,
    max: f32,
}

impl Bounds {
    fn min_with_margin(self) -> f32 {
        if self.min.abs() <= f32::EPSILON {
            return self.min;
        }
        self.min - self.margin()
    }

    fn max_with_margin(self) -> f32 {
        self.max + self.margin()
    }

    fn margin(self) -> f32 {
        if (self.max - self.min).abs() > f32::EPSILON {
            return (self.max - self.min) * 0.1;
        }
        0.1
    }
}

/// Plot data onto an SVG chart.
///
/// The x domain of the chart is configured by the interval parameter.
///
/// Every `PlotData` element of the data parameter is an independent series,
/// listed in the legend under its label. The `plots` element is a list of
/// plots to perform on the series:
///
///   - Circle: plot a circle with the given color and size for each element
///   - Line: plot the series as a line with the given color and thickness
///
/// The `params` element of `PlotData` configures the y domain and determines
/// whether the series is plotted for the primary or secondary axis of the
/// chart. If `data` contains no series for the secondary axis, the secondary
/// axis is omitted.
///
/// Series are plotted in order, and for every series all plots in order.
#[allow(clippy::missing_errors_doc)]
pub fn plot(
    caption: &str,
    data: &[PlotData],
    interval: &Interval,
    options: &ChartOptions,
) -> Result<String, Box<dyn std::error::Error>> {
    let (primary_bounds, secondary_bounds) = determine_y_bounds(data);
    let primary_bounds = primary_bounds.unwrap_or(Bounds { min: 0., max: 1. });

    let mut result = String::new();

    {
        let root =
            SVGBackend::with_string(&mut result, (options.width, options.height)).into_drawing_area();
        let (color, background_color) = colors(options.theme);

        root.fill(&background_color)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, FONT_CAPTION.into_font().color(&color))
            .margin(10f32)
            .x_label_area_size(30f32)
            .y_label_area_size(50f32)
            .right_y_label_area_size(secondary_bounds.map_or_else(|| 0f32, |_| 50f32))
            .build_cartesian_2d(
                interval.first..interval.last,
                primary_bounds.min_with_margin()..primary_bounds.max_with_margin(),
            )?
            .set_secondary_coord(
                interval.first..interval.last,
                secondary_bounds
                    .as_ref()
                    .map_or(0.0..0.0, |b| b.min_with_margin()..b.max_with_margin()),
            );

        chart
            .configure_mesh()
            .disable_x_mesh()
            .set_all_tick_mark_size(3u32)
            .axis_style(color.mix(0.3))
            .bold_line_style(color.mix(0.05))
            .light_line_style(color.mix(0.0))
            .label_style(TextStyle::from(FONT.into_font()).color(&color))
            .x_labels(4)
            .y_labels(6)
            .draw()?;

        if secondary_bounds.is_some() {
            chart
                .configure_secondary_axes()
                .set_all_tick_mark_size(3u32)
                .axis_style(color.mix(0.3))
                .label_style(TextStyle::from(FONT.into_font()).color(&color))
                .draw()?;
        }

        for plot_data in data {
            let mut values = plot_data.values.clone();
            values.sort_by_key(|e| e.0);

            for (i, plot) in plot_data.plots.iter().enumerate() {
                let labelled = i == 0;
                match *plot {
                    PlotType::Circle(color, opacity, size) => {
                        let style = Palette99::pick(color).mix(opacity).filled();
                        let data = values
                            .iter()
                            .map(|(x, y)| Circle::new((*x, *y), size, style));
                        let anno = if plot_data.params.secondary {
                            chart.draw_secondary_series(data)?
                        } else {
                            chart.draw_series(data)?
                        };
                        if labelled {
                            anno.label(plot_data.label.as_str())
                                .legend(move |(x, y)| Circle::new((x + 10, y), size, style));
                        }
                    }
                    PlotType::Line(color, opacity, size) => {
                        let style: ShapeStyle =
                            Palette99::pick(color).mix(opacity).stroke_width(size);
                        let data = LineSeries::new(values.iter().map(|(x, y)| (*x, *y)), style);
                        let anno = if plot_data.params.secondary {
                            chart.draw_secondary_series(data)?
                        } else {
                            chart.draw_series(data)?
                        };
                        if labelled {
                            anno.label(plot_data.label.as_str()).legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 20, y)], style)
                            });
                        }
                    }
                }
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(background_color.mix(0.8))
            .border_style(color.mix(0.3))
            .label_font(TextStyle::from(FONT.into_font()).color(&color))
            .draw()?;

        root.present()?;
    }

    Ok(result)
}

fn colors(theme: Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(20, 22, 26);
    match theme {
        Theme::Light => (dark, WHITE),
        Theme::Dark => (WHITE, dark),
    }
}

fn determine_y_bounds(data: &[PlotData]) -> (Option<Bounds>, Option<Bounds>) {
    let mut primary_bounds: Option<Bounds> = None;
    let mut secondary_bounds: Option<Bounds> = None;

    for plot in data.iter().filter(|plot| !plot.values.is_empty()) {
        let min = plot
            .values
            .iter()
            .map(|(_, v)| *v)
            .fold(plot.params.y_min_opt.unwrap_or(f32::MAX), f32::min);
        let max = plot
            .values
            .iter()
            .map(|(_, v)| *v)
            .fold(0., f32::max);

        let b = if plot.params.secondary {
            secondary_bounds.borrow_mut()
        } else {
            primary_bounds.borrow_mut()
        }
        .get_or_insert(Bounds { min, max });

        b.min = f32::min(b.min, min);
        b.max = f32::max(b.max, max);
    }

    (primary_bounds, secondary_bounds)
}
