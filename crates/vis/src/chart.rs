//! Line charts bound to the drawing surfaces of a [`View`].

use std::error::Error;
use std::fmt::Display;

use serde::Serialize;

use crate::layout::View;
use crate::options::ChartConfigBuilder;
use crate::options::ChartOptions;
use crate::theme::ThemeResolver;

pub use crate::id::ChartId;

/// Opacity of the gradient fill right below the line.
pub const GRADIENT_TOP_ALPHA: f64 = 0.25;

/// Opacity of the gradient fill at the bottom of the chart.
pub const GRADIENT_BOTTOM_ALPHA: f64 = 0.02;

/// Height in pixels over which the gradient fades out.
pub const GRADIENT_HEIGHT: u32 = 280;

const BORDER_WIDTH: f64 = 2.5;
const POINT_RADIUS: u32 = 0;
const POINT_HOVER_RADIUS: u32 = 5;
const POINT_HOVER_BORDER_COLOR: &str = "#fff";
const POINT_HOVER_BORDER_WIDTH: u32 = 2;
const TENSION: f64 = 0.3;

/// The error type for building a [Series].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// The labels and the values have different lengths.
    LengthMismatch {
        /// The number of labels.
        labels: usize,
        /// The number of values.
        values: usize,
    },
}

impl Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::LengthMismatch { labels, values } => write!(
                f,
                "series error: {labels} labels do not match {values} values"
            ),
        }
    }
}

impl Error for SeriesError {}

/// Chronologically ordered date labels with their values.
///
/// A missing value is kept as `None` and drawn as a gap in the line.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Series {
    labels: Vec<String>,
    values: Vec<Option<f64>>,
}

impl Series {
    /// Creates a series from index-aligned labels and values.
    pub fn new(labels: Vec<String>, values: Vec<Option<f64>>) -> Result<Series, SeriesError> {
        if labels.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }

        Ok(Self { labels, values })
    }

    /// Returns the date labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the values.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates over the `(label, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Returns the most recent point.
    pub fn last(&self) -> Option<(&str, Option<f64>)> {
        self.iter().last()
    }
}

impl<L, V> FromIterator<(L, V)> for Series
where
    L: Into<String>,
    V: Into<Option<f64>>,
{
    fn from_iter<T: IntoIterator<Item = (L, V)>>(iter: T) -> Self {
        let (labels, values) = iter
            .into_iter()
            .map(|(label, value)| (label.into(), value.into()))
            .unzip();

        Self { labels, values }
    }
}

/// Derives a translucent variant of an `rgb(...)` color,
/// e.g. `rgb(255, 193, 7)` becomes `rgba(255, 193, 7, 0.25)`.
///
/// Colors without an `rgb` prefix or closing parenthesis are changed only
/// where the pattern matches.
pub fn translucent(color: &str, alpha: f64) -> String {
    color
        .replacen(')', &format!(", {alpha})"), 1)
        .replacen("rgb", "rgba", 1)
}

/// A vertical gradient from the top of the surface.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Gradient {
    /// The distance in pixels over which the gradient runs.
    pub height: u32,
    /// The color stops as `(offset, color)` pairs.
    pub stops: Vec<(f64, String)>,
}

impl Gradient {
    /// Creates the fill below a line of the given color.
    pub fn under_line(color: &str) -> Gradient {
        Self {
            height: GRADIENT_HEIGHT,
            stops: vec![
                (0.0, translucent(color, GRADIENT_TOP_ALPHA)),
                (1.0, translucent(color, GRADIENT_BOTTOM_ALPHA)),
            ],
        }
    }
}

/// A line of a chart, serialized as a Chart.js dataset.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// The values; `None` serializes to `null`, which the library draws
    /// as a gap.
    pub data: Vec<Option<f64>>,
    /// The line color.
    pub border_color: String,
    /// The line width in pixels.
    pub border_width: f64,
    /// The point radius; `0` hides the points.
    pub point_radius: u32,
    /// The point radius on hover.
    pub point_hover_radius: u32,
    /// The point fill on hover.
    pub point_hover_background_color: String,
    /// The point border on hover.
    pub point_hover_border_color: &'static str,
    /// The point border width on hover.
    pub point_hover_border_width: u32,
    /// The bezier curve tension of the line.
    pub tension: f64,
    /// Whether the area below the line is filled.
    pub fill: bool,
    /// The gradient is created on the canvas by the renderer.
    #[serde(skip)]
    pub gradient: Gradient,
}

impl Dataset {
    fn line(values: &[Option<f64>], color: &str) -> Dataset {
        Self {
            data: values.to_vec(),
            border_color: color.to_owned(),
            border_width: BORDER_WIDTH,
            point_radius: POINT_RADIUS,
            point_hover_radius: POINT_HOVER_RADIUS,
            point_hover_background_color: color.to_owned(),
            point_hover_border_color: POINT_HOVER_BORDER_COLOR,
            point_hover_border_width: POINT_HOVER_BORDER_WIDTH,
            tension: TENSION,
            fill: true,
            gradient: Gradient::under_line(color),
        }
    }
}

/// The labels and lines of a chart.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChartData {
    /// The raw X axis labels.
    pub labels: Vec<String>,
    /// The lines drawn.
    pub datasets: Vec<Dataset>,
}

/// The chart type.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// A line chart.
    #[default]
    Line,
}

/// The configuration handed to the charting library.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// The chart type.
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// The labels and lines.
    pub data: ChartData,
    /// The chart options.
    pub options: ChartOptions,
}

/// A chart rendered onto a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    id: ChartId,
    surface_id: String,
    /// The configuration handed to the charting library.
    pub spec: ChartSpec,
}

impl Chart {
    /// Returns the chart identifier.
    pub fn id(&self) -> ChartId {
        self.id
    }

    /// Returns the identifier of the surface the chart is drawn on.
    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    /// Returns the X axis labels as the chart shows them.
    pub fn tick_labels(&self) -> Vec<String> {
        let format = self.spec.options.tick_format;

        self.spec
            .data
            .labels
            .iter()
            .map(|label| format.format(label))
            .collect()
    }
}

/// A handle to a chart bound to a surface of a [View].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartHandle {
    id: ChartId,
    surface_id: String,
}

impl ChartHandle {
    /// Returns the chart identifier.
    pub fn id(&self) -> ChartId {
        self.id
    }

    /// Returns the identifier of the surface the chart is drawn on.
    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }
}

/// Creates line charts on the surfaces of a [View].
pub struct ChartFactory;

impl ChartFactory {
    /// Draws a line chart of `series` onto the surface named `surface_id`.
    ///
    /// Returns `None`, leaving the view untouched, if the view has no such
    /// surface. An existing chart on the surface is replaced.
    pub fn create(
        view: &mut View,
        surface_id: &str,
        series: &Series,
        line_color: &str,
        axis_suffix: &str,
        use_day_format: bool,
    ) -> Option<ChartHandle> {
        let palette = ThemeResolver::resolve(view.theme().as_flag());
        let surface = view.surface_mut(surface_id)?;

        let options = ChartConfigBuilder::build(&palette, axis_suffix, use_day_format);
        let spec = ChartSpec {
            kind: ChartKind::Line,
            data: ChartData {
                labels: series.labels().to_vec(),
                datasets: vec![Dataset::line(series.values(), line_color)],
            },
            options,
        };

        let chart = Chart {
            id: ChartId::next(),
            surface_id: surface_id.to_owned(),
            spec,
        };
        let handle = ChartHandle {
            id: chart.id,
            surface_id: chart.surface_id.clone(),
        };

        tracing::debug!(
            "drawing {} points on the `{surface_id}` surface",
            series.len()
        );
        surface.draw(chart);

        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Surface;
    use crate::options::TickFormat;
    use crate::theme::Theme;

    fn series() -> Series {
        Series::from_iter([("2024-01", 20.6), ("2024-02", 13.2), ("2024-03", 11.0)])
    }

    fn view(theme: Theme) -> View {
        View::new("Cotizaciones", theme.into()).add_surface(Surface::new("chart-inflacion", "Inflación"))
    }

    #[test]
    fn translucent_derives_the_gradient_stops() {
        let gradient = Gradient::under_line("rgb(255, 193, 7)");

        assert_eq!(gradient.height, 280);
        assert_eq!(
            gradient.stops,
            vec![
                (0.0, String::from("rgba(255, 193, 7, 0.25)")),
                (1.0, String::from("rgba(255, 193, 7, 0.02)")),
            ]
        );
    }

    #[test]
    fn translucent_leaves_other_colors_mostly_alone() {
        assert_eq!(translucent("#ff0000", 0.25), "#ff0000");
        assert_eq!(translucent("rgba(1, 2, 3)", 0.5), "rgbaa(1, 2, 3, 0.5)");
    }

    #[test]
    fn series_rejects_misaligned_vectors() {
        let result = Series::new(vec![String::from("2024-01")], vec![Some(1.0), Some(2.0)]);

        assert_eq!(
            result,
            Err(SeriesError::LengthMismatch {
                labels: 1,
                values: 2
            })
        );
    }

    #[test]
    fn create_returns_none_for_a_missing_surface() {
        let mut view = view(Theme::Light);
        let before = view.clone();

        let handle = ChartFactory::create(
            &mut view,
            "nonexistent-id",
            &series(),
            "rgb(255, 193, 7)",
            "%",
            false,
        );

        assert!(handle.is_none());
        assert_eq!(view, before);
    }

    #[test]
    fn create_draws_a_line_chart_on_the_surface() {
        let mut view = view(Theme::Dark);

        let handle = ChartFactory::create(
            &mut view,
            "chart-inflacion",
            &series(),
            "rgb(255, 193, 7)",
            "%",
            false,
        )
        .expect("the surface exists");

        let chart = view.chart(&handle).expect("the chart was drawn");
        assert_eq!(chart.surface_id(), "chart-inflacion");
        assert_eq!(chart.spec.kind, ChartKind::Line);
        assert_eq!(chart.spec.data.labels, ["2024-01", "2024-02", "2024-03"]);
        assert_eq!(chart.tick_labels(), ["Ene 24", "Feb 24", "Mar 24"]);
        assert_eq!(chart.spec.options.tick_format, TickFormat::Month);
        assert_eq!(chart.spec.options.value_format.suffix(), "%");
        assert_eq!(chart.spec.options.scales.x.ticks.color, "#b8bcc4");

        let dataset = &chart.spec.data.datasets[0];
        assert_eq!(dataset.data, [Some(20.6), Some(13.2), Some(11.0)]);
        assert_eq!(dataset.border_color, "rgb(255, 193, 7)");
        assert_eq!(dataset.point_hover_background_color, "rgb(255, 193, 7)");
        assert_eq!(dataset.gradient.stops[0].1, "rgba(255, 193, 7, 0.25)");
        assert!(dataset.fill);
    }

    #[test]
    fn create_replaces_the_previous_chart() {
        let mut view = view(Theme::Light);

        let first =
            ChartFactory::create(&mut view, "chart-inflacion", &series(), "rgb(1, 2, 3)", "", true)
                .expect("the surface exists");
        let second =
            ChartFactory::create(&mut view, "chart-inflacion", &series(), "rgb(4, 5, 6)", "", true)
                .expect("the surface exists");

        assert!(view.chart(&first).is_none());
        assert_eq!(view.chart(&second).map(Chart::id), Some(second.id()));
    }

    #[test]
    fn missing_values_serialize_as_gaps() -> Result<(), serde_json::Error> {
        let mut view = view(Theme::Light);
        let series = Series::from_iter([("2024-02-01", Some(690.5)), ("2024-02-02", None)]);

        let handle =
            ChartFactory::create(&mut view, "chart-inflacion", &series, "rgb(1, 2, 3)", "", true)
                .expect("the surface exists");
        let chart = view.chart(&handle).expect("the chart was drawn");

        let json = serde_json::to_value(&chart.spec.data.datasets[0].data)?;
        assert_eq!(json, serde_json::json!([690.5, null]));
        assert_eq!(series.last(), Some(("2024-02-02", None)));

        Ok(())
    }
}
