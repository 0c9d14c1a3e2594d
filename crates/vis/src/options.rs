//! Chart.js options for the dashboard line charts.
//!
//! The structs serialize to the option names of the charting library. The
//! callbacks the library expects (tick labels and value formatting) cannot be
//! expressed in JSON, so they are carried as [`TickFormat`] and
//! [`ValueFormat`] and installed by the renderer.

use serde::Serialize;

use crate::label::day_label;
use crate::label::format_number;
use crate::label::month_label;
use crate::theme::Palette;

const FONT_SIZE: u32 = 11;
const MAX_TICKS_LIMIT: u32 = 12;
const MAX_ROTATION: u32 = 45;
const TOOLTIP_BORDER_WIDTH: u32 = 1;
const TOOLTIP_PADDING: u32 = 12;
const TOOLTIP_CORNER_RADIUS: u32 = 8;

/// Builds [ChartOptions] from a palette and the axis formatting choices.
pub struct ChartConfigBuilder;

impl ChartConfigBuilder {
    /// Composes the options of a dashboard line chart.
    ///
    /// `axis_suffix` is appended to every formatted value on the Y axis and
    /// in the tooltips; `use_day_format` selects daily instead of monthly
    /// X axis labels.
    pub fn build(palette: &Palette, axis_suffix: &str, use_day_format: bool) -> ChartOptions {
        let value_format = ValueFormat::new(axis_suffix);
        let tick_format = if use_day_format {
            TickFormat::Day
        } else {
            TickFormat::Month
        };

        ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            interaction: Interaction {
                mode: InteractionMode::Index,
                intersect: false,
            },
            plugins: Plugins {
                legend: Legend { display: false },
                tooltip: Tooltip {
                    background_color: palette.tooltip_background,
                    title_color: palette.tooltip_text,
                    body_color: palette.tooltip_text,
                    border_color: palette.grid,
                    border_width: TOOLTIP_BORDER_WIDTH,
                    padding: TOOLTIP_PADDING,
                    corner_radius: TOOLTIP_CORNER_RADIUS,
                },
            },
            scales: Scales {
                x: XScale {
                    ticks: XTicks {
                        color: palette.text,
                        font: Font { size: FONT_SIZE },
                        max_rotation: MAX_ROTATION,
                        max_ticks_limit: MAX_TICKS_LIMIT,
                    },
                    grid: XGrid { display: false },
                },
                y: YScale {
                    ticks: YTicks {
                        color: palette.text,
                        font: Font { size: FONT_SIZE },
                    },
                    grid: YGrid { color: palette.grid },
                },
            },
            value_format,
            tick_format,
        }
    }
}

/// The options of a dashboard line chart.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    /// Whether the chart resizes with its container.
    pub responsive: bool,
    /// Whether the canvas keeps its aspect ratio when resized.
    pub maintain_aspect_ratio: bool,
    /// How hovering selects points.
    pub interaction: Interaction,
    /// The legend and tooltip options.
    pub plugins: Plugins,
    /// The axes.
    pub scales: Scales,
    /// Formats the Y axis ticks and the tooltip values.
    #[serde(skip)]
    pub value_format: ValueFormat,
    /// Formats the X axis tick labels.
    #[serde(skip)]
    pub tick_format: TickFormat,
}

/// How hovering selects points.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    /// The selection mode.
    pub mode: InteractionMode,
    /// Whether the pointer must be over a point to select it.
    pub intersect: bool,
}

/// The points selected on hover.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Every point at the same index.
    Index,
}

/// The plugin options.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Plugins {
    /// The legend.
    pub legend: Legend,
    /// The hover tooltip.
    pub tooltip: Tooltip,
}

/// The legend options.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    /// Whether the legend is shown.
    pub display: bool,
}

/// The tooltip colors and box.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    /// The box fill.
    pub background_color: &'static str,
    /// The color of the date line.
    pub title_color: &'static str,
    /// The color of the value line.
    pub body_color: &'static str,
    /// The box border color.
    pub border_color: &'static str,
    /// The box border width in pixels.
    pub border_width: u32,
    /// The inner padding in pixels.
    pub padding: u32,
    /// The corner radius in pixels.
    pub corner_radius: u32,
}

/// The chart axes.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Scales {
    /// The date axis.
    pub x: XScale,
    /// The value axis.
    pub y: YScale,
}

/// The date axis.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct XScale {
    /// The tick labels.
    pub ticks: XTicks,
    /// The vertical grid lines.
    pub grid: XGrid,
}

/// The date axis tick labels.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct XTicks {
    /// The label color.
    pub color: &'static str,
    /// The label font.
    pub font: Font,
    /// The maximum label rotation in degrees.
    pub max_rotation: u32,
    /// The maximum number of labels shown.
    pub max_ticks_limit: u32,
}

/// The vertical grid lines.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct XGrid {
    /// Whether the lines are drawn.
    pub display: bool,
}

/// The value axis.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct YScale {
    /// The tick labels.
    pub ticks: YTicks,
    /// The horizontal grid lines.
    pub grid: YGrid,
}

/// The value axis tick labels.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct YTicks {
    /// The label color.
    pub color: &'static str,
    /// The label font.
    pub font: Font,
}

/// The horizontal grid lines.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct YGrid {
    /// The line color.
    pub color: &'static str,
}

/// A label font.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    /// The size in pixels.
    pub size: u32,
}

/// The text shown in place of a missing value.
pub const MISSING_VALUE: &str = "s/d";

/// Formats values with Spanish separators followed by a suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueFormat {
    suffix: String,
}

impl ValueFormat {
    /// Creates a formatter appending `suffix` to every value.
    pub fn new(suffix: &str) -> ValueFormat {
        Self {
            suffix: suffix.to_owned(),
        }
    }

    /// Returns the suffix appended to every value.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Formats `value`, e.g. `1234.5` with suffix `"%"` becomes `"1.234,5%"`.
    /// A missing value is shown as [MISSING_VALUE], without the suffix.
    pub fn format(&self, value: Option<f64>) -> String {
        match value {
            Some(value) => format!("{}{}", format_number(value), self.suffix),
            None => MISSING_VALUE.to_owned(),
        }
    }
}

/// The granularity of the X axis labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TickFormat {
    /// `YYYY-MM-DD` labels shown as `DD/MM`.
    Day,
    /// `YYYY-MM` labels shown as `<Mmm> <YY>`.
    #[default]
    Month,
}

impl TickFormat {
    /// Formats a raw date label.
    pub fn format(&self, label: &str) -> String {
        match self {
            TickFormat::Day => day_label(label),
            TickFormat::Month => month_label(label),
        }
    }
}
