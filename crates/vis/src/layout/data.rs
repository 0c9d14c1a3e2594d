//! The dashboard data and how it maps onto the page.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::chart::ChartFactory;
use crate::chart::ChartHandle;
use crate::chart::Series;
use crate::chart::SeriesError;
use crate::error::Result;
use crate::label::format_timestamp;
use crate::layout::Card;
use crate::layout::View;
use crate::options::ValueFormat;

/// The series shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Monthly inflation.
    Inflation,
    /// Year-over-year inflation.
    InflationYearOverYear,
    /// The UVA index.
    Uva,
    /// The country-risk index.
    CountryRisk,
}

/// How a series is drawn on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSlot {
    /// The series drawn.
    pub kind: SeriesKind,
    /// The surface the series is drawn on.
    pub surface_id: &'static str,
    /// The caption of the surface.
    pub title: &'static str,
    /// The `rgb(...)` line color.
    pub color: &'static str,
    /// The suffix of the formatted values.
    pub suffix: &'static str,
    /// Whether the labels are daily dates instead of months.
    pub use_day_format: bool,
}

/// The dashboard charts in display order.
pub const CHART_SLOTS: [ChartSlot; 4] = [
    ChartSlot {
        kind: SeriesKind::Inflation,
        surface_id: "chart-inflacion",
        title: "Inflación mensual",
        color: "rgb(255, 193, 7)",
        suffix: "%",
        use_day_format: false,
    },
    ChartSlot {
        kind: SeriesKind::InflationYearOverYear,
        surface_id: "chart-inflacion-ia",
        title: "Inflación interanual",
        color: "rgb(253, 126, 20)",
        suffix: "%",
        use_day_format: false,
    },
    ChartSlot {
        kind: SeriesKind::Uva,
        surface_id: "chart-uva",
        title: "UVA",
        color: "rgb(140, 79, 159)",
        suffix: "",
        use_day_format: true,
    },
    ChartSlot {
        kind: SeriesKind::CountryRisk,
        surface_id: "chart-riesgo",
        title: "Riesgo país",
        color: "rgb(220, 53, 69)",
        suffix: "",
        use_day_format: true,
    },
];

/// A dated value of an index, as the index API returns it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct IndexValue {
    /// The date of the value.
    #[serde(rename = "fecha")]
    pub date: String,
    /// The value; `None` when the source has no value for the date.
    #[serde(rename = "valor")]
    pub value: Option<f64>,
}

/// The data injected into the dashboard page: four parallel label and
/// value arrays and the latest value of each index.
///
/// A `null` value is kept and drawn as a gap.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DashboardData {
    /// The months of the monthly inflation series.
    #[serde(rename = "inflLabels")]
    pub inflation_labels: Vec<String>,
    /// The monthly inflation, in percent.
    #[serde(rename = "inflValores")]
    pub inflation_values: Vec<Option<f64>>,
    /// The months of the year-over-year inflation series.
    #[serde(rename = "inflIaLabels")]
    pub inflation_yoy_labels: Vec<String>,
    /// The year-over-year inflation, in percent.
    #[serde(rename = "inflIaValores")]
    pub inflation_yoy_values: Vec<Option<f64>>,
    /// The days of the UVA series.
    #[serde(rename = "uvaLabels")]
    pub uva_labels: Vec<String>,
    /// The UVA index.
    #[serde(rename = "uvaValores")]
    pub uva_values: Vec<Option<f64>>,
    /// The days of the country-risk series.
    #[serde(rename = "riesgoLabels")]
    pub risk_labels: Vec<String>,
    /// The country-risk index.
    #[serde(rename = "riesgoValores")]
    pub risk_values: Vec<Option<f64>>,
    /// The latest monthly inflation.
    #[serde(rename = "ultimaInflacion", skip_serializing_if = "Option::is_none")]
    pub latest_inflation: Option<IndexValue>,
    /// The latest year-over-year inflation.
    #[serde(rename = "ultimaInflacionIa", skip_serializing_if = "Option::is_none")]
    pub latest_inflation_yoy: Option<IndexValue>,
    /// The latest UVA value.
    #[serde(rename = "ultimoUva", skip_serializing_if = "Option::is_none")]
    pub latest_uva: Option<IndexValue>,
    /// The latest country-risk value.
    #[serde(rename = "riesgoUltimo", skip_serializing_if = "Option::is_none")]
    pub latest_risk: Option<IndexValue>,
    /// The time the data was retrieved.
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl DashboardData {
    /// Reads the data from a JSON file. A missing file yields `None`.
    pub fn load(path: &Path) -> Result<Option<DashboardData>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let data = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Writes the data to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Returns the series of the given kind.
    pub fn series(&self, kind: SeriesKind) -> std::result::Result<Series, SeriesError> {
        let (labels, values) = match kind {
            SeriesKind::Inflation => (&self.inflation_labels, &self.inflation_values),
            SeriesKind::InflationYearOverYear => {
                (&self.inflation_yoy_labels, &self.inflation_yoy_values)
            }
            SeriesKind::Uva => (&self.uva_labels, &self.uva_values),
            SeriesKind::CountryRisk => (&self.risk_labels, &self.risk_values),
        };

        Series::new(labels.clone(), values.clone())
    }

    /// Replaces the series of the given kind.
    pub fn set_series(&mut self, kind: SeriesKind, series: Series) {
        let labels = series.labels().to_vec();
        let values = series.values().to_vec();

        match kind {
            SeriesKind::Inflation => {
                self.inflation_labels = labels;
                self.inflation_values = values;
            }
            SeriesKind::InflationYearOverYear => {
                self.inflation_yoy_labels = labels;
                self.inflation_yoy_values = values;
            }
            SeriesKind::Uva => {
                self.uva_labels = labels;
                self.uva_values = values;
            }
            SeriesKind::CountryRisk => {
                self.risk_labels = labels;
                self.risk_values = values;
            }
        }
    }

    /// Returns the latest value of the given kind.
    pub fn latest(&self, kind: SeriesKind) -> Option<&IndexValue> {
        match kind {
            SeriesKind::Inflation => self.latest_inflation.as_ref(),
            SeriesKind::InflationYearOverYear => self.latest_inflation_yoy.as_ref(),
            SeriesKind::Uva => self.latest_uva.as_ref(),
            SeriesKind::CountryRisk => self.latest_risk.as_ref(),
        }
    }

    /// Replaces the latest value of the given kind.
    pub fn set_latest(&mut self, kind: SeriesKind, value: Option<IndexValue>) {
        let latest = match kind {
            SeriesKind::Inflation => &mut self.latest_inflation,
            SeriesKind::InflationYearOverYear => &mut self.latest_inflation_yoy,
            SeriesKind::Uva => &mut self.latest_uva,
            SeriesKind::CountryRisk => &mut self.latest_risk,
        };

        *latest = value;
    }
}

/// Draws the dashboard charts.
pub struct Dashboard;

impl Dashboard {
    /// Draws every series of `data` onto its surface of `view`.
    ///
    /// Absent data draws nothing. Series with misaligned labels and values,
    /// and series whose surface is missing from the view, are skipped.
    pub fn populate(view: &mut View, data: Option<&DashboardData>) -> Vec<ChartHandle> {
        let Some(data) = data else {
            tracing::warn!("no dashboard data found, no charts are drawn");
            return Vec::new();
        };

        let mut handles = Vec::with_capacity(CHART_SLOTS.len());

        for slot in &CHART_SLOTS {
            let series = match data.series(slot.kind) {
                Ok(series) => series,
                Err(error) => {
                    tracing::warn!("skipping the `{}` chart: {error}", slot.surface_id);
                    continue;
                }
            };

            let handle = ChartFactory::create(
                view,
                slot.surface_id,
                &series,
                slot.color,
                slot.suffix,
                slot.use_day_format,
            );

            match handle {
                Some(handle) => handles.push(handle),
                None => tracing::debug!("the `{}` surface is missing", slot.surface_id),
            }
        }

        handles
    }

    /// Summarizes the latest value of every index present in `data`,
    /// formatted the way the matching chart formats its values.
    pub fn cards(data: Option<&DashboardData>) -> Vec<Card> {
        let Some(data) = data else {
            return Vec::new();
        };

        CHART_SLOTS
            .iter()
            .filter_map(|slot| {
                let latest = data.latest(slot.kind)?;
                let value = ValueFormat::new(slot.suffix).format(latest.value);
                let date = Some(latest.date.as_str())
                    .filter(|date| !date.is_empty())
                    .map(format_timestamp);

                Some(Card::new(slot.title, &value, date))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VisError;
    use crate::layout::Surface;
    use crate::refresh::DEFAULT_REFRESH_SECONDS;
    use crate::theme::Theme;

    const DATA: &str = r#"{
        "inflLabels": ["2024-01", "2024-02"],
        "inflValores": [20.6, 13.2],
        "inflIaLabels": ["2024-01", "2024-02"],
        "inflIaValores": [254.2, 276.2],
        "uvaLabels": ["2024-02-01", "2024-02-02", "2024-02-03"],
        "uvaValores": [690.5, 693.1, 695.8],
        "riesgoLabels": ["2024-02-01"],
        "riesgoValores": [1800],
        "ultimaInflacion": {"fecha": "2024-02-29", "valor": 13.2},
        "ultimoUva": {"fecha": "2024-02-03", "valor": 695.8},
        "riesgoUltimo": {"fecha": "2024-02-01", "valor": null}
    }"#;

    #[test]
    fn populate_draws_every_series() -> std::result::Result<(), serde_json::Error> {
        let data: DashboardData = serde_json::from_str(DATA)?;
        let mut view = View::dashboard(Theme::Light.into(), DEFAULT_REFRESH_SECONDS);

        let handles = Dashboard::populate(&mut view, Some(&data));

        assert_eq!(handles.len(), 4);

        let uva = view.chart(&handles[2]).expect("the UVA chart is drawn");
        assert_eq!(uva.tick_labels(), ["01/02", "02/02", "03/02"]);
        assert_eq!(uva.spec.options.value_format.suffix(), "");

        let inflation = view.chart(&handles[0]).expect("the inflation chart is drawn");
        assert_eq!(inflation.tick_labels(), ["Ene 24", "Feb 24"]);
        assert_eq!(inflation.spec.options.value_format.format(Some(13.2)), "13,2%");

        Ok(())
    }

    #[test]
    fn populate_without_data_draws_nothing() {
        let mut view = View::dashboard(Theme::Light.into(), DEFAULT_REFRESH_SECONDS);

        let handles = Dashboard::populate(&mut view, None);

        assert!(handles.is_empty());
        assert_eq!(view.charts().count(), 0);
    }

    #[test]
    fn populate_skips_misaligned_series_and_missing_surfaces() {
        let data = DashboardData {
            inflation_labels: vec![String::from("2024-01")],
            inflation_values: vec![],
            uva_labels: vec![String::from("2024-02-01")],
            uva_values: vec![Some(690.5)],
            ..DashboardData::default()
        };
        let mut view = View::new("Parcial", Theme::Light.into())
            .add_surface(Surface::new("chart-inflacion", "Inflación"))
            .add_surface(Surface::new("chart-uva", "UVA"));

        let handles = Dashboard::populate(&mut view, Some(&data));

        let surfaces: Vec<&str> = handles.iter().map(ChartHandle::surface_id).collect();
        assert_eq!(surfaces, ["chart-uva"]);
        assert!(view.surface("chart-inflacion").and_then(Surface::chart).is_none());
    }

    #[test]
    fn null_values_are_kept_as_gaps() -> std::result::Result<(), serde_json::Error> {
        let data: DashboardData = serde_json::from_str(
            r#"{"uvaLabels": ["2024-02-01", "2024-02-02"], "uvaValores": [690.5, null]}"#,
        )?;

        let series = data.series(SeriesKind::Uva).expect("the series is aligned");
        assert_eq!(series.values(), [Some(690.5), None]);

        let mut view = View::dashboard(Theme::Light.into(), DEFAULT_REFRESH_SECONDS);
        let handles = Dashboard::populate(&mut view, Some(&data));
        let uva = view.chart(&handles[2]).expect("the UVA chart is drawn");
        assert_eq!(uva.spec.data.datasets[0].data, [Some(690.5), None]);

        Ok(())
    }

    #[test]
    fn cards_show_the_latest_values() -> std::result::Result<(), serde_json::Error> {
        let data: DashboardData = serde_json::from_str(DATA)?;

        let cards = Dashboard::cards(Some(&data));

        assert_eq!(
            cards,
            [
                Card::new("Inflación mensual", "13,2%", Some(String::from("29/02/2024"))),
                Card::new("UVA", "695,8", Some(String::from("03/02/2024"))),
                Card::new("Riesgo país", "s/d", Some(String::from("01/02/2024"))),
            ]
        );
        assert!(Dashboard::cards(None).is_empty());

        Ok(())
    }

    #[test]
    fn missing_fields_default_to_empty_series() -> std::result::Result<(), serde_json::Error> {
        let data: DashboardData = serde_json::from_str(r#"{ "uvaLabels": [] }"#)?;

        assert_eq!(data, DashboardData::default());
        assert_eq!(data.series(SeriesKind::CountryRisk), Ok(Series::default()));

        Ok(())
    }

    #[test]
    fn load_and_save_use_json_files() -> std::result::Result<(), VisError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("data.json");

        assert_eq!(DashboardData::load(&path)?, None);

        let mut data = DashboardData::default();
        data.set_series(SeriesKind::Uva, Series::from_iter([("2024-02-01", 690.5)]));
        data.set_latest(
            SeriesKind::CountryRisk,
            Some(IndexValue {
                date: String::from("2024-02-01"),
                value: Some(1800.0),
            }),
        );
        data.updated_at = Some(String::from("2024-02-01T12:00:00.000Z"));
        data.save(&path)?;

        assert_eq!(DashboardData::load(&path)?, Some(data));

        Ok(())
    }
}
