use std::time::Duration;

use estudio_vis::chart::Series;
use estudio_vis::layout::data::IndexValue;
use estudio_vis::layout::data::SeriesKind;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::fetch::error::FetchError;
use crate::fetch::error::Result;

const BASE_URL: &str = "https://api.argentinadatos.com/v1";
const LATEST_RISK_PATH: &str = "/finanzas/indices/riesgo-pais/ultimo";
const USER_AGENT_VALUE: &str = "Mozilla/5.0 compatible";
const TIMEOUT: Duration = Duration::from_secs(12);

/// The number of most recent points kept for the monthly inflation series.
const MONTHLY_POINTS: usize = 24;
/// The number of most recent points kept for the daily index series.
const DAILY_POINTS: usize = 60;

pub(crate) struct IndexClient {
    client: Client,
    base_url: &'static str,
}

impl IndexClient {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: BASE_URL,
        })
    }

    pub fn index(&self, kind: SeriesKind) -> Result<Vec<IndexItem>> {
        self.get(endpoint(kind))
    }

    pub fn latest_risk(&self) -> Result<IndexItem> {
        self.get(LATEST_RISK_PATH)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{base_url}{path}", base_url = self.base_url);
        let response = self.client.get(url).send()?;

        match response.status() {
            StatusCode::OK => {
                let body: T = response.json()?;
                Ok(body)
            }
            status_code => {
                let message = response.text()?;
                let error = FetchError::Response {
                    status_code,
                    message,
                };
                Err(error)
            }
        }
    }

    /// Retrieves every point of a series, or no points if the request
    /// fails.
    pub fn index_or_empty(&self, kind: SeriesKind) -> Vec<IndexItem> {
        self.index(kind).unwrap_or_else(|error| {
            tracing::warn!("could not fetch the {kind:?} series from {}: {error}", endpoint(kind));
            Vec::new()
        })
    }

    /// Retrieves the latest country-risk value, or `None` if the request
    /// fails.
    pub fn latest_risk_or_none(&self) -> Option<IndexValue> {
        match self.latest_risk() {
            Ok(item) => Some(item.into()),
            Err(error) => {
                tracing::warn!("could not fetch the latest country risk from {LATEST_RISK_PATH}: {error}");
                None
            }
        }
    }
}

/// A point of an index. A missing value reads as zero, an explicit `null`
/// is kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct IndexItem {
    fecha: String,
    #[serde(default = "zero")]
    valor: Option<f64>,
}

fn zero() -> Option<f64> {
    Some(0.0)
}

impl From<IndexItem> for IndexValue {
    fn from(item: IndexItem) -> Self {
        IndexValue {
            date: item.fecha,
            value: item.valor,
        }
    }
}

fn endpoint(kind: SeriesKind) -> &'static str {
    match kind {
        SeriesKind::Inflation => "/finanzas/indices/inflacion",
        SeriesKind::InflationYearOverYear => "/finanzas/indices/inflacionInteranual",
        SeriesKind::Uva => "/finanzas/indices/uva",
        SeriesKind::CountryRisk => "/finanzas/indices/riesgo-pais",
    }
}

fn points(kind: SeriesKind) -> usize {
    match kind {
        SeriesKind::Inflation | SeriesKind::InflationYearOverYear => MONTHLY_POINTS,
        SeriesKind::Uva | SeriesKind::CountryRisk => DAILY_POINTS,
    }
}

/// Keeps the most recent points shown on the chart of the series.
pub(crate) fn to_series(items: &[IndexItem], kind: SeriesKind) -> Series {
    let skip = items.len().saturating_sub(points(kind));

    items
        .iter()
        .skip(skip)
        .map(|item| (item.fecha.as_str(), item.valor))
        .collect()
}

/// Returns the most recent point of the series.
pub(crate) fn latest(items: &[IndexItem]) -> Option<IndexValue> {
    items.last().cloned().map(IndexValue::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(count: usize) -> Vec<IndexItem> {
        (0..count)
            .map(|idx| IndexItem {
                fecha: format!("2020-{:02}", idx % 12 + 1),
                valor: Some(idx as f64),
            })
            .collect()
    }

    #[test]
    fn to_series_keeps_the_most_recent_points() {
        let series = to_series(&items(30), SeriesKind::Inflation);

        assert_eq!(series.len(), 24);
        assert_eq!(series.values().first(), Some(&Some(6.0)));
        assert_eq!(series.values().last(), Some(&Some(29.0)));

        let series = to_series(&items(100), SeriesKind::CountryRisk);
        assert_eq!(series.len(), 60);
        assert_eq!(series.values().first(), Some(&Some(40.0)));
    }

    #[test]
    fn to_series_keeps_short_series_whole() {
        let series = to_series(&items(3), SeriesKind::Uva);

        assert_eq!(series.len(), 3);
        assert_eq!(series.labels(), ["2020-01", "2020-02", "2020-03"]);
    }

    #[test]
    fn index_items_tolerate_missing_and_null_values() -> std::result::Result<(), serde_json::Error> {
        let items: Vec<IndexItem> = serde_json::from_str(
            r#"[{"fecha": "2024-02-01", "valor": 1800}, {"fecha": "2024-02-02"}, {"fecha": "2024-02-03", "valor": null}]"#,
        )?;

        assert_eq!(
            items,
            vec![
                IndexItem {
                    fecha: String::from("2024-02-01"),
                    valor: Some(1800.0)
                },
                IndexItem {
                    fecha: String::from("2024-02-02"),
                    valor: Some(0.0)
                },
                IndexItem {
                    fecha: String::from("2024-02-03"),
                    valor: None
                },
            ]
        );

        let series = to_series(&items, SeriesKind::CountryRisk);
        assert_eq!(series.values(), [Some(1800.0), Some(0.0), None]);
        assert_eq!(
            latest(&items),
            Some(IndexValue {
                date: String::from("2024-02-03"),
                value: None
            })
        );
        assert_eq!(latest(&[]), None);

        Ok(())
    }
}
