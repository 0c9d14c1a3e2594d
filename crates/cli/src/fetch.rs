pub(crate) mod client;
pub(crate) mod error;

use chrono::SecondsFormat;
use chrono::Utc;
use estudio_vis::layout::data::DashboardData;
use estudio_vis::layout::data::SeriesKind;

use crate::cli::FetchArgs;
use crate::error::CliError;
use crate::fetch::client::IndexClient;
use crate::fetch::client::latest;
use crate::fetch::client::to_series;

const DASHBOARD_SERIES: [SeriesKind; 4] = [
    SeriesKind::Inflation,
    SeriesKind::InflationYearOverYear,
    SeriesKind::Uva,
    SeriesKind::CountryRisk,
];

pub(crate) fn fetch(args: FetchArgs) -> Result<(), CliError> {
    let client = IndexClient::new()?;
    let data = fetch_dashboard(&client);

    data.save(&args.output)?;
    tracing::info!("dashboard data written to `{}`", args.output.display());

    Ok(())
}

/// Retrieves every dashboard series and the latest value of each index;
/// a series that cannot be retrieved is left empty.
pub(crate) fn fetch_dashboard(client: &IndexClient) -> DashboardData {
    let mut data = DashboardData {
        updated_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        ..DashboardData::default()
    };

    for kind in DASHBOARD_SERIES {
        let items = client.index_or_empty(kind);
        tracing::info!("fetched {} points of the {kind:?} series", items.len());

        data.set_series(kind, to_series(&items, kind));
        if kind != SeriesKind::CountryRisk {
            data.set_latest(kind, latest(&items));
        }
    }

    data.set_latest(SeriesKind::CountryRisk, client.latest_risk_or_none());

    data
}
