use std::path::Path;

use estudio_vis::layout::DashboardLayout;
use estudio_vis::layout::View;
use estudio_vis::layout::data::Dashboard;
use estudio_vis::layout::data::DashboardData;
use estudio_vis::refresh::DEFAULT_REFRESH_SECONDS;
use estudio_vis::theme::AppliedTheme;
use estudio_vis::theme::FileStore;
use estudio_vis::theme::Theme;
use estudio_vis::theme::ThemePreferences;

use crate::cli::PathExt;
use crate::cli::RenderArgs;
use crate::error::CliError;

pub(crate) fn render(args: RenderArgs, system_theme: Option<Theme>) -> Result<(), CliError> {
    let output_path = args.output_path.or_current_dir()?;
    let store_path = args.theme_store.or_default_store()?;

    tracing::info!(
        "rendering the dashboard from `{}` into `{}`",
        args.data.display(),
        output_path.display()
    );

    let data = DashboardData::load(&args.data)?;
    let theme = current_theme(&store_path, system_theme)?;

    write_dashboard(&output_path, data.as_ref(), theme, DEFAULT_REFRESH_SECONDS)
}

pub(crate) fn current_theme(
    store_path: &Path,
    system_theme: Option<Theme>,
) -> Result<AppliedTheme, CliError> {
    let preferences = ThemePreferences::new(FileStore::new(store_path));
    let theme = preferences.current(system_theme)?;

    Ok(AppliedTheme::from(theme))
}

pub(crate) fn write_dashboard(
    output_path: &Path,
    data: Option<&DashboardData>,
    theme: AppliedTheme,
    refresh_seconds: u32,
) -> Result<(), CliError> {
    let updated_at = data.and_then(|data| data.updated_at.clone());
    let mut view = View::dashboard(theme, refresh_seconds)
        .with_updated_at(updated_at)
        .with_cards(Dashboard::cards(data));

    let handles = Dashboard::populate(&mut view, data);
    tracing::debug!("{} charts drawn", handles.len());

    let layout = DashboardLayout::init(output_path)?;
    layout.generate_report(&view)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use estudio_vis::chart::Series;
    use estudio_vis::layout::data::IndexValue;
    use estudio_vis::layout::data::SeriesKind;

    use super::*;

    #[test]
    fn write_dashboard_renders_the_fetched_series() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut data = DashboardData::default();
        data.set_series(SeriesKind::CountryRisk, Series::from_iter([("2024-02-01", 1800.0)]));
        data.set_latest(
            SeriesKind::CountryRisk,
            Some(IndexValue {
                date: String::from("2024-02-02"),
                value: Some(1825.0),
            }),
        );

        write_dashboard(dir.path(), Some(&data), Theme::Dark.into(), 60)
            .map_err(|error| error.to_string())?;

        let html = fs::read_to_string(dir.path().join("estudio").join("index.html"))?;
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains(r#"const tickLabels = ["01/02"]"#));
        assert!(html.contains(r#"<p class="card-value">1.825</p>"#));
        assert!(html.contains("let seconds = 60;"));

        Ok(())
    }

    #[test]
    fn current_theme_reads_the_store() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"estudio-theme": "dark"}"#)?;

        let theme = current_theme(&path, Some(Theme::Light)).map_err(|error| error.to_string())?;
        assert_eq!(theme.theme, Theme::Dark);

        let missing = dir.path().join("missing.json");
        let theme = current_theme(&missing, None).map_err(|error| error.to_string())?;
        assert_eq!(theme.theme, Theme::Light);

        Ok(())
    }
}
