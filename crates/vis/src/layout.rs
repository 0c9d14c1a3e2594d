//! The dashboard page and its on-disk layout.

pub mod data;

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::chart::Chart;
use crate::chart::ChartHandle;
use crate::error::Result;
use crate::layout::data::CHART_SLOTS;
use crate::refresh::RefreshTimer;
use crate::template::TemplateEngine;
use crate::theme::AppliedTheme;
use crate::theme::Theme;

/// The identifier of the element showing the seconds until the next reload.
pub const COUNTDOWN_ID: &str = "countdown-seconds";

const DASHBOARD_TITLE: &str = "Cotizaciones";

/// A page made of named drawing surfaces and an optional countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    title: String,
    theme: AppliedTheme,
    updated_at: Option<String>,
    cards: Vec<Card>,
    surfaces: Vec<Surface>,
    countdown: Option<Countdown>,
}

impl View {
    /// Creates an empty page.
    pub fn new(title: &str, theme: AppliedTheme) -> View {
        Self {
            title: title.to_owned(),
            theme,
            updated_at: None,
            cards: Vec::new(),
            surfaces: Vec::new(),
            countdown: None,
        }
    }

    /// Creates the economic dashboard page with a surface per chart and
    /// a countdown reloading the page every `refresh_seconds`
    /// (`0` selects the default interval).
    pub fn dashboard(theme: AppliedTheme, refresh_seconds: u32) -> View {
        let seconds = RefreshTimer::new(refresh_seconds).remaining();

        CHART_SLOTS
            .iter()
            .fold(View::new(DASHBOARD_TITLE, theme), |view, slot| {
                view.add_surface(Surface::new(slot.surface_id, slot.title))
            })
            .with_countdown(Countdown::new(COUNTDOWN_ID, seconds))
    }

    /// Appends a surface to the page.
    pub fn add_surface(mut self, surface: Surface) -> View {
        self.surfaces.push(surface);
        self
    }

    /// Sets the countdown shown on the page.
    pub fn with_countdown(mut self, countdown: Countdown) -> View {
        self.countdown = Some(countdown);
        self
    }

    /// Sets the time of the last data update shown on the page.
    pub fn with_updated_at(mut self, updated_at: Option<String>) -> View {
        self.updated_at = updated_at;
        self
    }

    /// Sets the summary cards shown above the charts.
    pub fn with_cards(mut self, cards: Vec<Card>) -> View {
        self.cards = cards;
        self
    }

    /// Returns the page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the page theme.
    pub fn theme(&self) -> Theme {
        self.theme.theme
    }

    /// Returns the applied page theme.
    pub fn applied_theme(&self) -> &AppliedTheme {
        &self.theme
    }

    /// Returns the time of the last data update.
    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    /// Returns the summary cards in display order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the page surfaces in display order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Returns the surface with the given identifier.
    pub fn surface(&self, id: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|surface| surface.id == id)
    }

    pub(crate) fn surface_mut(&mut self, id: &str) -> Option<&mut Surface> {
        self.surfaces.iter_mut().find(|surface| surface.id == id)
    }

    /// Returns the countdown, if the page shows one.
    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// Returns the chart behind `handle`, if it is still drawn.
    pub fn chart(&self, handle: &ChartHandle) -> Option<&Chart> {
        self.surface(handle.surface_id())?
            .chart()
            .filter(|chart| chart.id() == handle.id())
    }

    /// Iterates over the drawn charts.
    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.surfaces.iter().filter_map(Surface::chart)
    }
}

/// A summary of the latest value of an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    title: String,
    value: String,
    date: Option<String>,
}

impl Card {
    /// Creates a card showing an already formatted value.
    pub fn new(title: &str, value: &str, date: Option<String>) -> Card {
        Self {
            title: title.to_owned(),
            value: value.to_owned(),
            date,
        }
    }

    /// Returns the card caption.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the formatted value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the formatted date of the value.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// A drawing target a chart renders onto.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    id: String,
    title: String,
    chart: Option<Chart>,
}

impl Surface {
    /// Creates an empty surface.
    pub fn new(id: &str, title: &str) -> Surface {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            chart: None,
        }
    }

    /// Returns the surface identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the caption shown above the surface.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the chart drawn on the surface.
    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }

    pub(crate) fn draw(&mut self, chart: Chart) {
        self.chart = Some(chart);
    }
}

/// The on-page display of the seconds left until the page reloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    id: String,
    seconds: u32,
}

impl Countdown {
    /// Creates a countdown display starting at `seconds`.
    pub fn new(id: &str, seconds: u32) -> Countdown {
        Self {
            id: id.to_owned(),
            seconds,
        }
    }

    /// Returns the element identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the initial number of seconds.
    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}

/// The dashboard directory is structured as follows:
///
/// ./estudio/index.html
///
/// The __index__ file is the self-contained dashboard page; the chart data
/// is embedded into it.
pub struct DashboardLayout {
    root_path: PathBuf,
    index_file_path: PathBuf,
}

impl DashboardLayout {
    const MAIN_DIR_NAME: &'static str = "estudio";
    const INDEX_FILE_NAME: &'static str = "index.html";

    /// Creates the dashboard directory under `path`, if it does not exist.
    pub fn init(path: &Path) -> Result<DashboardLayout> {
        let root_path = path.join(Self::MAIN_DIR_NAME);
        let index_file_path = root_path.join(Self::INDEX_FILE_NAME);

        fs::create_dir_all(&root_path)?;

        Ok(Self {
            root_path,
            index_file_path,
        })
    }

    /// Returns the dashboard directory.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Writes the page to the index file and returns its path.
    pub fn generate_report(&self, view: &View) -> Result<&Path> {
        let template = TemplateEngine::new(&self.index_file_path);
        template.render(view)?;

        tracing::info!("dashboard written to `{}`", self.index_file_path.display());

        Ok(self.index_file_path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartFactory;
    use crate::chart::Series;
    use crate::error::VisError;

    #[test]
    fn dashboard_has_a_surface_per_chart_and_a_countdown() {
        let view = View::dashboard(Theme::Light.into(), 0);

        let ids: Vec<&str> = view.surfaces().iter().map(Surface::id).collect();
        assert_eq!(
            ids,
            ["chart-inflacion", "chart-inflacion-ia", "chart-uva", "chart-riesgo"]
        );
        assert_eq!(view.countdown(), Some(&Countdown::new("countdown-seconds", 300)));
        assert_eq!(view.charts().count(), 0);
    }

    #[test]
    fn generate_report_writes_the_index_file() -> std::result::Result<(), VisError> {
        let dir = tempfile::tempdir()?;
        let mut view = View::dashboard(Theme::Dark.into(), 60);
        let series = Series::from_iter([("2024-01-02", 1180.0), ("2024-01-03", 1175.5)]);
        ChartFactory::create(&mut view, "chart-riesgo", &series, "rgb(220, 53, 69)", "", true);

        let layout = DashboardLayout::init(dir.path())?;
        let path = layout.generate_report(&view)?.to_path_buf();

        let html = fs::read_to_string(&path)?;
        assert_eq!(path, dir.path().join("estudio").join("index.html"));
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains(r#"<canvas id="chart-riesgo"></canvas>"#));
        assert!(html.contains(r#"getElementById("chart-riesgo")"#));
        assert!(html.contains("let seconds = 60;"));
        assert!(html.contains(r#"<span id="countdown-seconds">60</span>"#));

        // A second run reuses the directory.
        DashboardLayout::init(dir.path())?.generate_report(&view)?;

        Ok(())
    }
}
