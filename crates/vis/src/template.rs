use std::path::Path;

use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::error::Result;
use crate::label::format_timestamp;
use crate::layout::View;
use crate::render::Render;
use crate::render::OutputStream;
use crate::render::output::OutputFile;

const INDEX_TEMPLATE_NAME: &str = "index";

pub struct TemplateEngine<'a> {
    path: &'a Path,
}

impl<'a> TemplateEngine<'a> {
    pub fn new(path: &'a Path) -> TemplateEngine<'a> {
        Self { path }
    }

    pub fn render(&self, view: &View) -> Result<()> {
        let text = render_page(view)?;

        let mut output = OutputFile::new(self.path)?;
        output.write(&text)?;
        output.flush()?;

        Ok(())
    }
}

pub(crate) fn render_page(view: &View) -> Result<String> {
    let mut template = TinyTemplate::new();
    template.add_template(INDEX_TEMPLATE_NAME, include_str!("./template/index.html.tt"))?;

    let context = Context::new(view)?;
    let text = template.render(INDEX_TEMPLATE_NAME, &context)?;

    Ok(text)
}

#[derive(Serialize)]
struct Context<'a> {
    title: &'a str,
    theme: &'static str,
    meta_color: &'static str,
    updated_at: Option<String>,
    has_cards: bool,
    cards: Vec<CardContext<'a>>,
    countdown: Option<CountdownContext<'a>>,
    surfaces: Vec<SurfaceContext<'a>>,
    scripts: String,
}

#[derive(Serialize)]
struct CountdownContext<'a> {
    id: &'a str,
    seconds: u32,
}

#[derive(Serialize)]
struct CardContext<'a> {
    title: &'a str,
    value: &'a str,
    date: Option<&'a str>,
}

#[derive(Serialize)]
struct SurfaceContext<'a> {
    id: &'a str,
    title: &'a str,
}

impl<'a> Context<'a> {
    fn new(view: &'a View) -> Result<Context<'a>> {
        let mut scripts = String::new();
        view.render(&mut scripts)?;

        let applied_theme = view.applied_theme();

        Ok(Self {
            title: view.title(),
            theme: applied_theme.theme.as_flag(),
            meta_color: applied_theme.meta_color,
            updated_at: view.updated_at().map(format_timestamp),
            has_cards: !view.cards().is_empty(),
            cards: view
                .cards()
                .iter()
                .map(|card| CardContext {
                    title: card.title(),
                    value: card.value(),
                    date: card.date(),
                })
                .collect(),
            countdown: view.countdown().map(|countdown| CountdownContext {
                id: countdown.id(),
                seconds: countdown.seconds(),
            }),
            surfaces: view
                .surfaces()
                .iter()
                .map(|surface| SurfaceContext {
                    id: surface.id(),
                    title: surface.title(),
                })
                .collect(),
            scripts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartFactory;
    use crate::chart::Series;
    use crate::error::VisError;
    use crate::layout::Card;
    use crate::refresh::DEFAULT_REFRESH_SECONDS;
    use crate::theme::Theme;

    #[test]
    fn render_page_lays_out_surfaces_and_scripts() -> std::result::Result<(), VisError> {
        let mut view = View::dashboard(Theme::Light.into(), DEFAULT_REFRESH_SECONDS)
            .with_updated_at(Some(String::from("2025-01-15T15:30:00.000Z")))
            .with_cards(vec![Card::new("Inflación mensual", "2,7%", None)]);
        let series = Series::from_iter([("2024-03", 11.0)]);
        ChartFactory::create(&mut view, "chart-inflacion", &series, "rgb(255, 193, 7)", "%", false);

        let html = render_page(&view)?;

        assert!(html.contains(r#"<html lang="es" data-theme="light">"#));
        assert!(html.contains(r##"<meta name="theme-color" content="#8C4F9F" />"##));
        assert!(html.contains("Actualizado:"));
        assert!(html.contains("12:30 hs"));
        assert!(html.contains(r#"<span id="countdown-seconds">300</span>"#));
        assert!(html.contains(r#"<canvas id="chart-inflacion-ia"></canvas>"#));
        assert!(html.contains("<h2>Riesgo país</h2>"));
        assert!(html.contains("<h3>Inflación mensual</h3>"));
        assert!(html.contains(r#"<p class="card-value">2,7%</p>"#));
        assert!(html.contains(r#"document.getElementById("chart-inflacion")"#));
        assert!(!html.contains("&quot;"));

        Ok(())
    }

    #[test]
    fn render_page_without_update_time_or_countdown() -> std::result::Result<(), VisError> {
        let view = View::new("Vacío", Theme::Dark.into());

        let html = render_page(&view)?;

        assert!(html.contains(r#"data-theme="dark""#));
        assert!(!html.contains("Actualizado"));
        assert!(!html.contains("countdown"));
        assert!(!html.contains("card-value"));

        Ok(())
    }
}
