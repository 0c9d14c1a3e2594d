//! Scripts that draw the charts and run the countdown in the browser.

use serde::Serialize;

use crate::chart::Chart;
use crate::layout::Countdown;
use crate::layout::View;
use crate::render::OutputStream;
use crate::render::Render;
use crate::render::error::RenderError;

/// Serializes `value` for embedding into a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace("</", "<\\/"))
}

impl Render for View {
    fn render<R>(&self, output: &mut R) -> Result<(), RenderError>
    where
        R: OutputStream,
    {
        for chart in self.charts() {
            chart.render(output)?;
        }

        if let Some(countdown) = self.countdown() {
            countdown.render(output)?;
        }

        Ok(())
    }
}

impl Render for Chart {
    fn render<R>(&self, output: &mut R) -> Result<(), RenderError>
    where
        R: OutputStream,
    {
        let surface_id = script_json(self.surface_id())?;
        let spec = script_json(&self.spec)?;
        let tick_labels = script_json(&self.tick_labels())?;
        let suffix = script_json(self.spec.options.value_format.suffix())?;

        output.write(&format!(
            r#"
            <script>
                (function () {{
                    const canvas = document.getElementById({surface_id});
                    if (!canvas) return;

                    const config = {spec};
                    const tickLabels = {tick_labels};
                    const suffix = {suffix};
                    const format = (value) => value.toLocaleString("es-AR") + suffix;
                    const ctx = canvas.getContext("2d");
            "#
        ))?;

        for (idx, dataset) in self.spec.data.datasets.iter().enumerate() {
            let gradient = &dataset.gradient;
            output.write(&format!(
                "const gradient{idx} = ctx.createLinearGradient(0, 0, 0, {height});\n",
                height = gradient.height
            ))?;

            for (offset, color) in &gradient.stops {
                let color = script_json(color)?;
                output.write(&format!(
                    "gradient{idx}.addColorStop({offset}, {color});\n"
                ))?;
            }

            output.write(&format!(
                "config.data.datasets[{idx}].backgroundColor = gradient{idx};\n"
            ))?;
        }

        output.write(
            r#"
                    config.options.plugins.tooltip.callbacks = {
                        label: (context) => format(context.parsed.y),
                    };
                    config.options.scales.x.ticks.callback = (value) => tickLabels[value];
                    config.options.scales.y.ticks.callback = format;

                    new Chart(canvas, config);
                })();
            </script>
            "#,
        )
    }
}

impl Render for Countdown {
    fn render<R>(&self, output: &mut R) -> Result<(), RenderError>
    where
        R: OutputStream,
    {
        let id = script_json(self.id())?;
        let seconds = self.seconds();

        output.write(&format!(
            r#"
            <script>
                (function () {{
                    let seconds = {seconds};
                    const element = document.getElementById({id});

                    setInterval(function () {{
                        seconds--;
                        if (element) element.textContent = seconds;
                        if (seconds <= 0) location.reload();
                    }}, 1000);
                }})();
            </script>
            "#
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartFactory;
    use crate::chart::Series;
    use crate::layout::Surface;
    use crate::theme::Theme;

    #[test]
    fn chart_script_builds_gradient_and_callbacks() -> Result<(), RenderError> {
        let mut view = View::new("Cotizaciones", Theme::Light.into())
            .add_surface(Surface::new("chart-inflacion", "Inflación"));
        let series = Series::from_iter([("2024-03", 11.0), ("2024-04", 8.8)]);
        let handle = ChartFactory::create(
            &mut view,
            "chart-inflacion",
            &series,
            "rgb(255, 193, 7)",
            "%",
            false,
        )
        .expect("the surface exists");
        let chart = view.chart(&handle).expect("the chart is drawn");

        let mut output = String::new();
        chart.render(&mut output)?;

        assert!(output.contains(r#"document.getElementById("chart-inflacion")"#));
        assert!(output.contains("ctx.createLinearGradient(0, 0, 0, 280)"));
        assert!(output.contains(r#"gradient0.addColorStop(0, "rgba(255, 193, 7, 0.25)")"#));
        assert!(output.contains(r#"gradient0.addColorStop(1, "rgba(255, 193, 7, 0.02)")"#));
        assert!(output.contains(r#"const tickLabels = ["Mar 24","Abr 24"]"#));
        assert!(output.contains(r#"const suffix = "%""#));
        assert!(output.contains(r#""maxTicksLimit":12"#));
        assert!(output.contains("new Chart(canvas, config)"));

        Ok(())
    }

    #[test]
    fn chart_script_escapes_closing_tags() -> Result<(), RenderError> {
        let mut view = View::new("Cotizaciones", Theme::Light.into())
            .add_surface(Surface::new("chart-uva", "UVA"));
        let series = Series::from_iter([("</script>", 1.0)]);
        let handle = ChartFactory::create(&mut view, "chart-uva", &series, "rgb(1, 2, 3)", "", true)
            .expect("the surface exists");

        let mut output = String::new();
        view.chart(&handle)
            .expect("the chart is drawn")
            .render(&mut output)?;

        assert!(!output.contains("\"</script>\""));
        assert!(output.contains(r#""<\/script>""#));

        Ok(())
    }

    #[test]
    fn countdown_script_reloads_at_zero() -> Result<(), RenderError> {
        let mut output = String::new();
        Countdown::new("countdown-seconds", 300).render(&mut output)?;

        assert!(output.contains("let seconds = 300;"));
        assert!(output.contains(r#"document.getElementById("countdown-seconds")"#));
        assert!(output.contains("if (seconds <= 0) location.reload();"));
        assert!(output.contains("}, 1000);"));

        Ok(())
    }

    #[test]
    fn view_renders_charts_and_countdown() -> Result<(), RenderError> {
        let view = View::dashboard(Theme::Dark.into(), 45);

        let mut output = String::new();
        view.render(&mut output)?;

        assert!(!output.contains("new Chart"));
        assert!(output.contains("let seconds = 45;"));
        assert!(output.contains("location.reload()"));

        Ok(())
    }
}
