use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::chart::ChartSpec;

// ---------------------------------------------------------------------------
// Trace plot (central panel)
// ---------------------------------------------------------------------------

/// Draw every line of `chart` over a shared time axis.
pub fn trace_plot(ui: &mut Ui, chart: &ChartSpec) {
    Plot::new("trace_plot")
        .legend(Legend::default().follow_insertion_order(true))
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for line in &chart.lines {
                let points: PlotPoints = line.points.iter().copied().collect();

                plot_ui.line(
                    Line::new(points)
                        .name(&line.name)
                        .color(line.color)
                        .width(1.5),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use eframe::egui::{self, Pos2, RawInput, Rect, Shape, vec2};

    use super::*;
    use crate::data::loader::parse_text;

    fn collect_text(shape: &Shape, out: &mut Vec<(f32, String)>) {
        match shape {
            Shape::Text(text) => out.push((text.pos.y, text.galley.text().to_string())),
            Shape::Vec(shapes) => {
                for s in shapes {
                    collect_text(s, out);
                }
            }
            _ => {}
        }
    }

    /// Draw `chart` headlessly and return the texts painted in the frame,
    /// top to bottom.
    fn painted_texts(chart: &ChartSpec) -> Vec<String> {
        let ctx = egui::Context::default();
        let input = || RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
            ..Default::default()
        };
        let draw = |ctx: &egui::Context| {
            egui::CentralPanel::default().show(ctx, |ui| trace_plot(ui, chart));
        };

        // first pass lays out fonts and plot bounds
        let _ = ctx.run(input(), draw);
        let output = ctx.run(input(), draw);

        let mut texts = Vec::new();
        for clipped in &output.shapes {
            collect_text(&clipped.shape, &mut texts);
        }
        texts.sort_by(|a, b| a.0.total_cmp(&b.0));
        texts.into_iter().map(|(_, t)| t).collect()
    }

    #[test]
    fn legend_follows_column_order() {
        let table = parse_text("t soma axon dend\n0 -65 -66 -67\n1 -64 -65 -66\n").unwrap();
        let chart = ChartSpec::from_table(&table);
        let names: Vec<&str> = chart.lines.iter().map(|l| l.name.as_str()).collect();

        let legend: Vec<String> = painted_texts(&chart)
            .into_iter()
            .filter(|t| names.contains(&t.as_str()))
            .collect();

        assert_eq!(legend, vec!["soma", "axon", "dend"]);
    }

    #[test]
    fn axis_labels_are_painted() {
        let table = parse_text("t v\n0 -65\n1 -64\n").unwrap();
        let texts = painted_texts(&ChartSpec::from_table(&table));
        assert!(texts.iter().any(|t| t == "time (s)"));
        assert!(texts.iter().any(|t| t == "v (mV)"));
    }
}
