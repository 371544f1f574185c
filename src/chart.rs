use std::collections::HashSet;

use eframe::egui::Color32;

use crate::color::trace_colors;
use crate::data::model::TraceTable;

pub const X_AXIS_LABEL: &str = "time (s)";
pub const Y_AXIS_LABEL: &str = "v (mV)";

// ---------------------------------------------------------------------------
// ChartSpec – everything the plot widget draws, independent of egui state
// ---------------------------------------------------------------------------

/// One line of the overlay plot.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    /// Legend entry, taken verbatim from the column header.
    pub name: String,
    /// `[time, value]` pairs in file order.
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
}

/// A declarative description of the trace chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub lines: Vec<LineSpec>,
}

impl ChartSpec {
    /// Plot every column after the first against column 0.
    pub fn from_table(table: &TraceTable) -> Self {
        let colors = trace_colors(table.series_count());
        let lines: Vec<LineSpec> = table
            .series()
            .zip(colors)
            .map(|(series, color)| LineSpec {
                name: series.label.to_string(),
                points: series
                    .x
                    .iter()
                    .zip(series.y)
                    .map(|(&x, &y)| [x, y])
                    .collect(),
                color,
            })
            .collect();

        if lines.is_empty() {
            log::warn!(
                "Only a time column ('{}') found, nothing to plot",
                table.headers()[0]
            );
        }

        let chart = ChartSpec {
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            lines,
        };
        let repeated = chart.repeated_names();
        if !repeated.is_empty() {
            log::warn!(
                "Columns {repeated:?} share a header; their traces share one legend entry"
            );
        }
        chart
    }

    /// Line names used by more than one line, each listed once in the order
    /// of its second occurrence.
    pub fn repeated_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut repeated = Vec::new();
        for line in &self.lines {
            let name = line.name.as_str();
            if !seen.insert(name) && !repeated.contains(&name) {
                repeated.push(name);
            }
        }
        repeated
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_text;

    #[test]
    fn two_traces_give_two_labelled_lines() {
        let table = parse_text("t v1 v2\n0 -65 -70\n1 -60 -69\n2 -55 -68\n").unwrap();
        let chart = ChartSpec::from_table(&table);

        let names: Vec<&str> = chart.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["v1", "v2"]);
        assert_eq!(chart.lines[0].points, vec![[0.0, -65.0], [1.0, -60.0], [2.0, -55.0]]);
        assert_eq!(chart.lines[1].points, vec![[0.0, -70.0], [1.0, -69.0], [2.0, -68.0]]);
    }

    #[test]
    fn n_columns_give_n_minus_one_lines_over_time() {
        let text = "time a b c d\n0.0 1 2 3 4\n0.5 5 6 7 8\n";
        let table = parse_text(text).unwrap();
        let chart = ChartSpec::from_table(&table);

        assert_eq!(chart.lines.len(), 4);
        for (i, line) in chart.lines.iter().enumerate() {
            assert_eq!(line.name, table.headers()[i + 1]);
            let xs: Vec<f64> = line.points.iter().map(|p| p[0]).collect();
            assert_eq!(xs, table.time());
        }
    }

    #[test]
    fn axis_labels_are_fixed() {
        let table = parse_text("x y\n0 0\n").unwrap();
        let chart = ChartSpec::from_table(&table);
        assert_eq!(chart.x_label, "time (s)");
        assert_eq!(chart.y_label, "v (mV)");
    }

    #[test]
    fn time_only_file_gives_empty_chart() {
        let table = parse_text("t\n0\n1\n").unwrap();
        let chart = ChartSpec::from_table(&table);
        assert!(chart.is_empty());
        assert_eq!(chart.x_label, X_AXIS_LABEL);
    }

    #[test]
    fn header_text_is_used_verbatim() {
        let table = parse_text("t soma[0]/v dend_3.v\n0 1 2\n").unwrap();
        let chart = ChartSpec::from_table(&table);
        assert_eq!(chart.lines[0].name, "soma[0]/v");
        assert_eq!(chart.lines[1].name, "dend_3.v");
    }

    #[test]
    fn same_input_gives_identical_chart() {
        let text = "t v1 v2 v3\n0 1 2 3\n1 4 5 6\n";
        let first = ChartSpec::from_table(&parse_text(text).unwrap());
        let second = ChartSpec::from_table(&parse_text(text).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn repeated_headers_are_detected() {
        let table = parse_text("t v v w v\n0 1 2 3 4\n").unwrap();
        let chart = ChartSpec::from_table(&table);
        assert_eq!(chart.lines.len(), 4);
        assert_eq!(chart.repeated_names(), vec!["v"]);
    }

    #[test]
    fn distinct_headers_have_no_repeats() {
        let table = parse_text("t v1 v2\n0 1 2\n").unwrap();
        assert!(ChartSpec::from_table(&table).repeated_names().is_empty());
    }
}
