use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Trace colours
// ---------------------------------------------------------------------------

/// Colour used when a table has a single trace.
pub const SINGLE_TRACE: Color32 = Color32::LIGHT_BLUE;

/// Colour for trace `index` out of `count`, picked from evenly spaced hues
/// so neighbouring traces stay distinguishable. Depends only on its
/// arguments, so a file always gets the same colours.
pub fn trace_color(index: usize, count: usize) -> Color32 {
    if count <= 1 {
        return SINGLE_TRACE;
    }
    let hue = (index % count) as f32 / count as f32 * 360.0;
    let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
    let (r, g, b) = rgb.into_format::<u8>().into_components();
    Color32::from_rgb(r, g, b)
}

/// Colours for `count` traces, in trace order.
pub fn trace_colors(count: usize) -> Vec<Color32> {
    (0..count).map(|i| trace_color(i, count)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_distinct_and_stable() {
        let first = trace_colors(4);
        let again = trace_colors(4);
        assert_eq!(first, again);
        for (i, a) in first.iter().enumerate() {
            for b in &first[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn lone_trace_uses_default() {
        assert_eq!(trace_colors(1), vec![SINGLE_TRACE]);
        assert!(trace_colors(0).is_empty());
    }
}
