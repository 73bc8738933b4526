use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (e.g. the attrition outcomes) to stable colours so
/// the same group looks the same in every chart.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map over the given labels, in iteration order.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let palette = generate_palette(labels.len());
        let mapping: BTreeMap<String, Color32> =
            labels.into_iter().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging ramp for the correlation heatmap
// ---------------------------------------------------------------------------

/// Map `t ∈ [0, 1]` onto a cool-to-warm ramp (blue → near-white → red),
/// with 0.5 as the neutral midpoint.
pub fn diverging_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let cold = LinSrgb::new(0.16, 0.28, 0.72);
    let neutral = LinSrgb::new(0.92, 0.92, 0.92);
    let warm = LinSrgb::new(0.72, 0.05, 0.12);

    let mixed = if t < 0.5 {
        cold.mix(neutral, t * 2.0)
    } else {
        neutral.mix(warm, (t - 0.5) * 2.0)
    };
    let rgb: Srgb = Srgb::from_linear(mixed);
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colors() {
        let palette = generate_palette(5);
        assert_eq!(palette.len(), 5);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn color_map_falls_back_for_unknown_labels() {
        let map = ColorMap::new(["No", "Yes"]);
        assert_ne!(map.color_for("No"), map.color_for("Yes"));
        assert_eq!(map.color_for("Maybe"), Color32::GRAY);
    }

    #[test]
    fn diverging_ramp_endpoints() {
        let lo = diverging_color(0.0);
        let mid = diverging_color(0.5);
        let hi = diverging_color(1.0);
        assert!(lo.b() > lo.r(), "negative end should lean blue");
        assert!(hi.r() > hi.b(), "positive end should lean red");
        assert!(mid.r() > 200 && mid.g() > 200 && mid.b() > 200);
    }
}
