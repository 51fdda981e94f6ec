use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Color mapping: category string → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column (club, position) to
/// distinct colours.  Built once per dataset.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from a column's distinct values.
    pub fn new(categories: &BTreeSet<String>) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<String, Color32> = categories
            .iter()
            .zip(palette)
            .map(|(v, c): (&String, Color32)| (v.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// An empty map that hands out the default colour only.
    pub fn empty() -> Self {
        ColorMap::new(&BTreeSet::new())
    }

    /// Colour for a category; unmapped or missing values get the default grey.
    pub fn color_for(&self, value: Option<&str>) -> Color32 {
        value
            .and_then(|v| self.mapping.get(v))
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_are_distinct() {
        let colors = generate_palette(8);
        assert_eq!(colors.len(), 8);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn color_map_falls_back_for_unknown_categories() {
        let categories: BTreeSet<String> =
            ["Ajax", "Bayern"].iter().map(|s| s.to_string()).collect();
        let map = ColorMap::new(&categories);

        assert_ne!(map.color_for(Some("Ajax")), map.color_for(Some("Bayern")));
        assert_eq!(map.color_for(Some("Chelsea")), map.color_for(None));
    }
}
