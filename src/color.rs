use std::collections::BTreeMap;

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
// Category colours: booster category → Color32
// ---------------------------------------------------------------------------

/// Maps category names (booster versions, launch sites) to distinct colours.
/// Colours are assigned in the order the categories are given, so the same
/// dataset always produces the same legend.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    order: Vec<String>,
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    pub fn new(categories: &[String]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories
            .iter()
            .zip(palette)
            .map(|(c, col)| (c.clone(), col))
            .collect();

        CategoryColors {
            order: categories.to_vec(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category; unknown names are grey.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (category → colour) in assignment order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.order
            .iter()
            .map(|c| (c.clone(), self.color_for(c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_category_falls_back_to_grey() {
        let colors = CategoryColors::new(&["FT".to_string(), "B4".to_string()]);
        assert_ne!(colors.color_for("FT"), colors.color_for("B4"));
        assert_eq!(colors.color_for("v1.0"), Color32::GRAY);
        let legend: Vec<String> = colors.legend_entries().into_iter().map(|(c, _)| c).collect();
        assert_eq!(legend, vec!["FT", "B4"]);
    }
}
