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

/// Maps category labels to distinct colours so the bar charts, pie slices
/// and legends all agree on what each label looks like.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    fallback: Color32,
}

impl CategoryColors {
    /// Assign a palette colour to each label, in the labels' sorted order.
    pub fn new(labels: impl IntoIterator<Item = String>) -> Self {
        let sorted: BTreeMap<String, ()> = labels.into_iter().map(|l| (l, ())).collect();
        let palette = generate_palette(sorted.len());
        let mapping = sorted
            .into_keys()
            .zip(palette)
            .collect();

        CategoryColors {
            mapping,
            fallback: Color32::GRAY,
        }
    }

    /// Look up the colour for a label; unknown labels get the fallback.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_labels_get_distinct_colors() {
        let colors = CategoryColors::new(["no".to_string(), "yes".to_string()]);
        assert_ne!(colors.color_for("no"), colors.color_for("yes"));
    }

    #[test]
    fn lookup_is_stable() {
        let colors = CategoryColors::new(["no".to_string(), "yes".to_string()]);
        assert_eq!(colors.color_for("yes"), colors.color_for("yes"));
    }

    #[test]
    fn unknown_label_gets_fallback() {
        let colors = CategoryColors::new(["no".to_string()]);
        assert_eq!(colors.color_for("maybe"), Color32::GRAY);
    }

    #[test]
    fn empty_palette_is_empty() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(4).len(), 4);
    }
}
