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
// Color mapping: location label → Color32
// ---------------------------------------------------------------------------

/// Maps each `ocean_proximity` label to a distinct marker colour.
#[derive(Debug, Clone)]
pub struct LocationColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl LocationColors {
    pub fn new(locations: &BTreeSet<String>) -> Self {
        let palette = generate_palette(locations.len());
        let mapping = locations.iter().cloned().zip(palette).collect();

        LocationColors {
            mapping,
            default_color: Color32::from_rgba_unmultiplied(255, 0, 0, 160),
        }
    }

    pub fn color_for(&self, location: &str) -> Color32 {
        self.mapping
            .get(location)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_distinct() {
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        let unique: BTreeSet<[u8; 4]> = palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 4);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_unknown_location_gets_default() {
        let locations = BTreeSet::from(["INLAND".to_string(), "ISLAND".to_string()]);
        let colors = LocationColors::new(&locations);

        assert_ne!(colors.color_for("INLAND"), colors.color_for("ISLAND"));
        assert_eq!(
            colors.color_for("NOWHERE"),
            Color32::from_rgba_unmultiplied(255, 0, 0, 160)
        );
    }
}
