use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Fill colour of the price histogram.
pub const HISTOGRAM_FILL: Color32 = Color32::from_rgb(99, 142, 198);

/// `n` colours on a hue ramp from green (first) to red (last), used to
/// shade mileage buckets from low to high mileage.
pub fn mileage_ramp(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![hsl_to_color32(120.0)],
        _ => (0..n)
            .map(|i| {
                let t = i as f32 / (n - 1) as f32;
                hsl_to_color32(120.0 * (1.0 - t))
            })
            .collect(),
    }
}

fn hsl_to_color32(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.65, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}
