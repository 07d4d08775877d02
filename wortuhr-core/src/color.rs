//! HSV → RGB
//!
//! Ganzzahlige Umrechnung über sechs 60°-Sektoren des Farbkreises.

use rgb::RGB8;

/// Rechnet einen HSV-Wert in RGB um
///
/// # Parameter
/// - `hue`: Farbton in Grad, wird modulo 360 genommen
/// - `saturation`: Sättigung 0-100 %
/// - `value`: Helligkeit 0-100 %
///
/// # Beispiele
///
/// ```
/// # use rgb::RGB8;
/// # use wortuhr_core::hsv_to_rgb;
/// assert_eq!(hsv_to_rgb(0, 100, 100), RGB8 { r: 255, g: 0, b: 0 });
/// assert_eq!(hsv_to_rgb(120, 100, 100), RGB8 { r: 0, g: 255, b: 0 });
/// ```
pub fn hsv_to_rgb(hue: u16, saturation: u8, value: u8) -> RGB8 {
    let hue = u32::from(hue % 360);
    let saturation = u32::from(saturation.min(100));
    let value = u32::from(value.min(100));

    let rgb_max = value * 255 / 100;
    let rgb_min = rgb_max * (100 - saturation) / 100;

    let sector = hue / 60;
    let diff = hue % 60;

    // Anpassung innerhalb des Sektors
    let rgb_adj = (rgb_max - rgb_min) * diff / 60;

    let (r, g, b) = match sector {
        0 => (rgb_max, rgb_min + rgb_adj, rgb_min),
        1 => (rgb_max - rgb_adj, rgb_max, rgb_min),
        2 => (rgb_min, rgb_max, rgb_min + rgb_adj),
        3 => (rgb_min, rgb_max - rgb_adj, rgb_max),
        4 => (rgb_min + rgb_adj, rgb_min, rgb_max),
        _ => (rgb_max, rgb_min, rgb_max - rgb_adj),
    };

    // rgb_max <= 255, alle Kanäle liegen in 0..=rgb_max
    RGB8 {
        r: r as u8,
        g: g as u8,
        b: b as u8,
    }
}
