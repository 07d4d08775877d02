//! Farb-Renderer
//!
//! Malt die eingeschalteten LEDs mit einem wandernden Farbkreis in den
//! Pixel-Buffer. Der Farbton jeder LED hängt von ihrer Position und einem
//! pro Frame weiterlaufenden Offset ab.

use rgb::RGB8;

use crate::color::hsv_to_rgb;
use crate::resolver::LitLeds;
use crate::words::{BYTES_PER_LED, LED_COUNT};

/// Roh-Bytes für den Strip, pro LED in der Reihenfolge Grün, Blau, Rot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    bytes: [u8; LED_COUNT * BYTES_PER_LED],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; LED_COUNT * BYTES_PER_LED],
        }
    }

    /// Setzt eine LED, Indizes außerhalb des Strips werden ignoriert
    pub fn set(&mut self, index: usize, color: RGB8) {
        let offset = index * BYTES_PER_LED;
        if let Some(pixel) = self.bytes.get_mut(offset..offset + BYTES_PER_LED) {
            pixel[0] = color.g;
            pixel[1] = color.b;
            pixel[2] = color.r;
        }
    }

    /// Farbe einer LED (schwarz außerhalb des Strips)
    pub fn get(&self, index: usize) -> RGB8 {
        let offset = index * BYTES_PER_LED;
        match self.bytes.get(offset..offset + BYTES_PER_LED) {
            Some(pixel) => RGB8 {
                r: pixel[2],
                g: pixel[0],
                b: pixel[1],
            },
            None => RGB8::default(),
        }
    }

    pub fn clear(&mut self) {
        self.bytes = [0; LED_COUNT * BYTES_PER_LED];
    }

    pub fn is_dark(&self) -> bool {
        self.bytes.iter().all(|byte| *byte == 0)
    }

    pub fn as_bytes(&self) -> &[u8; LED_COUNT * BYTES_PER_LED] {
        &self.bytes
    }

    /// Roh-Bytes in 3er-Gruppen (G, B, R)
    pub fn pixels(&self) -> impl Iterator<Item = [u8; BYTES_PER_LED]> + '_ {
        self.bytes
            .chunks_exact(BYTES_PER_LED)
            .map(|pixel| [pixel[0], pixel[1], pixel[2]])
    }
}

/// Umlaufender Farbton-Offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueWheel {
    offset: u16,
    step: u16,
}

impl HueWheel {
    pub const fn new(step: u16) -> Self {
        Self {
            offset: 0,
            step: step % 360,
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn advance(&mut self) {
        self.offset = (self.offset + self.step) % 360;
    }
}

/// Farbton einer LED: Position auf dem Kreis plus Offset
pub fn led_hue(index: usize, offset: u16) -> u16 {
    ((index * 360 / LED_COUNT + offset as usize) % 360) as u16
}

/// Renderer-Zustand, gehört exklusiv der Refresh-Schleife
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    pixels: PixelBuffer,
    wheel: HueWheel,
    saturation: u8,
    value: u8,
}

impl FrameRenderer {
    pub const fn new(hue_step: u16, saturation: u8, value: u8) -> Self {
        Self {
            pixels: PixelBuffer::new(),
            wheel: HueWheel::new(hue_step),
            saturation,
            value,
        }
    }

    /// Rendert einen Frame und dreht den Farbkreis weiter
    ///
    /// Mit `clear` wird der ganze Buffer vorher genullt, damit ausgeschaltete
    /// LEDs keine alte Farbe behalten. Danach werden nur die eingeschalteten
    /// LEDs neu eingefärbt.
    pub fn render(&mut self, lit: &LitLeds, clear: bool) -> &PixelBuffer {
        if clear {
            self.pixels.clear();
        }

        let offset = self.wheel.offset();
        for index in lit.lit_indices() {
            let color = hsv_to_rgb(led_hue(index, offset), self.saturation, self.value);
            self.pixels.set(index, color);
        }

        self.wheel.advance();
        &self.pixels
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn hue_offset(&self) -> u16 {
        self.wheel.offset()
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn set_value(&mut self, value: u8) {
        self.value = value.min(100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::{Word, WordMask};

    #[test]
    fn test_pixel_byte_order() {
        let mut pixels = PixelBuffer::new();
        pixels.set(1, RGB8 { r: 1, g: 2, b: 3 });
        assert_eq!(&pixels.as_bytes()[3..6], &[2, 3, 1]);
        assert_eq!(pixels.get(1), RGB8 { r: 1, g: 2, b: 3 });
    }

    #[test]
    fn test_set_out_of_range_is_ignored() {
        let mut pixels = PixelBuffer::new();
        pixels.set(LED_COUNT, RGB8 { r: 9, g: 9, b: 9 });
        assert!(pixels.is_dark());
    }

    #[test]
    fn test_hue_wheel_wraps() {
        let mut wheel = HueWheel::new(1);
        for _ in 0..359 {
            wheel.advance();
        }
        assert_eq!(wheel.offset(), 359);
        wheel.advance();
        assert_eq!(wheel.offset(), 0);
    }

    #[test]
    fn test_led_hue() {
        assert_eq!(led_hue(0, 0), 0);
        assert_eq!(led_hue(57, 0), 180);
        assert_eq!(led_hue(113, 10), (113 * 360 / 114 + 10) % 360);
        assert_eq!(led_hue(0, 359), 359);
    }

    #[test]
    fn test_unlit_frame_is_dark() {
        let mut renderer = FrameRenderer::new(1, 100, 100);
        assert!(renderer.render(&LitLeds::new(), true).is_dark());
    }

    #[test]
    fn test_first_led_starts_red() {
        let mut renderer = FrameRenderer::new(1, 100, 100);
        let lit = LitLeds::from_mask(Word::Es.into());
        let pixels = renderer.render(&lit, true);
        assert_eq!(pixels.get(0), RGB8 { r: 255, g: 0, b: 0 });
        assert_eq!(&pixels.as_bytes()[0..3], &[0, 0, 255]);
        assert_eq!(renderer.hue_offset(), 1);
    }

    #[test]
    fn test_clear_removes_stale_colors() {
        let mut renderer = FrameRenderer::new(1, 100, 100);
        renderer.render(&LitLeds::from_mask(Word::Es.into()), true);
        let pixels = renderer.render(&LitLeds::from_mask(Word::Uhr.into()), true);
        assert_eq!(pixels.get(0), RGB8::default());
        assert_ne!(pixels.get(99), RGB8::default());
    }

    #[test]
    fn test_repaint_only_touches_lit_leds() {
        let mut renderer = FrameRenderer::new(1, 100, 100);
        let lit = LitLeds::from_mask(WordMask::EMPTY | Word::Ist);
        renderer.render(&lit, true);
        let pixels = renderer.render(&lit, false);
        for index in 0..LED_COUNT {
            assert_eq!(
                pixels.get(index) != RGB8::default(),
                lit.is_lit(index),
                "LED {}",
                index
            );
        }
    }
}
