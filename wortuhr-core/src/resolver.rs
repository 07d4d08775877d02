//! Wort-Maske → LED an/aus
//!
//! Expandiert die gesetzten Bits einer [`WordMask`] über die Wort-Tabelle
//! auf einzelne LEDs.

use crate::words::{LED_COUNT, WORD_TABLE, Word, WordMask, WordSpan};

/// An/Aus-Zustand aller LEDs des Strips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitLeds {
    leds: [bool; LED_COUNT],
}

impl Default for LitLeds {
    fn default() -> Self {
        Self::new()
    }
}

impl LitLeds {
    /// Alle LEDs aus
    pub const fn new() -> Self {
        Self {
            leds: [false; LED_COUNT],
        }
    }

    /// Berechnet den Zustand für eine Maske mit der festen Wort-Tabelle
    pub fn from_mask(mask: WordMask) -> Self {
        let mut lit = Self::new();
        lit.resolve(mask);
        lit
    }

    pub fn resolve(&mut self, mask: WordMask) {
        self.resolve_with(mask, &WORD_TABLE);
    }

    /// Setzt alle LEDs zurück und schaltet danach die Bereiche aller
    /// gesetzten Wörter ein
    ///
    /// Überlappende Wörter werden einfach mehrfach eingeschaltet.
    pub fn resolve_with(&mut self, mask: WordMask, table: &[WordSpan; Word::COUNT]) {
        self.clear();
        for word in mask.words() {
            let range = table[word as usize].range();
            let end = range.end.min(LED_COUNT);
            for led in &mut self.leds[range.start.min(end)..end] {
                *led = true;
            }
        }
    }

    pub fn clear(&mut self) {
        self.leds = [false; LED_COUNT];
    }

    /// `false` auch für Indizes außerhalb des Strips
    pub fn is_lit(&self, index: usize) -> bool {
        self.leds.get(index).copied().unwrap_or(false)
    }

    pub fn lit_count(&self) -> usize {
        self.leds.iter().filter(|on| **on).count()
    }

    /// Indizes aller eingeschalteten LEDs, aufsteigend
    pub fn lit_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.leds
            .iter()
            .enumerate()
            .filter_map(|(index, on)| on.then_some(index))
    }

    pub fn as_slice(&self) -> &[bool; LED_COUNT] {
        &self.leds
    }
}
