//! Wort-Tabelle der Uhrenfront
//!
//! Jedes Wort der Front ist ein zusammenhängender Bereich im LED-Strip.
//! Die Tabelle ist fest verdrahtet und wird zur Laufzeit nie verändert.

use core::ops::{BitOr, BitOrAssign, Range};

/// Anzahl der LEDs im Strip (10 x 11 Buchstaben + 4 Minuten-Punkte)
pub const LED_COUNT: usize = 114;

/// Bytes pro LED im Pixel-Buffer (Grün, Blau, Rot)
pub const BYTES_PER_LED: usize = 3;

/// Ein adressierbares Wort (oder Minuten-Punkt) der Uhrenfront
///
/// Der Diskriminant ist gleichzeitig die Bit-Position in der [`WordMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Word {
    Es = 0,
    Ist,
    Fuenf1,
    Zehn1,
    Zwanzig,
    Dreiviertel,
    Viertel,
    Vor,
    Nach,
    Halb,
    Ein,
    Eins,
    Zwei,
    Drei,
    Vier,
    Fuenf2,
    Sechs,
    Sieben,
    Acht,
    Neun,
    Zehn2,
    Elf,
    Zwoelf,
    Uhr,
    Minute1,
    Minute2,
    Minute3,
    Minute4,
}

impl Word {
    /// Anzahl der Wörter (inkl. der vier Minuten-Punkte)
    pub const COUNT: usize = 28;

    /// Alle Wörter in Bit-Reihenfolge
    pub const ALL: [Word; Word::COUNT] = [
        Word::Es,
        Word::Ist,
        Word::Fuenf1,
        Word::Zehn1,
        Word::Zwanzig,
        Word::Dreiviertel,
        Word::Viertel,
        Word::Vor,
        Word::Nach,
        Word::Halb,
        Word::Ein,
        Word::Eins,
        Word::Zwei,
        Word::Drei,
        Word::Vier,
        Word::Fuenf2,
        Word::Sechs,
        Word::Sieben,
        Word::Acht,
        Word::Neun,
        Word::Zehn2,
        Word::Elf,
        Word::Zwoelf,
        Word::Uhr,
        Word::Minute1,
        Word::Minute2,
        Word::Minute3,
        Word::Minute4,
    ];

    /// Bit dieses Wortes in der Zeit-Maske
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }

    /// LED-Bereich dieses Wortes
    pub const fn span(self) -> WordSpan {
        WORD_TABLE[self as usize]
    }

    /// Anzeigename für Logs
    pub const fn label(self) -> &'static str {
        match self {
            Word::Es => "ES",
            Word::Ist => "IST",
            Word::Fuenf1 => "FÜNF1",
            Word::Zehn1 => "ZEHN1",
            Word::Zwanzig => "ZWANZIG",
            Word::Dreiviertel => "DREIVIERTEL",
            Word::Viertel => "VIERTEL",
            Word::Vor => "VOR",
            Word::Nach => "NACH",
            Word::Halb => "HALB",
            Word::Ein => "EIN",
            Word::Eins => "EINS",
            Word::Zwei => "ZWEI",
            Word::Drei => "DREI",
            Word::Vier => "VIER",
            Word::Fuenf2 => "FÜNF2",
            Word::Sechs => "SECHS",
            Word::Sieben => "SIEBEN",
            Word::Acht => "ACHT",
            Word::Neun => "NEUN",
            Word::Zehn2 => "ZEHN2",
            Word::Elf => "ELF",
            Word::Zwoelf => "ZWÖLF",
            Word::Uhr => "UHR",
            Word::Minute1 => "min1",
            Word::Minute2 => "min2",
            Word::Minute3 => "min3",
            Word::Minute4 => "min4",
        }
    }
}

/// Zusammenhängender LED-Bereich (Start-Index, Länge)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan {
    pub start: u8,
    pub len: u8,
}

impl WordSpan {
    pub const fn new(start: u8, len: u8) -> Self {
        Self { start, len }
    }

    /// LED-Indizes als Range
    pub const fn range(&self) -> Range<usize> {
        self.start as usize..self.start as usize + self.len as usize
    }
}

/// Physisches Layout der Front, indiziert über `Word as usize`
///
/// Überlappungen sind gewollt: VIERTEL liegt in DREIVIERTEL, EIN in EINS
/// und ELF teilt sich LED 51 mit FÜNF2. Nicht deduplizieren.
#[rustfmt::skip]
pub const WORD_TABLE: [WordSpan; Word::COUNT] = [
    WordSpan::new(0, 2),    // ES
    WordSpan::new(3, 3),    // IST
    WordSpan::new(7, 4),    // FÜNF1
    WordSpan::new(18, 4),   // ZEHN1
    WordSpan::new(11, 7),   // ZWANZIG
    WordSpan::new(22, 11),  // DREIVIERTEL
    WordSpan::new(26, 7),   // VIERTEL
    WordSpan::new(41, 3),   // VOR
    WordSpan::new(33, 4),   // NACH
    WordSpan::new(44, 4),   // HALB
    WordSpan::new(63, 3),   // EIN
    WordSpan::new(62, 4),   // EINS
    WordSpan::new(55, 4),   // ZWEI
    WordSpan::new(66, 4),   // DREI
    WordSpan::new(73, 4),   // VIER
    WordSpan::new(51, 4),   // FÜNF2
    WordSpan::new(83, 5),   // SECHS
    WordSpan::new(88, 6),   // SIEBEN
    WordSpan::new(77, 4),   // ACHT
    WordSpan::new(103, 4),  // NEUN
    WordSpan::new(106, 4),  // ZEHN2
    WordSpan::new(49, 3),   // ELF
    WordSpan::new(94, 5),   // ZWÖLF
    WordSpan::new(99, 3),   // UHR
    WordSpan::new(113, 1),  // min1
    WordSpan::new(112, 1),  // min2
    WordSpan::new(111, 1),  // min3
    WordSpan::new(110, 1),  // min4
];

/// Bitmaske der aktiven Wörter
///
/// Nur die unteren 28 Bits sind belegt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct WordMask(u32);

impl WordMask {
    pub const EMPTY: WordMask = WordMask(0);

    const VALID_BITS: u32 = (1 << Word::COUNT) - 1;

    /// Erstellt eine Maske aus Roh-Bits, ungültige Bits werden verworfen
    pub const fn from_bits(bits: u32) -> Self {
        WordMask(bits & Self::VALID_BITS)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Gibt eine Kopie mit zusätzlich gesetztem Wort zurück
    pub const fn with(self, word: Word) -> Self {
        WordMask(self.0 | word.bit())
    }

    pub const fn union(self, other: WordMask) -> Self {
        WordMask(self.0 | other.0)
    }

    pub const fn contains(self, word: Word) -> bool {
        self.0 & word.bit() != 0
    }

    pub fn insert(&mut self, word: Word) {
        self.0 |= word.bit();
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iteriert über die gesetzten Wörter in Bit-Reihenfolge
    pub fn words(self) -> impl Iterator<Item = Word> {
        Word::ALL.into_iter().filter(move |word| self.contains(*word))
    }
}

impl BitOr for WordMask {
    type Output = WordMask;

    fn bitor(self, rhs: WordMask) -> WordMask {
        self.union(rhs)
    }
}

impl BitOr<Word> for WordMask {
    type Output = WordMask;

    fn bitor(self, rhs: Word) -> WordMask {
        self.with(rhs)
    }
}

impl BitOrAssign for WordMask {
    fn bitor_assign(&mut self, rhs: WordMask) {
        *self = self.union(rhs);
    }
}

impl From<Word> for WordMask {
    fn from(word: Word) -> Self {
        WordMask::EMPTY.with(word)
    }
}

impl FromIterator<Word> for WordMask {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        iter.into_iter().fold(WordMask::EMPTY, WordMask::with)
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Word {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.label())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WordMask {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "WordMask {{ ");
        for word in self.words() {
            defmt::write!(fmt, "{} ", word.label());
        }
        defmt::write!(fmt, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_bits_are_distinct() {
        let all: WordMask = Word::ALL.into_iter().collect();
        assert_eq!(all.len(), Word::COUNT);
        assert_eq!(all.bits(), (1 << 28) - 1);
    }

    #[test]
    fn test_all_is_in_bit_order() {
        for (index, word) in Word::ALL.iter().enumerate() {
            assert_eq!(*word as usize, index);
        }
    }

    #[test]
    fn test_spans_fit_into_strip() {
        for word in Word::ALL {
            let span = word.span();
            assert!(span.len > 0, "{} hat keine LEDs", word.label());
            assert!(span.range().end <= LED_COUNT, "{} ragt über den Strip", word.label());
        }
    }

    #[test]
    fn test_intended_overlaps() {
        let viertel = Word::Viertel.span().range();
        let dreiviertel = Word::Dreiviertel.span().range();
        assert!(viertel.start >= dreiviertel.start && viertel.end <= dreiviertel.end);

        let ein = Word::Ein.span().range();
        let eins = Word::Eins.span().range();
        assert!(ein.start >= eins.start && ein.end <= eins.end);

        assert!(Word::Elf.span().range().contains(&51));
        assert!(Word::Fuenf2.span().range().contains(&51));
    }

    #[test]
    fn test_minute_dots_count_down_from_the_end() {
        assert_eq!(Word::Minute1.span(), WordSpan::new(113, 1));
        assert_eq!(Word::Minute4.span(), WordSpan::new(110, 1));
    }

    #[test]
    fn test_from_bits_drops_unused_bits() {
        let mask = WordMask::from_bits(0xFFFF_FFFF);
        assert_eq!(mask.bits(), (1 << 28) - 1);
    }

    #[test]
    fn test_words_iterates_in_bit_order() {
        let mask = WordMask::EMPTY | Word::Uhr | Word::Es | Word::Drei;
        let mut words = mask.words();
        assert_eq!(words.next(), Some(Word::Es));
        assert_eq!(words.next(), Some(Word::Drei));
        assert_eq!(words.next(), Some(Word::Uhr));
        assert_eq!(words.next(), None);
    }
}
