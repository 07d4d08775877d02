//! Zeit → Wort-Maske
//!
//! Setzt die deutschen Sprechregeln als Tabellen um:
//! - Stundenwort über die "effektive" Stunde (ab :25 wird auf die nächste
//!   Stunde bezogen, ebenso im Viertel-Fenster :15-:19)
//! - Fünf-Minuten-Phrase über die rohe Minute
//! - Minuten-Punkte für den Rest `minute % 5`

use crate::traits::ClockError;
use crate::words::{Word, WordMask};

/// Stundenwort je `effektive Stunde % 12`
///
/// Index 1 ist "EINS"; "EIN" (volle Stunde) wird in [`hour_word`] gewählt.
const HOUR_WORDS: [Word; 12] = [
    Word::Zwoelf,
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
];

/// Wörter je Fünf-Minuten-Block, Index `minute / 5`
const MINUTE_BUCKETS: [WordMask; 12] = [
    // :00 ES IST ... UHR
    WordMask::EMPTY.with(Word::Es).with(Word::Ist).with(Word::Uhr),
    // :05 FÜNF NACH
    WordMask::EMPTY.with(Word::Fuenf1).with(Word::Nach),
    // :10 ZEHN NACH
    WordMask::EMPTY.with(Word::Zehn1).with(Word::Nach),
    // :15 VIERTEL (nächste Stunde)
    WordMask::EMPTY.with(Word::Viertel),
    // :20 ZWANZIG NACH
    WordMask::EMPTY.with(Word::Zwanzig).with(Word::Nach),
    // :25 FÜNF VOR HALB
    WordMask::EMPTY.with(Word::Fuenf1).with(Word::Vor).with(Word::Halb),
    // :30 ES IST HALB
    WordMask::EMPTY.with(Word::Es).with(Word::Ist).with(Word::Halb),
    // :35 FÜNF NACH HALB
    WordMask::EMPTY.with(Word::Fuenf1).with(Word::Nach).with(Word::Halb),
    // :40 ZWANZIG VOR
    WordMask::EMPTY.with(Word::Zwanzig).with(Word::Vor),
    // :45 DREIVIERTEL
    WordMask::EMPTY.with(Word::Dreiviertel),
    // :50 ZEHN VOR
    WordMask::EMPTY.with(Word::Zehn1).with(Word::Vor),
    // :55 FÜNF VOR
    WordMask::EMPTY.with(Word::Fuenf1).with(Word::Vor),
];

/// Minuten-Punkte je `minute % 5`, immer von Punkt 1 aufwärts
const MINUTE_DOTS: [WordMask; 5] = [
    WordMask::EMPTY,
    WordMask::EMPTY.with(Word::Minute1),
    WordMask::EMPTY.with(Word::Minute1).with(Word::Minute2),
    WordMask::EMPTY
        .with(Word::Minute1)
        .with(Word::Minute2)
        .with(Word::Minute3),
    WordMask::EMPTY
        .with(Word::Minute1)
        .with(Word::Minute2)
        .with(Word::Minute3)
        .with(Word::Minute4),
];

fn check_range(hour: u8, minute: u8) -> Result<(), ClockError> {
    if hour < 24 && minute < 60 {
        Ok(())
    } else {
        Err(ClockError::InvalidInput)
    }
}

/// Stunde, auf die sich die Phrase bezieht
///
/// Nur in [0,15) und [20,25) bleibt die aktuelle Stunde stehen,
/// sonst wird auf die nächste Stunde gerundet ("viertel vier" um 3:15).
pub fn effective_hour(hour: u8, minute: u8) -> u8 {
    if minute < 15 || (20..25).contains(&minute) {
        hour
    } else {
        (hour % 24 + 1) % 24
    }
}

/// Stundenwort für eine rohe Uhrzeit
///
/// "EIN" nur zur vollen Stunde ("es ist ein Uhr"), sonst "EINS".
pub fn hour_word(hour: u8, minute: u8) -> Word {
    match HOUR_WORDS[(effective_hour(hour, minute) % 12) as usize] {
        Word::Eins if minute < 5 => Word::Ein,
        word => word,
    }
}

/// Wörter der Fünf-Minuten-Phrase (ohne Stundenwort und Punkte)
pub fn minute_phrase(minute: u8) -> WordMask {
    MINUTE_BUCKETS[(minute / 5) as usize % MINUTE_BUCKETS.len()]
}

/// Minuten-Punkte für den Rest innerhalb des Fünf-Minuten-Blocks
pub fn minute_dots(minute: u8) -> WordMask {
    MINUTE_DOTS[(minute % 5) as usize]
}

/// Berechnet die Wort-Maske für eine Uhrzeit
///
/// Deterministisch, ohne Seiteneffekte.
///
/// # Fehlerbehandlung
/// `ClockError::InvalidInput` für `hour >= 24` oder `minute >= 60`
///
/// # Beispiele
///
/// ```
/// # use wortuhr_core::{Word, time_mask};
/// let mask = time_mask(3, 0).unwrap();
/// assert!(mask.contains(Word::Drei));
/// assert!(mask.contains(Word::Uhr));
/// ```
pub fn time_mask(hour: u8, minute: u8) -> Result<WordMask, ClockError> {
    check_range(hour, minute)?;
    Ok(WordMask::from(hour_word(hour, minute)) | minute_phrase(minute) | minute_dots(minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(words: &[Word]) -> WordMask {
        words.iter().copied().collect()
    }

    #[test]
    fn test_full_hour() {
        assert_eq!(
            time_mask(3, 0),
            Ok(mask(&[Word::Es, Word::Ist, Word::Drei, Word::Uhr]))
        );
    }

    #[test]
    fn test_quarter_uses_next_hour() {
        assert_eq!(
            time_mask(2, 16),
            Ok(mask(&[Word::Viertel, Word::Drei, Word::Minute1]))
        );
    }

    #[test]
    fn test_ein_uhr_with_dots() {
        assert_eq!(
            time_mask(1, 3),
            Ok(mask(&[
                Word::Es,
                Word::Ist,
                Word::Ein,
                Word::Uhr,
                Word::Minute1,
                Word::Minute2,
                Word::Minute3,
            ]))
        );
    }

    #[test]
    fn test_eins_after_full_hour() {
        assert_eq!(hour_word(13, 5), Word::Eins);
        assert_eq!(hour_word(0, 30), Word::Eins);
        assert_eq!(hour_word(13, 4), Word::Ein);
    }

    #[test]
    fn test_midnight_rollover() {
        assert_eq!(
            time_mask(23, 58),
            Ok(mask(&[
                Word::Zwoelf,
                Word::Fuenf1,
                Word::Vor,
                Word::Minute1,
                Word::Minute2,
                Word::Minute3,
            ]))
        );
    }

    #[test]
    fn test_twenty_past_keeps_hour() {
        assert_eq!(effective_hour(4, 20), 4);
        assert_eq!(effective_hour(4, 24), 4);
        assert_eq!(effective_hour(4, 25), 5);
        assert_eq!(effective_hour(4, 14), 4);
        assert_eq!(effective_hour(4, 15), 5);
    }

    #[test]
    fn test_dreiviertel_bucket() {
        assert_eq!(
            time_mask(8, 45),
            Ok(mask(&[Word::Dreiviertel, Word::Neun]))
        );
    }

    #[test]
    fn test_half_hour() {
        assert_eq!(
            time_mask(11, 32),
            Ok(mask(&[
                Word::Es,
                Word::Ist,
                Word::Halb,
                Word::Zwoelf,
                Word::Minute1,
                Word::Minute2,
            ]))
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(time_mask(24, 0), Err(ClockError::InvalidInput));
        assert_eq!(time_mask(0, 60), Err(ClockError::InvalidInput));
        assert_eq!(time_mask(255, 255), Err(ClockError::InvalidInput));
    }

    #[test]
    fn test_every_minute_has_exactly_one_hour_word() {
        const HOUR_SET: [Word; 13] = [
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
        ];
        for hour in 0..24 {
            for minute in 0..60 {
                let mask = time_mask(hour, minute).unwrap();
                let hours = HOUR_SET.iter().filter(|w| mask.contains(**w)).count();
                assert_eq!(hours, 1, "{}:{}", hour, minute);
                assert_eq!(
                    mask.contains(Word::Minute1),
                    minute % 5 != 0,
                    "{}:{}",
                    hour,
                    minute
                );
            }
        }
    }

    #[test]
    fn test_twelve_hour_pairs_match() {
        for hour in 0..12 {
            for minute in 0..60 {
                assert_eq!(time_mask(hour, minute), time_mask(hour + 12, minute));
            }
        }
    }
}
