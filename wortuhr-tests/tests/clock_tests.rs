//! Integration Tests für die Wortuhr
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockRtc und
//! MockLedWriter

use rgb::RGB8;
use wortuhr_core::{
    BoardConfig, CalendarDate, ClockBoard, ClockError, ClockReading, LED_COUNT, LedError,
    NightWindow, PixelBuffer, RealTimeClock, RefreshState, SmartLedWriter, TimeOfDay,
    TimeSetRequest, Word, WordMask, time_mask,
};

// ============================================================================
// Mock RTC
// ============================================================================

pub struct MockRtc {
    /// Wird bei `get_time` ungeprüft zurückgegeben
    pub time: ClockReading,
    pub date: CalendarDate,
    pub read_count: usize,
    /// Anzahl Bus-Transaktionen beim Schreiben
    pub write_count: usize,
    pub fail_next_read: bool,
    pub fail_writes: bool,
}

impl MockRtc {
    pub fn at(hour: u8, minute: u8) -> Self {
        Self {
            time: ClockReading {
                hour,
                minute,
                second: 0,
            },
            date: CalendarDate::new(2025, 1, 1).unwrap(),
            read_count: 0,
            write_count: 0,
            fail_next_read: false,
            fail_writes: false,
        }
    }
}

impl RealTimeClock for MockRtc {
    fn get_time(&mut self) -> Result<ClockReading, ClockError> {
        if self.fail_next_read {
            self.fail_next_read = false;
            return Err(ClockError::Communication);
        }
        self.read_count += 1;
        Ok(self.time)
    }

    fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), ClockError> {
        if self.fail_writes {
            return Err(ClockError::Communication);
        }
        self.write_count += 1;
        self.time = ClockReading {
            hour,
            minute,
            second,
        };
        Ok(())
    }

    fn get_date(&mut self) -> Result<CalendarDate, ClockError> {
        Ok(self.date)
    }

    fn set_date(&mut self, date: CalendarDate) -> Result<(), ClockError> {
        if self.fail_writes {
            return Err(ClockError::Communication);
        }
        self.write_count += 1;
        self.date = date;
        Ok(())
    }

    // Wie der DS3231: ein Registerblock, eine Transaktion
    fn set_date_time(&mut self, date: CalendarDate, time: ClockReading) -> Result<(), ClockError> {
        if self.fail_writes {
            return Err(ClockError::Communication);
        }
        self.write_count += 1;
        self.date = date;
        self.time = time;
        Ok(())
    }
}

// ============================================================================
// Mock LED Writer
// ============================================================================

#[derive(Default)]
pub struct MockLedWriter {
    pub frames: Vec<PixelBuffer>,
    pub fail_next_write: bool,
}

impl MockLedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> &PixelBuffer {
        self.frames.last().expect("no frame written")
    }
}

impl SmartLedWriter for MockLedWriter {
    fn write(&mut self, frame: &PixelBuffer) -> Result<(), LedError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }

        self.frames.push(frame.clone());
        Ok(())
    }
}

fn lit_in_frame(frame: &PixelBuffer) -> Vec<usize> {
    (0..LED_COUNT)
        .filter(|index| frame.get(*index) != RGB8::default())
        .collect()
}

fn spans_of(mask: WordMask) -> Vec<usize> {
    (0..LED_COUNT)
        .filter(|index| mask.words().any(|word| word.span().range().contains(index)))
        .collect()
}

// ============================================================================
// Tests: Mocks
// ============================================================================

#[test]
fn test_mock_led_writer_fail() {
    let mut mock = MockLedWriter::new();
    mock.fail_next_write = true;

    assert_eq!(mock.write(&PixelBuffer::new()), Err(LedError::WriteFailed));
    assert!(mock.frames.is_empty());

    // Zweiter Versuch klappt wieder
    assert!(mock.write(&PixelBuffer::new()).is_ok());
    assert_eq!(mock.frames.len(), 1);
}

#[test]
fn test_mock_rtc_fail_once() {
    let mut rtc = MockRtc::at(3, 0);
    rtc.fail_next_read = true;
    assert_eq!(rtc.get_time(), Err(ClockError::Communication));
    assert_eq!(rtc.get_time().unwrap().hour_minute(), (3, 0));
}

// ============================================================================
// Tests: Refresh-Zyklus
// ============================================================================

#[test]
fn test_full_hour_frame() {
    let mut board = ClockBoard::default();
    let mut rtc = MockRtc::at(3, 0);
    let mut led = MockLedWriter::new();

    let outcome = board.refresh(&mut rtc, &mut led).unwrap();
    let status = outcome.changed.unwrap();
    assert_eq!(
        status.mask,
        WordMask::EMPTY | Word::Es | Word::Ist | Word::Drei | Word::Uhr
    );

    let frame = led.last_frame();
    assert_eq!(lit_in_frame(frame), spans_of(status.mask));

    // Erster Frame: Offset 0, LED 0 ist rot, Bytes in G, B, R
    assert_eq!(frame.get(0), RGB8 { r: 255, g: 0, b: 0 });
    assert_eq!(&frame.as_bytes()[0..3], &[0, 0, 255]);
    assert_eq!(board.state(), RefreshState::Idle);
}

#[test]
fn test_same_minute_does_not_recompute() {
    let mut board = ClockBoard::default();
    let mut rtc = MockRtc::at(3, 0);
    let mut led = MockLedWriter::new();

    board.refresh(&mut rtc, &mut led).unwrap();
    rtc.time.second = 30;
    let outcome = board.refresh(&mut rtc, &mut led).unwrap();

    assert_eq!(outcome.changed, None);
    assert_eq!(led.frames.len(), 2);
    assert_eq!(lit_in_frame(&led.frames[1]), lit_in_frame(&led.frames[0]));
    // Farbkreis ist trotzdem weitergelaufen
    assert_ne!(led.frames[1], led.frames[0]);
}

#[test]
fn test_minute_change_clears_stale_leds() {
    let mut board = ClockBoard::default();
    let mut rtc = MockRtc::at(3, 0);
    let mut led = MockLedWriter::new();

    board.refresh(&mut rtc, &mut led).unwrap();
    rtc.time.minute = 5;
    let outcome = board.refresh(&mut rtc, &mut led).unwrap();

    let mask = outcome.changed.unwrap().mask;
    assert_eq!(mask, WordMask::EMPTY | Word::Fuenf1 | Word::Nach | Word::Drei);

    let frame = led.last_frame();
    // UHR (99..102) und ES (0..2) sind aus
    assert_eq!(frame.get(0), RGB8::default());
    assert_eq!(frame.get(100), RGB8::default());
    assert_eq!(lit_in_frame(frame), spans_of(mask));
}

#[test]
fn test_rtc_failure_freezes_display() {
    let mut board = ClockBoard::default();
    let mut rtc = MockRtc::at(3, 0);
    let mut led = MockLedWriter::new();

    board.refresh(&mut rtc, &mut led).unwrap();
    let mask = board.mask();
    let hue = board.hue_offset();
    let pixels = board.pixels().clone();

    rtc.fail_next_read = true;
    assert_eq!(
        board.refresh(&mut rtc, &mut led),
        Err(ClockError::Communication)
    );

    assert_eq!(led.frames.len(), 1);
    assert_eq!(board.mask(), mask);
    assert_eq!(board.hue_offset(), hue);
    assert_eq!(board.pixels(), &pixels);

    // Nächster Zyklus läuft normal weiter
    assert!(board.refresh(&mut rtc, &mut led).is_ok());
    assert_eq!(led.frames.len(), 2);
}

#[test]
fn test_invalid_reading_is_rejected() {
    let mut board = ClockBoard::default();
    let mut rtc = MockRtc::at(3, 0);
    let mut led = MockLedWriter::new();

    board.refresh(&mut rtc, &mut led).unwrap();
    let mask = board.mask();

    rtc.time.hour = 24;
    assert_eq!(
        board.refresh(&mut rtc, &mut led),
        Err(ClockError::InvalidInput)
    );
    assert_eq!(led.frames.len(), 1);
    assert_eq!(board.mask(), mask);
}

#[test]
fn test_transmit_failure_keeps_dirty() {
    let mut board = ClockBoard::default();
    let mut rtc = MockRtc::at(3, 0);
    let mut led = MockLedWriter::new();

    led.fail_next_write = true;
    assert_eq!(
        board.refresh(&mut rtc, &mut led),
        Err(ClockError::TransmitFailed)
    );
    assert_eq!(board.state(), RefreshState::Dirty);

    // Gleiche Minute, trotzdem kompletter Neuaufbau
    let outcome = board.refresh(&mut rtc, &mut led).unwrap();
    assert_eq!(outcome.changed.map(|status| status.mask), Some(board.mask()));
    assert_eq!(board.state(), RefreshState::Idle);
    assert_eq!(lit_in_frame(led.last_frame()), spans_of(board.mask()));
}

#[test]
fn test_minute_change_reported_after_failed_transmit() {
    let mut board = ClockBoard::default();
    let mut rtc = MockRtc::at(3, 0);
    let mut led = MockLedWriter::new();
    board.refresh(&mut rtc, &mut led).unwrap();

    rtc.time.minute = 5;
    led.fail_next_write = true;
    assert_eq!(
        board.refresh(&mut rtc, &mut led),
        Err(ClockError::TransmitFailed)
    );
    assert!(board.mask().contains(Word::Fuenf1));

    // Erst mit dem ersten sichtbaren Frame wird 3:05 gemeldet, danach nicht mehr
    let status = board.refresh(&mut rtc, &mut led).unwrap().changed.unwrap();
    assert_eq!((status.hour, status.minute), (3, 5));
    assert_eq!(status.mask, board.mask());
    assert_eq!(board.refresh(&mut rtc, &mut led).unwrap().changed, None);
}

#[test]
fn test_hue_wraps_after_full_circle() {
    let mut board = ClockBoard::default();
    let mut rtc = MockRtc::at(3, 0);
    let mut led = MockLedWriter::new();

    for _ in 0..360 {
        board.refresh(&mut rtc, &mut led).unwrap();
    }
    assert_eq!(board.hue_offset(), 0);
    board.refresh(&mut rtc, &mut led).unwrap();
    assert_eq!(led.frames[360], led.frames[0]);
}

#[test]
fn test_night_window_dims_frame() {
    let config = BoardConfig {
        night: Some(NightWindow {
            start: TimeOfDay::new(22, 0),
            end: TimeOfDay::new(7, 0),
            value: 10,
        }),
        ..BoardConfig::default()
    };
    let mut board = ClockBoard::new(config);
    let mut rtc = MockRtc::at(23, 0);
    let mut led = MockLedWriter::new();

    board.refresh(&mut rtc, &mut led).unwrap();
    // 10 % von 255
    assert_eq!(led.last_frame().get(0), RGB8 { r: 25, g: 0, b: 0 });
}

// ============================================================================
// Tests: Uhr stellen
// ============================================================================

#[test]
fn test_time_set_applies_on_next_refresh() {
    let mut board = ClockBoard::default();
    let mut rtc = MockRtc::at(3, 0);
    let mut led = MockLedWriter::new();
    board.refresh(&mut rtc, &mut led).unwrap();

    let request = TimeSetRequest {
        year: 2025,
        month: 6,
        day: 14,
        hour: 8,
        minute: 45,
        second: 10,
    };
    board.apply_time_set(&mut rtc, &request).unwrap();
    // Datum und Uhrzeit in einem Schreibzugriff
    assert_eq!(rtc.write_count, 1);

    // Anzeige ändert sich erst beim nächsten Zyklus
    assert!(board.mask().contains(Word::Drei));
    assert_eq!(rtc.date, CalendarDate::new(2025, 6, 14).unwrap());

    let outcome = board.refresh(&mut rtc, &mut led).unwrap();
    assert_eq!(
        outcome.changed.unwrap().mask,
        WordMask::EMPTY | Word::Dreiviertel | Word::Neun
    );
}

#[test]
fn test_invalid_time_set_leaves_rtc_untouched() {
    let board = ClockBoard::default();
    let mut rtc = MockRtc::at(3, 0);
    let before = rtc.date;

    let request = TimeSetRequest {
        year: 2025,
        month: 2,
        day: 30,
        hour: 8,
        minute: 0,
        second: 0,
    };
    assert_eq!(
        board.apply_time_set(&mut rtc, &request),
        Err(ClockError::InvalidInput)
    );
    assert_eq!(rtc.date, before);
    assert_eq!(rtc.time.hour_minute(), (3, 0));
    assert_eq!(rtc.write_count, 0);
}

#[test]
fn test_time_set_reports_bus_error() {
    let board = ClockBoard::default();
    let mut rtc = MockRtc::at(3, 0);
    rtc.fail_writes = true;

    let request = TimeSetRequest {
        year: 2025,
        month: 1,
        day: 1,
        hour: 12,
        minute: 0,
        second: 0,
    };
    assert_eq!(
        board.apply_time_set(&mut rtc, &request),
        Err(ClockError::Communication)
    );
}

// ============================================================================
// Tests: Eigenschaften über den ganzen Tag
// ============================================================================

#[test]
fn test_every_minute_frame_matches_spans() {
    let mut board = ClockBoard::default();
    let mut rtc = MockRtc::at(0, 0);
    let mut led = MockLedWriter::new();

    for hour in 0..24 {
        for minute in 0..60 {
            rtc.time = ClockReading::new(hour, minute, 0).unwrap();
            board.refresh(&mut rtc, &mut led).unwrap();

            let mask = time_mask(hour, minute).unwrap();
            assert_eq!(board.mask(), mask);
            assert_eq!(
                lit_in_frame(led.last_frame()),
                spans_of(mask),
                "{}:{}",
                hour,
                minute
            );

            let dots = [Word::Minute1, Word::Minute2, Word::Minute3, Word::Minute4]
                .iter()
                .filter(|word| mask.contains(**word))
                .count();
            assert_eq!(dots, (minute % 5) as usize);
        }
    }
}

#[test]
fn test_quarter_and_threequarter_share_leds() {
    let quarter = time_mask(2, 15).unwrap();
    let three = time_mask(2, 45).unwrap();
    assert!(quarter.contains(Word::Viertel));
    assert!(three.contains(Word::Dreiviertel));
    assert!(!three.contains(Word::Viertel));
    // VIERTEL liegt vollständig in DREIVIERTEL
    for index in Word::Viertel.span().range() {
        assert!(Word::Dreiviertel.span().range().contains(&index));
    }
}
