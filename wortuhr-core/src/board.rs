//! Zustand der Uhrenfront und Refresh-Zyklus
//!
//! Ein `ClockBoard` gehört genau einer Refresh-Schleife. Pro Zyklus:
//! RTC lesen → (bei Änderung) Maske + LEDs neu berechnen → Frame rendern →
//! übertragen. Die Maske wird nur bei geänderter Stunde/Minute neu
//! berechnet, der Farbkreis läuft dagegen in jedem Frame weiter.

use crate::encoder::time_mask;
use crate::render::{FrameRenderer, PixelBuffer};
use crate::resolver::LitLeds;
use crate::schedule::{NightWindow, TimeOfDay};
use crate::traits::{ClockError, RealTimeClock, SmartLedWriter};
use crate::types::{ClockReading, ClockStatus, TimeSetRequest};
use crate::words::WordMask;

/// Renderer-Parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Farbton-Schritt pro Frame in Grad
    pub hue_step: u16,
    /// Sättigung 0-100 %
    pub saturation: u8,
    /// Helligkeit 0-100 %
    pub value: u8,
    /// Optionale Nachtabsenkung
    pub night: Option<NightWindow>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            hue_step: 1,
            saturation: 100,
            value: 100,
            night: None,
        }
    }
}

/// Muss der nächste Frame komplett neu aufgebaut werden?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// Keine Änderung seit dem letzten übertragenen Frame
    Idle,
    /// Maske hat sich geändert, nächster Frame löscht zuerst den Buffer
    Dirty,
}

/// Ergebnis eines erfolgreichen Refresh-Zyklus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub reading: ClockReading,
    /// `Some` wenn sich die Wort-Maske in diesem Zyklus geändert hat
    pub changed: Option<ClockStatus>,
}

/// Komplette Anzeige-Logik der Wortuhr
#[derive(Debug, Clone)]
pub struct ClockBoard {
    config: BoardConfig,
    reading: Option<ClockReading>,
    mask: WordMask,
    lit: LitLeds,
    renderer: FrameRenderer,
    state: RefreshState,
    /// Status der letzten Maskenänderung, bis ein Frame damit übertragen ist
    pending: Option<ClockStatus>,
}

impl Default for ClockBoard {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl ClockBoard {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            reading: None,
            mask: WordMask::EMPTY,
            lit: LitLeds::new(),
            renderer: FrameRenderer::new(config.hue_step, config.saturation, config.value),
            state: RefreshState::Idle,
            pending: None,
        }
    }

    /// Übernimmt eine neue Uhrzeit
    ///
    /// Nur wenn sich Stunde oder Minute geändert haben, werden Maske und
    /// LED-Zustand neu berechnet und der Zustand auf `Dirty` gesetzt.
    /// Gibt den neuen Status zurück, falls es eine Änderung gab.
    ///
    /// # Fehlerbehandlung
    /// `ClockError::InvalidInput` für ungültige Uhrzeiten, der bisherige
    /// Zustand bleibt dann unverändert.
    pub fn observe(&mut self, reading: ClockReading) -> Result<Option<ClockStatus>, ClockError> {
        reading.validate()?;

        let unchanged = self
            .reading
            .is_some_and(|previous| previous.hour_minute() == reading.hour_minute());
        if unchanged {
            self.reading = Some(reading);
            return Ok(None);
        }

        let mask = time_mask(reading.hour, reading.minute)?;
        self.reading = Some(reading);
        self.mask = mask;
        self.lit.resolve(mask);
        self.apply_night_window(reading);
        self.state = RefreshState::Dirty;

        let status = ClockStatus {
            hour: reading.hour,
            minute: reading.minute,
            mask,
        };
        self.pending = Some(status);
        Ok(Some(status))
    }

    fn apply_night_window(&mut self, reading: ClockReading) {
        let value = match self.config.night {
            Some(night) if night.contains(TimeOfDay::from(reading)) => night.value,
            _ => self.config.value,
        };
        self.renderer.set_value(value);
    }

    /// Rendert den nächsten Frame
    ///
    /// Im Zustand `Dirty` wird der Buffer vorher komplett gelöscht.
    pub fn render_frame(&mut self) -> &PixelBuffer {
        let clear = self.state == RefreshState::Dirty;
        self.renderer.render(&self.lit, clear)
    }

    /// Markiert den zuletzt gerenderten Frame als übertragen
    ///
    /// Gibt den Status zurück, der mit diesem Frame erstmals sichtbar wurde.
    /// Ist eine Übertragung fehlgeschlagen, kommt der Status erst mit dem
    /// nächsten erfolgreichen Frame.
    pub fn frame_transmitted(&mut self) -> Option<ClockStatus> {
        self.state = RefreshState::Idle;
        self.pending.take()
    }

    /// Ein kompletter Refresh-Zyklus (ohne Pausen-Delay)
    ///
    /// # Fehlerbehandlung
    /// - RTC-Fehler oder ungültige Zeit: Fehler wird zurückgegeben, Maske,
    ///   LEDs, Pixel-Buffer und Farbkreis bleiben unverändert, es wird
    ///   nichts übertragen. Der nächste Zyklus versucht es erneut.
    /// - Übertragungsfehler: Zustand bleibt `Dirty`, damit der nächste
    ///   Frame wieder komplett aufgebaut wird. Die Maskenänderung wird dann
    ///   im ersten erfolgreichen Zyklus als `changed` gemeldet.
    pub fn refresh<R, L>(&mut self, rtc: &mut R, led: &mut L) -> Result<RefreshOutcome, ClockError>
    where
        R: RealTimeClock,
        L: SmartLedWriter,
    {
        let reading = rtc.get_time()?;
        self.observe(reading)?;

        let frame = self.render_frame();
        led.write(frame)?;
        let changed = self.frame_transmitted();

        Ok(RefreshOutcome { reading, changed })
    }

    /// Stellt den RTC
    ///
    /// Der eigene Zustand wird dabei nicht verändert; die neue Zeit wird
    /// beim nächsten `refresh` gelesen.
    pub fn apply_time_set<R: RealTimeClock>(
        &self,
        rtc: &mut R,
        request: &TimeSetRequest,
    ) -> Result<(), ClockError> {
        let (date, time) = request.validate()?;
        rtc.set_date_time(date, time)
    }

    pub fn mask(&self) -> WordMask {
        self.mask
    }

    pub fn lit(&self) -> &LitLeds {
        &self.lit
    }

    pub fn pixels(&self) -> &PixelBuffer {
        self.renderer.pixels()
    }

    pub fn hue_offset(&self) -> u16 {
        self.renderer.hue_offset()
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn reading(&self) -> Option<ClockReading> {
        self.reading
    }

    pub fn value(&self) -> u8 {
        self.renderer.value()
    }
}
