//! Runs one animation at a time: owns its state, paces frames and watches the
//! cancellation signal.

use crate::cancel::CancellationSignal;
use crate::config::Settings;
use crate::cube::Cube;
use crate::error::{ConfigError, StripError};
use crate::fade::{FadeLedger, RandomFadeSimulator};
use crate::fire::FireSimulator;
use crate::pacing::Pacer;
use crate::rain::MatrixRainSimulator;
use crate::scenario::Scenario;
use crate::strip::LedStrip;
use crate::sweep::{LineSweep, RainbowSweep};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{info, warn};

/// Longest stretch the driver sleeps without looking at the signal.
const POLL_SLICE: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
    /// Could not start, e.g. its bookkeeping could not be allocated.
    Aborted,
}

enum Frame {
    Next(Duration),
    Done,
}

pub struct AnimationDriver<S, P> {
    strip: S,
    pacer: P,
    cancel: CancellationSignal,
    settings: Settings,
    cube: Cube,
    ledger: Option<FadeLedger>,
}

impl<S: LedStrip, P: Pacer> AnimationDriver<S, P> {
    pub fn new(
        strip: S,
        pacer: P,
        cancel: CancellationSignal,
        settings: Settings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let expected = settings.total_cell_count();
        if strip.len() != expected {
            return Err(ConfigError::StripLength {
                expected,
                got: strip.len(),
            });
        }

        Ok(Self {
            strip,
            pacer,
            cancel,
            cube: Cube::new(settings.side),
            settings,
            ledger: None,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn ledger(&self) -> Option<&FadeLedger> {
        self.ledger.as_ref()
    }

    /// Run one scenario until it completes or the signal is raised.
    ///
    /// Strip failures are returned as is; nothing here can recover from them.
    pub fn run(&mut self, scenario: Scenario) -> Result<Outcome, StripError> {
        info!(%scenario, "animation start");

        let outcome = match scenario {
            Scenario::Line => self.run_line(),
            Scenario::Rainbow => self.run_rainbow(),
            Scenario::Fade => self.run_fade(),
            Scenario::RedFire => self.run_fire(true),
            Scenario::GreenFire => self.run_fire(false),
            Scenario::Matrix => self.run_matrix(),
        }?;

        self.cube.reset();
        info!(%scenario, ?outcome, "animation end");
        Ok(outcome)
    }

    fn rng(&self) -> StdRng {
        match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn linger(&self) -> Duration {
        Duration::from_millis(self.settings.linger_ms)
    }

    fn run_line(&mut self) -> Result<Outcome, StripError> {
        let sweep = &self.settings.sweep;
        let delay = Duration::from_millis(sweep.frame_delay_ms);
        let mut line = LineSweep::new(self.strip.len(), sweep.line_color);
        let linger = self.linger();

        drive(
            &mut self.strip,
            &mut self.pacer,
            &self.cancel,
            None,
            linger,
            |strip| {
                Ok(if line.tick(strip)? {
                    Frame::Next(delay)
                } else {
                    Frame::Done
                })
            },
        )
    }

    fn run_rainbow(&mut self) -> Result<Outcome, StripError> {
        let delay = Duration::from_millis(self.settings.sweep.frame_delay_ms);
        let mut rainbow = RainbowSweep::new(self.settings.side);
        let linger = self.linger();

        drive(
            &mut self.strip,
            &mut self.pacer,
            &self.cancel,
            None,
            linger,
            |strip| {
                Ok(if rainbow.tick(strip)? {
                    Frame::Next(delay)
                } else {
                    Frame::Done
                })
            },
        )
    }

    fn run_fire(&mut self, red_dominant: bool) -> Result<Outcome, StripError> {
        let fire = &self.settings.fire;
        let delay = Duration::from_millis(fire.frame_delay_ms);
        let frames = fire.frames;
        let mut sim = FireSimulator::new(self.rng(), fire, self.settings.side, red_dominant);

        self.cube.reset();
        let cube = &mut self.cube;
        drive(
            &mut self.strip,
            &mut self.pacer,
            &self.cancel,
            frames,
            Duration::ZERO,
            |strip| {
                sim.tick(cube, strip)?;
                Ok(Frame::Next(delay))
            },
        )
    }

    fn run_matrix(&mut self) -> Result<Outcome, StripError> {
        let rain = &self.settings.rain;
        let delay = Duration::from_millis(rain.frame_delay_ms);
        let frames = rain.frames;
        let mut sim = MatrixRainSimulator::new(self.rng(), rain);

        self.cube.reset();
        let cube = &mut self.cube;
        drive(
            &mut self.strip,
            &mut self.pacer,
            &self.cancel,
            frames,
            Duration::ZERO,
            |strip| {
                sim.tick(cube, strip)?;
                Ok(Frame::Next(delay))
            },
        )
    }

    fn run_fade(&mut self) -> Result<Outcome, StripError> {
        let mut ledger = match self.ledger.take() {
            Some(ledger) => ledger,
            None => match FadeLedger::try_new(self.settings.total_cell_count()) {
                Ok(ledger) => ledger,
                Err(err) => {
                    warn!(%err, "fade bookkeeping unavailable, skipping animation");
                    return Ok(Outcome::Aborted);
                }
            },
        };
        ledger.reset();

        let mut sim = RandomFadeSimulator::new(self.rng(), &self.settings.fade, self.settings.side);
        let draws = self.settings.fade.draws;
        let linger = self.linger();

        let result = drive(
            &mut self.strip,
            &mut self.pacer,
            &self.cancel,
            Some(draws),
            linger,
            |strip| sim.tick(&mut ledger, strip).map(Frame::Next),
        );

        ledger.reset();
        self.ledger = Some(ledger);
        result
    }
}

/// The frame loop shared by every animation: stage, refresh, check the
/// signal, wait. After the last frame the strip is held for `linger`.
fn drive<S, P, F>(
    strip: &mut S,
    pacer: &mut P,
    cancel: &CancellationSignal,
    limit: Option<u64>,
    linger: Duration,
    mut frame: F,
) -> Result<Outcome, StripError>
where
    S: LedStrip,
    P: Pacer,
    F: FnMut(&mut S) -> Result<Frame, StripError>,
{
    strip.clear()?;

    let mut frames = 0u64;
    while limit.map_or(true, |n| frames < n) {
        let delay = match frame(strip)? {
            Frame::Next(delay) => delay,
            Frame::Done => break,
        };
        strip.refresh()?;
        frames += 1;

        if cancel.is_raised() || pause(pacer, cancel, delay) {
            return Ok(Outcome::Cancelled);
        }
    }

    if pause(pacer, cancel, linger) {
        return Ok(Outcome::Cancelled);
    }
    Ok(Outcome::Completed)
}

/// Wait in slices no longer than [`POLL_SLICE`]. Returns `true` if the signal
/// was seen.
fn pause<P: Pacer>(pacer: &mut P, cancel: &CancellationSignal, delay: Duration) -> bool {
    let mut left = delay;
    while !left.is_zero() {
        let slice = left.min(POLL_SLICE);
        pacer.pause(slice);
        left -= slice;
        if cancel.is_raised() {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::VirtualClock;
    use crate::strip::MemoryStrip;

    fn quick_settings() -> Settings {
        let mut s = Settings::default();
        s.seed = Some(1234);
        s.fire.frames = Some(10);
        s.rain.frames = Some(10);
        s.fade.draws = 100;
        s
    }

    fn driver(settings: Settings) -> AnimationDriver<MemoryStrip, VirtualClock> {
        let strip = MemoryStrip::new(settings.total_cell_count());
        AnimationDriver::new(strip, VirtualClock::new(), CancellationSignal::new(), settings)
            .unwrap()
    }

    #[test]
    fn test_rejects_mismatched_strip() {
        let result = AnimationDriver::new(
            MemoryStrip::new(10),
            VirtualClock::new(),
            CancellationSignal::new(),
            Settings::default(),
        );
        assert!(matches!(
            result,
            Err(ConfigError::StripLength {
                expected: 64,
                got: 10
            })
        ));
    }

    #[test]
    fn test_pause_slices_and_stops_on_signal() {
        let cancel = CancellationSignal::new();
        let mut clock = VirtualClock::new();
        assert!(!pause(&mut clock, &cancel, Duration::from_millis(120)));
        assert_eq!(clock.pauses(), 3);
        assert_eq!(clock.elapsed(), Duration::from_millis(120));

        cancel.raise();
        let mut clock = VirtualClock::new();
        assert!(pause(&mut clock, &cancel, Duration::from_secs(2)));
        assert_eq!(clock.pauses(), 1);
    }

    #[test]
    fn test_line_completes_and_lingers() {
        let mut d = driver(quick_settings());
        assert_eq!(d.run(Scenario::Line).unwrap(), Outcome::Completed);
        assert_eq!(d.strip().refreshes(), 64);
        assert_eq!(d.strip().lit(), 64);
        assert_eq!(
            d.pacer().elapsed(),
            Duration::from_millis(64 * 100 + 2000)
        );
    }

    #[test]
    fn test_fire_runs_its_frame_budget() {
        let mut d = driver(quick_settings());
        assert_eq!(d.run(Scenario::RedFire).unwrap(), Outcome::Completed);
        assert_eq!(d.strip().refreshes(), 10);
        assert!(d.cube().is_clear(), "cube must be released after the run");
    }

    #[test]
    fn test_fade_reuses_its_ledger() {
        let mut d = driver(quick_settings());
        assert!(d.ledger().is_none());

        assert_eq!(d.run(Scenario::Fade).unwrap(), Outcome::Completed);
        assert_eq!(d.strip().refreshes(), 100);
        let ledger = d.ledger().unwrap();
        assert_eq!(ledger.len(), 64);
        assert!(ledger.is_reset());

        assert_eq!(d.run(Scenario::Fade).unwrap(), Outcome::Completed);
        assert_eq!(d.ledger().map(|l| l.len()), Some(64));
    }

    #[test]
    fn test_fade_without_ledger_memory_aborts() {
        let mut d = driver(quick_settings());
        // 2^63 cells: the reservation overflows, the strip stays untouched
        d.settings.side = 1 << 21;

        assert_eq!(d.run(Scenario::Fade).unwrap(), Outcome::Aborted);
        assert!(d.ledger().is_none());
        assert_eq!(d.strip().refreshes(), 0);
        assert_eq!(d.pacer().pauses(), 0);
        assert!(d.cube().is_clear());
    }

    #[test]
    fn test_raised_signal_stops_after_one_frame() {
        let mut settings = quick_settings();
        settings.fire.frames = None;
        let cancel = CancellationSignal::new();
        let strip = MemoryStrip::new(64);
        let mut d =
            AnimationDriver::new(strip, VirtualClock::new(), cancel.clone(), settings).unwrap();

        cancel.raise();
        assert_eq!(d.run(Scenario::GreenFire).unwrap(), Outcome::Cancelled);
        assert_eq!(d.strip().refreshes(), 1);
    }
}
