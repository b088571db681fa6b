use std::time::{Duration, Instant};

pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Wall-clock pacing: sleeps in 1 ms steps, then spins out the last couple of
/// milliseconds for an even frame rate.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpinPacer;

impl Pacer for SpinPacer {
    fn pause(&mut self, delay: Duration) {
        let end = Instant::now() + delay;
        loop {
            let t = Instant::now();
            if t >= end {
                break;
            }
            let left = end - t;
            if left > Duration::from_millis(2) {
                std::thread::sleep(Duration::from_millis(1));
            } else {
                std::hint::spin_loop();
            }
        }
    }
}

/// Returns immediately and only adds up the time it was asked to wait.
#[derive(Clone, Copy, Debug, Default)]
pub struct VirtualClock {
    elapsed: Duration,
    pauses: u64,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn pauses(&self) -> u64 {
        self.pauses
    }
}

impl Pacer for VirtualClock {
    fn pause(&mut self, delay: Duration) {
        self.elapsed += delay;
        self.pauses += 1;
    }
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, delay: Duration) {
        (**self).pause(delay)
    }
}
