//! Deterministic sweeps that light one voxel per frame. Handy for checking
//! the wiring of a freshly built cube.

use crate::address::compute_index;
use crate::color::{wheel, Rgb};
use crate::error::StripError;
use crate::strip::LedStrip;

#[derive(Clone, Debug)]
pub struct LineSweep {
    color: Rgb,
    len: usize,
    next: usize,
}

impl LineSweep {
    pub fn new(len: usize, color: Rgb) -> Self {
        Self {
            color,
            len,
            next: 0,
        }
    }

    pub fn tick<S: LedStrip>(&mut self, strip: &mut S) -> Result<bool, StripError> {
        if self.next >= self.len {
            return Ok(false);
        }
        strip.set_pixel(self.next, self.color)?;
        self.next += 1;
        Ok(true)
    }
}

/// Walks the cube bottom layer first, row by row, spreading the whole hue
/// wheel over the volume.
#[derive(Clone, Debug)]
pub struct RainbowSweep {
    side: usize,
    next: usize,
}

impl RainbowSweep {
    pub fn new(side: usize) -> Self {
        Self { side, next: 0 }
    }

    fn volume(&self) -> usize {
        self.side * self.side * self.side
    }

    pub fn tick<S: LedStrip>(&mut self, strip: &mut S) -> Result<bool, StripError> {
        let total = self.volume();
        let n = self.next;
        if n >= total {
            return Ok(false);
        }

        let x = n % self.side;
        let y = n / self.side % self.side;
        let z = n / (self.side * self.side);
        let color = wheel((n * 256 / total) as u8);
        strip.set_pixel(compute_index(x, y, z, self.side), color)?;

        self.next += 1;
        Ok(true)
    }
}
