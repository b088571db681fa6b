use crate::address::compute_index;
use crate::color::Rgb;
use crate::config::FadeSettings;
use crate::error::StripError;
use crate::strip::LedStrip;
use rand::Rng;
use std::collections::TryReserveError;
use std::time::Duration;
use tracing::trace;

/// Draw counter value at which a cell goes dark and starts over.
pub const LAST_DRAW: u8 = 11;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FadeCell {
    pub draws: u8,
    pub color: Rgb,
}

#[derive(Clone, Debug)]
pub struct FadeLedger {
    cells: Vec<FadeCell>,
}

impl FadeLedger {
    /// Allocate a zeroed ledger, reporting allocation failure instead of
    /// aborting the process.
    pub fn try_new(len: usize) -> Result<Self, TryReserveError> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize(len, FadeCell::default());
        Ok(Self { cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn reset(&mut self) {
        self.cells.fill(FadeCell::default());
    }

    pub fn is_reset(&self) -> bool {
        self.cells.iter().all(|c| *c == FadeCell::default())
    }

    pub fn cell(&self, index: usize) -> &FadeCell {
        &self.cells[index]
    }
}

pub struct RandomFadeSimulator<R> {
    rng: R,
    side: usize,
    ceiling: u8,
    seed_max: [u8; 3],
    max_delay_ms: u64,
}

impl<R: Rng> RandomFadeSimulator<R> {
    pub fn new(rng: R, settings: &FadeSettings, side: usize) -> Self {
        Self {
            rng,
            side,
            ceiling: settings.ceiling,
            seed_max: settings.seed_max,
            max_delay_ms: settings.max_draw_delay_ms,
        }
    }

    /// Move one cell a single step through its draw cycle:
    /// 0 seeds a dim colour, 1..=5 double it, 6..=10 halve it, 11 turns it off.
    pub fn advance(&mut self, cell: &mut FadeCell) {
        let c = &mut cell.color;
        match cell.draws {
            0 => {
                let [r, g, b] = self.seed_max;
                c.r = self.rng.gen_range(0..=r) >> 1;
                c.g = self.rng.gen_range(0..=g) >> 1;
                c.b = self.rng.gen_range(0..=b) >> 1;
            }
            1..=5 => {
                let ceiling = self.ceiling as u16;
                let double = |v: u8| (v as u16 * 2).min(ceiling) as u8;
                *c = Rgb::new(double(c.r), double(c.g), double(c.b));
            }
            6..=10 => {
                *c = Rgb::new(c.r >> 1, c.g >> 1, c.b >> 1);
            }
            _ => *c = Rgb::OFF,
        }

        cell.draws = if cell.draws >= LAST_DRAW {
            0
        } else {
            cell.draws + 1
        };
    }

    pub fn tick<S: LedStrip>(
        &mut self,
        ledger: &mut FadeLedger,
        strip: &mut S,
    ) -> Result<Duration, StripError> {
        let x = self.rng.gen_range(0..self.side);
        let y = self.rng.gen_range(0..self.side);
        let z = self.rng.gen_range(0..self.side);
        let index = compute_index(x, y, z, self.side);

        let mut cell = ledger.cells[index];
        self.advance(&mut cell);
        ledger.cells[index] = cell;
        trace!(index, draws = cell.draws, "fade draw");

        strip.set_pixel(index, cell.color)?;
        Ok(Duration::from_millis(
            self.rng.gen_range(0..=self.max_delay_ms),
        ))
    }
}
