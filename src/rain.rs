use crate::address::compute_index;
use crate::color::{rain_color, RAIN_HEAD};
use crate::config::RainSettings;
use crate::cube::Cube;
use crate::error::StripError;
use crate::strip::LedStrip;
use rand::Rng;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RainStep {
    Idle,
    /// Dark strand that received a new drop on its top cell.
    Ignited,
    Fell,
}

pub struct MatrixRainSimulator<R> {
    rng: R,
    ignition_percent: u8,
}

impl<R: Rng> MatrixRainSimulator<R> {
    pub fn new(rng: R, settings: &RainSettings) -> Self {
        Self {
            rng,
            ignition_percent: settings.ignition_percent,
        }
    }

    pub fn step_strand(&mut self, strand: &mut [u8]) -> RainStep {
        if strand.iter().all(|&c| c == 0) {
            if self.rng.gen_range(0..100u8) >= self.ignition_percent {
                return RainStep::Idle;
            }
            if let Some(top) = strand.last_mut() {
                *top = RAIN_HEAD;
            }
            return RainStep::Ignited;
        }

        fall(strand);
        RainStep::Fell
    }

    pub fn tick<S: LedStrip>(&mut self, cube: &mut Cube, strip: &mut S) -> Result<(), StripError> {
        let side = cube.side();
        for y in 0..side {
            for x in 0..side {
                match self.step_strand(cube.strand_mut(x, y)) {
                    RainStep::Idle => {}
                    RainStep::Ignited => {
                        debug!(x, y, "rain drop");
                        let top = side - 1;
                        strip.set_pixel(compute_index(x, y, top, side), rain_color(RAIN_HEAD))?;
                    }
                    RainStep::Fell => {
                        for (z, &shade) in cube.strand(x, y).iter().enumerate() {
                            strip.set_pixel(compute_index(x, y, z, side), rain_color(shade))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Dim every lit cell by one shade and move the drop one cell down. A drop
/// already on the bottom cell is gone after this.
pub fn fall(strand: &mut [u8]) {
    let mut head = None;
    for (z, shade) in strand.iter_mut().enumerate() {
        if *shade == RAIN_HEAD {
            head = Some(z);
        }
        *shade = shade.saturating_sub(1);
    }

    if let Some(z) = head.filter(|&z| z > 0) {
        strand[z - 1] = RAIN_HEAD;
    }
}
