//! Flickering fire: every strand is a small heat-diffusion automaton.

use crate::address::compute_index;
use crate::color::FlamePalette;
use crate::config::FireSettings;
use crate::cube::Cube;
use crate::error::StripError;
use crate::strip::LedStrip;
use rand::Rng;

pub struct FireSimulator<R> {
    rng: R,
    palette: FlamePalette,
    min_cooling: u8,
    max_cooling: u8,
    min_sparking: u8,
    max_sparking: u8,
}

impl<R: Rng> FireSimulator<R> {
    pub fn new(rng: R, settings: &FireSettings, side: usize, red_dominant: bool) -> Self {
        Self {
            rng,
            palette: FlamePalette {
                side,
                red_dominant,
                green_cap: settings.green_cap,
                red_cap: settings.red_cap,
            },
            min_cooling: settings.min_cooling,
            max_cooling: settings.max_cooling,
            min_sparking: settings.min_sparking,
            max_sparking: settings.max_sparking,
        }
    }

    pub fn palette(&self) -> &FlamePalette {
        &self.palette
    }

    /// Advance one strand by one frame: cool, let heat rise, maybe spark.
    pub fn step_strand(&mut self, heat: &mut [u8]) {
        let cooling = self.rng.gen_range(self.min_cooling..=self.max_cooling);
        let sparking = self.rng.gen_range(self.min_sparking..=self.max_sparking);

        self.cool(heat, cooling);
        diffuse(heat);
        self.ignite(heat, sparking);
    }

    fn cool(&mut self, heat: &mut [u8], cooling: u8) {
        let max_drop = (cooling as usize / heat.len() + 1).max(2);
        for cell in heat.iter_mut() {
            let drop = self.rng.gen_range(2..=max_drop);
            *cell = (*cell as usize).saturating_sub(drop) as u8;
        }
    }

    fn ignite(&mut self, heat: &mut [u8], sparking: u8) {
        if self.rng.gen_range(0..256u16) >= sparking as u16 {
            return;
        }
        let z = self.rng.gen_range(0..heat.len().min(2));
        let current = heat[z];
        heat[z] = current + self.rng.gen_range(0..=255 - current);
    }

    pub fn tick<S: LedStrip>(&mut self, cube: &mut Cube, strip: &mut S) -> Result<(), StripError> {
        let side = cube.side();
        for y in 0..side {
            for x in 0..side {
                self.step_strand(cube.strand_mut(x, y));

                for (z, &heat) in cube.strand(x, y).iter().enumerate() {
                    let color = self.palette.heat_color(z, heat);
                    strip.set_pixel(compute_index(x, y, z, side), color)?;
                }
            }
        }
        Ok(())
    }
}

/// Heat drifts up: each cell from z = 2 is replaced by a weighted mean of the
/// two cells below it, the lower one counting double.
///
/// Runs top-down in place, so every cell reads values that have not been
/// diffused yet this frame.
pub fn diffuse(heat: &mut [u8]) {
    for z in (2..heat.len()).rev() {
        let mixed = (heat[z - 1] as u16 + 2 * heat[z - 2] as u16) / 3;
        heat[z] = mixed as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::strip::MemoryStrip;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn settings() -> FireSettings {
        FireSettings::default()
    }

    fn simulator(seed: u64, settings: &FireSettings) -> FireSimulator<StdRng> {
        FireSimulator::new(StdRng::seed_from_u64(seed), settings, 4, true)
    }

    #[test]
    fn test_diffuse_reads_top_down() {
        let mut heat = [90, 30, 0, 0];
        diffuse(&mut heat);
        // z=3 mixes the untouched z=2 and z=1, then z=2 mixes z=1 and z=0
        assert_eq!(heat, [90, 30, 70, 20]);
    }

    #[test]
    fn test_diffuse_leaves_short_strands_alone() {
        let mut heat = [200, 100];
        diffuse(&mut heat);
        assert_eq!(heat, [200, 100]);
    }

    #[test]
    fn test_diffuse_never_overflows() {
        let mut heat = [255; 8];
        diffuse(&mut heat);
        assert!(heat.iter().all(|&h| h == 255));
    }

    #[test]
    fn test_cooling_floors_at_zero() {
        let mut s = settings();
        s.min_sparking = 0;
        s.max_sparking = 0;
        let mut sim = simulator(7, &s);

        let mut heat = [1, 1, 1, 1];
        sim.step_strand(&mut heat);
        assert_eq!(heat, [0, 0, 0, 0]);
    }

    #[test]
    fn test_cooling_with_minimum_drop() {
        let mut s = settings();
        s.min_cooling = 0;
        s.max_cooling = 0;
        s.min_sparking = 0;
        s.max_sparking = 0;
        let mut sim = simulator(1, &s);

        // cooling 0 still removes exactly 2 from every cell
        let mut heat = [100, 100, 100, 100];
        sim.step_strand(&mut heat);
        assert_eq!(heat, [98, 98, 98, 98]);
    }

    #[test]
    fn test_strand_cools_before_heat_rises() {
        let mut s = settings();
        s.min_cooling = 0;
        s.max_cooling = 0;
        s.min_sparking = 0;
        s.max_sparking = 0;
        let mut sim = simulator(2, &s);

        // cooled to [1, 0, 198, 198] first, so z=3 mixes 198 and 0;
        // diffusing first would give [1, 0, 0, 65]
        let mut heat = [3, 1, 200, 200];
        sim.step_strand(&mut heat);
        assert_eq!(heat, [1, 0, 0, 66]);
    }

    #[test]
    fn test_constant_sparking_heats_the_base() {
        let mut s = settings();
        s.min_sparking = 255;
        s.max_sparking = 255;
        let mut sim = simulator(42, &s);

        let mut heat = [0u8; 4];
        let mut peak = 0;
        for _ in 0..50 {
            sim.step_strand(&mut heat);
            peak = peak.max(heat[0]).max(heat[1]);
        }
        assert!(peak > 100, "base never caught fire: peak {peak}");
    }

    #[test]
    fn test_single_cell_strand() {
        let mut s = settings();
        s.min_sparking = 255;
        s.max_sparking = 255;
        let mut sim = FireSimulator::new(StdRng::seed_from_u64(3), &s, 1, false);
        let mut heat = [0u8; 1];
        for _ in 0..100 {
            sim.step_strand(&mut heat);
        }
    }

    #[test]
    fn test_tick_stages_every_voxel_in_range() {
        let mut sim = simulator(9, &settings());
        let mut cube = Cube::new(4);
        let mut strip = MemoryStrip::new(64);

        for _ in 0..200 {
            sim.tick(&mut cube, &mut strip).unwrap();
            for &c in strip.staged() {
                assert!(c.r <= 191 && c.g <= 191);
                assert_eq!(c.b, 0);
            }
        }
        assert!(!cube.is_clear());
    }

    #[test]
    fn test_tick_colours_follow_the_heat() {
        let mut s = settings();
        s.min_sparking = 0;
        s.max_sparking = 0;
        let mut sim = simulator(5, &s);
        let mut cube = Cube::new(4);
        let mut strip = MemoryStrip::new(64);

        sim.tick(&mut cube, &mut strip).unwrap();
        assert!(strip.staged().iter().all(|&c| c == Rgb::OFF));

        for x in 0..4 {
            for y in 0..4 {
                cube.strand_mut(x, y).fill(255);
            }
        }
        sim.tick(&mut cube, &mut strip).unwrap();
        let palette = *sim.palette();
        for x in 0..4 {
            for y in 0..4 {
                for z in 0..4 {
                    let expected = palette.heat_color(z, cube.get(x, y, z));
                    assert_eq!(strip.staged()[compute_index(x, y, z, 4)], expected);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_flames() {
        let mut a = simulator(11, &settings());
        let mut b = simulator(11, &settings());
        let (mut ca, mut cb) = (Cube::new(4), Cube::new(4));
        let (mut sa, mut sb) = (MemoryStrip::new(64), MemoryStrip::new(64));
        for _ in 0..30 {
            a.tick(&mut ca, &mut sa).unwrap();
            b.tick(&mut cb, &mut sb).unwrap();
        }
        assert_eq!(ca, cb);
        assert_eq!(sa.staged(), sb.staged());
    }
}
