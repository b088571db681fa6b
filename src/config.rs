use crate::color::Rgb;
use crate::error::ConfigError;

pub const MAX_SIDE: usize = 16;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub side: usize,
    /// Fixed seed for every run; `None` reseeds from entropy at each start.
    pub seed: Option<u64>,
    pub linger_ms: u64,
    pub fire: FireSettings,
    pub rain: RainSettings,
    pub fade: FadeSettings,
    pub sweep: SweepSettings,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FireSettings {
    pub frame_delay_ms: u64,
    /// More cooling gives more flicker and more gaps in the flame.
    pub min_cooling: u8,
    pub max_cooling: u8,
    /// More sparking gives taller flames.
    pub min_sparking: u8,
    pub max_sparking: u8,
    pub green_cap: u8,
    pub red_cap: u8,
    /// Stop after this many frames; `None` runs until cancelled.
    pub frames: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RainSettings {
    pub frame_delay_ms: u64,
    pub ignition_percent: u8,
    pub frames: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FadeSettings {
    pub draws: u64,
    pub max_draw_delay_ms: u64,
    pub ceiling: u8,
    pub seed_max: [u8; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepSettings {
    pub frame_delay_ms: u64,
    pub line_color: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            side: 4,
            seed: None,
            linger_ms: 2000,
            fire: FireSettings::default(),
            rain: RainSettings::default(),
            fade: FadeSettings::default(),
            sweep: SweepSettings::default(),
        }
    }
}

impl Default for FireSettings {
    fn default() -> Self {
        Self {
            frame_delay_ms: 20,
            min_cooling: 80,
            max_cooling: 220,
            min_sparking: 100,
            max_sparking: 150,
            green_cap: 70,
            red_cap: 210,
            frames: None,
        }
    }
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            frame_delay_ms: 150,
            ignition_percent: 5,
            frames: None,
        }
    }
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            draws: 16_000,
            max_draw_delay_ms: 50,
            ceiling: 224,
            // (16 >> 1) << 5 = 256 hits the ceiling, 13 keeps blue a bit lower
            seed_max: [16, 16, 13],
        }
    }
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            frame_delay_ms: 100,
            line_color: Rgb::new(200, 0, 0),
        }
    }
}

impl Settings {
    pub fn total_cell_count(&self) -> usize {
        self.side * self.side * self.side
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.side == 0 || self.side > MAX_SIDE {
            return Err(ConfigError::SideLength {
                got: self.side,
                max: MAX_SIDE,
            });
        }
        ordered("cooling", self.fire.min_cooling, self.fire.max_cooling)?;
        ordered("sparking", self.fire.min_sparking, self.fire.max_sparking)?;
        if self.rain.ignition_percent > 100 {
            return Err(ConfigError::OutOfRange {
                name: "rain ignition percent",
                got: self.rain.ignition_percent as u32,
                max: 100,
            });
        }
        Ok(())
    }
}

fn ordered(name: &'static str, min: u8, max: u8) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvertedRange {
            name,
            min: min as u32,
            max: max as u32,
        });
    }
    Ok(())
}
