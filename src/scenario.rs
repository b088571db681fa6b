use clap::ValueEnum;
use std::fmt;

/// The animations the cube cycles through, in button order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Scenario {
    /// Red dot walking the strand in wire order
    Line,
    /// Hue wheel spread over the cube, one voxel at a time
    Rainbow,
    /// Random voxels fading in and out
    Fade,
    /// Red to yellow flames
    RedFire,
    /// Green to yellow flames
    GreenFire,
    /// Falling green rain
    Matrix,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::Line,
        Scenario::Rainbow,
        Scenario::Fade,
        Scenario::RedFire,
        Scenario::GreenFire,
        Scenario::Matrix,
    ];

    pub fn next(self) -> Scenario {
        let i = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Line => "line",
            Scenario::Rainbow => "rainbow",
            Scenario::Fade => "fade",
            Scenario::RedFire => "red fire",
            Scenario::GreenFire => "green fire",
            Scenario::Matrix => "matrix",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
