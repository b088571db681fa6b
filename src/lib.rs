//! LED cube animations.
//!
//! A cube of `side`³ RGB emitters is wired as one serpentine strand. This
//! crate maps voxels onto that strand and runs the cube's animations (fire,
//! matrix rain, random fade and two wiring sweeps) against any [`LedStrip`].

pub mod address;
pub mod cancel;
pub mod color;
pub mod config;
pub mod cube;
pub mod driver;
pub mod error;
pub mod fade;
pub mod fire;
pub mod pacing;
pub mod preview;
pub mod rain;
pub mod scenario;
pub mod strip;
pub mod sweep;

pub use address::{compute_index, AddressMap};
pub use cancel::CancellationSignal;
pub use color::{wheel, FlamePalette, Rgb};
pub use config::Settings;
pub use cube::Cube;
pub use driver::{AnimationDriver, Outcome};
pub use error::{ConfigError, StripError};
pub use pacing::{Pacer, SpinPacer, VirtualClock};
pub use preview::TerminalStrip;
pub use scenario::Scenario;
pub use strip::{LedStrip, MemoryStrip};
