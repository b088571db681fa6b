use crossterm::style::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn is_off(self) -> bool {
        self == Self::OFF
    }

    pub fn to_color(self) -> Color {
        Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Rain shades from off (0) to the falling head (6).
pub const RAIN_PALETTE: [Rgb; 7] = [
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x00, 0x01, 0x00),
    Rgb::new(0x00, 0x03, 0x00),
    Rgb::new(0x00, 0x0E, 0x00),
    Rgb::new(0x00, 0x3B, 0x00),
    Rgb::new(0x00, 0x8F, 0x11),
    Rgb::new(0x00, 0xFF, 0x41),
];

pub const RAIN_HEAD: u8 = (RAIN_PALETTE.len() - 1) as u8;

#[inline]
pub fn rain_color(index: u8) -> Rgb {
    RAIN_PALETTE[index as usize]
}

/// Hue wheel: red to green to blue and back, 85 steps per segment.
pub fn wheel(pos: u8) -> Rgb {
    match pos {
        0..=84 => Rgb::new(255 - pos * 3, pos * 3, 0),
        85..=169 => {
            let p = pos - 85;
            Rgb::new(0, 255 - p * 3, p * 3)
        }
        _ => {
            let p = pos - 170;
            Rgb::new(p * 3, 0, 255 - p * 3)
        }
    }
}

/// Flame colouring for one cube height.
///
/// The base channel is fixed (red for red flames, green otherwise) and the
/// other one ramps with height so the top of the flame turns yellow. Heat then
/// scales both channels.
#[derive(Clone, Copy, Debug)]
pub struct FlamePalette {
    pub side: usize,
    pub red_dominant: bool,
    pub green_cap: u8,
    pub red_cap: u8,
}

impl FlamePalette {
    pub fn heat_color(&self, z: usize, heat: u8) -> Rgb {
        let side = self.side.max(1) as u32;
        let z = z as u32;
        // 0..=255 heat down to 0..=191 intensity
        let t192 = heat as u32 * 191 / 255;

        let (red, green) = if self.red_dominant {
            let ramp = (self.green_cap as u32 + 95) * z / side;
            (255, ramp.min(255))
        } else {
            let ramp = self.red_cap as u32 * z / side;
            (ramp.min(255), 200)
        };

        Rgb::new(
            (red * t192 / 255) as u8,
            (green * t192 / 255) as u8,
            0,
        )
    }
}
