//! A terminal stand-in for the physical strand: every layer of the cube is
//! drawn as a small grid of coloured blocks, side by side, bottom layer first.

use crate::address::AddressMap;
use crate::color::Rgb;
use crate::error::StripError;
use crate::strip::{check_index, LedStrip};
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};
use std::io::Write;

const TITLE_ROW: u16 = 0;
const LABEL_ROW: u16 = 2;
const GRID_ROW: u16 = 3;
// two columns per voxel plus a gap between layers
const LAYER_GAP: u16 = 3;

const DIM: Color = Color::Rgb {
    r: 60,
    g: 60,
    b: 70,
};

pub struct TerminalStrip<W: Write> {
    out: W,
    map: AddressMap,
    staged: Vec<Rgb>,
    title: String,
}

impl<W: Write> TerminalStrip<W> {
    pub fn new(out: W, side: usize) -> Self {
        let map = AddressMap::new(side);
        Self {
            out,
            staged: vec![Rgb::OFF; map.len()],
            map,
            title: String::new(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn layer_x(&self, z: usize) -> u16 {
        let width = self.map.side() as u16 * 2;
        z as u16 * (width + LAYER_GAP)
    }

    fn draw(&mut self) -> Result<(), StripError> {
        let side = self.map.side();

        queue!(
            self.out,
            BeginSynchronizedUpdate,
            SetBackgroundColor(Color::Black),
            cursor::MoveTo(0, TITLE_ROW),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::White),
            Print(&self.title)
        )?;

        for z in 0..side {
            let x0 = self.layer_x(z);
            queue!(
                self.out,
                cursor::MoveTo(x0, LABEL_ROW),
                SetForegroundColor(Color::Grey),
                Print(format!("z{z}"))
            )?;
        }

        for index in 0..self.staged.len() {
            let (x, y, z) = self.map.coords(index);
            let color = self.staged[index];
            // y grows away from the viewer: draw the far row on top
            let row = GRID_ROW + (side - 1 - y) as u16;
            let col = self.layer_x(z) + x as u16 * 2;

            if color.is_off() {
                queue!(
                    self.out,
                    cursor::MoveTo(col, row),
                    SetForegroundColor(DIM),
                    Print("··")
                )?;
            } else {
                queue!(
                    self.out,
                    cursor::MoveTo(col, row),
                    SetForegroundColor(color.to_color()),
                    Print("██")
                )?;
            }
        }

        queue!(
            self.out,
            cursor::MoveTo(0, GRID_ROW + side as u16 + 1),
            SetForegroundColor(Color::DarkGrey),
            Print("n/space: next   q: quit"),
            ResetColor,
            EndSynchronizedUpdate
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> LedStrip for TerminalStrip<W> {
    fn len(&self) -> usize {
        self.staged.len()
    }

    fn clear(&mut self) -> Result<(), StripError> {
        self.staged.fill(Rgb::OFF);
        self.draw()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), StripError> {
        check_index(index, self.staged.len());
        self.staged[index] = color;
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), StripError> {
        self.draw()
    }
}
