//! The rendering collaborator: a wired strand of RGB emitters.

use crate::color::Rgb;
use crate::error::StripError;

/// Capability interface every animation draws through.
///
/// Colours are staged with [`set_pixel`](LedStrip::set_pixel) and become
/// visible on [`refresh`](LedStrip::refresh). Transport errors are fatal to the
/// caller and are never retried.
pub trait LedStrip {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self) -> Result<(), StripError>;

    /// Stage a colour. `index` must be below [`len`](LedStrip::len).
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), StripError>;

    fn refresh(&mut self) -> Result<(), StripError>;
}

impl<S: LedStrip + ?Sized> LedStrip for &mut S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&mut self) -> Result<(), StripError> {
        (**self).clear()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), StripError> {
        (**self).set_pixel(index, color)
    }

    fn refresh(&mut self) -> Result<(), StripError> {
        (**self).refresh()
    }
}

#[inline]
pub(crate) fn check_index(index: usize, len: usize) {
    assert!(index < len, "pixel {index} past the end of a {len} pixel strand");
}

#[derive(Clone, Debug)]
pub struct MemoryStrip {
    staged: Vec<Rgb>,
    shown: Vec<Rgb>,
    refreshes: u64,
}

impl MemoryStrip {
    pub fn new(len: usize) -> Self {
        Self {
            staged: vec![Rgb::OFF; len],
            shown: vec![Rgb::OFF; len],
            refreshes: 0,
        }
    }

    pub fn shown(&self) -> &[Rgb] {
        &self.shown
    }

    pub fn staged(&self) -> &[Rgb] {
        &self.staged
    }

    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    pub fn lit(&self) -> usize {
        self.shown.iter().filter(|c| !c.is_off()).count()
    }
}

impl LedStrip for MemoryStrip {
    fn len(&self) -> usize {
        self.shown.len()
    }

    fn clear(&mut self) -> Result<(), StripError> {
        self.staged.fill(Rgb::OFF);
        self.shown.fill(Rgb::OFF);
        Ok(())
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), StripError> {
        check_index(index, self.staged.len());
        self.staged[index] = color;
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), StripError> {
        self.shown.copy_from_slice(&self.staged);
        self.refreshes += 1;
        Ok(())
    }
}
