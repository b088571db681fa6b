/// Per-cell simulation state for a cube of edge `side`.
///
/// Cells are laid out `[x][y][z]` so every strand (fixed x, y) is a
/// contiguous slice ordered bottom to top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cube {
    side: usize,
    cells: Vec<u8>,
}

impl Cube {
    pub fn new(side: usize) -> Self {
        Self {
            side,
            cells: vec![0; side * side * side],
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.side && y < self.side && z < self.side
    }

    #[inline]
    fn offset(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(
            self.contains(x, y, z),
            "voxel ({x}, {y}, {z}) outside a cube of side {}",
            self.side
        );
        (x * self.side + y) * self.side + z
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> u8 {
        self.cells[self.offset(x, y, z)]
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, value: u8) {
        let i = self.offset(x, y, z);
        self.cells[i] = value;
    }

    /// The column of cells above (x, y), index 0 at the bottom.
    pub fn strand(&self, x: usize, y: usize) -> &[u8] {
        let start = self.offset(x, y, 0);
        &self.cells[start..start + self.side]
    }

    pub fn strand_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let start = self.offset(x, y, 0);
        &mut self.cells[start..start + self.side]
    }

    pub fn reset(&mut self) {
        self.cells.fill(0);
    }

    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cube_is_zeroed() {
        let cube = Cube::new(4);
        assert_eq!(cube.side(), 4);
        assert_eq!(cube.volume(), 64);
        assert!(cube.is_clear());
    }

    #[test]
    fn test_set_get_and_strand_views() {
        let mut cube = Cube::new(4);
        cube.set(1, 2, 3, 200);
        cube.set(1, 2, 0, 7);

        assert_eq!(cube.get(1, 2, 3), 200);
        assert_eq!(cube.strand(1, 2), &[7, 0, 0, 200]);
        assert_eq!(cube.strand(2, 1), &[0, 0, 0, 0]);

        cube.strand_mut(0, 0)[1] = 9;
        assert_eq!(cube.get(0, 0, 1), 9);
    }

    #[test]
    fn test_reset() {
        let mut cube = Cube::new(3);
        cube.set(2, 2, 2, 1);
        assert!(!cube.is_clear());
        cube.reset();
        assert!(cube.is_clear());
    }

    #[test]
    fn test_contains() {
        let cube = Cube::new(4);
        assert!(cube.contains(0, 0, 0));
        assert!(cube.contains(3, 3, 3));
        assert!(!cube.contains(4, 0, 0));
        assert!(!cube.contains(0, 4, 0));
        assert!(!cube.contains(0, 0, 4));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_write_panics() {
        let mut cube = Cube::new(4);
        cube.set(0, 0, 4, 1);
    }
}
