//! Serpentine wiring: logical (x, y, z) voxel coordinates to strand indices.
//!
//! The strand enters layer 0 at the origin and snakes along x, reversing on
//! every row. Odd layers are wired back across the cube along y, reversing on
//! every column, so consecutive wire indices inside a layer are neighbours.

/// Map a voxel to its position on the wired strand.
///
/// Panics if any coordinate is outside `0..side`.
pub fn compute_index(x: usize, y: usize, z: usize, side: usize) -> usize {
    assert!(
        x < side && y < side && z < side,
        "voxel ({x}, {y}, {z}) outside a cube of side {side}"
    );

    let q = if z % 2 == 0 {
        if y % 2 == 0 {
            y * side + x
        } else {
            y * side + (side - 1 - x)
        }
    } else {
        // Layers are stacked head to tail, which mirrors y on even sides.
        let y = if side % 2 == 0 { side - 1 - y } else { y };

        if x % 2 == 0 {
            side * (side - x) - 1 - y
        } else {
            (side - 1 - x) * side + y
        }
    };

    z * side * side + q
}

/// Precomputed wiring table for one cube size, with the inverse lookup.
#[derive(Clone, Debug)]
pub struct AddressMap {
    side: usize,
    forward: Vec<usize>,
    inverse: Vec<[usize; 3]>,
}

impl AddressMap {
    pub fn new(side: usize) -> Self {
        let total = side * side * side;
        let mut forward = vec![0; total];
        let mut inverse = vec![[usize::MAX; 3]; total];

        for z in 0..side {
            for y in 0..side {
                for x in 0..side {
                    let index = compute_index(x, y, z, side);
                    assert!(
                        inverse[index][0] == usize::MAX,
                        "wire index {index} produced twice"
                    );
                    forward[(z * side + y) * side + x] = index;
                    inverse[index] = [x, y, z];
                }
            }
        }

        Self {
            side,
            forward,
            inverse,
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(x < self.side && y < self.side && z < self.side);
        self.forward[(z * self.side + y) * self.side + x]
    }

    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        let [x, y, z] = self.inverse[index];
        (x, y, z)
    }
}
