//! The iteration-count field: a flat, row-major buffer of counts with
//! its width and height.  This is the only thing a render pass hands
//! to the outside world.

use std::ops::Index;

use crate::errors::JuliaError;

/// A `height` by `width` field of escape counts.  Immutable once
/// assembled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    counts: Vec<u32>,
}

impl Raster {
    /// Reshapes the dispatcher's output.  `counts[row * width + col]`
    /// becomes `raster[row][col]`.
    pub fn assemble(counts: Vec<u32>, width: usize, height: usize) -> Result<Raster, JuliaError> {
        let expected = width * height;
        if counts.len() != expected {
            return Err(JuliaError::ShapeMismatch {
                expected,
                actual: counts.len(),
            });
        }
        Ok(Raster {
            width,
            height,
            counts,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(height, width)`, rows first.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// The count at `row`, `column`, if that cell exists.
    pub fn get(&self, row: usize, column: usize) -> Option<u32> {
        if row < self.height && column < self.width {
            Some(self.counts[row * self.width + column])
        } else {
            None
        }
    }

    /// The pixel at the centre of the grid.  Grids built by the
    /// resolver are odd in both directions, so this is exact.
    pub fn center(&self) -> Option<u32> {
        self.get(self.height / 2, self.width / 2)
    }

    /// Each row as a slice, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.counts.chunks(self.width.max(1))
    }

    /// The counts in row-major order.
    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }

    /// Gives back the flat buffer.
    pub fn into_vec(self) -> Vec<u32> {
        self.counts
    }

    /// The largest count in the field, or zero when it is empty.
    pub fn max_count(&self) -> u32 {
        self.counts.iter().cloned().max().unwrap_or(0)
    }
}

impl Index<usize> for Raster {
    type Output = [u32];

    fn index(&self, row: usize) -> &[u32] {
        let start = row * self.width;
        &self.counts[start..start + self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_reshapes_row_major() {
        let raster = Raster::assemble((0..6).collect(), 3, 2).unwrap();
        assert_eq!(raster.shape(), (2, 3));
        assert_eq!(&raster[0], &[0, 1, 2]);
        assert_eq!(&raster[1], &[3, 4, 5]);
        assert_eq!(raster[1][2], 5);
        assert_eq!(raster.get(1, 0), Some(3));
        assert_eq!(raster.get(2, 0), None);
        assert_eq!(raster.get(0, 3), None);
    }

    #[test]
    fn assemble_rejects_wrong_length() {
        assert_eq!(
            Raster::assemble(vec![0; 8], 3, 3),
            Err(JuliaError::ShapeMismatch {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn rows_walk_top_to_bottom() {
        let raster = Raster::assemble(vec![1, 1, 2, 2, 3, 3], 2, 3).unwrap();
        let rows: Vec<&[u32]> = raster.rows().collect();
        assert_eq!(rows, vec![&[1, 1][..], &[2, 2][..], &[3, 3][..]]);
    }

    #[test]
    fn center_and_max() {
        let raster = Raster::assemble(vec![0, 0, 0, 0, 7, 0, 0, 0, 2], 3, 3).unwrap();
        assert_eq!(raster.center(), Some(7));
        assert_eq!(raster.max_count(), 7);
        assert_eq!(Raster::assemble(vec![], 0, 0).unwrap().max_count(), 0);
    }
}
