use crate::image::ImageRgbaF32;

/// 1-D edge-energy signals, one per image axis.
///
/// `col[x]` sums the L1 RGB difference between columns `x` and `x-1` over all
/// rows; `row[y]` is the symmetric definition. Values are nonnegative and the
/// alpha channel does not contribute.
#[derive(Clone, Debug, Default)]
pub struct EdgeProjection {
    /// Length equals the image width.
    pub col: Vec<f64>,
    /// Length equals the image height.
    pub row: Vec<f64>,
}

impl EdgeProjection {
    /// Total edge energy of one axis signal.
    pub fn energy(signal: &[f64]) -> f64 {
        signal.iter().sum()
    }
}

/// Replaceable projection implementation.
///
/// The analyzer only requires the contract, not the CPU pass: an embedding
/// host may compute the two signals in a GPU reduction as long as the values
/// match [`CpuProjector`] to within single-precision tolerance.
pub trait ProjectionBackend {
    fn project(&self, image: &ImageRgbaF32) -> EdgeProjection;
}

/// Reference CPU implementation of the edge projection.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuProjector;

impl ProjectionBackend for CpuProjector {
    fn project(&self, image: &ImageRgbaF32) -> EdgeProjection {
        let (w, h) = (image.w, image.h);
        let mut col = vec![0.0f64; w];
        let mut row = vec![0.0f64; h];

        for y in 0..h {
            let yp = y.saturating_sub(1);
            for x in 0..w {
                let xp = x.saturating_sub(1);
                let px = image.get(x, y);
                let left = image.get(xp, y);
                let up = image.get(x, yp);
                col[x] += l1_rgb(px, left);
                row[y] += l1_rgb(px, up);
            }
        }

        EdgeProjection { col, row }
    }
}

#[inline]
fn l1_rgb(a: [f32; 4], b: [f32; 4]) -> f64 {
    (a[0] - b[0]).abs() as f64 + (a[1] - b[1]).abs() as f64 + (a[2] - b[2]).abs() as f64
}

/// Project an image with the reference CPU backend.
pub fn project(image: &ImageRgbaF32) -> EdgeProjection {
    CpuProjector.project(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_image() -> ImageRgbaF32 {
        // Left half black, right half white, 4x3.
        let mut img = ImageRgbaF32::new(4, 3);
        for y in 0..3 {
            for x in 2..4 {
                img.set(x, y, [1.0, 1.0, 1.0, 1.0]);
            }
        }
        img
    }

    #[test]
    fn signal_lengths_match_dimensions() {
        let proj = project(&two_column_image());
        assert_eq!(proj.col.len(), 4);
        assert_eq!(proj.row.len(), 3);
    }

    #[test]
    fn left_clamp_zeroes_first_entries() {
        let proj = project(&two_column_image());
        assert_eq!(proj.col[0], 0.0);
        assert_eq!(proj.row[0], 0.0);
    }

    #[test]
    fn vertical_boundary_projects_onto_columns_only() {
        let proj = project(&two_column_image());
        // Three rows cross the boundary at x=2, three channels each.
        assert!((proj.col[2] - 9.0).abs() < 1e-9, "col={:?}", proj.col);
        assert_eq!(proj.col[1], 0.0);
        assert_eq!(proj.col[3], 0.0);
        // Rows are constant along y.
        assert!(proj.row.iter().all(|&v| v == 0.0), "row={:?}", proj.row);
    }

    #[test]
    fn alpha_changes_are_ignored() {
        let mut img = ImageRgbaF32::new(3, 1);
        img.set(1, 0, [0.0, 0.0, 0.0, 1.0]);
        let proj = project(&img);
        assert!(proj.col.iter().all(|&v| v == 0.0));
    }
}
