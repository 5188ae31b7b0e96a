//! Axis-aligned pixel grid model.
//!
//! A [`GridModel`] holds the per-axis scale and offset recovered by the
//! periodicity fitter together with the image size, and derives the inclusive
//! range of grid-cell indices that covers every image pixel. Cells along one
//! axis are the half-open intervals `[O + k·S, O + (k+1)·S)`; the cell index
//! of a pixel and the continuous center of a cell follow directly.

use crate::periodicity::AxisEstimate;
use serde::Serialize;

/// Inclusive grid-cell index range covering the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridBounds {
    pub min_gx: i64,
    pub max_gx: i64,
    pub min_gy: i64,
    pub max_gy: i64,
}

/// Recovered pixel grid: per-axis scale and offset plus the image extent.
#[derive(Clone, Copy, Debug)]
pub struct GridModel {
    pub sx: f64,
    pub ox: f64,
    pub sy: f64,
    pub oy: f64,
    pub w: usize,
    pub h: usize,
}

impl GridModel {
    /// Build a grid model from two axis estimates.
    ///
    /// Scales below 1 would make the cell-index bounds meaningless, so they
    /// are clamped to 1 here rather than at every use site.
    pub fn from_estimates(x: &AxisEstimate, y: &AxisEstimate, w: usize, h: usize) -> Self {
        Self {
            sx: x.scale.max(1.0),
            ox: x.offset,
            sy: y.scale.max(1.0),
            oy: y.offset,
            w,
            h,
        }
    }

    #[inline]
    /// Grid cell containing the high-resolution pixel at (px, py).
    pub fn cell_index(&self, px: f64, py: f64) -> (i64, i64) {
        (
            ((px - self.ox) / self.sx).floor() as i64,
            ((py - self.oy) / self.sy).floor() as i64,
        )
    }

    #[inline]
    /// Continuous center of grid cell (kx, ky).
    pub fn cell_center(&self, kx: i64, ky: i64) -> (f64, f64) {
        (
            self.ox + kx as f64 * self.sx + self.sx / 2.0,
            self.oy + ky as f64 * self.sy + self.sy / 2.0,
        )
    }

    /// Inclusive cell-index range covering all pixels of the image.
    pub fn bounds(&self) -> GridBounds {
        let (min_gx, min_gy) = self.cell_index(0.0, 0.0);
        let (max_gx, max_gy) = self.cell_index(
            self.w.saturating_sub(1) as f64,
            self.h.saturating_sub(1) as f64,
        );
        GridBounds {
            min_gx,
            max_gx,
            min_gy,
            max_gy,
        }
    }

    /// Dimensions of the reconstructed low-resolution image.
    pub fn low_res_size(&self) -> (usize, usize) {
        let b = self.bounds();
        (
            (b.max_gx - b.min_gx + 1) as usize,
            (b.max_gy - b.min_gy + 1) as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(sx: f64, ox: f64, sy: f64, oy: f64, w: usize, h: usize) -> GridModel {
        GridModel {
            sx,
            ox,
            sy,
            oy,
            w,
            h,
        }
    }

    #[test]
    fn cell_index_and_center_are_consistent() {
        let g = model(4.0, 0.0, 4.0, 0.0, 32, 32);
        assert_eq!(g.cell_index(0.0, 0.0), (0, 0));
        assert_eq!(g.cell_index(3.9, 3.9), (0, 0));
        assert_eq!(g.cell_index(4.0, 0.0), (1, 0));
        let (cx, cy) = g.cell_center(1, 0);
        assert_eq!((cx, cy), (6.0, 2.0));
        assert_eq!(g.cell_index(cx, cy), (1, 0));
    }

    #[test]
    fn offset_shifts_bounds_below_zero() {
        // Leading 2-pixel border on both axes, scale 5, 42x42 crop.
        let g = model(5.0, 2.0, 5.0, 2.0, 42, 42);
        let b = g.bounds();
        assert_eq!((b.min_gx, b.max_gx), (-1, 7));
        assert_eq!((b.min_gy, b.max_gy), (-1, 7));
        assert_eq!(g.low_res_size(), (9, 9));
    }

    #[test]
    fn every_pixel_lands_inside_bounds() {
        for (sx, ox, sy, oy, w, h) in [
            (4.0, 0.0, 4.0, 0.0, 32usize, 32usize),
            (5.0, 2.0, 5.0, 2.0, 42, 42),
            (7.143, 3.5, 6.9, 0.1, 100, 97),
            (1.0, 0.0, 1.0, 0.0, 64, 64),
        ] {
            let g = model(sx, ox, sy, oy, w, h);
            let b = g.bounds();
            for py in 0..h {
                for px in 0..w {
                    let (kx, ky) = g.cell_index(px as f64, py as f64);
                    assert!(
                        kx >= b.min_gx && kx <= b.max_gx && ky >= b.min_gy && ky <= b.max_gy,
                        "pixel ({px}, {py}) -> cell ({kx}, {ky}) outside {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn identity_grid_matches_image_size() {
        let g = model(1.0, 0.0, 1.0, 0.0, 64, 64);
        assert_eq!(g.low_res_size(), (64, 64));
    }

    #[test]
    fn larger_scale_gives_smaller_low_res() {
        let w = 240;
        let mut last = usize::MAX;
        for sx in [2.0, 3.0, 4.0, 6.0, 8.0] {
            let g = model(sx, 0.0, 2.0, 0.0, w, 16);
            let (lw, _) = g.low_res_size();
            assert!(lw < last, "sx={sx} -> {lw} not below {last}");
            last = lw;
        }
    }

    #[test]
    fn degenerate_scales_are_clamped() {
        let est_x = AxisEstimate {
            scale: 0.25,
            offset: 0.0,
            confidence: 0.0,
        };
        let est_y = AxisEstimate::degenerate();
        let g = GridModel::from_estimates(&est_x, &est_y, 16, 16);
        assert_eq!(g.sx, 1.0);
        assert_eq!(g.sy, 1.0);
    }
}
