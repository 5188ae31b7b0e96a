//! Resampling of the high-resolution image through a recovered grid.
//!
//! Two outputs share one per-cell color routine:
//! - `preview`: same size as the input, every pixel replaced by the color of
//!   the grid cell it falls into.
//! - `low_res`: one pixel per grid cell over the full grid extent.
//!
//! The cell color is either the nearest-neighbor sample at the cell center or
//! a box average over a window of half-extent `0.3·S` around it. The radius
//! stays below `S/2` so anti-alias fringes at cell boundaries do not pollute
//! the average, while still containing at least one source pixel for S ≥ 2.
//! Cell colors are memoized per cell, which keeps the preview pass at one
//! color computation per cell instead of one per output pixel.

use crate::grid::GridModel;
use crate::image::ImageRgbaF32;
use std::collections::HashMap;

/// Half-extent of the box-average window, as a fraction of the cell scale.
const BOX_RADIUS_FACTOR: f64 = 0.3;

/// Grid-driven resampler with a per-cell color cache.
pub struct Reconstructor<'a> {
    image: &'a ImageRgbaF32,
    grid: GridModel,
    sample_center_only: bool,
    cell_colors: HashMap<(i64, i64), [f32; 4]>,
}

impl<'a> Reconstructor<'a> {
    pub fn new(image: &'a ImageRgbaF32, grid: GridModel, sample_center_only: bool) -> Self {
        Self {
            image,
            grid,
            sample_center_only,
            cell_colors: HashMap::new(),
        }
    }

    /// Number of distinct cells whose color has been computed so far.
    pub fn cells_sampled(&self) -> usize {
        self.cell_colors.len()
    }

    /// Color of grid cell (kx, ky), memoized across calls.
    pub fn cell_color(&mut self, kx: i64, ky: i64) -> [f32; 4] {
        if let Some(&color) = self.cell_colors.get(&(kx, ky)) {
            return color;
        }
        let color = self.compute_cell_color(kx, ky);
        self.cell_colors.insert((kx, ky), color);
        color
    }

    /// Full-size preview: every pixel takes its cell's color.
    pub fn preview(&mut self) -> ImageRgbaF32 {
        let (w, h) = (self.image.w, self.image.h);
        let mut out = ImageRgbaF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let (kx, ky) = self.grid.cell_index(x as f64, y as f64);
                let color = self.cell_color(kx, ky);
                out.set(x, y, color);
            }
        }
        out
    }

    /// Low-resolution output: one pixel per grid cell.
    pub fn low_res(&mut self) -> ImageRgbaF32 {
        let bounds = self.grid.bounds();
        let (lw, lh) = self.grid.low_res_size();
        let mut out = ImageRgbaF32::new(lw, lh);
        for gy in 0..lh {
            for gx in 0..lw {
                let color = self.cell_color(bounds.min_gx + gx as i64, bounds.min_gy + gy as i64);
                out.set(gx, gy, color);
            }
        }
        out
    }

    fn compute_cell_color(&self, kx: i64, ky: i64) -> [f32; 4] {
        let (cx, cy) = self.grid.cell_center(kx, ky);
        if self.sample_center_only {
            return self.nearest_sample(cx, cy);
        }

        let x_min = ((cx - BOX_RADIUS_FACTOR * self.grid.sx).ceil() as i64).max(0);
        let x_max = ((cx + BOX_RADIUS_FACTOR * self.grid.sx).floor() as i64)
            .min(self.image.w as i64 - 1);
        let y_min = ((cy - BOX_RADIUS_FACTOR * self.grid.sy).ceil() as i64).max(0);
        let y_max = ((cy + BOX_RADIUS_FACTOR * self.grid.sy).floor() as i64)
            .min(self.image.h as i64 - 1);

        if x_min > x_max || y_min > y_max {
            // Window fell entirely outside the image (edge cells).
            return self.nearest_sample(cx, cy);
        }

        let mut acc = [0.0f64; 4];
        let mut count = 0u32;
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let px = self.image.get(x as usize, y as usize);
                for (a, &c) in acc.iter_mut().zip(px.iter()) {
                    *a += c as f64;
                }
                count += 1;
            }
        }
        let inv = 1.0 / count as f64;
        [
            (acc[0] * inv) as f32,
            (acc[1] * inv) as f32,
            (acc[2] * inv) as f32,
            (acc[3] * inv) as f32,
        ]
    }

    #[inline]
    fn nearest_sample(&self, cx: f64, cy: f64) -> [f32; 4] {
        let x = (cx.round() as i64).clamp(0, self.image.w as i64 - 1) as usize;
        let y = (cy.round() as i64).clamp(0, self.image.h as i64 - 1) as usize;
        self.image.get(x, y)
    }
}
