//! Owned straight-RGBA f32 image in row-major layout (stride == width).
//!
//! Channels are kept in [0, 1] and are not premultiplied; callers holding
//! premultiplied pixels must un-premultiply before analysis.
#[derive(Clone, Debug)]
pub struct ImageRgbaF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of pixels between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order, four f32 channels per pixel
    pub data: Vec<f32>,
}

impl ImageRgbaF32 {
    /// Construct a zero-initialized (transparent black) buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h * 4],
        }
    }

    /// Wrap an existing channel buffer. `data.len()` must be `w * h * 4`.
    pub fn from_raw(w: usize, h: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), w * h * 4);
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[inline]
    /// Convert (x, y) to the linear index of the pixel's first channel.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.stride + x) * 4
    }

    #[inline]
    /// Get the RGBA channels at (x, y).
    pub fn get(&self, x: usize, y: usize) -> [f32; 4] {
        let i = self.idx(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    /// Set the RGBA channels at (x, y).
    pub fn set(&mut self, x: usize, y: usize, px: [f32; 4]) {
        let i = self.idx(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_round_trip() {
        let mut img = ImageRgbaF32::new(3, 2);
        img.set(2, 1, [0.25, 0.5, 0.75, 1.0]);
        assert_eq!(img.get(2, 1), [0.25, 0.5, 0.75, 1.0]);
        assert_eq!(img.get(0, 0), [0.0, 0.0, 0.0, 0.0]);
    }
}
