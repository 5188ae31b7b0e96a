use descale::image::ImageRgbaF32;

/// Opaque palette used by the synthetic generators. The four colors are
/// pairwise equidistant in L1 (distance 2), so every logical boundary
/// carries identical edge energy regardless of which colors meet there.
pub const PALETTE: [[f32; 4]; 4] = [
    [0.0, 0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [0.0, 1.0, 1.0, 1.0],
];

/// Deterministic pseudo-random palette tile of `kw × kh` logical pixels.
///
/// Horizontally and vertically adjacent pixels always get different palette
/// entries, so every logical boundary carries edge energy after upscaling.
pub fn palette_tile(kw: usize, kh: usize, seed: u64) -> Vec<[f32; 4]> {
    let mut state = seed.wrapping_mul(0x9E3779B97F4A7C15).wrapping_add(1);
    let mut indices = vec![0usize; kw * kh];
    for y in 0..kh {
        for x in 0..kw {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let mut idx = ((state >> 33) as usize) % PALETTE.len();
            let left = (x > 0).then(|| indices[y * kw + x - 1]);
            let top = (y > 0).then(|| indices[(y - 1) * kw + x]);
            while Some(idx) == left || Some(idx) == top {
                idx = (idx + 1) % PALETTE.len();
            }
            indices[y * kw + x] = idx;
        }
    }
    indices.into_iter().map(|i| PALETTE[i]).collect()
}

/// Tile whose logical pixels alternate between two colors in a checkerboard.
pub fn checker_tile(kw: usize, kh: usize, a: [f32; 4], b: [f32; 4]) -> Vec<[f32; 4]> {
    let mut tile = Vec::with_capacity(kw * kh);
    for y in 0..kh {
        for x in 0..kw {
            tile.push(if (x + y) % 2 == 0 { a } else { b });
        }
    }
    tile
}

/// Nearest-neighbor upscale of a logical tile by integer factor `s`.
pub fn upscale_nearest(tile: &[[f32; 4]], kw: usize, kh: usize, s: usize) -> ImageRgbaF32 {
    assert_eq!(tile.len(), kw * kh);
    let mut img = ImageRgbaF32::new(kw * s, kh * s);
    for y in 0..kh * s {
        for x in 0..kw * s {
            img.set(x, y, tile[(y / s) * kw + x / s]);
        }
    }
    img
}

/// Upscale with a solid border: `lead` pixels before the tile and `trail`
/// pixels after it on both axes. The grid offset of the result is `lead`.
pub fn upscale_with_border(
    tile: &[[f32; 4]],
    kw: usize,
    kh: usize,
    s: usize,
    lead: usize,
    trail: usize,
    border: [f32; 4],
) -> ImageRgbaF32 {
    assert_eq!(tile.len(), kw * kh);
    let w = lead + kw * s + trail;
    let h = lead + kh * s + trail;
    let mut img = ImageRgbaF32::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let inside = x >= lead && x < lead + kw * s && y >= lead && y < lead + kh * s;
            let px = if inside {
                tile[((y - lead) / s) * kw + (x - lead) / s]
            } else {
                border
            };
            img.set(x, y, px);
        }
    }
    img
}

/// Upscale with one-pixel anti-alias ringing at every interior cell
/// boundary: the two columns (and rows) straddling a boundary are smeared
/// toward each other, the way low-quality rescalers blur cell edges. The
/// smear is symmetric, so the detected grid offset stays at zero.
pub fn upscale_with_ringing(tile: &[[f32; 4]], kw: usize, kh: usize, s: usize) -> ImageRgbaF32 {
    let mut img = upscale_nearest(tile, kw, kh, s);
    let (w, h) = (img.w, img.h);
    for y in 0..h {
        for b in (s..w).step_by(s) {
            let left = img.get(b - 1, y);
            let right = img.get(b, y);
            img.set(b - 1, y, lerp(left, right, 0.25));
            img.set(b, y, lerp(left, right, 0.75));
        }
    }
    for x in 0..w {
        for b in (s..h).step_by(s) {
            let up = img.get(x, b - 1);
            let down = img.get(x, b);
            img.set(x, b - 1, lerp(up, down, 0.25));
            img.set(x, b, lerp(up, down, 0.75));
        }
    }
    img
}

/// Image of `cells × cells` equal fractional-width cells over `n × n` pixels,
/// with boundary pixels blended by exact area coverage. The effective scale
/// is `n / cells`, which need not be an integer.
pub fn fractional_grid_image(n: usize, cells: usize, seed: u64) -> ImageRgbaF32 {
    let tile = palette_tile(cells, cells, seed);
    let scale = n as f64 / cells as f64;
    let cover = |p: usize| coverage(p, scale, cells);

    let mut img = ImageRgbaF32::new(n, n);
    for y in 0..n {
        let wy = cover(y);
        for x in 0..n {
            let wx = cover(x);
            let mut px = [0.0f32; 4];
            for &(j, fy) in &wy {
                for &(i, fx) in &wx {
                    let c = tile[j * cells + i];
                    let f = (fx * fy) as f32;
                    for ch in 0..4 {
                        px[ch] += f * c[ch];
                    }
                }
            }
            img.set(x, y, px);
        }
    }
    img
}

fn lerp(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + t * (b[0] - a[0]),
        a[1] + t * (b[1] - a[1]),
        a[2] + t * (b[2] - a[2]),
        a[3] + t * (b[3] - a[3]),
    ]
}

/// Cells overlapping pixel interval [p, p+1) and the overlapped fractions.
fn coverage(p: usize, scale: f64, cells: usize) -> Vec<(usize, f64)> {
    let lo = p as f64;
    let hi = lo + 1.0;
    let first = ((lo / scale).floor() as usize).min(cells - 1);
    let last = (((hi - 1e-9) / scale).floor() as usize).min(cells - 1);
    (first..=last)
        .map(|i| {
            let cell_lo = i as f64 * scale;
            let cell_hi = cell_lo + scale;
            let overlap = (hi.min(cell_hi) - lo.max(cell_lo)).max(0.0);
            (i, overlap)
        })
        .collect()
}
