use trait_annotator::geometry::Point;
use trait_annotator::image::{ImageF32, ImageU8};

/// Dark 8-bit canvas with full-width bright rows and full-height bright
/// columns (raster coordinates, row 0 at the top).
pub fn line_grid_u8(width: usize, height: usize, rows: &[usize], cols: &[usize]) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = vec![0u8; width * height];
    for &r in rows {
        assert!(r < height, "row {r} outside image");
        img[r * width..(r + 1) * width].fill(255);
    }
    for &c in cols {
        assert!(c < width, "column {c} outside image");
        for y in 0..height {
            img[y * width + c] = 255;
        }
    }
    img
}

/// Same as [`line_grid_u8`], converted to floats in `[0, 1]`.
pub fn line_grid_f32(width: usize, height: usize, rows: &[usize], cols: &[usize]) -> ImageF32 {
    let data = line_grid_u8(width, height, rows, cols);
    ImageF32::from_u8(&ImageU8 {
        w: width,
        h: height,
        stride: width,
        data: &data,
    })
}

/// One-pixel bright line through the centre pixel of an odd `n × n` raster
/// at `deg` degrees in the y-up frame, drawn one pixel per column so the
/// image is point-symmetric about its centre. Also returns the drawn pixels
/// in display coordinates (`y = n − 1 − row`).
pub fn slanted_line_f32(n: usize, deg: f64) -> (ImageF32, Vec<Point>) {
    assert!(n % 2 == 1, "size must be odd");
    let mut img = ImageF32::new(n, n);
    let mut drawn = Vec::new();
    let m = (n / 2) as f64;
    let slope = deg.to_radians().tan();
    for x in 0..n {
        let r = (m - slope * (x as f64 - m)).round();
        if r >= 0.0 && r < n as f64 {
            img.set(x, r as usize, 1.0);
            drawn.push(Point::new(x as f64, (n - 1) as f64 - r));
        }
    }
    (img, drawn)
}
