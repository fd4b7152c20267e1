use image::RgbImage;

/// A decoded image: row-major RGB8 bytes, 3 channels per pixel.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn from_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    #[cfg(test)]
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), (width * height * 3) as usize);
        Self {
            width,
            height,
            data,
        }
    }
}

/// Outcome of comparing one pair of images.
///
/// `score` is the mean CIE76 ΔE over all pixels (0 = identical, up to ~100),
/// `Some(0.0)` only for exact duplicates, and `None` when the size fast path
/// skipped the metric entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub is_duplicate: bool,
    pub score: Option<f64>,
}

/// Compare two decoded images.
///
/// Buffers with differing total byte counts are classified different without
/// touching pixel data. Equal-count buffers with swapped width/height still
/// get compared byte-for-byte; only exact identity counts as a duplicate, any
/// other difference is scored with the ΔE metric.
pub fn compare(a: &PixelBuffer, b: &PixelBuffer) -> Comparison {
    if a.data.len() != b.data.len() {
        return Comparison {
            is_duplicate: false,
            score: None,
        };
    }

    if a.data == b.data {
        return Comparison {
            is_duplicate: true,
            score: Some(0.0),
        };
    }

    Comparison {
        is_duplicate: false,
        score: Some(mean_delta_e(a, b)),
    }
}

/// A color in CIE L*a*b* space (D65 reference white).
#[derive(Debug, Clone, Copy)]
struct Lab {
    l: f64,
    a: f64,
    b: f64,
}

impl Lab {
    fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = srgb_to_linear(r as f64 / 255.0);
        let g = srgb_to_linear(g as f64 / 255.0);
        let b = srgb_to_linear(b as f64 / 255.0);

        // sRGB to XYZ (D65 illuminant)
        let x = r * 0.4124564 + g * 0.3575761 + b * 0.1804375;
        let y = r * 0.2126729 + g * 0.7151522 + b * 0.0721750;
        let z = r * 0.0193339 + g * 0.1191920 + b * 0.9503041;

        let fx = f_xyz(x / 0.95047);
        let fy = f_xyz(y / 1.00000);
        let fz = f_xyz(z / 1.08883);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// CIE76 color difference: Euclidean distance in L*a*b*.
    fn delta_e(&self, other: &Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn f_xyz(t: f64) -> f64 {
    let delta: f64 = 6.0 / 29.0;
    if t > delta.powi(3) {
        t.cbrt()
    } else {
        t / (3.0 * delta.powi(2)) + 4.0 / 29.0
    }
}

/// Mean per-pixel CIE76 ΔE across two equal-sized buffers.
fn mean_delta_e(a: &PixelBuffer, b: &PixelBuffer) -> f64 {
    let mut sum = 0.0;
    let mut pixels = 0usize;
    for (pa, pb) in a.data.chunks_exact(3).zip(b.data.chunks_exact(3)) {
        let lab_a = Lab::from_rgb(pa[0], pa[1], pa[2]);
        let lab_b = Lab::from_rgb(pb[0], pb[1], pb[2]);
        sum += lab_a.delta_e(&lab_b);
        pixels += 1;
    }
    sum / pixels as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> PixelBuffer {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        PixelBuffer::from_raw(width, height, data)
    }

    #[test]
    fn identical_buffers_are_duplicates_with_zero_score() {
        let a = solid(4, 4, [120, 30, 200]);
        let b = solid(4, 4, [120, 30, 200]);
        let result = compare(&a, &b);
        assert!(result.is_duplicate);
        assert_eq!(result.score, Some(0.0));
    }

    #[test]
    fn differing_sizes_skip_the_metric() {
        let a = solid(4, 4, [0, 0, 0]);
        let b = solid(4, 5, [0, 0, 0]);
        let result = compare(&a, &b);
        assert!(!result.is_duplicate);
        assert_eq!(result.score, None);
    }

    #[test]
    fn same_pixel_count_different_shape_still_compares() {
        let a = solid(4, 2, [10, 20, 30]);
        let b = solid(2, 4, [10, 20, 30]);
        let result = compare(&a, &b);
        assert!(result.is_duplicate);
    }

    #[test]
    fn any_differing_pixel_is_not_a_duplicate_and_scores_positive() {
        let a = solid(2, 2, [100, 100, 100]);
        let mut b = solid(2, 2, [100, 100, 100]);
        b.data[0] = 101;
        let result = compare(&a, &b);
        assert!(!result.is_duplicate);
        let score = result.score.unwrap();
        assert!(score > 0.0, "score was {score}");
    }

    #[test]
    fn black_versus_white_scores_near_one_hundred() {
        let a = solid(3, 3, [0, 0, 0]);
        let b = solid(3, 3, [255, 255, 255]);
        let score = compare(&a, &b).score.unwrap();
        assert!((score - 100.0).abs() < 0.5, "score was {score}");
    }

    #[test]
    fn white_maps_to_lab_reference_white() {
        let lab = Lab::from_rgb(255, 255, 255);
        assert!((lab.l - 100.0).abs() < 0.01);
        assert!(lab.a.abs() < 0.01);
        assert!(lab.b.abs() < 0.01);
    }
}
