use crate::complex::Complex;
use crate::viewport::Viewport;

/// One complex sample per pixel, row-major (rows outer, columns inner).
///
/// Built fresh for every frame from a [`Viewport`] and never mutated.
/// Row 0 holds the samples at `y_min`, column 0 the samples at `x_min`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    width: u32,
    height: u32,
    points: Vec<Complex>,
}

impl SampleGrid {
    /// Map every pixel of `viewport` to its point on the complex plane.
    ///
    /// Real parts step evenly over `[x_min, x_max)` and imaginary parts over
    /// `[y_min, y_max)`, so the last column sits one step short of `x_max`.
    pub fn map(viewport: &Viewport) -> Self {
        let reals = axis(viewport.x_min(), viewport.x_max(), viewport.width);
        let imags = axis(viewport.y_min(), viewport.y_max(), viewport.height);

        let mut points = Vec::with_capacity(reals.len() * imags.len());
        for &im in &imags {
            points.extend(reals.iter().map(|&re| Complex::new(re, im)));
        }

        Self {
            width: viewport.width,
            height: viewport.height,
            points,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The sample at pixel `(col, row)`.
    #[inline]
    pub fn get(&self, col: u32, row: u32) -> Option<Complex> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.points
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    pub fn points(&self) -> &[Complex] {
        &self.points
    }
}

/// `count` evenly spaced values over the half-open range `[start, stop)`.
///
/// Values come from the index, not a running sum, so there are always exactly
/// `count` of them.
fn axis(start: f64, stop: f64, count: u32) -> Vec<f64> {
    let step = (stop - start) / count as f64;
    (0..count).map(|k| start + k as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_has_exact_count() {
        // 0.1 is not representable; naive accumulation overshoots here.
        for count in [1, 3, 7, 10, 999, 1000, 1001] {
            assert_eq!(axis(-0.3, 0.7, count).len(), count as usize);
        }
    }

    #[test]
    fn axis_is_half_open() {
        let values = axis(0.0, 1.0, 4);
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn grid_len_matches_resolution() {
        for (w, h) in [(1, 1), (4, 4), (3, 7), (640, 480), (1000, 1000)] {
            let vp = Viewport::new(Complex::new(0.1, -0.3), 0.7, 0.3, w, h).unwrap();
            let grid = SampleGrid::map(&vp);
            assert_eq!(grid.len(), w as usize * h as usize, "{w}×{h}");
        }
    }

    #[test]
    fn row_major_ordering() {
        let vp = Viewport::new(Complex::ZERO, 4.0, 4.0, 4, 4).unwrap();
        let grid = SampleGrid::map(&vp);
        // Second element moves along the real axis, fifth moves to the next row.
        assert_eq!(grid.points()[1], Complex::new(-1.0, -2.0));
        assert_eq!(grid.points()[4], Complex::new(-2.0, -1.0));
        assert_eq!(grid.get(3, 2), Some(Complex::new(1.0, 0.0)));
        assert_eq!(grid.get(4, 0), None);
    }
}
