use juliaflow_core::{Complex, FractalParameters, Julia, PixelResult, SampleGrid, Viewport};

/// Map and iterate every pixel of a viewport sequentially.
fn render_grid(julia: &Julia, viewport: &Viewport) -> Vec<PixelResult> {
    SampleGrid::map(viewport)
        .points()
        .iter()
        .map(|&z| julia.iterate(z))
        .collect()
}

#[test]
fn headless_julia_render() {
    // Basilica: the origin sits on the bounded 0 → −1 → 0 cycle.
    let params = FractalParameters::new(Complex::new(-1.0, 0.0), 256, 4.0).unwrap();
    let julia = Julia::new(params);
    let viewport = Viewport::new(Complex::ZERO, 3.0, 3.0, 100, 100).unwrap();

    let results = render_grid(&julia, &viewport);

    assert_eq!(results.len(), 100 * 100);

    let escaped = results.iter().filter(|r| r.escaped()).count();
    let bounded = results.len() - escaped;
    assert!(escaped > 0, "should have some escaped points");
    assert!(bounded > 0, "should have some bounded points");
}

#[test]
fn headless_render_is_deterministic() {
    let julia = Julia::new(FractalParameters::default().with_max_iterations(300));
    let viewport = Viewport::default_julia(80, 60);

    let run1 = render_grid(&julia, &viewport);
    let run2 = render_grid(&julia, &viewport);

    assert_eq!(run1, run2, "two identical renders must produce identical results");
}

#[test]
fn grid_corners_match_plane_bounds() {
    let viewport = Viewport::new(Complex::new(0.25, -0.5), 5.0, 3.0, 250, 150).unwrap();
    let grid = SampleGrid::map(&viewport);
    let step_x = viewport.step_x();
    let step_y = viewport.step_y();

    let first = grid.points()[0];
    assert!((first.re - viewport.x_min()).abs() < step_x);
    assert!((first.im - viewport.y_min()).abs() < step_y);

    let last = *grid.points().last().unwrap();
    assert!((last.re - (viewport.x_max() - step_x)).abs() < step_x);
    assert!((last.im - (viewport.y_max() - step_y)).abs() < step_y);
    assert!(last.re < viewport.x_max());
    assert!(last.im < viewport.y_max());
}

#[test]
fn outer_ring_escapes_at_zero() {
    // Every sample of a viewport far from the origin lies outside |z| = 2.
    let julia = Julia::new(FractalParameters::default());
    let viewport = Viewport::new(Complex::new(100.0, 100.0), 1.0, 1.0, 16, 16).unwrap();
    let results = render_grid(&julia, &viewport);
    assert!(results
        .iter()
        .all(|r| *r == PixelResult::Escaped { iterations: 0 }));
}
