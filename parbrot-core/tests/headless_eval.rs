use parbrot_core::{evaluate_row, Complex, IterationResult, SampleGrid, Scale, Viewport};

/// Evaluate every pixel of a frame and collect results into a flat Vec.
fn evaluate_grid(viewport: &Viewport, width: u32, height: u32) -> Vec<IterationResult> {
    let grid = SampleGrid::new(viewport, width, height);
    let mut results = Vec::with_capacity(grid.pixel_count() as usize);
    for row in 0..height {
        results.extend(evaluate_row(&grid, row, viewport.max_count));
    }
    results
}

#[test]
fn headless_home_view_evaluation() {
    let viewport = Viewport::home(100, 100);

    let results = evaluate_grid(&viewport, 100, 100);

    assert_eq!(results.len(), 100 * 100);

    // The home framing shows the whole set, so both interior and escaped
    // points must be present.
    let interior = results
        .iter()
        .filter(|r| r.count == viewport.max_count)
        .count();
    let escaped = results.len() - interior;

    assert!(escaped > 0, "should have some escaped points");
    assert!(interior > 0, "should have some interior points");
}

#[test]
fn headless_evaluation_is_deterministic() {
    let viewport = Viewport::home(80, 60);

    let run1 = evaluate_grid(&viewport, 80, 60);
    let run2 = evaluate_grid(&viewport, 80, 60);

    assert_eq!(
        run1, run2,
        "two identical evaluations must produce identical results"
    );
}

#[test]
fn panned_far_exterior_view_has_no_bounded_points() {
    let mut viewport = Viewport::home(64, 64);
    // Push the whole view well past the bailout circle on the real axis.
    viewport.pan(200.0, 0.0);

    let results = evaluate_grid(&viewport, 64, 64);

    assert!(
        results.iter().all(|r| r.count == 0),
        "every sample starts outside the bailout circle"
    );
}

#[test]
fn raising_the_cap_only_refines_capped_pixels() {
    let viewport = Viewport::home(60, 60);
    let mut deeper = viewport;
    deeper.adjust_max_count(256);

    let base = evaluate_grid(&viewport, 60, 60);
    let refined = evaluate_grid(&deeper, 60, 60);

    for (b, r) in base.iter().zip(&refined) {
        assert_eq!(b.pixel, r.pixel);
        if b.count < viewport.max_count {
            assert_eq!(b.count, r.count, "escaped pixel must keep its count");
        } else {
            assert!(r.count >= b.count, "capped pixel may only run deeper");
        }
    }
}

#[test]
fn view_inside_period_two_disk_saturates_everywhere() {
    // The disk of radius 1/4 centred on -1 lies entirely inside the set, so
    // a view framed well within it reports the cap at every pixel.
    let step = 0.1 / 64.0;
    let viewport = Viewport::new(Complex::new(-1.05, 0.05), Scale::new(step, -step), 200).unwrap();

    let results = evaluate_grid(&viewport, 64, 64);

    assert!(results.iter().all(|r| r.count == 200));
}
