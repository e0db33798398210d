//! Tests for ascent/descent aggregation

use trailstitch::{ascent_descent, AscentDescent, Position};

fn profile(eles: &[f64]) -> Vec<Position> {
    eles.iter()
        .enumerate()
        .map(|(i, ele)| Position::with_ele(11.0 + i as f64 * 0.01, 46.0, *ele))
        .collect()
}

#[test]
fn test_up_and_down_totals() {
    let totals = ascent_descent(&profile(&[100.0, 150.0, 120.0, 170.0]));
    assert_eq!(totals.ascent, 100.0);
    assert_eq!(totals.descent, -30.0);
}

#[test]
fn test_descent_keeps_its_sign() {
    let totals = ascent_descent(&profile(&[2000.0, 1500.0]));
    assert_eq!(totals.ascent, 0.0);
    assert_eq!(totals.descent, -500.0);
}

#[test]
fn test_monotone_climb_has_no_descent() {
    let totals = ascent_descent(&profile(&[262.0, 890.0, 1420.0, 2100.0]));
    assert_eq!(totals.ascent, 2100.0 - 262.0);
    assert_eq!(totals.descent, 0.0);
}

#[test]
fn test_out_and_back_is_symmetric() {
    let mut eles = vec![500.0, 740.0, 680.0, 1200.0];
    let back: Vec<f64> = eles.iter().rev().copied().collect();
    eles.extend(back);
    let totals = ascent_descent(&profile(&eles));
    assert_eq!(totals.ascent, -totals.descent);
}

#[test]
fn test_untagged_points_read_as_sea_level() {
    // Elevation coverage gaps produce spurious deltas; the function
    // reports them rather than guessing.
    let mut coords = profile(&[800.0, 820.0]);
    coords.insert(1, Position::new(11.005, 46.0));
    let totals = ascent_descent(&coords);
    assert_eq!(totals.ascent, 820.0);
    assert_eq!(totals.descent, -800.0);
}

#[test]
fn test_empty_and_single_point_routes() {
    assert_eq!(ascent_descent(&[]), AscentDescent::default());
    assert_eq!(ascent_descent(&profile(&[3905.0])), AscentDescent::default());
}
