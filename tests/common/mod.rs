#![allow(dead_code)]
use approx::assert_relative_eq;
use cometa::{Distance, SublimationEstimator, SublimationInput, SublimationResult};

/// Species names of the built-in table, stripped of their descriptive suffix.
pub fn formulas(names: &[String]) -> Vec<&str> {
    names
        .iter()
        .map(|n| n.split_whitespace().next().unwrap_or(""))
        .collect()
}

pub fn estimate(r_sun: f64, r_earth: Distance, temperature: Option<f64>) -> SublimationResult {
    let input = SublimationInput::new(r_sun, r_earth, temperature).unwrap();
    SublimationEstimator::default().estimate(&input).unwrap()
}

pub fn assert_results_identical(a: &SublimationResult, b: &SublimationResult) {
    assert_eq!(a.total_temperature_k.to_bits(), b.total_temperature_k.to_bits());
    assert_eq!(a.sublimating, b.sublimating);
    assert_eq!(a.species, b.species);
}

pub fn assert_earth_ratio(result: &SublimationResult, earth_radius_km: f64) {
    assert_relative_eq!(
        result.geocentric_distance_earth_radii,
        result.geocentric_distance_km / earth_radius_km,
        max_relative = 1e-9
    );
}
