use approx::assert_relative_eq;
use camino::Utf8Path;
use cometa::{
    curves::{generate, CurveKind, CurveParams},
    nucleus::estimate_nucleus,
    param_file::ParamFile,
    photometry::{estimate_mass, MassParams},
    points::PointSet,
    CometaError, Distance, SublimationEstimator,
};

fn sample() -> ParamFile {
    ParamFile::from_path(Utf8Path::new("tests/data/comet_params.txt")).unwrap()
}

#[test]
fn keys_are_mapped() {
    let params = sample();
    assert_eq!(params.len(), 11);
    assert_eq!(params.get("r0"), Some(1.0));
    assert_eq!(params.get("r_earth"), Some(6371.0));
    assert_eq!(params.get("afrho0"), Some(1000.0));
    assert_eq!(params.get("m_k"), Some(5.0));
    assert_eq!(params.get("angular_size"), Some(1.0));
    assert_eq!(params.get("T"), None);
}

#[test]
fn parameter_file_drives_every_calculator() {
    let params = sample();

    let sub = params.sublimation_input().unwrap();
    assert_eq!(sub.geocentric_distance, Distance::kilometers(6371.0));
    let result = SublimationEstimator::default().estimate(&sub).unwrap();
    assert_relative_eq!(result.total_temperature_k, 400.085_707_633_420_8, max_relative = 1e-12);

    let mass = estimate_mass(&params.mass_input().unwrap(), &MassParams::default()).unwrap();
    assert_relative_eq!(mass.kilograms, 7.242_987_555_311_29e31, max_relative = 1e-12);

    let nucleus = estimate_nucleus(&params.nucleus_input().unwrap()).unwrap();
    assert_relative_eq!(nucleus.diameter_km, 6.645, max_relative = 1e-12);
    assert_relative_eq!(
        nucleus.linear_size.unwrap().size_km,
        725.281_266_9,
        max_relative = 1e-9
    );

    let curve = generate(
        CurveKind::AfrhoVsDistance,
        &params.curve_inputs().unwrap(),
        &CurveParams::default(),
    )
    .unwrap();
    assert_eq!(curve.len(), 100);
}

#[test]
fn malformed_parameter_file() {
    let err = ParamFile::parse("R0 = 1\nREARTH = far away\n").unwrap_err();
    assert_eq!(
        err,
        CometaError::NomParsingError("line 2: REARTH = far away".into())
    );
}

#[test]
fn observed_points_file() {
    let points = PointSet::from_file(Utf8Path::new("tests/data/points.txt")).unwrap();
    assert_eq!(points.x, vec![0.5, 1.0, 1.5, 2.0, 3.0]);
    assert_eq!(points.y, vec![3900.0, 1010.0, 440.0, 260.0, 115.0]);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ParamFile::from_path(Utf8Path::new("tests/data/does_not_exist.txt")).unwrap_err();
    assert!(matches!(err, CometaError::IoError(_)));
    assert!(!err.is_validation());
}
