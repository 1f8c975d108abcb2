//! Integration Tests
//!
//! End-to-end tests for the modeling pipeline: request in, slice out.

use approx::assert_abs_diff_eq;
use modelr::{
    run_batch, AxisValues, BodyParams, ConvolutionEngine, Geometry, LayerModel, ModelRequest,
    ModelrError, ModelingConfig, ReflectivityMethod, RockProperties, SliceSelector, StepParams,
    Wavelet, WedgeParams,
};
use test_case::test_case;

fn rock0() -> RockProperties {
    RockProperties::new(2000.0, Some(1000.0), 2200.0).unwrap()
}

fn rock1() -> RockProperties {
    RockProperties::new(2200.0, Some(1100.0), 2300.0).unwrap()
}

fn rock2() -> RockProperties {
    RockProperties::new(2500.0, Some(1200.0), 2600.0).unwrap()
}

fn body_request() -> ModelRequest {
    ModelRequest {
        rocks: vec![rock0(), rock1(), rock2()],
        geometry: Geometry::Body(BodyParams {
            traces: 300,
            pad: 50.0,
            margin: 0,
            left: (0.0, 0.0),
            right: (0.0, 50.0),
            layers: 3,
        }),
        method: "zoeppritz".to_string(),
        angles: AxisValues::Single(0.0),
        frequencies: AxisValues::Single(25.0),
        slice: SliceSelector::default(),
    }
}

fn normal_incidence(upper: &RockProperties, lower: &RockProperties) -> f64 {
    let (z1, z2) = (upper.acoustic_impedance(), lower.acoustic_impedance());
    (z2 - z1) / (z2 + z1)
}

// === Body Scenario ===

#[test]
fn test_body_scenario_grid_shape() {
    let config = ModelingConfig::default();
    let response = body_request().run(&config).unwrap();

    assert_eq!(response.model.num_traces(), 300);
    assert_eq!(response.slice.data().dim(), (150, 300));
}

#[test]
fn test_body_scenario_thin_end_matches_flat_model() {
    let config = ModelingConfig::default();
    let response = body_request().run(&config).unwrap();

    // Zero thickness at trace 0 leaves only the bounding rocks
    let flat = LayerModel::flat(150, 1, &[50]).unwrap();
    let bounding = [rock0(), rock2()];
    let wavelet = Wavelet::ricker(25.0, &config).unwrap();
    let engine = ConvolutionEngine::new(&flat, &bounding, ReflectivityMethod::Zoeppritz).unwrap();
    let expected = engine.trace(0, 0.0, &wavelet).unwrap();

    let actual = response.slice.column(0).unwrap();
    for (a, e) in actual.iter().zip(&expected) {
        assert_abs_diff_eq!(*a, *e, epsilon = 1e-15);
    }
    assert_eq!(response.model.boundaries(0).len(), 1);
}

#[test]
fn test_body_scenario_thick_end_shows_top_and_base() {
    let config = ModelingConfig::default();
    let response = body_request().run(&config).unwrap();

    let boundaries = response.model.boundaries(299);
    assert_eq!(boundaries.len(), 2);
    assert_eq!(boundaries[0].sample, 50);
    assert_eq!(boundaries[1].sample, 100);

    // 50 ms separation at 25 Hz: the two events barely interfere
    let trace = response.slice.column(299).unwrap();
    assert_abs_diff_eq!(trace[50], normal_incidence(&rock0(), &rock1()), epsilon = 1e-4);
    assert_abs_diff_eq!(trace[100], normal_incidence(&rock1(), &rock2()), epsilon = 1e-4);
}

#[test]
fn test_unknown_method_produces_nothing() {
    let config = ModelingConfig::default();
    let request = ModelRequest {
        method: "bogus".to_string(),
        ..body_request()
    };

    match request.run(&config) {
        Err(ModelrError::UnknownReflectivityMethod { name }) => assert_eq!(name, "bogus"),
        other => panic!("expected UnknownReflectivityMethod, got {:?}", other),
    }
}

// === Pipeline Properties ===

#[test]
fn test_spatial_slice_equals_direct_section() {
    let config = ModelingConfig::default();
    let request = ModelRequest {
        angles: AxisValues::Single(15.0),
        ..body_request()
    };
    let response = request.run(&config).unwrap();

    let wavelet = Wavelet::ricker(25.0, &config).unwrap();
    let engine =
        ConvolutionEngine::new(&response.model, &request.rocks, ReflectivityMethod::Zoeppritz)
            .unwrap();
    let section = engine.section(15.0, &wavelet);

    assert_eq!(response.slice.data(), &section);
}

#[test]
fn test_angle_gather_columns_match_sections() {
    let config = ModelingConfig::default();
    let angles = vec![0.0, 10.0, 20.0, 30.0];
    let request = ModelRequest {
        angles: AxisValues::List(angles.clone()),
        slice: SliceSelector::angle(299, 0),
        ..body_request()
    };
    let gather = request.run(&config).unwrap();

    for (i, &theta) in angles.iter().enumerate() {
        let section = ModelRequest {
            angles: AxisValues::Single(theta),
            ..body_request()
        }
        .run(&config)
        .unwrap();
        assert_eq!(gather.slice.column(i), section.slice.column(299));
    }
}

#[test]
fn test_frequency_slice_sharpens_with_frequency() {
    let config = ModelingConfig::default();
    let request = ModelRequest {
        frequencies: AxisValues::List(vec![10.0, 40.0]),
        slice: SliceSelector::frequency(0, 0),
        ..body_request()
    };
    let response = request.run(&config).unwrap();

    // Same spike, narrower main lobe at higher frequency
    let low = response.slice.column(0).unwrap();
    let high = response.slice.column(1).unwrap();
    assert_eq!(low[50], high[50]);
    assert!(high[60].abs() < low[60].abs());
}

#[test_case("zoeppritz")]
#[test_case("akirichards")]
#[test_case("shuey")]
#[test_case("shuey2")]
#[test_case("fatti")]
#[test_case("bortfeld")]
#[test_case("const")]
fn test_identical_rocks_give_silent_section(method: &str) {
    let config = ModelingConfig::default();
    let request = ModelRequest {
        rocks: vec![rock1(), rock1(), rock1()],
        method: method.to_string(),
        angles: AxisValues::List(vec![0.0, 20.0, 40.0]),
        ..body_request()
    };
    let response = request.run(&config).unwrap();
    assert!(response.slice.data().iter().all(|&v| v == 0.0));
}

#[test]
fn test_fluid_over_rock_stays_finite_post_critical() {
    let config = ModelingConfig::default();
    let request = ModelRequest {
        rocks: vec![
            RockProperties::fluid(1500.0, 1000.0).unwrap(),
            RockProperties::new(2400.0, Some(1100.0), 2350.0).unwrap(),
        ],
        geometry: Geometry::Step(StepParams {
            traces: 5,
            pad: 40.0,
            throw: 10.0,
            step_trace: Some(2),
        }),
        angles: AxisValues::Range {
            start: 0.0,
            stop: 90.0,
            step: 5.0,
        },
        slice: SliceSelector::angle(3, 0),
        ..body_request()
    };
    let response = request.run(&config).unwrap();

    assert_eq!(response.slice.data().ncols(), 18);
    assert!(response.slice.data().iter().all(|v| v.is_finite()));
}

#[test]
fn test_convolution_is_linear_in_coefficients() {
    let config = ModelingConfig::default();
    let model = ModelRequest {
        angles: AxisValues::Single(0.0),
        ..body_request()
    }
    .run(&config)
    .unwrap()
    .model;
    let rocks = [rock0(), rock1(), rock2()];
    let engine = ConvolutionEngine::new(&model, &rocks, ReflectivityMethod::AkiRichards).unwrap();
    let wavelet = Wavelet::ricker(30.0, &config).unwrap();

    let series = engine.reflectivity_series(200, 10.0).unwrap();
    let base = modelr::synth::synthesize(&series, &wavelet);
    let tripled = modelr::synth::synthesize(&series.scaled(3.0), &wavelet);
    for (t, b) in tripled.iter().zip(&base) {
        assert_abs_diff_eq!(*t, 3.0 * b, epsilon = 1e-12);
    }
}

// === Configuration and Batch ===

#[test]
fn test_coarser_sampling_shrinks_time_axis() {
    let config = ModelingConfig {
        dt: 0.002,
        ..ModelingConfig::default()
    };
    let response = body_request().run(&config).unwrap();

    assert_eq!(response.slice.data().nrows(), 75);
    assert_eq!(response.slice.dt(), 0.002);
}

#[test]
fn test_batch_runs_independent_requests() {
    let config = ModelingConfig::default();
    let wedge = ModelRequest {
        geometry: Geometry::Wedge(WedgeParams {
            traces: 40,
            pad: 30.0,
            min_thickness: 0.0,
            max_thickness: 30.0,
            flank_traces: 5,
            layers: 2,
        }),
        ..body_request()
    };
    let too_high = ModelRequest {
        frequencies: AxisValues::Single(600.0),
        ..body_request()
    };

    let results = run_batch(&[body_request(), wedge, too_high], &config);
    assert_eq!(results[0].as_ref().unwrap().slice.data().dim(), (150, 300));
    assert_eq!(results[1].as_ref().unwrap().slice.data().dim(), (90, 40));
    assert_eq!(
        results[2].as_ref().unwrap_err().error_code(),
        "INVALID_WAVELET_PARAMETER"
    );
}

#[test]
fn test_request_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wedge.toml");
    std::fs::write(
        &path,
        r#"
method = "shuey"
angles = { start = 0.0, stop = 40.0, step = 10.0 }
frequencies = [20.0, 30.0]

[[rocks]]
vp = 2000.0
vs = 1000.0
rho = 2200.0

[[rocks]]
vp = 2200.0
vs = 1100.0
rho = 2300.0

[geometry]
kind = "wedge"
traces = 25
pad = 20.0
max_thickness = 40.0
layers = 2

[slice]
axis = "angle"
trace = 24
frequency = 1
"#,
    )
    .unwrap();

    let request = ModelRequest::from_file(&path).unwrap();
    let response = request.run(&ModelingConfig::default()).unwrap();

    assert_eq!(response.method, ReflectivityMethod::Shuey);
    assert_eq!(response.slice.axis_values(), &[0.0, 10.0, 20.0, 30.0]);
    assert_eq!(response.slice.data().dim(), (80, 4));
}
