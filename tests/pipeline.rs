mod common;

use approx::assert_abs_diff_eq;
use common::synthetic_image::{bars_frame, encode_png, floor_frame};
use floor_anchor::image::io::OwnedFrame;
use floor_anchor::{FloorDetector, FloorParams, FrameError, FrameOutcome, SkipReason};
use nalgebra::{UnitQuaternion, Vector3};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn forward() -> Vector3<f32> {
    Vector3::new(0.0, 0.0, -1.0)
}

fn detector() -> FloorDetector {
    FloorDetector::new(FloorParams::default()).unwrap()
}

#[test]
fn synthetic_floor_produces_anchor() {
    init_logging();
    let frame = OwnedFrame::from(floor_frame(640, 480));
    let mut det = detector();
    let report = det.process(frame.as_view(), &forward());

    let anchor = report.anchor().unwrap_or_else(|| {
        panic!("expected an anchor, got {:?}", report.outcome.skip_reason())
    });
    let estimate = report.trace.estimate.unwrap();
    assert!(
        (385.0..=415.0).contains(&estimate.floor_bottom_y),
        "floor row {:.2} too far from 400",
        estimate.floor_bottom_y
    );
    assert_abs_diff_eq!(anchor.x, 0.0);
    assert_abs_diff_eq!(anchor.z, -2.0);
    assert_abs_diff_eq!(anchor.y, -1.0 / 3.0, epsilon = 0.04);
    assert_eq!(det.last_anchor(), Some(anchor));

    let trace = &report.trace;
    assert!(trace.edge_pixels.unwrap_or(0) > 0);
    let counts = trace.classification.unwrap();
    assert!(counts.negative >= 1 && counts.positive >= 1);
    let selected = trace.selected.unwrap();
    assert!(selected.negative.unwrap().slope() < 0.0);
    assert!(selected.positive.unwrap().slope() > 0.0);
    for label in ["grayscale", "canny", "morphology", "hough", "classify", "project"] {
        assert!(trace.timings.stage(label).is_some(), "missing stage {label}");
    }
}

#[test]
fn encoded_and_raw_frames_agree() {
    init_logging();
    let img = floor_frame(640, 480);
    let bytes = encode_png(&img);

    let raw = detector()
        .process(OwnedFrame::from(img).as_view(), &forward())
        .anchor();
    let report = detector().process_encoded(&bytes, &forward());
    assert!(raw.is_some());
    assert_eq!(report.anchor(), raw);
    assert_eq!(report.trace.timings.stages[0].label, "decode");
}

#[test]
fn steep_only_frame_keeps_previous_state() {
    init_logging();
    let mut det = detector();
    let floor = OwnedFrame::from(floor_frame(640, 480));
    det.process(floor.as_view(), &forward());
    let before = *det.state();
    assert!(before.has_estimate());

    let bars = OwnedFrame::from(bars_frame(640, 480, 4));
    let report = det.process(bars.as_view(), &forward());
    assert!(matches!(
        report.outcome,
        FrameOutcome::Skipped(SkipReason::InsufficientEvidence { .. })
    ));
    assert!(report.trace.raw_segments > 0);
    assert_eq!(*det.state(), before);
}

#[test]
fn missing_pose_is_a_failure_not_an_update() {
    init_logging();
    let frame = OwnedFrame::from(floor_frame(640, 480));
    let mut det = detector();
    let first = det.process(frame.as_view(), &forward()).anchor();

    let report = det.process(frame.as_view(), &None::<UnitQuaternion<f32>>);
    assert!(matches!(
        report.outcome,
        FrameOutcome::Skipped(SkipReason::Failed(FrameError::MissingCameraPose))
    ));
    assert_eq!(det.last_anchor(), first);
}

#[test]
fn orientation_turns_anchor_around_viewer() {
    init_logging();
    let frame = OwnedFrame::from(floor_frame(640, 480));
    let yaw = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -std::f32::consts::FRAC_PI_2);
    let anchor = detector().process(frame.as_view(), &yaw).anchor().unwrap();
    // -90° about Y turns -Z into +X
    assert_abs_diff_eq!(anchor.x, 2.0, epsilon = 1e-5);
    assert_abs_diff_eq!(anchor.z, 0.0, epsilon = 1e-5);
}

#[test]
fn taller_frame_moves_anchor_up() {
    init_logging();
    // same scene, more rows below it: the floor sits higher in the frame
    let short = OwnedFrame::from(floor_frame(640, 480));
    let tall = OwnedFrame::from(floor_frame(640, 960));
    let a = detector().process(short.as_view(), &forward()).anchor().unwrap();
    let b = detector().process(tall.as_view(), &forward()).anchor().unwrap();
    assert!(b.y > a.y);
}
