use super::*;

#[test]
fn begin_requires_an_overlay() {
    let mut t = TransformTracker::default();
    assert!(!t.begin(10.0, 10.0, false));
    assert!(t.drag().is_none());
    t.update(50.0, 50.0);
    assert_eq!(t.transform(), OverlayTransform::IDENTITY);
}

#[test]
fn moves_resolve_against_anchor() {
    let mut t = TransformTracker::default();
    assert!(t.begin(100.0, 100.0, true));
    t.update(110.0, 90.0);
    t.update(130.0, 120.0);
    assert_eq!(
        t.transform(),
        OverlayTransform {
            translate_x: 30.0,
            translate_y: 20.0,
            scale: 1.0
        }
    );
    t.end();
    t.end();
    t.update(0.0, 0.0);
    assert_eq!(t.transform().translate_x, 30.0);
}

#[test]
fn second_drag_starts_from_previous_result() {
    let mut t = TransformTracker::default();
    t.begin(0.0, 0.0, true);
    t.update(5.0, 5.0);
    t.end();
    t.begin(50.0, 50.0, true);
    t.update(45.0, 60.0);
    assert_eq!(t.transform().translate_x, 0.0);
    assert_eq!(t.transform().translate_y, 15.0);
}

#[test]
fn scale_is_clamped_and_kept_during_drag() {
    let mut t = TransformTracker::default();
    t.set_scale(3.0);
    assert_eq!(t.transform().scale, 2.0);
    t.set_scale(-1.0);
    assert_eq!(t.transform().scale, 0.5);
    t.set_scale(f64::NAN);
    assert_eq!(t.transform().scale, 0.5);

    t.set_scale(1.5);
    t.begin(0.0, 0.0, true);
    t.update(1.0, 1.0);
    assert_eq!(t.transform().scale, 1.5);
}

#[test]
fn zoom_steps_snap_to_grid_and_clamp() {
    let mut t = TransformTracker::default();
    t.zoom_by(1.0);
    t.zoom_by(1.0);
    t.zoom_by(1.0);
    assert!((t.transform().scale - 1.3).abs() < 1e-12);
    for _ in 0..20 {
        t.zoom_by(1.0);
    }
    assert_eq!(t.transform().scale, 2.0);
    for _ in 0..40 {
        t.zoom_by(-1.0);
    }
    assert_eq!(t.transform().scale, 0.5);
}

#[test]
fn reset_returns_to_identity_and_drops_drag() {
    let mut t = TransformTracker::default();
    t.begin(0.0, 0.0, true);
    t.update(9.0, 9.0);
    t.set_scale(2.0);
    t.reset();
    assert_eq!(t.transform(), OverlayTransform::IDENTITY);
    assert!(t.drag().is_none());
}

#[test]
fn resize_rescales_translation() {
    let mut t = TransformTracker::default();
    t.resize_preview(320.0).unwrap();
    t.begin(0.0, 0.0, true);
    t.update(40.0, -20.0);
    t.end();
    t.resize_preview(640.0).unwrap();
    assert_eq!(t.transform().translate_x, 80.0);
    assert_eq!(t.transform().translate_y, -40.0);
    assert_eq!(t.preview_width(), Some(640.0));
}

#[test]
fn resize_during_drag_keeps_overlay_under_still_pointer() {
    let mut t = TransformTracker::default();
    t.resize_preview(640.0).unwrap();
    assert!(t.begin(100.0, 100.0, true));
    t.update(110.0, 100.0);
    assert_eq!(t.transform().translate_x, 10.0);

    t.resize_preview(1280.0).unwrap();
    assert_eq!(t.transform().translate_x, 20.0);

    t.update(110.0, 100.0);
    assert_eq!(t.transform().translate_x, 20.0);
    assert_eq!(t.transform().translate_y, 0.0);

    t.update(115.0, 103.0);
    assert_eq!(t.transform().translate_x, 25.0);
    assert_eq!(t.transform().translate_y, 3.0);
    assert_eq!(t.drag().unwrap().anchor_x, 100.0);
}

#[test]
fn resize_rejects_non_positive_widths() {
    let mut t = TransformTracker::default();
    assert!(matches!(
        t.resize_preview(0.0),
        Err(BoothError::Validation(_))
    ));
    assert!(t.resize_preview(f64::INFINITY).is_err());
    assert_eq!(t.preview_width(), None);
}
