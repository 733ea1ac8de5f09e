use super::*;

fn capture() -> Canvas {
    Canvas::new(640, 480).unwrap()
}

fn approx_rect(a: Rect, b: Rect) {
    for (x, y) in [(a.x0, b.x0), (a.y0, b.y0), (a.x1, b.x1), (a.y1, b.y1)] {
        assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
    }
}

#[test]
fn crop_of_wide_source_trims_sides() {
    let r = center_crop(Canvas::new(1280, 720).unwrap(), capture());
    approx_rect(r, Rect::new(160.0, 0.0, 1120.0, 720.0));
}

#[test]
fn crop_of_tall_source_trims_top_and_bottom() {
    let r = center_crop(Canvas::new(480, 800).unwrap(), capture());
    approx_rect(r, Rect::new(0.0, 220.0, 480.0, 580.0));
}

#[test]
fn crop_of_exact_aspect_is_identity() {
    let r = center_crop(capture(), capture());
    approx_rect(r, Rect::new(0.0, 0.0, 640.0, 480.0));
}

#[test]
fn contain_fit_square_portrait_landscape() {
    approx_rect(
        contain_fit(100.0, 100.0, capture()),
        Rect::new(80.0, 0.0, 560.0, 480.0),
    );
    approx_rect(
        contain_fit(300.0, 600.0, capture()),
        Rect::new(200.0, 0.0, 440.0, 480.0),
    );
    approx_rect(
        contain_fit(1600.0, 400.0, capture()),
        Rect::new(0.0, 160.0, 640.0, 320.0),
    );
}

#[test]
fn identity_transform_keeps_overlay_space_identity() {
    let a = overlay_space(OverlayTransform::IDENTITY, capture(), 320.0);
    assert_eq!(a, Affine::IDENTITY);
}

#[test]
fn translation_is_scaled_by_preview_ratio() {
    let t = OverlayTransform {
        translate_x: 10.0,
        translate_y: -5.0,
        scale: 1.0,
    };
    let a = overlay_space(t, capture(), 320.0);
    let p = a * kurbo::Point::new(0.0, 0.0);
    assert!((p.x - 20.0).abs() < 1e-9);
    assert!((p.y + 10.0).abs() < 1e-9);
}

#[test]
fn scale_is_about_the_capture_center() {
    let t = OverlayTransform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 2.0,
    };
    let a = overlay_space(t, capture(), 640.0);
    let c = a * kurbo::Point::new(320.0, 240.0);
    assert!((c.x - 320.0).abs() < 1e-9 && (c.y - 240.0).abs() < 1e-9);
    let corner = a * kurbo::Point::new(0.0, 0.0);
    assert!((corner.x + 320.0).abs() < 1e-9 && (corner.y + 240.0).abs() < 1e-9);
}

#[test]
fn overlay_affine_maps_image_rect_to_fit_rect() {
    let image = Canvas::new(300, 600).unwrap();
    let a = overlay_affine(OverlayTransform::IDENTITY, capture(), 480.0, image);
    let bbox = a.transform_rect_bbox(Rect::new(0.0, 0.0, 300.0, 600.0));
    approx_rect(bbox, Rect::new(200.0, 0.0, 440.0, 480.0));
}
