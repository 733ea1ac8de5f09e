use super::*;
use kurbo::Shape;

#[test]
fn measure_uses_fixed_advance_without_trailing_gap() {
    let style = TextStyle::new(24.0);
    let unit = 24.0 * CAP_HEIGHT / GRID_H;
    assert!((measure("A", style) - GRID_W * unit).abs() < 1e-9);
    assert!((measure("AB", style) - (2.0 * GRID_W + SPACING) * unit).abs() < 1e-9);
    assert_eq!(measure("", style), 0.0);
}

#[test]
fn centered_text_straddles_origin() {
    let style = TextStyle::new(24.0).bold().centered();
    let path = text_path("PHOTO BOOTH", Point::new(360.0, 650.0), style);
    let bbox = path.bounding_box();
    let mid = (bbox.x0 + bbox.x1) / 2.0;
    assert!((mid - 360.0).abs() < 2.0, "{bbox:?}");
    assert!(bbox.y1 <= 650.0 + style.stroke_width());
    assert!(bbox.y0 >= 650.0 - 24.0);
}

#[test]
fn start_aligned_text_begins_at_origin() {
    let path = text_path("L", Point::new(30.0, 40.0), TextStyle::new(30.0));
    let bbox = path.bounding_box();
    assert!((bbox.x0 - 30.0).abs() < 2.0, "{bbox:?}");
}

#[test]
fn heart_is_a_filled_outline() {
    let path = text_path("♥", Point::new(30.0, 40.0), TextStyle::new(30.0));
    let bbox = path.bounding_box();
    let unit = 30.0 * CAP_HEIGHT / GRID_H;
    assert!((bbox.width() - HEART_W * unit).abs() < 1e-6, "{bbox:?}");
    assert!((bbox.y1 - 40.0).abs() < 1e-6);
}

#[test]
fn lowercase_maps_to_uppercase_and_unknown_is_blank() {
    let a = text_path("photo", Point::ZERO, TextStyle::new(20.0));
    let b = text_path("PHOTO", Point::ZERO, TextStyle::new(20.0));
    assert_eq!(a, b);
    assert!(text_path("~", Point::ZERO, TextStyle::new(20.0)).elements().is_empty());
}

#[test]
fn bold_is_heavier() {
    let regular = TextStyle::new(20.0);
    assert!(regular.bold().stroke_width() > regular.stroke_width());
}
