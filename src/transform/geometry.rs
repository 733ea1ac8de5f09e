use crate::{
    foundation::core::{Affine, Canvas, Rect, Vec2},
    transform::tracker::OverlayTransform,
};

/// Largest centred crop of `source` matching the aspect of `target`.
///
/// Wider sources keep their full height and trim the sides; taller sources keep their full
/// width and trim top and bottom.
pub fn center_crop(source: Canvas, target: Canvas) -> Rect {
    let aspect = target.aspect();
    let (sw, sh) = (f64::from(source.width), f64::from(source.height));

    let mut draw_w = sw;
    let mut draw_h = sw / aspect;
    let mut x = 0.0;
    let mut y = (sh - draw_h) / 2.0;
    if draw_h > sh {
        draw_h = sh;
        draw_w = sh * aspect;
        y = 0.0;
        x = (sw - draw_w) / 2.0;
    }
    Rect::new(x, y, x + draw_w, y + draw_h)
}

/// Contain-fit an `image_w`×`image_h` bitmap inside `bounds`, centred.
pub fn contain_fit(image_w: f64, image_h: f64, bounds: Canvas) -> Rect {
    let (bw, bh) = (f64::from(bounds.width), f64::from(bounds.height));
    let image_aspect = image_w / image_h;

    let (w, h) = if image_aspect > bounds.aspect() {
        (bw, bw / image_aspect)
    } else {
        (bh * image_aspect, bh)
    };
    let x = (bw - w) / 2.0;
    let y = (bh - h) / 2.0;
    Rect::new(x, y, x + w, y + h)
}

/// Preview-to-capture conversion: pan and scale about the capture centre.
///
/// `preview_width` is the on-screen container width the transform was produced against.
pub fn overlay_space(transform: OverlayTransform, target: Canvas, preview_width: f64) -> Affine {
    let ratio = f64::from(target.width) / preview_width;
    let center = target.center().to_vec2();

    Affine::translate(center)
        * Affine::translate(Vec2::new(
            transform.translate_x * ratio,
            transform.translate_y * ratio,
        ))
        * Affine::scale(transform.scale)
        * Affine::translate(-center)
}

/// Full image-space to capture-space mapping for an overlay bitmap.
///
/// Draw the bitmap's `0..w × 0..h` rectangle through this affine.
pub fn overlay_affine(
    transform: OverlayTransform,
    target: Canvas,
    preview_width: f64,
    image: Canvas,
) -> Affine {
    let (iw, ih) = (f64::from(image.width), f64::from(image.height));
    let fit = contain_fit(iw, ih, target);
    overlay_space(transform, target, preview_width)
        * Affine::translate(Vec2::new(fit.x0, fit.y0))
        * Affine::scale_non_uniform(fit.width() / iw, fit.height() / ih)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/geometry.rs"]
mod tests;
