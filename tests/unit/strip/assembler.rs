use chrono::NaiveDate;

use super::*;
use crate::foundation::core::Canvas;

fn ctx() -> DecorationContext {
    DecorationContext::on(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
}

fn assembler() -> StripAssembler {
    StripAssembler::new(&BoothConfig::default())
        .unwrap()
        .with_decoration(ctx())
}

fn small_assembler() -> StripAssembler {
    let mut cfg = BoothConfig::default();
    cfg.capture.width = 64;
    cfg.capture.height = 48;
    StripAssembler::new(&cfg).unwrap().with_decoration(ctx())
}

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> Frame {
    let img = RgbaImage::from_pixel(w, h, image::Rgba([rgb[0], rgb[1], rgb[2], 255]));
    Frame::from_rgba(&img).unwrap()
}

#[test]
fn single_red_frame_on_white() {
    let strip = assembler()
        .assemble(Theme::Simple, Rgb8::WHITE, &[solid(640, 480, [255, 0, 0])])
        .unwrap();
    assert_eq!((strip.width(), strip.height()), (720, 680));
    let img = strip.image();
    assert_eq!(img.get_pixel(40, 80).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(679, 559).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(39, 80).0, [255, 255, 255, 255]);
    // Shadow peeks out below-right of the photo.
    assert_eq!(img.get_pixel(682, 562).0, [229, 229, 229, 255]);
    assert_eq!(strip.theme(), Theme::Simple);
    assert_eq!(strip.background(), Rgb8::WHITE);
}

#[test]
fn strip_height_follows_frame_count() {
    let a = small_assembler();
    for n in 1..=4usize {
        let frames = vec![solid(64, 48, [0, 0, 0]); n];
        let strip = a.assemble(Theme::Cute, Rgb8::WHITE, &frames).unwrap();
        assert_eq!(strip.width(), 64 + 80);
        assert_eq!(strip.height(), 80 + n as u32 * 48 + (n as u32 - 1) * 20 + 100);
    }
}

#[test]
fn frames_land_in_list_order() {
    let a = small_assembler();
    let frames = [
        solid(64, 48, [255, 0, 0]),
        solid(64, 48, [0, 255, 0]),
        solid(64, 48, [0, 0, 255]),
    ];
    let strip = a.assemble(Theme::Simple, Rgb8::WHITE, &frames).unwrap();
    let l = a.layout();
    for (i, rgb) in [[255, 0, 0], [0, 255, 0], [0, 0, 255]].iter().enumerate() {
        let p = strip.image().get_pixel(50, l.photo_y(i) + 10).0;
        assert_eq!(&p[..3], rgb);
    }
}

#[test]
fn film_output_is_repeatable() {
    let a = assembler();
    let frames = [solid(640, 480, [120, 130, 140]), solid(640, 480, [10, 200, 30])];
    let first = a.assemble(Theme::Film, Rgb8::BLACK, &frames).unwrap();
    let second = a.assemble(Theme::Film, Rgb8::BLACK, &frames).unwrap();
    assert_eq!(first.png_bytes(), second.png_bytes());
    // The tint changes the photo but stays inside it.
    let p = first.image().get_pixel(100, 200).0;
    assert_ne!(&p[..3], &[120, 130, 140]);
    assert_eq!(first.image().get_pixel(30, 200).0, [0, 0, 0, 255]);
}

#[test]
fn corrupt_frame_reports_its_index() {
    let a = small_assembler();
    let bad = Frame::from_encoded(
        vec![0u8; 16],
        Canvas {
            width: 64,
            height: 48,
        },
    );
    let frames = [solid(64, 48, [1, 2, 3]), bad, solid(64, 48, [1, 2, 3])];
    let err = a.assemble(Theme::Simple, Rgb8::WHITE, &frames).unwrap_err();
    assert!(matches!(err, BoothError::DecodeFailed { index: 1, .. }), "{err:?}");
}

#[test]
fn empty_and_mismatched_frames_are_rejected() {
    let a = small_assembler();
    assert!(matches!(
        a.assemble(Theme::Simple, Rgb8::WHITE, &[]),
        Err(BoothError::Validation(_))
    ));
    assert!(matches!(
        a.assemble(Theme::Simple, Rgb8::WHITE, &[solid(10, 10, [0, 0, 0])]),
        Err(BoothError::Validation(_))
    ));
}

#[test]
fn superseded_job_is_stale() {
    let a = small_assembler();
    let frames = [solid(64, 48, [9, 9, 9])];
    let old = a.prepare(Theme::Simple, Rgb8::WHITE, &frames).unwrap();
    let new = a.prepare(Theme::Film, Rgb8::WHITE, &frames).unwrap();
    assert!(old.is_stale());
    assert!(matches!(old.run(), Err(BoothError::AssemblyStale)));
    assert_eq!(new.run().unwrap().theme(), Theme::Film);
}

#[test]
fn invalidate_marks_prepared_job_stale() {
    let a = small_assembler();
    let job = a
        .prepare(Theme::Simple, Rgb8::WHITE, &[solid(64, 48, [0, 0, 0])])
        .unwrap();
    let shared = a.generation().clone();
    assert_eq!(shared.current(), job.generation());
    a.invalidate();
    assert!(matches!(job.run(), Err(BoothError::AssemblyStale)));
}

#[test]
fn data_uri_wraps_png() {
    let strip = small_assembler()
        .assemble(Theme::Simple, Rgb8::WHITE, &[solid(64, 48, [0, 0, 0])])
        .unwrap();
    let uri = strip.to_data_uri();
    assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
}

fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for (i, &head) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

#[test]
fn every_completion_order_finalizes_once_with_identical_output() {
    let a = small_assembler();
    let frames = [
        solid(64, 48, [255, 0, 0]),
        solid(64, 48, [0, 255, 0]),
        solid(64, 48, [0, 0, 255]),
        solid(64, 48, [200, 200, 0]),
    ];
    let (reference, fired) = a
        .prepare(Theme::Film, Rgb8::WHITE, &frames)
        .unwrap()
        .run_in_order(&[0, 1, 2, 3])
        .unwrap();
    assert_eq!(fired, 1);

    let orders = permutations(&[0, 1, 2, 3]);
    assert_eq!(orders.len(), 24);
    for order in orders {
        let (strip, fired) = a
            .prepare(Theme::Film, Rgb8::WHITE, &frames)
            .unwrap()
            .run_in_order(&order)
            .unwrap();
        assert_eq!(fired, 1, "{order:?}");
        assert_eq!(reference.png_bytes(), strip.png_bytes(), "{order:?}");
    }
}

#[test]
fn second_finalized_strip_is_an_error() {
    let a = small_assembler();
    let frames = [solid(64, 48, [9, 9, 9])];
    let strip = a.assemble(Theme::Simple, Rgb8::WHITE, &frames).unwrap();
    let job = a.prepare(Theme::Simple, Rgb8::WHITE, &frames).unwrap();
    let err = job
        .collect(vec![Ok(Some(strip.clone())), Ok(Some(strip))])
        .unwrap_err();
    assert!(matches!(err, BoothError::Render(_)), "{err:?}");
    assert!(matches!(
        job.collect(vec![Ok(None)]),
        Err(BoothError::Render(_))
    ));
}

#[test]
fn missing_font_file_fails_construction() {
    let mut cfg = BoothConfig::default();
    cfg.font = Some("/definitely/not/here.ttf".into());
    let err = StripAssembler::new(&cfg).unwrap_err();
    assert!(err.to_string().contains("read font"), "{err}");
}
