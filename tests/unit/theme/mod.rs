use super::*;
use crate::foundation::core::{Canvas, Rgba8};

fn strip_surface(bg: Rgb8) -> Surface {
    Surface::filled(Canvas::new(720, 680).unwrap(), bg.to_rgba8())
}

fn ctx() -> DecorationContext {
    DecorationContext::on(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
}

fn count(surface: &Surface, rows: std::ops::Range<u32>, f: impl Fn(Rgba8) -> bool) -> usize {
    let mut n = 0;
    for y in rows {
        for x in 0..surface.width() {
            if surface.pixel(x, y).is_some_and(&f) {
                n += 1;
            }
        }
    }
    n
}

fn photo_area_untouched(surface: &Surface, bg: Rgb8) -> bool {
    (80..560).all(|y| (40..680).all(|x| surface.pixel(x, y) == Some(bg.to_rgba8())))
}

#[test]
fn themes_enumerate_in_stable_order() {
    let ids: Vec<_> = Theme::ALL.iter().map(|t| t.id()).collect();
    assert_eq!(ids, ["simple", "cute", "film"]);
    assert_eq!(Theme::default(), Theme::Simple);
    assert_eq!(Theme::Film.display_name(), "Film");
    assert_eq!(Theme::Cute.to_string(), "cute");
}

#[test]
fn themes_parse_by_id() {
    assert_eq!("film".parse::<Theme>().unwrap(), Theme::Film);
    assert_eq!(" Cute ".parse::<Theme>().unwrap(), Theme::Cute);
    assert!(matches!(
        "vintage".parse::<Theme>(),
        Err(BoothError::Validation(_))
    ));
}

#[test]
fn simple_draws_dark_title_in_footer_only() {
    let mut s = strip_surface(Rgb8::WHITE);
    Theme::Simple
        .decorator()
        .decorate(&mut s, Rgb8::WHITE, &ctx())
        .unwrap();
    assert!(photo_area_untouched(&s, Rgb8::WHITE));
    assert!(count(&s, 600..680, |p| p.r < 100 && p.g < 100 && p.b < 100) > 50);
    assert_eq!(count(&s, 0..80, |p| p != Rgba8::opaque(255, 255, 255)), 0);
}

#[test]
fn simple_uses_white_ink_on_black() {
    let mut s = strip_surface(Rgb8::BLACK);
    Theme::Simple
        .decorator()
        .decorate(&mut s, Rgb8::BLACK, &ctx())
        .unwrap();
    assert!(count(&s, 600..680, |p| p.r > 200 && p.g > 200 && p.b > 200) > 50);
}

#[test]
fn cute_hearts_follow_background() {
    let bg = Rgb8::new(0xdb, 0xea, 0xfe);
    let mut s = strip_surface(bg);
    Theme::Cute.decorator().decorate(&mut s, bg, &ctx()).unwrap();
    assert_eq!(s.pixel(40, 30), Some(Rgba8::opaque(0xe1, 0x1d, 0x48)));
    assert!(photo_area_untouched(&s, bg));

    let mut dark = strip_surface(Rgb8::BLACK);
    Theme::Cute
        .decorator()
        .decorate(&mut dark, Rgb8::BLACK, &ctx())
        .unwrap();
    assert_eq!(dark.pixel(40, 30), Some(Rgba8::opaque(0xfd, 0xa4, 0xaf)));
}

#[test]
fn film_perforations_flip_on_white() {
    let mut s = strip_surface(Rgb8::WHITE);
    Theme::Film
        .decorator()
        .decorate(&mut s, Rgb8::WHITE, &ctx())
        .unwrap();
    assert_eq!(s.pixel(12, 22), Some(Rgba8::opaque(0, 0, 0)));
    assert_eq!(s.pixel(700, 62), Some(Rgba8::opaque(0, 0, 0)));
    assert_eq!(s.pixel(12, 35), Some(Rgba8::opaque(255, 255, 255)));
    assert!(photo_area_untouched(&s, Rgb8::WHITE));

    let pink = Rgb8::new(0xfc, 0xe7, 0xf3);
    let mut p = strip_surface(pink);
    Theme::Film.decorator().decorate(&mut p, pink, &ctx()).unwrap();
    assert_eq!(p.pixel(12, 22), Some(Rgba8::opaque(255, 255, 255)));
}

#[test]
fn film_stamps_amber_date() {
    let mut s = strip_surface(Rgb8::BLACK);
    Theme::Film
        .decorator()
        .decorate(&mut s, Rgb8::BLACK, &ctx())
        .unwrap();
    assert!(count(&s, 620..680, |p| p.r > 150 && p.g > 100 && p.b < 80) > 20);
}

#[test]
fn only_film_has_photo_passes() {
    let r = Rect::new(40.0, 80.0, 680.0, 560.0);
    assert!(Theme::Simple.decorator().photo_passes(r).is_empty());
    assert!(Theme::Cute.decorator().photo_passes(r).is_empty());
    let passes = Theme::Film.decorator().photo_passes(r);
    assert_eq!(passes.len(), 2);
    assert_eq!(passes[0].mode, crate::render::blend::BlendMode::Color);
    assert_eq!(passes[1].mode, crate::render::blend::BlendMode::Overlay);
    assert!(passes.iter().all(|p| p.rect == r));
}

#[test]
fn decorating_is_deterministic() {
    let mut a = strip_surface(Rgb8::WHITE);
    let mut b = strip_surface(Rgb8::WHITE);
    for s in [&mut a, &mut b] {
        Theme::Cute.decorator().decorate(s, Rgb8::WHITE, &ctx()).unwrap();
    }
    assert_eq!(a, b);
}

fn local_font() -> Option<FontFace> {
    std::env::var_os("PHOTOSTRIP_TEST_FONT")
        .map(std::path::PathBuf::from)
        .into_iter()
        .chain(
            [
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/System/Library/Fonts/Supplemental/Arial.ttf",
            ]
            .iter()
            .map(std::path::PathBuf::from),
        )
        .find_map(|p| FontFace::load(p).ok())
}

#[test]
fn context_without_font_uses_stroke_font() {
    assert!(ctx().font.is_none());
    let mut a = strip_surface(Rgb8::WHITE);
    draw_text(
        &mut a,
        &ctx(),
        "PHOTO BOOTH",
        Point::new(360.0, 650.0),
        TextStyle::new(24.0).bold().centered(),
        Rgb8::BLACK,
    )
    .unwrap();
    let mut b = strip_surface(Rgb8::WHITE);
    draw_stroked(
        &mut b,
        "PHOTO BOOTH",
        Point::new(360.0, 650.0),
        TextStyle::new(24.0).bold().centered(),
        Rgb8::BLACK,
    )
    .unwrap();
    assert_eq!(a, b);
}

#[test]
fn simple_title_uses_configured_font_if_present() {
    let Some(font) = local_font() else {
        return;
    };
    let with_font = ctx().with_font(font.clone());
    assert_eq!(with_font.font.as_ref(), Some(&font));

    let mut shaped = strip_surface(Rgb8::WHITE);
    Theme::Simple
        .decorator()
        .decorate(&mut shaped, Rgb8::WHITE, &with_font)
        .unwrap();
    let mut stroked = strip_surface(Rgb8::WHITE);
    Theme::Simple
        .decorator()
        .decorate(&mut stroked, Rgb8::WHITE, &ctx())
        .unwrap();

    assert!(photo_area_untouched(&shaped, Rgb8::WHITE));
    assert!(count(&shaped, 600..680, |p| p.r < 100 && p.g < 100 && p.b < 100) > 50);
    assert_ne!(shaped, stroked);
}
