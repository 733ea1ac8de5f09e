use super::*;

#[test]
fn empty_object_yields_stock_defaults() {
    let cfg = BoothConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, BoothConfig::default());
    assert_eq!(cfg.capture.width, 640);
    assert_eq!(cfg.capture.height, 480);
    assert_eq!(cfg.capture.target_frames, 4);
    assert_eq!(cfg.capture.countdown_secs, 3);
    assert_eq!(cfg.layout.padding, 40);
    assert_eq!(cfg.layout.header_height, 80);
    assert_eq!(cfg.layout.footer_height, 100);
    assert_eq!(cfg.layout.gap, 20);
    assert_eq!(cfg.scale.min, 0.5);
    assert_eq!(cfg.scale.max, 2.0);
    assert_eq!(cfg.palette.len(), 8);
    assert_eq!(cfg.font, None);
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg =
        BoothConfig::from_json_str(r##"{"capture": {"target_frames": 2}, "palette": ["#123456"]}"##)
            .unwrap();
    assert_eq!(cfg.capture.target_frames, 2);
    assert_eq!(cfg.capture.width, 640);
    assert_eq!(cfg.palette, vec![Rgb8::new(0x12, 0x34, 0x56)]);
}

#[test]
fn invalid_values_are_rejected() {
    for bad in [
        r#"{"capture": {"target_frames": 0}}"#,
        r#"{"capture": {"target_frames": 99}}"#,
        r#"{"capture": {"width": 0}}"#,
        r#"{"capture": {"countdown_secs": 0}}"#,
        r#"{"scale": {"min": 3.0, "max": 2.0}}"#,
        r#"{"scale": {"min": 0.0}}"#,
        r#"{"layout": {"shadow_offset": 30}}"#,
        r#"{"threads": 0}"#,
        r#"{"unknown": 1}"#,
    ] {
        let err = BoothConfig::from_json_str(bad).unwrap_err();
        assert!(matches!(err, BoothError::Config(_)), "{bad}: {err}");
    }
}

#[test]
fn from_path_reports_missing_file() {
    let err = BoothConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("read config"));
}

#[test]
fn font_path_is_read_as_given() {
    let cfg = BoothConfig::from_json_str(r#"{"font": "fonts/Booth-Bold.ttf"}"#).unwrap();
    assert_eq!(
        cfg.font.as_deref(),
        Some(std::path::Path::new("fonts/Booth-Bold.ttf"))
    );
}
