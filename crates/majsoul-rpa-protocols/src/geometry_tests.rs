use super::*;

#[test]
fn test_reference_viewport_is_valid() {
    assert!(validate_viewport(1920, 1080));
}

#[test]
fn test_wrong_ratio_is_rejected() {
    assert!(!validate_viewport(1281, 1080));
    assert!(!validate_viewport(1920, 1200));
}

#[test]
fn test_bounds_are_inclusive() {
    assert!(validate_viewport(1280, 720));
    assert!(validate_viewport(3840, 2160));
}

#[test]
fn test_out_of_bounds_is_rejected() {
    assert!(!validate_viewport(1264, 711));
    assert!(!validate_viewport(3856, 2169));
    // 16:9 but below the minimum.
    assert!(!validate_viewport(1024, 576));
}

#[test]
fn test_zoom_ratio() {
    assert_eq!(zoom_ratio(1920), 1.0);
    assert_eq!(zoom_ratio(1280), 1280.0 / 1920.0);
    assert_eq!(zoom_ratio(3840), 2.0);
}

#[test]
fn test_viewport_config_new() {
    let viewport = ViewportConfig::new(2560, 1440).unwrap();
    assert_eq!(viewport.width(), 2560);
    assert_eq!(viewport.height(), 1440);
    assert!((viewport.zoom_ratio() - 4.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_viewport_config_rejects_bad_size() {
    let err = ViewportConfig::new(1281, 1080).unwrap_err();
    assert!(matches!(err, RpaError::InvalidParameter(_)));
    assert!(err.to_string().contains("16:9"));
}

#[test]
fn test_viewport_default() {
    let viewport = ViewportConfig::default();
    assert_eq!((viewport.width(), viewport.height()), (1920, 1080));
}

#[test]
fn test_region_inside() {
    assert!(Region::new(0, 0, 1920, 1080).is_inside_reference());
    assert!(Region::new(100, 200, 50, 60).is_inside_reference());
}

#[test]
fn test_region_degenerate() {
    assert!(!Region::new(10, 10, 0, 10).is_inside_reference());
    assert!(!Region::new(10, 10, 10, -1).is_inside_reference());
}

#[test]
fn test_region_negative_origin() {
    assert!(!Region::new(-1, 10, 10, 10).is_inside_reference());
    assert!(!Region::new(10, -1, 10, 10).is_inside_reference());
}

#[test]
fn test_region_overflow() {
    assert!(!Region::new(1900, 0, 21, 10).is_inside_reference());
    assert!(!Region::new(0, 1000, 10, 81).is_inside_reference());
    assert!(!Region::new(1920, 0, 1, 1).is_inside_reference());
}

#[test]
fn test_region_validate_error() {
    let err = Region::new(1900, 0, 100, 10).validate().unwrap_err();
    assert!(matches!(
        err,
        RpaError::InvalidRegion {
            left: 1900,
            width: 100,
            ..
        }
    ));
}

#[test]
fn test_region_center() {
    assert_eq!(Region::new(10, 20, 30, 40).center(), (25.0, 40.0));
}
