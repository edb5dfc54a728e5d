use freehand_paint::brush::{BLACK, BLUE};
use freehand_paint::{ConfigError, DrawingSurface, PointerEvent, StrokePath, SurfaceConfig};

#[test]
fn test_load_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("surface.json");
    std::fs::write(
        &path,
        r##"{
            "display_density": 2.0,
            "default_color": "blue",
            "brush_size_dp": 5,
            "background_fill": "#FF000000"
        }"##,
    )
    .unwrap();

    let config = SurfaceConfig::load(&path).unwrap();
    let mut surface = DrawingSurface::new(&config).unwrap();
    assert_eq!(surface.brush().thickness(), 10.0);
    assert_eq!(surface.brush().color(), BLUE);

    surface.on_resize(4, 4);
    assert_eq!(surface.raster().pixel(0, 0), Some(BLACK));

    surface.handle_event(PointerEvent::press(1.0, 1.0));
    surface.handle_event(PointerEvent::release(1.0, 1.0));
    assert_eq!(surface.store().committed()[0].thickness(), 10.0);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SurfaceConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read(_)));
}
