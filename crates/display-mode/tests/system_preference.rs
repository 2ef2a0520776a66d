//! The OS-backed preference source driving a controller.

use std::rc::Rc;

use display_mode::{
    set_preference_detector, BaseTheme, ControllerConfig, Icon, MemoryStore, RecordingSurface,
    SystemPreference, ThemeModeController,
};
use serial_test::serial;

#[test]
#[serial]
fn test_refresh_rerenders_auto_control() {
    set_preference_detector(|| BaseTheme::Light);
    let preference = Rc::new(SystemPreference::new());
    let surface = RecordingSurface::new();
    let _controller = ThemeModeController::initialize(
        ControllerConfig::default(),
        MemoryStore::new().with("display-mode", "auto"),
        preference.clone(),
        surface.clone(),
    )
    .unwrap();
    assert_eq!(surface.view().unwrap().icon, Icon::Sun);

    set_preference_detector(|| BaseTheme::Dark);
    assert!(preference.refresh());
    assert_eq!(surface.view().unwrap().icon, Icon::Moon);

    // Reset
    set_preference_detector(|| BaseTheme::Light);
}
