//! End-to-end behaviour of the theme toggle through the public API.

use std::rc::Rc;

use display_mode::{
    BaseTheme, ControllerConfig, DisplayMode, FileStore, Icon, ManualPreference, MemoryStore,
    ModeStore, RecordingSurface, ThemeModeController, UnavailableStore,
};
use proptest::prelude::*;
use tempfile::TempDir;

fn start<S: ModeStore>(store: S, prefers_dark: bool) -> (ThemeModeController<S>, RecordingSurface) {
    let surface = RecordingSurface::new();
    let controller = ThemeModeController::initialize(
        ControllerConfig::default(),
        store,
        Rc::new(ManualPreference::new(prefers_dark)),
        surface.clone(),
    )
    .unwrap();
    (controller, surface)
}

#[test]
fn test_reload_round_trip_for_every_mode() {
    for mode in DisplayMode::ALL {
        let store = MemoryStore::new();
        let (mut first, _) = start(store.clone(), false);
        first.select(mode);
        drop(first);

        let (reloaded, surface) = start(store, false);
        assert_eq!(reloaded.mode(), mode);
        assert_eq!(surface.flags().unwrap().mode(), mode);
    }
}

#[test]
fn test_reload_through_file_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("display.json");

    let (mut controller, _) = start(FileStore::new(&path), false);
    controller.cycle();
    controller.cycle();
    assert_eq!(controller.mode(), DisplayMode::DarkDim);
    drop(controller);

    let (reloaded, _) = start(FileStore::new(&path), false);
    assert_eq!(reloaded.mode(), DisplayMode::DarkDim);
}

#[test]
fn test_legacy_migration_persists_under_new_key() {
    let store = MemoryStore::new()
        .with("theme-preference", "dark")
        .with("hum:dim", "on");
    let (controller, surface) = start(store.clone(), false);

    assert_eq!(controller.mode(), DisplayMode::DarkDim);
    assert_eq!(store.peek("display-mode").as_deref(), Some("dark+dim"));
    let flags = surface.flags().unwrap();
    assert_eq!(flags.theme(), Some(BaseTheme::Dark));
    assert!(flags.dimmed());
}

#[test]
fn test_store_throwing_on_read_and_write() {
    let (mut controller, surface) = start(UnavailableStore, true);
    assert_eq!(controller.mode(), DisplayMode::Light);
    assert_eq!(surface.view().unwrap().label, "Light");

    assert_eq!(controller.cycle(), DisplayMode::Dark);
    let view = surface.view().unwrap();
    assert_eq!(view.icon, Icon::Moon);
    assert_eq!(view.label, "Dark");
    assert_eq!(view.aria_label, "Switch to Dark+Dim");
}

#[test]
fn test_auto_tracks_os_preference_until_left() {
    let preference = Rc::new(ManualPreference::new(false));
    let surface = RecordingSurface::new();
    let mut controller = ThemeModeController::initialize(
        ControllerConfig::default(),
        MemoryStore::new().with("display-mode", "dark+dim"),
        preference.clone(),
        surface.clone(),
    )
    .unwrap();

    assert_eq!(controller.cycle(), DisplayMode::Auto);
    assert_eq!(surface.view().unwrap().icon, Icon::Sun);

    preference.set(true);
    assert_eq!(surface.view().unwrap().icon, Icon::Moon);
    assert_eq!(controller.render().icon, Icon::Moon);

    assert_eq!(controller.cycle(), DisplayMode::Light);
    preference.set(false);
    preference.set(true);
    assert_eq!(surface.view().unwrap().icon, Icon::Sun);
}

#[test]
fn test_repeated_selection_is_idempotent_on_flags() {
    let (mut controller, surface) = start(MemoryStore::new(), false);
    controller.select(DisplayMode::Dark);
    let once = surface.flags().unwrap();
    controller.select(DisplayMode::Dark);
    assert_eq!(surface.flags().unwrap(), once);
    assert!(surface.recording().last_changes.is_empty());
}

proptest! {
    #[test]
    fn prop_any_cycle_sequence_keeps_flags_consistent(
        start_idx in 0usize..4,
        clicks in 0usize..24,
        prefers_dark in any::<bool>(),
    ) {
        let initial = DisplayMode::ALL[start_idx];
        let store = MemoryStore::new().with("display-mode", initial.as_str());
        let (mut controller, surface) = start(store.clone(), prefers_dark);

        for _ in 0..clicks {
            let mode = controller.cycle();
            prop_assert!(DisplayMode::ALL.contains(&mode));

            let flags = surface.flags().unwrap();
            prop_assert_eq!(flags.mode(), mode);
            prop_assert_eq!(flags.dimmed(), mode == DisplayMode::DarkDim);
            prop_assert_eq!(flags.theme(), mode.data_theme());
            prop_assert_eq!(store.peek("display-mode"), Some(mode.as_str().to_string()));
        }

        let expected = (0..clicks).fold(initial, |m, _| ControllerConfig::default().cycle.next(m));
        prop_assert_eq!(controller.mode(), expected);
    }
}
