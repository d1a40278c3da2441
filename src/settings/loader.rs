//! Settings loading and hot-reloading.
//! This module provides utilities for loading settings from RON files and watching
//! for changes to enable hot-reloading of settings at runtime.
//!
//! Settings are loaded from RON files in the `data/settings` directory. If multiple
//! RON files are present, the first successfully parsed `Settings` will be used.
//! If no RON files are found or if no parsing succeeds, default settings will be used.
//! Loaded settings are always sanitized before use.
use crate::input::Bindings;
use crate::ron::{load_ron_file, ron_files_in, setup_ron_watcher};
use crate::settings::{Settings, SettingsError};
use bevy::log::{error, info, warn};
use bevy::prelude::{Res, ResMut, Resource};
use std::path::Path;

/// Directory the game reads settings from, relative to the working directory.
pub const SETTINGS_DIR: &str = "data/settings";

#[derive(Resource)]
pub struct SettingsWatcher(pub crate::ron::RonWatcher);

/// Read one settings file without sanitizing it.
///
/// # Errors
/// Returns [`SettingsError::Load`] when the file cannot be read or parsed.
pub fn load_settings_file(path: &Path) -> Result<Settings, SettingsError> {
    Ok(load_ron_file(path)?)
}

/// Load settings from `path` (directory). If multiple `.ron` files are present
/// the first parsed `Settings` will be used. If none exist the `Default` is used.
///
/// # Arguments
/// * `path` - The directory path where settings RON files are located (e.g., "data/settings").
///
/// # Returns
/// A sanitized `Settings` struct. Files that fail to load and any repairs made
/// by [`Settings::sanitize`] are logged.
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Settings {
    let loaded = ron_files_in(path).into_iter().find_map(|file| match load_settings_file(&file) {
        Ok(settings) => Some(settings),
        Err(e) => {
            error!("{e}");
            None
        }
    });
    let mut settings = loaded.unwrap_or_else(|| {
        info!("no settings found in {path}, using defaults");
        Settings::defaults()
    });

    for issue in settings.sanitize() {
        warn!("settings: {issue}");
    }
    settings
}

/// Create a watcher for the settings directory (hot-reload).
///
/// # Errors
/// Returns the `notify::Error` raised while creating the OS watcher.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    setup_ron_watcher(path).map(SettingsWatcher)
}

/// Check for changes and reload settings resource when files change.
///
/// # Arguments
/// * `watcher` - The `SettingsWatcher` resource that monitors changes in settings RON files.
/// * `settings` - The mutable `Settings` resource that is updated when changes are detected
/// * `bindings` - Resolved input bindings, rebuilt from the reloaded keybinds
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(
    watcher: Res<SettingsWatcher>,
    mut settings: ResMut<Settings>,
    mut bindings: ResMut<Bindings>,
) {
    if watcher.0.take_changed() {
        info!("settings changed, reloading");
        *settings = load_settings_from_dir(SETTINGS_DIR);
        *bindings = Bindings::from_settings(&settings);
    }
}

impl SettingsWatcher {
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher(crate::ron::RonWatcher::stub())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("pitchside_settings_{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn missing_directory_falls_back_to_defaults() {
        let settings = load_settings_from_dir("definitely/not/a/real/dir");
        assert_eq!(settings.ball.pickup_range, 6.0);
    }

    #[test]
    fn loaded_settings_are_sanitized() {
        let dir = scratch_dir("reversed");
        std::fs::write(
            dir.join("settings.ron"),
            "(ball: (min_throw_force: 30.0, max_throw_force: 10.0))",
        )
        .unwrap();

        let settings = load_settings_from_dir(dir.to_str().unwrap());
        assert_eq!(settings.ball.min_throw_force, 10.0);
        assert_eq!(settings.ball.max_throw_force, 30.0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn non_finite_values_fall_back_to_defaults() {
        let dir = scratch_dir("nan");
        std::fs::write(dir.join("settings.ron"), "(camera: (orbit: (min_pitch: NaN)))").unwrap();

        let settings = load_settings_from_dir(dir.to_str().unwrap());
        assert_eq!(settings.camera.orbit.min_pitch, -30.0);
        assert_eq!(settings.camera.orbit.max_pitch, 70.0);

        // clamps the pitch with the loaded bounds
        let rig = crate::camera::OrbitRig::from_rotation(bevy::math::Quat::IDENTITY, &settings.camera.orbit);
        assert!(rig.pitch.is_finite());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn broken_file_is_a_load_error_and_the_next_file_wins() {
        let dir = scratch_dir("broken");
        std::fs::write(dir.join("a.ron"), "(goal: (score_value: ").unwrap();
        std::fs::write(dir.join("b.ron"), "(goal: (score_value: 3))").unwrap();

        let err = load_settings_file(&dir.join("a.ron")).unwrap_err();
        assert!(matches!(err, SettingsError::Load(crate::ron::RonError::Parse { .. })));
        assert!(err.to_string().contains("a.ron"));
        assert!(matches!(
            load_settings_file(&dir.join("missing.ron")),
            Err(SettingsError::Load(crate::ron::RonError::Io { .. }))
        ));

        let settings = load_settings_from_dir(dir.to_str().unwrap());
        assert_eq!(settings.goal.score_value, 3);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn reload_rebuilds_cached_bindings() {
        use bevy::prelude::*;

        let watcher = SettingsWatcher::stub();
        *watcher.0.changed.lock().unwrap() = true;
        let mut stale = Settings::defaults();
        stale.controls.keybinds.insert("interact".into(), "Q".into());

        let mut app = App::new();
        app.insert_resource(Bindings::from_settings(&stale))
            .insert_resource(stale)
            .insert_resource(watcher)
            .add_systems(Update, check_settings_changes);
        assert_eq!(app.world().resource::<Bindings>().interact, crate::input::InputBinding::Key(KeyCode::KeyQ));

        app.update();
        let bindings = *app.world().resource::<Bindings>();
        assert_eq!(bindings, Bindings::from_settings(app.world().resource::<Settings>()));
        assert_eq!(bindings.interact, crate::input::InputBinding::Key(KeyCode::KeyE));
    }

    #[test]
    fn shipped_settings_parse_and_match_defaults() {
        let shipped = load_settings_file(&Path::new(SETTINGS_DIR).join("settings.ron"))
            .expect("data/settings/settings.ron parses");
        let defaults = Settings::defaults();
        assert_eq!(shipped.camera.mode, defaults.camera.mode);
        assert_eq!(shipped.camera.orbit.target_offset, defaults.camera.orbit.target_offset);
        assert_eq!(shipped.ball.hold_offset, defaults.ball.hold_offset);
        assert_eq!(shipped.movement.slide.slope_limit, defaults.movement.slide.slope_limit);
        assert_eq!(shipped.controls.keybinds, defaults.controls.keybinds);
    }
}
