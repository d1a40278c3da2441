use avian3d::prelude::*;
use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::input::InputSystem;
use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy::window::{Window, WindowPlugin};
use pitchside::ball::ball_interaction;
use pitchside::camera::{mouse_look, orbit_camera, release_cursor_on_start};
use pitchside::debug::DebugDumpPlugin;
use pitchside::goal::goal_overlaps;
use pitchside::input::{gather_frame_input, Bindings, FrameInput};
use pitchside::player::player_movement;
use pitchside::score::ScorePlugin;
use pitchside::settings::loader as settings_loader;
use pitchside::ui::{
    render_pickup_gizmos, setup_debug_overlay, spawn_debug_overlay, spawn_hud,
    toggle_debug_gizmos, toggle_debug_overlay, update_charge_bar, update_debug_overlay,
    update_pickup_hint,
};

mod app;
use app::{setup, sync_vsync_settings};

fn main() {
    let settings = settings_loader::load_settings_from_dir(settings_loader::SETTINGS_DIR);
    let settings_watcher = settings_loader::setup_settings_watcher(settings_loader::SETTINGS_DIR)
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "pitchside".into(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                present_mode: app::display::present_mode(settings.graphics.vsync),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(LogDiagnosticsPlugin::default())
        .add_plugins(DebugDumpPlugin)
        .add_plugins(ScorePlugin);

    app.init_resource::<FrameInput>();
    app.insert_resource(Bindings::from_settings(&settings));
    app.insert_resource(settings);
    app.insert_resource(settings_watcher);

    app.add_systems(Startup, setup_debug_overlay);
    app.add_systems(Startup, spawn_debug_overlay);
    app.add_systems(Startup, (setup, spawn_hud));
    app.add_systems(Startup, release_cursor_on_start);

    app.add_systems(PreUpdate, gather_frame_input.after(InputSystem));

    app.add_systems(Update, settings_loader::check_settings_changes);
    app.add_systems(Update, sync_vsync_settings);
    app.add_systems(Update, (mouse_look, player_movement, ball_interaction).chain());
    app.add_systems(Update, goal_overlaps);
    app.add_systems(Update, toggle_debug_overlay);
    app.add_systems(Update, toggle_debug_gizmos);
    app.add_systems(Update, update_debug_overlay);
    app.add_systems(Update, update_charge_bar.after(ball_interaction));
    app.add_systems(Update, update_pickup_hint.after(ball_interaction));
    app.add_systems(Update, render_pickup_gizmos);

    // follow the target after physics has written its final pose for the frame
    app.add_systems(
        PostUpdate,
        orbit_camera
            .after(PhysicsSet::Sync)
            .before(TransformSystem::TransformPropagate),
    );

    app.run();
}
