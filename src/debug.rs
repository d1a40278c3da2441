//! Debug utilities, including a system (F3 default) to dump a gameplay
//! snapshot (diagnostics, entity count, score, player, balls and camera rigs)
//! to a timestamped text file in './debug-dumps/'.
//!
//! Handy for capturing the state of a bug report without attaching a debugger.
use bevy::diagnostic::{Diagnostic, DiagnosticPath, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

use crate::ball::{Ball, BallAttachment, BallHandler};
use crate::camera::{MouseLook, OrbitCamera};
use crate::input::{just_pressed, Bindings};
use crate::player::Player;
use crate::score::ScoreBoard;
use crate::ui::hand_summary;

/// Directory dumps are written to, relative to the working directory.
pub const DUMP_DIR: &str = "debug-dumps";

pub struct DebugDumpPlugin;

impl Plugin for DebugDumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, debug_input_system);
    }
}

/// A point-in-time copy of the gameplay state.
#[derive(Debug, Clone, Default)]
pub struct GameplaySnapshot {
    pub taken_at: DateTime<Utc>,
    pub fps: f64,
    pub frame_time_ms: f64,
    pub entity_count: usize,
    pub score: u32,
    pub players: Vec<String>,
    pub balls: Vec<String>,
    pub cameras: Vec<String>,
}

impl GameplaySnapshot {
    /// File the snapshot is written to.
    #[must_use]
    pub fn file_name(&self) -> PathBuf {
        PathBuf::from(DUMP_DIR).join(format!("debug-{}.txt", self.taken_at.format("%Y%m%d-%H%M%S")))
    }

    /// Render the snapshot as plain text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        writeln!(out, "Debug dump: {}", self.taken_at.format("%Y-%m-%d %H:%M:%S")).ok();
        writeln!(out, "Timestamp (epoch secs): {}", self.taken_at.timestamp()).ok();
        writeln!(out, "FPS: {:.1}, frame_time: {:.2} ms", self.fps, self.frame_time_ms).ok();
        writeln!(out, "Entities: {}", self.entity_count).ok();
        writeln!(out, "Score: {}", self.score).ok();

        for (title, lines) in [("Players", &self.players), ("Balls", &self.balls), ("Cameras", &self.cameras)] {
            writeln!(out, "\n{title}:").ok();
            if lines.is_empty() {
                writeln!(out, "  (none)").ok();
            }
            for line in lines {
                writeln!(out, "  {line}").ok();
            }
        }
        out
    }
}

/// Everything the dump reads from the world.
#[derive(bevy::ecs::system::SystemParam)]
pub struct DumpCtx<'w, 's> {
    pub diagnostics: Res<'w, DiagnosticsStore>,
    pub score: Res<'w, ScoreBoard>,
    pub entities: Query<'w, 's, Entity>,
    pub players: Query<'w, 's, (Entity, &'static Transform, &'static Player, Option<&'static BallHandler>)>,
    pub balls: Query<'w, 's, (Entity, &'static Transform, &'static BallAttachment), With<Ball>>,
    pub orbits: Query<'w, 's, (Entity, &'static OrbitCamera)>,
    pub looks: Query<'w, 's, (Entity, &'static MouseLook)>,
}

impl DumpCtx<'_, '_> {
    fn snapshot(&self) -> GameplaySnapshot {
        let smoothed = |d: &DiagnosticPath| self.diagnostics.get(d).and_then(Diagnostic::smoothed).unwrap_or(0.0);

        let players = self
            .players
            .iter()
            .map(|(e, tf, p, handler)| {
                format!(
                    "{e:?} pos={:.2} ground={} vy={:.2} slide={:.2} | {}",
                    tf.translation,
                    p.on_ground,
                    p.vertical_velocity,
                    p.slide_velocity,
                    hand_summary(handler)
                )
            })
            .collect();

        let balls = self
            .balls
            .iter()
            .map(|(e, tf, a)| format!("{e:?} pos={:.2} scale={:.2} held={}", tf.translation, tf.scale, a.attached))
            .collect();

        let orbits = self.orbits.iter().map(|(e, orbit)| match orbit.rig() {
            Some(rig) => format!(
                "{e:?} orbit {:?} yaw={:.1} pitch={:.1} (target {:.1}/{:.1}) dist={:.2} -> {:.2}",
                rig.mode, rig.yaw, rig.pitch, rig.target_yaw, rig.target_pitch, rig.current_distance, rig.desired_distance
            ),
            None if orbit.is_disabled() => format!("{e:?} orbit disabled"),
            None => format!("{e:?} orbit pending"),
        });
        let looks = self
            .looks
            .iter()
            .map(|(e, look)| format!("{e:?} mouse-look pitch={:.1} looking={}", look.pitch, look.looking));

        GameplaySnapshot {
            taken_at: Utc::now(),
            fps: smoothed(&FrameTimeDiagnosticsPlugin::FPS),
            frame_time_ms: smoothed(&FrameTimeDiagnosticsPlugin::FRAME_TIME),
            entity_count: self.entities.iter().count(),
            score: self.score.total(),
            players,
            balls,
            cameras: orbits.chain(looks).collect(),
        }
    }
}

/// Listen for the dump key (F3 by default) and write a gameplay snapshot.
#[allow(clippy::needless_pass_by_value)]
fn debug_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<Bindings>,
    ctx: DumpCtx,
) {
    if !just_pressed(bindings.dump_debug, &keys, &mouse) {
        return;
    }

    let snapshot = ctx.snapshot();
    let fname = snapshot.file_name();

    if let Err(e) = fs::create_dir_all(DUMP_DIR) {
        error!("debug dump: failed to create dir '{DUMP_DIR}': {e}");
        return;
    }
    match fs::write(&fname, snapshot.render()) {
        Ok(()) => info!("wrote debug dump: {}", fname.display()),
        Err(e) => error!("debug dump: failed to write {}: {e}", fname.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn snapshot_renders_sections() {
        let snapshot = GameplaySnapshot {
            taken_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            score: 7,
            balls: vec!["ball a".into()],
            ..Default::default()
        };

        let text = snapshot.render();
        assert!(text.starts_with("Debug dump: 2024-05-01 12:30:00"));
        assert!(text.contains("Score: 7"));
        assert!(text.contains("Balls:\n  ball a"));
        assert!(text.contains("Players:\n  (none)"));
        assert_eq!(snapshot.file_name(), PathBuf::from("debug-dumps/debug-20240501-123000.txt"));
    }
}
