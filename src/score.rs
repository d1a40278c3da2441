//! Session score.
//!
//! `ScoreBoard` is a plain resource handed to whoever scores; there is no
//! global. It is registered with `init_resource`, so an instance inserted
//! earlier wins and later registrations leave it untouched.

use bevy::prelude::*;

/// Running score for the session. Only ever grows.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    total: u32,
}

impl ScoreBoard {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Add `amount` (saturating) and return the new total.
    pub fn add(&mut self, amount: u32) -> u32 {
        self.total = self.total.saturating_add(amount);
        self.total
    }
}

/// Sent whenever the score changes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChanged {
    pub added: u32,
    pub total: u32,
}

/// Marker for the HUD text showing the score.
#[derive(Component)]
pub struct ScoreText;

#[must_use]
pub fn score_line(total: u32) -> String {
    format!("Score: {total}")
}

/// Write score changes to the score text, or to the log when there is none.
#[allow(clippy::needless_pass_by_value)]
pub fn display_score(mut changes: EventReader<ScoreChanged>, mut texts: Query<&mut Text, With<ScoreText>>) {
    for change in changes.read() {
        let line = score_line(change.total);
        match texts.get_single_mut() {
            Ok(mut text) => text.sections[0].value = line,
            Err(_) => info!("{line}"),
        }
    }
}

pub struct ScorePlugin;

impl Plugin for ScorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScoreBoard>()
            .add_event::<ScoreChanged>()
            .add_systems(Update, display_score);
    }
}
