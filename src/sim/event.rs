//! Events emitted by state-machine operations.
//! The presentation layer consumes these for animation/sound/messages.

use crate::domain::entity::ItemKind;
use crate::domain::maze::Position;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    LevelStarted { level: u32, word_len: usize },
    LetterCollected { ch: char, x: usize, y: usize },
    WordCompleted,
    LevelCleared { level: u32 },
    WallDrilled { x: usize, y: usize },
    ShieldAbsorbed,
    PlayerKilled { penalty: u32 },
    EnemyKilled { by: ItemKind },
    EnemyRespawned { x: usize, y: usize },
    ShotBlocked,
    ItemBought { item: ItemKind, price: u32 },
    SetupFailed { reason: String },
}

impl GameEvent {
    pub fn letter(ch: char, pos: Position) -> Self {
        GameEvent::LetterCollected { ch, x: pos.x, y: pos.y }
    }
}
