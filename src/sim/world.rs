//! WorldState: the complete snapshot of a running game.
//!
//! ## Ownership
//!
//! Everything mutable lives here: maze, player, hunter, letters, inventory,
//! score, timers and the rng. Nothing else mutates it. The planner and the
//! sampler in `domain` only ever borrow `&Maze`.
//!
//! ## Lifetimes of the pieces
//!
//!   - per attempt: maze, letters, collected sequence, player, hunter,
//!     pending timers (all rebuilt by `level::init_level`)
//!   - per playthrough: score, level, inventory, language
//!     (cleared only by choosing a language)

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::GameConfig;
use crate::domain::entity::{Enemy, Inventory, LetterItem, MoveDir};
use crate::domain::maze::{Maze, Position, ENTRY};
use crate::domain::rules;
use super::schedule::Schedule;
use super::words::Language;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    LanguageSelect,
    Loading,
    Playing,
    LevelComplete, // shop is open
    Error,
}

/// Directions currently held on the input device.
/// Sampled once per input tick; priority up, down, left, right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: [bool; 4],
}

impl HeldKeys {
    fn idx(dir: MoveDir) -> usize {
        match dir {
            MoveDir::Up => 0,
            MoveDir::Down => 1,
            MoveDir::Left => 2,
            MoveDir::Right => 3,
        }
    }

    pub fn press(&mut self, dir: MoveDir) {
        self.held[Self::idx(dir)] = true;
    }

    pub fn release(&mut self, dir: MoveDir) {
        self.held[Self::idx(dir)] = false;
    }

    pub fn clear(&mut self) {
        self.held = [false; 4];
    }

    pub fn current(&self) -> Option<MoveDir> {
        MoveDir::ALL.into_iter().find(|&d| self.held[Self::idx(d)])
    }
}

pub struct WorldState {
    // ── Board ──
    pub maze: Maze,
    pub player: Position,
    pub enemy: Enemy,
    pub letters: Vec<LetterItem>,

    // ── Word ──
    pub target_word: String,
    pub hint: String,
    pub collected: Vec<char>,

    // ── Playthrough ──
    pub inventory: Inventory,
    pub score: u32,
    pub level: u32,
    pub language: Language,

    // ── Meta ──
    pub phase: Phase,
    pub error: Option<String>,
    /// A life was lost and the level is being rebuilt.
    /// Further hits are ignored until the new attempt starts.
    pub restarting: bool,
    pub clock_ms: u64,

    // ── Input / timers ──
    pub held: HeldKeys,
    pub schedule: Schedule,

    pub config: GameConfig,
    pub rng: ChaCha8Rng,
}

// ── Construction ──

impl WorldState {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        WorldState {
            maze: Maze::walled(0, 0),
            player: ENTRY,
            enemy: Enemy::new(),
            letters: vec![],
            target_word: String::new(),
            hint: String::new(),
            collected: vec![],
            inventory: Inventory::default(),
            score: 0,
            level: 1,
            language: config.language,
            phase: Phase::LanguageSelect,
            error: None,
            restarting: false,
            clock_ms: 0,
            held: HeldKeys::default(),
            schedule: Schedule::new(),
            config,
            rng,
        }
    }
}

// ── Queries ──

impl WorldState {
    /// Positions of letters still on the board.
    pub fn uncollected_positions(&self) -> Vec<Position> {
        self.letters.iter().filter(|l| !l.collected).map(|l| l.pos).collect()
    }

    pub fn letters_remaining(&self) -> usize {
        self.letters.iter().filter(|l| !l.collected).count()
    }

    /// Uncollected letter lying on `pos`.
    pub fn letter_at_mut(&mut self, pos: Position) -> Option<&mut LetterItem> {
        self.letters.iter_mut().find(|l| !l.collected && l.pos == pos)
    }

    /// Current hunter step interval in ms.
    pub fn enemy_interval_ms(&self) -> u64 {
        rules::enemy_interval_ms(
            self.enemy.speed,
            self.config.timing.enemy_base_interval_ms,
            self.config.timing.enemy_min_interval_ms,
        )
    }

    /// Restart the hunter timer from zero at the current speed,
    /// or stop it while the hunter is off the board.
    pub fn rearm_enemy_timer(&mut self) {
        if self.enemy.active {
            let period = self.enemy_interval_ms();
            self.schedule.enemy.arm(period);
        } else {
            self.schedule.enemy.disarm();
        }
    }
}
