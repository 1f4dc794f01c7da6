//! Game: the one object a presentation layer talks to.
//!
//! Intents go in through `handle`, wall-clock time through `advance`.
//! Both return the events produced, in order.
//!
//! ## Phase Flow
//!   LanguageSelect → Loading → Playing → LevelComplete → Loading (next level)
//!   Playing → Loading (same level) after a death without a shield
//!   Loading → Error when setup fails
//!   any → LanguageSelect on `RestartGame`

use crate::config::GameConfig;
use crate::domain::entity::{Inventory, ItemKind, MoveDir};
use super::event::GameEvent;
use super::level::init_level;
use super::schedule::Trigger;
use super::shop;
use super::step;
use super::words::{Language, WordSource};
use super::world::{Phase, WorldState};

/// Everything a player (or the autopilot) can ask for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Intent {
    /// One immediate step.
    Move(MoveDir),
    /// Start holding a direction; sampled every input tick.
    Press(MoveDir),
    Release(MoveDir),
    Fire,
    Buy(ItemKind),
    AdvanceLevel,
    RestartGame,
    SelectLanguage(Language),
}

pub struct Game {
    world: WorldState,
    source: Box<dyn WordSource>,
}

impl Game {
    pub fn new(config: GameConfig, source: Box<dyn WordSource>) -> Self {
        Game { world: WorldState::new(config), source }
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Direct access for editors and tests.
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn phase(&self) -> Phase {
        self.world.phase
    }

    // ── Intents ──

    pub fn handle(&mut self, intent: Intent) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match intent {
            Intent::Move(dir) => {
                step::move_player(&mut self.world, dir, &mut events);
            }
            Intent::Press(dir) => self.world.held.press(dir),
            Intent::Release(dir) => self.world.held.release(dir),
            Intent::Fire => {
                step::fire(&mut self.world, &mut events);
            }
            Intent::Buy(item) => events.extend(shop::buy(&mut self.world, item)),
            Intent::AdvanceLevel => self.advance_level(&mut events),
            Intent::RestartGame => self.restart_game(),
            Intent::SelectLanguage(language) => self.select_language(language, &mut events),
        }
        self.settle(&mut events);
        events
    }

    fn select_language(&mut self, language: Language, events: &mut Vec<GameEvent>) {
        if self.world.phase != Phase::LanguageSelect { return; }
        let w = &mut self.world;
        w.language = language;
        w.level = 1;
        w.score = 0;
        w.inventory = Inventory::default();
        tracing::info!(?language, "new game");
        events.extend(init_level(w, self.source.as_mut()));
    }

    fn advance_level(&mut self, events: &mut Vec<GameEvent>) {
        if self.world.phase != Phase::LevelComplete { return; }
        self.world.level += 1;
        events.extend(init_level(&mut self.world, self.source.as_mut()));
    }

    fn restart_game(&mut self) {
        let w = &mut self.world;
        w.schedule.reset();
        w.held.clear();
        w.restarting = false;
        w.error = None;
        w.phase = Phase::LanguageSelect;
        tracing::info!(score = w.score, level = w.level, "back to language select");
    }

    // ── Clock ──

    /// Let `elapsed_ms` of game time pass. Due timers fire one at a time in
    /// timestamp order, with the clock set to the instant each became due.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut left = elapsed_ms;
        loop {
            let jump = match self.world.schedule.until_next() {
                Some(due) if due <= left => due,
                _ => {
                    self.world.schedule.elapse(left);
                    self.world.clock_ms += left;
                    break;
                }
            };
            self.world.schedule.elapse(jump);
            self.world.clock_ms += jump;
            left -= jump;

            while let Some(trigger) = self.world.schedule.take_due() {
                self.run_trigger(trigger, &mut events);
            }
        }
        events
    }

    fn run_trigger(&mut self, trigger: Trigger, events: &mut Vec<GameEvent>) {
        let w = &mut self.world;
        match trigger {
            Trigger::Respawn => step::respawn_enemy(w, events),
            Trigger::CompleteLevel => step::complete_level(w, events),
            Trigger::InputTick => step::input_tick(w, events),
            Trigger::EnemyTick => step::enemy_tick(w, events),
        }
        self.settle(events);
    }

    /// A death raised `restarting`: rebuild the same level now.
    fn settle(&mut self, events: &mut Vec<GameEvent>) {
        if !self.world.restarting { return; }
        tracing::debug!(level = self.world.level, "restarting level");
        events.extend(init_level(&mut self.world, self.source.as_mut()));
    }
}
