//! Autopilot: a simple bot that plays through the public `Game` API.
//!
//! Used by the headless binary and the playthrough tests.
//!
//! ## Priorities (Playing)
//!   1. Fire when the hunter is in a clear line
//!   2. Step toward the nearest uncollected letter (Manhattan), along the
//!      planner's route
//!   3. Never walk into the hunter without a sword
//!
//! In the shop it keeps one shield and one sword stocked, then advances.

use crate::domain::entity::{ItemKind, MoveDir};
use crate::domain::rules::{self, LineOfFire};
use crate::domain::{pursuit, sampler};
use super::event::GameEvent;
use super::game::{Game, Intent};
use super::shop;
use super::world::{Phase, WorldState};

/// Intents for the current state, in the order they should be sent.
pub fn decide(world: &WorldState) -> Vec<Intent> {
    match world.phase {
        Phase::LanguageSelect => vec![Intent::SelectLanguage(world.config.language)],
        Phase::LevelComplete => shopping_list(world),
        Phase::Playing => play(world).into_iter().collect(),
        Phase::Loading | Phase::Error => vec![],
    }
}

fn shopping_list(world: &WorldState) -> Vec<Intent> {
    let mut intents = vec![];
    let mut budget = world.score;
    for item in [ItemKind::Shield, ItemKind::Sword] {
        let cost = shop::price(&world.config.shop, item);
        if world.inventory.count(item) == 0 && budget >= cost {
            budget -= cost;
            intents.push(Intent::Buy(item));
        }
    }
    intents.push(Intent::AdvanceLevel);
    intents
}

fn play(world: &WorldState) -> Option<Intent> {
    let hunter = world.enemy.position();

    if let Some(h) = hunter {
        if world.inventory.pistols > 0 && rules::line_of_fire(&world.maze, world.player, h) == LineOfFire::Clear {
            return Some(Intent::Fire);
        }
    }

    let target = world.uncollected_positions().into_iter()
        .min_by_key(|&p| sampler::manhattan(p, world.player))?;
    let next = pursuit::next_step(&world.maze, world.player, target, &[]);
    if next == world.player { return None; }
    if hunter == Some(next) && world.inventory.swords == 0 { return None; }

    MoveDir::between(world.player, next).map(Intent::Move)
}

/// What a demo run achieved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DemoSummary {
    pub levels_cleared: u32,
    pub letters: u32,
    pub deaths: u32,
    pub shields_used: u32,
    pub kills: u32,
    pub purchases: u32,
    pub final_level: u32,
    pub score: u32,
    pub elapsed_ms: u64,
    pub error: Option<String>,
}

impl DemoSummary {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::LevelCleared { .. } => self.levels_cleared += 1,
                GameEvent::LetterCollected { .. } => self.letters += 1,
                GameEvent::PlayerKilled { .. } => self.deaths += 1,
                GameEvent::ShieldAbsorbed => self.shields_used += 1,
                GameEvent::EnemyKilled { .. } => self.kills += 1,
                GameEvent::ItemBought { .. } => self.purchases += 1,
                _ => {}
            }
        }
    }
}

/// Drive `game` with the autopilot until `levels` are cleared, the game
/// errors out, or `max_ms` of game time has passed. Time moves one input
/// tick per decision, never past the budget.
pub fn run(game: &mut Game, levels: u32, max_ms: u64) -> DemoSummary {
    let mut summary = DemoSummary::default();
    let tick = game.world().config.timing.input_tick_ms.max(1);
    let start = game.world().clock_ms;

    loop {
        let elapsed = game.world().clock_ms - start;
        if summary.levels_cleared >= levels || elapsed >= max_ms { break; }
        if game.phase() == Phase::Error { break; }

        for intent in decide(game.world()) {
            let events = game.handle(intent);
            summary.record(&events);
        }
        if summary.levels_cleared >= levels { break; }
        let events = game.advance(tick.min(max_ms - elapsed));
        summary.record(&events);
    }

    let w = game.world();
    summary.final_level = w.level;
    summary.score = w.score;
    summary.elapsed_ms = w.clock_ms - start;
    summary.error = w.error.clone();
    tracing::info!(?summary, "demo finished");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::entity::LetterItem;
    use crate::domain::maze::{Maze, Position, ENTRY};

    fn p(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    fn playing(rows: &[&str]) -> WorldState {
        let mut w = WorldState::new(GameConfig::default());
        w.maze = Maze::from_rows(rows);
        w.phase = Phase::Playing;
        w.player = ENTRY;
        w
    }

    #[test]
    fn picks_language_first() {
        let w = WorldState::new(GameConfig::default());
        assert_eq!(decide(&w), vec![Intent::SelectLanguage(w.config.language)]);
    }

    #[test]
    fn heads_for_nearest_letter() {
        let mut w = playing(&[
            "#####",
            "#   #",
            "# ###",
            "#   #",
            "#####",
        ]);
        w.letters = vec![LetterItem::new(0, 'A', p(3, 3)), LetterItem::new(1, 'B', p(3, 1))];
        assert_eq!(decide(&w), vec![Intent::Move(MoveDir::Right)]);
    }

    #[test]
    fn fires_on_clear_line() {
        let mut w = playing(&["#######", "#     #", "#######"]);
        w.letters = vec![LetterItem::new(0, 'A', p(2, 1))];
        w.inventory.pistols = 1;
        w.enemy.spawn(p(5, 1));
        assert_eq!(decide(&w), vec![Intent::Fire]);
    }

    #[test]
    fn waits_instead_of_walking_into_hunter() {
        let mut w = playing(&["#######", "#     #", "#######"]);
        w.letters = vec![LetterItem::new(0, 'A', p(4, 1))];
        w.enemy.spawn(p(2, 1));
        assert!(decide(&w).is_empty());
        w.inventory.swords = 1;
        assert_eq!(decide(&w), vec![Intent::Move(MoveDir::Right)]);
    }

    #[test]
    fn shops_within_budget() {
        let mut w = WorldState::new(GameConfig::default());
        w.phase = Phase::LevelComplete;
        w.score = 5;
        assert_eq!(decide(&w), vec![Intent::Buy(ItemKind::Shield), Intent::AdvanceLevel]);
        w.score = 7;
        assert_eq!(
            decide(&w),
            vec![Intent::Buy(ItemKind::Shield), Intent::Buy(ItemKind::Sword), Intent::AdvanceLevel],
        );
    }
}
