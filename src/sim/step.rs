//! Trigger handlers: everything that happens while a level is being played.
//!
//! Each handler runs for one discrete trigger (a move, an input tick, a
//! hunter tick, a shot, a respawn) and pushes what happened into `events`.
//!
//! Move resolution order:
//!   1. Bounds (rejected)
//!   2. Wall (drill or rejected)
//!   3. Hunter on the target cell (sword kill, or death + rejected)
//!   4. Letter pickup (last letter → level completion)
//!
//! Hunter tick order:
//!   1. Already on the player → death, no move
//!   2. One planned step (uncollected letters penalized)
//!   3. Landed on the player → death
//!
//! A death without a shield only raises `world.restarting`; the owner
//! rebuilds the level once the current trigger is done.

use crate::domain::entity::{ItemKind, MoveDir};
use crate::domain::maze::Position;
use crate::domain::rules::{self, LineOfFire};
use crate::domain::{pursuit, sampler};
use super::event::GameEvent;
use super::world::{Phase, WorldState};

fn playing(world: &WorldState) -> bool {
    world.phase == Phase::Playing && !world.restarting
}

// ══════════════════════════════════════════════════════════════
// Player movement
// ══════════════════════════════════════════════════════════════

/// Try to move one cell. Returns true when the player changed cell.
pub fn move_player(world: &mut WorldState, dir: MoveDir, events: &mut Vec<GameEvent>) -> bool {
    if !playing(world) { return false; }

    let (dx, dy) = dir.delta();
    let target = match world.player.offset(dx, dy) {
        Some(t) if world.maze.contains(t) => t,
        _ => return false,
    };

    let cell = world.maze.cell_at(target);
    if !cell.is_passable() {
        if !cell.is_drillable() { return false; }
        if !world.inventory.consume(ItemKind::Drill) { return false; }
        world.maze.carve(target);
        events.push(GameEvent::WallDrilled { x: target.x, y: target.y });
        tracing::debug!(x = target.x, y = target.y, drills = world.inventory.drills, "wall drilled");
    }

    if world.enemy.is_at(target) {
        if world.inventory.consume(ItemKind::Sword) {
            kill_enemy(world, ItemKind::Sword, events);
            // The kill is the whole move; a letter under the hunter stays put.
            world.player = target;
            return true;
        }
        player_hit(world, events);
        return false;
    }

    world.player = target;
    collect_letter(world, target, events);
    true
}

/// Input tick: move in the held direction, if any.
pub fn input_tick(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if !playing(world) { return; }
    if let Some(dir) = world.held.current() {
        move_player(world, dir, events);
    }
}

fn collect_letter(world: &mut WorldState, pos: Position, events: &mut Vec<GameEvent>) {
    let ch = match world.letter_at_mut(pos) {
        Some(letter) => {
            letter.collected = true;
            letter.ch
        }
        None => return,
    };
    world.score += 1;
    world.collected.push(ch);
    events.push(GameEvent::letter(ch, pos));
    tracing::debug!(%ch, remaining = world.letters_remaining(), score = world.score, "letter collected");

    if world.letters_remaining() > 0 { return; }
    events.push(GameEvent::WordCompleted);
    let delay = world.config.timing.level_complete_delay_ms;
    if delay == 0 {
        complete_level(world, events);
    } else {
        world.schedule.defer_completion(delay);
    }
}

/// Open the shop. Stops every timer of the finished attempt.
pub fn complete_level(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.phase != Phase::Playing { return; }
    world.phase = Phase::LevelComplete;
    world.schedule.reset();
    tracing::info!(level = world.level, score = world.score, "level cleared");
    events.push(GameEvent::LevelCleared { level: world.level });
}

// ══════════════════════════════════════════════════════════════
// Hunter
// ══════════════════════════════════════════════════════════════

pub fn enemy_tick(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if !playing(world) { return; }
    let Some(from) = world.enemy.position() else { return };

    if from == world.player {
        player_hit(world, events);
        return;
    }

    let penalized = world.uncollected_positions();
    let next = pursuit::next_step(&world.maze, from, world.player, &penalized);
    world.enemy.pos = Some(next);

    if next == world.player {
        player_hit(world, events);
    }
}

/// Take the hunter off the board, speed it up and queue its return.
pub fn kill_enemy(world: &mut WorldState, by: ItemKind, events: &mut Vec<GameEvent>) {
    world.enemy.kill(world.config.rules.speed_increment);
    world.rearm_enemy_timer();
    world.schedule.defer_respawn(world.config.timing.respawn_delay_ms);
    tracing::info!(?by, speed = world.enemy.speed, "hunter killed");
    events.push(GameEvent::EnemyKilled { by });
}

/// Bring the hunter back on the sampled cell farthest from the player.
/// Falls back to the far corner when no candidate is left.
pub fn respawn_enemy(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.phase != Phase::Playing || world.enemy.active { return; }

    let player = world.player;
    let mut pool = sampler::free_positions(&world.maze, world.config.rules.respawn_candidates, &mut world.rng);
    pool.retain(|&p| p != player);

    let corner = Position::new(world.maze.width().saturating_sub(2), world.maze.height().saturating_sub(2));
    let spawn = sampler::furthest(&pool, player)
        .or_else(|| (world.maze.is_path(corner) && corner != player).then_some(corner));
    let Some(spawn) = spawn else {
        tracing::warn!("no free cell for the hunter, staying off the board");
        return;
    };

    world.enemy.spawn(spawn);
    world.rearm_enemy_timer();
    tracing::info!(x = spawn.x, y = spawn.y, speed = world.enemy.speed, "hunter respawned");
    events.push(GameEvent::EnemyRespawned { x: spawn.x, y: spawn.y });
}

// ══════════════════════════════════════════════════════════════
// Pistol
// ══════════════════════════════════════════════════════════════

/// Shoot along the shared row/column. Returns true on a kill.
/// A blocked or misaligned shot keeps the pistol.
pub fn fire(world: &mut WorldState, events: &mut Vec<GameEvent>) -> bool {
    if !playing(world) { return false; }
    if world.inventory.pistols == 0 { return false; }
    let Some(target) = world.enemy.position() else { return false };

    match rules::line_of_fire(&world.maze, world.player, target) {
        LineOfFire::Clear => {
            world.inventory.consume(ItemKind::Pistol);
            kill_enemy(world, ItemKind::Pistol, events);
            true
        }
        LineOfFire::Blocked => {
            events.push(GameEvent::ShotBlocked);
            false
        }
        LineOfFire::NotAligned => false,
    }
}

// ══════════════════════════════════════════════════════════════
// Death
// ══════════════════════════════════════════════════════════════

/// The hunter reached the player. A shield soaks it up; otherwise the
/// letters of this attempt are taken off the score and the level restarts.
pub fn player_hit(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.restarting { return; }

    if world.inventory.consume(ItemKind::Shield) {
        tracing::info!(shields = world.inventory.shields, "shield absorbed a hit");
        events.push(GameEvent::ShieldAbsorbed);
        return;
    }

    let penalty = world.collected.len() as u32;
    world.score = world.score.saturating_sub(penalty);
    world.restarting = true;
    tracing::info!(level = world.level, penalty, score = world.score, "player caught");
    events.push(GameEvent::PlayerKilled { penalty });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::entity::LetterItem;
    use crate::domain::maze::{Maze, ENTRY};

    fn p(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    fn world_from(rows: &[&str]) -> WorldState {
        let mut cfg = GameConfig::default();
        cfg.seed = Some(0);
        let mut w = WorldState::new(cfg);
        w.maze = Maze::from_rows(rows);
        w.phase = Phase::Playing;
        w.player = ENTRY;
        w
    }

    fn corridor() -> WorldState {
        world_from(&[
            "#########",
            "#       #",
            "#########",
        ])
    }

    fn with_hunter(w: &mut WorldState, at: Position) {
        w.enemy.spawn(at);
        w.rearm_enemy_timer();
    }

    // ── Movement ──

    #[test]
    fn wall_blocks_without_drill() {
        let mut w = corridor();
        let mut ev = vec![];
        assert!(!move_player(&mut w, MoveDir::Up, &mut ev));
        assert_eq!(w.player, ENTRY);
        assert!(ev.is_empty());
    }

    #[test]
    fn drill_opens_wall() {
        let mut w = corridor();
        w.inventory.drills = 1;
        let mut ev = vec![];
        assert!(move_player(&mut w, MoveDir::Up, &mut ev));
        assert_eq!(w.player, p(1, 0));
        assert!(w.maze.is_path(p(1, 0)));
        assert_eq!(w.inventory.drills, 0);
        assert_eq!(ev, vec![GameEvent::WallDrilled { x: 1, y: 0 }]);
    }

    #[test]
    fn cannot_leave_the_grid() {
        let mut w = world_from(&[
            "###",
            "   ",
            "###",
        ]);
        w.player = p(0, 1);
        w.inventory.drills = 3;
        let mut ev = vec![];
        assert!(!move_player(&mut w, MoveDir::Left, &mut ev));
        assert_eq!(w.player, p(0, 1));
        assert_eq!(w.inventory.drills, 3);
    }

    #[test]
    fn moves_ignored_outside_play() {
        let mut w = corridor();
        w.phase = Phase::LevelComplete;
        assert!(!move_player(&mut w, MoveDir::Right, &mut vec![]));
        assert_eq!(w.player, ENTRY);
    }

    #[test]
    fn held_direction_moves_on_input_tick() {
        let mut w = corridor();
        w.held.press(MoveDir::Right);
        input_tick(&mut w, &mut vec![]);
        input_tick(&mut w, &mut vec![]);
        assert_eq!(w.player, p(3, 1));
        w.held.release(MoveDir::Right);
        input_tick(&mut w, &mut vec![]);
        assert_eq!(w.player, p(3, 1));
    }

    // ── Letters ──

    #[test]
    fn letters_collect_in_walk_order() {
        let mut w = corridor();
        w.letters = vec![LetterItem::new(0, 'A', p(3, 1)), LetterItem::new(1, 'B', p(2, 1))];
        let mut ev = vec![];
        move_player(&mut w, MoveDir::Right, &mut ev);
        assert_eq!(w.score, 1);
        assert_eq!(w.collected, vec!['B']);
        assert_eq!(ev, vec![GameEvent::LetterCollected { ch: 'B', x: 2, y: 1 }]);
        assert!(!w.schedule.completion_pending());

        ev.clear();
        move_player(&mut w, MoveDir::Right, &mut ev);
        assert_eq!(w.collected, vec!['B', 'A']);
        assert!(ev.contains(&GameEvent::WordCompleted));
        assert!(w.schedule.completion_pending());
        assert_eq!(w.phase, Phase::Playing);
    }

    #[test]
    fn last_letter_without_delay_opens_shop() {
        let mut w = corridor();
        w.config.timing.level_complete_delay_ms = 0;
        w.letters = vec![LetterItem::new(0, 'Z', p(2, 1))];
        w.schedule.input.arm(110);
        let mut ev = vec![];
        move_player(&mut w, MoveDir::Right, &mut ev);
        assert_eq!(w.phase, Phase::LevelComplete);
        assert!(!w.schedule.input.is_armed());
        assert_eq!(ev.last(), Some(&GameEvent::LevelCleared { level: 1 }));
    }

    #[test]
    fn collected_letter_is_not_counted_twice() {
        let mut w = corridor();
        w.letters = vec![LetterItem::new(0, 'A', p(2, 1)), LetterItem::new(1, 'B', p(5, 1))];
        move_player(&mut w, MoveDir::Right, &mut vec![]);
        move_player(&mut w, MoveDir::Left, &mut vec![]);
        move_player(&mut w, MoveDir::Right, &mut vec![]);
        assert_eq!(w.score, 1);
        assert_eq!(w.collected, vec!['A']);
    }

    // ── Contact with the hunter ──

    #[test]
    fn walking_into_hunter_without_sword_kills() {
        let mut w = corridor();
        w.score = 10;
        w.collected = vec!['A', 'B', 'C'];
        with_hunter(&mut w, p(2, 1));
        let mut ev = vec![];
        assert!(!move_player(&mut w, MoveDir::Right, &mut ev));
        assert_eq!(w.player, ENTRY);
        assert_eq!(w.score, 7);
        assert!(w.restarting);
        assert_eq!(ev, vec![GameEvent::PlayerKilled { penalty: 3 }]);
    }

    #[test]
    fn penalty_floors_at_zero() {
        let mut w = corridor();
        w.score = 1;
        w.collected = vec!['A', 'B'];
        player_hit(&mut w, &mut vec![]);
        assert_eq!(w.score, 0);
    }

    #[test]
    fn shield_absorbs_hit() {
        let mut w = corridor();
        w.score = 4;
        w.collected = vec!['A'];
        w.inventory.shields = 1;
        with_hunter(&mut w, p(2, 1));
        let mut ev = vec![];
        assert!(!move_player(&mut w, MoveDir::Right, &mut ev));
        assert_eq!(w.inventory.shields, 0);
        assert_eq!(w.score, 4);
        assert_eq!(w.player, ENTRY);
        assert!(!w.restarting);
        assert_eq!(ev, vec![GameEvent::ShieldAbsorbed]);
    }

    #[test]
    fn second_hit_during_restart_is_ignored() {
        let mut w = corridor();
        w.score = 5;
        w.collected = vec!['A'];
        let mut ev = vec![];
        player_hit(&mut w, &mut ev);
        player_hit(&mut w, &mut ev);
        assert_eq!(w.score, 4);
        assert_eq!(ev.len(), 1);
    }

    #[test]
    fn sword_kill_takes_the_cell() {
        let mut w = corridor();
        w.inventory.swords = 1;
        w.letters = vec![LetterItem::new(0, 'Q', p(2, 1)), LetterItem::new(1, 'R', p(6, 1))];
        with_hunter(&mut w, p(2, 1));
        let mut ev = vec![];
        assert!(move_player(&mut w, MoveDir::Right, &mut ev));
        assert_eq!(w.player, p(2, 1));
        assert_eq!(w.inventory.swords, 0);
        assert!(!w.enemy.active);
        assert!((w.enemy.speed - 1.1).abs() < 1e-9);
        assert!(w.schedule.respawn_pending());
        assert!(!w.schedule.enemy.is_armed());
        assert!(!w.letters[0].collected);
        assert_eq!(ev, vec![GameEvent::EnemyKilled { by: ItemKind::Sword }]);
    }

    // ── Hunter ticks ──

    #[test]
    fn hunter_closes_in_then_catches() {
        let mut w = corridor();
        with_hunter(&mut w, p(3, 1));
        let mut ev = vec![];
        enemy_tick(&mut w, &mut ev);
        assert_eq!(w.enemy.pos, Some(p(2, 1)));
        assert!(ev.is_empty());
        enemy_tick(&mut w, &mut ev);
        assert_eq!(w.enemy.pos, Some(ENTRY));
        assert!(w.restarting);
        assert_eq!(ev, vec![GameEvent::PlayerKilled { penalty: 0 }]);
    }

    #[test]
    fn hunter_on_player_strikes_without_moving() {
        let mut w = corridor();
        w.inventory.shields = 2;
        with_hunter(&mut w, ENTRY);
        let mut ev = vec![];
        enemy_tick(&mut w, &mut ev);
        assert_eq!(w.enemy.pos, Some(ENTRY));
        assert_eq!(w.inventory.shields, 1);
        assert_eq!(ev, vec![GameEvent::ShieldAbsorbed]);
    }

    #[test]
    fn hunter_steps_around_letters() {
        // Two routes from (3,1) to (1,1); the short one holds a letter.
        let mut w = world_from(&[
            "#####",
            "#   #",
            "# # #",
            "#   #",
            "#####",
        ]);
        w.letters = vec![LetterItem::new(0, 'X', p(2, 1))];
        with_hunter(&mut w, p(3, 1));
        enemy_tick(&mut w, &mut vec![]);
        assert_eq!(w.enemy.pos, Some(p(3, 2)));
    }

    #[test]
    fn inactive_hunter_does_nothing() {
        let mut w = corridor();
        let mut ev = vec![];
        enemy_tick(&mut w, &mut ev);
        assert!(ev.is_empty());
        assert_eq!(w.enemy.pos, None);
    }

    // ── Pistol ──

    #[test]
    fn clear_shot_kills() {
        let mut w = corridor();
        w.inventory.pistols = 2;
        with_hunter(&mut w, p(7, 1));
        let mut ev = vec![];
        assert!(fire(&mut w, &mut ev));
        assert_eq!(w.inventory.pistols, 1);
        assert!(!w.enemy.active);
        assert_eq!(ev, vec![GameEvent::EnemyKilled { by: ItemKind::Pistol }]);
    }

    #[test]
    fn blocked_shot_keeps_pistol() {
        let mut w = world_from(&[
            "#######",
            "#  #  #",
            "#######",
        ]);
        w.inventory.pistols = 1;
        with_hunter(&mut w, p(5, 1));
        let mut ev = vec![];
        assert!(!fire(&mut w, &mut ev));
        assert_eq!(w.inventory.pistols, 1);
        assert!(w.enemy.active);
        assert_eq!(ev, vec![GameEvent::ShotBlocked]);
    }

    #[test]
    fn no_shot_without_pistol_or_alignment() {
        let mut w = world_from(&[
            "#####",
            "#   #",
            "#   #",
            "#####",
        ]);
        with_hunter(&mut w, p(3, 1));
        assert!(!fire(&mut w, &mut vec![]));
        w.inventory.pistols = 1;
        w.enemy.pos = Some(p(3, 2));
        assert!(!fire(&mut w, &mut vec![]));
        assert_eq!(w.inventory.pistols, 1);
    }

    // ── Respawn ──

    #[test]
    fn respawn_picks_farthest_from_player() {
        let mut w = corridor();
        w.player = p(2, 1);
        w.enemy.kill(0.1);
        let mut ev = vec![];
        respawn_enemy(&mut w, &mut ev);
        assert_eq!(w.enemy.position(), Some(p(7, 1)));
        assert!(w.schedule.enemy.is_armed());
        assert_eq!(w.schedule.enemy.period_ms(), 545);
        assert_eq!(ev, vec![GameEvent::EnemyRespawned { x: 7, y: 1 }]);
    }

    #[test]
    fn respawn_never_lands_on_player() {
        let mut w = world_from(&[
            "####",
            "#  #",
            "####",
        ]);
        w.player = p(2, 1);
        respawn_enemy(&mut w, &mut vec![]);
        assert!(!w.enemy.active);
    }

    #[test]
    fn respawn_waits_for_play() {
        let mut w = corridor();
        w.phase = Phase::LevelComplete;
        respawn_enemy(&mut w, &mut vec![]);
        assert!(!w.enemy.active);
    }
}
