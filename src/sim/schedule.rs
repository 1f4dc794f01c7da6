//! Timers for the cooperative game clock.
//!
//! Two repeating timers run while a level is being played (input sampling
//! and hunter movement) plus two one-shot deferred actions (hunter respawn
//! and the switch to the shop). Time only moves through `elapse`; the owner
//! asks `until_next` how far it may jump before something is due, then
//! drains `take_due` so triggers fire in timestamp order, one at a time.
//!
//! A level (re)start or the shop opening calls `reset`, which drops both
//! one-shots, so a respawn queued in the old maze never fires into the new one.

/// What became due.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Trigger {
    Respawn,
    CompleteLevel,
    InputTick,
    EnemyTick,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepeatTimer {
    period_ms: u64,
    elapsed_ms: u64,
    armed: bool,
}

impl RepeatTimer {
    /// (Re)start from zero with a new period.
    pub fn arm(&mut self, period_ms: u64) {
        self.period_ms = period_ms.max(1);
        self.elapsed_ms = 0;
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0;
    }

    pub fn is_armed(&self) -> bool { self.armed }
    pub fn period_ms(&self) -> u64 { self.period_ms }

    fn until_due(&self) -> Option<u64> {
        if !self.armed { return None; }
        Some(self.period_ms.saturating_sub(self.elapsed_ms))
    }

    fn elapse(&mut self, ms: u64) {
        if self.armed { self.elapsed_ms += ms; }
    }

    fn take(&mut self) -> bool {
        if !self.armed || self.elapsed_ms < self.period_ms { return false; }
        self.elapsed_ms -= self.period_ms;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OneShot {
    pub remaining_ms: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    pub input: RepeatTimer,
    pub enemy: RepeatTimer,
    respawn: Option<OneShot>,
    complete: Option<OneShot>,
}

impl Schedule {
    pub fn new() -> Self {
        Schedule::default()
    }

    /// New level attempt: drop every pending action and stop both timers.
    pub fn reset(&mut self) {
        self.respawn = None;
        self.complete = None;
        self.input.disarm();
        self.enemy.disarm();
    }

    pub fn defer_respawn(&mut self, delay_ms: u64) {
        self.respawn = Some(OneShot { remaining_ms: delay_ms });
    }

    pub fn defer_completion(&mut self, delay_ms: u64) {
        self.complete = Some(OneShot { remaining_ms: delay_ms });
    }

    pub fn respawn_pending(&self) -> bool { self.respawn.is_some() }
    pub fn completion_pending(&self) -> bool { self.complete.is_some() }

    /// Milliseconds until the earliest armed timer or pending action is due.
    pub fn until_next(&self) -> Option<u64> {
        [
            self.respawn.map(|s| s.remaining_ms),
            self.complete.map(|s| s.remaining_ms),
            self.input.until_due(),
            self.enemy.until_due(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn elapse(&mut self, ms: u64) {
        for shot in [&mut self.respawn, &mut self.complete].into_iter().flatten() {
            shot.remaining_ms = shot.remaining_ms.saturating_sub(ms);
        }
        self.input.elapse(ms);
        self.enemy.elapse(ms);
    }

    /// Pop the next due trigger. Order at the same instant: respawn,
    /// completion, input, hunter.
    pub fn take_due(&mut self) -> Option<Trigger> {
        if take_shot(&mut self.respawn) { return Some(Trigger::Respawn); }
        if take_shot(&mut self.complete) { return Some(Trigger::CompleteLevel); }
        if self.input.take() { return Some(Trigger::InputTick); }
        if self.enemy.take() { return Some(Trigger::EnemyTick); }
        None
    }
}

/// Empty the slot and report true once the shot is due.
fn take_shot(slot: &mut Option<OneShot>) -> bool {
    match *slot {
        Some(shot) if shot.remaining_ms == 0 => {
            *slot = None;
            true
        }
        _ => false,
    }
}
