use bevy::prelude::*;
use std::time::Duration;

/// Recurring-callback seam between a spawner and whatever drives time.
///
/// The spawner asks for a schedule once and keeps the token; cancelling
/// must take effect immediately so no further tick is delivered.
pub trait SpawnScheduler {
    type Token;

    fn schedule_repeating(&mut self, interval: Duration) -> Self::Token;
    fn cancel(&mut self, token: Self::Token);
}

/// Identifies one schedule handed out by a [`SpawnTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepeatToken(u32);

/// Repeating timer driving a spawner, advanced by frame time.
#[derive(Component, Debug, Default)]
pub struct SpawnTimer {
    timer: Option<Timer>,
    generation: u32,
}

impl SpawnTimer {
    pub fn is_scheduled(&self) -> bool {
        self.timer.is_some()
    }

    /// Advance by `delta` and return how many ticks came due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        match self.timer.as_mut() {
            Some(timer) => timer.tick(delta).times_finished_this_tick(),
            None => 0,
        }
    }
}

impl SpawnScheduler for SpawnTimer {
    type Token = RepeatToken;

    fn schedule_repeating(&mut self, interval: Duration) -> RepeatToken {
        self.generation = self.generation.wrapping_add(1);
        self.timer = Some(Timer::new(interval, TimerMode::Repeating));
        RepeatToken(self.generation)
    }

    fn cancel(&mut self, token: RepeatToken) {
        // A token from an older schedule must not stop the current one.
        if token.0 == self.generation {
            self.timer = None;
        }
    }
}
