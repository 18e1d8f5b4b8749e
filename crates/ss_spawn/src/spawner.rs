//! Stateful spawner: repeat/limit policy and tracked-entity bookkeeping
//! around the placement sampler.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ss_core::{Anchor, SurfaceProbe};
use thiserror::Error;

use crate::config::{ConfigError, SpawnConfig, SpawnSettings};
use crate::ledger::SpawnLedger;
use crate::sampler::{try_spawn_once, EntityFactory, SpawnOutcome};
use crate::schedule::SpawnScheduler;

/// Lifecycle of a spawner.
///
/// `Inactive -> SingleShot` or `Inactive -> Repeating -> Stopped`.
/// `SingleShot` and `Stopped` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpawnerState {
    #[default]
    Inactive,
    SingleShot,
    Repeating,
    Stopped,
}

/// What activation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation<H> {
    /// Spawned (or failed to spawn) once and finished.
    SingleShot(SpawnOutcome<H>),
    /// A recurring schedule was started.
    Repeating,
}

/// What one scheduled tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome<H> {
    Spawned(H),
    /// No spot was found this time; the next tick retries.
    Failed,
    /// The limit was reached and the schedule cancelled.
    LimitReached,
    /// The spawner is not repeating; nothing happened.
    Idle,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("spawner was already activated")]
    AlreadyActivated,
}

/// Surface spawner for handles of type `H` scheduled with tokens of type `T`.
#[derive(Debug)]
pub struct Spawner<H, T> {
    config: SpawnConfig,
    ledger: SpawnLedger<H>,
    state: SpawnerState,
    schedule: Option<T>,
    rng: ChaCha8Rng,
}

impl<H: Clone + PartialEq, T> Spawner<H, T> {
    /// Create an inactive spawner whose random placement is driven by `seed`.
    pub fn new(config: SpawnConfig, seed: u64) -> Self {
        Self {
            config,
            ledger: SpawnLedger::new(),
            state: SpawnerState::Inactive,
            schedule: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> SpawnerState {
        self.state
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    pub fn settings(&self) -> &SpawnSettings {
        &self.config.settings
    }

    /// Move the anchor, e.g. to follow the owning entity.
    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.config.anchor = anchor;
    }

    pub fn ledger(&self) -> &SpawnLedger<H> {
        &self.ledger
    }

    pub fn tracked_count(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }

    /// Start the spawner.
    ///
    /// Configuration problems are logged once, returned, and leave the
    /// spawner inert.
    pub fn activate<P, F, S>(
        &mut self,
        probe: &mut P,
        factory: &mut F,
        scheduler: &mut S,
    ) -> Result<Activation<H>, SpawnerError>
    where
        P: SurfaceProbe + ?Sized,
        F: EntityFactory<Handle = H> + ?Sized,
        S: SpawnScheduler<Token = T> + ?Sized,
    {
        if self.state != SpawnerState::Inactive {
            return Err(SpawnerError::AlreadyActivated);
        }

        if let Err(err) = self.check_config(&*factory) {
            warn!("Spawner: {}. Spawning will not work.", err);
            return Err(err.into());
        }

        let settings = &self.config.settings;
        if !settings.repeat {
            self.state = SpawnerState::SingleShot;
            return Ok(Activation::SingleShot(self.spawn_and_track(probe, factory)));
        }

        info!(
            "Spawner: started repeating spawn. Interval: {}s, Max: {}",
            settings.repeat_interval, settings.max_spawn_count
        );
        self.schedule = Some(scheduler.schedule_repeating(settings.interval()));
        self.state = SpawnerState::Repeating;
        Ok(Activation::Repeating)
    }

    /// One scheduled step: purge, check the limit, then try to spawn.
    pub fn tick<P, F, S>(&mut self, probe: &mut P, factory: &mut F, scheduler: &mut S) -> TickOutcome<H>
    where
        P: SurfaceProbe + ?Sized,
        F: EntityFactory<Handle = H> + ?Sized,
        S: SpawnScheduler<Token = T> + ?Sized,
    {
        self.ledger.purge(|handle| factory.is_live(handle));

        if self.state != SpawnerState::Repeating {
            return TickOutcome::Idle;
        }

        let max = self.config.settings.max_spawn_count as usize;
        if self.ledger.len() >= max {
            self.stop(scheduler);
            info!("Spawner: max spawn count ({}) reached. Stopping timer.", max);
            return TickOutcome::LimitReached;
        }

        match self.spawn_and_track(probe, factory) {
            SpawnOutcome::Spawned(handle) => TickOutcome::Spawned(handle),
            SpawnOutcome::Failed => TickOutcome::Failed,
        }
    }

    /// Eagerly forget a destroyed entity. Returns whether it was tracked.
    pub fn on_entity_destroyed(&mut self, handle: &H) -> bool {
        self.ledger.forget(handle)
    }

    /// Tear down: cancel any schedule and never spawn again.
    pub fn deactivate<S>(&mut self, scheduler: &mut S)
    where
        S: SpawnScheduler<Token = T> + ?Sized,
    {
        self.stop(scheduler);
    }

    fn check_config<F: EntityFactory + ?Sized>(&self, factory: &F) -> Result<(), ConfigError> {
        if !factory.has_target() {
            return Err(ConfigError::MissingTarget);
        }
        self.config.settings.validate()
    }

    fn stop<S>(&mut self, scheduler: &mut S)
    where
        S: SpawnScheduler<Token = T> + ?Sized,
    {
        if let Some(token) = self.schedule.take() {
            scheduler.cancel(token);
        }
        self.state = SpawnerState::Stopped;
    }

    fn spawn_and_track<P, F>(&mut self, probe: &mut P, factory: &mut F) -> SpawnOutcome<H>
    where
        P: SurfaceProbe + ?Sized,
        F: EntityFactory<Handle = H> + ?Sized,
    {
        let outcome = try_spawn_once(&self.config, &mut self.rng, probe, factory);
        if let SpawnOutcome::Spawned(handle) = &outcome {
            self.ledger.track(handle.clone());
            info!("Spawner: spawned. Current count: {}", self.ledger.len());
        }
        outcome
    }
}
