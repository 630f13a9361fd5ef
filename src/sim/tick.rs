//! Per-frame simulation loop
//!
//! One `tick` runs the whole frame body: trail overlay, then for each item in
//! world order draw, move, and collide. Collisions therefore see the already
//! moved positions of earlier items and the not-yet-moved positions of later
//! ones in the same tick. After the pass, a world with one kind left (or none)
//! has converged and gets a final opaque repaint.

use serde::{Deserialize, Serialize};

use super::collision::collide_and_resolve;
use super::item::{Item, ItemKind};
use super::world::{Arena, World};
use crate::config::{CollisionPolicy, ConfigError, SimConfig};

/// Where a frame gets painted
///
/// Kept as a trait so the simulation stays free of platform code.
pub trait FramePainter {
    /// Paint over the whole arena. `trail` leaves a translucent overlay
    /// instead of a fully opaque clear.
    fn clear(&mut self, arena: &Arena, trail: bool);
    /// Paint one item at its current state
    fn draw(&mut self, item: &Item);
}

/// Painter that discards everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPainter;

impl FramePainter for NullPainter {
    fn clear(&mut self, _arena: &Arena, _trail: bool) {}
    fn draw(&mut self, _item: &Item) {}
}

/// Lifecycle of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No run has been started
    Idle,
    /// Frames are being scheduled
    Running,
    /// One kind remains (or the world was empty)
    Converged,
    /// Reset while running
    Aborted,
}

/// Handle for one run, held by whoever schedules its frames.
///
/// A token from an earlier run (or one that was reset) is stale and its
/// ticks are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken {
    generation: u64,
}

/// Result reported once when a run converges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// `None` when the world was empty
    pub winner: Option<ItemKind>,
    pub collisions: u64,
    pub ticks: u64,
}

impl RunSummary {
    /// Winner name for display, empty when there is none
    pub fn winner_name(&self) -> &'static str {
        self.winner.map(|k| k.as_str()).unwrap_or("")
    }
}

/// What the scheduler should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Schedule another frame
    Continue,
    /// The run just finished; report the summary and stop scheduling
    Converged(RunSummary),
    /// The token no longer matches the active run; nothing was touched
    Stale,
}

/// Owns the world and drives runs from start to convergence
#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    phase: RunPhase,
    policy: CollisionPolicy,
    generation: u64,
}

impl Simulation {
    pub fn new(arena: Arena) -> Self {
        Self {
            world: World::empty(arena),
            phase: RunPhase::Idle,
            policy: CollisionPolicy::default(),
            generation: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Begin a new run, replacing whatever was there before.
    ///
    /// Any token handed out earlier becomes stale.
    pub fn start(
        &mut self,
        config: &SimConfig,
        arena: Arena,
        seed: u64,
    ) -> Result<RunToken, ConfigError> {
        let world = World::from_config(config, arena, seed)?;
        log::info!(
            "Run starting: {} rock / {} paper / {} scissors, size {}, arena {}x{}, seed {}",
            config.num_rock,
            config.num_paper,
            config.num_scissors,
            config.size,
            arena.width,
            arena.height,
            seed
        );
        Ok(self.start_with(world, config.collision_policy()))
    }

    /// Begin a run over an already populated world
    pub fn start_with(&mut self, world: World, policy: CollisionPolicy) -> RunToken {
        self.world = world;
        self.policy = policy;
        self.phase = RunPhase::Running;
        self.generation += 1;
        RunToken {
            generation: self.generation,
        }
    }

    /// Abort the active run and clear the world.
    ///
    /// Safe to call at any time; calling it again changes nothing.
    pub fn reset(&mut self) {
        if self.phase == RunPhase::Running {
            log::info!(
                "Run aborted after {} ticks ({} collisions)",
                self.world.ticks,
                self.world.collisions
            );
            self.phase = RunPhase::Aborted;
        }
        self.world.reset();
    }

    /// Whether `token` belongs to the run currently scheduling frames
    pub fn is_current(&self, token: RunToken) -> bool {
        self.phase == RunPhase::Running && token.generation == self.generation
    }

    /// Run one frame of the active run
    pub fn tick<P: FramePainter>(&mut self, token: RunToken, painter: &mut P) -> TickOutcome {
        if !self.is_current(token) {
            return TickOutcome::Stale;
        }

        let world = &mut self.world;
        world.ticks += 1;
        painter.clear(&world.arena, true);

        for index in 0..world.items.len() {
            painter.draw(&world.items[index]);
            world.items[index].update(&world.arena);
            world.collisions += collide_and_resolve(&mut world.items, index, self.policy);
        }

        let Some(winner) = world.converged_kind() else {
            return TickOutcome::Continue;
        };

        painter.clear(&world.arena, false);
        for item in &world.items {
            painter.draw(item);
        }

        self.phase = RunPhase::Converged;
        let summary = RunSummary {
            winner,
            collisions: world.collisions,
            ticks: world.ticks,
        };
        log::info!(
            "Run converged: winner {:?}, {} collisions in {} ticks",
            summary.winner,
            summary.collisions,
            summary.ticks
        );
        TickOutcome::Converged(summary)
    }

    /// Tick until convergence, a stale token, or `max_ticks` frames
    pub fn run_until_converged<P: FramePainter>(
        &mut self,
        token: RunToken,
        painter: &mut P,
        max_ticks: u64,
    ) -> Option<RunSummary> {
        for _ in 0..max_ticks {
            match self.tick(token, painter) {
                TickOutcome::Continue => {}
                TickOutcome::Converged(summary) => return Some(summary),
                TickOutcome::Stale => return None,
            }
        }
        log::warn!("No convergence after {} ticks", max_ticks);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use ItemKind::{Paper, Rock, Scissors};

    const ARENA: Arena = Arena {
        width: 400.0,
        height: 300.0,
    };

    /// Records painter calls as strings
    #[derive(Default)]
    struct LogPainter {
        calls: Vec<String>,
    }

    impl FramePainter for LogPainter {
        fn clear(&mut self, _arena: &Arena, trail: bool) {
            self.calls.push(if trail { "trail" } else { "clear" }.to_string());
        }

        fn draw(&mut self, item: &Item) {
            self.calls.push(item.kind.as_str().to_string());
        }
    }

    fn world_with(items: Vec<Item>) -> World {
        let mut world = World::empty(ARENA);
        world.items = items;
        world
    }

    fn still(x: f32, y: f32, kind: ItemKind) -> Item {
        Item::new(Vec2::new(x, y), Vec2::ZERO, 30.0, kind)
    }

    #[test]
    fn test_rock_and_paper_coincide() {
        let mut sim = Simulation::new(ARENA);
        let token = sim.start_with(
            world_with(vec![still(100.0, 100.0, Rock), still(100.0, 100.0, Paper)]),
            CollisionPolicy::default(),
        );

        let outcome = sim.tick(token, &mut NullPainter);
        assert_eq!(
            outcome,
            TickOutcome::Converged(RunSummary {
                winner: Some(Paper),
                collisions: 1,
                ticks: 1,
            })
        );
        assert_eq!(sim.phase(), RunPhase::Converged);
    }

    #[test]
    fn test_empty_world_converges_immediately() {
        let mut sim = Simulation::new(ARENA);
        let empty = SimConfig {
            num_rock: 0,
            num_paper: 0,
            num_scissors: 0,
            ..Default::default()
        };
        let token = sim.start(&empty, ARENA, 0).unwrap();

        match sim.tick(token, &mut NullPainter) {
            TickOutcome::Converged(summary) => {
                assert_eq!(summary.winner, None);
                assert_eq!(summary.winner_name(), "");
                assert_eq!(summary.collisions, 0);
            }
            other => panic!("expected convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_three_kinds_mutually_colliding() {
        // Rock -> paper -> scissors on the first item's pass, then the paper
        // is cut by the first item. Three registered collisions.
        let mut sim = Simulation::new(ARENA);
        let token = sim.start_with(
            world_with(vec![
                still(100.0, 100.0, Rock),
                still(105.0, 100.0, Paper),
                still(100.0, 105.0, Scissors),
            ]),
            CollisionPolicy::default(),
        );

        let outcome = sim.tick(token, &mut NullPainter);
        assert_eq!(sim.world().kinds(), vec![Scissors, Scissors, Scissors]);
        assert_eq!(
            outcome,
            TickOutcome::Converged(RunSummary {
                winner: Some(Scissors),
                collisions: 3,
                ticks: 1,
            })
        );
    }

    #[test]
    fn test_frame_paint_order() {
        let mut sim = Simulation::new(ARENA);
        let token = sim.start_with(
            world_with(vec![still(10.0, 10.0, Rock), still(200.0, 200.0, Paper)]),
            CollisionPolicy::default(),
        );

        let mut painter = LogPainter::default();
        assert_eq!(sim.tick(token, &mut painter), TickOutcome::Continue);
        assert_eq!(painter.calls, vec!["trail", "rock", "paper"]);
    }

    #[test]
    fn test_final_opaque_repaint() {
        let mut sim = Simulation::new(ARENA);
        let token = sim.start_with(
            world_with(vec![still(100.0, 100.0, Scissors), still(100.0, 100.0, Paper)]),
            CollisionPolicy::default(),
        );

        let mut painter = LogPainter::default();
        sim.tick(token, &mut painter);
        // First draw happens before the collision, the repaint after it
        assert_eq!(
            painter.calls,
            vec!["trail", "scissors", "scissors", "clear", "scissors", "scissors"]
        );
    }

    #[test]
    fn test_summary_reported_once() {
        let mut sim = Simulation::new(ARENA);
        let token = sim.start_with(world_with(vec![still(50.0, 50.0, Rock)]), CollisionPolicy::default());
        assert!(matches!(sim.tick(token, &mut NullPainter), TickOutcome::Converged(_)));
        assert_eq!(sim.tick(token, &mut NullPainter), TickOutcome::Stale);
    }

    #[test]
    fn test_reset_makes_token_stale() {
        let mut sim = Simulation::new(ARENA);
        let token = sim.start(&SimConfig::default(), ARENA, 7).unwrap();
        assert_eq!(sim.tick(token, &mut NullPainter), TickOutcome::Continue);

        sim.reset();
        assert_eq!(sim.phase(), RunPhase::Aborted);
        assert!(sim.world().items.is_empty());
        assert_eq!(sim.world().collisions, 0);

        let mut painter = LogPainter::default();
        assert_eq!(sim.tick(token, &mut painter), TickOutcome::Stale);
        assert!(painter.calls.is_empty());
        assert_eq!(sim.world().ticks, 0);
    }

    #[test]
    fn test_restart_invalidates_old_token() {
        let mut sim = Simulation::new(ARENA);
        let old = sim.start(&SimConfig::default(), ARENA, 1).unwrap();
        let new = sim.start(&SimConfig::default(), ARENA, 2).unwrap();
        assert_eq!(sim.tick(old, &mut NullPainter), TickOutcome::Stale);
        assert_ne!(sim.tick(new, &mut NullPainter), TickOutcome::Stale);
    }

    #[test]
    fn test_reset_when_idle_is_noop() {
        let mut sim = Simulation::new(ARENA);
        sim.reset();
        sim.reset();
        assert_eq!(sim.phase(), RunPhase::Idle);
        assert!(sim.world().items.is_empty());
    }

    #[test]
    fn test_invalid_config_keeps_previous_state() {
        let mut sim = Simulation::new(ARENA);
        let bad = SimConfig {
            size: 0.0,
            ..Default::default()
        };
        assert!(sim.start(&bad, ARENA, 0).is_err());
        assert_eq!(sim.phase(), RunPhase::Idle);
    }

    #[test]
    fn test_collision_counter_monotonic() {
        let mut sim = Simulation::new(Arena::new(120.0, 120.0));
        let config = SimConfig {
            num_rock: 3,
            num_paper: 3,
            num_scissors: 3,
            size: 20.0,
            ..Default::default()
        };
        let token = sim.start(&config, Arena::new(120.0, 120.0), 11).unwrap();
        let mut last = 0;
        for _ in 0..200 {
            let outcome = sim.tick(token, &mut NullPainter);
            assert!(sim.world().collisions >= last);
            last = sim.world().collisions;
            if outcome != TickOutcome::Continue {
                break;
            }
        }
    }
}
