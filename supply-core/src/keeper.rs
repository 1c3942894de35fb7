// Stock keeper behavior
//
// The keeper's tick loop is a value: current phase plus bookkeeping, and a
// pure step function from (state, observations) to (state, action). The
// caller performs the action in the world and feeds the result back on the
// next tick, so the whole behavior is testable with a seeded rng.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::BlockPos;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Walking,
    Working,
    Patrolling,
    Inspecting,
    IdleWander,
    IdleInspect,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperConfig {
    /// Ticks spent looking over a rack before moving on.
    pub inspect_duration_ticks: u32,
    /// One-in-N chance per working tick of drifting off to wander.
    pub idle_wander_chance: u32,
    /// Minimum ticks between idle wanders.
    pub idle_wander_cooldown_ticks: u64,
    /// Visit patrol points in random order instead of round-robin.
    pub random_patrol: bool,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            inspect_duration_ticks: 4,
            idle_wander_chance: 20,
            idle_wander_cooldown_ticks: 600,
            random_patrol: false,
        }
    }
}

/// What the keeper can observe this tick.
#[derive(Clone, Copy, Debug)]
pub struct KeeperInput<'a> {
    pub tick: u64,
    /// Whether the keeper reached its current movement target.
    pub arrived: bool,
    /// Whether restock orders are waiting to be checked on.
    pub orders_pending: bool,
    pub work_pos: BlockPos,
    pub patrol_points: &'a [BlockPos],
}

/// What the caller should do in the world this tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeeperAction {
    Wait,
    WalkTo(BlockPos),
    Inspect(BlockPos),
    Work,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeeperState {
    pub phase: Phase,
    pub patrol_index: usize,
    pub inspect_ticks_left: u32,
    pub last_idle_wander_tick: Option<u64>,
    pub target: Option<BlockPos>,
}

impl Default for KeeperState {
    fn default() -> Self {
        Self {
            phase: Phase::Walking,
            patrol_index: 0,
            inspect_ticks_left: 0,
            last_idle_wander_tick: None,
            target: None,
        }
    }
}

/// Advance the keeper by one tick.
pub fn step<R: Rng>(
    state: &KeeperState,
    input: &KeeperInput<'_>,
    config: &KeeperConfig,
    rng: &mut R,
) -> (KeeperState, KeeperAction) {
    let mut next = *state;
    let action = match state.phase {
        Phase::Walking => {
            if input.arrived {
                next.phase = Phase::Working;
                next.target = None;
                KeeperAction::Work
            } else {
                next.target = Some(input.work_pos);
                KeeperAction::WalkTo(input.work_pos)
            }
        }

        Phase::Working => {
            if input.orders_pending && !input.patrol_points.is_empty() {
                start_patrol(&mut next, input, config, rng)
            } else if idle_wander_due(state, input, config, rng) {
                next.phase = Phase::IdleWander;
                next.last_idle_wander_tick = Some(input.tick);
                let wander = wander_target(input.work_pos, rng);
                next.target = Some(wander);
                KeeperAction::WalkTo(wander)
            } else {
                KeeperAction::Work
            }
        }

        Phase::Patrolling => {
            if input.arrived {
                next.phase = Phase::Inspecting;
                next.inspect_ticks_left = config.inspect_duration_ticks;
                match state.target {
                    Some(pos) => KeeperAction::Inspect(pos),
                    None => KeeperAction::Wait,
                }
            } else {
                match state.target {
                    Some(pos) => KeeperAction::WalkTo(pos),
                    // Target lost, fall back to the work spot.
                    None => {
                        next.phase = Phase::Walking;
                        KeeperAction::WalkTo(input.work_pos)
                    }
                }
            }
        }

        Phase::Inspecting => {
            if state.inspect_ticks_left > 1 {
                next.inspect_ticks_left = state.inspect_ticks_left - 1;
                match state.target {
                    Some(pos) => KeeperAction::Inspect(pos),
                    None => KeeperAction::Wait,
                }
            } else {
                next.inspect_ticks_left = 0;
                finish_round(&mut next, input, config, rng)
            }
        }

        Phase::IdleWander => {
            if input.arrived {
                next.phase = Phase::IdleInspect;
                next.inspect_ticks_left = config.inspect_duration_ticks;
                match state.target {
                    Some(pos) => KeeperAction::Inspect(pos),
                    None => KeeperAction::Wait,
                }
            } else {
                match state.target {
                    Some(pos) => KeeperAction::WalkTo(pos),
                    None => {
                        next.phase = Phase::Walking;
                        KeeperAction::WalkTo(input.work_pos)
                    }
                }
            }
        }

        Phase::IdleInspect => {
            if state.inspect_ticks_left > 1 {
                next.inspect_ticks_left = state.inspect_ticks_left - 1;
                KeeperAction::Wait
            } else {
                next.inspect_ticks_left = 0;
                next.phase = Phase::Walking;
                next.target = Some(input.work_pos);
                KeeperAction::WalkTo(input.work_pos)
            }
        }
    };

    if next.phase != state.phase {
        tracing::trace!(target: "keeper", from = ?state.phase, to = ?next.phase, tick = input.tick, "phase change");
    }
    (next, action)
}

fn start_patrol<R: Rng>(
    next: &mut KeeperState,
    input: &KeeperInput<'_>,
    config: &KeeperConfig,
    rng: &mut R,
) -> KeeperAction {
    let index = if config.random_patrol {
        rng.random_range(0..input.patrol_points.len())
    } else {
        next.patrol_index % input.patrol_points.len()
    };
    next.patrol_index = (index + 1) % input.patrol_points.len();
    next.phase = Phase::Patrolling;
    let target = input.patrol_points[index];
    next.target = Some(target);
    KeeperAction::WalkTo(target)
}

/// After an inspection: keep patrolling while orders remain, otherwise head
/// back to work.
fn finish_round<R: Rng>(
    next: &mut KeeperState,
    input: &KeeperInput<'_>,
    config: &KeeperConfig,
    rng: &mut R,
) -> KeeperAction {
    if input.orders_pending && !input.patrol_points.is_empty() {
        start_patrol(next, input, config, rng)
    } else {
        next.phase = Phase::Walking;
        next.target = Some(input.work_pos);
        KeeperAction::WalkTo(input.work_pos)
    }
}

fn idle_wander_due<R: Rng>(
    state: &KeeperState,
    input: &KeeperInput<'_>,
    config: &KeeperConfig,
    rng: &mut R,
) -> bool {
    if config.idle_wander_chance == 0 {
        return false;
    }
    let off_cooldown = match state.last_idle_wander_tick {
        Some(last) => input.tick.saturating_sub(last) >= config.idle_wander_cooldown_ticks,
        None => true,
    };
    off_cooldown && rng.random_range(0..config.idle_wander_chance) == 0
}

fn wander_target<R: Rng>(around: BlockPos, rng: &mut R) -> BlockPos {
    BlockPos::new(
        around.x + rng.random_range(-4..=4),
        around.y,
        around.z + rng.random_range(-4..=4),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn work_pos() -> BlockPos {
        BlockPos::new(10, 64, 10)
    }

    fn input<'a>(
        tick: u64,
        arrived: bool,
        orders_pending: bool,
        patrol_points: &'a [BlockPos],
    ) -> KeeperInput<'a> {
        KeeperInput {
            tick,
            arrived,
            orders_pending,
            work_pos: work_pos(),
            patrol_points,
        }
    }

    #[test]
    fn test_walks_to_work_then_works() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = KeeperConfig {
            idle_wander_chance: 0,
            ..KeeperConfig::default()
        };
        let state = KeeperState::default();

        let (state, action) = step(&state, &input(0, false, false, &[]), &config, &mut rng);
        assert_eq!(action, KeeperAction::WalkTo(work_pos()));
        assert_eq!(state.phase, Phase::Walking);

        let (state, action) = step(&state, &input(1, true, false, &[]), &config, &mut rng);
        assert_eq!(action, KeeperAction::Work);
        assert_eq!(state.phase, Phase::Working);

        let (state, action) = step(&state, &input(2, true, false, &[]), &config, &mut rng);
        assert_eq!(action, KeeperAction::Work);
        assert_eq!(state.phase, Phase::Working);
    }

    #[test]
    fn test_orders_trigger_round_robin_patrol_and_inspection() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = KeeperConfig {
            idle_wander_chance: 0,
            inspect_duration_ticks: 2,
            ..KeeperConfig::default()
        };
        let points = [BlockPos::new(0, 64, 0), BlockPos::new(5, 64, 0)];

        let state = KeeperState {
            phase: Phase::Working,
            ..KeeperState::default()
        };
        let (state, action) = step(&state, &input(0, true, true, &points), &config, &mut rng);
        assert_eq!(state.phase, Phase::Patrolling);
        assert_eq!(action, KeeperAction::WalkTo(points[0]));

        let (state, action) = step(&state, &input(1, true, true, &points), &config, &mut rng);
        assert_eq!(state.phase, Phase::Inspecting);
        assert_eq!(action, KeeperAction::Inspect(points[0]));
        assert_eq!(state.inspect_ticks_left, 2);

        let (state, _) = step(&state, &input(2, true, true, &points), &config, &mut rng);
        assert_eq!(state.phase, Phase::Inspecting);

        // Countdown expired, next patrol point comes up.
        let (state, action) = step(&state, &input(3, true, true, &points), &config, &mut rng);
        assert_eq!(state.phase, Phase::Patrolling);
        assert_eq!(action, KeeperAction::WalkTo(points[1]));
    }

    #[test]
    fn test_returns_to_work_when_orders_clear() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = KeeperConfig {
            idle_wander_chance: 0,
            inspect_duration_ticks: 1,
            ..KeeperConfig::default()
        };
        let points = [BlockPos::new(0, 64, 0)];

        let state = KeeperState {
            phase: Phase::Inspecting,
            inspect_ticks_left: 1,
            target: Some(points[0]),
            ..KeeperState::default()
        };
        let (state, action) = step(&state, &input(5, true, false, &points), &config, &mut rng);
        assert_eq!(state.phase, Phase::Walking);
        assert_eq!(action, KeeperAction::WalkTo(work_pos()));
    }

    #[test]
    fn test_idle_wander_respects_cooldown() {
        let config = KeeperConfig {
            idle_wander_chance: 1,
            idle_wander_cooldown_ticks: 100,
            ..KeeperConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(7);

        let state = KeeperState {
            phase: Phase::Working,
            last_idle_wander_tick: Some(50),
            ..KeeperState::default()
        };

        // Within cooldown the keeper stays on the job even with a certain roll.
        let (state, action) = step(&state, &input(100, true, false, &[]), &config, &mut rng);
        assert_eq!(action, KeeperAction::Work);
        assert_eq!(state.phase, Phase::Working);

        // Past cooldown a chance of one in one always wanders.
        let (state, action) = step(&state, &input(150, true, false, &[]), &config, &mut rng);
        assert_eq!(state.phase, Phase::IdleWander);
        assert!(matches!(action, KeeperAction::WalkTo(_)));
        assert_eq!(state.last_idle_wander_tick, Some(150));
    }

    #[test]
    fn test_idle_inspect_flows_back_to_work() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = KeeperConfig {
            inspect_duration_ticks: 1,
            ..KeeperConfig::default()
        };

        let state = KeeperState {
            phase: Phase::IdleWander,
            target: Some(BlockPos::new(12, 64, 8)),
            ..KeeperState::default()
        };
        let (state, action) = step(&state, &input(0, true, false, &[]), &config, &mut rng);
        assert_eq!(state.phase, Phase::IdleInspect);
        assert_eq!(action, KeeperAction::Inspect(BlockPos::new(12, 64, 8)));

        let (state, action) = step(&state, &input(1, true, false, &[]), &config, &mut rng);
        assert_eq!(state.phase, Phase::Walking);
        assert_eq!(action, KeeperAction::WalkTo(work_pos()));
    }
}
