//! Authoritative Simulation Tick
//!
//! One call per frame. Order within a tick:
//!
//! 1. Expire last tick's attacks, drain queued input into latches, jumps
//!    and attack flags
//! 2. Per fighter: latch intent → horizontal velocity → physics → state
//! 3. Attack collisions, both directions, against post-movement positions
//! 4. Damage, knockout, match end
//!
//! Step 3 never starts until both fighters have finished step 2, so neither
//! slot gets a movement-order advantage.

use tracing::{debug, info};

use crate::game::collision::check_exchange;
use crate::game::config::{HitPolicy, SimParams};
use crate::game::events::GameEvent;
use crate::game::input::{InputEvent, InputRecording};
use crate::game::physics::integrate;
use crate::game::state::{MatchPhase, MatchState, PlayerSlot};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether the match is over (ended this tick or earlier)
    pub match_ended: bool,
    /// Winner, if the match ended with one
    pub winner: Option<PlayerSlot>,
}

/// Run one simulation tick.
///
/// An ended match is left untouched; queued input stays queued.
pub fn step(state: &mut MatchState, params: &SimParams) -> TickResult {
    let mut result = TickResult::default();

    if let MatchPhase::Ended { winner } = state.phase {
        result.match_ended = true;
        result.winner = winner;
        return result;
    }

    // 0. Advance tick counter; last tick's attacks expire
    state.tick += 1;
    for fighter in state.fighters.iter_mut() {
        fighter.attacking = false;
    }

    // 1. Apply queued input
    apply_inputs(state, params);

    // 2. Move both fighters
    for slot in PlayerSlot::ALL {
        move_fighter(state, slot, params);
    }

    // 3-4. Collisions and damage
    resolve_attacks(state, params);
    check_knockout(state, &mut result);

    result.events = state.take_events();
    result
}

/// Apply drained input events in arrival order.
fn apply_inputs(state: &mut MatchState, params: &SimParams) {
    for event in state.drain_inputs() {
        let slot = event.slot();
        let idx = slot.index();
        match event {
            InputEvent::KeyDown(_, direction) => state.latches[idx].on_press(direction),
            InputEvent::KeyUp(_, direction) => state.latches[idx].on_release(direction),
            InputEvent::Jump(_) => {
                if state.fighters[idx].jump(params.jump_impulse) {
                    debug!(tick = state.tick, ?slot, "jump");
                    let event = GameEvent::jumped(state.tick, slot);
                    state.push_event(event);
                }
            }
            InputEvent::Attack(_) => state.fighters[idx].attacking = true,
        }
    }
}

/// Resolve intent, integrate physics and refresh the movement state.
fn move_fighter(state: &mut MatchState, slot: PlayerSlot, params: &SimParams) {
    let intent = state.latches[slot.index()].resolve_intent();
    let fighter = &mut state.fighters[slot.index()];

    fighter.apply_horizontal_intent(intent, params.move_speed);
    let outcome = integrate(fighter, params.floor_y, params.gravity);
    fighter.refresh_state();

    #[cfg(feature = "debug-tracing")]
    tracing::trace!(
        tick = state.tick,
        ?slot,
        position = %fighter.position,
        velocity = %fighter.velocity,
        state = ?fighter.state,
        "integrated"
    );

    if outcome.landed {
        debug!(tick = state.tick, ?slot, "landed");
        let event = GameEvent::landed(state.tick, slot);
        state.push_event(event);
    }
}

/// Test both attack directions, then apply all resulting damage.
fn resolve_attacks(state: &mut MatchState, params: &SimParams) {
    let [p1, p2] = &state.fighters;
    let exchange = check_exchange(p1, p2);

    // Damage is computed from pre-hit stats for both sides before any is
    // applied, so simultaneous trades resolve symmetrically.
    let mut hits: Vec<(PlayerSlot, u32)> = Vec::with_capacity(2);
    for (attacker, reaches) in [
        (PlayerSlot::P1, exchange.p1_reaches_p2),
        (PlayerSlot::P2, exchange.p2_reaches_p1),
    ] {
        let fighter = &state.fighters[attacker.index()];
        let armed = match params.hit_policy {
            HitPolicy::OncePerPress => fighter.attacking,
            HitPolicy::Continuous => true,
        };
        if armed && reaches {
            hits.push((attacker, fighter.hit_damage(params.attack_damage)));
        }
    }

    for (attacker, damage) in hits {
        let defender = attacker.opponent();
        let target = &mut state.fighters[defender.index()];
        let taken = target.apply_damage(damage);
        let remaining = target.health();

        debug!(tick = state.tick, ?attacker, ?defender, damage = taken, remaining, "hit");
        let event = GameEvent::hit(state.tick, attacker, defender, taken, remaining);
        state.push_event(event);
    }
}

/// End the match if anyone is out of health.
fn check_knockout(state: &mut MatchState, result: &mut TickResult) {
    let p1_out = state.fighters[PlayerSlot::P1.index()].is_knocked_out();
    let p2_out = state.fighters[PlayerSlot::P2.index()].is_knocked_out();

    let winner = match (p1_out, p2_out) {
        (false, false) => return,
        (true, true) => None,
        (true, false) => Some(PlayerSlot::P2),
        (false, true) => Some(PlayerSlot::P1),
    };

    for (slot, out) in [(PlayerSlot::P1, p1_out), (PlayerSlot::P2, p2_out)] {
        if out {
            let event = GameEvent::knocked_out(state.tick, slot);
            state.push_event(event);
        }
    }

    info!(tick = state.tick, ?winner, "knockout");
    state.phase = MatchPhase::Ended { winner };
    state.push_event(GameEvent::match_ended(state.tick, winner));

    result.match_ended = true;
    result.winner = winner;
}

/// Replay a match from recorded inputs.
///
/// `initial` must be the state the recording started from. Each recorded
/// event is queued right before the tick that originally consumed it.
pub fn replay_match(
    initial: MatchState,
    recording: &InputRecording,
    tick_count: u32,
    params: &SimParams,
) -> (MatchState, Vec<GameEvent>) {
    let mut state = initial;
    let mut all_events = Vec::new();

    for _ in 0..tick_count {
        let next_tick = state.tick + 1;
        for event in recording.events_at(next_tick) {
            state.push_input(event);
        }

        let result = step(&mut state, params);
        all_events.extend(result.events);

        if result.match_ended {
            break;
        }
    }

    (state, all_events)
}
