//! Brawl Simulation Demo
//!
//! Runs a scripted match between two sample characters, then replays the
//! recorded input and checks that the final state hashes agree.

use anyhow::{bail, Result};
use tracing::{debug, info};

use brawl::{
    DeterministicRng, MatchConfig, MatchState, PlayerSlot, TICK_RATE, VERSION,
    game::{
        catalog::CharacterCatalog,
        events::GameEventData,
        input::{translate_key, ControlScheme},
        tick::{replay_match, step},
    },
};

/// Seed for the sample roster
const ROSTER_SEED: u64 = 12345;

/// Give up after one minute of simulated time
const MAX_TICKS: u32 = 60 * TICK_RATE;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    info!("Brawl Sim v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let params = MatchConfig::from_env()?.validate()?;
    info!(hit_policy = ?params.hit_policy, damage = params.attack_damage, "config loaded");

    let mut catalog = CharacterCatalog::new();
    catalog.generate_sample_data(4, &mut DeterministicRng::new(ROSTER_SEED));
    for template in catalog.all() {
        info!(
            "Character #{}: {} ({}) hp={} x{:.2}",
            template.id, template.name, template.style, template.health_base, template.attack_multiplier
        );
    }

    demo_match(&catalog, &params)
}

/// Key presses (`key`, `pressed`) for a tick of the demo script.
///
/// Both fighters walk toward each other, stop in range and trade blows.
/// P2 hops now and then.
fn scripted_keys(t: u32) -> Vec<(&'static str, bool)> {
    let mut keys = Vec::new();
    match t {
        0 => keys.extend([("d", true), ("ArrowLeft", true)]),
        70 => keys.extend([("d", false), ("ArrowLeft", false)]),
        _ => {}
    }
    if t > 70 && t % 20 == 0 {
        keys.push((" ", true));
    }
    if t > 70 && t % 25 == 0 {
        keys.push(("ArrowDown", true));
    }
    if t > 70 && t % 90 == 0 {
        keys.push(("ArrowUp", true));
    }
    keys
}

fn demo_match(catalog: &CharacterCatalog, params: &brawl::SimParams) -> Result<()> {
    info!("=== Starting Demo Match ===");

    let ids: Vec<u32> = catalog.all().iter().map(|t| t.id).collect();
    let (Some(&p1), Some(&p2)) = (ids.first(), ids.get(1)) else {
        bail!("catalog needs at least two characters");
    };

    let mut state = MatchState::from_catalog(params, catalog, [p1, p2])?;
    let initial = state.clone();
    let schemes = [
        ControlScheme::default_for(PlayerSlot::P1),
        ControlScheme::default_for(PlayerSlot::P2),
    ];

    let mut total_events = 0;
    for t in 0..MAX_TICKS {
        for (key, pressed) in scripted_keys(t) {
            if let Some(event) = translate_key(&schemes, key, pressed) {
                state.push_input(event);
            }
        }

        let result = step(&mut state, params);
        total_events += result.events.len();

        for event in &result.events {
            if let GameEventData::MatchEnded { winner } = event.data {
                info!("Match ended at tick {}! Winner: {:?}", event.tick, winner);
            }
        }

        if t % 600 == 0 {
            let [a, b] = state.fighters();
            info!(
                "Tick {}: P1 {}/{} hp, P2 {}/{} hp",
                state.tick, a.health(), a.health_base(), b.health(), b.health_base()
            );
        }

        if result.match_ended {
            break;
        }
    }

    info!("=== Match Results ===");
    let hash = state.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));
    info!("Total events: {}", total_events);
    debug!(snapshot = %serde_json::to_string(&state.snapshot())?, "final frame");

    info!("=== Verifying Determinism ===");
    let (replayed, _) = replay_match(initial, state.recording(), state.tick, params);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        bail!("replay diverged at tick {}", replayed.tick);
    }
    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}
