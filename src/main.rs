//! Oche Demo
//!
//! Plays a short scripted game of each mode and logs what the engines
//! decide at every turn.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use oche::{
    game::{
        clock::{progress, ClockConfig, ClockState},
        halve_it::standings,
        killer::{KillerConfig, KillerState},
    },
    ClassicCard, Dart, PlayerId, YahtzeeCard, BULL, VERSION,
};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Oche v{}", VERSION);

    demo_halve_it()?;
    demo_killer()?;
    demo_clock()?;
    Ok(())
}

fn triple(number: u8) -> Result<Dart> {
    Ok(Dart::triple(number)?)
}

/// Classic and Yahtzee Halve-It, two contracts each.
fn demo_halve_it() -> Result<()> {
    info!("=== Halve-It (Classic) ===");

    let turns = [
        [Dart::single(20), triple(20)?, Dart::single(5)],
        [Dart::single(20), Dart::double(20), Dart::single(1)],
        [Dart::single(3), Dart::single(17), Dart::miss()],
    ];

    let mut ann = ClassicCard::default();
    let mut bob = ClassicCard::default();
    for darts in &turns {
        for (name, card) in [("ann", &mut ann), ("bob", &mut bob)] {
            if let Some(turn) = card.play_turn(darts) {
                info!(
                    "{} plays {}: met={} score={} capital {} -> {}",
                    name, turn.contract, turn.met, turn.score, turn.capital_before, turn.capital_after
                );
            }
        }
    }
    // bob enters his next contract by hand
    bob.play_manual(38)?;

    let table = standings(&[
        (PlayerId::from("ann"), ann.capital()),
        (PlayerId::from("bob"), bob.capital()),
    ]);
    for row in &table {
        info!("#{}: {} - capital {}", row.rank, row.player, row.score);
    }

    info!("=== Halve-It (Yahtzee) ===");
    let mut card = YahtzeeCard::new();
    let darts = [Dart::single(20), Dart::single(20), Dart::single(17)];
    let options = card.available(&darts);
    info!("Valid contracts: {:?}", options.iter().map(|c| c.id()).collect::<Vec<_>>());
    if let Some(best) = options.last() {
        let score = card.claim(&darts, *best)?;
        info!("Claimed {} for {}", best, score);
    }
    info!("Yahtzee total: {}", card.total());
    Ok(())
}

/// Three-player Killer until one player is left.
fn demo_killer() -> Result<()> {
    info!("=== Killer ===");

    let ann = PlayerId::from("ann");
    let bob = PlayerId::from("bob");
    let cat = PlayerId::from("cat");
    let mut state = KillerState::new(
        [(ann.clone(), 20), (bob.clone(), 1), (cat.clone(), 3)],
        KillerConfig::default(),
    )?;

    let script = [
        (&ann, vec![triple(20)?, triple(20)?, Dart::single(1)]),
        (&bob, vec![Dart::single(1), Dart::double(18), Dart::miss()]),
        (&cat, vec![Dart::single(3), Dart::single(BULL), Dart::single(19)]),
        (&ann, vec![triple(1)?, triple(3)?, Dart::double(3)]),
        (&bob, vec![Dart::single(18), Dart::single(20), Dart::single(1)]),
        (&ann, vec![triple(1)?, triple(1)?, Dart::miss()]),
    ];

    for (thrower, darts) in &script {
        if state.player(thrower).is_some_and(|p| p.eliminated) {
            continue;
        }
        let (next, turn) = state.take_turn(thrower, darts);
        for event in &turn.events {
            info!("  {} {:+} ({:?})", event.player, event.delta, event.reason);
        }
        for out in &turn.newly_eliminated {
            info!("{} is eliminated", out);
        }
        state = next;
        if turn.game_over {
            match &turn.winner {
                Some(winner) => info!("Killer winner: {}", winner),
                None => info!("Killer ended with nobody standing"),
            }
            break;
        }
    }

    info!("Final snapshot: {}", serde_json::to_string(state.players())?);
    Ok(())
}

/// Two-player Clock with a short turn limit.
fn demo_clock() -> Result<()> {
    info!("=== Around the Clock ===");

    let mut state = ClockState::new(
        [PlayerId::from("ann"), PlayerId::from("bob")],
        ClockConfig { max_turns: 4 },
    )?;

    let script = [
        vec![Dart::single(1), Dart::double(2), Dart::miss()],
        vec![Dart::single(1), Dart::single(2), Dart::single(3)],
        vec![Dart::single(4)],
        vec![triple(4)?, Dart::miss(), Dart::single(7)],
        vec![Dart::single(5), Dart::miss(), Dart::miss()],
        vec![Dart::miss(), Dart::miss(), Dart::miss()],
        vec![Dart::single(6), triple(7)?, Dart::single(BULL)],
        vec![Dart::single(8), Dart::single(9), Dart::miss()],
        vec![Dart::single(11), Dart::miss(), Dart::miss()],
    ];

    for darts in &script {
        if state.is_over() {
            break;
        }
        let thrower = state.current_player().id.clone();
        let (next, turn) = state.take_turn(darts)?;
        info!(
            "{} -> position {} ({:.0}%){}",
            thrower,
            turn.end_position,
            progress(turn.end_position, turn.finished),
            if turn.extra_turn { ", throws again" } else { "" }
        );
        state = next;
    }

    let result = state.result();
    info!("Clock winners: {:?} (tie: {})", result.winners, result.is_tie);
    Ok(())
}
