use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use tracing::info;

use sw_mechanics::{EnergyCell, Subsystem};
use sw_simulation::{MatchConfig, MatchEventKind, MatchOutcome, ShipId, World, WorldSnapshot};

use crate::pilot::Autopilot;

/// Match parameters taken from the command line.
pub struct Options {
    pub ticks: u64,
    pub seed: u64,
    pub tuning: Option<PathBuf>,
    pub lives: Option<i32>,
}

#[derive(Serialize)]
struct Report {
    seed: u64,
    ticks: u64,
    seconds: f64,
    outcome: Option<MatchOutcome>,
    events: usize,
    state: WorldSnapshot,
}

pub fn run(options: Options, verbose: bool, json: bool) -> Result<(), String> {
    let tuning = super::load_tuning(options.tuning.as_deref())?;
    let mut config = MatchConfig::default()
        .with_seed(options.seed)
        .with_tuning(tuning);
    if let Some(lives) = options.lives {
        config = config.with_lives(lives);
    }

    let mut world = World::new(config).map_err(|e| format!("cannot start match: {e}"))?;
    let pilots: Vec<Autopilot> = world.ships().map(|ship| Autopilot::new(ship.id())).collect();

    for _ in 0..options.ticks {
        if world.is_over() {
            break;
        }
        for pilot in &pilots {
            for intent in pilot.decide(&world) {
                let _ = world
                    .apply(pilot.id(), intent)
                    .map_err(|e| format!("simulation error: {e}"))?;
            }
        }
        world.tick();
    }
    info!(
        ticks = world.current_tick(),
        events = world.events().len(),
        over = world.is_over(),
        "simulation finished"
    );

    if json {
        let report = Report {
            seed: options.seed,
            ticks: world.current_tick(),
            seconds: world.clock().elapsed_seconds(),
            outcome: world.outcome(),
            events: world.events().len(),
            state: world.snapshot(),
        };
        let text = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    // Header
    println!(
        "  {} {}",
        "Spacewar".bold(),
        format!(
            "({} ticks, {:.1}s, seed={})",
            world.current_tick(),
            world.clock().elapsed_seconds(),
            options.seed
        )
        .dimmed()
    );
    match world.outcome() {
        Some(MatchOutcome::Winner(ship)) => {
            println!("  Result: {}", format!("{ship} wins").green().bold());
        }
        Some(MatchOutcome::Tie) => println!("  Result: {}", "tie".yellow().bold()),
        None => println!("  Result: {}", "undecided (tick limit reached)".dimmed()),
    }
    println!("  {} events logged", world.events().len());
    println!();

    if verbose {
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in world.events().iter() {
            let tick_label = format!("[tick {:>5}]", event.tick).dimmed();
            let desc = colorize_event(&event.kind, &event.description);
            println!("  {tick_label} {desc}");
        }
        if world.events().is_empty() {
            println!("  {}", "(no events)".dimmed());
        }
        println!();
    } else {
        let losses: Vec<_> = world
            .events()
            .iter()
            .filter(|e| matches!(e.kind, MatchEventKind::ShipDestroyed { .. }))
            .collect();
        if !losses.is_empty() {
            println!("  {}", "Notable Events".bold().underline());
            for event in &losses {
                println!(
                    "  {}  {}",
                    format!("[tick {:>5}]", event.tick).dimmed(),
                    event.description.red()
                );
            }
            println!();
        }
    }

    println!("  {}", "Ship Status".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["Ship".to_string(), "Lives".to_string()];
    header.extend(Subsystem::ALL.iter().map(ToString::to_string));
    header.extend(["Shots".to_string(), "Hits".to_string()]);
    table.set_header(header);

    for ship in world.ships() {
        let mut row = vec![ship.id().to_string(), ship.lives().max(0).to_string()];
        for sub in Subsystem::ALL {
            row.push(format_level(ship.energy().cell(sub)));
        }
        row.push(shots_by(&world, ship.id()).to_string());
        row.push(hits_by(&world, ship.id()).to_string());
        table.add_row(row);
    }

    println!("{table}");
    println!();

    Ok(())
}

fn shots_by(world: &World, id: ShipId) -> usize {
    world
        .events()
        .count(|kind| matches!(kind, MatchEventKind::ShotFired { ship } if *ship == id))
}

fn hits_by(world: &World, id: ShipId) -> usize {
    world.events().count(|kind| {
        matches!(kind, MatchEventKind::ProjectileHit { owner, shielded: false, .. } if *owner == id)
    })
}

fn colorize_event(kind: &MatchEventKind, description: &str) -> colored::ColoredString {
    match kind {
        MatchEventKind::ShipDestroyed { .. } => description.red().bold(),
        MatchEventKind::MatchOver { .. } => description.green().bold(),
        MatchEventKind::ProjectileHit { shielded: true, .. } => description.cyan(),
        MatchEventKind::ProjectileHit { .. } | MatchEventKind::ShipsCollided { .. } => {
            description.yellow()
        }
        MatchEventKind::Jumped { .. } => description.blue(),
        MatchEventKind::ShotFired { .. } | MatchEventKind::ProjectileSwallowed { .. } => {
            description.dimmed()
        }
    }
}

fn format_level(cell: &EnergyCell) -> String {
    let fraction = cell.fraction();
    let filled = (fraction * 10.0).round().clamp(0.0, 10.0) as usize;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(10 - filled));
    let bar = if fraction <= 0.15 {
        bar.red()
    } else if fraction <= 0.4 {
        bar.yellow()
    } else {
        bar.green()
    };
    format!("[{bar}] {:>3.0} @{:.0}", cell.level(), cell.slider())
}
