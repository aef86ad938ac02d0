//! Moore Quickstart: a small automaton driven the way a render loop would.
//!
//! Demonstrates:
//!   1. Building a rule library and selecting a rule
//!   2. Creating a seeded SimulationContext and initializing the grid
//!   3. Queuing pointer samples from another thread
//!   4. Ticking under different cadences, pausing, and editing the rule
//!
//! Run with:
//!   cargo run --example quickstart

use std::thread;

use moore_core::{FillMode, RuleLibrary, RuleTable};
use moore_engine::{BrushParams, PointerSample, SimConfig, SimulationContext, StepParams};

// ─── Grid parameters ────────────────────────────────────────────

const SIZE: u32 = 24;
const SEED: u64 = 42;

// ─── Rules ──────────────────────────────────────────────────────
//
// Life-like rule: a cell is born with exactly 3 live neighbours and
// survives with 2 or 3. Built from the neighbourhood index directly.

fn life() -> RuleTable {
    RuleTable::from_fn(|i| {
        let centre = i & 16 != 0;
        let neighbours = (i & !16).count_ones();
        matches!((centre, neighbours), (true, 2) | (_, 3))
    })
}

fn print_grid(ctx: &SimulationContext) {
    let Some(grid) = ctx.grid() else {
        return;
    };
    let n = grid.size() as i64;
    // Row y = N - 1 is the top of the picture.
    for y in (0..n).rev() {
        let row: String = (0..n)
            .map(|x| if grid.read(x, y) >= 0.5 { '#' } else { '.' })
            .collect();
        println!("  {row}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Moore Quickstart ===\n");

    let mut library = RuleLibrary::new();
    library.insert("life", &life().code())?;
    library.insert("identity", &RuleTable::identity().code())?;
    println!("Library: {}", library.names().collect::<Vec<_>>().join(", "));

    let config = SimConfig {
        grid_size: SIZE,
        seed: Some(SEED),
        init_mode: FillMode::Random,
        step: StepParams {
            noise_prob: 0.001,
            ..StepParams::default()
        },
        brush: BrushParams {
            mode: FillMode::Random,
            radius: 0.2,
        },
        steps_per_frame: 0,
        ..SimConfig::default()
    };
    let mut ctx = SimulationContext::new(config)?;
    ctx.set_library(library);
    ctx.select_rule("life")?;
    ctx.reset_state()?;
    println!("Initial grid ({} live):", ctx.grid().map_or(0, |g| g.population()));
    print_grid(&ctx);

    // Pointer input arrives on another thread and is consumed per tick.
    let tx = ctx.pointer_sender();
    thread::spawn(move || {
        for i in 0..5 {
            let t = f64::from(i) / 4.0;
            tx.send(PointerSample::pressed(0.2 + 0.6 * t, 0.5));
        }
        tx.send(PointerSample::released(0.8, 0.5));
    })
    .join()
    .map_err(|_| "pointer thread panicked")?;

    let report = ctx.tick();
    println!(
        "\nFrame {}: {} brush strokes, {} step(s)",
        report.frame, report.brush_strokes, report.steps
    );

    ctx.set_steps_per_frame(3)?;
    println!("\nCadence {}:", ctx.cadence().label());
    for _ in 0..4 {
        let report = ctx.tick();
        let grid = ctx.grid().ok_or("grid missing")?;
        println!(
            "  frame {:>2}  steps {:>2}  generation {:>3}  live {:>3}",
            report.frame,
            report.steps,
            grid.generation(),
            grid.population()
        );
    }

    ctx.toggle_running();
    let paused = ctx.tick();
    println!("\nPaused: frame {} ran {} steps", paused.frame, paused.steps);
    ctx.toggle_running();

    ctx.toggle_rule(0)?;
    println!("Toggled entry 0; rule now has {} ones", ctx.rule().map_or(0, RuleTable::count_ones));
    ctx.reset_rule()?;

    println!("\nFinal grid (hash {:016x}):", ctx.grid().ok_or("grid missing")?.state_hash());
    print_grid(&ctx);
    println!("Done.");
    Ok(())
}
