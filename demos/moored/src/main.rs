//! moored — end-to-end quayside installation study.
//!
//! Sizes a monopile for a reference site, then simulates port-side assembly
//! and tow-out installation of a 10-turbine moored plant: one substructure
//! line and one turbine assembly line feeding a single tow group through
//! two-berth wet and assembly storages.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use qs_core::{Hours, InstallationConfig, StageConfig, StorageConfig, TowingConfig};
use qs_design::{DesignParams, MonopileDesign, SiteSpec, TurbineSpec};
use qs_engine::RunOutcome;
use qs_port::{InstallationPhase, ReportWriter};

// ── Constants ─────────────────────────────────────────────────────────────────

const NUM_TURBINES: u32 = 10;

/// One substructure per week per line.
const SUBSTRUCTURE_TAKT: Hours = Hours(168.0);
/// Three days on the assembly crane per turbine.
const TURBINE_TAKT: Hours = Hours(72.0);

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== moored — quayside assembly and tow-out study ===");
    println!("Turbines: {NUM_TURBINES}");
    println!();

    // 1. Size the substructure for the reference site.
    let site = SiteSpec { depth: 25.0, mean_windspeed: 9.0 };
    let turbine = TurbineSpec {
        rotor_diameter:  155.0,
        hub_height:      100.0,
        rated_windspeed: 12.0,
    };
    let design = MonopileDesign::new(site, turbine, DesignParams::default()).design()?;
    let pile = design.monopile;
    println!("Monopile design (depth {} m, mean wind {} m/s):", site.depth, site.mean_windspeed);
    println!("  diameter   : {:8.2} m", pile.diameter);
    println!("  wall       : {:8.1} mm", pile.thickness * 1000.0);
    println!("  length     : {:8.2} m", pile.length);
    println!("  mass       : {:8.1} t", pile.mass);
    println!(
        "  material   : {:8.2} MUSD ({} units incl. transition pieces)",
        design.material_cost(NUM_TURBINES).total() / 1e6,
        NUM_TURBINES,
    );
    println!();

    // 2. Configure the installation phase.
    let config = InstallationConfig {
        num_turbines:     NUM_TURBINES,
        substructure:     StageConfig::new(1, SUBSTRUCTURE_TAKT),
        turbine:          StageConfig::new(1, TURBINE_TAKT),
        wet_storage:      StorageConfig::default(),
        assembly_storage: StorageConfig::default(),
        towing:           TowingConfig::default(),
        horizon:          None,
    };

    // 3. Run.
    let mut phase = InstallationPhase::new(config, design.sizing_record())?;
    let t0 = Instant::now();
    let report = phase.run()?;
    let wall = t0.elapsed();

    // 4. Outcome summary.
    match &report.outcome {
        RunOutcome::Completed { elapsed } => {
            println!("Installation complete at {elapsed} ({:.1} days)", elapsed.get() / 24.0);
        }
        RunOutcome::Deadlock { elapsed, stalled } => {
            println!("Deadlocked at {elapsed}:");
            for stall in stalled {
                println!("  {} blocked on {} ({:?})", stall.name, stall.storage, stall.waiting_for);
            }
        }
        RunOutcome::HorizonReached { horizon, incomplete } => {
            println!("Horizon {horizon} reached with {} processes unfinished", incomplete.len());
        }
    }
    println!("(simulated in {:.3} ms wall time)", wall.as_secs_f64() * 1e3);
    println!();

    // 5. Per-unit installation table.
    println!("{:<8} {:>14} {:>10}", "Unit", "Installed (h)", "Day");
    println!("{}", "-".repeat(34));
    for (i, t) in report.installations.iter().enumerate() {
        println!("{:<8} {:>14.1} {:>10.1}", i + 1, t.get(), t.get() / 24.0);
    }
    println!();

    // 6. CSV report.
    std::fs::create_dir_all("output/moored")?;
    let mut writer = ReportWriter::new(Path::new("output/moored"))?;
    writer.write_report(&report)?;
    writer.finish()?;
    println!("Wrote output/moored/unit_completions.csv and run_summary.csv");

    Ok(())
}
