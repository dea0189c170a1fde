//! The installation-phase orchestrator.
//!
//! [`InstallationPhase`] wires configuration into a concrete process graph:
//! two bounded buffers, N substructure lines, M turbine lines, and G tow
//! groups, all registered and started in a fixed order so that two runs of
//! the same configuration produce identical event interleavings.

use qs_core::{Hours, InstallationConfig, SizingRecord, StorageId};
use qs_engine::{Engine, EngineObserver, RunOutcome};

use crate::error::PortResult;
use crate::item::PortItem;
use crate::lines::{SubstructureAssemblyLine, TurbineAssemblyLine};
use crate::towing::{InstallLog, TowInstallGroup};

// ── quota split ───────────────────────────────────────────────────────────────

/// Distribute `total` units over `lines` workers as evenly as possible.
///
/// The first `total % lines` workers take one extra unit, so the split is a
/// pure function of the inputs and assignment order never depends on runtime
/// state.
pub(crate) fn split_quota(total: u32, lines: u32) -> Vec<u32> {
    if lines == 0 {
        return Vec::new();
    }
    let base = total / lines;
    let extra = total % lines;
    (0..lines).map(|i| base + u32::from(i < extra)).collect()
}

// ── InstallationPhase ─────────────────────────────────────────────────────────

/// A fully wired, ready-to-run quayside installation phase.
pub struct InstallationPhase {
    config:           InstallationConfig,
    engine:           Engine<PortItem>,
    wet_storage:      StorageId,
    assembly_storage: StorageId,
    install_log:      InstallLog,
}

impl InstallationPhase {
    /// Validate `config` and build the process graph.
    ///
    /// Every substructure line produces units with the given `sizing`.
    /// Registration order is fixed: substructure lines, then turbine lines,
    /// then tow groups, each numbered from 1.
    pub fn new(config: InstallationConfig, sizing: SizingRecord) -> PortResult<Self> {
        config.validate()?;

        let mut engine = Engine::new();
        let wet_storage = engine.add_storage(config.wet_storage.capacity)?;
        let assembly_storage = engine.add_storage(config.assembly_storage.capacity)?;
        let install_log = InstallLog::new();

        for (i, quota) in split_quota(config.num_turbines, config.substructure.lines)
            .into_iter()
            .enumerate()
        {
            let line = SubstructureAssemblyLine::new(
                format!("substructure-line-{}", i + 1),
                config.substructure.takt_time,
                wet_storage,
                sizing,
                quota,
            );
            let id = engine.register(Box::new(line));
            engine.start(id)?;
        }

        for (i, quota) in split_quota(config.num_turbines, config.turbine.lines)
            .into_iter()
            .enumerate()
        {
            let line = TurbineAssemblyLine::new(
                format!("turbine-line-{}", i + 1),
                config.turbine.takt_time,
                wet_storage,
                assembly_storage,
                quota,
            );
            let id = engine.register(Box::new(line));
            engine.start(id)?;
        }

        for (i, quota) in split_quota(config.num_turbines, config.towing.groups)
            .into_iter()
            .enumerate()
        {
            let group = TowInstallGroup::new(
                format!("tow-group-{}", i + 1),
                assembly_storage,
                config.towing.outbound_time(),
                config.towing.return_time(),
                quota,
                install_log.clone(),
            );
            let id = engine.register(Box::new(group));
            engine.start(id)?;
        }

        Ok(Self {
            config,
            engine,
            wet_storage,
            assembly_storage,
            install_log,
        })
    }

    /// Run the phase to completion, deadlock, or the configured horizon.
    pub fn run(&mut self) -> PortResult<InstallationReport> {
        let outcome = self.engine.run_until_idle(self.config.horizon)?;
        Ok(self.report(outcome))
    }

    /// Like [`run`](Self::run) but with scheduler callbacks.
    pub fn run_observed<O: EngineObserver>(
        &mut self,
        observer: &mut O,
    ) -> PortResult<InstallationReport> {
        let outcome = self.engine.run_observed(self.config.horizon, observer)?;
        Ok(self.report(outcome))
    }

    fn report(&self, outcome: RunOutcome) -> InstallationReport {
        let deposits = |id: StorageId| -> Vec<Hours> {
            self.engine
                .storage(id)
                .map(|s| s.deposits().to_vec())
                .unwrap_or_default()
        };
        InstallationReport {
            outcome,
            substructure_completions: deposits(self.wet_storage),
            turbine_completions:      deposits(self.assembly_storage),
            installations:            self.install_log.times(),
        }
    }

    pub fn config(&self) -> &InstallationConfig {
        &self.config
    }

    pub fn engine(&self) -> &Engine<PortItem> {
        &self.engine
    }

    pub fn wet_storage(&self) -> StorageId {
        self.wet_storage
    }

    pub fn assembly_storage(&self) -> StorageId {
        self.assembly_storage
    }
}

// ── InstallationReport ────────────────────────────────────────────────────────

/// Distilled result of one phase run.
///
/// The three completion vectors are cumulative event-order logs: entry `i`
/// is the time the `(i+1)`-th unit cleared that stage.  On a partial run
/// (deadlock or horizon) they hold whatever was finished by then.
#[derive(Debug)]
pub struct InstallationReport {
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Times substructures entered wet storage.
    pub substructure_completions: Vec<Hours>,
    /// Times assembled turbines entered assembly storage.
    pub turbine_completions: Vec<Hours>,
    /// Times turbines were installed on site.
    pub installations: Vec<Hours>,
}

impl InstallationReport {
    /// Total simulated time of the run.
    pub fn elapsed(&self) -> Hours {
        self.outcome.elapsed()
    }

    /// True when every process ran to completion.
    pub fn is_completed(&self) -> bool {
        self.outcome.is_completed()
    }

    pub fn reached_horizon(&self) -> bool {
        self.outcome.reached_horizon()
    }

    pub fn installed_count(&self) -> usize {
        self.installations.len()
    }

    /// Completion time of the n-th substructure (1-based).
    pub fn nth_substructure(&self, n: usize) -> Option<Hours> {
        n.checked_sub(1).and_then(|i| self.substructure_completions.get(i).copied())
    }

    /// Completion time of the n-th assembled turbine (1-based).
    pub fn nth_turbine(&self, n: usize) -> Option<Hours> {
        n.checked_sub(1).and_then(|i| self.turbine_completions.get(i).copied())
    }

    /// Installation time of the n-th turbine on site (1-based).
    pub fn nth_installation(&self, n: usize) -> Option<Hours> {
        n.checked_sub(1).and_then(|i| self.installations.get(i).copied())
    }
}
