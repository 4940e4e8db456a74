//! Report assembly and output
//!
//! Builds the tables the CLI prints from a [`ReportConfig`]. Rendering
//! returns a `String`; only [`write_report`] touches stdout or the filesystem.

mod json;
mod table;

use crate::analysis::{
    center_frequencies, ideal_q, plan_kernels, sweep_cost, sweep_memory, sweep_q,
    sweep_q_truncated, variable_q, KernelWindow, QRow, QSummary,
};
use crate::config::{OutputFormat, ReportConfig};
use crate::model::{
    AnalysisParameters, CostModel, CostResult, MemoryModel, MemoryResult, TruncatedQueryResult,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;

pub use json::to_json;

/// Corrected-variant Q sweep
#[derive(Debug, Clone, Serialize)]
pub struct QReport {
    pub parameters: AnalysisParameters,
    pub bins_per_octave: u32,
    pub rows: Vec<QRow>,
    pub summary: Option<QSummary>,
}

/// Initial-variant Q sweep (truncated windows)
#[derive(Debug, Clone, Serialize)]
pub struct InitialQReport {
    pub parameters: AnalysisParameters,
    pub bins_per_octave: u32,
    pub rows: Vec<TruncatedQueryResult>,
    pub summary: Option<QSummary>,
}

/// FFT cost and memory estimates
#[derive(Debug, Clone, Serialize)]
pub struct CostReport {
    pub cost_model: CostModel,
    pub memory_model: MemoryModel,
    pub cost: Vec<CostResult>,
    pub memory: Vec<MemoryResult>,
}

/// Planned kernel windows for every constant-Q bin
#[derive(Debug, Clone, Serialize)]
pub struct KernelReport {
    pub sample_rate_hz: f64,
    pub fft_size: u32,
    /// Design Q follows the variable-Q schedule instead of the ideal Q
    pub variable: bool,
    pub ideal_q: f64,
    pub kernels: Vec<KernelWindow>,
}

/// Any report the CLI can produce
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Q(QReport),
    InitialQ(InitialQReport),
    Cost(CostReport),
    Kernels(KernelReport),
}

impl Report {
    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Text => Ok(match self {
                Report::Q(r) => table::render_q(r),
                Report::InitialQ(r) => table::render_initial_q(r),
                Report::Cost(r) => table::render_cost(r),
                Report::Kernels(r) => table::render_kernels(r),
            }),
        }
    }
}

/// Sweep the corrected variant over the configured frequencies
pub fn q_report(config: &ReportConfig) -> Result<QReport> {
    let rows = sweep_q(&config.params, &config.frequencies).context("Q sweep failed")?;
    let ideal = ideal_q(config.bins_per_octave)?;
    let summary = QSummary::from_q_values(rows.iter().map(|r| r.result.effective_q), ideal);

    let degenerate = rows.iter().filter(|r| r.degenerate).count();
    if degenerate > 0 {
        log::warn!("{} of {} windows are shorter than one sample", degenerate, rows.len());
    }

    Ok(QReport {
        parameters: config.params,
        bins_per_octave: config.bins_per_octave,
        rows,
        summary,
    })
}

/// Sweep the initial (truncated-window) variant over the configured frequencies
pub fn initial_q_report(config: &ReportConfig) -> Result<InitialQReport> {
    let rows = sweep_q_truncated(&config.params, &config.frequencies)
        .context("truncated-window Q sweep failed")?;
    let ideal = ideal_q(config.bins_per_octave)?;
    let summary = QSummary::from_q_values(rows.iter().map(|r| r.effective_q), ideal);

    Ok(InitialQReport {
        parameters: config.params,
        bins_per_octave: config.bins_per_octave,
        rows,
        summary,
    })
}

/// Estimate cost and memory for the configured FFT sizes
pub fn cost_report(config: &ReportConfig) -> Result<CostReport> {
    let cost = sweep_cost(&config.fft_sizes, &config.cost_model).context("cost estimate failed")?;
    let memory =
        sweep_memory(&config.fft_sizes, &config.memory_model).context("memory estimate failed")?;

    Ok(CostReport {
        cost_model: config.cost_model,
        memory_model: config.memory_model,
        cost,
        memory,
    })
}

/// Plan kernel windows for `memory_model.num_bins` constant-Q bins
///
/// With `variable` set, each bin's design Q comes from the variable-Q
/// schedule; otherwise every bin uses the ideal Q.
pub fn kernel_report(config: &ReportConfig, variable: bool) -> Result<KernelReport> {
    let params = &config.params;
    let ideal = ideal_q(config.bins_per_octave)?;
    let centers = center_frequencies(
        config.memory_model.num_bins as usize,
        config.bins_per_octave,
        params.min_frequency_hz(),
        config.max_frequency_hz,
    )
    .context("invalid kernel frequency range")?;

    let planned = if variable {
        plan_kernels(&centers, params.sample_rate_hz(), params.fft_size(), variable_q)
    } else {
        plan_kernels(&centers, params.sample_rate_hz(), params.fft_size(), |_| ideal)
    };
    let kernels = planned.context("kernel planning failed")?;

    Ok(KernelReport {
        sample_rate_hz: params.sample_rate_hz(),
        fft_size: params.fft_size(),
        variable,
        ideal_q: ideal,
        kernels,
    })
}

/// Render `report` and write it to the configured output, or stdout
pub fn write_report(report: &Report, config: &ReportConfig) -> Result<()> {
    let rendered = report.render(config.format)?;

    match &config.output {
        Some(path) => {
            fs::write(path, rendered.as_bytes())
                .with_context(|| format!("Failed to write report: {:?}", path))?;
            log::info!("Report written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
