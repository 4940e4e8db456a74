//! Fixed-width text tables

use super::{CostReport, InitialQReport, KernelReport, QReport};
use crate::analysis::{QSummary, WindowClamp};
use crate::model::AnalysisParameters;
use crate::presets;

fn title(lines: &mut Vec<String>, text: &str) {
    lines.push(text.to_string());
    lines.push("=".repeat(text.chars().count()));
}

fn parameters_line(params: &AnalysisParameters) -> String {
    format!(
        "FFT size: {}, Sample rate: {} Hz, Min freq: {} Hz",
        params.fft_size(),
        params.sample_rate_hz(),
        params.min_frequency_hz()
    )
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn optional(value: Option<f64>, width: usize) -> String {
    match value {
        Some(v) => format!("{:width$.1}", v, width = width),
        None => format!("{:>width$}", "inf", width = width),
    }
}

/// Semitone width of a passband at quality factor `q`
fn semitones_at(q: f64) -> f64 {
    12.0 * (1.0 + 1.0 / q).log2()
}

fn summary_lines(lines: &mut Vec<String>, summary: &QSummary, bins_per_octave: u32) {
    if summary.is_constant(1e-9) {
        lines.push(format!(
            "1. Effective Q is CONSTANT at {:.2} for all frequencies",
            summary.mean_q
        ));
    } else {
        lines.push(format!(
            "1. Effective Q varies from {:.2} to {:.2}",
            summary.min_q, summary.max_q
        ));
    }
    lines.push(format!(
        "2. Ideal constant Q for {} bins/octave is {:.1}; mean Q is {:.1}x lower",
        bins_per_octave, summary.ideal_q, summary.shortfall
    ));
    lines.push(format!(
        "3. Bandwidth is {:.1} semitones at mean Q (ideal {:.2})",
        semitones_at(summary.mean_q),
        semitones_at(summary.ideal_q)
    ));
}

/// Corrected-variant table, with window spans at both ends of the sweep
pub(super) fn render_q(report: &QReport) -> String {
    let mut lines = Vec::new();
    title(&mut lines, "Constant-Q Window Analysis (Corrected)");
    lines.push(parameters_line(&report.parameters));
    lines.push(String::new());

    lines.push("Freq(Hz) | Factor | Window | Duration(ms) | Eff. Q | BW(Hz) | BW(cents)".into());
    lines.push("---------|--------|--------|--------------|--------|--------|----------".into());

    for row in &report.rows {
        let r = &row.result;
        lines.push(format!(
            "{:8.1} | {:6.1} | {:6} | {:12.1} | {:6.2} | {:6.1} | {:8.0}{}",
            r.frequency_hz,
            r.factor,
            r.window_length_samples_int,
            r.duration_ms,
            r.effective_q,
            r.bandwidth_hz,
            r.bandwidth_cents,
            if row.degenerate { "  * <1 sample" } else { "" }
        ));
    }

    if let Some(summary) = &report.summary {
        lines.push(String::new());
        lines.push("Key Findings:".into());
        lines.push("-------------".into());
        summary_lines(&mut lines, summary, report.bins_per_octave);
    }

    if let (Some(first), Some(last)) = (report.rows.first(), report.rows.last()) {
        lines.push(String::new());
        for row in [first, last] {
            let r = &row.result;
            lines.push(format!(
                "- Window at {:.0} Hz: {:.1} samples = {:.2} ms",
                r.frequency_hz, r.window_length_samples, r.duration_ms
            ));
        }
    }

    finish(lines)
}

/// Initial-variant table; windows truncated to zero show an infinite bandwidth
pub(super) fn render_initial_q(report: &InitialQReport) -> String {
    let mut lines = Vec::new();
    title(&mut lines, "Constant-Q Window Analysis (Truncated Windows)");
    lines.push(parameters_line(&report.parameters));
    lines.push(String::new());

    lines.push("Freq(Hz) | Window | Eff. Q | BW(Hz) | BW(semitones)".into());
    lines.push("---------|--------|--------|--------|---------------".into());

    for r in &report.rows {
        lines.push(format!(
            "{:8.1} | {:6} | {:6.2} | {} | {}",
            r.frequency_hz,
            r.window_length_samples_int,
            r.effective_q,
            optional(r.bandwidth_hz, 6),
            optional(r.bandwidth_semitones, 13)
        ));
    }

    if let Some(summary) = &report.summary {
        lines.push(String::new());
        lines.push("Observations:".into());
        summary_lines(&mut lines, summary, report.bins_per_octave);
    }

    finish(lines)
}

fn clock_label(clock_hz: f64) -> String {
    if clock_hz >= 1e9 {
        format!("{}GHz", clock_hz / 1e9)
    } else {
        format!("{}MHz", clock_hz / 1e6)
    }
}

/// Cost and memory tables plus which sizes fit a frame budget
pub(super) fn render_cost(report: &CostReport) -> String {
    let mut lines = Vec::new();
    title(&mut lines, "FFT Computational Cost Analysis");
    lines.push(String::new());

    lines.push(format!(
        "FFT Size | Ops (N log N) | Relative Cost | Time @ {}",
        clock_label(report.cost_model.clock_hz)
    ));
    lines.push("---------|---------------|---------------|-------------".into());
    for c in &report.cost {
        lines.push(format!(
            "{:8} | {:13.0} | {:12.1}x | {:10.2}ms",
            c.fft_size, c.ops, c.relative_cost, c.estimated_time_ms
        ));
    }

    lines.push(String::new());
    for &fps in presets::FRAME_RATES {
        let budget_ms = 1000.0 / fps;
        let fitting: Vec<String> = report
            .cost
            .iter()
            .filter(|c| c.estimated_time_ms <= budget_ms)
            .map(|c| c.fft_size.to_string())
            .collect();
        lines.push(format!(
            "For {} FPS: {:.1}ms per frame, fits: {}",
            fps,
            budget_ms,
            if fitting.is_empty() { "none".to_string() } else { fitting.join(", ") }
        ));
    }

    lines.push(String::new());
    lines.push("Memory Requirements:".into());
    lines.push(format!(
        "Size  | Samples | Real FFT Output | Kernels ({} bins)",
        report.memory_model.num_bins
    ));
    lines.push("------|---------|-----------------|-------------------".into());
    for m in &report.memory {
        lines.push(format!(
            "{:5} | {:7.0}K | {:15.0}K | {:17.0}K (Total: {:.0}K)",
            m.fft_size,
            m.samples_bytes / 1024.0,
            m.fft_output_bytes / 1024.0,
            m.kernel_bytes / 1024.0,
            m.total_kib()
        ));
    }

    finish(lines)
}

/// Per-bin kernel window plan
pub(super) fn render_kernels(report: &KernelReport) -> String {
    let mut lines = Vec::new();
    let heading = if report.variable {
        "Variable-Q Kernel Windows"
    } else {
        "Constant-Q Kernel Windows"
    };
    title(&mut lines, heading);
    lines.push(format!(
        "FFT size: {}, Sample rate: {} Hz, Ideal Q: {:.2}",
        report.fft_size, report.sample_rate_hz, report.ideal_q
    ));
    lines.push(String::new());

    lines.push(" Bin | Center(Hz) | Design Q | Window | Eff. Q | Clamp".into());
    lines.push("-----|------------|----------|--------|--------|----------".into());

    for (bin, k) in report.kernels.iter().enumerate() {
        let clamp = match k.clamp {
            WindowClamp::None => "",
            WindowClamp::ToMinimum => "minimum",
            WindowClamp::ToFftSize => "FFT size",
        };
        lines.push(format!(
            "{:4} | {:10.1} | {:8.1} | {:6} | {:6.2} | {}",
            bin, k.center_hz, k.design_q, k.window_length, k.effective_q, clamp
        ));
    }

    let clipped = report
        .kernels
        .iter()
        .filter(|k| k.clamp == WindowClamp::ToFftSize)
        .count();
    lines.push(String::new());
    lines.push(format!(
        "{} of {} kernels clipped to the FFT size",
        clipped,
        report.kernels.len()
    ));

    finish(lines)
}
