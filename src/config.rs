//! Report configuration

use crate::model::{AnalysisParameters, CostModel, MemoryModel};
use crate::presets;
use std::path::PathBuf;

/// How a report is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width tables with findings
    #[default]
    Text,

    /// Pretty-printed JSON
    Json,
}

/// Configuration for one report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Windowing scheme parameters
    pub params: AnalysisParameters,

    /// Query frequencies for the Q tables
    pub frequencies: Vec<f64>,

    /// FFT sizes for the cost and memory tables
    pub fft_sizes: Vec<u32>,

    pub cost_model: CostModel,
    pub memory_model: MemoryModel,

    /// Bins per octave of the ideal constant-Q reference
    pub bins_per_octave: u32,

    /// Top kernel center frequency
    pub max_frequency_hz: f64,

    pub format: OutputFormat,

    /// Write the report here instead of stdout
    pub output: Option<PathBuf>,
}

impl ReportConfig {
    /// Create a configuration with the firmware's default sweeps
    pub fn new(params: AnalysisParameters) -> Self {
        Self {
            params,
            frequencies: presets::CORRECTED_SWEEP_HZ.to_vec(),
            fft_sizes: presets::COST_SIZES.to_vec(),
            cost_model: CostModel::default(),
            memory_model: MemoryModel {
                num_bins: presets::CQT_BINS,
                sparsity_fraction: presets::KERNEL_SPARSITY,
            },
            bins_per_octave: presets::BINS_PER_OCTAVE,
            max_frequency_hz: presets::CQT_MAX_FREQ_HZ,
            format: OutputFormat::Text,
            output: None,
        }
    }

    /// Replace the query frequencies
    pub fn with_frequencies(mut self, frequencies: Vec<f64>) -> Self {
        self.frequencies = frequencies;
        self
    }

    /// Replace the FFT sizes
    pub fn with_fft_sizes(mut self, sizes: Vec<u32>) -> Self {
        self.fft_sizes = sizes;
        self
    }

    pub fn with_cost_model(mut self, model: CostModel) -> Self {
        self.cost_model = model;
        self
    }

    pub fn with_memory_model(mut self, model: MemoryModel) -> Self {
        self.memory_model = model;
        self
    }

    pub fn with_bins_per_octave(mut self, bins: u32) -> Self {
        self.bins_per_octave = bins;
        self
    }

    pub fn with_max_frequency(mut self, max_hz: f64) -> Self {
        self.max_frequency_hz = max_hz;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Write to a file instead of stdout
    pub fn with_output(mut self, path: PathBuf) -> Self {
        self.output = Some(path);
        self
    }
}
