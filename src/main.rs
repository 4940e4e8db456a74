use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use q_analysis::model::{CostModel, MemoryModel};
use q_analysis::report::{self, Report};
use q_analysis::analysis::MAX_CENTER_BINS;
use q_analysis::{presets, AnalysisParameters, OutputFormat, ReportConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "q-analysis")]
#[command(about = "Effective Q and FFT cost tables for constant-Q spectrum displays", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long, global = true)]
    output: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Effective Q with the real-valued window length
    Q(SweepArgs),

    /// Effective Q with the window truncated to whole samples first
    QInitial(SweepArgs),

    /// FFT cost and memory estimates
    Cost(CostArgs),

    /// Kernel window plan for every constant-Q bin
    Kernels {
        #[command(flatten)]
        scheme: SchemeArgs,

        /// Use the variable-Q schedule instead of the ideal Q
        #[arg(long)]
        variable: bool,

        /// Number of bins
        #[arg(long, default_value_t = presets::CQT_BINS,
              value_parser = clap::value_parser!(u32).range(0..=MAX_CENTER_BINS as i64))]
        bins: u32,

        /// Top center frequency in Hz
        #[arg(long, default_value_t = presets::CQT_MAX_FREQ_HZ)]
        max_freq: f64,
    },
}

#[derive(clap::Args, Debug)]
struct SchemeArgs {
    /// Sample rate in Hz
    #[arg(long, default_value_t = presets::SAMPLE_RATE_HZ)]
    sample_rate: f64,

    /// FFT size in samples
    #[arg(long, default_value_t = presets::CQT_FFT_SIZE)]
    fft_size: u32,

    /// Minimum frequency in Hz
    #[arg(long, default_value_t = presets::CQT_MIN_FREQ_HZ)]
    min_freq: f64,

    /// Bins per octave of the ideal constant-Q reference
    #[arg(long, default_value_t = presets::BINS_PER_OCTAVE)]
    bins_per_octave: u32,
}

#[derive(clap::Args, Debug)]
struct SweepArgs {
    #[command(flatten)]
    scheme: SchemeArgs,

    /// Query frequency in Hz (can be specified multiple times)
    #[arg(long = "freq")]
    frequencies: Vec<f64>,
}

#[derive(clap::Args, Debug)]
struct CostArgs {
    /// FFT size to estimate (can be specified multiple times)
    #[arg(long = "size")]
    sizes: Vec<u32>,

    /// Size the relative cost is measured against
    #[arg(long, default_value_t = 4096)]
    base_size: u32,

    /// Clock cycles per operation
    #[arg(long, default_value_t = 10.0)]
    cycles_per_op: f64,

    /// Clock frequency in Hz
    #[arg(long, default_value_t = 1e9)]
    clock_hz: f64,

    /// Number of constant-Q kernels held in memory
    #[arg(long, default_value_t = presets::CQT_BINS)]
    bins: u32,

    /// Fraction of kernel bins kept after sparsification
    #[arg(long, default_value_t = presets::KERNEL_SPARSITY)]
    sparsity: f64,
}

impl SchemeArgs {
    fn into_config(self) -> Result<ReportConfig> {
        let params = AnalysisParameters::new(self.sample_rate, self.fft_size, self.min_freq)
            .context("Invalid analysis parameters")?;

        Ok(ReportConfig::new(params).with_bins_per_octave(self.bins_per_octave))
    }
}

impl SweepArgs {
    fn into_config(self, default_freqs: &[f64]) -> Result<ReportConfig> {
        let frequencies = if self.frequencies.is_empty() {
            default_freqs.to_vec()
        } else {
            self.frequencies
        };

        Ok(self.scheme.into_config()?.with_frequencies(frequencies))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let (config, report) = match args.command {
        Command::Q(sweep) => {
            let config = sweep.into_config(presets::CORRECTED_SWEEP_HZ)?;
            log::debug!("Corrected Q sweep over {} frequencies", config.frequencies.len());
            let report = Report::Q(report::q_report(&config)?);
            (config, report)
        }
        Command::QInitial(sweep) => {
            let config = sweep.into_config(presets::INITIAL_SWEEP_HZ)?;
            log::debug!("Truncated-window Q sweep over {} frequencies", config.frequencies.len());
            let report = Report::InitialQ(report::initial_q_report(&config)?);
            (config, report)
        }
        Command::Cost(cost) => {
            let sizes = if cost.sizes.is_empty() {
                presets::COST_SIZES.to_vec()
            } else {
                cost.sizes
            };
            let config = ReportConfig::new(presets::cqt_parameters()?)
                .with_fft_sizes(sizes)
                .with_cost_model(CostModel {
                    base_size: cost.base_size,
                    cycles_per_op: cost.cycles_per_op,
                    clock_hz: cost.clock_hz,
                })
                .with_memory_model(MemoryModel {
                    num_bins: cost.bins,
                    sparsity_fraction: cost.sparsity,
                });
            let report = Report::Cost(report::cost_report(&config)?);
            (config, report)
        }
        Command::Kernels {
            scheme,
            variable,
            bins,
            max_freq,
        } => {
            let mut config = scheme.into_config()?.with_max_frequency(max_freq);
            config.memory_model.num_bins = bins;
            if variable {
                log::info!("Planning {} kernels with the variable-Q schedule", bins);
            }
            let report = Report::Kernels(report::kernel_report(&config, variable)?);
            (config, report)
        }
    };

    let mut config = config.with_format(args.format);
    if let Some(output) = args.output {
        // Expand ~ in paths
        let path = shellexpand::tilde(&output);
        config = config.with_output(PathBuf::from(path.as_ref()));
    }

    report::write_report(&report, &config)?;

    Ok(())
}
