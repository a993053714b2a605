//! hdrtone CLI: tone map HDR radiance images into displayable files.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use hdrtone::{FilterParams, KernelType, SampleRange, ToneMapParams};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "hdrtone")]
#[command(about = "Tone map HDR radiance images (.hdr/RGBE, PPM) into displayable LDR output")]
#[command(version)]
struct Cli {
    /// Input image (.hdr, .ppm, .png).
    input: PathBuf,

    /// Output image; .png writes PNG, anything else writes binary PPM.
    output: PathBuf,

    /// Luminance exponent (< 1 compresses dynamic range).
    #[arg(long, default_value_t = 1.0)]
    gamma: f32,

    /// Multiplicative luminance pre-scale (global mode).
    #[arg(long, default_value_t = 1.0)]
    gain: f32,

    /// Additive luminance pre-offset (global mode).
    #[arg(long, default_value_t = 0.0)]
    bias: f32,

    /// Enable the detail-preserving spatial filter.
    #[arg(long)]
    filter: bool,

    /// Kernel radius for the spatial filter.
    #[arg(long, default_value_t = 2)]
    radius: i32,

    /// Kernel type: box | gaussian.
    #[arg(long, default_value = "gaussian")]
    kernel: KernelType,

    /// Add bilateral-like edge-aware weighting on top of the kernel.
    #[arg(long)]
    edge_aware: bool,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let image = hdrtone::decode_path(&cli.input)?;
    tracing::info!(
        "Loaded {} ({}x{}, {} channels)",
        cli.input.display(),
        image.width,
        image.height,
        image.channels,
    );

    let params = ToneMapParams {
        gamma: cli.gamma,
        gain: cli.gain,
        bias: cli.bias,
        filter: cli.filter.then_some(FilterParams {
            radius: cli.radius,
            kernel: cli.kernel,
            edge_aware: cli.edge_aware,
        }),
        range: SampleRange::NORMALIZED,
    };

    let start = Instant::now();
    let mapped = hdrtone::tonemap(&image, &params)?;
    let mode = match &params.filter {
        Some(f) => format!(
            "filtered, {:?} r={}{}",
            f.kernel,
            f.radius,
            if f.edge_aware { ", edge-aware" } else { "" }
        ),
        None => "global".to_string(),
    };
    tracing::info!(
        "Tone mapped in {:.1} ms ({mode}, gamma {})",
        start.elapsed().as_secs_f64() * 1000.0,
        cli.gamma,
    );

    match cli.output.extension().and_then(|e| e.to_str()) {
        Some("png") => hdrtone::write_png(&mapped, &cli.output)?,
        _ => hdrtone::write_ppm(&mapped, &cli.output)?,
    }
    tracing::info!("Written to {}", cli.output.display());

    Ok(())
}
