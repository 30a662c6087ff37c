//! # Labelpress CLI
//!
//! Prints one label per invocation.
//!
//! ## Usage
//!
//! ```bash
//! # Drink order on the printer whose scripts include "drinks"
//! labelpress drink '{"customer_name": "Chessie", "date_time": "July 06 2025 12:40 PM",
//!                    "drink_name": "Large Coffee", "modifiers": ["Extra Shot", "Oat Milk"]}'
//!
//! # Pantry label, capturing the byte stream instead of printing
//! labelpress pantry '{"description": "Rolled Oats", "date": "2025-07-06"}' --dry-run oats.bin
//!
//! # Render a shopping list to PNG
//! labelpress preview shopping "$(cat list.json)" --png list.png
//!
//! # What is plugged in?
//! labelpress devices
//! ```
//!
//! Exit status: 0 once a job reached the printer (styled or fallback),
//! 1 for configuration errors, 2 for bad payloads, 3 for device errors.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::error;

use labelpress::{
    LabelError, LabelKind, LabelRequest, LabelResult, Settings,
    device::DeviceDescriptor,
    engine::{self, JobOutcome},
    label::{self, RenderContext},
    logging,
    raster::FontFace,
    transport::CaptureSource,
};

/// Labelpress - label printing for ESC/POS thermal printers
#[derive(Parser, Debug)]
#[command(name = "labelpress")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file
    #[arg(long, short, global = true, default_value = "config.yaml")]
    config: PathBuf,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a drink order label
    Drink {
        /// JSON payload
        payload: String,

        /// Capture the byte stream to FILE instead of printing
        #[arg(long, value_name = "FILE")]
        dry_run: Option<PathBuf>,
    },
    /// Print a pantry label
    Pantry {
        /// JSON payload
        payload: String,

        /// Capture the byte stream to FILE instead of printing
        #[arg(long, value_name = "FILE")]
        dry_run: Option<PathBuf>,
    },
    /// Print a categorized shopping list
    Shopping {
        /// JSON payload
        payload: String,

        /// Capture the byte stream to FILE instead of printing
        #[arg(long, value_name = "FILE")]
        dry_run: Option<PathBuf>,
    },
    /// Render the rasterized form of a label to PNG
    Preview {
        kind: KindArg,

        /// JSON payload
        payload: String,

        /// Output PNG file
        #[arg(long, value_name = "FILE")]
        png: PathBuf,
    },
    /// List attached USB devices
    Devices,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Drink,
    Pantry,
    Shopping,
}

impl From<KindArg> for LabelKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Drink => LabelKind::Drink,
            KindArg::Pantry => LabelKind::Pantry,
            KindArg::Shopping => LabelKind::Shopping,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let code = match cli.command {
        Commands::Drink { payload, dry_run } => print_label(&cli.config, LabelKind::Drink, &payload, dry_run.as_deref()),
        Commands::Pantry { payload, dry_run } => print_label(&cli.config, LabelKind::Pantry, &payload, dry_run.as_deref()),
        Commands::Shopping { payload, dry_run } => {
            print_label(&cli.config, LabelKind::Shopping, &payload, dry_run.as_deref())
        }
        Commands::Preview { kind, payload, png } => report(preview(&cli.config, kind.into(), &payload, &png)),
        Commands::Devices => report(list_devices()),
    };
    ExitCode::from(code as u8)
}

fn report<T>(result: LabelResult<T>) -> i32 {
    if let Err(e) = &result {
        error!(error = %e, "command failed");
    }
    engine::exit_code(&result)
}

fn load(config: &Path, kind: LabelKind, payload: &str) -> LabelResult<(Settings, LabelRequest)> {
    let settings = Settings::load(config)?;
    let request = LabelRequest::parse(kind, payload)?;
    Ok((settings, request))
}

fn print_label(config: &Path, kind: LabelKind, payload: &str, dry_run: Option<&Path>) -> i32 {
    let result = load(config, kind, payload).and_then(|(settings, request)| match dry_run {
        Some(out) => capture_job(&settings, &request, out),
        None => usb_job(&settings, &request),
    });
    report(result)
}

/// Run the job against an in-memory printer and save what it received.
fn capture_job(settings: &Settings, request: &LabelRequest, out: &Path) -> LabelResult<JobOutcome> {
    let profile = settings.profile_for(request.role())?;
    let mut source = CaptureSource::new().with_device(DeviceDescriptor::new(
        "capture",
        profile.vendor_id,
        profile.product_id,
        0,
        Some(&profile.serial_number),
    ));
    let captured = source.transport();
    let outcome = engine::run_job(request, settings, &mut source)?;
    std::fs::write(out, captured.bytes())?;
    println!("Captured {} bytes to {}", captured.bytes().len(), out.display());
    Ok(outcome)
}

#[cfg(feature = "usb")]
fn usb_job(settings: &Settings, request: &LabelRequest) -> LabelResult<JobOutcome> {
    engine::run_job(request, settings, &mut labelpress::transport::UsbSource::new())
}

#[cfg(not(feature = "usb"))]
fn usb_job(_settings: &Settings, _request: &LabelRequest) -> LabelResult<JobOutcome> {
    Err(LabelError::Transport("built without USB support".into()))
}

fn preview(config: &Path, kind: LabelKind, payload: &str, png: &Path) -> LabelResult<()> {
    let (settings, request) = load(config, kind, payload)?;
    let font = FontFace::load(&settings.fonts);
    let bitmap = label::preview(&request, &RenderContext::new(&settings, &font));
    bitmap.save_png(png)?;
    println!("Saved {}x{} preview to {}", bitmap.width(), bitmap.height(), png.display());
    Ok(())
}

#[cfg(feature = "usb")]
fn list_devices() -> LabelResult<()> {
    use labelpress::device::DeviceSource;

    let devices = labelpress::transport::UsbSource::new()
        .enumerate()
        .map_err(LabelError::Transport)?;
    print_devices(&devices);
    Ok(())
}

#[cfg(not(feature = "usb"))]
fn list_devices() -> LabelResult<()> {
    Err(LabelError::Transport("built without USB support".into()))
}

#[cfg(feature = "usb")]
fn print_devices(devices: &[DeviceDescriptor]) {
    if devices.is_empty() {
        println!("No USB devices found");
        return;
    }
    for d in devices {
        let classes: Vec<String> = d
            .configurations
            .iter()
            .flatten()
            .map(|c| format!("{:02x}", c))
            .collect();
        println!(
            "{:04x}:{:04x}  {:>7}  class {:02x}  interfaces [{}]  serial {}",
            d.vendor_id,
            d.product_id,
            d.id,
            d.device_class,
            classes.join(" "),
            d.serial_string().as_deref().unwrap_or("-"),
        );
    }
}
