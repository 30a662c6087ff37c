//! Whole jobs driven through the in-memory printer.

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use image::{GrayImage, Luma};
use pretty_assertions::assert_eq;

use labelpress::device::DeviceDescriptor;
use labelpress::engine::{JobOutcome, exit_code, run_job};
use labelpress::protocol::{commands, text};
use labelpress::transport::{CaptureSource, Event};
use labelpress::{LabelError, LabelKind, LabelRequest, Settings};

const DRINK: &str = r#"{"customer_name": "Chessie", "date_time": "July 06 2025 12:40 PM",
    "drink_name": "Large Coffee", "modifiers": ["Extra Shot", "Oat Milk"]}"#;

const PANTRY: &str = r#"{"description": "Organic Whole Wheat Flour", "date": "2025-07-06"}"#;

const SHOPPING: &str = r#"{"receipt_items": [
    {"category": "Produce", "ingredients": ["Apples", "[ ] Kale"]},
    {"category": "Dairy", "ingredients": ["Milk"]}
], "generated_at": "2025-07-06T14:05:00"}"#;

fn settings_with(assets: &Path, settle_ms: u64, rendering: &str) -> Settings {
    let yaml = format!(
        r#"
printers:
  shared:
    vendor_id: "04b8"
    product_id: "0202"
  bar:
    serial_number: "BAR001"
    profile: "TM-L90"
    name: "Bar printer"
    scripts: [drinks]
  kitchen:
    serial_number: "KIT002"
    profile: "TM-T20II"
    name: "Kitchen printer"
    scripts: [pantry, shopping]
printer:
  max_width: 576
  settle_delay_ms: {settle_ms}
  discovery_timeout_ms: 0
fonts:
  path: /nonexistent/font.ttf
  size: 14
pdf_style:
  margins: 10
  line_height_ratio: 1.3
  paragraph_spacing: 6
  indent: 12
  padding: 4
safety_margins:
  percentage: 0.1
  minimum: 20
page_dimensions:
  width: 288
paths:
  assets_dir: {assets}
{rendering}
"#,
        assets = assets.display(),
    );
    Settings::from_yaml(&yaml).unwrap()
}

fn settings() -> Settings {
    settings_with(Path::new("/nonexistent/assets"), 0, "")
}

fn bus() -> CaptureSource {
    CaptureSource::new()
        .with_device(DeviceDescriptor::new("1-1", 0x04b8, 0x0202, 0, Some("BAR001")))
        .with_device(
            DeviceDescriptor::new("1-2", 0x04b8, 0x0202, 7, Some("KIT002")).with_configuration(&[7, 0]),
        )
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

const RASTER_HEADER: [u8; 4] = [0x1D, 0x76, 0x30, 0x00];

#[test]
fn test_stylized_drink_job() {
    let mut source = bus();
    let printed = source.transport();
    let request = LabelRequest::parse(LabelKind::Drink, DRINK).unwrap();

    let outcome = run_job(&request, &settings(), &mut source).unwrap();

    assert_eq!(outcome, JobOutcome::Styled);
    let bytes = printed.bytes();
    assert!(bytes.starts_with(&commands::init()));
    assert!(contains(&bytes, b"    * * *  DRINK ORDER  * * *\n"));
    assert!(contains(&bytes, &[0xDC; 32]));
    assert!(contains(&bytes, &[0xCD; 32]));
    assert!(contains(&bytes, b"Chessie"));
    assert!(contains(&bytes, b"Jul 06, 2025            12:40 PM\n"));
    assert!(contains(&bytes, b"    + Extra Shot\n"));
    assert_eq!(printed.cut_count(), 1);
    assert!(printed.is_closed());
}

#[test]
fn test_customer_name_is_inverse_and_large() {
    let mut source = bus();
    let printed = source.transport();
    let request = LabelRequest::parse(LabelKind::Drink, DRINK).unwrap();
    run_job(&request, &settings(), &mut source).unwrap();

    let mut expected = text::inverse(true);
    expected.extend(text::print_mode(text::TextSize::DoubleHeightWidth));
    expected.extend(b"Chessie");
    expected.extend(text::size_normal());
    expected.extend(text::inverse(false));
    assert!(contains(&printed.bytes(), &expected));
}

#[test]
fn test_write_failure_falls_back_and_still_cuts_once() {
    let mut source = bus();
    let printed = source.transport();
    printed.fail_write_containing(b"Large Coffee");
    let request = LabelRequest::parse(LabelKind::Drink, DRINK).unwrap();

    let outcome = run_job(&request, &settings(), &mut source).unwrap();

    assert_eq!(outcome, JobOutcome::Fallback);
    let bytes = printed.bytes();
    assert!(contains(&bytes, b"DRINK LABEL\n====================\nChessie\nLarge Coffee\n"));
    assert!(!contains(&bytes, b"    + Extra Shot"));
    assert_eq!(printed.cut_count(), 1);
    assert!(printed.is_closed());
    assert_eq!(printed.events().last(), Some(&Event::Close));
    assert_eq!(exit_code(&Ok(outcome)), 0);
}

#[test]
fn test_device_not_found_prints_nothing() {
    let mut source = CaptureSource::new();
    let printed = source.transport();
    let request = LabelRequest::parse(LabelKind::Drink, DRINK).unwrap();

    let result = run_job(&request, &settings(), &mut source);

    assert!(matches!(result, Err(LabelError::DeviceNotFound { ref serial }) if serial == "BAR001"));
    assert!(printed.events().is_empty());
    assert_eq!(exit_code(&result), 3);
}

#[test]
fn test_wrong_serial_is_not_found() {
    let mut source = CaptureSource::new()
        .with_device(DeviceDescriptor::new("1-1", 0x04b8, 0x0202, 0, Some("OTHER")));
    let printed = source.transport();
    let request = LabelRequest::parse(LabelKind::Drink, DRINK).unwrap();

    assert!(run_job(&request, &settings(), &mut source).is_err());
    assert!(printed.bytes().is_empty());
}

#[test]
fn test_busy_device_prints_nothing() {
    let mut source = bus().with_busy("1-1");
    let printed = source.transport();
    let request = LabelRequest::parse(LabelKind::Drink, DRINK).unwrap();

    let result = run_job(&request, &settings(), &mut source);

    assert!(matches!(result, Err(LabelError::DeviceBusy { .. })));
    assert!(printed.events().is_empty());
}

#[test]
fn test_unassigned_role_fails_before_discovery() {
    let mut trimmed = settings();
    trimmed.printers.roles.remove("kitchen");
    let mut source = bus();
    let request = LabelRequest::parse(LabelKind::Pantry, PANTRY).unwrap();

    let result = run_job(&request, &trimmed, &mut source);

    assert!(matches!(result, Err(LabelError::Config(_))));
    assert_eq!(source.enumerations, 0);
    assert_eq!(exit_code(&result), 1);
}

#[test]
fn test_pacing_brackets_the_job() {
    let mut source = bus();
    let printed = source.transport();
    let settings = settings_with(Path::new("/nonexistent"), 100, "");
    let request = LabelRequest::parse(LabelKind::Pantry, PANTRY).unwrap();

    run_job(&request, &settings, &mut source).unwrap();

    let settle = Duration::from_millis(100);
    let events = printed.events();
    assert_eq!(
        events[..4].to_vec(),
        vec![
            Event::Bytes(commands::init()),
            Event::Pause(settle * 2),
            Event::Bytes(text::reset_modes()),
            Event::Pause(settle * 2),
        ]
    );
    let n = events.len();
    assert_eq!(
        events[n - 4..].to_vec(),
        vec![
            Event::Bytes(b"\n\n".to_vec()),
            Event::Bytes(commands::cut_full_feed()),
            Event::Pause(settle * 3),
            Event::Close,
        ]
    );

    // Every mode change has a settle pause right before it.
    for (i, event) in events.iter().enumerate().skip(1) {
        if let Event::Bytes(b) = event {
            if b.as_slice() == text::bold(true).as_slice() {
                assert_eq!(events[i - 1], Event::Pause(settle));
            }
        }
    }
}

#[test]
fn test_pantry_direct_layout() {
    let mut source = bus();
    let printed = source.transport();
    let request = LabelRequest::parse(LabelKind::Pantry, PANTRY).unwrap();

    run_job(&request, &settings(), &mut source).unwrap();

    let bytes = printed.bytes();
    let mut bold_line = text::print_mode(text::TextSize::DoubleHeightWidth);
    bold_line.extend(text::bold(true));
    bold_line.extend(b"Organic Whole");
    assert!(contains(&bytes, &bold_line));
    assert!(contains(&bytes, b"Wheat Flour"));
    assert!(contains(&bytes, b"Jul 6, 2025"));
    assert_eq!(count(&bytes, &[0xDC; 40]), 2);
    assert_eq!(printed.cut_count(), 1);
}

#[test]
fn test_pantry_raster_strategy() {
    let mut source = bus();
    let printed = source.transport();
    let settings = settings_with(Path::new("/nonexistent"), 0, "rendering:\n  pantry: raster\n");
    let request = LabelRequest::parse(LabelKind::Pantry, PANTRY).unwrap();

    assert_eq!(run_job(&request, &settings, &mut source).unwrap(), JobOutcome::Styled);

    let bytes = printed.bytes();
    assert!(contains(&bytes, &RASTER_HEADER));
    assert!(contains(&bytes, &[0x1D, 0x76, 0x30, 0x00, 72, 0]));
    assert!(!contains(&bytes, b"Organic Whole"));
    assert_eq!(printed.cut_count(), 1);
}

#[test]
fn test_shopping_list_is_rasterized() {
    let mut source = bus();
    let printed = source.transport();
    let request = LabelRequest::parse(LabelKind::Shopping, SHOPPING).unwrap();

    assert_eq!(run_job(&request, &settings(), &mut source).unwrap(), JobOutcome::Styled);

    let bytes = printed.bytes();
    assert!(contains(&bytes, &[0x1D, 0x76, 0x30, 0x00, 72, 0]));
    assert!(!contains(&bytes, b"SHOPPING LIST"));
    assert_eq!(printed.cut_count(), 1);
}

#[test]
fn test_centered_drink_prints_side_channel_photo_first() {
    let assets = tempfile::tempdir().unwrap();
    let images = assets.path().join("drink_images");
    std::fs::create_dir_all(&images).unwrap();
    GrayImage::from_pixel(64, 32, Luma([0]))
        .save(images.join("chessie.bmp"))
        .unwrap();

    let mut source = bus();
    let printed = source.transport();
    let settings = settings_with(assets.path(), 0, "rendering:\n  drink: centered\n");
    let request = LabelRequest::parse(LabelKind::Drink, DRINK).unwrap();

    assert_eq!(run_job(&request, &settings, &mut source).unwrap(), JobOutcome::Styled);

    let bytes = printed.bytes();
    // 64-dot photo first, then the full-width label
    let photo = [0x1D, 0x76, 0x30, 0x00, 8, 0, 32, 0];
    let label = [0x1D, 0x76, 0x30, 0x00, 72, 0];
    let photo_at = bytes.windows(photo.len()).position(|w| w == photo).unwrap();
    let label_at = bytes.windows(label.len()).position(|w| w == label).unwrap();
    assert!(photo_at < label_at);
    assert_eq!(printed.cut_count(), 1);
}

#[test]
fn test_centered_drink_without_photo() {
    let mut source = bus();
    let printed = source.transport();
    let settings = settings_with(Path::new("/nonexistent"), 0, "rendering:\n  drink: centered\n");
    let request = LabelRequest::parse(LabelKind::Drink, DRINK).unwrap();

    assert_eq!(run_job(&request, &settings, &mut source).unwrap(), JobOutcome::Styled);
    assert!(!contains(&printed.bytes(), &[0x1D, 0x76, 0x30, 0x00, 8, 0]));
}

#[test]
fn test_bad_payload_never_reaches_engine() {
    let err = LabelRequest::parse(LabelKind::Drink, r#"{"drink_name": "Tea"}"#).unwrap_err();
    assert!(err.is_pre_session());
    assert_eq!(exit_code::<()>(&Err(err)), 2);
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_fallback_is_logged_to_scoped_sink() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || writer.clone())
        .finish();

    let mut source = bus();
    source.transport().fail_write_containing(b"Large Coffee");
    let request = LabelRequest::parse(LabelKind::Drink, DRINK).unwrap();

    let outcome = tracing::subscriber::with_default(subscriber, || {
        run_job(&request, &settings(), &mut source)
    })
    .unwrap();

    assert_eq!(outcome, JobOutcome::Fallback);
    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(text.contains("styled rendering failed"));
    assert!(text.contains("print job completed"));
    assert!(text.contains("BAR001"));
}

#[test]
fn test_failed_startup_reset_prints_fallback_and_cuts() {
    let mut source = bus();
    let printed = source.transport();
    printed.fail_write_containing(&text::reset_modes());
    let request = LabelRequest::parse(LabelKind::Drink, DRINK).unwrap();

    let result = run_job(&request, &settings(), &mut source);

    assert_eq!(exit_code(&result), 0);
    assert_eq!(result.unwrap(), JobOutcome::Fallback);
    let bytes = printed.bytes();
    assert!(bytes.starts_with(&commands::init()));
    assert!(contains(&bytes, b"DRINK LABEL\n"));
    assert_eq!(printed.cut_count(), 1);
    assert!(printed.is_closed());
}

#[test]
fn test_panic_in_styled_render_prints_fallback_and_cuts() {
    let mut source = bus();
    let printed = source.transport();
    printed.panic_write_containing(b"Chessie");
    let request = LabelRequest::parse(LabelKind::Drink, DRINK).unwrap();

    let outcome = run_job(&request, &settings(), &mut source).unwrap();

    assert_eq!(outcome, JobOutcome::Fallback);
    let bytes = printed.bytes();
    assert!(contains(&bytes, b"DRINK LABEL\n====================\nChessie\n"));
    assert_eq!(printed.cut_count(), 1);
    assert_eq!(printed.events().last(), Some(&Event::Close));
}

#[test]
fn test_panic_in_raster_job_prints_fallback_and_cuts() {
    let mut source = bus();
    let printed = source.transport();
    printed.panic_write_containing(&RASTER_HEADER);
    let request = LabelRequest::parse(LabelKind::Shopping, SHOPPING).unwrap();

    let outcome = run_job(&request, &settings(), &mut source).unwrap();

    assert_eq!(outcome, JobOutcome::Fallback);
    assert!(contains(&printed.bytes(), b"SHOPPING LIST\n"));
    assert!(contains(&printed.bytes(), b"3 items\n"));
    assert_eq!(printed.cut_count(), 1);
    assert_eq!(printed.events().last(), Some(&Event::Close));
}
