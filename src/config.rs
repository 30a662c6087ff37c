//! # Settings
//!
//! The YAML file every invocation reads before touching a device.
//!
//! ```yaml
//! printers:
//!   shared:
//!     vendor_id: "0x04b8"
//!     product_id: "0x0202"
//!   bar:
//!     serial_number: "X5E1234"
//!     profile: "TM-L90"
//!     name: "Bar printer"
//!     scripts: [drinks]
//! printer:
//!   max_width: 576
//! fonts:
//!   path: /usr/share/fonts/truetype/dejavu/DejaVuSans.ttf
//!   size: 14
//! pdf_style:
//!   margins: 10
//!   line_height_ratio: 1.3
//!   paragraph_spacing: 6
//!   indent: 12
//!   padding: 4
//! safety_margins:
//!   percentage: 0.1
//!   minimum: 20
//! page_dimensions:
//!   width: 288
//! ```
//!
//! Every role other than `shared` is a printer. A printer serves the label
//! kinds named in its `scripts` list. Geometry in `pdf_style`,
//! `safety_margins` and `page_dimensions` is in points (1/72 in).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{LabelError, LabelResult};
use crate::layout::{DrinkStrategy, PantryStrategy};
use crate::printer::PrinterProfile;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub printers: PrinterRoles,
    pub printer: PrinterSettings,
    pub fonts: FontSettings,
    pub pdf_style: PdfStyle,
    pub safety_margins: SafetyMargins,
    pub page_dimensions: PageDimensions,
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub rendering: RenderingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrinterRoles {
    pub shared: SharedIds,
    #[serde(flatten)]
    pub roles: BTreeMap<String, RoleSettings>,
}

/// Hex strings, with or without `0x`.
#[derive(Debug, Clone, Deserialize)]
pub struct SharedIds {
    pub vendor_id: String,
    pub product_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleSettings {
    pub serial_number: String,
    pub profile: String,
    pub name: String,
    #[serde(default)]
    pub scripts: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrinterSettings {
    pub max_width: u32,
    /// Normal-width characters per line on the direct-text path
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_discovery_timeout_ms")]
    pub discovery_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontSettings {
    pub path: PathBuf,
    pub size: f32,
    #[serde(default)]
    pub bold_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PdfStyle {
    pub margins: f32,
    pub line_height_ratio: f32,
    pub paragraph_spacing: f32,
    /// Inset of shopping-list items from the left margin, in points
    pub indent: f32,
    pub padding: f32,
}

/// Extra page height: `max(content × percentage, minimum)`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SafetyMargins {
    /// Fraction of content height (0.1 = 10%)
    pub percentage: f32,
    pub minimum: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageDimensions {
    pub width: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathSettings {
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RenderingSettings {
    #[serde(default)]
    pub drink: DrinkStrategy,
    #[serde(default)]
    pub pantry: PantryStrategy,
}

fn default_columns() -> usize {
    32
}

fn default_settle_delay_ms() -> u64 {
    100
}

fn default_discovery_timeout_ms() -> u64 {
    2000
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

/// Parse a USB id such as `0x04b8`, `04B8` or `0X04b8`.
pub fn parse_hex_id(value: &str) -> Option<u16> {
    let digits = value
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u16::from_str_radix(digits, 16).ok()
}

impl Settings {
    /// Read, parse and validate a settings file.
    pub fn load(path: &Path) -> LabelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            LabelError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> LabelResult<Self> {
        let settings: Settings =
            serde_yaml::from_str(text).map_err(|e| LabelError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> LabelResult<()> {
        self.vendor_id()?;
        self.product_id()?;

        if self.printers.roles.is_empty() {
            return Err(LabelError::Config("no printers configured besides 'shared'".into()));
        }

        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
        for (role, printer) in &self.printers.roles {
            if printer.serial_number.trim().is_empty() {
                return Err(LabelError::Config(format!("printers.{}.serial_number is empty", role)));
            }
            for script in &printer.scripts {
                if let Some(other) = owners.insert(script.as_str(), role.as_str()) {
                    return Err(LabelError::Config(format!(
                        "script '{}' is assigned to both '{}' and '{}'",
                        script, other, role
                    )));
                }
            }
        }

        let positive = [
            ("printer.max_width", self.printer.max_width as f32),
            ("printer.columns", self.printer.columns as f32),
            ("fonts.size", self.fonts.size),
            ("pdf_style.line_height_ratio", self.pdf_style.line_height_ratio),
            ("page_dimensions.width", self.page_dimensions.width),
        ];
        for (key, value) in positive {
            if !(value > 0.0) {
                return Err(LabelError::Config(format!("{} must be positive", key)));
            }
        }

        if self.safety_margins.percentage < 0.0 || self.safety_margins.minimum < 0.0 {
            return Err(LabelError::Config("safety_margins must not be negative".into()));
        }
        if 2.0 * self.pdf_style.margins >= self.page_dimensions.width {
            return Err(LabelError::Config(
                "pdf_style.margins leave no room on the page".into(),
            ));
        }
        Ok(())
    }

    pub fn vendor_id(&self) -> LabelResult<u16> {
        let raw = &self.printers.shared.vendor_id;
        parse_hex_id(raw).ok_or_else(|| LabelError::Config(format!("bad vendor_id '{}'", raw)))
    }

    pub fn product_id(&self) -> LabelResult<u16> {
        let raw = &self.printers.shared.product_id;
        parse_hex_id(raw).ok_or_else(|| LabelError::Config(format!("bad product_id '{}'", raw)))
    }

    /// Resolve the printer whose `scripts` list names `script`.
    pub fn profile_for(&self, script: &str) -> LabelResult<PrinterProfile> {
        let printer = self
            .printers
            .roles
            .values()
            .find(|p| p.scripts.iter().any(|s| s == script))
            .ok_or_else(|| LabelError::Config(format!("no printer configured for '{}'", script)))?;

        Ok(PrinterProfile {
            vendor_id: self.vendor_id()?,
            product_id: self.product_id()?,
            serial_number: printer.serial_number.clone(),
            profile_name: printer.profile.clone(),
            role: script.to_string(),
            display_name: printer.name.clone(),
            max_width_dots: self.printer.max_width,
        })
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.printer.settle_delay_ms)
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.printer.discovery_timeout_ms)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"
printers:
  shared:
    vendor_id: "0x04b8"
    product_id: "0x0202"
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
  settle_delay_ms: 0
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
"#;

    #[test]
    fn test_parse_hex_id() {
        assert_eq!(parse_hex_id("0x04b8"), Some(0x04b8));
        assert_eq!(parse_hex_id("04B8"), Some(0x04b8));
        assert_eq!(parse_hex_id("0X0202"), Some(0x0202));
        assert_eq!(parse_hex_id("zz"), None);
        assert_eq!(parse_hex_id("0x12345"), None);
    }

    #[test]
    fn test_sample_loads_with_defaults() {
        let settings = Settings::from_yaml(SAMPLE).unwrap();
        assert_eq!(settings.printer.columns, 32);
        assert_eq!(settings.printer.discovery_timeout_ms, 2000);
        assert_eq!(settings.settle_delay(), Duration::ZERO);
        assert_eq!(settings.paths.assets_dir, PathBuf::from("assets"));
        assert_eq!(settings.rendering.drink, DrinkStrategy::Stylized);
        assert_eq!(settings.rendering.pantry, PantryStrategy::Direct);
    }

    #[test]
    fn test_profile_for_script() {
        let settings = Settings::from_yaml(SAMPLE).unwrap();
        let profile = settings.profile_for("shopping").unwrap();
        assert_eq!(profile.role, "shopping");
        assert_eq!(profile.serial_number, "KIT002");
        assert_eq!(profile.vendor_id, 0x04b8);
        assert_eq!(profile.max_width_dots, 576);
    }

    #[test]
    fn test_unknown_script_is_config_error() {
        let settings = Settings::from_yaml(SAMPLE).unwrap();
        assert!(matches!(
            settings.profile_for("receipts"),
            Err(LabelError::Config(_))
        ));
    }

    #[test]
    fn test_missing_section_is_config_error() {
        let text = SAMPLE.replace("page_dimensions:\n  width: 288\n", "");
        assert!(matches!(Settings::from_yaml(&text), Err(LabelError::Config(_))));
    }

    #[test]
    fn test_bad_vendor_id_rejected() {
        let text = SAMPLE.replace("\"0x04b8\"", "\"epson\"");
        assert!(matches!(Settings::from_yaml(&text), Err(LabelError::Config(_))));
    }

    #[test]
    fn test_script_under_two_roles_rejected() {
        let text = SAMPLE.replace("scripts: [drinks]", "scripts: [drinks, pantry]");
        let err = Settings::from_yaml(&text).unwrap_err();
        assert!(err.to_string().contains("pantry"));
    }

    #[test]
    fn test_rendering_strategies_parse() {
        let text = format!("{}rendering:\n  drink: centered\n  pantry: raster\n", SAMPLE);
        let settings = Settings::from_yaml(&text).unwrap();
        assert_eq!(settings.rendering.drink, DrinkStrategy::Centered);
        assert_eq!(settings.rendering.pantry, PantryStrategy::Raster);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, LabelError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, SAMPLE).unwrap();
        assert!(Settings::load(&path).is_ok());
    }
}
