//! Configuration loading and typed config structures.
//!
//! The configuration lives in `cellrain-config.yaml` in the working
//! directory (or wherever `CELLRAIN_CONFIG` points). Every field has a
//! default, so an empty or missing file yields a runnable setup: a
//! 45x35 Sierpinski triangle drawn near-black on a transparent layer.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cellrain_types::{ColorPreset, ColorSpec, RulePreset};
use serde::Deserialize;

use crate::color::{ColorMap, DEFAULT_MAX_INTENSITY};
use crate::error::AutomatonError;
use crate::pattern::{Line, PatternSet};
use crate::runner::RunBounds;

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "cellrain-config.yaml";

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_ENV: &str = "CELLRAIN_CONFIG";

/// Environment variable overriding `display.host`.
pub const DISPLAY_HOST_ENV: &str = "FT_DISPLAY";

/// Highest display layer accepted by the display.
pub const MAX_LAYER: u8 = 15;

/// The configuration file to read.
///
/// `explicit` is the value of [`CONFIG_PATH_ENV`], if any. An unset or
/// empty value selects [`DEFAULT_CONFIG_PATH`].
pub fn config_path(explicit: Option<&OsStr>) -> PathBuf {
    explicit
        .filter(|path| !path.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an impossible setup.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

impl From<AutomatonError> for ConfigError {
    fn from(err: AutomatonError) -> Self {
        Self::Invalid {
            reason: err.to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CellrainConfig {
    /// Where and how big the display canvas is.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Rule, seed, and colours.
    #[serde(default)]
    pub automaton: AutomatonConfig,

    /// Frame cadence and run length.
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CellrainConfig {
    /// Load configuration from a YAML file.
    ///
    /// `FT_DISPLAY` overrides `display.host` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let host = std::env::var(DISPLAY_HOST_ENV).ok();
        Self::load(path, host.as_deref())
    }

    /// Load configuration from a YAML file with an explicit host override.
    ///
    /// A `None` or empty `host_override` keeps the host from the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn load(path: &Path, host_override: Option<&str>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.display.apply_host_override(host_override);
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Check the whole configuration before anything is built from it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.display.validate()?;
        self.automaton.pattern_set()?;
        self.automaton.seed_line(self.display.width)?;
        self.run.bounds()?;
        Ok(())
    }
}

/// Display endpoint and canvas geometry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Display hostname.
    #[serde(default = "default_host")]
    pub host: String,

    /// Display UDP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Canvas width in pixels. Also the automaton line width.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Canvas height in pixels. How many generations stay visible.
    #[serde(default = "default_height")]
    pub height: usize,

    /// Display layer (0-15). 0 is the opaque background.
    #[serde(default = "default_layer")]
    pub layer: u8,

    /// Horizontal offset on the display.
    #[serde(default)]
    pub x_offset: i32,

    /// Vertical offset on the display.
    #[serde(default)]
    pub y_offset: i32,
}

impl DisplayConfig {
    /// Override the host with `FT_DISPLAY` when it is set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        let host = std::env::var(DISPLAY_HOST_ENV).ok();
        self.apply_host_override(host.as_deref());
    }

    /// Replace the host unless `host` is `None` or empty.
    pub fn apply_host_override(&mut self, host: Option<&str>) {
        if let Some(host) = host.filter(|host| !host.is_empty()) {
            host.clone_into(&mut self.host);
        }
    }

    /// Check geometry and layer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero-sized canvas or a layer
    /// above [`MAX_LAYER`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "display must be at least 1x1, got {}x{}",
                    self.width, self.height
                ),
            });
        }
        if self.layer > MAX_LAYER {
            return Err(ConfigError::Invalid {
                reason: format!("layer {} is outside 0-{MAX_LAYER}", self.layer),
            });
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            width: default_width(),
            height: default_height(),
            layer: default_layer(),
            x_offset: 0,
            y_offset: 0,
        }
    }
}

/// Rule, seed, and colour settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AutomatonConfig {
    /// Built-in rule. Ignored when `patterns` is set.
    #[serde(default)]
    pub rule: RulePreset,

    /// Explicit neighbourhoods, each a list of three booleans.
    #[serde(default)]
    pub patterns: Option<Vec<Vec<bool>>>,

    /// Value of the virtual cells beyond both ends of the line.
    #[serde(default)]
    pub pad_value: bool,

    /// Index of the single active seed cell. Defaults to `width / 2`.
    #[serde(default)]
    pub seed_index: Option<usize>,

    /// Built-in colour scheme.
    #[serde(default)]
    pub colors: ColorPreset,

    /// Override for the active colour.
    #[serde(default)]
    pub active: Option<ColorSpec>,

    /// Override for the inactive colour.
    #[serde(default)]
    pub inactive: Option<ColorSpec>,

    /// Highest channel value for random colours.
    #[serde(default = "default_max_intensity")]
    pub max_intensity: u8,

    /// Seed for random colours. Drawn from the OS when unset.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl AutomatonConfig {
    /// The rule to run: explicit patterns if given, otherwise the preset.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::Validation`] if an explicit pattern is not
    /// three cells wide.
    pub fn pattern_set(&self) -> Result<PatternSet, AutomatonError> {
        self.patterns
            .as_deref()
            .map_or_else(|| Ok(PatternSet::from_preset(self.rule)), PatternSet::new)
    }

    /// The colour map: preset colours with any explicit overrides applied.
    pub fn color_map(&self) -> ColorMap {
        let active = self.active.unwrap_or_else(|| self.colors.active());
        let inactive = self.inactive.unwrap_or_else(|| self.colors.inactive());
        let mut map = ColorMap::new(active, inactive).with_max_intensity(self.max_intensity);
        if let Some(seed) = self.rng_seed {
            map = map.with_seed(seed);
        }
        map
    }

    /// The seed line for a canvas `width` cells wide.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::Validation`] if `width` is zero or the
    /// seed index falls outside the line.
    pub fn seed_line(&self, width: usize) -> Result<Line, AutomatonError> {
        self.seed_index.map_or_else(
            || Line::centered(width),
            |index| Line::single(width, index),
        )
    }
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            rule: RulePreset::default(),
            patterns: None,
            pad_value: false,
            seed_index: None,
            colors: ColorPreset::default(),
            active: None,
            inactive: None,
            max_intensity: default_max_intensity(),
            rng_seed: None,
        }
    }
}

/// Frame cadence and run length.
///
/// A `duration_secs` of 0 and a `max_frames` of 0 both mean unlimited.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    /// Wall-clock seconds to run for (0 = unlimited).
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,

    /// Pause after each frame, in milliseconds.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,

    /// Frames to send before stopping (0 = unlimited).
    #[serde(default)]
    pub max_frames: u64,

    /// Blank the display when the run ends.
    #[serde(default)]
    pub clear_on_exit: bool,
}

impl RunConfig {
    /// Convert to loop bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `duration_secs` is negative or
    /// not finite.
    pub fn bounds(&self) -> Result<RunBounds, ConfigError> {
        let duration = Duration::try_from_secs_f64(self.duration_secs).map_err(|e| {
            ConfigError::Invalid {
                reason: format!("run.duration_secs {}: {e}", self.duration_secs),
            }
        })?;
        Ok(RunBounds {
            max_duration: (!duration.is_zero()).then_some(duration),
            max_frames: self.max_frames,
            frame_delay: Duration::from_millis(self.frame_delay_ms),
        })
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            frame_delay_ms: default_frame_delay_ms(),
            max_frames: 0,
            clear_on_exit: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "localhost".to_owned()
}

const fn default_port() -> u16 {
    1337
}

const fn default_width() -> usize {
    45
}

const fn default_height() -> usize {
    35
}

const fn default_layer() -> u8 {
    11
}

const fn default_max_intensity() -> u8 {
    DEFAULT_MAX_INTENSITY
}

const fn default_duration_secs() -> f64 {
    30.0
}

const fn default_frame_delay_ms() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cellrain_types::Rgb;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CellrainConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.display.port, 1337);
        assert_eq!(config.display.width, 45);
        assert_eq!(config.display.height, 35);
        assert_eq!(config.display.layer, 11);
        assert_eq!(config.automaton.rule, RulePreset::Triangle);
        assert_eq!(config.automaton.colors, ColorPreset::BlackOnTransparent);
        assert_eq!(config.automaton.max_intensity, 254);
        assert_eq!(config.run.frame_delay_ms, 30);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
display:
  host: "ft.noise"
  port: 1338
  width: 20
  height: 10
  layer: 3
  x_offset: 5
  y_offset: -2

automaton:
  rule: chaotic
  pad_value: true
  seed_index: 4
  colors: debug
  active: random
  inactive: [1, 2, 3]
  max_intensity: 200
  rng_seed: 99

run:
  duration_secs: 2.5
  frame_delay_ms: 50
  max_frames: 100
  clear_on_exit: true

logging:
  level: "debug"
"#;
        let config = CellrainConfig::parse(yaml).unwrap();

        assert_eq!(config.display.host, "ft.noise");
        assert_eq!(config.display.port, 1338);
        assert_eq!(config.display.y_offset, -2);
        assert_eq!(config.automaton.rule, RulePreset::Chaotic);
        assert!(config.automaton.pad_value);
        assert_eq!(config.automaton.colors, ColorPreset::HighContrast);
        assert_eq!(config.automaton.active, Some(ColorSpec::Random));
        assert_eq!(config.automaton.inactive, Some(ColorSpec::fixed(1, 2, 3)));
        assert!(config.run.clear_on_exit);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());

        let bounds = config.run.bounds().unwrap();
        assert_eq!(bounds.max_duration, Some(Duration::from_millis(2500)));
        assert_eq!(bounds.max_frames, 100);
        assert_eq!(bounds.frame_delay, Duration::from_millis(50));
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = CellrainConfig::parse("display:\n  width: 9\n").unwrap();
        assert_eq!(config.display.width, 9);
        assert_eq!(config.display.height, 35);
        assert_eq!(config.automaton.seed_line(9).unwrap().get(4), Some(true));
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(CellrainConfig::parse("").is_ok());
    }

    #[test]
    fn explicit_patterns_override_preset() {
        let yaml = "automaton:\n  rule: chaotic\n  patterns:\n    - [false, true, false]\n";
        let config = CellrainConfig::parse(yaml).unwrap();
        let set = config.automaton.pattern_set().unwrap();
        assert_eq!(set.patterns(), &[[false, true, false]]);
    }

    #[test]
    fn malformed_pattern_fails_validation() {
        let yaml = "automaton:\n  patterns:\n    - [true, true]\n";
        let config = CellrainConfig::parse(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn seed_outside_display_fails_validation() {
        let yaml = "display:\n  width: 8\nautomaton:\n  seed_index: 8\n";
        let config = CellrainConfig::parse(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn layer_out_of_range_fails_validation() {
        let config = CellrainConfig::parse("display:\n  layer: 16\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_duration_fails_validation() {
        let config = CellrainConfig::parse("run:\n  duration_secs: -1.0\n").unwrap();
        assert!(config.run.bounds().is_err());
    }

    #[test]
    fn zero_duration_means_unlimited() {
        let config = CellrainConfig::parse("run:\n  duration_secs: 0\n").unwrap();
        assert_eq!(config.run.bounds().unwrap().max_duration, None);
    }

    #[test]
    fn color_overrides_apply_over_preset() {
        let automaton = AutomatonConfig {
            colors: ColorPreset::HighContrast,
            inactive: Some(ColorSpec::fixed(7, 7, 7)),
            rng_seed: Some(1),
            ..AutomatonConfig::default()
        };
        let mut map = automaton.color_map();
        assert_eq!(map.resolve(true), Rgb::new(1, 255, 1));
        assert_eq!(map.resolve(false), Rgb::new(7, 7, 7));
    }

    #[test]
    fn unknown_preset_is_a_yaml_error() {
        let result = CellrainConfig::parse("automaton:\n  rule: rule110\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    fn write_temp_yaml(name: &str, yaml: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "cellrain-{name}-{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn host_override_replaces_file_host() {
        let path = write_temp_yaml("override", "display:\n  host: \"ft.noise\"\n");
        let config = CellrainConfig::load(&path, Some("wall.local")).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.display.host, "wall.local");
    }

    #[test]
    fn empty_or_missing_host_override_keeps_file_host() {
        let path = write_temp_yaml("keep", "display:\n  host: \"ft.noise\"\n  port: 1400\n");
        let empty = CellrainConfig::load(&path, Some("")).unwrap();
        let unset = CellrainConfig::load(&path, None).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(empty.display.host, "ft.noise");
        assert_eq!(unset.display.host, "ft.noise");
        assert_eq!(unset.display.port, 1400);
    }

    #[test]
    fn parse_ignores_host_environment() {
        let config = CellrainConfig::parse("display:\n  host: \"ft.noise\"\n").unwrap();
        assert_eq!(config.display.host, "ft.noise");
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("cellrain-does-not-exist.yaml");
        assert!(matches!(
            CellrainConfig::load(&path, None),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn config_path_prefers_explicit_value() {
        assert_eq!(config_path(None), PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(
            config_path(Some(OsStr::new(""))),
            PathBuf::from(DEFAULT_CONFIG_PATH)
        );
        assert_eq!(
            config_path(Some(OsStr::new("/etc/cellrain.yaml"))),
            PathBuf::from("/etc/cellrain.yaml")
        );
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(DEFAULT_CONFIG_PATH);
        if path.exists() {
            let config = CellrainConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
            assert!(config.unwrap().validate().is_ok());
        }
    }
}
