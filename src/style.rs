use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

const PIXELS_PER_FOOT: f64 = 20.0;
const MARGIN: f64 = 40.0;
const WALL_WIDTH: f64 = 4.0;
const GAP_OVERDRAW: f64 = 2.0;
const PANE_OFFSET: f64 = 3.0;
const SLIDING_OFFSET: f64 = 3.0;
const DIMENSION_OFFSET: f64 = 20.0;
const DEFAULT_CLOSET_DEPTH: f64 = 2.0;

const WALL_COLOR: &str = "#000";
const GAP_COLOR: &str = "#fff";
const SYMBOL_COLOR: &str = "#000";
const LABEL_COLOR: &str = "#333";
const DIMENSION_COLOR: &str = "#666";

const DOOR_STROKE_WIDTH: f64 = 1.0;
const SLIDING_STROKE_WIDTH: f64 = 1.5;
const PANE_STROKE_WIDTH: f64 = 1.0;
const CLOSET_STROKE_WIDTH: f64 = 1.0;
const CLOSET_DASH: &str = "4,2";

const FONT_FAMILY: &str = "Arial, sans-serif";
const LABEL_FONT_SIZE: f64 = 12.0;
const DIMENSION_FONT_SIZE: f64 = 11.0;

const BUILTIN_STYLES: &[(&str, &str)] = &[
    ("blueprint", include_str!("../styles/blueprint.toml")),
    ("classic", include_str!("../styles/classic.toml")),
];

/// Drawing parameters for floor-plan diagrams. Every field has a default,
/// so a style file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStyle {
    /// Uniform scale for both axes; recorded on the diagram root.
    #[serde(default = "default_pixels_per_foot")]
    pub pixels_per_foot: f64,
    /// Space around the room outline for the dimension annotations.
    #[serde(default = "default_margin")]
    pub margin: f64,
    #[serde(default = "default_wall_width")]
    pub wall_width: f64,
    /// How much wider than the wall an opening's erasure line is drawn.
    #[serde(default = "default_gap_overdraw")]
    pub gap_overdraw: f64,
    #[serde(default = "default_pane_offset")]
    pub pane_offset: f64,
    #[serde(default = "default_sliding_offset")]
    pub sliding_offset: f64,
    #[serde(default = "default_dimension_offset")]
    pub dimension_offset: f64,
    #[serde(default = "default_closet_depth")]
    pub default_closet_depth: f64,

    #[serde(default)]
    pub background: Option<String>,
    #[serde(default = "default_wall_color")]
    pub wall_color: String,
    #[serde(default = "default_gap_color")]
    pub gap_color: String,
    #[serde(default = "default_symbol_color")]
    pub symbol_color: String,

    #[serde(default = "default_door_stroke_width")]
    pub door_stroke_width: f64,
    #[serde(default = "default_sliding_stroke_width")]
    pub sliding_stroke_width: f64,
    #[serde(default = "default_pane_stroke_width")]
    pub pane_stroke_width: f64,
    #[serde(default = "default_closet_stroke_width")]
    pub closet_stroke_width: f64,
    #[serde(default = "default_closet_dash")]
    pub closet_dash: String,

    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,
    #[serde(default = "default_label_color")]
    pub label_color: String,
    #[serde(default = "default_dimension_font_size")]
    pub dimension_font_size: f64,
    #[serde(default = "default_dimension_color")]
    pub dimension_color: String,
}

fn default_pixels_per_foot() -> f64 {
    PIXELS_PER_FOOT
}
fn default_margin() -> f64 {
    MARGIN
}
fn default_wall_width() -> f64 {
    WALL_WIDTH
}
fn default_gap_overdraw() -> f64 {
    GAP_OVERDRAW
}
fn default_pane_offset() -> f64 {
    PANE_OFFSET
}
fn default_sliding_offset() -> f64 {
    SLIDING_OFFSET
}
fn default_dimension_offset() -> f64 {
    DIMENSION_OFFSET
}
fn default_closet_depth() -> f64 {
    DEFAULT_CLOSET_DEPTH
}
fn default_wall_color() -> String {
    WALL_COLOR.to_string()
}
fn default_gap_color() -> String {
    GAP_COLOR.to_string()
}
fn default_symbol_color() -> String {
    SYMBOL_COLOR.to_string()
}
fn default_door_stroke_width() -> f64 {
    DOOR_STROKE_WIDTH
}
fn default_sliding_stroke_width() -> f64 {
    SLIDING_STROKE_WIDTH
}
fn default_pane_stroke_width() -> f64 {
    PANE_STROKE_WIDTH
}
fn default_closet_stroke_width() -> f64 {
    CLOSET_STROKE_WIDTH
}
fn default_closet_dash() -> String {
    CLOSET_DASH.to_string()
}
fn default_font_family() -> String {
    FONT_FAMILY.to_string()
}
fn default_label_font_size() -> f64 {
    LABEL_FONT_SIZE
}
fn default_label_color() -> String {
    LABEL_COLOR.to_string()
}
fn default_dimension_font_size() -> f64 {
    DIMENSION_FONT_SIZE
}
fn default_dimension_color() -> String {
    DIMENSION_COLOR.to_string()
}

impl Default for PlanStyle {
    fn default() -> Self {
        Self {
            pixels_per_foot: PIXELS_PER_FOOT,
            margin: MARGIN,
            wall_width: WALL_WIDTH,
            gap_overdraw: GAP_OVERDRAW,
            pane_offset: PANE_OFFSET,
            sliding_offset: SLIDING_OFFSET,
            dimension_offset: DIMENSION_OFFSET,
            default_closet_depth: DEFAULT_CLOSET_DEPTH,

            background: None,
            wall_color: WALL_COLOR.to_string(),
            gap_color: GAP_COLOR.to_string(),
            symbol_color: SYMBOL_COLOR.to_string(),

            door_stroke_width: DOOR_STROKE_WIDTH,
            sliding_stroke_width: SLIDING_STROKE_WIDTH,
            pane_stroke_width: PANE_STROKE_WIDTH,
            closet_stroke_width: CLOSET_STROKE_WIDTH,
            closet_dash: CLOSET_DASH.to_string(),

            font_family: FONT_FAMILY.to_string(),
            label_font_size: LABEL_FONT_SIZE,
            label_color: LABEL_COLOR.to_string(),
            dimension_font_size: DIMENSION_FONT_SIZE,
            dimension_color: DIMENSION_COLOR.to_string(),
        }
    }
}

impl PlanStyle {
    pub fn from_builtin(name: &str) -> Result<Self, PlanError> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        let content = BUILTIN_STYLES
            .iter()
            .find(|(n, _)| *n == normalized)
            .map(|(_, c)| *c)
            .ok_or_else(|| PlanError::UnknownStyle {
                name: name.to_string(),
                available: Self::list_builtins().join(", "),
            })?;
        Self::from_toml(content)
    }

    pub fn list_builtins() -> Vec<&'static str> {
        BUILTIN_STYLES.iter().map(|(n, _)| *n).collect()
    }

    pub fn from_toml(content: &str) -> Result<Self, PlanError> {
        let style: PlanStyle =
            toml::from_str(content).map_err(|e| PlanError::StyleParse(e.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    pub fn from_yaml(content: &str) -> Result<Self, PlanError> {
        let style: PlanStyle =
            serde_yaml::from_str(content).map_err(|e| PlanError::StyleParse(e.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    /// Load a style file. `.yaml`/`.yml` files are read as YAML, anything
    /// else as TOML.
    pub fn from_file(path: &Path) -> Result<Self, PlanError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PlanError::StyleParse(format!("{}: {}", path.display(), e)))?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if !(self.pixels_per_foot.is_finite() && self.pixels_per_foot > 0.0) {
            return Err(PlanError::InvalidStyle(format!(
                "pixels_per_foot must be positive, got {}",
                self.pixels_per_foot
            )));
        }

        let lengths = [
            ("margin", self.margin),
            ("wall_width", self.wall_width),
            ("gap_overdraw", self.gap_overdraw),
            ("pane_offset", self.pane_offset),
            ("sliding_offset", self.sliding_offset),
            ("dimension_offset", self.dimension_offset),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PlanError::InvalidStyle(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if !(self.default_closet_depth.is_finite() && self.default_closet_depth > 0.0) {
            return Err(PlanError::InvalidStyle(format!(
                "default_closet_depth must be positive, got {}",
                self.default_closet_depth
            )));
        }

        Ok(())
    }

    /// Stroke width of the line that erases the wall across an opening.
    pub fn gap_width(&self) -> f64 {
        self.wall_width + self.gap_overdraw
    }
}
