use serde::{Deserialize, Serialize};

use super::geometry::Wall;
use crate::error::PlanError;

/// Room footprint in feet, as estimated by the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingDirection {
    Left,
    Right,
    Sliding,
}

impl SwingDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SwingDirection::Left => "left",
            SwingDirection::Right => "right",
            SwingDirection::Sliding => "sliding",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Left, Self::Right, Self::Sliding]
            .into_iter()
            .find(|s| s.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorType {
    Sliding,
    Hinged,
}

impl DoorType {
    pub fn as_str(self) -> &'static str {
        match self {
            DoorType::Sliding => "sliding",
            DoorType::Hinged => "hinged",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Sliding, Self::Hinged]
            .into_iter()
            .find(|t| t.as_str() == name)
    }
}

/// Side of the opening a hinged door swings from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorOperation {
    Hinged(Hand),
    Sliding,
}

/// Wall-local extent of a feature, in feet from the wall's left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: f64,
    pub width: f64,
}

impl Placement {
    pub fn end(&self) -> f64 {
        self.position + self.width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoorFeature {
    pub placement: Placement,
    pub height: f64,
    pub distance_from_floor: f64,
    pub opens_to: Option<String>,
    pub swing_direction: Option<SwingDirection>,
    pub door_type: Option<DoorType>,
    pub notes: String,
}

impl DoorFeature {
    /// A door is sliding if either field says so. Any other door is hinged,
    /// and a missing swing direction is treated as a left-hand swing.
    pub fn operation(&self) -> DoorOperation {
        if self.door_type == Some(DoorType::Sliding)
            || self.swing_direction == Some(SwingDirection::Sliding)
        {
            return DoorOperation::Sliding;
        }
        match self.swing_direction {
            Some(SwingDirection::Right) => DoorOperation::Hinged(Hand::Right),
            _ => DoorOperation::Hinged(Hand::Left),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowFeature {
    pub placement: Placement,
    pub height: f64,
    pub distance_from_floor: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosetFeature {
    pub placement: Placement,
    pub height: f64,
    pub distance_from_floor: f64,
    /// Depth into the room in feet. Absent means the style default.
    pub depth: Option<f64>,
    pub door_type: Option<DoorType>,
    pub opens_to: Option<String>,
    pub notes: String,
}

impl ClosetFeature {
    pub fn depth_or(&self, default: f64) -> f64 {
        self.depth.unwrap_or(default)
    }

    pub fn is_sliding(&self) -> bool {
        self.door_type == Some(DoorType::Sliding)
    }
}

/// The loosely-typed feature record as stored and exchanged. Enumerated
/// fields stay strings here so records of unknown types survive whatever
/// values they carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub position: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub distance_from_floor: f64,
    #[serde(default)]
    pub opens_to: Option<String>,
    #[serde(default)]
    pub swing_direction: Option<String>,
    #[serde(default)]
    pub door_type: Option<String>,
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

/// A wall feature. Records whose `type` is not recognised are kept as
/// `Unsupported` so they survive a round trip, and are skipped when drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeatureRecord", into = "FeatureRecord")]
pub enum Feature {
    Door(DoorFeature),
    Window(WindowFeature),
    Closet(ClosetFeature),
    Unsupported(Box<FeatureRecord>),
}

impl Feature {
    pub fn kind(&self) -> &str {
        match self {
            Feature::Door(_) => "door",
            Feature::Window(_) => "window",
            Feature::Closet(_) => "closet",
            Feature::Unsupported(record) => &record.kind,
        }
    }

    /// Placement of a drawable feature; `None` for unsupported ones.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            Feature::Door(door) => Some(&door.placement),
            Feature::Window(window) => Some(&window.placement),
            Feature::Closet(closet) => Some(&closet.placement),
            Feature::Unsupported(_) => None,
        }
    }
}

fn known_value<T>(
    record: &FeatureRecord,
    field: &'static str,
    value: Option<&str>,
    from_name: fn(&str) -> Option<T>,
) -> Result<Option<T>, PlanError> {
    value
        .map(|name| {
            from_name(name).ok_or_else(|| PlanError::UnknownFeatureValue {
                kind: record.kind.clone(),
                field,
                value: name.to_string(),
            })
        })
        .transpose()
}

impl TryFrom<FeatureRecord> for Feature {
    type Error = PlanError;

    fn try_from(record: FeatureRecord) -> Result<Self, Self::Error> {
        let placement = Placement {
            position: record.position,
            width: record.width,
        };
        let feature = match record.kind.as_str() {
            "door" => Feature::Door(DoorFeature {
                placement,
                height: record.height,
                distance_from_floor: record.distance_from_floor,
                swing_direction: known_value(
                    &record,
                    "swingDirection",
                    record.swing_direction.as_deref(),
                    SwingDirection::from_name,
                )?,
                door_type: known_value(
                    &record,
                    "doorType",
                    record.door_type.as_deref(),
                    DoorType::from_name,
                )?,
                opens_to: record.opens_to,
                notes: record.notes,
            }),
            "window" => Feature::Window(WindowFeature {
                placement,
                height: record.height,
                distance_from_floor: record.distance_from_floor,
                notes: record.notes,
            }),
            "closet" | "closet-door" => Feature::Closet(ClosetFeature {
                placement,
                height: record.height,
                distance_from_floor: record.distance_from_floor,
                depth: record.depth,
                door_type: known_value(
                    &record,
                    "doorType",
                    record.door_type.as_deref(),
                    DoorType::from_name,
                )?,
                opens_to: record.opens_to,
                notes: record.notes,
            }),
            _ => Feature::Unsupported(Box::new(record)),
        };
        Ok(feature)
    }
}

impl From<Feature> for FeatureRecord {
    fn from(feature: Feature) -> Self {
        match feature {
            Feature::Door(door) => FeatureRecord {
                kind: "door".to_string(),
                position: door.placement.position,
                width: door.placement.width,
                height: door.height,
                distance_from_floor: door.distance_from_floor,
                opens_to: door.opens_to,
                swing_direction: door.swing_direction.map(|s| s.as_str().to_string()),
                door_type: door.door_type.map(|t| t.as_str().to_string()),
                depth: None,
                notes: door.notes,
            },
            Feature::Window(window) => FeatureRecord {
                kind: "window".to_string(),
                position: window.placement.position,
                width: window.placement.width,
                height: window.height,
                distance_from_floor: window.distance_from_floor,
                opens_to: None,
                swing_direction: None,
                door_type: None,
                depth: None,
                notes: window.notes,
            },
            Feature::Closet(closet) => FeatureRecord {
                kind: "closet".to_string(),
                position: closet.placement.position,
                width: closet.placement.width,
                height: closet.height,
                distance_from_floor: closet.distance_from_floor,
                opens_to: closet.opens_to,
                swing_direction: None,
                door_type: closet.door_type.map(|t| t.as_str().to_string()),
                depth: closet.depth,
                notes: closet.notes,
            },
            Feature::Unsupported(record) => *record,
        }
    }
}

/// Features on each wall, ordered by their wall-local position as reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Walls {
    pub north: Vec<Feature>,
    pub east: Vec<Feature>,
    pub south: Vec<Feature>,
    pub west: Vec<Feature>,
}

impl Walls {
    pub fn get(&self, wall: Wall) -> &[Feature] {
        match wall {
            Wall::North => &self.north,
            Wall::East => &self.east,
            Wall::South => &self.south,
            Wall::West => &self.west,
        }
    }

    pub fn get_mut(&mut self, wall: Wall) -> &mut Vec<Feature> {
        match wall {
            Wall::North => &mut self.north,
            Wall::East => &mut self.east,
            Wall::South => &mut self.south,
            Wall::West => &mut self.west,
        }
    }

    /// Walls in north, east, south, west order.
    pub fn iter(&self) -> impl Iterator<Item = (Wall, &[Feature])> {
        Wall::ALL.into_iter().map(move |wall| (wall, self.get(wall)))
    }
}

/// Calibration hint reported alongside the analysis. Not used for drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub known_size: Option<f64>,
    #[serde(default)]
    pub detected_size: Option<f64>,
    #[serde(default)]
    pub scale_factor: Option<f64>,
}

/// A structured room analysis, as stored on a room record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAnalysis {
    pub dimensions: Dimensions,
    #[serde(default)]
    pub ceiling_height: f64,
    pub walls: Walls,
    #[serde(default)]
    pub reference_object: Option<ReferenceObject>,
    /// Model response this record was parsed from, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl RoomAnalysis {
    pub fn summary(&self) -> RoomSummary {
        let Dimensions {
            width,
            height,
            confidence,
        } = self.dimensions;
        RoomSummary {
            width,
            height,
            area: width * height,
            ceiling_height: self.ceiling_height,
            confidence_percent: (confidence.clamp(0.0, 1.0) * 100.0).round() as u8,
        }
    }
}

/// Headline figures shown next to a diagram during review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub ceiling_height: f64,
    pub confidence_percent: u8,
}
