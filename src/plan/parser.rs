use serde::{Deserialize, Deserializer};

use super::geometry::Wall;
use super::types::{
    ClosetFeature, Dimensions, Feature, FeatureRecord, ReferenceObject, RoomAnalysis, Walls,
};
use crate::error::PlanError;

/// Snake_case analysis response for a realistic 12 x 14 ft bedroom.
pub const SAMPLE_RESPONSE: &str = include_str!("../../samples/bedroom.json");

/// Slack allowed when checking that a feature fits on its wall, in feet.
const CONTAINMENT_TOLERANCE_FT: f64 = 1e-6;

/// Decode a stored analysis record (camelCase schema).
pub fn parse_room_analysis(json: &str) -> Result<RoomAnalysis, PlanError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode the analysis model's raw snake_case response into the stored
/// schema. Missing numbers become 0 and a `null` wall list becomes empty,
/// but every wall key must be present.
pub fn parse_analysis_response(json: &str) -> Result<RoomAnalysis, PlanError> {
    let raw: RawResponse = serde_json::from_str(json)?;

    let mut walls = Walls::default();
    for (wall, features) in [
        (Wall::North, raw.walls.north),
        (Wall::East, raw.walls.east),
        (Wall::South, raw.walls.south),
        (Wall::West, raw.walls.west),
    ] {
        *walls.get_mut(wall) = features
            .into_iter()
            .map(RawFeature::into_feature)
            .collect::<Result<_, _>>()?;
    }

    Ok(RoomAnalysis {
        dimensions: Dimensions {
            width: raw.dimensions.width_ft,
            height: raw.dimensions.height_ft,
            confidence: raw.dimensions.confidence.unwrap_or(0.0),
        },
        ceiling_height: raw.ceiling_height_ft.unwrap_or(0.0),
        walls,
        reference_object: raw.reference_object.map(|r| ReferenceObject {
            kind: r.kind,
            known_size: r.known_height_inches,
            detected_size: None,
            scale_factor: None,
        }),
        raw_response: Some(json.to_string()),
    })
}

/// The built-in sample analysis, parsed.
pub fn sample_analysis() -> Result<RoomAnalysis, PlanError> {
    parse_analysis_response(SAMPLE_RESPONSE)
}

/// Check everything the renderer relies on. Unsupported features are not
/// checked since they are never drawn.
pub fn validate_analysis(analysis: &RoomAnalysis) -> Result<(), PlanError> {
    let Dimensions { width, height, .. } = analysis.dimensions;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(PlanError::InvalidDimensions { width, height });
    }

    for (wall, features) in analysis.walls.iter() {
        let wall_length = wall.length_ft(&analysis.dimensions);

        for (index, feature) in features.iter().enumerate() {
            let Some(placement) = feature.placement() else {
                continue;
            };

            if !(placement.width.is_finite() && placement.width > 0.0) {
                return Err(PlanError::InvalidFeatureWidth {
                    wall,
                    index,
                    width: placement.width,
                });
            }
            if !(placement.position.is_finite() && placement.position >= 0.0) {
                return Err(PlanError::NegativePosition {
                    wall,
                    index,
                    position: placement.position,
                });
            }
            if placement.end() > wall_length + CONTAINMENT_TOLERANCE_FT {
                return Err(PlanError::FeatureOutOfRange {
                    wall,
                    index,
                    position: placement.position,
                    width: placement.width,
                    wall_length,
                });
            }

            if let Feature::Closet(ClosetFeature {
                depth: Some(depth), ..
            }) = feature
            {
                if !(depth.is_finite() && *depth > 0.0) {
                    return Err(PlanError::InvalidClosetDepth {
                        wall,
                        index,
                        depth: *depth,
                    });
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    dimensions: RawDimensions,
    ceiling_height_ft: Option<f64>,
    walls: RawWalls,
    reference_object: Option<RawReference>,
}

#[derive(Debug, Deserialize)]
struct RawDimensions {
    width_ft: f64,
    height_ft: f64,
    confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawWalls {
    #[serde(deserialize_with = "nullable_list")]
    north: Vec<RawFeature>,
    #[serde(deserialize_with = "nullable_list")]
    east: Vec<RawFeature>,
    #[serde(deserialize_with = "nullable_list")]
    south: Vec<RawFeature>,
    #[serde(deserialize_with = "nullable_list")]
    west: Vec<RawFeature>,
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<RawFeature>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawFeature>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(rename = "type")]
    kind: String,
    position_ft: Option<f64>,
    width_ft: Option<f64>,
    height_ft: Option<f64>,
    distance_from_floor_ft: Option<f64>,
    opens_to: Option<String>,
    swing_direction: Option<String>,
    door_type: Option<String>,
    depth_ft: Option<f64>,
    notes: Option<String>,
}

impl RawFeature {
    fn into_feature(self) -> Result<Feature, PlanError> {
        Feature::try_from(FeatureRecord {
            kind: self.kind,
            position: self.position_ft.unwrap_or(0.0),
            width: self.width_ft.unwrap_or(0.0),
            height: self.height_ft.unwrap_or(0.0),
            distance_from_floor: self.distance_from_floor_ft.unwrap_or(0.0),
            opens_to: self.opens_to,
            swing_direction: self.swing_direction,
            door_type: self.door_type,
            depth: self.depth_ft,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawReference {
    #[serde(rename = "type")]
    kind: String,
    known_height_inches: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::types::{DoorOperation, Hand};

    fn analysis_with(wall: Wall, feature: &str) -> RoomAnalysis {
        let mut walls = serde_json::json!({"north": [], "east": [], "south": [], "west": []});
        walls[wall.name()] = serde_json::from_str(&format!("[{feature}]")).unwrap();
        let doc = serde_json::json!({
            "dimensions": {"width": 12.0, "height": 14.0, "confidence": 0.7},
            "ceilingHeight": 8.0,
            "walls": walls,
        });
        parse_room_analysis(&doc.to_string()).unwrap()
    }

    #[test]
    fn raw_response_skips_unknown_types_with_unknown_values() {
        let json = r#"{
            "dimensions": {"width_ft": 10, "height_ft": 10},
            "walls": {
                "north": [{"type": "skylight", "position_ft": 1, "width_ft": 2, "door_type": "pocket"}],
                "east": null, "south": [], "west": []
            }
        }"#;
        let analysis = parse_analysis_response(json).unwrap();
        assert_eq!(analysis.walls.north[0].kind(), "skylight");
        validate_analysis(&analysis).unwrap();
    }

    #[test]
    fn sample_response_parses_into_four_walls() {
        let analysis = sample_analysis().unwrap();
        assert_eq!(analysis.dimensions.width, 12.0);
        assert_eq!(analysis.dimensions.height, 14.0);
        assert_eq!(analysis.ceiling_height, 8.0);
        assert_eq!(analysis.walls.north.len(), 1);
        assert_eq!(analysis.walls.east.len(), 1);
        assert_eq!(analysis.walls.south.len(), 1);
        assert_eq!(analysis.walls.west.len(), 1);
        assert!(analysis.raw_response.is_some());

        let reference = analysis.reference_object.as_ref().unwrap();
        assert_eq!(reference.kind, "door");
        assert_eq!(reference.known_size, Some(80.0));

        match &analysis.walls.south[0] {
            Feature::Door(door) => {
                assert_eq!(door.placement.position, 8.0);
                assert_eq!(door.placement.width, 2.67);
                assert_eq!(door.opens_to.as_deref(), Some("hallway"));
                assert_eq!(door.operation(), DoorOperation::Hinged(Hand::Right));
            }
            other => panic!("expected door, got {other:?}"),
        }

        validate_analysis(&analysis).unwrap();
    }

    #[test]
    fn raw_response_tolerates_null_lists_and_missing_numbers() {
        let json = r#"{
            "dimensions": {"width_ft": 10, "height_ft": 9},
            "walls": {"north": null, "east": [], "south": [{"type": "window"}], "west": []}
        }"#;
        let analysis = parse_analysis_response(json).unwrap();
        assert!(analysis.walls.north.is_empty());
        assert_eq!(analysis.ceiling_height, 0.0);
        assert_eq!(analysis.walls.south[0].placement().unwrap().width, 0.0);
        assert!(analysis.reference_object.is_none());
    }

    #[test]
    fn raw_response_requires_every_wall_key() {
        let json = r#"{
            "dimensions": {"width_ft": 10, "height_ft": 9},
            "walls": {"north": [], "east": [], "south": []}
        }"#;
        let err = parse_analysis_response(json).unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
        assert!(err.to_string().contains("west"), "{err}");
    }

    #[test]
    fn missing_dimensions_is_a_parse_error() {
        let json = r#"{"walls": {"north": [], "east": [], "south": [], "west": []}}"#;
        assert!(matches!(parse_room_analysis(json), Err(PlanError::Parse(_))));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let mut analysis = analysis_with(Wall::North, r#"{"type":"window","position":1,"width":2}"#);
        analysis.dimensions.height = 0.0;
        assert!(matches!(
            validate_analysis(&analysis),
            Err(PlanError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rejects_zero_width_feature() {
        let analysis = analysis_with(Wall::East, r#"{"type":"door","position":1,"width":0}"#);
        match validate_analysis(&analysis) {
            Err(PlanError::InvalidFeatureWidth { wall, index, .. }) => {
                assert_eq!(wall, Wall::East);
                assert_eq!(index, 0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_position() {
        let analysis = analysis_with(Wall::West, r#"{"type":"window","position":-0.5,"width":2}"#);
        assert!(matches!(
            validate_analysis(&analysis),
            Err(PlanError::NegativePosition { wall: Wall::West, .. })
        ));
    }

    #[test]
    fn rejects_span_past_wall_end_using_the_right_wall_length() {
        // North is 12 ft long; 11 + 2 overruns it.
        let north = analysis_with(Wall::North, r#"{"type":"window","position":11,"width":2}"#);
        match validate_analysis(&north) {
            Err(PlanError::FeatureOutOfRange { wall_length, .. }) => assert_eq!(wall_length, 12.0),
            other => panic!("unexpected {other:?}"),
        }

        // East is 14 ft long, so the same span fits.
        let east = analysis_with(Wall::East, r#"{"type":"window","position":11,"width":2}"#);
        validate_analysis(&east).unwrap();
    }

    #[test]
    fn span_ending_exactly_at_the_corner_is_accepted() {
        let analysis = analysis_with(Wall::South, r#"{"type":"door","position":9.33,"width":2.67}"#);
        validate_analysis(&analysis).unwrap();
    }

    #[test]
    fn rejects_non_positive_closet_depth() {
        let analysis =
            analysis_with(Wall::North, r#"{"type":"closet","position":0,"width":4,"depth":0}"#);
        assert!(matches!(
            validate_analysis(&analysis),
            Err(PlanError::InvalidClosetDepth { .. })
        ));
    }

    #[test]
    fn unsupported_features_are_not_validated() {
        let analysis =
            analysis_with(Wall::North, r#"{"type":"skylight","position":-4,"width":40}"#);
        validate_analysis(&analysis).unwrap();
    }
}
