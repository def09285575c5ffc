mod features;
mod geometry;
mod inspect;
mod parser;
mod render;
mod types;

pub use features::{render_closet, render_door, render_window, sliding_glyph};
pub use geometry::{
    Axis, DoorSwing, Point, Rect, RoomFrame, Span, SpanEnd, Wall, door_swing, interior_rect,
    map_feature,
};
pub use inspect::{DiagramSummary, FeatureMarker, inspect_diagram};
pub use parser::{
    SAMPLE_RESPONSE, parse_analysis_response, parse_room_analysis, sample_analysis,
    validate_analysis,
};
pub use render::{
    Diagram, FeatureCounts, FeatureFragments, SkippedFeature, assemble_room, generate_diagram,
    generate_diagram_with,
};
pub use types::{
    ClosetFeature, Dimensions, DoorFeature, DoorOperation, DoorType, Feature, FeatureRecord, Hand,
    Placement, ReferenceObject, RoomAnalysis, RoomSummary, SwingDirection, Walls, WindowFeature,
};
