use serde::Serialize;

use super::features::{render_closet, render_door, render_window};
use super::geometry::{RoomFrame, Wall, map_feature};
use super::parser::validate_analysis;
use super::types::{Dimensions, Feature, RoomAnalysis};
use crate::error::PlanError;
use crate::style::PlanStyle;
use crate::xml::{escape_xml, fmt_exact, fmt_num};

/// Rendered feature markup, grouped by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureFragments {
    pub doors: Vec<String>,
    pub windows: Vec<String>,
    pub closets: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureCounts {
    pub doors: usize,
    pub windows: usize,
    pub closets: usize,
    pub skipped: usize,
}

/// A feature left out of the diagram because its type is not drawable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFeature {
    pub wall: Wall,
    pub index: usize,
    pub kind: String,
}

/// A generated diagram together with what went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub svg: String,
    pub counts: FeatureCounts,
    pub skipped: Vec<SkippedFeature>,
}

/// Render a room analysis with the default style.
pub fn generate_diagram(
    analysis: &RoomAnalysis,
    room_label: &str,
    room_id: &str,
) -> Result<String, PlanError> {
    generate_diagram_with(analysis, room_label, room_id, &PlanStyle::default())
        .map(|diagram| diagram.svg)
}

/// Render a room analysis into a complete SVG document.
///
/// The input is validated first; on any error nothing is rendered. Features
/// of unsupported types are skipped and reported in [`Diagram::skipped`].
/// The output depends only on the arguments.
pub fn generate_diagram_with(
    analysis: &RoomAnalysis,
    room_label: &str,
    room_id: &str,
    style: &PlanStyle,
) -> Result<Diagram, PlanError> {
    style.validate()?;
    validate_analysis(analysis)?;

    let frame = RoomFrame::new(&analysis.dimensions, style);
    if !(frame.view_width().is_finite() && frame.view_height().is_finite()) {
        return Err(PlanError::DiagramTooLarge {
            width: analysis.dimensions.width,
            height: analysis.dimensions.height,
            scale: frame.scale,
        });
    }

    let mut fragments = FeatureFragments::default();
    let mut skipped = Vec::new();

    for (wall, features) in analysis.walls.iter() {
        for (index, feature) in features.iter().enumerate() {
            match feature {
                Feature::Door(door) => {
                    let span = map_feature(&door.placement, wall, &frame);
                    fragments.doors.push(render_door(door, wall, &span, style));
                }
                Feature::Window(window) => {
                    let span = map_feature(&window.placement, wall, &frame);
                    fragments.windows.push(render_window(window, wall, &span, style));
                }
                Feature::Closet(closet) => {
                    let span = map_feature(&closet.placement, wall, &frame);
                    fragments.closets.push(render_closet(closet, wall, &span, style));
                }
                Feature::Unsupported(record) => {
                    crate::log::warn!(
                        wall = wall.name(),
                        index,
                        kind = record.kind.as_str(),
                        "skipping unsupported feature type"
                    );
                    skipped.push(SkippedFeature {
                        wall,
                        index,
                        kind: record.kind.clone(),
                    });
                }
            }
        }
    }

    let counts = FeatureCounts {
        doors: fragments.doors.len(),
        windows: fragments.windows.len(),
        closets: fragments.closets.len(),
        skipped: skipped.len(),
    };
    crate::log::debug!(
        room_id,
        doors = counts.doors,
        windows = counts.windows,
        closets = counts.closets,
        skipped = counts.skipped,
        "rendered room diagram"
    );

    let svg = assemble_room(
        &frame,
        &analysis.dimensions,
        room_label,
        room_id,
        &fragments,
        style,
    );

    Ok(Diagram {
        svg,
        counts,
        skipped,
    })
}

/// Compose the full document: outline, feature groups, label, dimensions.
pub fn assemble_room(
    frame: &RoomFrame,
    dimensions: &Dimensions,
    room_label: &str,
    room_id: &str,
    fragments: &FeatureFragments,
    style: &PlanStyle,
) -> String {
    let id = escape_xml(room_id);
    let label = escape_xml(room_label);
    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" data-room-id="{id}" data-room-label="{label}" data-scale="{}">
"#,
        fmt_num(frame.view_width()),
        fmt_num(frame.view_height()),
        fmt_exact(frame.scale),
    ));
    if let Some(background) = &style.background {
        svg.push_str(&format!(
            r#"  <rect class="background" x="0" y="0" width="{}" height="{}" fill="{}"/>
"#,
            fmt_num(frame.view_width()),
            fmt_num(frame.view_height()),
            escape_xml(background),
        ));
    }
    svg.push_str(&format!("  <g class=\"room\" data-room-id=\"{id}\">\n"));

    svg.push_str(&render_walls(frame, style));
    push_group(&mut svg, "doors", &fragments.doors);
    push_group(&mut svg, "windows", &fragments.windows);
    push_group(&mut svg, "closets", &fragments.closets);
    svg.push_str(&render_label(frame, &label, style));
    svg.push_str(&render_dimensions(frame, dimensions, style));

    svg.push_str("  </g>\n</svg>\n");
    svg
}

fn push_group(svg: &mut String, class: &str, fragments: &[String]) {
    svg.push_str(&format!("    <g class=\"{class}\">\n"));
    for fragment in fragments {
        svg.push_str(fragment);
    }
    svg.push_str("    </g>\n");
}

fn render_walls(frame: &RoomFrame, style: &PlanStyle) -> String {
    let corners = frame.corners();
    let mut svg = String::from("    <g class=\"walls\">\n");

    // Clockwise from the northwest corner.
    for (i, wall) in Wall::ALL.into_iter().enumerate() {
        let from = corners[i];
        let to = corners[(i + 1) % corners.len()];
        svg.push_str(&format!(
            r#"      <line class="wall wall-{wall}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" data-wall-type="exterior"/>
"#,
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y),
            escape_xml(&style.wall_color),
            fmt_num(style.wall_width),
        ));
    }

    svg.push_str("    </g>\n");
    svg
}

fn render_label(frame: &RoomFrame, escaped_label: &str, style: &PlanStyle) -> String {
    let center = frame.center();
    format!(
        r#"    <text class="room-label" x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-family="{}" font-size="{}" fill="{}">{escaped_label}</text>
"#,
        fmt_num(center.x),
        fmt_num(center.y),
        escape_xml(&style.font_family),
        fmt_num(style.label_font_size),
        escape_xml(&style.label_color),
    )
}

fn render_dimensions(frame: &RoomFrame, dimensions: &Dimensions, style: &PlanStyle) -> String {
    let center = frame.center();
    let width_x = fmt_num(center.x);
    let width_y = fmt_num(frame.bottom() + style.dimension_offset);
    let height_x = fmt_num(frame.right() + style.dimension_offset);
    let height_y = fmt_num(center.y);
    let font_family = escape_xml(&style.font_family);
    let color = escape_xml(&style.dimension_color);

    let mut svg = String::from("    <g class=\"dimensions\">\n");
    svg.push_str(&format!(
        r#"      <text class="dimension dimension-width" x="{width_x}" y="{width_y}" text-anchor="middle" font-family="{font_family}" font-size="{}" fill="{color}">{}'</text>
"#,
        fmt_num(style.dimension_font_size),
        fmt_num(dimensions.width),
    ));
    svg.push_str(&format!(
        r#"      <text class="dimension dimension-height" x="{height_x}" y="{height_y}" text-anchor="middle" font-family="{font_family}" font-size="{}" fill="{color}" transform="rotate(90, {height_x}, {height_y})">{}'</text>
"#,
        fmt_num(style.dimension_font_size),
        fmt_num(dimensions.height),
    ));
    svg.push_str("    </g>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::inspect::inspect_diagram;
    use crate::plan::parser::{parse_room_analysis, sample_analysis};

    fn analysis(walls: serde_json::Value) -> RoomAnalysis {
        let mut all = serde_json::json!({"north": [], "east": [], "south": [], "west": []});
        for (key, value) in walls.as_object().unwrap() {
            all[key] = value.clone();
        }
        let doc = serde_json::json!({
            "dimensions": {"width": 12.0, "height": 14.0, "confidence": 0.7},
            "ceilingHeight": 8.0,
            "walls": all,
        });
        parse_room_analysis(&doc.to_string()).unwrap()
    }

    #[test]
    fn empty_room_has_outline_label_and_dimensions() {
        let svg = generate_diagram(&analysis(serde_json::json!({})), "Office#1", "room_1").unwrap();

        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 320 360" data-room-id="room_1" data-room-label="Office#1" data-scale="20">"#
        ));
        assert!(svg.contains(r#"<line class="wall wall-north" x1="40" y1="40" x2="280" y2="40""#));
        assert!(svg.contains(r#"<line class="wall wall-east" x1="280" y1="40" x2="280" y2="320""#));
        assert!(svg.contains(r#"<line class="wall wall-south" x1="280" y1="320" x2="40" y2="320""#));
        assert!(svg.contains(r#"<line class="wall wall-west" x1="40" y1="320" x2="40" y2="40""#));
        assert!(svg.contains(r#"<text class="room-label" x="160" y="180""#));
        assert!(svg.contains(">Office#1</text>"));
        assert!(svg.contains(r#"x="160" y="340""#));
        assert!(svg.contains(">12'</text>"));
        assert!(svg.contains(r#"transform="rotate(90, 300, 180)">14'</text>"#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn groups_appear_in_fixed_order() {
        let svg = generate_diagram(&sample_analysis().unwrap(), "Bedroom#1", "room_1").unwrap();
        let walls = svg.find(r#"<g class="walls">"#).unwrap();
        let doors = svg.find(r#"<g class="doors">"#).unwrap();
        let windows = svg.find(r#"<g class="windows">"#).unwrap();
        let closets = svg.find(r#"<g class="closets">"#).unwrap();
        let label = svg.find(r#"class="room-label""#).unwrap();
        let dims = svg.find(r#"<g class="dimensions">"#).unwrap();
        assert!(walls < doors && doors < windows && windows < closets);
        assert!(closets < label && label < dims);
    }

    #[test]
    fn scenario_a_south_door_hinges_on_the_west_end() {
        let room = analysis(serde_json::json!({
            "south": [{"type": "door", "position": 8, "width": 2.67, "swingDirection": "right"}]
        }));
        let svg = generate_diagram(&room, "Bedroom#1", "room_a").unwrap();

        // South wall y = 320. Mirrored: x = 40 + 240 - 160 - 53.4 = 66.6 .. 120.
        assert_eq!(svg.matches(r#"<g class="door" data-wall="south""#).count(), 1);
        assert!(svg.contains(
            r##"<line class="wall-gap" x1="66.6" y1="320" x2="120" y2="320" stroke="#fff" stroke-width="6"/>"##
        ));
        // Hinge at the west end (66.6, 320); the arc runs from the free east
        // end up to one door width into the room above the hinge.
        assert!(svg.contains(r#"d="M 120 320 A 53.4 53.4 0 0 1 66.6 266.6""#), "{svg}");
    }

    #[test]
    fn scenario_b_sliding_closet_on_east_wall() {
        let room = analysis(serde_json::json!({
            "east": [{"type": "closet", "position": 3, "width": 6, "depth": 2, "doorType": "sliding"}]
        }));
        let diagram =
            generate_diagram_with(&room, "Bedroom#1", "room_b", &PlanStyle::default()).unwrap();
        let svg = &diagram.svg;

        // 6 ft x 2 ft at 20 px/ft, flush against the east wall at x = 280.
        assert!(svg.contains(
            r#"<rect class="closet-outline" x="240" y="100" width="40" height="120""#
        ));
        assert!(svg.contains(r#"stroke-dasharray="4,2""#));
        assert!(svg.contains(r#"x1="277" y1="100" x2="277" y2="220""#));
        assert!(svg.contains(r#"x1="283" y1="100" x2="283" y2="220""#));
        assert_eq!(svg.matches("sliding-panel").count(), 2);
        assert!(!svg.contains("door-arc"));
        assert_eq!(diagram.counts.closets, 1);
        assert_eq!(diagram.counts.doors, 0);
    }

    #[test]
    fn scenario_c_unsupported_type_is_skipped_and_reported() {
        let room = analysis(serde_json::json!({
            "north": [
                {"type": "skylight", "position": 2, "width": 3},
                {"type": "window", "position": 6, "width": 3}
            ]
        }));
        let diagram =
            generate_diagram_with(&room, "Bedroom#1", "room_c", &PlanStyle::default()).unwrap();

        assert!(!diagram.svg.contains("skylight"));
        assert_eq!(diagram.counts.windows, 1);
        assert_eq!(diagram.counts.skipped, 1);
        assert_eq!(
            diagram.skipped,
            vec![SkippedFeature {
                wall: Wall::North,
                index: 0,
                kind: "skylight".to_string(),
            }]
        );

        let summary = inspect_diagram(&diagram.svg).unwrap();
        assert_eq!(summary.features.len(), 1);
        assert_eq!(summary.features[0].kind, "window");
    }

    #[test]
    fn invalid_input_produces_no_output() {
        let room = analysis(serde_json::json!({
            "north": [{"type": "window", "position": 10, "width": 4}]
        }));
        let err = generate_diagram(&room, "Bedroom#1", "room_1").unwrap_err();
        assert!(matches!(err, PlanError::FeatureOutOfRange { wall: Wall::North, .. }));
    }

    #[test]
    fn invalid_style_is_rejected() {
        let style = PlanStyle {
            pixels_per_foot: -1.0,
            ..PlanStyle::default()
        };
        let room = analysis(serde_json::json!({}));
        assert!(matches!(
            generate_diagram_with(&room, "A", "b", &style),
            Err(PlanError::InvalidStyle(_))
        ));
    }

    #[test]
    fn label_and_id_are_escaped() {
        let room = analysis(serde_json::json!({}));
        let svg = generate_diagram(&room, "Kid's <Room>", "a&b").unwrap();
        assert!(svg.contains(r#"data-room-label="Kid&apos;s &lt;Room&gt;""#));
        assert!(svg.contains(r#"data-room-id="a&amp;b""#));
        assert!(svg.contains(">Kid&apos;s &lt;Room&gt;</text>"));
    }

    #[test]
    fn scale_comes_from_the_style() {
        let style = PlanStyle {
            pixels_per_foot: 10.0,
            margin: 20.0,
            ..PlanStyle::default()
        };
        let room = analysis(serde_json::json!({}));
        let diagram = generate_diagram_with(&room, "A", "b", &style).unwrap();
        assert!(diagram.svg.contains(r#"viewBox="0 0 160 180""#));
        assert!(diagram.svg.contains(r#"data-scale="10""#));
    }

    #[test]
    fn background_rect_only_when_styled() {
        let room = analysis(serde_json::json!({}));
        let plain = generate_diagram(&room, "A", "b").unwrap();
        assert!(!plain.contains(r#"class="background""#));

        let blueprint = PlanStyle::from_builtin("blueprint").unwrap();
        let styled = generate_diagram_with(&room, "A", "b", &blueprint).unwrap();
        assert!(styled.svg.contains(r##"class="background" x="0" y="0" width="384" height="432" fill="#1d4e89""##));
    }

    fn assert_well_formed(svg: &str) {
        let mut reader = quick_xml::Reader::from_str(svg);
        loop {
            match reader.read_event() {
                Ok(quick_xml::events::Event::Start(e) | quick_xml::events::Event::Empty(e)) => {
                    for attr in e.attributes() {
                        if let Err(err) = attr {
                            panic!("bad attribute in <{:?}>: {err}\n{svg}", e.name());
                        }
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Ok(_) => {}
                Err(err) => panic!("{err}\n{svg}"),
            }
        }
    }

    #[test]
    fn quoted_font_family_keeps_the_document_well_formed() {
        let style = PlanStyle {
            font_family: r#""Helvetica Neue", Arial"#.to_string(),
            background: Some("rgb(0 0 0 / 50%) & co".to_string()),
            ..PlanStyle::default()
        };
        let diagram =
            generate_diagram_with(&sample_analysis().unwrap(), "Bedroom#1", "room_1", &style)
                .unwrap();

        assert!(diagram.svg.contains(r#"font-family="&quot;Helvetica Neue&quot;, Arial""#));
        assert!(diagram.svg.contains(r#"fill="rgb(0 0 0 / 50%) &amp; co""#));
        assert_well_formed(&diagram.svg);
        assert_eq!(inspect_diagram(&diagram.svg).unwrap().features.len(), 4);
    }

    #[test]
    fn sample_with_default_style_is_well_formed() {
        let svg = generate_diagram(&sample_analysis().unwrap(), "Kid's <Room>", "a&b").unwrap();
        assert_well_formed(&svg);
    }

    #[test]
    fn rooms_too_large_for_the_scale_are_rejected() {
        let mut room = analysis(serde_json::json!({}));
        room.dimensions.width = 1e308;
        let err = generate_diagram(&room, "A", "b").unwrap_err();
        assert!(matches!(err, PlanError::DiagramTooLarge { scale, .. } if scale == 20.0), "{err}");
    }

    #[test]
    fn same_input_renders_identically() {
        let room = sample_analysis().unwrap();
        let first = generate_diagram(&room, "Bedroom#1", "room_1").unwrap();
        let second = generate_diagram(&room, "Bedroom#1", "room_1").unwrap();
        assert_eq!(first, second);
    }
}
