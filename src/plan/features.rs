use super::geometry::{Point, Span, Wall, door_swing, interior_rect};
use super::types::{ClosetFeature, DoorFeature, DoorOperation, Hand, Placement, WindowFeature};
use crate::style::PlanStyle;
use crate::xml::{escape_xml, fmt_exact, fmt_num};

const GROUP_INDENT: &str = "      ";
const ELEMENT_INDENT: &str = "        ";

/// Render a door: wall gap plus either a swing arc or a sliding glyph.
pub fn render_door(door: &DoorFeature, wall: Wall, span: &Span, style: &PlanStyle) -> String {
    match door.operation() {
        DoorOperation::Sliding => {
            let mut svg = open_group("door sliding-door", wall, &door.placement, &[]);
            svg.push_str(&sliding_glyph(span, style, ELEMENT_INDENT));
            svg.push_str(&close_group(GROUP_INDENT));
            svg
        }
        DoorOperation::Hinged(hand) => {
            let swing_attr = ("data-swing", hand_name(hand).to_string());
            let mut svg = open_group("door", wall, &door.placement, &[swing_attr]);
            svg.push_str(&wall_gap(span, style, ELEMENT_INDENT));

            let swing = door_swing(span, wall, hand);
            let radius = fmt_num(swing.radius);
            svg.push_str(&format!(
                r#"{ELEMENT_INDENT}<path class="door-arc" d="M {} {} A {radius} {radius} 0 0 {} {} {}" fill="none" stroke="{}" stroke-width="{}"/>
"#,
                fmt_num(swing.free.x),
                fmt_num(swing.free.y),
                swing.sweep,
                fmt_num(swing.arc_end.x),
                fmt_num(swing.arc_end.y),
                escape_xml(&style.symbol_color),
                fmt_num(style.door_stroke_width),
            ));
            svg.push_str(&close_group(GROUP_INDENT));
            svg
        }
    }
}

/// Render a window: wall gap plus three pane lines either side of and on
/// the wall line.
pub fn render_window(window: &WindowFeature, wall: Wall, span: &Span, style: &PlanStyle) -> String {
    let mut svg = open_group("window", wall, &window.placement, &[]);
    svg.push_str(&wall_gap(span, style, ELEMENT_INDENT));

    for offset in [-style.pane_offset, 0.0, style.pane_offset] {
        let pane = span.shifted(offset);
        svg.push_str(&line(
            ELEMENT_INDENT,
            "window-pane",
            pane.start,
            pane.end,
            &style.symbol_color,
            style.pane_stroke_width,
        ));
    }

    svg.push_str(&close_group(GROUP_INDENT));
    svg
}

/// Render a closet: dashed footprint against the wall's interior face, the
/// opening's wall gap, and a sliding glyph for sliding closet doors.
pub fn render_closet(closet: &ClosetFeature, wall: Wall, span: &Span, style: &PlanStyle) -> String {
    let depth_ft = closet.depth_or(style.default_closet_depth);
    let rect = interior_rect(span, wall, depth_ft * style.pixels_per_foot);

    let depth_attr = ("data-depth", fmt_exact(depth_ft));
    let mut svg = open_group("closet", wall, &closet.placement, &[depth_attr]);
    svg.push_str(&format!(
        r#"{ELEMENT_INDENT}<rect class="closet-outline" x="{}" y="{}" width="{}" height="{}" stroke="{}" stroke-width="{}" stroke-dasharray="{}" fill="none"/>
"#,
        fmt_num(rect.x),
        fmt_num(rect.y),
        fmt_num(rect.width),
        fmt_num(rect.height),
        escape_xml(&style.symbol_color),
        fmt_num(style.closet_stroke_width),
        escape_xml(&style.closet_dash),
    ));
    svg.push_str(&wall_gap(span, style, ELEMENT_INDENT));

    if closet.is_sliding() {
        let nested = format!("{ELEMENT_INDENT}  ");
        svg.push_str(&format!("{ELEMENT_INDENT}<g class=\"sliding-door\">\n"));
        svg.push_str(&sliding_glyph(span, style, &nested));
        svg.push_str(&close_group(ELEMENT_INDENT));
    }

    svg.push_str(&close_group(GROUP_INDENT));
    svg
}

/// Wall gap plus two panel lines either side of the opening's centerline.
/// Only the span's axis matters, not which wall it is on.
pub fn sliding_glyph(span: &Span, style: &PlanStyle, indent: &str) -> String {
    let mut svg = wall_gap(span, style, indent);
    for offset in [-style.sliding_offset, style.sliding_offset] {
        let panel = span.shifted(offset);
        svg.push_str(&line(
            indent,
            "sliding-panel",
            panel.start,
            panel.end,
            &style.symbol_color,
            style.sliding_stroke_width,
        ));
    }
    svg
}

/// A background-colored line over the wall outline, slightly wider than the
/// wall so the opening reads as a break.
fn wall_gap(span: &Span, style: &PlanStyle, indent: &str) -> String {
    line(
        indent,
        "wall-gap",
        span.start,
        span.end,
        &style.gap_color,
        style.gap_width(),
    )
}

fn line(indent: &str, class: &str, from: Point, to: Point, stroke: &str, width: f64) -> String {
    format!(
        r#"{indent}<line class="{class}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>
"#,
        fmt_num(from.x),
        fmt_num(from.y),
        fmt_num(to.x),
        fmt_num(to.y),
        escape_xml(stroke),
        fmt_num(width),
    )
}

fn open_group(class: &str, wall: Wall, placement: &Placement, extra: &[(&str, String)]) -> String {
    let mut svg = format!(
        r#"{GROUP_INDENT}<g class="{class}" data-wall="{wall}" data-position="{}" data-width="{}""#,
        fmt_exact(placement.position),
        fmt_exact(placement.width),
    );
    for (name, value) in extra {
        svg.push_str(&format!(r#" {name}="{value}""#));
    }
    svg.push_str(">\n");
    svg
}

fn close_group(indent: &str) -> String {
    format!("{indent}</g>\n")
}

fn hand_name(hand: Hand) -> &'static str {
    match hand {
        Hand::Left => "left",
        Hand::Right => "right",
    }
}
