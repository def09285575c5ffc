//! Read back the metadata a generated diagram exposes to review tooling:
//! root identity and scale, plus every feature group's wall attributes.

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::reader::Reader as XmlReader;
use serde::Serialize;

use super::geometry::Wall;
use crate::error::PlanError;

type Attrs = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureMarker {
    pub kind: String,
    pub wall: Wall,
    pub position: f64,
    pub width: f64,
    pub sliding: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramSummary {
    pub room_id: String,
    pub room_label: String,
    pub scale: f64,
    pub view_width: f64,
    pub view_height: f64,
    pub features: Vec<FeatureMarker>,
}

impl DiagramSummary {
    pub fn count(&self, kind: &str) -> usize {
        self.features.iter().filter(|f| f.kind == kind).count()
    }
}

pub fn inspect_diagram(svg: &str) -> Result<DiagramSummary, PlanError> {
    let mut reader = XmlReader::from_str(svg);
    reader.config_mut().trim_text(true);

    let mut summary: Option<DiagramSummary> = None;
    let mut features = Vec::new();
    // One entry per open <g>: the feature index it opened, if any.
    let mut groups: Vec<Option<usize>> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(XmlEvent::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let attrs = collect_attrs(e, reader.decoder())?;
                match name.as_str() {
                    "svg" => summary = Some(read_root(&attrs)?),
                    "g" => {
                        let opened = visit_group(&attrs, &groups, &mut features)?;
                        groups.push(opened);
                    }
                    _ => {}
                }
            }
            Ok(XmlEvent::Empty(ref e)) => {
                let attrs = collect_attrs(e, reader.decoder())?;
                if e.name().as_ref() == b"g" {
                    visit_group(&attrs, &groups, &mut features)?;
                }
            }
            Ok(XmlEvent::End(ref e)) => {
                if e.name().as_ref() == b"g" {
                    groups.pop();
                }
            }
            Ok(XmlEvent::Eof) => break,
            Err(e) => return Err(PlanError::Inspect(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    let mut summary =
        summary.ok_or_else(|| PlanError::Inspect("missing <svg> root element".to_string()))?;
    summary.features = features;
    Ok(summary)
}

/// Decoded attributes of an element. Any malformed attribute fails the
/// whole document.
fn collect_attrs(e: &BytesStart<'_>, decoder: Decoder) -> Result<Attrs, PlanError> {
    let element = String::from_utf8_lossy(e.name().as_ref()).to_string();
    e.attributes()
        .map(|attr| {
            let attr = attr
                .map_err(|err| PlanError::Inspect(format!("<{element}> attribute: {err}")))?;
            let value = attr.decode_and_unescape_value(decoder).map_err(|err| {
                PlanError::Inspect(format!("<{element}> attribute value: {err}"))
            })?;
            Ok((
                String::from_utf8_lossy(attr.key.as_ref()).to_string(),
                value.into_owned(),
            ))
        })
        .collect()
}

fn get_attr<'a>(attrs: &'a Attrs, name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn required<'a>(attrs: &'a Attrs, name: &str, element: &str) -> Result<&'a str, PlanError> {
    get_attr(attrs, name)
        .ok_or_else(|| PlanError::Inspect(format!("<{element}> is missing `{name}`")))
}

fn number(value: &str, name: &str) -> Result<f64, PlanError> {
    value
        .parse()
        .map_err(|_| PlanError::Inspect(format!("`{name}` is not a number: {value:?}")))
}

fn read_root(attrs: &Attrs) -> Result<DiagramSummary, PlanError> {
    let view_box = required(attrs, "viewBox", "svg")?;
    let parts: Vec<&str> = view_box.split_whitespace().collect();
    let [_, _, width, height] = parts.as_slice() else {
        return Err(PlanError::Inspect(format!("bad viewBox {view_box:?}")));
    };

    Ok(DiagramSummary {
        room_id: required(attrs, "data-room-id", "svg")?.to_string(),
        room_label: required(attrs, "data-room-label", "svg")?.to_string(),
        scale: number(required(attrs, "data-scale", "svg")?, "data-scale")?,
        view_width: number(width, "viewBox")?,
        view_height: number(height, "viewBox")?,
        features: Vec::new(),
    })
}

/// Record a feature group, or mark the enclosing feature as sliding when
/// this is a glyph nested inside one. Returns the index of a new feature.
fn visit_group(
    attrs: &Attrs,
    open: &[Option<usize>],
    features: &mut Vec<FeatureMarker>,
) -> Result<Option<usize>, PlanError> {
    let classes: Vec<&str> = get_attr(attrs, "class")
        .map(|c| c.split_whitespace().collect())
        .unwrap_or_default();
    let sliding = classes.contains(&"sliding-door");

    let Some(wall) = get_attr(attrs, "data-wall") else {
        if let (true, Some(Some(parent))) = (sliding, open.last()) {
            features[*parent].sliding = true;
        }
        return Ok(None);
    };

    let Some(kind) = ["door", "window", "closet"]
        .into_iter()
        .find(|k| classes.contains(k))
    else {
        return Ok(None);
    };

    let wall = parse_wall(wall)?;
    features.push(FeatureMarker {
        kind: kind.to_string(),
        wall,
        position: number(required(attrs, "data-position", "g")?, "data-position")?,
        width: number(required(attrs, "data-width", "g")?, "data-width")?,
        sliding,
    });
    Ok(Some(features.len() - 1))
}

fn parse_wall(name: &str) -> Result<Wall, PlanError> {
    Wall::ALL
        .into_iter()
        .find(|w| w.name() == name)
        .ok_or_else(|| PlanError::Inspect(format!("unknown wall {name:?}")))
}
