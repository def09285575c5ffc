use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{Dimensions, Hand, Placement};
use crate::style::PlanStyle;

/// One of the four walls of a rectangular room.
///
/// Diagram space has its origin at the room's northwest corner, +X east and
/// +Y south. Feature offsets are measured from the wall's local left edge as
/// seen by someone inside the room facing that wall, so south and west run
/// against the global axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which end of a mapped span, in global coordinate order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanEnd {
    Start,
    End,
}

impl SpanEnd {
    fn opposite(self) -> Self {
        match self {
            SpanEnd::Start => SpanEnd::End,
            SpanEnd::End => SpanEnd::Start,
        }
    }
}

/// Per-wall constants driving both the offset mapping and the door swing.
#[derive(Debug, Clone, Copy)]
struct WallLayout {
    axis: Axis,
    /// Local left points against the increasing global axis.
    mirrored: bool,
    /// Sign of the perpendicular step from the wall into the room.
    interior: f64,
    /// Hinge end for a door swinging `right`. `left` uses the other end.
    hinge_when_right: SpanEnd,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::North, Wall::East, Wall::South, Wall::West];

    const fn layout(self) -> WallLayout {
        match self {
            Wall::North => WallLayout {
                axis: Axis::Horizontal,
                mirrored: false,
                interior: 1.0,
                hinge_when_right: SpanEnd::End,
            },
            Wall::South => WallLayout {
                axis: Axis::Horizontal,
                mirrored: true,
                interior: -1.0,
                hinge_when_right: SpanEnd::Start,
            },
            Wall::East => WallLayout {
                axis: Axis::Vertical,
                mirrored: false,
                interior: -1.0,
                hinge_when_right: SpanEnd::End,
            },
            Wall::West => WallLayout {
                axis: Axis::Vertical,
                mirrored: true,
                interior: 1.0,
                hinge_when_right: SpanEnd::Start,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Wall::North => "north",
            Wall::East => "east",
            Wall::South => "south",
            Wall::West => "west",
        }
    }

    pub fn axis(self) -> Axis {
        self.layout().axis
    }

    pub fn is_mirrored(self) -> bool {
        self.layout().mirrored
    }

    /// +1.0 when the room interior lies toward increasing X/Y, -1.0 otherwise.
    pub fn interior_sign(self) -> f64 {
        self.layout().interior
    }

    /// Length of this wall in feet.
    pub fn length_ft(self, dimensions: &Dimensions) -> f64 {
        match self.axis() {
            Axis::Horizontal => dimensions.width,
            Axis::Vertical => dimensions.height,
        }
    }

    pub fn hinge_end(self, hand: Hand) -> SpanEnd {
        let right = self.layout().hinge_when_right;
        match hand {
            Hand::Right => right,
            Hand::Left => right.opposite(),
        }
    }

    /// Fixed coordinate of this wall's outline in diagram space.
    fn edge_coordinate(self, frame: &RoomFrame) -> f64 {
        match self {
            Wall::North => frame.top(),
            Wall::South => frame.bottom(),
            Wall::East => frame.right(),
            Wall::West => frame.left(),
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A wall segment occupied by a feature, in diagram pixels.
/// `start` is always the end with the smaller global coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: Point,
    pub end: Point,
    pub axis: Axis,
}

impl Span {
    pub fn length(&self) -> f64 {
        match self.axis {
            Axis::Horizontal => self.end.x - self.start.x,
            Axis::Vertical => self.end.y - self.start.y,
        }
    }

    pub fn point(&self, end: SpanEnd) -> Point {
        match end {
            SpanEnd::Start => self.start,
            SpanEnd::End => self.end,
        }
    }

    /// The same span moved `distance` pixels perpendicular to its axis.
    pub fn shifted(&self, distance: f64) -> Span {
        Span {
            start: shift(self.start, self.axis, distance),
            end: shift(self.end, self.axis, distance),
            axis: self.axis,
        }
    }
}

fn shift(point: Point, axis: Axis, distance: f64) -> Point {
    match axis {
        Axis::Horizontal => Point::new(point.x, point.y + distance),
        Axis::Vertical => Point::new(point.x + distance, point.y),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Pixel placement of the room outline inside the diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomFrame {
    pub width_px: f64,
    pub height_px: f64,
    pub margin: f64,
    /// Pixels per foot, applied to both axes.
    pub scale: f64,
}

impl RoomFrame {
    pub fn new(dimensions: &Dimensions, style: &PlanStyle) -> Self {
        Self {
            width_px: dimensions.width * style.pixels_per_foot,
            height_px: dimensions.height * style.pixels_per_foot,
            margin: style.margin,
            scale: style.pixels_per_foot,
        }
    }

    pub fn left(&self) -> f64 {
        self.margin
    }

    pub fn top(&self) -> f64 {
        self.margin
    }

    pub fn right(&self) -> f64 {
        self.margin + self.width_px
    }

    pub fn bottom(&self) -> f64 {
        self.margin + self.height_px
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.margin + self.width_px / 2.0,
            self.margin + self.height_px / 2.0,
        )
    }

    pub fn view_width(&self) -> f64 {
        self.width_px + self.margin * 2.0
    }

    pub fn view_height(&self) -> f64 {
        self.height_px + self.margin * 2.0
    }

    /// Outline corners in drawing order: NW, NE, SE, SW.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }
}

/// Map a wall-local placement onto the diagram.
///
/// Out-of-range placements are mapped as given; containment is checked
/// during validation, never corrected here.
pub fn map_feature(placement: &Placement, wall: Wall, frame: &RoomFrame) -> Span {
    let offset = placement.position * frame.scale;
    let length = placement.width * frame.scale;
    let fixed = wall.edge_coordinate(frame);

    match wall.axis() {
        Axis::Horizontal => {
            let x = if wall.is_mirrored() {
                frame.margin + frame.width_px - offset - length
            } else {
                frame.margin + offset
            };
            Span {
                start: Point::new(x, fixed),
                end: Point::new(x + length, fixed),
                axis: Axis::Horizontal,
            }
        }
        Axis::Vertical => {
            let y = if wall.is_mirrored() {
                frame.margin + frame.height_px - offset - length
            } else {
                frame.margin + offset
            };
            Span {
                start: Point::new(fixed, y),
                end: Point::new(fixed, y + length),
                axis: Axis::Vertical,
            }
        }
    }
}

/// Geometry of a hinged door's swing symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorSwing {
    /// Fixed side of the opening.
    pub hinge: Point,
    /// Swinging side of the opening; the arc starts here.
    pub free: Point,
    /// Hinge moved one door width into the room; the arc ends here.
    pub arc_end: Point,
    pub radius: f64,
    pub sweep: u8,
}

pub fn door_swing(span: &Span, wall: Wall, hand: Hand) -> DoorSwing {
    let hinge_end = wall.hinge_end(hand);
    let hinge = span.point(hinge_end);
    let free = span.point(hinge_end.opposite());
    let radius = span.length();
    // Perpendicular to the wall: horizontal walls step in Y, vertical in X.
    let arc_end = shift(hinge, span.axis, radius * wall.interior_sign());
    let sweep = match hand {
        Hand::Right => 1,
        Hand::Left => 0,
    };

    DoorSwing {
        hinge,
        free,
        arc_end,
        radius,
        sweep,
    }
}

/// Rectangle of `depth` pixels lying against the interior face of `wall`
/// along `span`.
pub fn interior_rect(span: &Span, wall: Wall, depth: f64) -> Rect {
    let length = span.length();
    match span.axis {
        Axis::Horizontal => {
            let y = if wall.interior_sign() > 0.0 {
                span.start.y
            } else {
                span.start.y - depth
            };
            Rect {
                x: span.start.x,
                y,
                width: length,
                height: depth,
            }
        }
        Axis::Vertical => {
            let x = if wall.interior_sign() > 0.0 {
                span.start.x
            } else {
                span.start.x - depth
            };
            Rect {
                x,
                y: span.start.y,
                width: depth,
                height: length,
            }
        }
    }
}
