//! Conversions between linemorph paths and lyon geometry.
//!
//! Hosts that draw with lyon can turn a [`Path`] into a lyon path directly.
//! Normalization also borrows lyon's curve math: arcs are approximated with
//! cubic beziers and curves are subdivided with lyon's `split_range`.

use lyon::geom::{ArcFlags, CubicBezierSegment, SvgArc};
use lyon::math::{Angle, Vector};
use lyon::path::Path as LyonPath;
use lyon::path::builder::SvgPathBuilder;

use crate::types::{Path, PathCommand, Point};

/// Convert our Path to lyon's Path format.
pub fn to_lyon_path(path: &Path) -> LyonPath {
    let mut builder = LyonPath::svg_builder();

    for cmd in path.commands() {
        match cmd {
            PathCommand::MoveTo(p) => {
                builder.move_to(p.to_lyon());
            }
            PathCommand::LineTo(p) => {
                builder.line_to(p.to_lyon());
            }
            PathCommand::QuadTo { control, end } => {
                builder.quadratic_bezier_to(control.to_lyon(), end.to_lyon());
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                builder.cubic_bezier_to(control1.to_lyon(), control2.to_lyon(), end.to_lyon());
            }
            PathCommand::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                end,
            } => {
                builder.arc_to(
                    Vector::new(radii.x, radii.y),
                    Angle::radians(*x_rotation),
                    ArcFlags {
                        large_arc: *large_arc,
                        sweep: *sweep,
                    },
                    end.to_lyon(),
                );
            }
            PathCommand::Close => {
                builder.close();
            }
        }
    }

    builder.build()
}

/// A cubic segment expressed as its three trailing points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CubicPoints {
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

/// Approximate an SVG arc starting at `from` with cubic beziers.
///
/// Returns an empty list when the arc degenerates to a straight line (zero
/// radius or coincident endpoints); callers draw a line instead.
pub(crate) fn arc_to_cubics(
    from: Point,
    radii: Point,
    x_rotation: f32,
    large_arc: bool,
    sweep: bool,
    end: Point,
) -> Vec<CubicPoints> {
    let arc = SvgArc {
        from: from.to_lyon(),
        to: end.to_lyon(),
        radii: Vector::new(radii.x, radii.y),
        x_rotation: Angle::radians(x_rotation),
        flags: ArcFlags { large_arc, sweep },
    };

    if arc.is_straight_line() {
        return Vec::new();
    }

    let mut cubics = Vec::new();
    arc.to_arc()
        .for_each_cubic_bezier(&mut |segment: &CubicBezierSegment<f32>| {
            cubics.push(CubicPoints {
                control1: Point::from_lyon(segment.ctrl1),
                control2: Point::from_lyon(segment.ctrl2),
                end: Point::from_lyon(segment.to),
            });
        });

    // Pin the final point so the arc ends exactly where it was asked to.
    if let Some(last) = cubics.last_mut() {
        last.end = end;
    }
    cubics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lyon_path_conversion() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(100.0, 0.0))
            .quad_to(Point::new(150.0, 50.0), Point::new(100.0, 100.0))
            .cubic_to(
                Point::new(50.0, 150.0),
                Point::new(0.0, 150.0),
                Point::new(0.0, 100.0),
            )
            .arc_to(Point::new(50.0, 50.0), 0.0, false, true, Point::new(0.0, 0.0))
            .close();

        let lyon_path = to_lyon_path(&path);
        assert!(lyon_path.iter().next().is_some());
    }

    #[test]
    fn test_empty_path_conversion() {
        let lyon_path = to_lyon_path(&Path::new());
        assert!(lyon_path.iter().next().is_none());
    }

    #[test]
    fn test_half_circle_arc() {
        let from = Point::new(0.0, 0.0);
        let end = Point::new(100.0, 0.0);
        let cubics = arc_to_cubics(from, Point::new(50.0, 50.0), 0.0, false, true, end);

        assert!(!cubics.is_empty());
        assert_eq!(cubics.last().map(|c| c.end), Some(end));
    }

    #[test]
    fn test_zero_radius_arc_is_straight() {
        let cubics = arc_to_cubics(
            Point::new(0.0, 0.0),
            Point::ZERO,
            0.0,
            false,
            false,
            Point::new(10.0, 10.0),
        );
        assert!(cubics.is_empty());
    }
}
