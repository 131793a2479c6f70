//! Basic geometry and path types.
//!
//! [`Path`] is the path descriptor that flows through the whole system: the
//! chart builds one per data series, the interpolator blends two of them, and
//! sinks draw them. It is a plain value type with structural equality.

use std::fmt;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Linearly interpolate between two points.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Check that both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Convert to a lyon point.
    #[inline]
    pub fn to_lyon(self) -> lyon::math::Point {
        lyon::math::point(self.x, self.y)
    }

    /// Create from a lyon point.
    #[inline]
    pub fn from_lyon(p: lyon::math::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// A 2D vector path made of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

/// Commands that make up a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Move to a point without drawing.
    MoveTo(Point),
    /// Draw a line to a point.
    LineTo(Point),
    /// Draw a quadratic bezier curve.
    QuadTo { control: Point, end: Point },
    /// Draw a cubic bezier curve.
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Draw an SVG-style elliptical arc.
    ArcTo {
        radii: Point,
        x_rotation: f32,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
    /// Close the current subpath.
    Close,
}

impl PathCommand {
    /// The point this command leaves the pen at, if it has one.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p),
            PathCommand::QuadTo { end, .. }
            | PathCommand::CubicTo { end, .. }
            | PathCommand::ArcTo { end, .. } => Some(end),
            PathCommand::Close => None,
        }
    }
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Create a path from a list of commands.
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Move to a point without drawing.
    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    /// Draw a line to a point.
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    /// Draw a quadratic bezier curve.
    pub fn quad_to(&mut self, control: Point, end: Point) -> &mut Self {
        self.commands.push(PathCommand::QuadTo { control, end });
        self
    }

    /// Draw a cubic bezier curve.
    pub fn cubic_to(&mut self, control1: Point, control2: Point, end: Point) -> &mut Self {
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            end,
        });
        self
    }

    /// Draw an elliptical arc, using SVG arc semantics.
    pub fn arc_to(
        &mut self,
        radii: Point,
        x_rotation: f32,
        large_arc: bool,
        sweep: bool,
        end: Point,
    ) -> &mut Self {
        self.commands.push(PathCommand::ArcTo {
            radii,
            x_rotation,
            large_arc,
            sweep,
            end,
        });
        self
    }

    /// Close the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Get the path commands.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of commands in the path.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Create a polyline through the given points.
    ///
    /// Returns an empty path if `points` is empty.
    pub fn polyline<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut path = Self::new();
        for (i, p) in points.into_iter().enumerate() {
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path
    }
}

impl FromIterator<PathCommand> for Path {
    fn from_iter<I: IntoIterator<Item = PathCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

/// Formats the path as SVG path data, e.g. `M0,0L10,5Z`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => write!(f, "M{},{}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(f, "L{},{}", p.x, p.y)?,
                PathCommand::QuadTo { control, end } => {
                    write!(f, "Q{},{},{},{}", control.x, control.y, end.x, end.y)?
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => write!(
                    f,
                    "C{},{},{},{},{},{}",
                    control1.x, control1.y, control2.x, control2.y, end.x, end.y
                )?,
                PathCommand::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    end,
                } => write!(
                    f,
                    "A{},{},{},{},{},{},{}",
                    radii.x,
                    radii.y,
                    x_rotation.to_degrees(),
                    u8::from(large_arc),
                    u8::from(sweep),
                    end.x,
                    end.y
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 2.0);

        let p2: Point = (3.0, 4.0).into();
        assert_eq!(p2.x, 3.0);
        assert_eq!(p2.y, 4.0);
    }

    #[test]
    fn test_point_lerp() {
        let a = Point::new(0.0, 10.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_structural_equality() {
        let mut a = Path::new();
        a.move_to(Point::new(0.0, 0.0)).line_to(Point::new(1.0, 1.0));
        let b = Path::polyline([Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(a, b);

        let c = Path::polyline([Point::new(0.0, 0.0), Point::new(1.0, 2.0)]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_polyline_empty() {
        assert!(Path::polyline(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_svg_path_data() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(10.0, 5.5))
            .quad_to(Point::new(15.0, 0.0), Point::new(20.0, 5.0))
            .close();
        assert_eq!(path.to_string(), "M0,0L10,5.5Q15,0,20,5Z");
    }

    #[test]
    fn test_end_point() {
        assert_eq!(
            PathCommand::QuadTo {
                control: Point::ZERO,
                end: Point::new(3.0, 4.0)
            }
            .end_point(),
            Some(Point::new(3.0, 4.0))
        );
        assert_eq!(PathCommand::Close.end_point(), None);
    }
}
