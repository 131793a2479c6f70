//! Path normalization.
//!
//! Two paths can only be blended coordinate by coordinate when they have the
//! same command structure. [`normalize_pair`] rewrites both paths into a
//! shared structure:
//!
//! 1. Arcs become cubic beziers; degenerate arcs become lines.
//! 2. Paths are split into subpaths. The path with fewer subpaths is padded
//!    with empty subpaths collapsed onto its last point.
//! 3. Paired subpaths must agree on being closed.
//! 4. The subpath with fewer segments has its segments subdivided. Extra
//!    splits are spread evenly, remainder to the earliest segments.
//! 5. Paired segments of different kinds are promoted to the higher kind
//!    (line, then quadratic, then cubic).
//!
//! Coordinates then interpolate linearly. Between a line and a curve this is
//! linear in control points, not in rendered shape.

use lyon::geom::{CubicBezierSegment, QuadraticBezierSegment};

use crate::error::Incompatibility;
use crate::path::arc_to_cubics;
use crate::types::{Path, PathCommand, Point};

/// A drawing segment. Its start point is the end of the previous segment.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment {
    Line {
        end: Point,
    },
    Quad {
        control: Point,
        end: Point,
    },
    Cubic {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl Segment {
    fn end(&self) -> Point {
        match *self {
            Segment::Line { end } | Segment::Quad { end, .. } | Segment::Cubic { end, .. } => end,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Segment::Line { .. } => 0,
            Segment::Quad { .. } => 1,
            Segment::Cubic { .. } => 2,
        }
    }

    /// Split into `pieces` segments of equal parameter length.
    fn split(&self, from: Point, pieces: usize) -> Vec<Segment> {
        if pieces <= 1 {
            return vec![*self];
        }

        let step = 1.0 / pieces as f32;
        let mut out = Vec::with_capacity(pieces);
        for i in 0..pieces {
            let t0 = i as f32 * step;
            let t1 = if i + 1 == pieces {
                1.0
            } else {
                (i + 1) as f32 * step
            };

            let piece = match *self {
                Segment::Line { end } => Segment::Line {
                    end: from.lerp(end, t1),
                },
                Segment::Quad { control, end } => {
                    let part = QuadraticBezierSegment {
                        from: from.to_lyon(),
                        ctrl: control.to_lyon(),
                        to: end.to_lyon(),
                    }
                    .split_range(t0..t1);
                    Segment::Quad {
                        control: Point::from_lyon(part.ctrl),
                        end: Point::from_lyon(part.to),
                    }
                }
                Segment::Cubic {
                    control1,
                    control2,
                    end,
                } => {
                    let part = CubicBezierSegment {
                        from: from.to_lyon(),
                        ctrl1: control1.to_lyon(),
                        ctrl2: control2.to_lyon(),
                        to: end.to_lyon(),
                    }
                    .split_range(t0..t1);
                    Segment::Cubic {
                        control1: Point::from_lyon(part.ctrl1),
                        control2: Point::from_lyon(part.ctrl2),
                        end: Point::from_lyon(part.to),
                    }
                }
            };
            out.push(piece);
        }

        // Keep the original end point exact.
        if let Some(last) = out.last_mut() {
            *last = last.with_end(self.end());
        }
        out
    }

    fn with_end(self, end: Point) -> Segment {
        match self {
            Segment::Line { .. } => Segment::Line { end },
            Segment::Quad { control, .. } => Segment::Quad { control, end },
            Segment::Cubic {
                control1, control2, ..
            } => Segment::Cubic {
                control1,
                control2,
                end,
            },
        }
    }

    /// Re-express this segment as an equivalent segment of kind `rank`.
    fn promote(self, from: Point, rank: u8) -> Segment {
        match (self, rank) {
            (Segment::Line { end }, 1) => Segment::Quad {
                control: from.lerp(end, 0.5),
                end,
            },
            (Segment::Line { end }, 2) => Segment::Cubic {
                control1: from.lerp(end, 1.0 / 3.0),
                control2: from.lerp(end, 2.0 / 3.0),
                end,
            },
            (Segment::Quad { control, end }, 2) => {
                let cubic = QuadraticBezierSegment {
                    from: from.to_lyon(),
                    ctrl: control.to_lyon(),
                    to: end.to_lyon(),
                }
                .to_cubic();
                Segment::Cubic {
                    control1: Point::from_lyon(cubic.ctrl1),
                    control2: Point::from_lyon(cubic.ctrl2),
                    end,
                }
            }
            (segment, _) => segment,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Subpath {
    start: Point,
    segments: Vec<Segment>,
    closed: bool,
}

impl Subpath {
    fn empty(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    fn end(&self) -> Point {
        self.segments.last().map_or(self.start, Segment::end)
    }

    /// Subdivide segments until there are exactly `count` of them.
    fn subdivide(&mut self, count: usize) {
        let len = self.segments.len();
        if len >= count {
            return;
        }
        if len == 0 {
            self.segments = vec![Segment::Line { end: self.start }; count];
            return;
        }

        let extra = count - len;
        let per_segment = extra / len;
        let remainder = extra % len;

        let mut from = self.start;
        let mut segments = Vec::with_capacity(count);
        for (i, segment) in self.segments.iter().enumerate() {
            let pieces = 1 + per_segment + usize::from(i < remainder);
            segments.extend(segment.split(from, pieces));
            from = segment.end();
        }
        self.segments = segments;
    }
}

/// Kind of a normalized command. Each kind owns a fixed number of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandKind {
    Move,
    Line,
    Quad,
    Cubic,
    Close,
}

impl CommandKind {
    pub(crate) fn point_count(self) -> usize {
        match self {
            CommandKind::Move | CommandKind::Line => 1,
            CommandKind::Quad => 2,
            CommandKind::Cubic => 3,
            CommandKind::Close => 0,
        }
    }
}

/// Two paths rewritten to a shared command structure.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NormalizedPair {
    pub kinds: Vec<CommandKind>,
    pub source: Vec<Point>,
    pub target: Vec<Point>,
}

impl NormalizedPair {
    /// Rebuild a path from the shared structure and a list of points.
    pub(crate) fn build(&self, points: &[Point]) -> Path {
        let mut commands = Vec::with_capacity(self.kinds.len());
        let mut cursor = 0;
        for kind in &self.kinds {
            let p = &points[cursor..cursor + kind.point_count()];
            cursor += kind.point_count();
            commands.push(match kind {
                CommandKind::Move => PathCommand::MoveTo(p[0]),
                CommandKind::Line => PathCommand::LineTo(p[0]),
                CommandKind::Quad => PathCommand::QuadTo {
                    control: p[0],
                    end: p[1],
                },
                CommandKind::Cubic => PathCommand::CubicTo {
                    control1: p[0],
                    control2: p[1],
                    end: p[2],
                },
                CommandKind::Close => PathCommand::Close,
            });
        }
        Path::from_commands(commands)
    }
}

fn check_finite(points: &[Point]) -> Result<(), Incompatibility> {
    if points.iter().all(|p| p.is_finite()) {
        Ok(())
    } else {
        Err(Incompatibility::NonFiniteCoordinate)
    }
}

/// Split a path into subpaths of lines, quadratics and cubics.
fn subpaths(path: &Path) -> Result<Vec<Subpath>, Incompatibility> {
    let mut out = Vec::new();
    let mut current: Option<Subpath> = None;
    // Start of the last closed subpath; drawing after a close continues there.
    let mut reopen_at: Option<Point> = None;

    for cmd in path.commands() {
        if let PathCommand::MoveTo(p) = *cmd {
            check_finite(&[p])?;
            out.extend(current.take());
            current = Some(Subpath::empty(p));
            continue;
        }

        if let PathCommand::Close = cmd {
            if let Some(mut subpath) = current.take() {
                subpath.closed = true;
                reopen_at = Some(subpath.start);
                out.push(subpath);
            } else if reopen_at.is_none() {
                return Err(Incompatibility::MissingMoveTo);
            }
            continue;
        }

        let start = match (&current, reopen_at) {
            (Some(subpath), _) => subpath.start,
            (None, Some(start)) => start,
            (None, None) => return Err(Incompatibility::MissingMoveTo),
        };
        let subpath = current.get_or_insert_with(|| Subpath::empty(start));
        let from = subpath.end();

        match *cmd {
            PathCommand::LineTo(end) => {
                check_finite(&[end])?;
                subpath.segments.push(Segment::Line { end });
            }
            PathCommand::QuadTo { control, end } => {
                check_finite(&[control, end])?;
                subpath.segments.push(Segment::Quad { control, end });
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                check_finite(&[control1, control2, end])?;
                subpath.segments.push(Segment::Cubic {
                    control1,
                    control2,
                    end,
                });
            }
            PathCommand::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                end,
            } => {
                check_finite(&[radii, end])?;
                if !x_rotation.is_finite() {
                    return Err(Incompatibility::NonFiniteCoordinate);
                }
                let cubics = arc_to_cubics(from, radii, x_rotation, large_arc, sweep, end);
                if cubics.is_empty() {
                    subpath.segments.push(Segment::Line { end });
                }
                subpath.segments.extend(cubics.into_iter().map(|c| Segment::Cubic {
                    control1: c.control1,
                    control2: c.control2,
                    end: c.end,
                }));
            }
            PathCommand::MoveTo(_) | PathCommand::Close => {}
        }
    }

    out.extend(current);
    Ok(out)
}

/// Append the points of `segment` and return its kind.
fn push_points(points: &mut Vec<Point>, segment: Segment) -> CommandKind {
    match segment {
        Segment::Line { end } => {
            points.push(end);
            CommandKind::Line
        }
        Segment::Quad { control, end } => {
            points.extend([control, end]);
            CommandKind::Quad
        }
        Segment::Cubic {
            control1,
            control2,
            end,
        } => {
            points.extend([control1, control2, end]);
            CommandKind::Cubic
        }
    }
}

/// Rewrite two paths into a shared command structure.
pub(crate) fn normalize_pair(
    source: &Path,
    target: &Path,
) -> Result<NormalizedPair, Incompatibility> {
    if source.is_empty() != target.is_empty() {
        return Err(Incompatibility::EmptyPath);
    }

    let mut a = subpaths(source)?;
    let mut b = subpaths(target)?;

    pad_subpaths(&mut a, &b);
    pad_subpaths(&mut b, &a);

    let mut pair = NormalizedPair {
        kinds: Vec::new(),
        source: Vec::new(),
        target: Vec::new(),
    };

    for (index, (sa, sb)) in a.iter_mut().zip(b.iter_mut()).enumerate() {
        if sa.closed != sb.closed {
            return Err(Incompatibility::ClosedMismatch { subpath: index });
        }

        let count = sa.segments.len().max(sb.segments.len());
        sa.subdivide(count);
        sb.subdivide(count);

        pair.kinds.push(CommandKind::Move);
        pair.source.push(sa.start);
        pair.target.push(sb.start);

        let mut from_a = sa.start;
        let mut from_b = sb.start;
        for (seg_a, seg_b) in sa.segments.iter().zip(&sb.segments) {
            let rank = seg_a.rank().max(seg_b.rank());
            let kind = push_points(&mut pair.source, seg_a.promote(from_a, rank));
            push_points(&mut pair.target, seg_b.promote(from_b, rank));
            pair.kinds.push(kind);

            from_a = seg_a.end();
            from_b = seg_b.end();
        }

        if sa.closed {
            pair.kinds.push(CommandKind::Close);
        }
    }

    Ok(pair)
}

/// Pad `subpaths` with empty subpaths until it is as long as `other`.
fn pad_subpaths(subpaths: &mut Vec<Subpath>, other: &[Subpath]) {
    let Some(last) = subpaths.last().map(Subpath::end) else {
        return;
    };
    for partner in other.iter().skip(subpaths.len()) {
        subpaths.push(Subpath {
            start: last,
            segments: Vec::new(),
            closed: partner.closed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-4, "{actual:?} != {expected:?}");
        }
    }

    fn line(points: &[(f32, f32)]) -> Path {
        Path::polyline(points.iter().map(|&(x, y)| Point::new(x, y)))
    }

    #[test]
    fn test_same_structure_is_unchanged() {
        let a = line(&[(0.0, 0.0), (10.0, 10.0)]);
        let b = line(&[(0.0, 5.0), (10.0, 0.0)]);
        let pair = normalize_pair(&a, &b).unwrap();

        assert_eq!(pair.kinds, vec![CommandKind::Move, CommandKind::Line]);
        assert_eq!(pair.build(&pair.source), a);
        assert_eq!(pair.build(&pair.target), b);
    }

    #[test]
    fn test_shorter_path_is_subdivided() {
        let a = line(&[(0.0, 0.0), (10.0, 0.0)]);
        let b = line(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0), (15.0, 5.0)]);
        let pair = normalize_pair(&a, &b).unwrap();

        assert_eq!(pair.kinds.len(), 4);
        assert_eq!(pair.source.len(), pair.target.len());
        // Splits of a straight line stay on the line and keep the end point.
        let xs: Vec<f32> = pair.source.iter().map(|p| p.x).collect();
        assert_close(&xs, &[0.0, 10.0 / 3.0, 20.0 / 3.0, 10.0]);
        assert!(pair.source.iter().all(|p| p.y == 0.0));
        assert_eq!(pair.source[3], Point::new(10.0, 0.0));
    }

    #[test]
    fn test_splits_favour_earlier_segments() {
        let mut sub = Subpath::empty(Point::ZERO);
        sub.segments = vec![
            Segment::Line {
                end: Point::new(10.0, 0.0),
            },
            Segment::Line {
                end: Point::new(20.0, 0.0),
            },
        ];
        sub.subdivide(5);

        let ends: Vec<f32> = sub.segments.iter().map(|s| s.end().x).collect();
        assert_close(&ends, &[10.0 / 3.0, 20.0 / 3.0, 10.0, 15.0, 20.0]);
    }

    #[test]
    fn test_line_promoted_to_cubic() {
        let a = line(&[(0.0, 0.0), (30.0, 0.0)]);
        let mut b = Path::new();
        b.move_to(Point::new(0.0, 0.0)).cubic_to(
            Point::new(0.0, 10.0),
            Point::new(30.0, 10.0),
            Point::new(30.0, 0.0),
        );
        let pair = normalize_pair(&a, &b).unwrap();

        assert_eq!(pair.kinds, vec![CommandKind::Move, CommandKind::Cubic]);
        assert_close(&[pair.source[1].x, pair.source[2].x], &[10.0, 20.0]);
        assert_eq!(pair.source[3], Point::new(30.0, 0.0));
        assert_eq!(pair.build(&pair.target), b);
    }

    #[test]
    fn test_quad_promoted_to_cubic() {
        let mut a = Path::new();
        a.move_to(Point::new(0.0, 0.0))
            .quad_to(Point::new(15.0, 30.0), Point::new(30.0, 0.0));
        let mut b = Path::new();
        b.move_to(Point::new(0.0, 0.0)).cubic_to(
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(30.0, 0.0),
        );
        let pair = normalize_pair(&a, &b).unwrap();

        assert_eq!(pair.kinds[1], CommandKind::Cubic);
        // Degree elevation: control points at 2/3 of the way to the quad control.
        assert!((pair.source[1].x - 10.0).abs() < 1e-4);
        assert!((pair.source[1].y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_missing_subpaths_are_padded() {
        let a = line(&[(0.0, 0.0), (10.0, 0.0)]);
        let mut b = line(&[(0.0, 0.0), (10.0, 0.0)]);
        b.move_to(Point::new(20.0, 0.0)).line_to(Point::new(30.0, 0.0));
        let pair = normalize_pair(&a, &b).unwrap();

        assert_eq!(
            pair.kinds,
            vec![
                CommandKind::Move,
                CommandKind::Line,
                CommandKind::Move,
                CommandKind::Line,
            ]
        );
        // The padded subpath sits on the last point of the shorter path.
        assert_eq!(pair.source[2], Point::new(10.0, 0.0));
        assert_eq!(pair.source[3], Point::new(10.0, 0.0));
    }

    #[test]
    fn test_arc_becomes_cubics() {
        let mut a = Path::new();
        a.move_to(Point::new(0.0, 0.0)).arc_to(
            Point::new(50.0, 50.0),
            0.0,
            false,
            true,
            Point::new(100.0, 0.0),
        );
        let b = line(&[(0.0, 0.0), (100.0, 0.0)]);
        let pair = normalize_pair(&a, &b).unwrap();

        assert!(pair.kinds[1..].iter().all(|k| *k == CommandKind::Cubic));
        assert_eq!(pair.source.last(), Some(&Point::new(100.0, 0.0)));
        assert_eq!(pair.target.last(), Some(&Point::new(100.0, 0.0)));
    }

    #[test]
    fn test_empty_vs_non_empty_is_incompatible() {
        let a = Path::new();
        let b = line(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(normalize_pair(&a, &b), Err(Incompatibility::EmptyPath));
        assert_eq!(normalize_pair(&b, &a), Err(Incompatibility::EmptyPath));
    }

    #[test]
    fn test_closed_mismatch_is_incompatible() {
        let a = line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let mut b = a.clone();
        b.close();
        assert_eq!(
            normalize_pair(&a, &b),
            Err(Incompatibility::ClosedMismatch { subpath: 0 })
        );
    }

    #[test]
    fn test_draw_before_move_is_incompatible() {
        let a = Path::from_commands(vec![PathCommand::LineTo(Point::new(1.0, 1.0))]);
        let b = line(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(normalize_pair(&a, &b), Err(Incompatibility::MissingMoveTo));
    }

    #[test]
    fn test_non_finite_is_incompatible() {
        let a = line(&[(0.0, 0.0), (f32::NAN, 1.0)]);
        let b = line(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(
            normalize_pair(&a, &b),
            Err(Incompatibility::NonFiniteCoordinate)
        );
    }

    #[test]
    fn test_drawing_after_close_reopens_at_start() {
        let mut a = Path::new();
        a.move_to(Point::new(5.0, 5.0))
            .line_to(Point::new(10.0, 5.0))
            .close()
            .line_to(Point::new(0.0, 0.0));
        let subs = subpaths(&a).unwrap();

        assert_eq!(subs.len(), 2);
        assert!(subs[0].closed);
        assert_eq!(subs[1].start, Point::new(5.0, 5.0));
        assert!(!subs[1].closed);
    }

    #[test]
    fn test_both_empty() {
        let pair = normalize_pair(&Path::new(), &Path::new()).unwrap();
        assert!(pair.kinds.is_empty());
        assert!(pair.build(&[]).is_empty());
    }
}
