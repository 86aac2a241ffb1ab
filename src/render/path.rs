use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::Point;

/// One SVG path command in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Arc {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// Declarative path geometry with an SVG `d` serializer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn move_to(mut self, point: Point) -> Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    #[must_use]
    pub fn line_to(mut self, point: Point) -> Self {
        self.commands.push(PathCommand::LineTo(point));
        self
    }

    #[must_use]
    pub fn arc_to(mut self, radius: f64, large_arc: bool, sweep: bool, to: Point) -> Self {
        self.commands.push(PathCommand::Arc {
            radius,
            large_arc,
            sweep,
            to,
        });
        self
    }

    #[must_use]
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Open polyline through `points`. Returns an empty path for fewer than two points.
    #[must_use]
    pub fn polyline(points: &[Point]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::new();
        };
        if rest.is_empty() {
            return Self::new();
        }
        let start = Self::new().move_to(*first);
        rest.iter().fold(start, |path, point| path.line_to(*point))
    }

    /// Closed polygon through `points`.
    #[must_use]
    pub fn polygon(points: &[Point]) -> Self {
        let path = Self::polyline(points);
        if path.is_empty() { path } else { path.close() }
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Every endpoint in command order; used for polygon hit testing.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                PathCommand::MoveTo(point) | PathCommand::LineTo(point) => Some(*point),
                PathCommand::Arc { to, .. } => Some(*to),
                PathCommand::Close => None,
            })
            .collect()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.commands.iter().all(|command| match command {
            PathCommand::MoveTo(point) | PathCommand::LineTo(point) => point.is_finite(),
            PathCommand::Arc { radius, to, .. } => radius.is_finite() && to.is_finite(),
            PathCommand::Close => true,
        })
    }

    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match command {
                PathCommand::MoveTo(p) => write!(out, "M {:.2} {:.2}", p.x, p.y),
                PathCommand::LineTo(p) => write!(out, "L {:.2} {:.2}", p.x, p.y),
                PathCommand::Arc {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    out,
                    "A {radius:.2} {radius:.2} 0 {} {} {:.2} {:.2}",
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    to.x,
                    to.y
                ),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }
}
