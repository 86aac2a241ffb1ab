use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Point;
use crate::render::{Color, PathData};

/// Fill or stroke paint: a flat color or a reference to a frame definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    Reference(String),
}

impl Paint {
    #[must_use]
    pub fn reference(id: impl Into<String>) -> Self {
        Self::Reference(id.into())
    }

    #[must_use]
    pub fn to_svg(&self) -> String {
        match self {
            Self::Solid(color) => color.to_svg(),
            Self::Reference(id) => format!("url(#{id})"),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

/// Horizontal text anchoring relative to the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    #[must_use]
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Visual style shared by every primitive kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub stroke_width: f64,
    pub opacity: f64,
    pub dash: Option<SmallVec<[f64; 2]>>,
    pub filter: Option<String>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
            dash: None,
            filter: None,
        }
    }
}

impl ShapeStyle {
    #[must_use]
    pub fn filled(paint: impl Into<Paint>) -> Self {
        Self {
            fill: Some(paint.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn stroked(paint: impl Into<Paint>, width: f64) -> Self {
        Self {
            stroke: Some(paint.into()),
            stroke_width: width,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, paint: impl Into<Paint>, width: f64) -> Self {
        self.stroke = Some(paint.into());
        self.stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_dash(mut self, on: f64, off: f64) -> Self {
        self.dash = Some(SmallVec::from_buf([on, off]));
        self
    }

    #[must_use]
    pub fn with_filter(mut self, id: impl Into<String>) -> Self {
        self.filter = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle {
        center: Point,
        radius: f64,
    },
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        corner_radius: f64,
    },
    Line {
        from: Point,
        to: Point,
    },
    Path {
        data: PathData,
    },
    Text {
        position: Point,
        content: String,
        font_size: f64,
        anchor: TextAnchor,
        weight: FontWeight,
    },
    Group {
        children: Vec<ShapeNode>,
    },
}

/// Immutable description of one drawable primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeNode {
    pub kind: ShapeKind,
    pub style: ShapeStyle,
    pub region_id: Option<String>,
}

impl ShapeNode {
    #[must_use]
    pub fn new(kind: ShapeKind, style: ShapeStyle) -> Self {
        Self {
            kind,
            style,
            region_id: None,
        }
    }

    #[must_use]
    pub fn circle(center: Point, radius: f64, style: ShapeStyle) -> Self {
        Self::new(ShapeKind::Circle { center, radius }, style)
    }

    #[must_use]
    pub fn ellipse(center: Point, radius_x: f64, radius_y: f64, style: ShapeStyle) -> Self {
        Self::new(
            ShapeKind::Ellipse {
                center,
                radius_x,
                radius_y,
            },
            style,
        )
    }

    #[must_use]
    pub fn rect(origin: Point, width: f64, height: f64, style: ShapeStyle) -> Self {
        Self::new(
            ShapeKind::Rect {
                origin,
                width,
                height,
                corner_radius: 0.0,
            },
            style,
        )
    }

    #[must_use]
    pub fn line(from: Point, to: Point, style: ShapeStyle) -> Self {
        Self::new(ShapeKind::Line { from, to }, style)
    }

    #[must_use]
    pub fn path(data: PathData, style: ShapeStyle) -> Self {
        Self::new(ShapeKind::Path { data }, style)
    }

    #[must_use]
    pub fn text(
        position: Point,
        content: impl Into<String>,
        font_size: f64,
        anchor: TextAnchor,
        color: Color,
    ) -> Self {
        Self::new(
            ShapeKind::Text {
                position,
                content: content.into(),
                font_size,
                anchor,
                weight: FontWeight::Normal,
            },
            ShapeStyle::filled(color),
        )
    }

    #[must_use]
    pub fn group(children: Vec<ShapeNode>) -> Self {
        Self::new(ShapeKind::Group { children }, ShapeStyle::default())
    }

    #[must_use]
    pub fn with_region(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = Some(region_id.into());
        self
    }

    /// Rounds a rect's corners; ignored for other kinds.
    #[must_use]
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        if let ShapeKind::Rect { corner_radius, .. } = &mut self.kind {
            *corner_radius = radius;
        }
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        if let ShapeKind::Text { weight, .. } = &mut self.kind {
            *weight = FontWeight::Bold;
        }
        self
    }

    /// A node that would render nothing meaningful: non-positive or
    /// non-finite sizes, non-finite coordinates, empty text or path.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !self.style.opacity.is_finite() {
            return true;
        }
        match &self.kind {
            ShapeKind::Circle { center, radius } => !center.is_finite() || !positive(*radius),
            ShapeKind::Ellipse {
                center,
                radius_x,
                radius_y,
            } => !center.is_finite() || !positive(*radius_x) || !positive(*radius_y),
            ShapeKind::Rect {
                origin,
                width,
                height,
                ..
            } => !origin.is_finite() || !positive(*width) || !positive(*height),
            ShapeKind::Line { from, to } => !from.is_finite() || !to.is_finite(),
            ShapeKind::Path { data } => data.is_empty() || !data.is_finite(),
            ShapeKind::Text {
                position,
                content,
                font_size,
                ..
            } => !position.is_finite() || content.is_empty() || !positive(*font_size),
            ShapeKind::Group { children } => children.is_empty(),
        }
    }

    /// Kind name used in snapshots and logs.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Ellipse { .. } => "ellipse",
            ShapeKind::Rect { .. } => "rect",
            ShapeKind::Line { .. } => "line",
            ShapeKind::Path { .. } => "path",
            ShapeKind::Text { .. } => "text",
            ShapeKind::Group { .. } => "group",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    #[must_use]
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Reusable paint servers and filters emitted into `<defs>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Definition {
    RadialGradient {
        id: String,
        stops: SmallVec<[GradientStop; 4]>,
    },
    /// Left-to-right gradient across the bounding box.
    LinearGradient {
        id: String,
        stops: SmallVec<[GradientStop; 4]>,
    },
    Glow {
        id: String,
        std_deviation: f64,
    },
}

impl Definition {
    #[must_use]
    pub fn radial_gradient(id: impl Into<String>, stops: &[GradientStop]) -> Self {
        Self::RadialGradient {
            id: id.into(),
            stops: SmallVec::from_slice(stops),
        }
    }

    #[must_use]
    pub fn linear_gradient(id: impl Into<String>, stops: &[GradientStop]) -> Self {
        Self::LinearGradient {
            id: id.into(),
            stops: SmallVec::from_slice(stops),
        }
    }

    #[must_use]
    pub fn glow(id: impl Into<String>, std_deviation: f64) -> Self {
        Self::Glow {
            id: id.into(),
            std_deviation,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::RadialGradient { id, .. }
            | Self::LinearGradient { id, .. }
            | Self::Glow { id, .. } => id,
        }
    }
}
