pub use kurbo::{Point, Rect, Size, Vec2};

/// One of the two layout axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    /// The x axis (left to right).
    Horizontal,
    /// The y axis (top to bottom).
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Leading edge of `r` along this axis.
    pub fn start(self, r: Rect) -> f64 {
        match self {
            Self::Horizontal => r.x0,
            Self::Vertical => r.y0,
        }
    }

    /// Trailing edge of `r` along this axis.
    pub fn end(self, r: Rect) -> f64 {
        match self {
            Self::Horizontal => r.x1,
            Self::Vertical => r.y1,
        }
    }

    pub fn extent(self, r: Rect) -> f64 {
        match self {
            Self::Horizontal => r.width(),
            Self::Vertical => r.height(),
        }
    }

    pub fn center(self, r: Rect) -> f64 {
        match self {
            Self::Horizontal => r.center().x,
            Self::Vertical => r.center().y,
        }
    }
}

/// Insets on the four sides of a box, in design units.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edges {
    /// Top inset.
    #[serde(default)]
    pub top: f64,
    /// Right inset.
    #[serde(default)]
    pub right: f64,
    /// Bottom inset.
    #[serde(default)]
    pub bottom: f64,
    /// Left inset.
    #[serde(default)]
    pub left: f64,
}

impl Edges {
    /// Same inset on every side.
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }

    /// Leading inset along `axis` (left for horizontal, top for vertical).
    pub fn near(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Trailing inset along `axis` (right for horizontal, bottom for vertical).
    pub fn far(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    pub(crate) fn set_near(&mut self, axis: Axis, v: f64) {
        match axis {
            Axis::Horizontal => self.left = v,
            Axis::Vertical => self.top = v,
        }
    }

    pub(crate) fn set_far(&mut self, axis: Axis, v: f64) {
        match axis {
            Axis::Horizontal => self.right = v,
            Axis::Vertical => self.bottom = v,
        }
    }

    pub fn validate(&self, what: &str) -> crate::foundation::error::FlexResult<()> {
        for (name, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(crate::foundation::error::FlexError::validation(format!(
                    "{what}.{name} must be finite and >= 0",
                )));
            }
        }
        Ok(())
    }
}

/// `true` when `a` and `b` differ by strictly less than `tolerance`.
pub fn within(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

/// Geometry equality that forgives float noise from the host tool.
pub fn same_extent(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6
}
