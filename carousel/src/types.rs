/// The single axis items are laid out along.
///
/// Fixed at construction; every main-axis computation reads through it and the cross axis is
/// always centered in the padded space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// `1` for forward (toward later indices), `-1` for backward.
    pub fn signum(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Scroll state as reported by the host's input/fling machinery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollState {
    #[default]
    Idle,
    Dragging,
    Settling,
}

impl ScrollState {
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn main(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    pub fn cross(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.height,
            Orientation::Vertical => self.width,
        }
    }
}

/// Padding on all four sides of the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(v: i32) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn main_start(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }

    pub fn main_end(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.right,
            Orientation::Vertical => self.bottom,
        }
    }

    pub fn cross_start(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.top,
            Orientation::Vertical => self.left,
        }
    }

    pub fn cross_end(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.bottom,
            Orientation::Vertical => self.right,
        }
    }
}

/// A rectangle in container-local pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a rect from main/cross axis coordinates.
    pub fn from_axes(
        orientation: Orientation,
        main_start: i32,
        main_len: i32,
        cross_start: i32,
        cross_len: i32,
    ) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(
                main_start,
                cross_start,
                main_start.saturating_add(main_len),
                cross_start.saturating_add(cross_len),
            ),
            Orientation::Vertical => Self::new(
                cross_start,
                main_start,
                cross_start.saturating_add(cross_len),
                main_start.saturating_add(main_len),
            ),
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn main_start(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }

    pub fn main_end(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.right,
            Orientation::Vertical => self.bottom,
        }
    }

    pub fn main_len(&self, orientation: Orientation) -> i32 {
        self.main_end(orientation) - self.main_start(orientation)
    }

    /// Main-axis center, rounded toward the start edge.
    pub fn main_center(&self, orientation: Orientation) -> i32 {
        self.main_len(orientation) / 2 + self.main_start(orientation)
    }

    /// Returns this rect moved by `delta` along the main axis.
    pub fn offset_main(&self, orientation: Orientation, delta: i32) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(
                self.left + delta,
                self.top,
                self.right + delta,
                self.bottom,
            ),
            Orientation::Vertical => Self::new(
                self.left,
                self.top + delta,
                self.right,
                self.bottom + delta,
            ),
        }
    }
}

/// The inclusive index range of attached items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub first: usize,
    pub last: usize, // inclusive
}

impl VisibleRange {
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.last - self.first).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }

    pub fn contains(&self, index: usize) -> bool {
        self.first <= index && index <= self.last
    }
}

/// Flags describing a host layout pass.
///
/// The first layout after binding data must report `structure_changed = true`; a pass with a
/// non-zero item count and no structural change is ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutPass {
    /// A pre-layout (predictive animation) pass. Ignored entirely.
    pub pre_layout: bool,
    /// The data set changed structurally since the last layout.
    pub structure_changed: bool,
}

impl LayoutPass {
    /// A regular pass after a structural data-set change.
    pub fn structure_changed() -> Self {
        Self {
            pre_layout: false,
            structure_changed: true,
        }
    }
}
