use crate::{Orientation, ScrollState, VisibleRange};

/// A lightweight, serializable snapshot of the engine's observable state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`. Feed it back to
/// [`crate::Gallery::restore_snapshot`] to reseed the anchor after the host is recreated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GallerySnapshot {
    pub orientation: Orientation,
    /// `None` when nothing is attached.
    pub visible: Option<VisibleRange>,
    pub selected: Option<usize>,
    pub scroll_state: ScrollState,
}
