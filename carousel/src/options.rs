use alloc::sync::Arc;

use crate::gallery::Gallery;
use crate::{CenterSnap, Orientation, SnapStrategy, ViewRecycler, Viewport};

/// A per-item visual transformation hook, invoked after every fill pass.
///
/// Arguments: the engine, the host (so the hook can mutate the view's visual properties), the
/// view, its attached slot, and its signed distance from the container center in units of its
/// own main-axis extent, clamped to `[-1, 1]`. `0` is front and center; `1` is one full item
/// toward the end edge.
pub type ItemTransformer<H> =
    Arc<dyn Fn(&Gallery<H>, &mut H, &<H as Viewport>::View, usize, f32) + Send + Sync>;

/// A selection-changed listener: `(container, selected view, selected index)`.
pub type OnSelectionChanged<H> = Arc<dyn Fn(&H, &<H as Viewport>::View, usize) + Send + Sync>;

/// Configuration for [`crate::Gallery`].
///
/// Callbacks are stored in `Arc`s so options are cheap to clone and hooks can be swapped without
/// reallocating the rest.
pub struct GalleryOptions<H: ViewRecycler> {
    /// Layout axis. Cannot change after construction.
    pub orientation: Orientation,

    /// When set, selection changes observed while the scroll state is not idle are reported
    /// once, when the state returns to idle.
    pub suppress_selection_during_motion: bool,

    pub item_transformer: Option<ItemTransformer<H>>,

    pub on_selection_changed: Option<OnSelectionChanged<H>>,

    /// Decides which attached item is "centered". Defaults to [`CenterSnap`].
    pub snap_strategy: Arc<dyn SnapStrategy<H> + Send + Sync>,
}

impl<H: ViewRecycler> Clone for GalleryOptions<H> {
    fn clone(&self) -> Self {
        Self {
            orientation: self.orientation,
            suppress_selection_during_motion: self.suppress_selection_during_motion,
            item_transformer: self.item_transformer.clone(),
            on_selection_changed: self.on_selection_changed.clone(),
            snap_strategy: Arc::clone(&self.snap_strategy),
        }
    }
}

impl<H: ViewRecycler> Default for GalleryOptions<H> {
    fn default() -> Self {
        Self::new(Orientation::Horizontal)
    }
}

impl<H: ViewRecycler> GalleryOptions<H> {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            suppress_selection_during_motion: false,
            item_transformer: None,
            on_selection_changed: None,
            snap_strategy: Arc::new(CenterSnap),
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    pub fn with_suppress_selection_during_motion(mut self, suppress: bool) -> Self {
        self.suppress_selection_during_motion = suppress;
        self
    }

    pub fn with_item_transformer(
        mut self,
        item_transformer: Option<
            impl Fn(&Gallery<H>, &mut H, &H::View, usize, f32) + Send + Sync + 'static,
        >,
    ) -> Self {
        self.item_transformer = item_transformer.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_selection_changed(
        mut self,
        on_selection_changed: Option<impl Fn(&H, &H::View, usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_selection_changed = on_selection_changed.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_snap_strategy(
        mut self,
        snap_strategy: impl SnapStrategy<H> + Send + Sync + 'static,
    ) -> Self {
        self.snap_strategy = Arc::new(snap_strategy);
        self
    }
}

impl<H: ViewRecycler> core::fmt::Debug for GalleryOptions<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GalleryOptions")
            .field("orientation", &self.orientation)
            .field(
                "suppress_selection_during_motion",
                &self.suppress_selection_during_motion,
            )
            .field("item_transformer", &self.item_transformer.is_some())
            .field("on_selection_changed", &self.on_selection_changed.is_some())
            .finish_non_exhaustive()
    }
}
