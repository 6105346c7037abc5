use crate::{Insets, LayoutPass, Orientation, Rect, Size};

/// Read access to the container's geometry and its attached children.
///
/// Children are addressed by *slot*: their position in the container's attached list, in
/// main-axis order. The engine keeps slots and data indices in the same order, so slot `0` always
/// holds `first_visible` and the last slot holds `last_visible`.
pub trait Viewport {
    /// A cheap handle to a host view (an id, an `Rc`, ...).
    type View: Clone + PartialEq;

    /// Container size, including padding.
    fn size(&self) -> Size;

    fn padding(&self) -> Insets;

    /// Number of data items currently bound to the container.
    fn item_count(&self) -> usize;

    fn child_count(&self) -> usize;

    fn child_at(&self, slot: usize) -> Option<Self::View>;

    /// Data index currently bound to an attached view.
    fn index_of(&self, view: &Self::View) -> Option<usize>;
}

/// The view provider/recycler side of the host.
///
/// The engine never keeps a view handle past a `recycle` call.
pub trait ViewRecycler: Viewport {
    /// Returns a view bound to `index`, reusing a pooled view when possible.
    fn view_for_index(&mut self, index: usize) -> Self::View;

    /// Returns a detached view to the pool.
    fn recycle(&mut self, view: Self::View);

    /// Attaches `view` as the first (`at_front`) or last child.
    fn attach(&mut self, view: &Self::View, at_front: bool);

    /// Removes `view` from the attached children without recycling it.
    fn detach(&mut self, view: &Self::View);

    fn measure(&mut self, view: &Self::View);

    /// Measured size including decorations, valid after [`Self::measure`].
    fn decorated_size(&self, view: &Self::View) -> Size;

    /// Laid-out bounds including decorations.
    fn decorated_edges(&self, view: &Self::View) -> Rect;

    /// Places `view` at `frame` (decorated bounds).
    fn layout_decorated(&mut self, view: &Self::View, frame: Rect);

    /// Moves every attached child by `delta` along `orientation`'s axis.
    fn offset_children(&mut self, orientation: Orientation, delta: i32);

    /// Marks or unmarks a view as the selected one. Hosts without a selection visual can ignore
    /// this.
    fn set_selected(&mut self, view: &Self::View, selected: bool) {
        let _ = (view, selected);
    }
}

/// The capability set a scrollable container needs from its layout strategy.
pub trait LayoutStrategy<H: ViewRecycler> {
    fn layout(&mut self, host: &mut H, pass: LayoutPass);

    /// Scrolls by a requested delta and returns the amount actually consumed.
    fn scroll_by(&mut self, host: &mut H, delta: i32) -> i32;

    fn can_scroll(&self, axis: Orientation) -> bool;
}
