//! An in-memory host for tests, examples and headless simulations.
//!
//! [`SimHost`] keeps an ordered child list, a view pool and per-index item sizes. Views are
//! plain ids ([`SimView`]); their state (bound index, frame, selection mark and a couple of
//! visual properties a transform hook can write) lives in the host.

use alloc::vec::Vec;

use crate::{Insets, Orientation, Rect, Size, ViewRecycler, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimView(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimViewState {
    /// The data index the view is (or was last) bound to.
    pub index: Option<usize>,
    pub measured: Size,
    pub frame: Rect,
    pub selected: bool,
    pub scale: f32,
    pub alpha: f32,
}

impl Default for SimViewState {
    fn default() -> Self {
        Self {
            index: None,
            measured: Size::default(),
            frame: Rect::default(),
            selected: false,
            scale: 1.0,
            alpha: 1.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SimHost {
    size: Size,
    padding: Insets,
    decoration: Insets,
    item_sizes: Vec<Size>,

    children: Vec<SimView>,
    views: Vec<SimViewState>,
    pool: Vec<SimView>,

    created: usize,
    recycled: usize,
}

impl SimHost {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Extra space added around every measured item, like item decorations or margins.
    pub fn with_item_decoration(mut self, decoration: Insets) -> Self {
        self.decoration = decoration;
        self
    }

    pub fn with_item_sizes(mut self, sizes: Vec<Size>) -> Self {
        self.item_sizes = sizes;
        self
    }

    pub fn with_uniform_items(mut self, count: usize, size: Size) -> Self {
        self.set_uniform_items(count, size);
        self
    }

    pub fn set_item_sizes(&mut self, sizes: Vec<Size>) {
        self.item_sizes = sizes;
    }

    pub fn set_uniform_items(&mut self, count: usize, size: Size) {
        self.item_sizes.clear();
        self.item_sizes.resize(count, size);
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.size = Size::new(width, height);
    }

    pub fn children(&self) -> &[SimView] {
        &self.children
    }

    pub fn attached_indices(&self) -> Vec<usize> {
        self.children
            .iter()
            .filter_map(|v| self.state(*v).and_then(|s| s.index))
            .collect()
    }

    pub fn state(&self, view: SimView) -> Option<&SimViewState> {
        self.views.get(view.0 as usize)
    }

    pub fn state_mut(&mut self, view: SimView) -> Option<&mut SimViewState> {
        self.views.get_mut(view.0 as usize)
    }

    pub fn attached_view(&self, index: usize) -> Option<SimView> {
        self.children
            .iter()
            .copied()
            .find(|v| self.state(*v).and_then(|s| s.index) == Some(index))
    }

    pub fn frame_for_index(&self, index: usize) -> Option<Rect> {
        let view = self.attached_view(index)?;
        self.state(view).map(|s| s.frame)
    }

    /// Attached frames in slot order, paired with their data index.
    pub fn attached_frames(&self) -> Vec<(usize, Rect)> {
        self.children
            .iter()
            .filter_map(|v| {
                let s = self.state(*v)?;
                Some((s.index?, s.frame))
            })
            .collect()
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.children
            .iter()
            .filter_map(|v| self.state(*v))
            .filter(|s| s.selected)
            .filter_map(|s| s.index)
            .collect()
    }

    pub fn is_selected(&self, view: SimView) -> bool {
        self.state(view).is_some_and(|s| s.selected)
    }

    /// Number of views created because the pool was empty.
    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn recycled_count(&self) -> usize {
        self.recycled
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    fn take_pooled(&mut self, index: usize) -> Option<SimView> {
        // Prefer a view last bound to the same index, like a scrap cache.
        let pos = self
            .pool
            .iter()
            .position(|v| self.views[v.0 as usize].index == Some(index))
            .or_else(|| self.pool.len().checked_sub(1))?;
        Some(self.pool.swap_remove(pos))
    }
}

impl Viewport for SimHost {
    type View = SimView;

    fn size(&self) -> Size {
        self.size
    }

    fn padding(&self) -> Insets {
        self.padding
    }

    fn item_count(&self) -> usize {
        self.item_sizes.len()
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_at(&self, slot: usize) -> Option<SimView> {
        self.children.get(slot).copied()
    }

    fn index_of(&self, view: &SimView) -> Option<usize> {
        self.state(*view).and_then(|s| s.index)
    }
}

impl ViewRecycler for SimHost {
    fn view_for_index(&mut self, index: usize) -> SimView {
        let view = match self.take_pooled(index) {
            Some(view) => view,
            None => {
                let id = u32::try_from(self.views.len()).unwrap_or(u32::MAX);
                self.views.push(SimViewState::default());
                self.created += 1;
                SimView(id)
            }
        };
        if let Some(state) = self.state_mut(view) {
            state.index = Some(index);
        }
        view
    }

    fn recycle(&mut self, view: SimView) {
        debug_assert!(
            !self.children.contains(&view),
            "recycled a view that is still attached ({view:?})"
        );
        self.pool.push(view);
        self.recycled += 1;
    }

    fn attach(&mut self, view: &SimView, at_front: bool) {
        debug_assert!(
            !self.children.contains(view),
            "view attached twice ({view:?})"
        );
        if at_front {
            self.children.insert(0, *view);
        } else {
            self.children.push(*view);
        }
    }

    fn detach(&mut self, view: &SimView) {
        self.children.retain(|v| v != view);
    }

    fn measure(&mut self, view: &SimView) {
        let decoration = self.decoration;
        let size = self
            .index_of(view)
            .and_then(|i| self.item_sizes.get(i).copied())
            .unwrap_or_default();
        if let Some(state) = self.state_mut(*view) {
            state.measured = Size::new(
                size.width + decoration.left + decoration.right,
                size.height + decoration.top + decoration.bottom,
            );
        }
    }

    fn decorated_size(&self, view: &SimView) -> Size {
        self.state(*view).map(|s| s.measured).unwrap_or_default()
    }

    fn decorated_edges(&self, view: &SimView) -> Rect {
        self.state(*view).map(|s| s.frame).unwrap_or_default()
    }

    fn layout_decorated(&mut self, view: &SimView, frame: Rect) {
        if let Some(state) = self.state_mut(*view) {
            state.frame = frame;
        }
    }

    fn offset_children(&mut self, orientation: Orientation, delta: i32) {
        for i in 0..self.children.len() {
            let view = self.children[i];
            if let Some(state) = self.views.get_mut(view.0 as usize) {
                state.frame = state.frame.offset_main(orientation, delta);
            }
        }
    }

    fn set_selected(&mut self, view: &SimView, selected: bool) {
        if let Some(state) = self.state_mut(*view) {
            state.selected = selected;
        }
    }
}
