use crate::frames::FrameCache;
use crate::snap::container_center;
use crate::{
    GalleryError, GalleryOptions, GallerySnapshot, LayoutPass, LayoutStrategy, Orientation, Rect,
    ScrollDirection, ScrollState, SelectionTracker, SelectionUpdate, ViewRecycler, VisibleRange,
};

/// A headless carousel layout engine.
///
/// Items are laid out contiguously along one axis with the selected item centered. The engine
/// does not own any views: the host hands out views through [`ViewRecycler`], and every
/// operation borrows the host for its duration.
///
/// Driving it:
/// - `attach` once, then `layout` whenever the host lays out (pass `structure_changed` after the
///   data set changes),
/// - `scroll_by` for every drag/fling/animation delta,
/// - `on_scroll_state_changed` whenever the host's scroll state changes.
///
/// For smooth scrolling and release-to-snap, see the `carousel-adapter` crate.
pub struct Gallery<H: ViewRecycler> {
    options: GalleryOptions<H>,
    attached: bool,

    first_visible: usize,
    last_visible: usize, // inclusive
    initial_selected: usize,
    frames: FrameCache,

    selection: SelectionTracker,
    smooth_target: Option<usize>,
    last_scroll_delta: i32,
}

impl<H: ViewRecycler> Gallery<H> {
    pub fn new(options: GalleryOptions<H>) -> Self {
        cdebug!(orientation = ?options.orientation, "Gallery::new");
        Self {
            options,
            attached: false,
            first_visible: 0,
            last_visible: 0,
            initial_selected: 0,
            frames: FrameCache::new(),
            selection: SelectionTracker::new(),
            smooth_target: None,
            last_scroll_delta: 0,
        }
    }

    pub fn options(&self) -> &GalleryOptions<H> {
        &self.options
    }

    pub fn orientation(&self) -> Orientation {
        self.options.orientation
    }

    /// Binds the engine to its container and seeds the anchor index.
    ///
    /// The binding is one-time. On error nothing is changed.
    pub fn attach(
        &mut self,
        container: Option<&H>,
        initial_selected_index: usize,
    ) -> Result<(), GalleryError> {
        if container.is_none() {
            return Err(GalleryError::MissingContainer);
        }
        if self.attached {
            return Err(GalleryError::AlreadyAttached);
        }
        self.attached = true;
        self.initial_selected = initial_selected_index;
        cdebug!(initial_selected_index, "Gallery::attach");
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// The index of the centered item, `None` until the first selection.
    pub fn current_selected_index(&self) -> Option<usize> {
        self.selection.current()
    }

    /// The anchor used by the next from-scratch layout.
    pub fn initial_selected_index(&self) -> usize {
        self.initial_selected
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.selection.scroll_state()
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// The attached index range, or `None` when nothing is attached.
    pub fn visible_range(&self, host: &H) -> Option<VisibleRange> {
        (host.child_count() > 0).then_some(VisibleRange {
            first: self.first_visible,
            last: self.last_visible,
        })
    }

    /// The frame recorded the last time `index` was laid out.
    pub fn cached_frame(&self, index: usize) -> Option<Rect> {
        self.frames.get(index)
    }

    pub fn cached_frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The delta committed by the most recent `scroll_by`.
    pub fn last_scroll_delta(&self) -> i32 {
        self.last_scroll_delta
    }

    pub fn suppress_selection_during_motion(&self) -> bool {
        self.options.suppress_selection_during_motion
    }

    pub fn set_suppress_selection_during_motion(&mut self, suppress: bool) {
        self.options.suppress_selection_during_motion = suppress;
    }

    pub fn set_item_transformer(
        &mut self,
        item_transformer: Option<
            impl Fn(&Gallery<H>, &mut H, &H::View, usize, f32) + Send + Sync + 'static,
        >,
    ) {
        self.options.item_transformer = item_transformer.map(|f| alloc::sync::Arc::new(f) as _);
    }

    pub fn set_on_selection_changed(
        &mut self,
        on_selection_changed: Option<impl Fn(&H, &H::View, usize) + Send + Sync + 'static>,
    ) {
        self.options.on_selection_changed =
            on_selection_changed.map(|f| alloc::sync::Arc::new(f) as _);
    }

    pub fn can_scroll(&self, axis: Orientation) -> bool {
        self.options.orientation == axis
    }

    pub fn snapshot(&self, host: &H) -> GallerySnapshot {
        GallerySnapshot {
            orientation: self.options.orientation,
            visible: self.visible_range(host),
            selected: self.selection.current(),
            scroll_state: self.selection.scroll_state(),
        }
    }

    /// Reseeds the anchor from a saved snapshot.
    ///
    /// Takes effect on the next structural layout. A live selection still wins over the restored
    /// anchor, so call this before the first layout.
    pub fn restore_snapshot(&mut self, snapshot: GallerySnapshot) {
        if let Some(selected) = snapshot.selected {
            self.initial_selected = selected;
        }
    }

    /// Runs a host layout pass.
    ///
    /// With zero items every child is recycled and all layout state is cleared. Otherwise only a
    /// pass reporting a structural change lays out again, from scratch, around the anchor.
    pub fn layout(&mut self, host: &mut H, pass: LayoutPass) {
        if !self.attached {
            cwarn!("layout called on a gallery that is not attached");
            return;
        }

        let count = host.item_count();
        if count == 0 {
            self.reset(host);
            self.detach_and_recycle_all(host);
            return;
        }
        if pass.pre_layout {
            return;
        }
        if !pass.structure_changed {
            ctrace!(count, "layout: ignore extra layout step");
            return;
        }

        self.reset(host);
        self.initial_selected = self.initial_selected.min(count - 1);
        self.first_fill(host);
    }

    /// Scrolls the content by `delta` (positive reveals later indices) and returns the consumed
    /// amount.
    ///
    /// Once the final item is attached it cannot be dragged past the container center; the same
    /// holds for item `0` in the other direction. Every attached item overlaps the viewport
    /// afterwards.
    pub fn scroll_by(&mut self, host: &mut H, delta: i32) -> i32 {
        if !self.attached {
            cwarn!("scroll_by called on a gallery that is not attached");
            return 0;
        }
        if host.child_count() == 0 || delta == 0 {
            return 0;
        }

        // Keep the delta negatable.
        let delta = delta.max(-i32::MAX);
        let consumed = self.fill_cover(host, delta);
        ctrace!(delta, consumed, "scroll_by");

        self.last_scroll_delta = consumed;
        host.offset_children(self.options.orientation, -consumed);
        if consumed != 0 {
            self.on_scrolled(host);
        }
        consumed
    }

    /// Re-evaluates the centered item after the content moved.
    ///
    /// `scroll_by` and `layout` call this themselves; hosts only need it when the content moves
    /// through other means.
    pub fn on_scrolled(&mut self, host: &mut H) {
        let Some((view, index)) = self.centered_view(host) else {
            return;
        };
        let update = self
            .selection
            .on_scrolled(index, self.options.suppress_selection_during_motion);
        self.apply_selection(host, &view, index, update);
    }

    /// Reports a scroll state change from the host's input/fling machinery.
    pub fn on_scroll_state_changed(&mut self, host: &mut H, state: ScrollState) {
        if !self.attached {
            return;
        }
        self.selection.set_scroll_state(state);
        ctrace!(state = ?state, "on_scroll_state_changed");
        if !state.is_idle() {
            return;
        }

        let Some((view, index)) = self.centered_view(host) else {
            cwarn!("on_scroll_state_changed: no centered item at idle");
            return;
        };
        let update = self
            .selection
            .on_idle(index, self.options.suppress_selection_during_motion);
        self.apply_selection(host, &view, index, update);
    }

    /// Registers a smooth-scroll target for the smooth-scroll driver to pick up.
    ///
    /// A newer target supersedes an older one.
    pub fn scroll_to_index_smoothly(&mut self, index: usize) {
        cdebug!(index, "scroll_to_index_smoothly");
        self.smooth_target = Some(index);
    }

    pub fn pending_smooth_scroll_target(&self) -> Option<usize> {
        self.smooth_target
    }

    pub fn take_smooth_scroll_target(&mut self) -> Option<usize> {
        self.smooth_target.take()
    }

    /// The direction content must move to bring `target` into view.
    pub fn scroll_direction_for(&self, host: &H, target: usize) -> ScrollDirection {
        if host.child_count() == 0 || target < self.first_visible {
            return ScrollDirection::Backward;
        }
        ScrollDirection::Forward
    }

    pub fn find_view_for_index(&self, host: &H, index: usize) -> Option<H::View> {
        let child_count = host.child_count();
        if child_count == 0 {
            return None;
        }
        if let Some(slot) = index.checked_sub(self.first_visible)
            && let Some(view) = host.child_at(slot)
            && host.index_of(&view) == Some(index)
        {
            return Some(view);
        }
        (0..child_count)
            .filter_map(|slot| host.child_at(slot))
            .find(|view| host.index_of(view) == Some(index))
    }

    /// Signed scroll distance that would center `view`; positive means the content must advance.
    pub fn distance_to_center(&self, host: &H, view: &H::View) -> i32 {
        let orientation = self.options.orientation;
        host.decorated_edges(view).main_center(orientation) - container_center(host, orientation)
    }

    /// Signed distance of `view`'s center from the container center after a pending scroll of
    /// `pending_delta`, in units of the view's own main-axis extent, clamped to `[-1, 1]`.
    ///
    /// Returns `0.0` for views with no extent.
    pub fn center_fraction(&self, host: &H, view: &H::View, pending_delta: i32) -> f32 {
        let orientation = self.options.orientation;
        let edges = host.decorated_edges(view);
        let len = edges.main_len(orientation);
        if len <= 0 {
            return 0.0;
        }
        let distance = (len / 2)
            .saturating_sub(pending_delta)
            .saturating_add(edges.main_start(orientation))
            .saturating_sub(container_center(host, orientation));
        (distance as f32 / len as f32).clamp(-1.0, 1.0)
    }

    fn reset(&mut self, host: &mut H) {
        let count = host.item_count();
        self.frames.clear();

        // Keep the live selection as the anchor across data-set changes.
        if let Some(current) = self.selection.current() {
            self.initial_selected = current;
        }
        self.initial_selected = self.initial_selected.min(count.saturating_sub(1));
        self.first_visible = self.initial_selected;
        self.last_visible = self.initial_selected;

        if let Some(previous) = self.selection.reset()
            && let Some(view) = self.find_view_for_index(host, previous)
        {
            host.set_selected(&view, false);
        }
        cdebug!(count, anchor = self.initial_selected, "reset");
    }

    fn first_fill(&mut self, host: &mut H) {
        let orientation = self.options.orientation;
        self.detach_and_recycle_all(host);

        let anchor = self.initial_selected;
        let frame = self.place_centered(host, anchor, true);
        self.first_visible = anchor;
        self.last_visible = anchor;

        let start_edge = self.start_edge(host);
        let end_edge = self.end_edge(host);
        self.fill_toward_start(
            host,
            anchor.checked_sub(1),
            frame.main_start(orientation),
            start_edge,
        );
        self.fill_toward_end(host, anchor + 1, frame.main_end(orientation), end_edge);
        cdebug!(
            first = self.first_visible,
            last = self.last_visible,
            "first_fill finished"
        );
        self.debug_assert_visible_range(host);

        self.dispatch_transform(host, 0);
        self.on_scrolled(host);
    }

    fn fill_cover(&mut self, host: &mut H, delta: i32) -> i32 {
        if host.item_count() == 0 {
            return 0;
        }
        let consumed = self.fill(host, delta);
        self.dispatch_transform(host, consumed);
        consumed
    }

    /// Attaches the items that enter the viewport on the advancing side, clamps `delta` so a
    /// terminal item cannot pass the container center, then recycles the children that leave
    /// the viewport on the retreating side. Returns the clamped delta.
    fn fill(&mut self, host: &mut H, delta: i32) -> i32 {
        let orientation = self.options.orientation;
        let count = host.item_count();
        let start_edge = self.start_edge(host);
        let end_edge = self.end_edge(host);

        let consumed = if delta >= 0 {
            let anchor = self.last_child(host).and_then(|view| {
                let index = host.index_of(&view)?;
                Some((index + 1, host.decorated_edges(&view).main_end(orientation)))
            });
            let limit = end_edge.saturating_add(delta);
            match anchor {
                Some((next, edge)) => self.fill_toward_end(host, next, edge, limit),
                None => {
                    let seed = self.first_visible.min(count - 1);
                    let frame = self.place_centered(host, seed, false);
                    self.first_visible = seed;
                    self.last_visible = seed;
                    self.fill_toward_end(host, seed + 1, frame.main_end(orientation), limit);
                }
            }
            let consumed = self.clamp_to_terminal(host, delta);
            self.recycle_leading(host, consumed, start_edge);
            consumed
        } else {
            let anchor = host.child_at(0).and_then(|view| {
                let index = host.index_of(&view)?;
                Some((
                    index.checked_sub(1),
                    host.decorated_edges(&view).main_start(orientation),
                ))
            });
            let limit = start_edge.saturating_add(delta);
            match anchor {
                Some((next, edge)) => self.fill_toward_start(host, next, edge, limit),
                None => {
                    let seed = self.last_visible.min(count - 1);
                    let frame = self.place_centered(host, seed, true);
                    self.first_visible = seed;
                    self.last_visible = seed;
                    self.fill_toward_start(
                        host,
                        seed.checked_sub(1),
                        frame.main_start(orientation),
                        limit,
                    );
                }
            }
            let consumed = self.clamp_to_terminal(host, delta);
            self.recycle_trailing(host, consumed, end_edge);
            consumed
        };
        self.debug_assert_visible_range(host);
        consumed
    }

    /// Clamps `delta` so the final item (moving forward) or item `0` (moving backward) stops at
    /// the container center once it is attached.
    fn clamp_to_terminal(&self, host: &H, delta: i32) -> i32 {
        let orientation = self.options.orientation;
        let center = container_center(host, orientation);
        if delta > 0 {
            let last_index = host.item_count().saturating_sub(1);
            if let Some(last) = self.last_child(host)
                && host.index_of(&last) == Some(last_index)
            {
                let limit = host.decorated_edges(&last).main_center(orientation) - center;
                return delta.min(limit).max(0);
            }
        } else if delta < 0
            && let Some(first) = host.child_at(0)
            && host.index_of(&first) == Some(0)
        {
            let limit = host.decorated_edges(&first).main_center(orientation) - center;
            return delta.max(limit).min(0);
        }
        delta
    }

    fn recycle_leading(&mut self, host: &mut H, delta: i32, start_edge: i32) {
        let orientation = self.options.orientation;
        for _ in 0..host.child_count() {
            let Some(view) = host.child_at(0) else {
                break;
            };
            let main_end = host.decorated_edges(&view).main_end(orientation);
            if main_end.saturating_sub(delta) > start_edge {
                break;
            }
            ctrace!(index = self.first_visible, "recycle leading child");
            self.recycle_view(host, view);
            self.first_visible += 1;
        }
    }

    fn recycle_trailing(&mut self, host: &mut H, delta: i32, end_edge: i32) {
        let orientation = self.options.orientation;
        for _ in 0..host.child_count() {
            let Some(view) = self.last_child(host) else {
                break;
            };
            let main_start = host.decorated_edges(&view).main_start(orientation);
            if main_start.saturating_sub(delta) < end_edge {
                break;
            }
            ctrace!(index = self.last_visible, "recycle trailing child");
            self.recycle_view(host, view);
            self.last_visible = self.last_visible.saturating_sub(1);
        }
    }

    /// Attaches items with decreasing indices in front of `offset` while they still overlap the
    /// region after `limit`.
    fn fill_toward_start(
        &mut self,
        host: &mut H,
        mut next: Option<usize>,
        mut offset: i32,
        limit: i32,
    ) {
        let orientation = self.options.orientation;
        while let Some(index) = next {
            if offset <= limit {
                break;
            }
            let (view, frame) = self.obtain_view(host, index, true, |len| offset - len);
            host.layout_decorated(&view, frame);
            self.frames.put_or_set(index, frame);
            offset = frame.main_start(orientation);
            self.first_visible = index;
            next = index.checked_sub(1);
        }
    }

    /// Attaches items with increasing indices after `offset` while they still start before
    /// `limit`.
    fn fill_toward_end(&mut self, host: &mut H, mut index: usize, mut offset: i32, limit: i32) {
        let orientation = self.options.orientation;
        let count = host.item_count();
        while index < count && offset < limit {
            let (view, frame) = self.obtain_view(host, index, false, |_| offset);
            host.layout_decorated(&view, frame);
            self.frames.put_or_set(index, frame);
            offset = frame.main_end(orientation);
            self.last_visible = index;
            index += 1;
        }
    }

    fn place_centered(&mut self, host: &mut H, index: usize, at_front: bool) -> Rect {
        let orientation = self.options.orientation;
        let main_pad = host.padding().main_start(orientation);
        let main_space = self.end_edge(host) - self.start_edge(host);
        let (view, frame) = self.obtain_view(host, index, at_front, |len| {
            center_in(main_pad, main_space, len)
        });
        host.layout_decorated(&view, frame);
        self.frames.put_or_set(index, frame);
        frame
    }

    /// Fetches, attaches and measures the view for `index` and computes its frame. The cross
    /// axis is always centered; `main_start` maps the measured main-axis length to its start.
    fn obtain_view(
        &self,
        host: &mut H,
        index: usize,
        at_front: bool,
        main_start: impl FnOnce(i32) -> i32,
    ) -> (H::View, Rect) {
        let orientation = self.options.orientation;
        let view = host.view_for_index(index);
        host.attach(&view, at_front);
        host.measure(&view);
        if self.selection.current() == Some(index) {
            host.set_selected(&view, true);
        }

        let size = host.decorated_size(&view);
        let main_len = size.main(orientation);
        let cross_len = size.cross(orientation);
        let padding = host.padding();
        let cross_pad = padding.cross_start(orientation);
        let cross_space =
            host.size().cross(orientation) - cross_pad - padding.cross_end(orientation);
        let frame = Rect::from_axes(
            orientation,
            main_start(main_len),
            main_len,
            center_in(cross_pad, cross_space, cross_len),
            cross_len,
        );
        (view, frame)
    }

    fn recycle_view(&self, host: &mut H, view: H::View) {
        if let Some(current) = self.selection.current()
            && host.index_of(&view) == Some(current)
        {
            host.set_selected(&view, false);
        }
        host.detach(&view);
        host.recycle(view);
    }

    fn detach_and_recycle_all(&self, host: &mut H) {
        for slot in (0..host.child_count()).rev() {
            if let Some(view) = host.child_at(slot) {
                self.recycle_view(host, view);
            }
        }
    }

    fn dispatch_transform(&self, host: &mut H, pending_delta: i32) {
        let Some(transform) = self.options.item_transformer.clone() else {
            return;
        };
        for slot in 0..host.child_count() {
            let Some(view) = host.child_at(slot) else {
                continue;
            };
            let fraction = self.center_fraction(host, &view, pending_delta);
            transform(self, host, &view, slot, fraction);
        }
    }

    fn centered_view(&self, host: &H) -> Option<(H::View, usize)> {
        let view = self
            .options
            .snap_strategy
            .find_centered_view(host, self.options.orientation)?;
        let index = host.index_of(&view)?;
        Some((view, index))
    }

    fn apply_selection(&self, host: &mut H, view: &H::View, index: usize, update: SelectionUpdate) {
        if update.changed {
            if let Some(previous) = update.previous
                && let Some(previous_view) = self.find_view_for_index(host, previous)
            {
                host.set_selected(&previous_view, false);
            }
            host.set_selected(view, true);
            cdebug!(index, previous = ?update.previous, "selection changed");
        }
        if update.notify {
            if let Some(cb) = &self.options.on_selection_changed {
                cb(host, view, index);
            }
        } else if update.changed {
            ctrace!(index, "selection notification deferred until idle");
        }
    }

    fn last_child(&self, host: &H) -> Option<H::View> {
        host.child_at(host.child_count().checked_sub(1)?)
    }

    fn start_edge(&self, host: &H) -> i32 {
        host.padding().main_start(self.options.orientation)
    }

    fn end_edge(&self, host: &H) -> i32 {
        let orientation = self.options.orientation;
        host.size().main(orientation) - host.padding().main_end(orientation)
    }

    fn debug_assert_visible_range(&self, host: &H) {
        if !cfg!(debug_assertions) {
            return;
        }
        let child_count = host.child_count();
        if child_count == 0 {
            return;
        }
        debug_assert!(
            self.first_visible <= self.last_visible,
            "visible range inverted (first={}, last={})",
            self.first_visible,
            self.last_visible
        );
        debug_assert_eq!(
            self.last_visible - self.first_visible + 1,
            child_count,
            "visible range does not match attached children"
        );
        for slot in 0..child_count {
            let index = host.child_at(slot).and_then(|view| host.index_of(&view));
            debug_assert_eq!(
                index,
                Some(self.first_visible + slot),
                "attached children are not the contiguous visible range (slot={slot})"
            );
        }
    }
}

impl<H: ViewRecycler> LayoutStrategy<H> for Gallery<H> {
    fn layout(&mut self, host: &mut H, pass: LayoutPass) {
        Gallery::layout(self, host, pass);
    }

    fn scroll_by(&mut self, host: &mut H, delta: i32) -> i32 {
        Gallery::scroll_by(self, host, delta)
    }

    fn can_scroll(&self, axis: Orientation) -> bool {
        Gallery::can_scroll(self, axis)
    }
}

impl<H: ViewRecycler> core::fmt::Debug for Gallery<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gallery")
            .field("options", &self.options)
            .field("attached", &self.attached)
            .field("first_visible", &self.first_visible)
            .field("last_visible", &self.last_visible)
            .field("initial_selected", &self.initial_selected)
            .field("selection", &self.selection)
            .field("smooth_target", &self.smooth_target)
            .finish_non_exhaustive()
    }
}

/// Start offset that centers `len` inside `space` after `pad`, truncated toward zero.
fn center_in(pad: i32, space: i32, len: i32) -> i32 {
    (pad as f32 + (space - len) as f32 / 2.0) as i32
}
