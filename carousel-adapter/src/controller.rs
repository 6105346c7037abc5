use carousel::{Gallery, GalleryOptions, ScrollState, ViewRecycler};

use crate::{SmoothScrollConfig, SmoothScroller};

/// A framework-neutral controller that wraps a `carousel::Gallery` and drives the motion the
/// engine itself leaves to the host: drags, release-to-snap and smooth scrolls to an index.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_drag` / `on_release` when touch or pointer events occur
/// - `tick(host, now_ms)` each frame/timer tick while `is_animating` (or a smooth scroll was
///   requested through the gallery)
///
/// The controller reports `Dragging`, `Settling` and `Idle` to the gallery so selection
/// notifications are deferred and flushed the same way a host's fling machinery would.
#[derive(Debug)]
pub struct Controller<H: ViewRecycler> {
    gallery: Gallery<H>,
    config: SmoothScrollConfig,
    scroller: Option<SmoothScroller>,
}

impl<H: ViewRecycler> Controller<H> {
    pub fn new(options: GalleryOptions<H>) -> Self {
        Self::from_gallery(Gallery::new(options))
    }

    pub fn from_gallery(gallery: Gallery<H>) -> Self {
        Self {
            gallery,
            config: SmoothScrollConfig::default(),
            scroller: None,
        }
    }

    pub fn with_config(mut self, config: SmoothScrollConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> SmoothScrollConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SmoothScrollConfig) {
        self.config = config;
    }

    pub fn gallery(&self) -> &Gallery<H> {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut Gallery<H> {
        &mut self.gallery
    }

    pub fn into_gallery(self) -> Gallery<H> {
        self.gallery
    }

    pub fn is_animating(&self) -> bool {
        self.scroller.is_some()
    }

    /// The index the running smooth scroll is heading to.
    pub fn animation_target(&self) -> Option<usize> {
        self.scroller.map(|s| s.target())
    }

    pub fn cancel_animation(&mut self) {
        self.scroller = None;
    }

    /// Requests a smooth scroll that centers `index`. It starts on the next `tick`.
    pub fn scroll_to_index_smoothly(&mut self, index: usize) {
        self.gallery.scroll_to_index_smoothly(index);
    }

    /// Applies a drag delta (positive reveals later items) and returns the consumed amount.
    ///
    /// This cancels any running or requested smooth scroll.
    pub fn on_drag(&mut self, host: &mut H, delta: i32) -> i32 {
        self.cancel_animation();
        self.gallery.take_smooth_scroll_target();
        self.set_scroll_state(host, ScrollState::Dragging);
        self.gallery.scroll_by(host, delta)
    }

    /// Ends a drag by settling the centered item onto the container center.
    ///
    /// Returns `true` if a settle animation started; otherwise the gallery is already idle.
    pub fn on_release(&mut self, host: &mut H) -> bool {
        let orientation = self.gallery.orientation();
        let centered = self
            .gallery
            .options()
            .snap_strategy
            .find_centered_view(host, orientation);
        let target = centered.and_then(|view| {
            let distance = self.gallery.distance_to_center(host, &view);
            let index = host.index_of(&view)?;
            (distance != 0).then_some(index)
        });

        match target {
            Some(index) => {
                cdebug!(index, "release: settle onto center");
                self.scroller = Some(SmoothScroller::new(index, self.config));
                self.set_scroll_state(host, ScrollState::Settling);
                true
            }
            None => {
                self.set_scroll_state(host, ScrollState::Idle);
                false
            }
        }
    }

    /// Advances the controller.
    ///
    /// - Picks up a smooth-scroll target registered on the gallery (clamped to the item count).
    /// - If an animation is active, feeds its next delta to the gallery and returns the
    ///   consumed amount. The tick that ends the animation reports `Idle` to the gallery.
    pub fn tick(&mut self, host: &mut H, now_ms: u64) -> Option<i32> {
        if let Some(target) = self.gallery.take_smooth_scroll_target() {
            match host.item_count().checked_sub(1) {
                Some(last) => {
                    let target = target.min(last);
                    cdebug!(index = target, "smooth scroll started");
                    self.scroller = Some(SmoothScroller::new(target, self.config));
                    self.set_scroll_state(host, ScrollState::Settling);
                }
                None => self.cancel_animation(),
            }
        }

        let scroller = self.scroller.as_mut()?;
        let consumed = scroller.tick(&mut self.gallery, host, now_ms);
        if scroller.is_finished() {
            self.scroller = None;
            self.set_scroll_state(host, ScrollState::Idle);
        }
        consumed
    }

    fn set_scroll_state(&mut self, host: &mut H, state: ScrollState) {
        if self.gallery.scroll_state() != state {
            self.gallery.on_scroll_state_changed(host, state);
        }
    }
}
