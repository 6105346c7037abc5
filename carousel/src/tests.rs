use crate::sim::{SimHost, SimView};
use crate::*;

use std::sync::{Arc, Mutex};
use std::vec;
use std::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_i32(&mut self, start: i32, end_exclusive: i32) -> i32 {
        let span = (end_exclusive - start) as u64;
        start + self.gen_range_u64(0, span) as i32
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn square(side: i32) -> Size {
    Size::new(side, side)
}

fn attached(
    options: GalleryOptions<SimHost>,
    host: &mut SimHost,
    anchor: usize,
) -> Gallery<SimHost> {
    let mut g = Gallery::new(options);
    g.attach(Some(host), anchor).unwrap();
    g.layout(host, LayoutPass::structure_changed());
    g
}

fn record_selections(
    events: &Arc<Mutex<Vec<usize>>>,
) -> impl Fn(&SimHost, &SimView, usize) + Send + Sync + 'static {
    let events = Arc::clone(events);
    move |_host: &SimHost, _view: &SimView, index: usize| events.lock().unwrap().push(index)
}

fn assert_contiguous(g: &Gallery<SimHost>, host: &SimHost) {
    let o = g.orientation();
    let frames = host.attached_frames();
    if frames.is_empty() {
        assert_eq!(g.visible_range(host), None);
        return;
    }
    let range = g.visible_range(host).unwrap();
    assert!(!range.is_empty());
    assert_eq!(range.len(), frames.len());
    let indices: Vec<usize> = frames.iter().map(|(i, _)| *i).collect();
    let expected: Vec<usize> = (range.first..=range.last).collect();
    assert_eq!(indices, expected, "attached indices must be the visible range");
    for pair in frames.windows(2) {
        assert_eq!(
            pair[0].1.main_end(o),
            pair[1].1.main_start(o),
            "items {} and {} are not adjacent",
            pair[0].0,
            pair[1].0
        );
    }
}

fn assert_overlaps_viewport(g: &Gallery<SimHost>, host: &SimHost) {
    let o = g.orientation();
    let padding = host.padding();
    let start = padding.main_start(o);
    let end = host.size().main(o) - padding.main_end(o);
    for (index, frame) in host.attached_frames() {
        assert!(
            frame.main_end(o) > start && frame.main_start(o) < end,
            "item {index} at {frame:?} is attached outside {start}..{end}"
        );
    }
}

#[test]
fn visible_range_len() {
    let range = VisibleRange { first: 3, last: 5 };
    assert_eq!(range.len(), 3);
    assert!(!range.is_empty());
    assert!(range.contains(5) && !range.contains(6));
    assert_eq!(VisibleRange { first: 2, last: 2 }.len(), 1);

    let inverted = VisibleRange { first: 4, last: 1 };
    assert!(inverted.is_empty());
    assert_eq!(inverted.len(), 0);
}

#[test]
fn initial_fill_centers_anchor_and_fills_outward() {
    let mut host = SimHost::new(300, 200).with_uniform_items(5, square(100));
    let g = attached(GalleryOptions::horizontal(), &mut host, 2);

    // Items 0 and 4 would only touch the viewport edges.
    assert_eq!(host.attached_indices(), vec![1, 2, 3]);
    assert_eq!(
        g.visible_range(&host),
        Some(VisibleRange { first: 1, last: 3 })
    );
    assert_eq!(host.frame_for_index(2), Some(Rect::new(100, 50, 200, 150)));
    assert_eq!(host.frame_for_index(1), Some(Rect::new(0, 50, 100, 150)));
    assert_eq!(host.frame_for_index(3), Some(Rect::new(200, 50, 300, 150)));
    assert_eq!(g.cached_frame(2), host.frame_for_index(2));
    assert_eq!(g.cached_frame_count(), 3);

    assert_eq!(g.current_selected_index(), Some(2));
    assert_eq!(host.selected_indices(), vec![2]);
}

#[test]
fn initial_fill_attaches_partially_visible_neighbors() {
    let mut host = SimHost::new(350, 100).with_uniform_items(5, square(100));
    let _g = attached(GalleryOptions::horizontal(), &mut host, 2);

    // item 2 at 125..225: items 0 and 4 stick into the viewport by 25px.
    assert_eq!(host.attached_indices(), vec![0, 1, 2, 3, 4]);
    assert_eq!(host.frame_for_index(0).unwrap().left, -75);
    assert_eq!(host.frame_for_index(4).unwrap().right, 425);
}

#[test]
fn vertical_fill_respects_padding_and_centers_cross_axis() {
    let mut host = SimHost::new(200, 400)
        .with_padding(Insets::new(10, 20, 10, 20))
        .with_uniform_items(10, square(100));
    let g = attached(GalleryOptions::vertical(), &mut host, 3);

    assert_eq!(host.attached_indices(), vec![1, 2, 3, 4, 5]);
    assert_eq!(host.frame_for_index(3), Some(Rect::new(50, 150, 150, 250)));
    assert_eq!(host.frame_for_index(1), Some(Rect::new(50, -50, 150, 50)));
    assert_eq!(host.frame_for_index(5), Some(Rect::new(50, 350, 150, 450)));
    assert!(g.can_scroll(Orientation::Vertical));
    assert!(!g.can_scroll(Orientation::Horizontal));
    assert_contiguous(&g, &host);
}

#[test]
fn anchor_out_of_bounds_is_clamped() {
    let mut host = SimHost::new(300, 100).with_uniform_items(5, square(100));
    let g = attached(GalleryOptions::horizontal(), &mut host, 10);

    assert_eq!(g.initial_selected_index(), 4);
    assert_eq!(host.attached_indices(), vec![3, 4]);
    assert_eq!(host.frame_for_index(4), Some(Rect::new(100, 0, 200, 100)));
    assert_eq!(g.current_selected_index(), Some(4));
}

#[test]
fn single_item_is_centered_and_cannot_scroll() {
    let mut host = SimHost::new(300, 100).with_uniform_items(1, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 0);

    assert_eq!(host.attached_indices(), vec![0]);
    assert_eq!(g.scroll_by(&mut host, 50), 0);
    assert_eq!(g.scroll_by(&mut host, -50), 0);
    assert_eq!(host.frame_for_index(0), Some(Rect::new(100, 0, 200, 100)));
}

#[test]
fn first_item_centered_clamps_backward_scroll_to_zero() {
    let mut host = SimHost::new(300, 100).with_uniform_items(5, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 0);

    assert_eq!(host.attached_indices(), vec![0, 1]);
    assert_eq!(g.scroll_by(&mut host, -50), 0);
    assert_eq!(host.frame_for_index(0), Some(Rect::new(100, 0, 200, 100)));
}

#[test]
fn last_item_stops_at_center() {
    let mut host = SimHost::new(300, 100).with_uniform_items(5, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 4);
    assert_eq!(g.scroll_by(&mut host, 10), 0);

    assert_eq!(g.scroll_by(&mut host, -30), -30);
    assert_eq!(host.attached_indices(), vec![2, 3, 4]);
    assert_eq!(host.frame_for_index(4), Some(Rect::new(130, 0, 230, 100)));

    // Only 30px remain before item 4 is centered again.
    assert_eq!(g.scroll_by(&mut host, 100), 30);
    assert_eq!(g.last_scroll_delta(), 30);
    assert_eq!(host.frame_for_index(4), Some(Rect::new(100, 0, 200, 100)));
    assert_contiguous(&g, &host);
}

#[test]
fn zero_delta_passes_at_a_boundary_do_not_move_anything() {
    let mut host = SimHost::new(300, 100).with_uniform_items(5, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 4);
    let before = host.attached_frames();
    let range = g.visible_range(&host);

    for _ in 0..5 {
        assert_eq!(g.scroll_by(&mut host, 25), 0);
    }
    assert_eq!(host.attached_frames(), before);
    assert_eq!(g.visible_range(&host), range);
}

#[test]
fn scrolling_forward_then_back_restores_layout() {
    let mut host = SimHost::new(350, 120).with_uniform_items(20, Size::new(100, 80));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 10);
    let before = host.attached_frames();
    let range = g.visible_range(&host);

    for d in [1, 37, 50, 100, 180, 260] {
        assert_eq!(g.scroll_by(&mut host, d), d);
        assert_contiguous(&g, &host);
        assert_eq!(g.scroll_by(&mut host, -d), -d);
        assert_eq!(host.attached_frames(), before, "round trip by {d}");
        assert_eq!(g.visible_range(&host), range);
    }
}

#[test]
fn scroll_recycles_views_instead_of_creating_new_ones() {
    let mut host = SimHost::new(300, 100).with_uniform_items(100, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 0);

    for _ in 0..250 {
        g.scroll_by(&mut host, 45);
        assert_contiguous(&g, &host);
    }
    assert!(host.created_count() <= 6, "created {}", host.created_count());
    assert!(host.recycled_count() > 50);
    assert_eq!(g.current_selected_index(), Some(99));
    assert_eq!(host.frame_for_index(99), Some(Rect::new(100, 0, 200, 100)));
}

#[test]
fn delta_larger_than_viewport_keeps_items_contiguous() {
    let mut host = SimHost::new(300, 100).with_uniform_items(50, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 10);
    assert_eq!(host.attached_indices(), vec![9, 10, 11]);

    assert_eq!(g.scroll_by(&mut host, 1000), 1000);
    assert_contiguous(&g, &host);
    assert_overlaps_viewport(&g, &host);
    // Items passed over during the jump are recycled in the same pass.
    assert_eq!(host.attached_indices(), vec![19, 20, 21]);
    assert_eq!(host.frame_for_index(20), Some(Rect::new(100, 0, 200, 100)));
    assert_eq!(g.current_selected_index(), Some(20));

    assert_eq!(g.scroll_by(&mut host, -1000), -1000);
    assert_contiguous(&g, &host);
    assert_overlaps_viewport(&g, &host);
    assert_eq!(host.attached_indices(), vec![9, 10, 11]);
    assert_eq!(host.frame_for_index(10), Some(Rect::new(100, 0, 200, 100)));
}

#[test]
fn extreme_deltas_stop_at_the_terminal_items() {
    let mut host = SimHost::new(300, 100).with_uniform_items(50, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 40);

    assert_eq!(g.scroll_by(&mut host, i32::MIN), -4000);
    assert_eq!(host.attached_indices(), vec![0, 1]);
    assert_eq!(host.frame_for_index(0), Some(Rect::new(100, 0, 200, 100)));
    assert_eq!(g.current_selected_index(), Some(0));
    assert_eq!(g.scroll_by(&mut host, i32::MIN), 0);

    assert_eq!(g.scroll_by(&mut host, i32::MAX), 4900);
    assert_eq!(host.attached_indices(), vec![48, 49]);
    assert_eq!(host.frame_for_index(49), Some(Rect::new(100, 0, 200, 100)));
    assert_eq!(g.current_selected_index(), Some(49));
    assert_eq!(g.scroll_by(&mut host, i32::MAX), 0);
    assert_contiguous(&g, &host);
}

#[test]
fn extreme_pending_delta_fraction_is_clamped() {
    let mut host = SimHost::new(300, 100).with_uniform_items(5, square(100));
    let g = attached(GalleryOptions::horizontal(), &mut host, 2);
    let view = host.attached_view(2).unwrap();
    assert_eq!(g.center_fraction(&host, &view, i32::MIN), 1.0);
    assert_eq!(g.center_fraction(&host, &view, i32::MAX), -1.0);
}

#[test]
fn transformer_receives_center_fractions() {
    let calls = Arc::new(Mutex::new(Vec::<(usize, usize, f32)>::new()));
    let transform = {
        let calls = Arc::clone(&calls);
        move |_g: &Gallery<SimHost>,
              host: &mut SimHost,
              view: &SimView,
              slot: usize,
              fraction: f32| {
            let index = host.index_of(view).unwrap();
            calls.lock().unwrap().push((slot, index, fraction));
            if let Some(state) = host.state_mut(*view) {
                state.scale = 1.0 - 0.2 * fraction.abs();
            }
        }
    };
    let options = GalleryOptions::horizontal().with_item_transformer(Some(transform));
    let mut host = SimHost::new(300, 100).with_uniform_items(5, square(100));
    let mut g = attached(options, &mut host, 2);

    assert_eq!(
        *calls.lock().unwrap(),
        vec![(0, 1, -1.0), (1, 2, 0.0), (2, 3, 1.0)]
    );
    let center = host.attached_view(2).unwrap();
    assert_eq!(host.state(center).unwrap().scale, 1.0);

    calls.lock().unwrap().clear();
    assert_eq!(g.scroll_by(&mut host, 50), 50);
    assert_eq!(
        *calls.lock().unwrap(),
        vec![(0, 1, -1.0), (1, 2, -0.5), (2, 3, 0.5), (3, 4, 1.0)]
    );
    let scale = host.state(center).unwrap().scale;
    assert!((scale - 0.9).abs() < 1e-6, "scale={scale}");
}

#[test]
fn zero_extent_items_get_zero_fraction() {
    let mut host = SimHost::new(300, 100).with_uniform_items(3, Size::new(0, 50));
    let g = attached(GalleryOptions::horizontal(), &mut host, 1);
    let view = host.attached_view(1).unwrap();
    assert_eq!(g.center_fraction(&host, &view, 0), 0.0);
    assert_eq!(g.center_fraction(&host, &view, 500), 0.0);
}

#[test]
fn zero_sized_viewport_still_lays_out_the_anchor() {
    let mut host = SimHost::new(0, 0).with_uniform_items(4, square(50));
    let g = attached(GalleryOptions::horizontal(), &mut host, 1);
    assert_eq!(host.attached_indices(), vec![1]);
    assert_contiguous(&g, &host);
}

#[test]
fn selection_notifies_immediately_without_suppression() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let options =
        GalleryOptions::horizontal().with_on_selection_changed(Some(record_selections(&events)));
    let mut host = SimHost::new(300, 100).with_uniform_items(10, square(100));
    let mut g = attached(options, &mut host, 0);
    assert_eq!(*events.lock().unwrap(), vec![0]);

    g.on_scroll_state_changed(&mut host, ScrollState::Settling);
    g.scroll_by(&mut host, 100);
    g.scroll_by(&mut host, 100);
    assert_eq!(*events.lock().unwrap(), vec![0, 1, 2]);

    g.on_scroll_state_changed(&mut host, ScrollState::Idle);
    assert_eq!(*events.lock().unwrap(), vec![0, 1, 2]);
    assert_eq!(host.selected_indices(), vec![2]);
}

#[test]
fn suppressed_selection_fires_once_at_idle() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let options = GalleryOptions::horizontal()
        .with_suppress_selection_during_motion(true)
        .with_on_selection_changed(Some(record_selections(&events)));
    let mut host = SimHost::new(300, 100).with_uniform_items(10, square(100));
    let mut g = attached(options, &mut host, 0);
    assert_eq!(*events.lock().unwrap(), vec![0]);

    g.on_scroll_state_changed(&mut host, ScrollState::Settling);
    g.scroll_by(&mut host, 100);
    assert_eq!(g.current_selected_index(), Some(1));
    g.scroll_by(&mut host, 100);
    assert_eq!(g.current_selected_index(), Some(2));
    assert!(g.selection().has_pending_notification());
    assert_eq!(*events.lock().unwrap(), vec![0]);
    // Marks follow the selection even while notifications are deferred.
    assert_eq!(host.selected_indices(), vec![2]);

    g.on_scroll_state_changed(&mut host, ScrollState::Idle);
    assert_eq!(*events.lock().unwrap(), vec![0, 2]);
    assert!(!g.selection().has_pending_notification());

    g.on_scroll_state_changed(&mut host, ScrollState::Idle);
    assert_eq!(*events.lock().unwrap(), vec![0, 2]);
}

#[test]
fn listener_and_flag_can_be_changed_at_runtime() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut host = SimHost::new(300, 100).with_uniform_items(10, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 0);
    g.set_on_selection_changed(Some(record_selections(&events)));
    g.set_suppress_selection_during_motion(true);
    assert!(g.suppress_selection_during_motion());

    g.on_scroll_state_changed(&mut host, ScrollState::Dragging);
    g.scroll_by(&mut host, 100);
    assert!(events.lock().unwrap().is_empty());
    g.on_scroll_state_changed(&mut host, ScrollState::Idle);
    assert_eq!(*events.lock().unwrap(), vec![1]);
}

#[test]
fn selection_tracker_state_machine() {
    let mut t = SelectionTracker::new();
    let u = t.on_scrolled(3, true);
    assert_eq!(
        u,
        SelectionUpdate {
            previous: None,
            changed: true,
            notify: true
        }
    );

    t.set_scroll_state(ScrollState::Settling);
    let u = t.on_scrolled(4, true);
    assert!(u.changed && !u.notify);
    assert_eq!(u.previous, Some(3));
    assert_eq!(
        t.on_scrolled(4, true),
        SelectionUpdate {
            previous: Some(4),
            changed: false,
            notify: false
        }
    );

    t.set_scroll_state(ScrollState::Idle);
    let u = t.on_idle(4, true);
    assert!(!u.changed && u.notify);
    let u = t.on_idle(4, true);
    assert!(!u.notify);

    let u = t.on_idle(5, true);
    assert!(u.changed && u.notify);
    assert_eq!(t.reset(), Some(5));
    assert_eq!(t.current(), None);
}

#[test]
fn idle_without_centered_item_is_ignored() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let options =
        GalleryOptions::horizontal().with_on_selection_changed(Some(record_selections(&events)));
    let mut host = SimHost::new(300, 100).with_uniform_items(0, square(100));
    let mut g = attached(options, &mut host, 0);

    g.on_scroll_state_changed(&mut host, ScrollState::Idle);
    assert!(events.lock().unwrap().is_empty());
    assert_eq!(g.current_selected_index(), None);
}

#[derive(Debug)]
struct FirstChildSnap;

impl SnapStrategy<SimHost> for FirstChildSnap {
    fn find_centered_view(&self, host: &SimHost, _orientation: Orientation) -> Option<SimView> {
        host.child_at(0)
    }
}

#[test]
fn custom_snap_strategy_drives_selection() {
    let mut host = SimHost::new(300, 100).with_uniform_items(5, square(100));
    let g = attached(
        GalleryOptions::horizontal().with_snap_strategy(FirstChildSnap),
        &mut host,
        2,
    );
    assert_eq!(g.current_selected_index(), Some(1));
}

#[test]
fn attach_requires_a_container_and_is_one_time() {
    let mut host = SimHost::new(300, 100).with_uniform_items(5, square(100));
    let mut g: Gallery<SimHost> = Gallery::new(GalleryOptions::horizontal());

    assert_eq!(g.attach(None, 3), Err(GalleryError::MissingContainer));
    assert!(!g.is_attached());
    assert_eq!(g.initial_selected_index(), 0);

    // Not attached: nothing happens.
    g.layout(&mut host, LayoutPass::structure_changed());
    assert_eq!(host.child_count(), 0);
    assert_eq!(g.scroll_by(&mut host, 10), 0);

    g.attach(Some(&host), 3).unwrap();
    assert_eq!(g.attach(Some(&host), 1), Err(GalleryError::AlreadyAttached));
    assert_eq!(g.initial_selected_index(), 3);
}

#[test]
fn extra_and_pre_layout_passes_are_ignored() {
    let mut host = SimHost::new(300, 100).with_uniform_items(10, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 4);
    g.scroll_by(&mut host, 70);
    let before = host.attached_frames();

    g.layout(&mut host, LayoutPass::default());
    assert_eq!(host.attached_frames(), before);
    g.layout(
        &mut host,
        LayoutPass {
            pre_layout: true,
            structure_changed: true,
        },
    );
    assert_eq!(host.attached_frames(), before);
}

#[test]
fn structural_change_relayouts_around_current_selection() {
    let mut host = SimHost::new(300, 100).with_uniform_items(10, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 0);
    g.on_scroll_state_changed(&mut host, ScrollState::Settling);
    g.scroll_by(&mut host, 230);
    assert_eq!(g.current_selected_index(), Some(2));

    // Data set changes mid-fling.
    host.set_uniform_items(8, square(100));
    g.layout(&mut host, LayoutPass::structure_changed());
    assert_eq!(host.frame_for_index(2), Some(Rect::new(100, 0, 200, 100)));
    assert_eq!(g.current_selected_index(), Some(2));
    assert_eq!(host.selected_indices(), vec![2]);
    assert_contiguous(&g, &host);

    host.set_uniform_items(2, square(100));
    g.layout(&mut host, LayoutPass::structure_changed());
    assert_eq!(g.initial_selected_index(), 1);
    assert_eq!(host.attached_indices(), vec![0, 1]);
    assert_eq!(host.frame_for_index(1), Some(Rect::new(100, 0, 200, 100)));
}

#[test]
fn zero_items_clears_everything() {
    let mut host = SimHost::new(300, 100).with_uniform_items(10, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 3);
    assert!(host.child_count() > 0);

    host.set_uniform_items(0, square(100));
    g.layout(&mut host, LayoutPass::default());
    assert_eq!(host.child_count(), 0);
    assert_eq!(g.current_selected_index(), None);
    assert_eq!(g.cached_frame_count(), 0);
    assert_eq!(g.visible_range(&host), None);
    assert_eq!(g.scroll_by(&mut host, 10), 0);
    assert!(host.selected_indices().is_empty());
}

#[test]
fn smooth_scroll_helpers() {
    let mut host = SimHost::new(300, 100).with_uniform_items(10, square(100));
    let mut g = attached(GalleryOptions::horizontal(), &mut host, 5);

    assert_eq!(g.scroll_direction_for(&host, 0), ScrollDirection::Backward);
    assert_eq!(g.scroll_direction_for(&host, 4), ScrollDirection::Forward);
    assert_eq!(g.scroll_direction_for(&host, 9), ScrollDirection::Forward);

    let next = g.find_view_for_index(&host, 6).unwrap();
    assert_eq!(g.distance_to_center(&host, &next), 100);
    let prev = g.find_view_for_index(&host, 4).unwrap();
    assert_eq!(g.distance_to_center(&host, &prev), -100);
    assert!(g.find_view_for_index(&host, 9).is_none());

    g.scroll_to_index_smoothly(2);
    g.scroll_to_index_smoothly(7);
    assert_eq!(g.pending_smooth_scroll_target(), Some(7));
    assert_eq!(g.take_smooth_scroll_target(), Some(7));
    assert_eq!(g.take_smooth_scroll_target(), None);
}

#[test]
fn snapshot_round_trips_the_anchor() {
    let mut host = SimHost::new(100, 300).with_uniform_items(10, square(100));
    let mut g = attached(GalleryOptions::vertical(), &mut host, 0);
    g.scroll_by(&mut host, 300);
    let snapshot = g.snapshot(&host);
    assert_eq!(snapshot.orientation, Orientation::Vertical);
    assert_eq!(snapshot.selected, Some(3));
    assert_eq!(snapshot.scroll_state, ScrollState::Idle);
    assert!(snapshot.visible.unwrap().contains(3));

    let mut fresh_host = SimHost::new(100, 300).with_uniform_items(10, square(100));
    let mut fresh: Gallery<SimHost> = Gallery::new(GalleryOptions::vertical());
    fresh.restore_snapshot(snapshot);
    fresh.attach(Some(&fresh_host), fresh.initial_selected_index()).unwrap();
    fresh.layout(&mut fresh_host, LayoutPass::structure_changed());
    assert_eq!(fresh.current_selected_index(), Some(3));
    assert_eq!(fresh_host.frame_for_index(3), Some(Rect::new(0, 100, 100, 200)));
}

#[test]
fn randomized_layout_and_scroll_invariants() {
    let mut rng = Lcg::new(0x5eed_ca70_05e1);

    for _case in 0..200 {
        let count = rng.gen_range_usize(0, 30);
        let orientation = if rng.gen_bool() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let sizes: Vec<Size> = (0..count)
            .map(|_| Size::new(rng.gen_range_i32(40, 150), rng.gen_range_i32(40, 150)))
            .collect();
        let padding = Insets::uniform(rng.gen_range_i32(0, 20));
        let main = rng.gen_range_i32(200, 600);
        let (w, h) = match orientation {
            Orientation::Horizontal => (main, 200),
            Orientation::Vertical => (200, main),
        };
        let mut host = SimHost::new(w, h)
            .with_padding(padding)
            .with_item_sizes(sizes);
        let anchor = rng.gen_range_usize(0, 40);
        let mut g = attached(GalleryOptions::new(orientation), &mut host, anchor);

        if count == 0 {
            assert_eq!(host.child_count(), 0);
            continue;
        }

        let center = container_center(&host, orientation);
        let clamped = anchor.min(count - 1);
        let frame = host.frame_for_index(clamped).expect("anchor must be attached");
        assert!(
            frame.main_center(orientation).abs_diff(center) <= 1,
            "anchor {clamped} not centered: {frame:?} vs {center}"
        );
        assert_contiguous(&g, &host);

        for _step in 0..40 {
            let delta = rng.gen_range_i32(-150, 151);
            let range = g.visible_range(&host).unwrap();
            // A terminal item that already reached the center must not be pushed past it.
            let last_at_or_after_center = range.last == count - 1
                && host.frame_for_index(count - 1).unwrap().main_center(orientation) >= center;
            let first_at_or_before_center = range.first == 0
                && host.frame_for_index(0).unwrap().main_center(orientation) <= center;

            let consumed = g.scroll_by(&mut host, delta);
            assert!(consumed.abs() <= delta.abs());
            assert!(consumed == 0 || consumed.signum() == delta.signum());
            assert_contiguous(&g, &host);
            assert_overlaps_viewport(&g, &host);

            if delta > 0 && last_at_or_after_center {
                let last = host.frame_for_index(count - 1).unwrap();
                assert!(last.main_center(orientation) >= center);
            }
            if delta < 0 && first_at_or_before_center {
                let first = host.frame_for_index(0).unwrap();
                assert!(first.main_center(orientation) <= center);
            }
            let selected = g.current_selected_index().unwrap();
            assert_eq!(host.selected_indices(), vec![selected]);
        }
    }
}
