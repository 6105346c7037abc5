use crate::{Orientation, Viewport};

/// Finds the attached view closest to the container's main-axis center.
///
/// The engine consults it to decide the current selection; adapters use the same answer to
/// settle the content after a drag.
pub trait SnapStrategy<H: Viewport> {
    fn find_centered_view(&self, host: &H, orientation: Orientation) -> Option<H::View>;
}

/// Main-axis center of the padded viewport.
pub fn container_center<H: Viewport + ?Sized>(host: &H, orientation: Orientation) -> i32 {
    let start = host.padding().main_start(orientation);
    let end = host.size().main(orientation) - host.padding().main_end(orientation);
    (end - start) / 2 + start
}

/// Picks the child whose decorated center is nearest the container center. Ties go to the
/// earlier slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CenterSnap;

impl<H: crate::ViewRecycler> SnapStrategy<H> for CenterSnap {
    fn find_centered_view(&self, host: &H, orientation: Orientation) -> Option<H::View> {
        let center = container_center(host, orientation);
        let mut best: Option<(u32, H::View)> = None;
        for slot in 0..host.child_count() {
            let Some(view) = host.child_at(slot) else {
                continue;
            };
            let edges = host.decorated_edges(&view);
            let distance = edges.main_center(orientation).abs_diff(center);
            if best.as_ref().is_none_or(|(d, _)| distance < *d) {
                best = Some((distance, view));
            }
        }
        best.map(|(_, view)| view)
    }
}
