use carousel::sim::SimHost;
use carousel::{GalleryOptions, LayoutPass, Size};
use carousel_adapter::Controller;

fn main() {
    // Example: a controller driving a smooth scroll to an index without holding any UI objects.
    //
    // An adapter would:
    // - request the scroll (e.g. in response to a "show item" command)
    // - call tick(host, now_ms) in a frame loop / timer while animating
    // - render the host's attached views
    let mut host = SimHost::new(320, 100).with_uniform_items(100, Size::new(90, 90));
    let mut c = Controller::new(GalleryOptions::horizontal());
    c.gallery_mut()
        .attach(Some(&host), 0)
        .expect("attach once");
    c.gallery_mut()
        .layout(&mut host, LayoutPass::structure_changed());

    c.scroll_to_index_smoothly(40);
    let mut now_ms = 0u64;
    loop {
        let moved = c.tick(&mut host, now_ms);
        if now_ms.is_multiple_of(160) {
            println!(
                "t={now_ms} moved={moved:?} visible={:?}",
                c.gallery().visible_range(&host)
            );
        }
        if !c.is_animating() {
            break;
        }
        now_ms += 16;
    }

    println!(
        "done at t={now_ms}: selected={:?} frame={:?}",
        c.gallery().current_selected_index(),
        host.frame_for_index(40)
    );
}
