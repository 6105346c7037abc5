use carousel::sim::SimHost;
use carousel::{GalleryOptions, LayoutPass, Size};
use carousel_adapter::{Controller, Easing, SmoothScrollConfig};

fn main() {
    // Example: a drag that stops between two items, then settles onto the nearest one.
    let mut host = SimHost::new(300, 100).with_uniform_items(20, Size::new(100, 100));
    let mut c = Controller::new(GalleryOptions::horizontal())
        .with_config(SmoothScrollConfig::default().with_easing(Easing::EaseInOutCubic));
    c.gallery_mut()
        .attach(Some(&host), 5)
        .expect("attach once");
    c.gallery_mut()
        .layout(&mut host, LayoutPass::structure_changed());

    for delta in [20, 35, 40, 35] {
        c.on_drag(&mut host, delta);
    }
    println!(
        "released at selected={:?} state={:?}",
        c.gallery().current_selected_index(),
        c.gallery().scroll_state()
    );

    if c.on_release(&mut host) {
        let mut now_ms = 0u64;
        while c.is_animating() {
            if let Some(d) = c.tick(&mut host, now_ms) {
                println!("t={now_ms} delta={d}");
            }
            now_ms += 16;
        }
    }
    println!(
        "settled: selected={:?} state={:?}",
        c.gallery().current_selected_index(),
        c.gallery().scroll_state()
    );
}
