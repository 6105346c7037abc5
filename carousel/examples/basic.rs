// Example: lay out a horizontal carousel in an in-memory host and scroll it.
use carousel::sim::SimHost;
use carousel::{Gallery, GalleryOptions, LayoutPass, Size};

fn main() {
    let mut host = SimHost::new(360, 120).with_uniform_items(50, Size::new(100, 80));

    let mut g = Gallery::new(GalleryOptions::horizontal());
    g.attach(Some(&host), 10).expect("attach once");
    g.layout(&mut host, LayoutPass::structure_changed());

    println!("visible={:?}", g.visible_range(&host));
    println!("selected={:?}", g.current_selected_index());
    for (index, frame) in host.attached_frames() {
        println!("  item {index}: {frame:?}");
    }

    // A drag toward later items, in small steps like touch events.
    let mut total = 0;
    for _ in 0..12 {
        total += g.scroll_by(&mut host, 25);
    }
    println!(
        "after scrolling {total}px: visible={:?} selected={:?}",
        g.visible_range(&host),
        g.current_selected_index()
    );
    println!(
        "views created={} recycled={}",
        host.created_count(),
        host.recycled_count()
    );

    // The first item cannot be pulled past the center.
    let mut g = Gallery::new(GalleryOptions::horizontal());
    g.attach(Some(&host), 0).expect("attach once");
    g.layout(&mut host, LayoutPass::structure_changed());
    println!("scroll_by(-50) at the start consumed {}", g.scroll_by(&mut host, -50));
}
