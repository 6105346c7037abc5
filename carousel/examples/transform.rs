// Example: scale/fade items by their distance from the center and report selection changes
// only once the content comes to rest.
use carousel::sim::{SimHost, SimView};
use carousel::{Gallery, GalleryOptions, LayoutPass, ScrollState, Size};

fn main() {
    let options = GalleryOptions::vertical()
        .with_suppress_selection_during_motion(true)
        .with_item_transformer(Some(
            |_g: &Gallery<SimHost>, host: &mut SimHost, view: &SimView, _slot: usize, f: f32| {
                if let Some(state) = host.state_mut(*view) {
                    state.scale = 1.0 - 0.25 * f.abs();
                    state.alpha = 1.0 - 0.5 * f.abs();
                }
            },
        ))
        .with_on_selection_changed(Some(|_host: &SimHost, _view: &SimView, index: usize| {
            println!("selected -> {index}");
        }));

    let mut host = SimHost::new(200, 400).with_uniform_items(20, Size::new(160, 120));
    let mut g = Gallery::new(options);
    g.attach(Some(&host), 3).expect("attach once");
    g.layout(&mut host, LayoutPass::structure_changed());

    g.on_scroll_state_changed(&mut host, ScrollState::Dragging);
    for _ in 0..10 {
        g.scroll_by(&mut host, 30);
    }
    for view in host.children() {
        let state = host.state(*view).expect("attached view has state");
        println!(
            "  item {:?}: top={} scale={:.2} alpha={:.2}",
            state.index, state.frame.top, state.scale, state.alpha
        );
    }
    // Nothing was reported while dragging; the final item is reported here.
    g.on_scroll_state_changed(&mut host, ScrollState::Idle);
}
