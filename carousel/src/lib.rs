//! A headless carousel/gallery layout engine for recycling view containers.
//!
//! Items are laid out along a single axis (horizontal or vertical), one item is centered at a
//! time, and the engine decides on every scroll delta which items to attach, which to recycle,
//! and where each attached item goes. After every pass it reports each item's distance from the
//! center to an optional transform hook (scale/alpha/rotation effects), and it tracks which item
//! is selected.
//!
//! It is UI-agnostic. The host container is expected to provide, through [`ViewRecycler`]:
//! - viewport geometry (size, padding) and the attached child list
//! - views for data indices, measurement, placement, and a pool to recycle them into
//!
//! For smooth scrolling and release-to-snap, see the `carousel-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod frames;
mod gallery;
mod host;
mod options;
mod selection;
mod snap;
mod state;
mod types;

pub mod sim;

#[cfg(test)]
mod tests;

pub use error::GalleryError;
pub use gallery::Gallery;
pub use host::{LayoutStrategy, ViewRecycler, Viewport};
pub use options::{GalleryOptions, ItemTransformer, OnSelectionChanged};
pub use selection::{SelectionTracker, SelectionUpdate};
pub use snap::{CenterSnap, SnapStrategy, container_center};
pub use state::GallerySnapshot;
pub use types::{
    Insets, LayoutPass, Orientation, Rect, ScrollDirection, ScrollState, Size, VisibleRange,
};
