//! Adapter utilities for the `carousel` crate.
//!
//! The `carousel` crate is UI-agnostic and only reacts to scroll deltas it is given. This crate
//! provides small, framework-neutral drivers commonly needed by adapters:
//!
//! - Tween-based smooth scrolling to an index ([`SmoothScroller`])
//! - Drag handling and release-to-snap settling ([`Controller`])
//!
//! This crate is intentionally framework-agnostic (no toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod smooth;
mod tween;


pub use controller::Controller;
pub use smooth::{SmoothScrollConfig, SmoothScroller};
pub use tween::{Easing, Tween};
