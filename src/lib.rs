//! Lays out mathematical notation into a tree of sized, positioned boxes.
//!
//! The crate provides the layout context threaded through a formula
//! ([`Environment`]), the inter-atom spacing rules ([`glue`]), the box tree
//! a renderer consumes ([`MathBox`]) and the line breaker that wraps an
//! overlong horizontal list to a target width ([`split`]). Parsing markup
//! into atoms, font loading and drawing live in the embedding application;
//! the font side is reached through the [`FontContext`] trait.

mod types;
mod typesetting;

pub use crate::types::*;
pub use crate::typesetting::*;
