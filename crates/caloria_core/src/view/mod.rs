//! Read-only display projections over the food store.
//!
//! # Responsibility
//! - Build header/list view models from store queries.
//! - Render them as plain text for terminal front ends.
//! - Format numbers with locale-dependent digit grouping.

pub mod number;
pub mod render;

pub use number::NumberFormat;
pub use render::{render_header, render_list, FoodListView, FoodRowView, HeaderView};
