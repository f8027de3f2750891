//! # Disktree
//!
//! Squarified treemap layout and rendering for directory usage
//! dashboards.
//!
//! Given an ordered table of weighted directory entries and a pixel box,
//! the crate partitions the box into one rectangle per entry — areas
//! proportional to values, aspect ratios kept near the golden ratio —
//! and assembles a render tree of tiles, centred best-fit labels and
//! accessibility metadata. An SVG encoder turns the render tree into a
//! standalone document; hosts with their own drawing layer can walk the
//! tree directly.
//!
//! ## Quick Start
//!
//! ```rust
//! use disktree::prelude::*;
//!
//! let entries = vec![
//!     Entry::new("alignments", 712_000_000_000.0),
//!     Entry::new("qc", 48_000_000_000.0),
//!     Entry::new("scratch", 3_000_000_000.0).restricted(true),
//! ];
//!
//! let treemap = Treemap::new()
//!     .entries(entries)
//!     .dimensions(960.0, 540.0)
//!     .build()?;
//!
//! let svg = treemap.to_svg(&CharGridMeasurer);
//! assert!(svg.starts_with("<svg "));
//! # Ok::<(), disktree::Error>(())
//! ```
//!
//! ## Guarantees
//!
//! - Placed rectangles are disjoint and exactly tile the box (up to
//!   floating-point rounding).
//! - Layout is deterministic: the same table and box always produce the
//!   same rectangle sequence.
//! - Rendering never fails. Empty or missing tables render a
//!   placeholder or nothing; a missing text backend degrades to uniform
//!   label sizing.

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]

/// Color types for tile fills and label colours.
pub mod color;

/// Geometric primitives (regions, rectangles).
pub mod geometry;

/// Text metrics and measurer implementations.
pub mod text;

/// The squarify layout core.
pub mod layout;

/// Render-tree primitives and interaction capabilities.
pub mod render;

/// The treemap builder.
pub mod treemap;

/// Output encoders (SVG).
pub mod output;

/// Error types.
pub mod error;

pub use error::{Error, Result};

/// Commonly used types for convenient imports.
///
/// ```rust
/// use disktree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Rect, Region};
    pub use crate::layout::squarify;
    pub use crate::render::{
        Activatable, Baseline, Icon, Key, PointerButton, RenderTree, TileNode, TreemapNode,
    };
    pub use crate::text::{
        CachedMeasurer, CharGridMeasurer, TextBBox, TextMeasurer, UnitBoxMeasurer,
    };
    pub use crate::treemap::{BuiltTreemap, Entry, Treemap, MAX_ENTRIES};
}
