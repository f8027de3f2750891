//! Output encoders for render trees.

pub mod svg;

pub use svg::{encode, SvgElement, SvgEncoder, TextAnchor};
