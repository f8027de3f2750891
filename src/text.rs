//! Text metrics for label fitting.
//!
//! Label scales are computed from em-normalized bounding boxes, so the
//! layout never needs a concrete font size: measure once at a reference
//! size, divide it out, multiply back in at render time. Backends that
//! measure in pixels should probe at [`REFERENCE_SIZE`] and normalize,
//! which sidesteps rounding artifacts some text engines exhibit at small
//! sizes.

use std::cell::RefCell;
use std::collections::HashMap;

/// Reference font size (px) for pixel-measuring backends.
pub const REFERENCE_SIZE: f64 = 1000.0;

/// Em-normalized bounding box of a label string.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextBBox {
    /// Advance width in em.
    pub width: f64,
    /// Ascent above the baseline in em.
    pub height: f64,
    /// Descent below the baseline in em.
    pub depth: f64,
}

impl TextBBox {
    /// The degraded `{1, 1, 1}` box used when no measuring backend is
    /// available. Layout proceeds with uniform sizing instead of failing.
    pub const UNIT: Self = Self {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
    };
}

/// Measures label bounding boxes for a fixed session font.
///
/// Implementations must be pure with respect to the label string: the
/// same label always yields the same box, so results may be memoized
/// indefinitely (see [`CachedMeasurer`]).
pub trait TextMeasurer {
    /// Measure `label`, returning an em-normalized box.
    fn measure(&self, label: &str) -> TextBBox;
}

/// Fallback measurer for environments with no text backend at all.
///
/// Every label measures as [`TextBBox::UNIT`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitBoxMeasurer;

impl TextMeasurer for UnitBoxMeasurer {
    fn measure(&self, _label: &str) -> TextBBox {
        TextBBox::UNIT
    }
}

/// Deterministic approximation from per-character advance classes.
///
/// Good enough for headless rendering and reproducible tests; hosts with
/// access to real font shaping should implement [`TextMeasurer`] over it
/// instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharGridMeasurer;

const DESCENDERS: &[char] = &['g', 'j', 'p', 'q', 'y'];

fn char_advance(c: char) -> f64 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | '\'' | '|' | '!' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.36,
        'm' | 'w' => 0.85,
        'M' | 'W' => 0.94,
        ' ' => 0.3,
        c if c.is_ascii_uppercase() => 0.7,
        c if c.is_ascii_digit() => 0.55,
        c if c.is_ascii_lowercase() => 0.54,
        _ => 0.62,
    }
}

impl TextMeasurer for CharGridMeasurer {
    fn measure(&self, label: &str) -> TextBBox {
        let width = label.chars().map(char_advance).sum::<f64>();
        let depth = if label.chars().any(|c| DESCENDERS.contains(&c)) {
            0.21
        } else {
            0.02
        };

        TextBBox {
            width,
            height: 0.73,
            depth,
        }
    }
}

/// Memoizing wrapper around any [`TextMeasurer`].
///
/// Labels are immutable strings and the font is fixed for the session,
/// so entries never need invalidating.
#[derive(Debug, Default)]
pub struct CachedMeasurer<M> {
    inner: M,
    cache: RefCell<HashMap<String, TextBBox>>,
}

impl<M: TextMeasurer> CachedMeasurer<M> {
    /// Wrap a measurer with a per-label cache.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct labels measured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Whether no label has been measured yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedMeasurer<M> {
    fn measure(&self, label: &str) -> TextBBox {
        if let Some(bbox) = self.cache.borrow().get(label) {
            return *bbox;
        }

        let bbox = self.inner.measure(label);
        self.cache.borrow_mut().insert(label.to_string(), bbox);
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_box_fallback() {
        let m = UnitBoxMeasurer;
        let bbox = m.measure("anything");
        assert_eq!(bbox, TextBBox::UNIT);
    }

    #[test]
    fn test_char_grid_is_pure() {
        let m = CharGridMeasurer;
        assert_eq!(m.measure("projects"), m.measure("projects"));
    }

    #[test]
    fn test_wider_label_measures_wider() {
        let m = CharGridMeasurer;
        assert!(m.measure("alignments").width > m.measure("tmp").width);
    }

    #[test]
    fn test_descenders_add_depth() {
        let m = CharGridMeasurer;
        assert!(m.measure("genomes").depth > m.measure("Data").depth);
    }

    #[test]
    fn test_cache_hits_return_identical_boxes() {
        let m = CachedMeasurer::new(CharGridMeasurer);
        let first = m.measure("scratch115");
        let second = m.measure("scratch115");
        assert_eq!(first, second);
        assert_eq!(m.len(), 1);
    }
}
