//! Render-tree primitives emitted by the treemap builder.
//!
//! The render tree is the crate's primary output: plain drawable data
//! (tiles, labels, icons) plus interaction capabilities, independent of
//! any concrete target. [`crate::output::svg`] encodes it to SVG.

use std::fmt;
use std::rc::Rc;

use crate::color::Rgba;
use crate::geometry::Rect;
use crate::text::TextBBox;

/// Cosmetic factor applied to the fitted label scale to leave margin.
pub(crate) const LABEL_MARGIN: f64 = 0.75;

/// Interaction capability attached to an entry.
///
/// Decouples the rendering layer from event-loop concerns: the host
/// implements this for whatever navigation/hover behavior it needs, and
/// the render tree dispatches to it from the input helpers on
/// [`TileNode`].
pub trait Activatable {
    /// The entry was activated (primary pointer button or Enter key).
    fn on_activate(&self);

    /// The pointer moved over the entry's tile.
    fn on_hover(&self) {}
}

/// Pointer button for [`TileNode::pointer_down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button. The only one that activates.
    Primary,
    /// Middle button.
    Auxiliary,
    /// Right button.
    Secondary,
}

/// Key for [`TileNode::key_press`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Enter activates a focused tile.
    Enter,
    /// Anything else is ignored.
    Other,
}

/// Overlay icon for tiles without a navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Icon {
    /// Access-restricted directory.
    Lock,
    /// Directory with no children under the current filter.
    EmptyDirectory,
}

impl Icon {
    /// Symbol reference understood by the SVG encoder.
    #[must_use]
    pub fn href(self) -> &'static str {
        match self {
            Self::Lock => "#lock",
            Self::EmptyDirectory => "#emptyDirectory",
        }
    }
}

/// Vertical alignment of a label relative to the tile's midline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Baseline {
    /// Baseline through the optical middle; used for labels with
    /// descenders or all-small letterforms.
    Middle,
    /// Baseline through the glyph centre.
    Central,
}

const UNDERHANGS: &[char] = &['g', 'j', 'p', 'q', 'y'];
const SMALL_LETTERS: &str = "acemnorsuvwxz";

/// Optical vertical-centering heuristic for mixed ascender/descender
/// glyphs. Purely cosmetic.
#[must_use]
pub fn baseline_for(label: &str) -> Baseline {
    let all_small =
        !label.is_empty() && label.chars().all(|c| SMALL_LETTERS.contains(c));

    if label.chars().any(|c| UNDERHANGS.contains(&c)) || all_small {
        Baseline::Middle
    } else {
        Baseline::Central
    }
}

/// Largest uniform scale at which `bbox` fits `tile`: full width, 90% of
/// the height.
#[must_use]
pub(crate) fn fit_scale(bbox: TextBBox, tile: &Rect) -> f64 {
    let width_scale = tile.width / bbox.width;
    let height_scale = 0.9 * tile.height / (bbox.height + bbox.depth);
    width_scale.min(height_scale)
}

/// A positioned label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelNode {
    /// Label text.
    pub text: String,
    /// Anchor x (text is centred on this).
    pub x: f64,
    /// Anchor y.
    pub y: f64,
    /// Final font size in px.
    pub font_size: f64,
    /// Text colour.
    pub colour: Rgba,
    /// Vertical alignment.
    pub baseline: Baseline,
}

/// A positioned overlay icon.
#[derive(Debug, Clone, PartialEq)]
pub struct IconNode {
    /// Which symbol to draw.
    pub icon: Icon,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in em (relative to `font_size`).
    pub width_em: f64,
    /// Height in em.
    pub height_em: f64,
    /// Font size (px) the em units resolve against.
    pub font_size: f64,
}

/// One laid-out treemap tile.
pub struct TileNode {
    /// Index of the source entry in the (sorted, filtered) table.
    pub entry_index: usize,
    /// Placed rectangle.
    pub rect: Rect,
    /// Centred label.
    pub label: LabelNode,
    /// Overlay icon; only present on tiles without an action.
    pub icon: Option<IconNode>,
    /// Tile fill.
    pub background: Option<Rgba>,
    /// Accessibility label (name plus restriction/empty suffix).
    pub aria_label: String,
    /// Interaction capability, if the entry is navigable.
    pub action: Option<Rc<dyn Activatable>>,
}

impl TileNode {
    /// Whether the tile activates on input.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Dispatch a pointer press. Only the primary button activates.
    pub fn pointer_down(&self, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        if let Some(action) = &self.action {
            action.on_activate();
        }
    }

    /// Dispatch a key press on a focused tile.
    pub fn key_press(&self, key: Key) {
        if key != Key::Enter {
            return;
        }
        if let Some(action) = &self.action {
            action.on_activate();
        }
    }

    /// Dispatch pointer-over.
    pub fn pointer_over(&self) {
        if let Some(action) = &self.action {
            action.on_hover();
        }
    }
}

impl fmt::Debug for TileNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileNode")
            .field("entry_index", &self.entry_index)
            .field("rect", &self.rect)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("background", &self.background)
            .field("aria_label", &self.aria_label)
            .field("action", &self.action.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Full-box placeholder shown instead of a layout when the filtered
/// table is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderNode {
    /// Bordered rectangle covering the whole box.
    pub rect: Rect,
    /// Centred icon: lock when unauthorised, empty-folder otherwise.
    pub icon: Icon,
    /// Icon height in px.
    pub icon_height: f64,
    /// Vertical offset applied to the icon.
    pub icon_y_offset: f64,
    /// Accessibility label.
    pub aria_label: &'static str,
}

/// A node of the render tree.
#[derive(Debug)]
pub enum TreemapNode {
    /// A laid-out entry.
    Tile(TileNode),
    /// The empty/unauthorised placeholder.
    Placeholder(PlaceholderNode),
}

/// The fully constructed output of one treemap render.
pub struct RenderTree {
    /// Pixel width of the treemap area.
    pub width: f64,
    /// Pixel height of the treemap area.
    pub height: f64,
    /// Drawable nodes, in paint order.
    pub nodes: Vec<TreemapNode>,
    pub(crate) on_leave: Option<Rc<dyn Fn()>>,
}

impl RenderTree {
    /// Iterate over the laid-out tiles, in paint order.
    pub fn tiles(&self) -> impl Iterator<Item = &TileNode> {
        self.nodes.iter().filter_map(|n| match n {
            TreemapNode::Tile(t) => Some(t),
            TreemapNode::Placeholder(_) => None,
        })
    }

    /// Hit-test a point against the tiles. Tiles are disjoint, so at
    /// most one interior match exists; shared edges resolve to the
    /// earlier tile in paint order.
    #[must_use]
    pub fn tile_at(&self, x: f64, y: f64) -> Option<&TileNode> {
        self.tiles().find(|t| t.rect.contains(x, y))
    }

    /// Whether the tree draws nothing (table not yet loaded).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The pointer left the treemap area. Hosts call this to let the
    /// builder's `on_leave` callback clear hover-driven UI.
    pub fn pointer_leave(&self) {
        if let Some(on_leave) = &self.on_leave {
            on_leave();
        }
    }
}

impl fmt::Debug for RenderTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderTree")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("nodes", &self.nodes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_baseline_descenders() {
        assert_eq!(baseline_for("genomes"), Baseline::Middle);
        assert_eq!(baseline_for("jpeg"), Baseline::Middle);
    }

    #[test]
    fn test_baseline_small_letters() {
        assert_eq!(baseline_for("cram"), Baseline::Middle);
    }

    #[test]
    fn test_baseline_capitalised() {
        assert_eq!(baseline_for("Archive"), Baseline::Central);
        assert_eq!(baseline_for("bin"), Baseline::Central);
    }

    #[test]
    fn test_fit_scale_limits() {
        let bbox = TextBBox {
            width: 4.0,
            height: 0.8,
            depth: 0.2,
        };
        // Wide tile: height is the constraint.
        let wide = Rect::new(0.0, 0.0, 400.0, 20.0);
        assert!((fit_scale(bbox, &wide) - 18.0).abs() < 1e-9);

        // Narrow tile: width is the constraint.
        let narrow = Rect::new(0.0, 0.0, 40.0, 200.0);
        assert!((fit_scale(bbox, &narrow) - 10.0).abs() < 1e-9);
    }

    struct Counter {
        activations: Cell<u32>,
        hovers: Cell<u32>,
    }

    impl Activatable for Counter {
        fn on_activate(&self) {
            self.activations.set(self.activations.get() + 1);
        }

        fn on_hover(&self) {
            self.hovers.set(self.hovers.get() + 1);
        }
    }

    fn tile_with_action(action: Rc<Counter>) -> TileNode {
        TileNode {
            entry_index: 0,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            label: LabelNode {
                text: "x".to_string(),
                x: 5.0,
                y: 5.0,
                font_size: 8.0,
                colour: crate::color::Rgba::BLACK,
                baseline: Baseline::Central,
            },
            icon: None,
            background: None,
            aria_label: "x".to_string(),
            action: Some(action),
        }
    }

    #[test]
    fn test_only_primary_button_activates() {
        let counter = Rc::new(Counter {
            activations: Cell::new(0),
            hovers: Cell::new(0),
        });
        let tile = tile_with_action(Rc::clone(&counter));

        tile.pointer_down(PointerButton::Secondary);
        tile.pointer_down(PointerButton::Auxiliary);
        assert_eq!(counter.activations.get(), 0);

        tile.pointer_down(PointerButton::Primary);
        assert_eq!(counter.activations.get(), 1);
    }

    #[test]
    fn test_enter_activates_and_hover_forwards() {
        let counter = Rc::new(Counter {
            activations: Cell::new(0),
            hovers: Cell::new(0),
        });
        let tile = tile_with_action(Rc::clone(&counter));

        tile.key_press(Key::Other);
        assert_eq!(counter.activations.get(), 0);
        tile.key_press(Key::Enter);
        assert_eq!(counter.activations.get(), 1);

        tile.pointer_over();
        assert_eq!(counter.hovers.get(), 1);
    }
}
