//! Treemap builder.
//!
//! Orchestrates validation, filtering, the entry cap, the squarify core
//! and label fitting into a [`RenderTree`].

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Rect, Region};
use crate::layout::squarify;
use crate::render::{
    baseline_for, fit_scale, Activatable, Icon, IconNode, LabelNode, PlaceholderNode, RenderTree,
    TileNode, TreemapNode, LABEL_MARGIN,
};
use crate::text::{TextBBox, TextMeasurer};

/// Performance ceiling on the number of laid-out entries. Entries beyond
/// the cap (after sorting) are silently dropped.
pub const MAX_ENTRIES: usize = 1000;

/// One child directory to be drawn as a tile.
pub struct Entry {
    /// Display name.
    pub name: String,
    /// Area weight. Must be finite; non-positive entries are filtered
    /// out before layout.
    pub value: f64,
    /// Label colour; black when unset.
    pub colour: Option<Rgba>,
    /// Tile fill.
    pub background: Option<Rgba>,
    /// Navigation capability; `None` marks a terminal leaf.
    pub action: Option<Rc<dyn Activatable>>,
    /// Access denied: draws a lock icon instead of an empty-folder icon.
    pub restricted: bool,
}

impl Entry {
    /// Create an entry with just a name and a value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            colour: None,
            background: None,
            action: None,
            restricted: false,
        }
    }

    /// Attach the navigation/hover capability.
    #[must_use]
    pub fn action(mut self, action: Rc<dyn Activatable>) -> Self {
        self.action = Some(action);
        self
    }

    /// Mark the entry access-restricted.
    #[must_use]
    pub fn restricted(mut self, restricted: bool) -> Self {
        self.restricted = restricted;
        self
    }

    /// Set the label colour.
    #[must_use]
    pub fn colour(mut self, colour: Rgba) -> Self {
        self.colour = Some(colour);
        self
    }

    /// Set the tile fill.
    #[must_use]
    pub fn background(mut self, background: Rgba) -> Self {
        self.background = Some(background);
        self
    }

    /// Whether the entry is navigable.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }
}

impl Clone for Entry {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            value: self.value,
            colour: self.colour,
            background: self.background,
            action: self.action.clone(),
            restricted: self.restricted,
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("colour", &self.colour)
            .field("background", &self.background)
            .field("action", &self.action.as_ref().map(|_| ".."))
            .field("restricted", &self.restricted)
            .finish()
    }
}

/// Builder for a treemap render.
pub struct Treemap {
    entries: Option<Vec<Entry>>,
    width: f64,
    height: f64,
    restricted: bool,
    on_leave: Option<Rc<dyn Fn()>>,
}

impl Treemap {
    /// Create a builder with no entry table and 800x600 dimensions.
    ///
    /// Leaving the table unset renders nothing: callers distinguish
    /// "not yet loaded" from an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: None,
            width: 800.0,
            height: 600.0,
            restricted: false,
            on_leave: None,
        }
    }

    /// Supply the entry table.
    #[must_use]
    pub fn entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = Some(entries);
        self
    }

    /// Set the pixel dimensions of the treemap area.
    #[must_use]
    pub fn dimensions(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Whether the directory itself is access-restricted; selects the
    /// placeholder icon when the table is empty.
    #[must_use]
    pub fn restricted(mut self, restricted: bool) -> Self {
        self.restricted = restricted;
        self
    }

    /// Callback fired when the pointer leaves the whole treemap area.
    #[must_use]
    pub fn on_leave(mut self, on_leave: Rc<dyn Fn()>) -> Self {
        self.on_leave = Some(on_leave);
        self
    }

    /// Validate and prepare the table for layout.
    ///
    /// Sorts descending by value (stable: equal values keep their input
    /// order), drops non-positive entries and caps the rest at
    /// [`MAX_ENTRIES`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] when a dimension is negative, NaN or
    /// infinite (zero is legal); [`Error::NonFiniteValue`] when an entry
    /// value is NaN or infinite.
    pub fn build(self) -> Result<BuiltTreemap> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let table = match self.entries {
            None => None,
            Some(mut entries) => {
                for entry in &entries {
                    if !entry.value.is_finite() {
                        return Err(Error::NonFiniteValue {
                            name: entry.name.clone(),
                            value: entry.value,
                        });
                    }
                }

                // Values are finite here, so the comparison is total.
                entries.sort_by(|a, b| {
                    b.value
                        .partial_cmp(&a.value)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

                let before = entries.len();
                entries.retain(|e| e.value > 0.0);
                if entries.len() < before {
                    debug!(
                        dropped = before - entries.len(),
                        "filtered non-positive entries"
                    );
                }

                if entries.len() > MAX_ENTRIES {
                    debug!(
                        dropped = entries.len() - MAX_ENTRIES,
                        "entry cap reached, keeping the largest {MAX_ENTRIES}"
                    );
                    entries.truncate(MAX_ENTRIES);
                }

                Some(entries)
            }
        };

        Ok(BuiltTreemap {
            table,
            width: self.width,
            height: self.height,
            restricted: self.restricted,
            on_leave: self.on_leave,
        })
    }
}

impl Default for Treemap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Treemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Treemap")
            .field("entries", &self.entries)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("restricted", &self.restricted)
            .finish()
    }
}

/// A validated treemap, ready to render.
pub struct BuiltTreemap {
    table: Option<Vec<Entry>>,
    width: f64,
    height: f64,
    restricted: bool,
    on_leave: Option<Rc<dyn Fn()>>,
}

impl BuiltTreemap {
    /// The sorted, filtered, capped table; `None` when no table was
    /// supplied.
    #[must_use]
    pub fn table(&self) -> Option<&[Entry]> {
        self.table.as_deref()
    }

    /// Pixel width of the treemap area.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Pixel height of the treemap area.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Lay out and assemble the render tree.
    ///
    /// Never fails: degenerate input renders the placeholder or nothing
    /// at all. `measurer` supplies label metrics; pass
    /// [`crate::text::UnitBoxMeasurer`] in environments without one.
    #[must_use]
    pub fn render(&self, measurer: &dyn TextMeasurer) -> RenderTree {
        let nodes = match &self.table {
            None => Vec::new(),
            Some(entries) if entries.is_empty() => vec![self.placeholder()],
            Some(entries) => self.layout(entries, measurer),
        };

        RenderTree {
            width: self.width,
            height: self.height,
            nodes,
            on_leave: self.on_leave.clone(),
        }
    }

    /// Render straight to an SVG document string.
    #[must_use]
    pub fn to_svg(&self, measurer: &dyn TextMeasurer) -> String {
        crate::output::svg::encode(&self.render(measurer)).render()
    }

    fn placeholder(&self) -> TreemapNode {
        let (icon, aria_label) = if self.restricted {
            (Icon::Lock, "Not authorised to access this directory")
        } else {
            (
                Icon::EmptyDirectory,
                "Directory has no children with current filter",
            )
        };

        TreemapNode::Placeholder(PlaceholderNode {
            rect: Rect::new(0.0, 0.0, self.width, self.height),
            icon,
            icon_height: 150.0,
            icon_y_offset: (self.height - 200.0) / 2.0,
            aria_label,
        })
    }

    fn layout(&self, entries: &[Entry], measurer: &dyn TextMeasurer) -> Vec<TreemapNode> {
        let values: Vec<f64> = entries.iter().map(|e| e.value).collect();
        let rects = squarify(&values, Region::from_size(self.width, self.height));

        // Pass one: measure every label and find the smallest scale any
        // tile demands. All labels share it, so the whole treemap reads
        // at one font size.
        let mut min_scale = f64::INFINITY;
        let mut boxes = Vec::with_capacity(rects.len());
        for (entry, rect) in entries.iter().zip(&rects) {
            let bbox = measurer.measure(&measured_label(entry));
            min_scale = min_scale.min(fit_scale(bbox, rect));
            boxes.push(bbox);
        }

        let font_size = if min_scale.is_finite() {
            min_scale * LABEL_MARGIN
        } else {
            0.0
        };

        entries
            .iter()
            .zip(&rects)
            .zip(&boxes)
            .enumerate()
            .map(|(index, ((entry, rect), bbox))| {
                TreemapNode::Tile(make_tile(entry, index, *rect, *bbox, font_size))
            })
            .collect()
    }
}

impl fmt::Debug for BuiltTreemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltTreemap")
            .field("table", &self.table)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("restricted", &self.restricted)
            .finish()
    }
}

/// Non-actionable labels are measured with a leading "W" to reserve room
/// for the overlay icon.
fn measured_label(entry: &Entry) -> String {
    if entry.has_action() {
        entry.name.clone()
    } else {
        format!("W{}", entry.name)
    }
}

fn make_tile(entry: &Entry, index: usize, rect: Rect, bbox: TextBBox, font_size: f64) -> TileNode {
    let icon = if entry.has_action() {
        None
    } else if entry.restricted {
        Some(IconNode {
            icon: Icon::Lock,
            x: rect.x + (rect.width - bbox.width * font_size) / 2.0,
            y: rect.y + (rect.height - font_size * 0.5) / 2.0,
            width_em: 0.5,
            height_em: 0.5,
            font_size,
        })
    } else {
        Some(IconNode {
            icon: Icon::EmptyDirectory,
            x: rect.x + (rect.width - bbox.width * font_size) / 2.0,
            y: rect.y + (rect.height - font_size * 0.25) / 2.0,
            width_em: 0.5,
            height_em: 0.3846,
            font_size: font_size * 0.9,
        })
    };

    let aria_suffix = if entry.has_action() {
        ""
    } else if entry.restricted {
        "; No authorisation to view"
    } else {
        "; No children with current filter"
    };

    // The lock icon sits on the label's left, so nudge the label right.
    let label_x_offset = if !entry.has_action() && entry.restricted {
        font_size * 0.225
    } else {
        0.0
    };

    TileNode {
        entry_index: index,
        rect,
        label: LabelNode {
            text: entry.name.clone(),
            x: label_x_offset + rect.x + rect.width / 2.0,
            y: rect.y + rect.height / 2.0,
            font_size,
            colour: entry.colour.unwrap_or(Rgba::BLACK),
            baseline: baseline_for(&entry.name),
        },
        icon,
        background: entry.background,
        aria_label: format!("{}{}", entry.name, aria_suffix),
        action: entry.action.clone(),
    }
}
