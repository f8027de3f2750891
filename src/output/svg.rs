//! SVG output encoder.
//!
//! Encodes a [`RenderTree`] as a standalone SVG document. Icon nodes
//! reference `#lock` / `#emptyDirectory` symbols, matching the symbol
//! sheet the host page provides; standalone consumers supply their own
//! defs.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::color::Rgba;
use crate::error::Result;
use crate::render::{Baseline, RenderTree, TreemapNode};

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR).
    #[default]
    Start,
    /// Center text at position.
    Middle,
    /// Align text end at position (right-aligned for LTR).
    End,
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone)]
pub enum SvgElement {
    /// Rectangle with a `currentColor` stroke.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width in px.
        width: f64,
        /// Height in px.
        height: f64,
        /// Fill colour; `None` renders as `fill="none"`.
        fill: Option<Rgba>,
        /// CSS class.
        class: Option<&'static str>,
        /// Tab index, for focusable elements.
        tab_index: Option<i32>,
        /// Accessibility label.
        aria_label: Option<String>,
    },
    /// Text span.
    Text {
        /// Anchor x.
        x: f64,
        /// Anchor y.
        y: f64,
        /// Content (escaped on encode).
        text: String,
        /// Font size in px.
        font_size: f64,
        /// Fill colour.
        fill: Rgba,
        /// Horizontal anchoring.
        anchor: TextAnchor,
        /// Dominant baseline.
        baseline: Baseline,
    },
    /// Symbol reference.
    Use {
        /// Symbol href (`#lock`, `#emptyDirectory`).
        href: &'static str,
        /// Left edge; omitted when `None`.
        x: Option<f64>,
        /// Top edge; omitted when `None`.
        y: Option<f64>,
        /// Width attribute, e.g. `"0.5em"`.
        width: Option<String>,
        /// Height attribute.
        height: Option<String>,
        /// Inline style (colour / font-size the em units resolve
        /// against).
        style: Option<String>,
        /// Transform attribute.
        transform: Option<String>,
        /// Tab index.
        tab_index: Option<i32>,
        /// Accessibility label.
        aria_label: Option<String>,
    },
}

/// SVG encoder for treemap render trees.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: f64,
    height: f64,
    elements: Vec<SvgElement>,
}

impl SvgEncoder {
    /// Create an encoder with the given document dimensions.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Number of encoded elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing has been encoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Render to an SVG document string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="treeMap" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Encode a render tree.
#[must_use]
pub fn encode(tree: &RenderTree) -> SvgEncoder {
    let mut encoder = SvgEncoder::new(tree.width, tree.height);

    for node in &tree.nodes {
        match node {
            TreemapNode::Placeholder(p) => {
                encoder.add_element(SvgElement::Rect {
                    x: p.rect.x,
                    y: p.rect.y,
                    width: p.rect.width,
                    height: p.rect.height,
                    fill: None,
                    class: None,
                    tab_index: None,
                    aria_label: None,
                });
                encoder.add_element(SvgElement::Use {
                    href: p.icon.href(),
                    x: None,
                    y: None,
                    width: None,
                    height: Some(format!("{}", p.icon_height)),
                    style: None,
                    transform: Some(format!("translate(0 {})", p.icon_y_offset)),
                    tab_index: Some(0),
                    aria_label: Some(p.aria_label.to_string()),
                });
            }
            TreemapNode::Tile(tile) => {
                encoder.add_element(SvgElement::Rect {
                    x: tile.rect.x,
                    y: tile.rect.y,
                    width: tile.rect.width,
                    height: tile.rect.height,
                    fill: tile.background,
                    class: Some(if tile.has_action() { "hasClick box" } else { "box" }),
                    tab_index: Some(0),
                    aria_label: Some(tile.aria_label.clone()),
                });

                if let Some(icon) = &tile.icon {
                    encoder.add_element(SvgElement::Use {
                        href: icon.icon.href(),
                        x: Some(icon.x),
                        y: Some(icon.y),
                        width: Some(format!("{}em", icon.width_em)),
                        height: Some(format!("{}em", icon.height_em)),
                        style: Some(format!("color:#000;font-size:{}px", icon.font_size)),
                        transform: None,
                        tab_index: None,
                        aria_label: None,
                    });
                }

                encoder.add_element(SvgElement::Text {
                    x: tile.label.x,
                    y: tile.label.y,
                    text: tile.label.text.clone(),
                    font_size: tile.label.font_size,
                    fill: tile.label.colour,
                    anchor: TextAnchor::Middle,
                    baseline: tile.label.baseline,
                });
            }
        }
    }

    encoder
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn anchor_attr(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn baseline_attr(baseline: Baseline) -> &'static str {
    match baseline {
        Baseline::Middle => "middle",
        Baseline::Central => "central",
    }
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            class,
            tab_index,
            aria_label,
        } => {
            let mut s = format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" stroke="currentColor" fill="{}""#,
                fill.map_or_else(|| "none".to_string(), Rgba::to_css)
            );
            if let Some(class) = class {
                let _ = write!(s, r#" class="{class}""#);
            }
            if let Some(tab_index) = tab_index {
                let _ = write!(s, r#" tabindex="{tab_index}""#);
            }
            if let Some(aria_label) = aria_label {
                let _ = write!(s, r#" aria-label="{}""#, escape(aria_label));
            }
            s.push_str("/>");
            s
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
            baseline,
        } => format!(
            r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{}" dominant-baseline="{}">{}</text>"#,
            fill.to_css(),
            anchor_attr(*anchor),
            baseline_attr(*baseline),
            escape(text)
        ),
        SvgElement::Use {
            href,
            x,
            y,
            width,
            height,
            style,
            transform,
            tab_index,
            aria_label,
        } => {
            let mut s = format!(r#"<use href="{href}""#);
            if let Some(x) = x {
                let _ = write!(s, r#" x="{x}""#);
            }
            if let Some(y) = y {
                let _ = write!(s, r#" y="{y}""#);
            }
            if let Some(width) = width {
                let _ = write!(s, r#" width="{width}""#);
            }
            if let Some(height) = height {
                let _ = write!(s, r#" height="{height}""#);
            }
            if let Some(style) = style {
                let _ = write!(s, r#" style="{style}""#);
            }
            if let Some(transform) = transform {
                let _ = write!(s, r#" transform="{transform}""#);
            }
            if let Some(tab_index) = tab_index {
                let _ = write!(s, r#" tabindex="{tab_index}""#);
            }
            if let Some(aria_label) = aria_label {
                let _ = write!(s, r#" aria-label="{}""#, escape(aria_label));
            }
            s.push_str("/>");
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::CharGridMeasurer;
    use crate::treemap::{Entry, Treemap};

    fn svg_for(entries: Option<Vec<Entry>>, restricted: bool) -> String {
        let mut builder = Treemap::new().dimensions(500.0, 400.0).restricted(restricted);
        if let Some(entries) = entries {
            builder = builder.entries(entries);
        }
        builder.build().unwrap().to_svg(&CharGridMeasurer)
    }

    #[test]
    fn empty_table_encodes_the_empty_icon() {
        let svg = svg_for(Some(vec![]), false);
        assert!(svg.contains(r##"href="#emptyDirectory""##), "{svg}");
        assert!(!svg.contains(r##"href="#lock""##));
    }

    #[test]
    fn restricted_placeholder_encodes_the_lock() {
        let svg = svg_for(Some(vec![]), true);
        assert!(svg.contains(r##"href="#lock""##), "{svg}");
        assert!(svg.contains("Not authorised to access this directory"));
    }

    #[test]
    fn tiles_encode_one_rect_and_text_each() {
        let svg = svg_for(
            Some(vec![Entry::new("alpha", 60.0), Entry::new("beta", 40.0)]),
            false,
        );
        assert_eq!(svg.matches("<rect ").count(), 2);
        assert_eq!(svg.matches("<text ").count(), 2);
        assert!(svg.contains(r#"class="box""#));
    }

    #[test]
    fn labels_are_escaped() {
        let svg = svg_for(Some(vec![Entry::new("a&b<c", 1.0)]), false);
        assert!(svg.contains("a&amp;b&lt;c"), "{svg}");
    }

    #[test]
    fn document_declares_dimensions_and_viewbox() {
        let svg = svg_for(None, false);
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0 0 500 400""#), "{svg}");
        assert!(svg.contains(r#"class="treeMap""#));
    }
}
