//! Glyphrun Text - text layout and justification
//!
//! Turns strings into positioned, wrapped, justified and kerned glyph quads
//! for a bitmap font atlas:
//! - Tokenizing into word, space and line-break nodes, with over-long words
//!   crumbled into single characters so they can wrap
//! - Line composition with left, right, centre and justified alignment
//! - Glyph quads with drop shadows, scissor clipping, viewport mapping and
//!   pixel locking
//! - A processed-text cache and a multi-primitive drawing that packs
//!   everything into one vertex buffer
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use glyphrun_core::geometry::Size;
//! use glyphrun_core::math::Vec3;
//! use glyphrun_text::{BitmapFont, DrawingPrimitive, RenderOptions, TextAlign};
//!
//! let font = BitmapFont::grid("abcdefghijklmnopqrstuvwxyz", Size::new(8.0, 14.0), 13)?;
//! let mut primitive = DrawingPrimitive::new(Arc::new(font), RenderOptions::default());
//!
//! let size = primitive.print_bounded(
//!     "the quick brown fox jumps over the lazy dog",
//!     Vec3::new(10.0, 300.0, 0.0),
//!     Size::new(120.0, -1.0),
//!     TextAlign::Justify,
//!     None,
//! );
//! assert!(size.width <= 120.0);
//! assert_eq!(primitive.vertices().len() % 6, 0);
//! # Ok::<(), glyphrun_text::TextError>(())
//! ```
//!
//! Layout works in a Y-down space relative to the print position; emitted
//! vertices are Y-up, so the print position is the top-left corner of the
//! first line.

pub mod cache;
pub mod drawing;
pub mod error;
pub mod font;
pub mod glyph;
pub mod justify;
pub mod layout;
pub mod measure;
pub mod node;
pub mod options;
pub mod primitive;
pub mod viewport;

pub use cache::{ProcessKey, ProcessedTextCache};
pub use drawing::{DrawLayer, DrawRange, TextDrawing};
pub use error::{TextError, TextResult};
pub use font::{BitmapFont, Glyph, GlyphProvider};
pub use glyph::{GlyphBuffers, GlyphRenderer, Quad};
pub use justify::{Justification, justify_line};
pub use layout::{Composition, LengthTweaks, LineComposer, Placement};
pub use node::{NodeId, TextNode, TextNodeKind, TextNodeList};
pub use options::{DropShadow, JustifyOptions, Monospacing, RenderOptions, TextAlign};
pub use primitive::{DrawingPrimitive, ProcessedText};
pub use viewport::ViewportTransform;

// Re-export Color from glyphrun-render
pub use glyphrun_render::Color;
