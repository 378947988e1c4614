//! Natural node widths and crumbling of words that can never fit a line.

use glyphrun_core::profiling::profile_function;

use crate::font::GlyphProvider;
use crate::node::{NodeId, TextNodeKind, TextNodeList};
use crate::options::RenderOptions;

/// Advance of one character, or `None` when the font has no glyph for it.
///
/// `following` continues the kerning pair past the end of `chars`.
pub fn char_advance(
    font: &dyn GlyphProvider,
    options: &RenderOptions,
    chars: &[char],
    index: usize,
    following: Option<char>,
) -> Option<f32> {
    let glyph = font.glyph(chars[index])?;
    if font.is_monospacing_active(options) {
        return Some(font.monospace_width(options));
    }
    Some(
        (glyph.rect.width
            + font.mean_glyph_width() * options.character_spacing
            + font.kerning_correction(index, chars, following))
        .ceil(),
    )
}

/// Width of a single space.
pub fn space_advance(font: &dyn GlyphProvider, options: &RenderOptions) -> f32 {
    if font.is_monospacing_active(options) {
        font.monospace_width(options)
    } else {
        (font.mean_glyph_width() * options.word_spacing).ceil()
    }
}

/// Natural width of one node.
pub fn measure_node(
    list: &TextNodeList,
    id: NodeId,
    font: &dyn GlyphProvider,
    options: &RenderOptions,
) -> f32 {
    match &list.node(id).kind {
        TextNodeKind::Word { text } => {
            let chars: Vec<char> = text.chars().collect();
            let following = list.following_char(id);
            (0..chars.len())
                .filter_map(|i| char_advance(font, options, &chars, i, following))
                .sum()
        }
        TextNodeKind::Space => space_advance(font, options),
        TextNodeKind::LineBreak => 0.0,
    }
}

/// Set the natural length of every node.
pub fn measure_nodes(list: &mut TextNodeList, font: &dyn GlyphProvider, options: &RenderOptions) {
    profile_function!();
    let ids: Vec<NodeId> = list.iter().map(|(id, _)| id).collect();
    for id in ids {
        let length = measure_node(list, id, font, options);
        list.node_mut(id).length = length;
    }
}

/// Split every measured word that can never fit within `max_width` into
/// single characters, then re-measure, since kerning now spans the new node
/// boundaries. Does nothing when word wrap is off.
///
/// Returns the number of words crumbled.
pub fn crumble_long_words(
    list: &mut TextNodeList,
    max_width: f32,
    font: &dyn GlyphProvider,
    options: &RenderOptions,
) -> usize {
    if !options.word_wrap {
        return 0;
    }

    let long_words: Vec<NodeId> = list
        .iter()
        .filter(|(_, node)| node.is_word() && node.length >= max_width)
        .map(|(id, _)| id)
        .collect();

    for &id in &long_words {
        list.crumble(id);
    }
    if !long_words.is_empty() {
        tracing::trace!("Crumbled {} words wider than {}", long_words.len(), max_width);
        measure_nodes(list, font, options);
    }
    long_words.len()
}
