//! Processed-text cache.
//!
//! Tokenizing and measuring is the expensive half of printing. Callers that
//! print the same strings every frame can keep the [`ProcessedText`] here and
//! replay it with [`DrawingPrimitive::print_processed`].

use glyphrun_core::alloc::HashMap;
use glyphrun_core::geometry::Size;
use std::sync::{Arc, Weak};

use crate::font::GlyphProvider;
use crate::options::TextAlign;
use crate::primitive::{DrawingPrimitive, ProcessedText};

/// Key for a processed text.
///
/// Covers everything measurement depends on: the font, the text, the layout
/// bounds (after viewport mapping), the alignment and the spacing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessKey {
    font_id: usize,
    text_hash: u64,
    text_len: usize,
    max_width_bits: u32,
    max_height_bits: u32,
    align: TextAlign,
    options_hash: u64,
}

impl ProcessKey {
    pub fn new(
        primitive: &DrawingPrimitive,
        text: &str,
        max_size: Size<f32>,
        align: TextAlign,
    ) -> Self {
        let bounds = primitive.layout_bounds(max_size);
        let options = primitive.options();
        Self {
            font_id: primitive.font_id(),
            text_hash: fxhash::hash64(text),
            text_len: text.len(),
            max_width_bits: bounds.width.to_bits(),
            max_height_bits: bounds.height.to_bits(),
            align,
            options_hash: fxhash::hash64(&(
                options.word_spacing.to_bits(),
                options.character_spacing.to_bits(),
                options.word_wrap,
                options.monospacing,
            )),
        }
    }
}

struct CachedText {
    text: Arc<ProcessedText>,
    /// Source string, compared on lookup so hash collisions miss.
    source: Box<str>,
    /// Holds the font allocation so its address cannot be reused by another
    /// font while the entry lives.
    font: Weak<dyn GlyphProvider>,
    uses: u64,
    last_used_frame: u64,
}

impl CachedText {
    fn matches(&self, primitive: &DrawingPrimitive, text: &str) -> bool {
        *self.source == *text
            && self
                .font
                .upgrade()
                .is_some_and(|font| Arc::ptr_eq(&font, primitive.font_handle()))
    }
}

/// Cache of processed texts keyed by [`ProcessKey`].
pub struct ProcessedTextCache {
    cache: HashMap<ProcessKey, CachedText>,
    frame: u64,
    /// Statistics for monitoring cache performance
    pub hits: u64,
    pub misses: u64,
}

impl ProcessedTextCache {
    pub fn new() -> Self {
        Self {
            cache: HashMap::with_capacity(256),
            frame: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Get the processed form of `text` for `primitive`, processing it on a
    /// miss.
    pub fn get_or_process(
        &mut self,
        primitive: &DrawingPrimitive,
        text: &str,
        max_size: Size<f32>,
        align: TextAlign,
    ) -> Arc<ProcessedText> {
        let key = ProcessKey::new(primitive, text, max_size, align);
        if let Some(cached) = self.lookup(&key, primitive, text) {
            return cached;
        }

        self.misses += 1;
        let processed = Arc::new(primitive.process_text(text, max_size, align));
        self.cache.insert(
            key,
            CachedText {
                text: processed.clone(),
                source: text.into(),
                font: Arc::downgrade(primitive.font_handle()),
                uses: 1,
                last_used_frame: self.frame,
            },
        );
        processed
    }

    /// Get cached text without processing if missing.
    pub fn get(
        &mut self,
        primitive: &DrawingPrimitive,
        text: &str,
        max_size: Size<f32>,
        align: TextAlign,
    ) -> Option<Arc<ProcessedText>> {
        let key = ProcessKey::new(primitive, text, max_size, align);
        let result = self.lookup(&key, primitive, text);
        if result.is_none() {
            self.misses += 1;
        }
        result
    }

    fn lookup(
        &mut self,
        key: &ProcessKey,
        primitive: &DrawingPrimitive,
        text: &str,
    ) -> Option<Arc<ProcessedText>> {
        let cached = self.cache.get_mut(key)?;
        if !cached.matches(primitive, text) {
            tracing::trace!("Stale processed text entry for {:?}", text);
            return None;
        }
        self.hits += 1;
        cached.uses += 1;
        cached.last_used_frame = self.frame;
        Some(cached.text.clone())
    }

    /// Advance the frame counter used by [`prune_unused`](Self::prune_unused).
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Drop entries not used in the last `max_age` frames. Returns how many
    /// were removed.
    pub fn prune_unused(&mut self, max_age: u64) -> usize {
        let before = self.cache.len();
        let frame = self.frame;
        self.cache
            .retain(|_key, cached| frame - cached.last_used_frame <= max_age);
        let removed = before - self.cache.len();
        if removed > 0 {
            tracing::debug!("Pruned {} processed texts", removed);
        }
        removed
    }

    /// Clear the cache and its statistics.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Average number of uses per cached entry (effectiveness metric).
    pub fn avg_uses_per_entry(&self) -> f32 {
        if self.cache.is_empty() {
            return 0.0;
        }
        let total: u64 = self.cache.values().map(|cached| cached.uses).sum();
        total as f32 / self.cache.len() as f32
    }

    pub fn stats_string(&self) -> String {
        format!(
            "ProcessedTextCache: {} entries, {:.1}% hit rate ({} hits, {} misses), {:.1} uses per entry",
            self.len(),
            self.hit_rate() * 100.0,
            self.hits,
            self.misses,
            self.avg_uses_per_entry()
        )
    }
}

impl Default for ProcessedTextCache {
    fn default() -> Self {
        Self::new()
    }
}
