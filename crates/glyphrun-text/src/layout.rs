//! Line composition: walks a measured node list, breaks it into lines and
//! reports where every consumed node goes.
//!
//! The same walk serves printing and measuring. Printing renders each
//! [`Placement`] as it is produced; measuring ignores them and keeps only
//! the resulting size, so both always agree.

use glyphrun_core::geometry::Size;
use glyphrun_core::profiling::profile_function;

use crate::font::GlyphProvider;
use crate::justify::justify_line;
use crate::node::{NodeId, TextNodeList};
use crate::options::{RenderOptions, TextAlign};

/// Per-pass justification adjustments, one per node slot.
///
/// Created zeroed for every composition pass, so tweaks never carry over
/// between calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LengthTweaks {
    tweaks: Vec<f32>,
}

impl LengthTweaks {
    pub fn new(list: &TextNodeList) -> Self {
        Self {
            tweaks: vec![0.0; list.len()],
        }
    }

    pub fn get(&self, id: NodeId) -> f32 {
        self.tweaks.get(id.index()).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, id: NodeId, tweak: f32) {
        if let Some(slot) = self.tweaks.get_mut(id.index()) {
            *slot = tweak;
        }
    }

    /// Natural length plus this pass's tweak.
    pub fn modified_length(&self, list: &TextNodeList, id: NodeId) -> f32 {
        list.node(id).length + self.get(id)
    }

    pub fn total(&self) -> f32 {
        self.tweaks.iter().sum()
    }
}

/// A node placed on a line, relative to the print origin. `y` grows
/// downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub node: NodeId,
    pub x: f32,
    pub y: f32,
    /// Justification pixels to spread inside the node.
    pub tweak: f32,
}

/// Result of one composition pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Widest line and total height of the laid-out block.
    pub size: Size<f32>,
    pub line_count: usize,
    /// Tweaks the justifier wrote during the pass.
    pub tweaks: LengthTweaks,
}

/// A space that would end up dangling at the end of a line: it is followed
/// by a word and the two together overflow `bound`. Only one space is
/// looked at, so deliberate runs of spaces are kept.
pub fn skip_trailing_space(
    list: &TextNodeList,
    tweaks: &LengthTweaks,
    id: NodeId,
    length_so_far: f32,
    bound: f32,
) -> bool {
    let node = list.node(id);
    if !node.is_space() {
        return false;
    }
    let Some(next) = node.next() else {
        return false;
    };
    list.node(next).is_word()
        && tweaks.modified_length(list, id) + tweaks.modified_length(list, next) + length_so_far
            > bound
}

/// Natural width of the line starting at `start`, used to offset right and
/// centre aligned lines.
pub fn line_length(
    list: &TextNodeList,
    tweaks: &LengthTweaks,
    start: NodeId,
    max_width: f32,
) -> f32 {
    let mut consumed = false;
    let mut length = 0.0;
    for (id, node) in list.iter_from(start) {
        if node.is_line_break() {
            break;
        }
        if consumed && skip_trailing_space(list, tweaks, id, length, max_width) {
            break;
        }
        if length + node.length <= max_width || !consumed {
            consumed = true;
            length += node.length;
        } else {
            break;
        }
    }
    length
}

/// Breaks measured text into lines.
pub struct LineComposer<'a> {
    font: &'a dyn GlyphProvider,
    options: &'a RenderOptions,
}

impl<'a> LineComposer<'a> {
    pub fn new(font: &'a dyn GlyphProvider, options: &'a RenderOptions) -> Self {
        Self { font, options }
    }

    /// Vertical advance between lines.
    pub fn line_spacing(&self) -> f32 {
        (self.font.max_glyph_height() * self.options.line_spacing).ceil()
    }

    /// Horizontal offset of the line starting at `head`. Justified lines
    /// start at zero and get their tweaks written instead.
    fn begin_line(
        &self,
        list: &TextNodeList,
        tweaks: &mut LengthTweaks,
        head: NodeId,
        max_width: f32,
        align: TextAlign,
    ) -> f32 {
        match align {
            TextAlign::Left => 0.0,
            TextAlign::Right => {
                let anchor = if max_width.is_finite() { max_width } else { 0.0 };
                -(line_length(list, tweaks, head, max_width) - anchor).ceil()
            }
            TextAlign::Center => -(0.5 * line_length(list, tweaks, head, max_width)).ceil(),
            TextAlign::Justify => {
                justify_line(list, tweaks, head, max_width, &self.options.justify);
                0.0
            }
        }
    }

    /// Lay out `list` within `max_size`, handing every consumed node to
    /// `place` in order.
    ///
    /// A maximum width of `f32::INFINITY` never wraps. A height of zero or
    /// less is unbounded; otherwise layout stops at the first line whose
    /// bottom would reach it.
    pub fn compose(
        &self,
        list: &TextNodeList,
        max_size: Size<f32>,
        align: TextAlign,
        mut place: impl FnMut(Placement),
    ) -> Composition {
        profile_function!();

        let max_width = max_size.width;
        let line_spacing = self.line_spacing();
        let word_wrap = self.options.word_wrap;
        let mut tweaks = LengthTweaks::new(list);

        let mut x_offset = match list.head() {
            Some(head) => self.begin_line(list, &mut tweaks, head, max_width, align),
            None => 0.0,
        };
        let mut y_offset = 0.0;
        let mut length = 0.0;
        let mut max_measured_width: f32 = 0.0;
        let mut consumed = false;
        let mut line_count = 1;

        let mut steps = 0;
        let mut cursor = list.head();
        while let Some(id) = cursor {
            steps += 1;
            debug_assert!(
                steps <= 2 * list.len() + 1,
                "line composition is not making progress"
            );

            let node = list.node(id);
            // Where the next line starts, when this node ends the current one.
            let mut next_line = None;

            if node.is_line_break() {
                next_line = Some(node.next());
            } else {
                let modified = tweaks.modified_length(list, id);
                if word_wrap && consumed && skip_trailing_space(list, &tweaks, id, length, max_width)
                {
                    next_line = Some(node.next());
                } else if length + modified <= max_width || !consumed {
                    consumed = true;
                    place(Placement {
                        node: id,
                        x: x_offset + length,
                        y: y_offset,
                        tweak: tweaks.get(id),
                    });
                    length += modified;
                    max_measured_width = max_measured_width.max(length);
                } else if word_wrap {
                    // Start the next line with this node.
                    next_line = Some(Some(id));
                }
            }

            let Some(next_head) = next_line else {
                cursor = node.next();
                continue;
            };

            if max_size.has_height_bound() && y_offset + line_spacing >= max_size.height {
                tracing::trace!("Text truncated at line {} by height bound", line_count);
                break;
            }

            y_offset += line_spacing;
            length = 0.0;
            consumed = false;
            line_count += 1;
            x_offset = match next_head {
                Some(head) => self.begin_line(list, &mut tweaks, head, max_width, align),
                None => 0.0,
            };
            cursor = next_head;
        }

        Composition {
            size: Size::new(max_measured_width, y_offset + line_spacing),
            line_count,
            tweaks,
        }
    }
}
