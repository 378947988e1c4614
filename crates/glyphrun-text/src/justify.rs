//! Justification: stretch or contract one line to a target width by
//! spreading whole pixels across character gaps and spaces.

use glyphrun_core::profiling::profile_function;

use crate::layout::{LengthTweaks, skip_trailing_space};
use crate::node::{NodeId, TextNodeKind, TextNodeList};
use crate::options::JustifyOptions;

/// Outcome of justifying one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Justification {
    /// Pixels added (positive) or removed (negative) across the line. The
    /// tweaks written from the line head through `end` sum to exactly this.
    pub total_pixels: i32,
    /// Whether the next word was pulled onto the line.
    pub contracted: bool,
    /// Last node that received a tweak.
    pub end: NodeId,
}

/// Character gaps inside a word, plus the gap to an adjacent crumbled piece.
pub fn word_gaps(list: &TextNodeList, id: NodeId) -> i32 {
    match &list.node(id).kind {
        TextNodeKind::Word { text } => {
            let gaps = text.chars().count() as i32 - 1;
            if list.is_crumbled_word(id) { gaps + 1 } else { gaps }
        }
        _ => 0,
    }
}

/// Split `pixels` evenly over `gaps`, returning the per-gap share and the
/// signed remainder.
fn split_pixels(pixels: i32, gaps: i32) -> (i32, i32) {
    if gaps == 0 {
        return (0, 0);
    }
    let per_gap = pixels / gaps;
    (per_gap, pixels - per_gap * gaps)
}

/// Justify the line starting at `head` to `target` pixels.
///
/// Writes the per-node tweaks into `tweaks` and returns what was done, or
/// `None` when the line is left alone: it is the last line of a paragraph,
/// nothing on it can absorb pixels, or neither expanding nor contracting
/// applies.
pub fn justify_line(
    list: &TextNodeList,
    tweaks: &mut LengthTweaks,
    head: NodeId,
    target: f32,
    options: &JustifyOptions,
) -> Option<Justification> {
    profile_function!();

    // Longest run that fits, and whether anything follows it on this line.
    let mut justifiable = false;
    let mut char_gaps = 0;
    let mut space_gaps = 0;
    let mut consumed = false;
    let mut length = 0.0;
    let mut expand_end = head;
    for (id, node) in list.iter_from(head) {
        if node.is_line_break() {
            break;
        }
        if consumed && skip_trailing_space(list, tweaks, id, length, target) {
            justifiable = true;
            break;
        }
        if length + node.length < target || !consumed {
            expand_end = id;
            match node.kind {
                TextNodeKind::Space => space_gaps += 1,
                TextNodeKind::Word { .. } => char_gaps += word_gaps(list, id),
                TextNodeKind::LineBreak => {}
            }
            consumed = true;
            length += node.length;
        } else {
            justifiable = true;
            break;
        }
    }

    if !justifiable {
        return None;
    }

    // Cost of pulling the next word onto the line instead.
    let mut extra_length = 0.0;
    let mut extra_space_gaps = 0;
    let mut extra_char_gaps = 0;
    let mut contract_end = None;
    for (id, node) in list.iter_from(expand_end).skip(1) {
        match node.kind {
            TextNodeKind::LineBreak => break,
            TextNodeKind::Space => {
                extra_length += node.length;
                extra_space_gaps += 1;
            }
            TextNodeKind::Word { .. } => {
                extra_length += node.length;
                extra_char_gaps += word_gaps(list, id);
                contract_end = Some(id);
                break;
            }
        }
    }

    let contract = contract_end.is_some()
        && (extra_length + length - target) * options.contraction_penalty < target - length
        && (target - (length + extra_length + 1.0)) / target > -options.cap_contract;

    let applies = if contract {
        length + extra_length > target
    } else {
        length < target
    };
    if !applies {
        return None;
    }

    let end = match contract_end {
        Some(end) if contract => {
            length += extra_length + 1.0;
            char_gaps += extra_char_gaps;
            space_gaps += extra_space_gaps;
            end
        }
        _ => expand_end,
    };

    if char_gaps == 0 && space_gaps == 0 {
        return None;
    }

    let mut total_pixels = (target - length) as i32;
    if contract {
        if (total_pixels as f32) / target < -options.cap_contract {
            total_pixels = (-options.cap_contract * target) as i32;
        }
    } else if (total_pixels as f32) / target > options.cap_expand {
        total_pixels = (options.cap_expand * target) as i32;
    }

    let char_pixels = if char_gaps == 0 {
        0
    } else if space_gaps == 0 {
        total_pixels
    } else {
        let weight = if contract {
            options.character_weight_for_contract
        } else {
            options.character_weight_for_expand
        };
        let share =
            (total_pixels as f32 * weight * char_gaps as f32 / space_gaps as f32) as i32;
        if (!contract && share > total_pixels) || (contract && share < total_pixels) {
            total_pixels
        } else {
            share
        }
    };
    let space_pixels = total_pixels - char_pixels;

    let (pixels_per_char, mut leftover_char) = split_pixels(char_pixels, char_gaps);
    let (pixels_per_space, mut leftover_space) = split_pixels(space_pixels, space_gaps);

    for (id, node) in list.iter_from(head) {
        match node.kind {
            TextNodeKind::Space => {
                let mut tweak = pixels_per_space;
                if leftover_space > 0 {
                    tweak += 1;
                    leftover_space -= 1;
                } else if leftover_space < 0 {
                    tweak -= 1;
                    leftover_space += 1;
                }
                tweaks.set(id, tweak as f32);
            }
            TextNodeKind::Word { .. } => {
                let gaps = word_gaps(list, id);
                let mut tweak = gaps * pixels_per_char;
                if leftover_char >= gaps {
                    tweak += gaps;
                    leftover_char -= gaps;
                } else if leftover_char <= -gaps {
                    tweak -= gaps;
                    leftover_char += gaps;
                } else {
                    tweak += leftover_char;
                    leftover_char = 0;
                }
                tweaks.set(id, tweak as f32);
            }
            TextNodeKind::LineBreak => {}
        }
        if id == end {
            break;
        }
    }

    tracing::trace!(
        "Justified line at node {}: {} px ({})",
        head.index(),
        total_pixels,
        if contract { "contract" } else { "expand" }
    );

    Some(Justification {
        total_pixels,
        contracted: contract,
        end,
    })
}
