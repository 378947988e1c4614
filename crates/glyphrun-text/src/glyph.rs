//! Glyph quads: drop shadows, scissor clipping and vertex emission.

use glyphrun_core::geometry::Rect;
use glyphrun_core::math::{Vec2, Vec3};
use glyphrun_render::{Color, GlyphVertex, VERTICES_PER_GLYPH};

use crate::font::{Glyph, GlyphProvider};
use crate::layout::Placement;
use crate::measure::char_advance;
use crate::node::{TextNodeKind, TextNodeList};
use crate::options::RenderOptions;

/// The two vertex lists a print call appends to.
#[derive(Debug, Default)]
pub struct GlyphBuffers {
    pub main: Vec<GlyphVertex>,
    pub shadow: Vec<GlyphVertex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Main,
    Shadow,
}

/// A glyph quad in output space (Y up) with its texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Top-left corner.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub u1: f32,
    pub v1: f32,
    pub u2: f32,
    pub v2: f32,
}

impl Quad {
    /// Clip against `clip`, shrinking the texture coordinates by the same
    /// fraction as the geometry. Returns `false` when nothing is left.
    ///
    /// Edges are handled in order: top, bottom, left, right.
    pub fn scissor(&mut self, clip: &Rect<f32>) -> bool {
        let clip_top = clip.y + clip.height;
        if self.y > clip_top {
            let old_height = self.height;
            let delta = self.y - clip_top;
            self.y = clip_top;
            self.height -= delta;
            if self.height <= 0.0 {
                return false;
            }
            self.v1 += delta / old_height * (self.v2 - self.v1);
        }

        if self.y - self.height < clip.y {
            let old_height = self.height;
            let delta = clip.y - (self.y - self.height);
            self.height -= delta;
            if self.height <= 0.0 {
                return false;
            }
            self.v2 -= delta / old_height * (self.v2 - self.v1);
        }

        if self.x < clip.x {
            let old_width = self.width;
            let delta = clip.x - self.x;
            self.x = clip.x;
            self.width -= delta;
            if self.width <= 0.0 {
                return false;
            }
            self.u1 += delta / old_width * (self.u2 - self.u1);
        }

        let clip_right = clip.x + clip.width;
        if self.x + self.width > clip_right {
            let old_width = self.width;
            let delta = self.x + self.width - clip_right;
            self.width -= delta;
            if self.width <= 0.0 {
                return false;
            }
            self.u2 -= delta / old_width * (self.u2 - self.u1);
        }

        true
    }

    /// Two triangles: top-left, bottom-left, bottom-right, then top-left,
    /// bottom-right, top-right.
    fn emit(&self, z: f32, color: Color, store: &mut Vec<GlyphVertex>) {
        let top_left = GlyphVertex::new(
            Vec3::new(self.x, self.y, z),
            Vec2::new(self.u1, self.v1),
            color,
        );
        let bottom_left = GlyphVertex::new(
            Vec3::new(self.x, self.y - self.height, z),
            Vec2::new(self.u1, self.v2),
            color,
        );
        let bottom_right = GlyphVertex::new(
            Vec3::new(self.x + self.width, self.y - self.height, z),
            Vec2::new(self.u2, self.v2),
            color,
        );
        let top_right = GlyphVertex::new(
            Vec3::new(self.x + self.width, self.y, z),
            Vec2::new(self.u2, self.v1),
            color,
        );
        store.extend_from_slice(&[
            top_left,
            bottom_left,
            bottom_right,
            top_left,
            bottom_right,
            top_right,
        ]);
    }
}

/// Turns placed nodes into glyph quads for one print call.
pub struct GlyphRenderer<'a> {
    font: &'a dyn GlyphProvider,
    options: &'a RenderOptions,
    color: Color,
    /// Print origin, already in viewport space.
    origin: Vec3,
    clip: Option<Rect<f32>>,
}

impl<'a> GlyphRenderer<'a> {
    pub fn new(
        font: &'a dyn GlyphProvider,
        options: &'a RenderOptions,
        color: Color,
        origin: Vec3,
        clip: Option<Rect<f32>>,
    ) -> Self {
        Self {
            font,
            options,
            color,
            origin,
            // An all-zero rectangle means no clipping.
            clip: clip.filter(|rect| *rect != Rect::default()),
        }
    }

    /// Render every glyph of a placed word. Spaces and line breaks emit
    /// nothing.
    ///
    /// The word's tweak is spread over its character gaps, whole pixels
    /// first and the remainder one pixel per gap from the left.
    pub fn render_placement(
        &self,
        list: &TextNodeList,
        placement: &Placement,
        out: &mut GlyphBuffers,
    ) {
        let TextNodeKind::Word { text } = &list.node(placement.node).kind else {
            return;
        };
        let chars: Vec<char> = text.chars().collect();
        let following = list.following_char(placement.node);

        let mut char_gaps = chars.len() as i32 - 1;
        if list.is_crumbled_word(placement.node) {
            char_gaps += 1;
        }
        let tweak = placement.tweak as i32;
        let (pixels_per_gap, mut leftover) = if char_gaps != 0 {
            let per_gap = tweak / char_gaps;
            (per_gap, tweak - per_gap * char_gaps)
        } else {
            (0, 0)
        };

        let mut x = placement.x;
        for i in 0..chars.len() {
            let Some(advance) = char_advance(self.font, self.options, &chars, i, following) else {
                continue;
            };
            self.render_glyph(x, placement.y, chars[i], out);
            x += advance + pixels_per_gap as f32;
            if leftover > 0 {
                x += 1.0;
                leftover -= 1;
            } else if leftover < 0 {
                x -= 1.0;
                leftover += 1;
            }
        }
    }

    /// Render one character with its top-left at layout position `(x, y)`.
    pub fn render_glyph(&self, x: f32, y: f32, c: char, out: &mut GlyphBuffers) {
        self.render_with(x, y, c, self.font, Target::Main, out);
    }

    fn render_with(
        &self,
        mut x: f32,
        mut y: f32,
        c: char,
        font: &dyn GlyphProvider,
        target: Target,
        out: &mut GlyphBuffers,
    ) {
        let Some(glyph) = font.glyph(c) else {
            return;
        };

        if font.is_drop_shadow() {
            // Centre the shadow glyph on the point it was given.
            x -= (glyph.rect.width * 0.5).trunc();
            y -= (glyph.rect.height * 0.5 + glyph.y_offset).trunc();
        } else if let Some(shadow) = font.drop_shadow()
            && self.options.drop_shadow.active
        {
            let offset = self.options.drop_shadow.offset;
            let mean = font.mean_glyph_width();
            let shadow_x = x + mean * offset.x + glyph.rect.width * 0.5;
            let shadow_y = y + mean * offset.y + glyph.rect.height * 0.5 + glyph.y_offset;
            self.render_with(shadow_x, shadow_y, c, shadow, Target::Shadow, out);
        }

        let Some(mut quad) = self.quad(x, y, glyph, font) else {
            tracing::trace!("Skipping {:?}: atlas page {} missing", c, glyph.page);
            return;
        };
        if let Some(clip) = &self.clip
            && !quad.scissor(clip)
        {
            return;
        }

        let color = if font.is_drop_shadow() {
            self.options.drop_shadow.color
        } else {
            self.color
        };
        let store = match target {
            Target::Main => &mut out.main,
            Target::Shadow => &mut out.shadow,
        };
        store.reserve(VERTICES_PER_GLYPH);
        quad.emit(self.origin.z, color, store);
    }

    fn quad(&self, x: f32, y: f32, glyph: &Glyph, font: &dyn GlyphProvider) -> Option<Quad> {
        let page = font.page_size(glyph.page)?;
        let rect = glyph.rect;
        Some(Quad {
            x: x + self.origin.x,
            y: -y - glyph.y_offset + self.origin.y,
            width: rect.width,
            height: rect.height,
            u1: rect.x / page.width,
            v1: rect.y / page.height,
            u2: (rect.x + rect.width) / page.width,
            v2: (rect.y + rect.height) / page.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DropShadow;
    use glyphrun_core::geometry::Size;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn quad() -> Quad {
        Quad {
            x: 0.0,
            y: 10.0,
            width: 10.0,
            height: 10.0,
            u1: 0.0,
            v1: 0.0,
            u2: 1.0,
            v2: 1.0,
        }
    }

    #[test]
    fn test_scissor_inside_is_untouched() {
        let mut q = quad();
        assert!(q.scissor(&Rect::new(-5.0, -5.0, 50.0, 50.0)));
        assert_eq!(q, quad());
    }

    #[test]
    fn test_scissor_interpolates_uvs() {
        // Clip box covers x 2..7, y 0..6 (Y up).
        let mut q = quad();
        assert!(q.scissor(&Rect::new(2.0, 0.0, 5.0, 6.0)));
        assert_eq!(q.y, 6.0);
        assert_eq!(q.height, 6.0);
        assert_eq!(q.v1, 0.4);
        assert_eq!(q.x, 2.0);
        assert_eq!(q.width, 5.0);
        assert_eq!(q.u1, 0.2);
        assert!(approx(q.u2, 0.7));
    }

    #[test]
    fn test_scissor_bottom_edge() {
        let mut q = quad();
        assert!(q.scissor(&Rect::new(0.0, 4.0, 10.0, 20.0)));
        assert_eq!(q.height, 6.0);
        assert_eq!(q.y, 10.0);
        assert!(approx(q.v2, 0.6));
    }

    #[test]
    fn test_scissor_rejects_outside() {
        let mut q = quad();
        assert!(!q.scissor(&Rect::new(20.0, 0.0, 5.0, 5.0)));
        let mut q = quad();
        assert!(!q.scissor(&Rect::new(0.0, 30.0, 5.0, 5.0)));
    }

    fn font() -> crate::font::BitmapFont {
        crate::font::BitmapFont::grid("ab", Size::new(10.0, 20.0), 2).unwrap()
    }

    #[test]
    fn test_glyph_quad_corners() {
        let font = font();
        let options = RenderOptions::default();
        let renderer =
            GlyphRenderer::new(&font, &options, Color::RED, Vec3::new(100.0, 50.0, 0.5), None);
        let mut out = GlyphBuffers::default();
        renderer.render_glyph(3.0, 4.0, 'b', &mut out);

        assert_eq!(out.main.len(), 6);
        assert!(out.shadow.is_empty());
        let corners: Vec<Vec3> = out.main.iter().map(|v| v.position()).collect();
        assert_eq!(
            corners,
            vec![
                Vec3::new(103.0, 46.0, 0.5),
                Vec3::new(103.0, 26.0, 0.5),
                Vec3::new(113.0, 26.0, 0.5),
                Vec3::new(103.0, 46.0, 0.5),
                Vec3::new(113.0, 26.0, 0.5),
                Vec3::new(113.0, 46.0, 0.5),
            ]
        );
        assert_eq!(out.main[0].tex_coord(), Vec2::new(0.5, 0.0));
        assert_eq!(out.main[2].tex_coord(), Vec2::new(1.0, 1.0));
        assert_eq!(out.main[0].color, Color::RED.to_packed());
    }

    #[test]
    fn test_unknown_glyph_emits_nothing() {
        let font = font();
        let options = RenderOptions::default();
        let renderer = GlyphRenderer::new(&font, &options, Color::WHITE, Vec3::ZERO, None);
        let mut out = GlyphBuffers::default();
        renderer.render_glyph(0.0, 0.0, 'z', &mut out);
        assert!(out.main.is_empty());
    }

    #[test]
    fn test_zero_clip_means_unclipped() {
        let font = font();
        let options = RenderOptions::default();
        let renderer = GlyphRenderer::new(
            &font,
            &options,
            Color::WHITE,
            Vec3::ZERO,
            Some(Rect::default()),
        );
        let mut out = GlyphBuffers::default();
        renderer.render_glyph(0.0, 0.0, 'a', &mut out);
        assert_eq!(out.main.len(), 6);
    }

    #[test]
    fn test_drop_shadow_goes_to_shadow_list() {
        let mut font = font();
        let shadow = crate::font::BitmapFont::grid("ab", Size::new(14.0, 24.0), 2).unwrap();
        font.set_drop_shadow(shadow).unwrap();

        let options = RenderOptions::default().drop_shadow(DropShadow::enabled());
        let renderer = GlyphRenderer::new(&font, &options, Color::WHITE, Vec3::ZERO, None);
        let mut out = GlyphBuffers::default();
        renderer.render_glyph(0.0, 0.0, 'a', &mut out);

        assert_eq!(out.main.len(), 6);
        assert_eq!(out.shadow.len(), 6);
        assert_eq!(
            out.shadow[0].color,
            Color::rgba(0.0, 0.0, 0.0, 0.5).to_packed()
        );

        // x: 10 * 0.16 + 5 - trunc(7) ; y: 10 * 0.16 + 10 - trunc(12), negated
        let top_left = out.shadow[0].position();
        assert!(approx(top_left.x, -0.4));
        assert!(approx(top_left.y, 0.4));
    }

    #[test]
    fn test_inactive_shadow_is_skipped() {
        let mut font = font();
        font.set_drop_shadow(font.clone()).unwrap();
        let options = RenderOptions::default();
        let renderer = GlyphRenderer::new(&font, &options, Color::WHITE, Vec3::ZERO, None);
        let mut out = GlyphBuffers::default();
        renderer.render_glyph(0.0, 0.0, 'a', &mut out);
        assert!(out.shadow.is_empty());
    }
}
