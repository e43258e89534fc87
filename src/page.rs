//! Synthetic page composition from per-character glyph bitmaps.
//!
//! Pages are used to produce realistic skewed inputs: text is laid out glyph
//! by glyph on a white canvas and the result can be rotated with the same
//! canvas-expanding rotation the correction step uses.

use crate::image::{OwnedImage, Raster};
use crate::rotate::Interpolation;
use crate::search::{correct, WHITE};
use crate::trace::{trace_event, trace_warn};
use crate::util::{DeskewError, DeskewResult};
use std::collections::HashMap;

/// Spacing parameters for page layout, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLayout {
    /// Blank border on every side.
    pub margin: usize,
    /// Vertical gap between consecutive lines.
    pub line_spacing: usize,
    /// Horizontal gap between consecutive glyphs of a line.
    pub char_spacing: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            margin: 3,
            line_spacing: 3,
            char_spacing: 1,
        }
    }
}

/// File stem under which the glyph for `ch` is stored.
///
/// Punctuation and the space use descriptive names; every other character
/// is its own stem.
pub fn glyph_key(ch: char) -> String {
    match ch {
        ' ' => "space".to_owned(),
        '.' => "dot".to_owned(),
        ',' => "comma".to_owned(),
        '?' => "question_mark".to_owned(),
        '!' => "exclamation_mark".to_owned(),
        other => other.to_string(),
    }
}

/// Grayscale glyph bitmaps keyed by character.
#[derive(Clone, Debug, Default)]
pub struct GlyphSet {
    glyphs: HashMap<char, OwnedImage>,
}

impl GlyphSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the bitmap for `ch`.
    pub fn insert(&mut self, ch: char, glyph: OwnedImage) {
        self.glyphs.insert(ch, glyph);
    }

    /// Returns the bitmap for `ch`.
    pub fn get(&self, ch: char) -> Option<&OwnedImage> {
        self.glyphs.get(&ch)
    }

    /// Number of glyphs in the set.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True when the set holds no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Loads `<dir>/<glyph_key(ch)>.png` for every character in `charset`.
    ///
    /// Characters whose file is missing are skipped with a warning.
    #[cfg(feature = "image-io")]
    pub fn load_dir<P: AsRef<std::path::Path>>(dir: P, charset: &str) -> DeskewResult<Self> {
        let dir = dir.as_ref();
        let mut set = Self::new();
        for ch in charset.chars() {
            if set.glyphs.contains_key(&ch) {
                continue;
            }
            let key = glyph_key(ch);
            let path = dir.join(format!("{key}.png"));
            if !path.is_file() {
                let shown = path.display().to_string();
                trace_warn!(glyph = key.as_str(), path = shown.as_str(); "missing glyph file");
                continue;
            }
            set.insert(ch, crate::image::io::load_gray_image(&path)?);
        }
        Ok(set)
    }
}

/// Lays out `text` with the glyphs in `glyphs` on a white canvas.
///
/// Text is lowercased and split on `\n`. Characters without a glyph are
/// skipped and lines left empty are dropped. The line height is the height
/// of the first glyph placed; glyphs are pasted top-left aligned and clipped
/// to the canvas.
pub fn compose_page(text: &str, glyphs: &GlyphSet, layout: PageLayout) -> DeskewResult<OwnedImage> {
    let mut lines: Vec<Vec<&OwnedImage>> = Vec::new();
    let mut line_height: Option<usize> = None;
    let mut max_line_width = 0usize;

    for line in text.to_lowercase().split('\n') {
        let mut placed = Vec::new();
        for ch in line.chars() {
            match glyphs.get(ch) {
                Some(glyph) => {
                    line_height.get_or_insert(glyph.height());
                    placed.push(glyph);
                }
                None => {
                    let key = glyph_key(ch);
                    trace_warn!(glyph = key.as_str(); "no bitmap for character");
                }
            }
        }
        if placed.is_empty() {
            continue;
        }
        let width = placed.iter().map(|g| g.width()).sum::<usize>()
            + (placed.len() - 1) * layout.char_spacing;
        max_line_width = max_line_width.max(width);
        lines.push(placed);
    }

    let line_height = match line_height {
        Some(h) if !lines.is_empty() => h,
        _ => return Err(DeskewError::EmptyPage),
    };

    let count = lines.len();
    let width = max_line_width + 2 * layout.margin;
    let height = 2 * layout.margin + count * line_height + (count - 1) * layout.line_spacing;
    let mut page = OwnedImage::filled(width, height, WHITE)?;

    let mut y = layout.margin;
    for placed in &lines {
        let mut x = layout.margin;
        for glyph in placed {
            paste(&mut page, glyph, x, y);
            x += glyph.width() + layout.char_spacing;
        }
        y += line_height + layout.line_spacing;
    }

    trace_event!("page_composed", lines = count, width = width, height = height);
    Ok(page)
}

fn paste(page: &mut OwnedImage, glyph: &OwnedImage, x0: usize, y0: usize) {
    let page_width = page.width();
    if x0 >= page_width {
        return;
    }
    let cols = glyph.width().min(page_width - x0);
    for (dy, src) in glyph.view().rows().enumerate() {
        let Some(dst) = page.row_mut(y0 + dy) else {
            break;
        };
        dst[x0..x0 + cols].copy_from_slice(&src[..cols]);
    }
}

/// Rotates a composed page onto an expanded white canvas.
///
/// A zero angle returns the page unchanged.
pub fn skew_page(page: &OwnedImage, angle_deg: f32, interp: Interpolation) -> DeskewResult<Raster> {
    correct(&Raster::from(page.clone()), angle_deg, interp)
}
