//! FIGlet glyph source: parses `.flf` fonts and lays text out into a
//! rectangular grid of monospace lines for the colorizer.

use crate::error::{BannerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::{fs, path::Path};
use zip::ZipArchive;

/// Horizontal kerning mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Glyphs keep their full width.
    #[serde(rename = "full")]
    Full,
    /// Neighbouring glyphs move together until non-space columns touch.
    #[serde(rename = "fitted")]
    Fitted,
    /// Fitted plus one extra column of overlap where the seam can merge.
    #[default]
    #[serde(rename = "default")]
    Smush,
}

/// Laid-out banner text: a rectangular-ish grid of lines.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderResult {
    pub lines: Vec<String>,
    /// Longest line, in characters.
    pub width: usize,
    pub height: usize,
}

#[derive(Debug)]
pub struct FigletFont {
    name: String,
    header: String,
    hardblank: char,
    height: usize,
    comments: Vec<String>,
    glyphs: Vec<Option<Vec<String>>>,
}

impl FigletFont {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: String::new(),
            hardblank: '$',
            height: 0,
            comments: Vec::new(),
            glyphs: vec![None; 256],
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .map_err(|e| BannerError::FontParse(format!("figlet read error: {e}")))?;
        Self::from_bytes(&bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.iter().filter(|g| g.is_some()).count()
    }

    pub fn has_char(&self, ch: char) -> bool {
        (ch as u32) < 256 && self.glyphs[ch as usize].is_some()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        // Bare gzip streams (1F 8B) would need a second decompression
        // crate; zipped archives are enough for font bundles.
        if bytes.len() >= 2 && bytes[0] == 0x1F && bytes[1] == 0x8B {
            return Err(BannerError::FontParse(
                "gzip compressed .flf not supported; provide .flf or a zipped archive".into(),
            ));
        }
        // ZIP archive (PK\x03\x04): locate the first .flf inside.
        if bytes.len() >= 4 && &bytes[0..4] == b"PK\x03\x04" {
            let mut archive = ZipArchive::new(Cursor::new(bytes))
                .map_err(|e| BannerError::FontParse(format!("zip open error: {e}")))?;
            for i in 0..archive.len() {
                let mut file = archive
                    .by_index(i)
                    .map_err(|e| BannerError::FontParse(format!("zip entry error: {e}")))?;
                if file.name().ends_with(".flf") {
                    let mut buf = String::new();
                    file.read_to_string(&mut buf)
                        .map_err(|e| BannerError::FontParse(format!("zip read error: {e}")))?;
                    return Self::parse_content(&buf);
                }
            }
            return Err(BannerError::FontParse("zip archive contained no .flf".into()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|e| BannerError::FontParse(format!("utf8 error: {e}")))?;
        Self::parse_content(content)
    }

    fn parse_content(content: &str) -> Result<Self> {
        let mut lines = content.lines();
        let header_line = lines
            .next()
            .ok_or_else(|| BannerError::FontParse("missing header".into()))?;
        if !header_line.starts_with("flf2a") {
            return Err(BannerError::FontParse("not a flf2a header".into()));
        }
        let header_parts: Vec<&str> = header_line.split_whitespace().collect();
        if header_parts.len() < 6 {
            return Err(BannerError::FontParse("incomplete header".into()));
        }

        let hardblank = header_parts[0].chars().nth(5).unwrap_or('$');
        let height: usize = header_parts
            .get(1)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| BannerError::FontParse("missing height".into()))?;
        let comment_count: usize = header_parts
            .get(5)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        let mut font = FigletFont::new("figlet");
        font.header = header_line.to_string();
        font.hardblank = hardblank;
        font.height = height;

        for _ in 0..comment_count {
            if let Some(c) = lines.next() {
                font.comments.push(c.to_string());
            }
        }

        // Required characters (ASCII 32-126) are stored sequentially;
        // stop at EOF so partial fonts still load.
        for ch in 32u8..=126 {
            match Self::read_character(&mut lines, height) {
                Ok(char_lines) => {
                    font.add_raw_char(
                        ch,
                        &char_lines.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                    );
                }
                Err(_) => break,
            }
        }

        Ok(font)
    }

    fn read_character<'a, I>(lines: &mut I, height: usize) -> Result<Vec<String>>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut char_lines = Vec::new();

        for _ in 0..height {
            let line = lines
                .next()
                .ok_or_else(|| BannerError::FontParse("incomplete character".into()))?;

            // Trailing @ ends a line, @@ ends the character.
            if let Some(stripped) = line.strip_suffix("@@") {
                char_lines.push(stripped.to_string());
                break;
            } else if let Some(stripped) = line.strip_suffix('@') {
                char_lines.push(stripped.to_string());
            } else {
                return Err(BannerError::FontParse(
                    "character line missing @ marker".into(),
                ));
            }
        }

        Ok(char_lines)
    }

    /// Register a glyph from raw rows. Used by the parser and by tests
    /// building synthetic fonts.
    pub fn add_raw_char(&mut self, ch: u8, raw_lines: &[&str]) {
        self.height = self.height.max(raw_lines.len());
        self.glyphs[ch as usize] = Some(raw_lines.iter().map(|l| l.to_string()).collect());
    }

    /// Glyph rows as uniform-width char rows, padded to the font height.
    fn glyph_matrix(&self, ch: char) -> Option<Vec<Vec<char>>> {
        let rows = ((ch as u32) < 256)
            .then(|| self.glyphs[ch as usize].as_ref())
            .flatten()?;
        let width = rows.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut matrix: Vec<Vec<char>> = rows
            .iter()
            .map(|l| {
                let mut row: Vec<char> = l.chars().collect();
                row.resize(width, ' ');
                row
            })
            .collect();
        matrix.resize(self.height.max(rows.len()), vec![' '; width]);
        Some(matrix)
    }

    /// Resolve a character to a renderable glyph, trying the opposite
    /// case before giving up.
    fn resolve_matrix(&self, ch: char) -> Result<Vec<Vec<char>>> {
        if ch == ' ' && !self.has_char(' ') {
            return Ok(vec![vec![' ']; self.height.max(1)]);
        }
        if let Some(m) = self.glyph_matrix(ch) {
            return Ok(m);
        }
        if ch.is_alphabetic() {
            let variant = if ch.is_lowercase() {
                ch.to_uppercase().next()
            } else {
                ch.to_lowercase().next()
            };
            if let Some(m) = variant.and_then(|v| self.glyph_matrix(v)) {
                return Ok(m);
            }
        }
        Err(BannerError::UnknownChar(ch))
    }

    /// Lay out one line of text.
    pub fn render_line(&self, text: &str, layout: LayoutMode) -> Result<Vec<String>> {
        let mut rows: Vec<Vec<char>> = Vec::new();
        for ch in text.chars() {
            let glyph = self.resolve_matrix(ch)?;
            if rows.is_empty() {
                rows = glyph;
                continue;
            }
            let overlap = match layout {
                LayoutMode::Full => 0,
                LayoutMode::Fitted => fit_overlap(&rows, &glyph, false, self.hardblank),
                LayoutMode::Smush => fit_overlap(&rows, &glyph, true, self.hardblank),
            };
            merge_rows(&mut rows, &glyph, overlap);
        }
        Ok(rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|c| if c == self.hardblank { ' ' } else { c })
                    .collect()
            })
            .collect())
    }

    /// Lay out text (embedded newlines stack blocks vertically) and
    /// report the grid dimensions.
    pub fn render_banner(&self, text: &str, layout: LayoutMode) -> Result<RenderResult> {
        let mut lines = Vec::new();
        for part in text.split('\n') {
            lines.extend(self.render_line(part, layout)?);
        }
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let height = lines.len();
        Ok(RenderResult {
            lines,
            width,
            height,
        })
    }
}

/// Maximum seam overlap between the accumulated rows and the next glyph.
///
/// Fitted overlap only consumes spaces; smushing tries one more column,
/// allowed when each row has at most one visible collision and no
/// hardblank is involved.
fn fit_overlap(left: &[Vec<char>], right: &[Vec<char>], smush: bool, hardblank: char) -> usize {
    let left_width = left.first().map_or(0, |r| r.len());
    let right_width = right.first().map_or(0, |r| r.len());
    let max_k = left_width.min(right_width);

    let space_ok = |k: usize| -> bool {
        left.iter().zip(right).all(|(l, r)| {
            (0..k).all(|j| {
                let a = l[left_width - k + j];
                let b = r[j];
                a == ' ' || b == ' '
            })
        })
    };

    let mut fit = 0;
    while fit < max_k && space_ok(fit + 1) {
        fit += 1;
    }
    if !smush || fit >= max_k {
        return fit;
    }

    // One extra column of controlled smushing.
    let k = fit + 1;
    let smush_ok = left.iter().zip(right).all(|(l, r)| {
        let mut collisions = 0;
        for j in 0..k {
            let a = l[left_width - k + j];
            let b = r[j];
            if a != ' ' && b != ' ' {
                if a == hardblank || b == hardblank {
                    return false;
                }
                collisions += 1;
            }
        }
        collisions <= 1
    });
    if smush_ok {
        k
    } else {
        fit
    }
}

fn merge_rows(rows: &mut [Vec<char>], glyph: &[Vec<char>], overlap: usize) {
    let left_width = rows.first().map_or(0, |r| r.len());
    let keep = left_width - overlap;
    for (row, glyph_row) in rows.iter_mut().zip(glyph) {
        let mut out: Vec<char> = row[..keep].to_vec();
        for j in 0..overlap {
            out.push(smush_pair(row[keep + j], glyph_row[j]));
        }
        out.extend_from_slice(&glyph_row[overlap..]);
        *row = out;
    }
}

fn smush_pair(a: char, b: char) -> char {
    if a == ' ' {
        b
    } else if b == ' ' || a == b {
        a
    } else {
        b
    }
}

/// Id-keyed font cache. Loading an already-registered id is a no-op, so
/// repeated renders never re-read font files.
#[derive(Default)]
pub struct FontLibrary {
    fonts: HashMap<String, FigletFont>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.fonts.contains_key(id)
    }

    /// Load a `.flf` (or zipped archive) under `id`; idempotent.
    pub fn load_file(&mut self, id: &str, path: &Path) -> Result<()> {
        if self.fonts.contains_key(id) {
            return Ok(());
        }
        let mut font = FigletFont::load(path)?;
        font.name = id.to_string();
        self.fonts.insert(id.to_string(), font);
        Ok(())
    }

    pub fn insert(&mut self, id: impl Into<String>, font: FigletFont) {
        self.fonts.insert(id.into(), font);
    }

    pub fn get(&self, id: &str) -> Result<&FigletFont> {
        self.fonts
            .get(id)
            .ok_or_else(|| BannerError::UnknownFont(id.to_string()))
    }

    pub fn render(&self, id: &str, text: &str, layout: LayoutMode) -> Result<RenderResult> {
        self.get(id)?.render_banner(text, layout)
    }
}
