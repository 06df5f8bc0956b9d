use doomgen::figlet::{FigletFont, FontLibrary, LayoutMode};
use doomgen::test_support::{sample_flf, tiny_font};
use doomgen::BannerError;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;

#[test]
fn parses_minimal_flf() {
    let font = FigletFont::from_bytes(sample_flf().as_bytes()).unwrap();
    assert_eq!(font.height(), 3);
    assert_eq!(font.glyph_count(), 95);
    assert_eq!(font.comments().len(), 1);
    assert!(font.has_char('A'));
    assert!(font.has_char('~'));
}

#[test]
fn hardblanks_render_as_spaces() {
    let font = FigletFont::from_bytes(sample_flf().as_bytes()).unwrap();
    let lines = font.render_line(" ", LayoutMode::Full).unwrap();
    assert_eq!(lines, vec!["  ", "  ", "  "]);
}

#[test]
fn full_layout_concatenates() {
    let font = FigletFont::from_bytes(sample_flf().as_bytes()).unwrap();
    let result = font.render_banner("AB", LayoutMode::Full).unwrap();
    assert_eq!(result.lines[0], "AABB");
    assert_eq!(result.width, 4);
    assert_eq!(result.height, 3);
}

#[test]
fn fitted_layout_consumes_spaces_only() {
    let font = tiny_font();
    // B is "|) " x3: one trailing space column can close up
    let lines = font.render_line("BB", LayoutMode::Fitted).unwrap();
    assert_eq!(lines[0], "|)|) ");
}

#[test]
fn smushing_merges_one_more_column() {
    let font = tiny_font();
    // A's right edge and !'s bar share a column
    let lines = font.render_line("A!", LayoutMode::Smush).unwrap();
    assert_eq!(lines[1], "|--|");
    assert_eq!(lines[0].chars().count(), 4);

    let fitted = font.render_line("A!", LayoutMode::Fitted).unwrap();
    assert_eq!(fitted[1], "|--||");
}

#[test]
fn kerning_keeps_row_count() {
    let font = tiny_font();
    for layout in [LayoutMode::Full, LayoutMode::Fitted, LayoutMode::Smush] {
        assert_eq!(font.render_line("AB!B", layout).unwrap().len(), 3);
    }
}

#[test]
fn lowercase_falls_back_to_uppercase() {
    let font = tiny_font();
    let lower = font.render_line("a", LayoutMode::Full).unwrap();
    let upper = font.render_line("A", LayoutMode::Full).unwrap();
    assert_eq!(lower, upper);
}

#[test]
fn unknown_char_is_an_error() {
    let font = tiny_font();
    assert!(matches!(
        font.render_line("Z", LayoutMode::Full).unwrap_err(),
        BannerError::UnknownChar('Z')
    ));
}

#[test]
fn newlines_stack_blocks() {
    let font = tiny_font();
    let result = font.render_banner("A\nB", LayoutMode::Full).unwrap();
    assert_eq!(result.height, 6);
    assert_eq!(result.width, 4);
}

#[test]
fn loads_flf_from_zip_archive() {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file("fonts/mini.flf", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(sample_flf().as_bytes()).unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    let font = FigletFont::from_bytes(&bytes).unwrap();
    assert_eq!(font.glyph_count(), 95);
}

#[test]
fn rejects_gzip_and_garbage() {
    let gzip = [0x1f, 0x8b, 0x08, 0x00];
    assert!(matches!(
        FigletFont::from_bytes(&gzip).unwrap_err(),
        BannerError::FontParse(_)
    ));
    assert!(FigletFont::from_bytes(b"not a font").is_err());
}

#[test]
fn library_lookup_and_idempotent_load() {
    let mut library = FontLibrary::new();
    library.insert("tiny", tiny_font());
    assert!(library.is_loaded("tiny"));

    // already loaded: the path is never touched
    library
        .load_file("tiny", Path::new("/nonexistent/font.flf"))
        .unwrap();

    let result = library.render("tiny", "B", LayoutMode::Full).unwrap();
    assert_eq!(result.lines[0], "|) ");

    assert!(matches!(
        library.get("missing").unwrap_err(),
        BannerError::UnknownFont(_)
    ));
}
