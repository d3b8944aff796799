//! Serialization of a [`FontTable`] into source code or a raw dump.

use std::io::{self, Write};

use crate::table::{FontTable, TableMetadata};

/// Number of byte values written on a single line of an array literal.
const BYTES_PER_LINE: usize = 16;

/// The formats a [`FontTable`] can be written in.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum OutputFormat {
    /// A C header holding a `uint8_t` array and `#define`d dimensions.
    C,
    /// A Rust module holding a `static` array and `const` dimensions.
    Rust,
    /// The raw [`GlyphArray`][ga] dump.
    ///
    /// [ga]: packed_font::glyph::GlyphArray
    Binary,
}

impl OutputFormat {
    /// Returns the textual representation of the [`OutputFormat`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Rust => "rust",
            Self::Binary => "bin",
        }
    }
}

impl clap::ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        static FORMATS: &[OutputFormat] =
            &[OutputFormat::C, OutputFormat::Rust, OutputFormat::Binary];

        FORMATS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// Writes `table` into `writer` in the given `format`.
///
/// # Errors
///
/// Returns any error produced by `writer`.
pub fn emit<W: Write>(table: &FontTable, format: OutputFormat, writer: W) -> io::Result<()> {
    match format {
        OutputFormat::C => emit_c(table, writer),
        OutputFormat::Rust => emit_rust(table, writer),
        OutputFormat::Binary => table.as_glyph_array().dump(writer),
    }
}

/// Writes `table` as a C header.
///
/// # Errors
///
/// Returns any error produced by `writer`.
pub fn emit_c<W: Write>(table: &FontTable, mut writer: W) -> io::Result<()> {
    let metadata = table.metadata();
    let cell = table.layout().cell;

    write_header(table, &mut writer)?;
    writeln!(
        writer,
        "static const uint8_t {}_font_{}x{}[{}][{}] = {{",
        metadata.family,
        metadata.point_size,
        cell.height(),
        table.glyph_count(),
        table.stride()
    )?;
    write_glyphs(table, &mut writer, "{", "}")?;
    writeln!(writer, "}};")?;
    writeln!(writer)?;

    let prefix = constant_prefix(metadata);
    writeln!(writer, "#define {prefix}_FONT_WIDTH {}", cell.width())?;
    writeln!(writer, "#define {prefix}_FONT_HEIGHT {}", cell.height())?;
    writeln!(writer, "#define {prefix}_FONT_SIZE {}", metadata.point_size)?;

    Ok(())
}

/// Writes `table` as a Rust module.
///
/// # Errors
///
/// Returns any error produced by `writer`.
pub fn emit_rust<W: Write>(table: &FontTable, mut writer: W) -> io::Result<()> {
    let metadata = table.metadata();
    let cell = table.layout().cell;
    let prefix = constant_prefix(metadata);

    write_header(table, &mut writer)?;
    writeln!(
        writer,
        "pub static {prefix}_FONT_{}X{}: [[u8; {}]; {}] = [",
        metadata.point_size,
        cell.height(),
        table.stride(),
        table.glyph_count()
    )?;
    write_glyphs(table, &mut writer, "[", "]")?;
    writeln!(writer, "];")?;
    writeln!(writer)?;

    writeln!(writer, "pub const {prefix}_FONT_WIDTH: u8 = {};", cell.width())?;
    writeln!(writer, "pub const {prefix}_FONT_HEIGHT: u8 = {};", cell.height())?;
    writeln!(writer, "pub const {prefix}_FONT_SIZE: u8 = {};", metadata.point_size)?;

    Ok(())
}

/// Returns the comment label of a character code.
///
/// Characters that are not printable, and the quote and backslash characters, are replaced by
/// `#<code>` so the comment stays well-formed.
pub fn glyph_label(code: u8) -> String {
    let c = char::from(code);
    let printable = c.is_ascii_graphic() || c == ' ';

    if printable && c != '"' && c != '\\' {
        c.to_string()
    } else {
        format!("#{code}")
    }
}

/// Returns the prefix used for the named constants of `metadata`.
fn constant_prefix(metadata: &TableMetadata) -> String {
    metadata.family.to_ascii_uppercase()
}

/// Writes the comment block describing `table`.
fn write_header<W: Write>(table: &FontTable, writer: &mut W) -> io::Result<()> {
    let metadata = table.metadata();
    let cell = table.layout().cell;

    writeln!(writer, "// {} font data (antialiased)", metadata.label)?;
    writeln!(writer, "// Size: {}x{} pixels", cell.width(), cell.height())?;
    writeln!(writer, "// Generated from {}", metadata.source_name)?;
    writeln!(writer)
}

/// Writes one commented, bracketed row per glyph of `table`.
fn write_glyphs<W: Write>(
    table: &FontTable,
    writer: &mut W,
    open: &str,
    close: &str,
) -> io::Result<()> {
    let count = table.glyph_count();
    for (index, (code, glyph)) in table.glyphs().enumerate() {
        writeln!(writer, "    // {} ({code})", glyph_label(code))?;
        write!(writer, "    {open}")?;

        for (position, byte) in glyph.iter().enumerate() {
            if position > 0 {
                write!(writer, ", ")?;
                if position % BYTES_PER_LINE == 0 {
                    write!(writer, "\n     ")?;
                }
            }
            write!(writer, "0x{byte:02X}")?;
        }

        write!(writer, "{close}")?;
        if index + 1 < count {
            write!(writer, ",")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}
