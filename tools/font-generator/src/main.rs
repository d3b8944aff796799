//! Tool for rasterizing a TrueType or OpenType font into a fixed-cell monochrome glyph table that
//! can be embedded into environments without a font renderer.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result, bail};
use cli::GeneratorConfiguration;
use emit::OutputFormat;
use source::FontdueSource;
use table::FontTable;

pub mod cli;
pub mod emit;
pub mod raster;
pub mod source;
pub mod table;

#[cfg(test)]
mod test_support;

fn main() -> Result<()> {
    let config = cli::get_configuration();
    init_logging(config.verbosity);

    generate(&config)?;
    println!("Font table written to {}", config.output_path.display());

    Ok(())
}

/// Initializes the global logger, letting `RUST_LOG` override the `--verbose` level.
fn init_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Rasterizes the font described by `config` and writes the resulting table.
///
/// # Errors
///
/// Returns errors when the font does not exist or cannot be parsed, or when writing the table
/// fails.
pub fn generate(config: &GeneratorConfiguration) -> Result<()> {
    let source = load_font(&config.font_path, config.size)?;

    log::info!(
        "rasterizing {} at {}px into {}x{} cells",
        config.font_path.display(),
        config.size,
        config.layout.cell.width(),
        config.layout.cell.height()
    );
    let table = FontTable::build(&source, config.layout, config.metadata());

    let blank = table.blank_codes();
    if !blank.is_empty() {
        log::warn!("{} of {} glyphs left blank: {blank:?}", blank.len(), table.glyph_count());
    }

    write_table(&table, config.format, &config.output_path)
}

/// Loads the font at `path` for rasterization at `size` pixels.
///
/// # Errors
///
/// Returns errors when `path` does not exist or does not hold a font the rasterizer supports.
pub fn load_font(path: &Path, size: u8) -> Result<FontdueSource> {
    if !path.exists() {
        bail!("font file not found: {}", path.display());
    }

    let bytes =
        fs::read(path).with_context(|| format!("error reading font {}", path.display()))?;
    log::info!("loaded {} bytes from {}", bytes.len(), path.display());

    FontdueSource::from_bytes(&bytes, size)
        .with_context(|| format!("unable to rasterize {}", path.display()))
}

/// Writes `table` to `path` in the given `format`, replacing any existing file.
///
/// # Errors
///
/// Returns errors when the file cannot be created or written.
pub fn write_table(table: &FontTable, format: OutputFormat, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("error creating {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    emit::emit(table, format, &mut writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("error writing {}", path.display()))?;

    log::info!("wrote {} table to {}", format.as_str(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::test_support::{FakeSource, SUBSET_FONT, default_layout, default_metadata};

    /// Builds the default table from `source`.
    fn default_table(source: &FakeSource) -> FontTable {
        FontTable::build(source, default_layout(), default_metadata())
    }

    #[test]
    fn missing_font_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.otf");

        let error = load_font(&path, 14).err().unwrap();
        assert!(error.to_string().starts_with("font file not found"));
    }

    #[test]
    fn unparsable_font_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"not a font at all").unwrap();

        let error = load_font(&path, 14).err().unwrap();
        assert!(error.to_string().starts_with("unable to rasterize"));
    }

    #[test]
    fn written_file_matches_emitted_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("font.h");
        let table = default_table(&FakeSource::new());

        write_table(&table, OutputFormat::C, &path).unwrap();

        let mut expected = Vec::new();
        emit::emit_c(&table, &mut expected).unwrap();
        assert_eq!(fs::read(&path).unwrap(), expected);
    }

    #[test]
    fn existing_output_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("font.bin");
        fs::write(&path, vec![0xEE; 10_000]).unwrap();

        let table = default_table(&FakeSource::new());
        write_table(&table, OutputFormat::Binary, &path).unwrap();

        assert_eq!(fs::read(&path).unwrap().len(), 2 + 95 * 36);
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.h");
        let second = dir.path().join("second.h");
        let source = FakeSource::new().failing_measure('"');

        write_table(&default_table(&source), OutputFormat::C, &first).unwrap();
        write_table(&default_table(&source), OutputFormat::C, &second).unwrap();

        assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("font.h");
        let table = default_table(&FakeSource::new());

        let error = write_table(&table, OutputFormat::C, &path).err().unwrap();
        assert!(error.to_string().starts_with("error creating"));
    }

    #[test]
    fn generates_a_table_from_a_font_file() {
        let dir = TempDir::new().unwrap();
        let font_path = dir.path().join("DejaVuSansMono-Subset.ttf");
        fs::write(&font_path, SUBSET_FONT).unwrap();

        let config = GeneratorConfiguration {
            font_path,
            output_path: dir.path().join("mono.bin"),
            size: 14,
            layout: default_layout(),
            family: "mono".to_owned(),
            label: "DejaVu Sans Mono".to_owned(),
            format: OutputFormat::Binary,
            verbosity: 0,
        };
        generate(&config).unwrap();

        let dump = fs::read(&config.output_path).unwrap();
        let array = packed_font::glyph::GlyphArray::from_dump(&dump).unwrap();
        assert_eq!(array.glyph_count(), 95);
        assert!(!array.get(usize::from(b'A' - 32)).unwrap().is_blank());
        assert!(array.get(usize::from(b'B' - 32)).unwrap().is_blank());
    }
}
