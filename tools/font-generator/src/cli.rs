//! Command line parsing and [`GeneratorConfiguration`] construction.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, builder::EnumValueParser, value_parser};
use packed_font::pack::Threshold;

use crate::{
    emit::OutputFormat,
    raster::{CellSize, CharRange},
    table::{TableLayout, TableMetadata},
};

/// Description of which font to rasterize and how to lay out and write the resulting table.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct GeneratorConfiguration {
    /// The path of the font to rasterize.
    pub font_path: PathBuf,
    /// The path at which to write the table.
    pub output_path: PathBuf,
    /// The pixel size glyphs are rasterized at.
    pub size: u8,
    /// The shape of the generated table.
    pub layout: TableLayout,
    /// Identifier prefix of the emitted declarations.
    pub family: String,
    /// Human readable font name placed in the header comment.
    pub label: String,
    /// The format in which the table is written.
    pub format: OutputFormat,
    /// How many times `--verbose` was passed.
    pub verbosity: u8,
}

impl GeneratorConfiguration {
    /// Returns the [`TableMetadata`] described by this configuration.
    pub fn metadata(&self) -> TableMetadata {
        let source_name = self
            .font_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.font_path.display().to_string());

        TableMetadata {
            family: self.family.clone(),
            label: self.label.clone(),
            source_name,
            point_size: self.size,
        }
    }
}

/// Parses `font-generator`'s arguments to construct a [`GeneratorConfiguration`].
pub fn get_configuration() -> GeneratorConfiguration {
    parse_arguments(&command_parser().get_matches())
}

/// Parses the arguments required to produce a valid [`GeneratorConfiguration`].
#[expect(
    clippy::missing_panics_doc,
    reason = "required arguments and defaults guarantee that these are present"
)]
pub fn parse_arguments(matches: &ArgMatches) -> GeneratorConfiguration {
    let font_path = matches
        .get_one::<PathBuf>("font")
        .cloned()
        .expect("font is required");
    let output_path = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .expect("output is required");

    let size = *matches.get_one::<u8>("size").expect("size has a default");
    let width = *matches
        .get_one::<u8>("cell-width")
        .expect("cell-width has a default");
    let height = *matches
        .get_one::<u8>("cell-height")
        .expect("cell-height has a default");
    let threshold = *matches
        .get_one::<u8>("threshold")
        .expect("threshold has a default");

    let Some(cell) = CellSize::new(width, height) else {
        command_parser()
            .error(
                clap::error::ErrorKind::InvalidValue,
                format!("cell size {width}x{height} is empty"),
            )
            .exit();
    };

    let family = matches
        .get_one::<String>("family")
        .cloned()
        .expect("family has a default");
    let label = matches
        .get_one::<String>("label")
        .cloned()
        .expect("label has a default");
    let format = *matches
        .get_one::<OutputFormat>("format")
        .expect("format has a default");

    GeneratorConfiguration {
        font_path,
        output_path,
        size,
        layout: TableLayout {
            cell,
            range: CharRange::PRINTABLE_ASCII,
            threshold: Threshold(threshold),
        },
        family,
        label,
        format,
        verbosity: matches.get_count("verbose"),
    }
}

/// Returns the command parser for `font-generator`.
pub fn command_parser() -> Command {
    let font = Arg::new("font")
        .value_name("FONT")
        .help("TrueType or OpenType font to rasterize")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    let output = Arg::new("output")
        .value_name("OUTPUT")
        .help("Path of the generated table, overwritten if it exists")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    let size = Arg::new("size")
        .long("size")
        .help("Pixel size glyphs are rasterized at")
        .value_parser(value_parser!(u8).range(1..))
        .default_value("14");

    let cell_width = Arg::new("cell-width")
        .long("cell-width")
        .help("Width of a glyph cell in pixels")
        .value_parser(value_parser!(u8).range(1..))
        .default_value("14");

    let cell_height = Arg::new("cell-height")
        .long("cell-height")
        .help("Height of a glyph cell in pixels")
        .value_parser(value_parser!(u8).range(1..))
        .default_value("18");

    let threshold = Arg::new("threshold")
        .long("threshold")
        .help("Coverage a pixel must exceed to be drawn")
        .value_parser(value_parser!(u8))
        .default_value("64");

    let family = Arg::new("family")
        .long("family")
        .help("Identifier prefix of the generated declarations")
        .value_parser(parse_family)
        .default_value("inter");

    let label = Arg::new("label")
        .long("label")
        .help("Font name written in the header comment")
        .default_value("Inter Regular");

    let format = Arg::new("format")
        .long("format")
        .help("Format of the generated table: c header, rust module or raw bin dump")
        .value_parser(EnumValueParser::<OutputFormat>::new())
        .default_value("c");

    let verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Log more progress information, may be repeated")
        .action(ArgAction::Count);

    Command::new("font-generator")
        .about("Rasterizes a font into a monochrome bitmap table for embedding")
        .arg(font)
        .arg(output)
        .arg(size)
        .arg(cell_width)
        .arg(cell_height)
        .arg(threshold)
        .arg(family)
        .arg(label)
        .arg(format)
        .arg(verbose)
}

/// Validates that `family` can prefix C and Rust identifiers.
fn parse_family(family: &str) -> Result<String, String> {
    let mut chars = family.chars();
    let Some(first) = chars.next() else {
        return Err("family must not be empty".to_owned());
    };

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(format!("family must start with a letter or '_', found {first:?}"));
    }

    if let Some(invalid) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(format!(
            "family may only contain ASCII letters, digits and '_', found {invalid:?}"
        ));
    }

    Ok(family.to_owned())
}
