use std::{
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize_with, rules::RuleTable, tokens::Token},
    Position,
};

/// Where and how token listings are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOptions {
    pub output_dir: PathBuf,
    pub extension: String,
}

impl Default for ListingOptions {
    fn default() -> Self {
        ListingOptions {
            output_dir: PathBuf::from("output"),
            extension: String::from("lexer"),
        }
    }
}

impl ListingOptions {
    /// Listing path for a given source file: `<output_dir>/<stem>.<extension>`.
    pub fn listing_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("out"));

        self.output_dir.join(format!("{}.{}", stem, self.extension))
    }
}

fn io_error(err: io::Error, path: &Path) -> Error {
    Error::new(
        ErrorImpl::Io { message: format!("{}: {}", path.display(), err) },
        Position(0, Rc::new(path.display().to_string())),
    )
}

/// Reads the whole source file into memory.
pub fn read_source(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            Error::new(
                ErrorImpl::SourceNotFound { path: path.display().to_string() },
                Position(0, Rc::new(path.display().to_string())),
            )
        } else {
            io_error(err, path)
        }
    })
}

/// One `<KIND> <value>` line per token, in order.
pub fn render_listing(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<String>>()
        .join("\n")
}

/// Writes the listing for `source`, creating the output directory if needed.
pub fn write_listing(tokens: &[Token], source: &Path, options: &ListingOptions) -> Result<PathBuf, Error> {
    fs::create_dir_all(&options.output_dir).map_err(|err| io_error(err, &options.output_dir))?;

    let path = options.listing_path(source);
    fs::write(&path, render_listing(tokens)).map_err(|err| io_error(err, &path))?;

    tracing::info!(path = %path.display(), tokens = tokens.len(), "wrote listing");
    Ok(path)
}

/// Reads, scans and writes the listing for one source file.
///
/// Nothing is written when the source is missing or contains an illegal
/// character.
pub fn lex_file(table: &RuleTable, source: &Path, options: &ListingOptions) -> Result<(Vec<Token>, PathBuf), Error> {
    let contents = read_source(source)?;
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let tokens = tokenize_with(table, &contents, file_name)?;
    let path = write_listing(&tokens, source, options)?;

    Ok((tokens, path))
}
