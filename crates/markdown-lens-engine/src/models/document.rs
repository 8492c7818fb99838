use std::collections::HashMap;
use std::path::Path;

use crate::analysis::{Analysis, Summary};
use crate::io::{self, IoError};
use crate::parsing::mdx::{self, MdxReport};
use crate::parsing::token::BlockToken;
use crate::parsing::{self, ParseResult};

/// A parsed Markdown (or MDX) document.
///
/// Owns the raw text, the annotated token stream, and the reference and
/// footnote maps; all queries go through [`Document::analysis`]. Parsing
/// never fails; only file acquisition can return an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    text: String,
    tokens: Vec<BlockToken>,
    references: HashMap<String, String>,
    footnotes: HashMap<String, String>,
    mdx: Option<MdxReport>,
}

impl Document {
    /// Parses plain Markdown text.
    pub fn parse(text: &str) -> Self {
        Self::build(text, false)
    }

    /// Parses MDX text: the ordinary pipeline plus the MDX classification
    /// pass over its output.
    pub fn parse_mdx(text: &str) -> Self {
        Self::build(text, true)
    }

    /// Reads and parses a Markdown file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IoError> {
        Ok(Self::parse(&io::read_document(path.as_ref())?))
    }

    /// Reads and parses an MDX file.
    pub fn from_file_mdx<P: AsRef<Path>>(path: P) -> Result<Self, IoError> {
        Ok(Self::parse_mdx(&io::read_document(path.as_ref())?))
    }

    fn build(text: &str, is_mdx: bool) -> Self {
        let ParseResult {
            tokens,
            references,
            footnotes,
        } = parsing::parse(text);
        let mdx = is_mdx.then(|| mdx::classify(text, &tokens));
        Self {
            text: text.to_string(),
            tokens,
            references,
            footnotes,
            mdx,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[BlockToken] {
        &self.tokens
    }

    /// Lower-cased reference label -> URL, from the pre-scan.
    pub fn references(&self) -> &HashMap<String, String> {
        &self.references
    }

    /// Footnote id -> definition text, from the pre-scan.
    pub fn footnotes(&self) -> &HashMap<String, String> {
        &self.footnotes
    }

    /// The MDX classification, present only for documents parsed as MDX.
    pub fn mdx(&self) -> Option<&MdxReport> {
        self.mdx.as_ref()
    }

    /// The query view over this document.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis::new(&self.text, &self.tokens)
    }

    /// Document-wide counts; for MDX documents the import count is included.
    pub fn summary(&self) -> Summary {
        let mut summary = self.analysis().summary();
        if let Some(mdx) = &self.mdx {
            summary.jsx_imports = Some(mdx.imports.len());
        }
        summary
    }
}
