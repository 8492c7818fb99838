//! # Parsing
//!
//! The two-stage text-to-structure engine plus its supporting passes.
//!
//! 1. **Pre-scan** (`prescan`): one flat pass over the raw text collecting
//!    link-reference and footnote definitions.
//! 2. **Block tokenization** (`blocks`): a forward line cursor with
//!    priority-ordered construct recognition, producing the block token
//!    sequence.
//! 3. **Inline annotation** (`inline`): per-block entity extraction using
//!    the pre-scanned maps.
//! 4. **MDX classification** (`mdx`): an optional read-only pass over the
//!    token stream for import statements and JSX component blocks.
//!
//! The whole pipeline is synchronous and infallible: any input text,
//! including the empty string, produces a valid (possibly empty) token
//! sequence.

pub mod blocks;
pub mod inline;
pub mod mdx;
pub mod prescan;
pub mod token;

mod rules;

use std::collections::HashMap;

pub use blocks::{BlockTokenizer, tokenize};
pub use inline::annotate;
pub use token::{BlockKind, BlockToken, CodeForm, CodeInfo, ListItem, TableData};

/// The outcome of a full parse: the annotated token stream plus the two
/// definition maps it was resolved against.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub tokens: Vec<BlockToken>,
    /// Lower-cased reference label -> URL.
    pub references: HashMap<String, String>,
    /// Footnote id -> definition text.
    pub footnotes: HashMap<String, String>,
}

/// Runs pre-scan, block tokenization, and inline annotation over `text`.
pub fn parse(text: &str) -> ParseResult {
    let defs = prescan::scan(text);
    let mut tokens = blocks::tokenize(text);
    inline::annotate_tokens(&mut tokens, &defs.references, &defs.footnotes);
    ParseResult {
        tokens,
        references: defs.references,
        footnotes: defs.footnotes,
    }
}
