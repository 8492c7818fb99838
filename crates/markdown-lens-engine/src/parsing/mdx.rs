//! MDX classification.
//!
//! MDX documents are tokenized by the ordinary block tokenizer; JSX
//! component blocks already surface as HTML blocks. This pass layers the two
//! MDX-specific views on top of that output without touching it: import
//! statements found in the raw text, and HTML-block tokens whose first line
//! opens a component tag. Composition instead of a derived tokenizer keeps
//! the base state machine closed.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::token::{BlockKind, BlockToken};

/// An `import ... from '<path>';` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsxImport {
    /// 1-based source line.
    pub line: usize,
    /// The trimmed statement text.
    pub statement: String,
    /// The quoted module path.
    pub source: String,
}

/// An HTML block opening with a JSX component tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsxComponent {
    /// 1-based line of the owning block token.
    pub line: usize,
    pub content: String,
}

/// The MDX-specific classification of a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MdxReport {
    pub imports: Vec<JsxImport>,
    pub components: Vec<JsxComponent>,
}

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^import\s+.*?\s+from\s+["'](.*?)["'];?\s*$"#)
            .expect("import pattern must compile")
    })
}

fn component_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^<([A-Z][A-Za-z0-9]*|[a-z]+\.[A-Z][A-Za-z0-9]*).*?(?:>|/>)$")
            .expect("component pattern must compile")
    })
}

/// Classifies a tokenized document's MDX constructs. Read-only: the token
/// stream is never modified.
pub fn classify(text: &str, tokens: &[BlockToken]) -> MdxReport {
    let mut report = MdxReport::default();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if let Some(caps) = import_re().captures(trimmed) {
            report.imports.push(JsxImport {
                line: idx + 1,
                statement: trimmed.to_string(),
                source: caps[1].to_string(),
            });
        }
    }

    for token in tokens {
        if token.kind != BlockKind::HtmlBlock {
            continue;
        }
        let Some(content) = &token.content else { continue };
        let first_line = content.trim().lines().next().unwrap_or("");
        if component_start_re().is_match(first_line) {
            report.components.push(JsxComponent {
                line: token.start_line,
                content: content.clone(),
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::tokenize;
    use pretty_assertions::assert_eq;

    #[test]
    fn import_statements_are_reported_with_path() {
        let text = "import Chart from './chart';\n\n# Doc";
        let report = classify(text, &tokenize(text));
        assert_eq!(report.imports.len(), 1);
        assert_eq!(report.imports[0].line, 1);
        assert_eq!(report.imports[0].source, "./chart");
        assert_eq!(report.imports[0].statement, "import Chart from './chart';");
    }

    #[test]
    fn double_quoted_import_path() {
        let text = r#"import { A, B } from "components/ab""#;
        let report = classify(text, &tokenize(text));
        assert_eq!(report.imports[0].source, "components/ab");
    }

    #[test]
    fn capitalized_tag_is_a_component() {
        let text = "<Callout>\nNote text\n</Callout>";
        let report = classify(text, &tokenize(text));
        assert_eq!(report.components.len(), 1);
        assert_eq!(report.components[0].line, 1);
    }

    #[test]
    fn namespaced_tag_is_a_component() {
        let text = "<ui.Badge>ok</ui.Badge>";
        let report = classify(text, &tokenize(text));
        assert_eq!(report.components.len(), 1);
    }

    #[test]
    fn lowercase_html_is_not_a_component() {
        let text = "<div>plain</div>";
        let report = classify(text, &tokenize(text));
        assert!(report.components.is_empty());
    }

    #[test]
    fn token_stream_is_untouched() {
        let text = "import X from 'x';\n\n<Widget/>\n\npara";
        let tokens = tokenize(text);
        let before = tokens.clone();
        let _ = classify(text, &tokens);
        assert_eq!(tokens, before);
    }
}
