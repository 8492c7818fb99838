//! # Block Tokenization
//!
//! A forward-scanning state machine over the document's line sequence. Each
//! cursor position is dispatched against the construct predicates in a fixed
//! priority order:
//!
//! 1. frontmatter (document start only), 2. blank line, 3. indented code,
//! 4. table, 5. HTML block, 6. ATX header, 7. setext header,
//! 8. horizontal rule, 9. fenced code, 10. blockquote, 11. list,
//! 12. paragraph (fallback).
//!
//! The cursor only ever moves forward, with one exception: an unterminated
//! code fence rewinds to the opening fence line and re-reads it as paragraph
//! text (see [`BlockTokenizer::fenced_code`]).
//!
//! Structural anomalies never abort the scan. Unterminated frontmatter and
//! HTML blocks close at end of input with a logged warning; everything else
//! falls through to the paragraph rule.

mod html;
mod list;
mod table;

use super::rules::{Rules, rules};
use super::token::{BlockToken, CodeForm, CodeInfo};

/// The block-level tokenizer. One instance per parse; holds the line
/// sequence, the forward cursor, and the shared read-only rule set.
pub struct BlockTokenizer<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    rules: &'static Rules,
    tokens: Vec<BlockToken>,
}

/// Tokenizes a full document into its ordered block sequence.
pub fn tokenize(text: &str) -> Vec<BlockToken> {
    BlockTokenizer::new(text).tokenize()
}

impl<'a> BlockTokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
            pos: 0,
            rules: rules(),
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Vec<BlockToken> {
        if self
            .lines
            .first()
            .is_some_and(|line| self.rules.frontmatter.is_match(line.trim()))
        {
            self.frontmatter();
        }
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            let trimmed = line.trim();
            if trimmed.is_empty() {
                self.pos += 1;
                continue;
            }
            if line.starts_with("    ") || line.starts_with('\t') {
                self.indented_code();
                continue;
            }
            if self.at_table_start() {
                self.table();
                continue;
            }
            if self.rules.html_block_start.is_match(trimmed) {
                self.html_block();
                continue;
            }
            if let Some(caps) = self.rules.atx_header.captures(line) {
                let level = caps[1].len() as u8;
                let text = caps[2].trim().to_string();
                self.tokens.push(BlockToken::header(level, text, self.pos + 1));
                self.pos += 1;
                continue;
            }
            if self.pos + 1 < self.lines.len() {
                let next = self.lines[self.pos + 1].trim();
                let level = if self.rules.setext_h1.is_match(next) {
                    Some(1)
                } else if self.rules.setext_h2.is_match(next) {
                    Some(2)
                } else {
                    None
                };
                if let Some(level) = level {
                    self.tokens
                        .push(BlockToken::header(level, trimmed.to_string(), self.pos + 1));
                    self.pos += 2;
                    continue;
                }
            }
            if self.rules.horizontal_rule.is_match(trimmed) {
                self.tokens.push(BlockToken::horizontal_rule(self.pos + 1));
                self.pos += 1;
                continue;
            }
            if let Some(caps) = self.rules.fence.captures(trimmed) {
                let language = caps[1].trim().to_string();
                self.fenced_code(language);
                continue;
            }
            if self.rules.blockquote.is_match(line) {
                self.blockquote();
                continue;
            }
            let ordered = self.rules.ordered_list.is_match(line);
            if ordered || self.rules.unordered_list.is_match(line) {
                self.list(ordered);
                continue;
            }
            self.paragraph(false);
        }
        self.tokens
    }

    /// Rule 1: `---` delimited metadata, only recognized at document start.
    fn frontmatter(&mut self) {
        self.pos += 1;
        let start = self.pos;
        let mut end = None;
        while self.pos < self.lines.len() {
            if self.rules.frontmatter.is_match(self.lines[self.pos].trim()) {
                end = Some(self.pos);
                self.pos += 1;
                break;
            }
            self.pos += 1;
        }
        let body = match end {
            Some(end) => &self.lines[start..end],
            None => {
                log::warn!("frontmatter opened at line {start} is unterminated");
                &self.lines[start..]
            }
        };
        self.tokens
            .push(BlockToken::frontmatter(body.join("\n"), start));
    }

    /// Rule 3: lines indented by 4+ spaces or a tab, prefix stripped.
    fn indented_code(&mut self) {
        let start = self.pos;
        let mut body = Vec::new();
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            if let Some(rest) = line.strip_prefix("    ") {
                body.push(rest);
            } else if let Some(rest) = line.strip_prefix('\t') {
                body.push(rest);
            } else {
                break;
            }
            self.pos += 1;
        }
        if !body.is_empty() {
            let info = CodeInfo {
                language: None,
                form: CodeForm::Indented,
            };
            self.tokens
                .push(BlockToken::code(body.join("\n"), info, start + 1));
        }
    }

    /// Rule 9: triple-backtick fence. Content is taken verbatim until a line
    /// that is exactly the closing fence. Reaching end of input first is the
    /// failed-fence case: rewind to the opening line and re-read it as a
    /// paragraph. This is the single backward cursor move in the state
    /// machine.
    fn fenced_code(&mut self, language: String) {
        let open = self.pos;
        self.pos += 1;
        let body_start = self.pos;
        while self.pos < self.lines.len() {
            if self.lines[self.pos].trim() == "```" {
                let content = self.lines[body_start..self.pos].join("\n");
                self.pos += 1;
                let info = CodeInfo {
                    language: (!language.is_empty()).then_some(language),
                    form: CodeForm::Fenced,
                };
                self.tokens.push(BlockToken::code(content, info, open + 1));
                return;
            }
            self.pos += 1;
        }
        log::warn!(
            "code fence opened at line {} is unterminated; re-reading as paragraph",
            open + 1
        );
        self.pos = open;
        self.paragraph(true);
    }

    /// Rule 10: `>`-marked lines plus lazy continuations, i.e. non-blank
    /// lines without the marker that don't start any other block.
    fn blockquote(&mut self) {
        let start = self.pos;
        let mut body: Vec<&str> = Vec::new();
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            if let Some(caps) = self.rules.blockquote.captures(line) {
                body.push(caps.get(2).map_or("", |m| m.as_str()));
            } else if !body.is_empty()
                && !line.trim().is_empty()
                && !self.rules.starts_new_block(line.trim())
            {
                body.push(line);
            } else {
                break;
            }
            self.pos += 1;
        }
        self.tokens
            .push(BlockToken::blockquote(body.join("\n"), start + 1));
    }

    /// Rule 12: the fallback. `force_first` is set by fence recovery so the
    /// rewound fence line is taken as ordinary text instead of re-dispatching.
    fn paragraph(&mut self, force_first: bool) {
        let start = self.pos;
        let mut body: Vec<&str> = Vec::new();
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            if line.trim().is_empty() {
                self.pos += 1;
                break;
            }
            if !(force_first && self.pos == start) && self.rules.starts_new_block(line.trim()) {
                break;
            }
            body.push(line);
            self.pos += 1;
        }
        let content = body.join("\n").trim().to_string();
        if !content.is_empty() {
            self.tokens.push(BlockToken::paragraph(content, start + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::token::BlockKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn atx_headers_levels_and_lines() {
        let tokens = tokenize("# H1\n## H2");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, BlockKind::Header);
        assert_eq!(tokens[0].level, Some(1));
        assert_eq!(tokens[0].start_line, 1);
        assert_eq!(tokens[1].level, Some(2));
        assert_eq!(tokens[1].start_line, 2);
    }

    #[test]
    fn setext_headers() {
        let h1 = tokenize("Title\n===");
        assert_eq!(h1.len(), 1);
        assert_eq!(h1[0].kind, BlockKind::Header);
        assert_eq!(h1[0].level, Some(1));
        assert_eq!(h1[0].start_line, 1);
        assert_eq!(h1[0].content.as_deref(), Some("Title"));

        let h2 = tokenize("Title\n---");
        assert_eq!(h2[0].level, Some(2));
        assert_eq!(h2[0].start_line, 1);
    }

    #[test]
    fn fenced_code_with_language() {
        let tokens = tokenize("```python\nprint(1)\n```");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, BlockKind::Code);
        assert_eq!(tokens[0].content.as_deref(), Some("print(1)"));
        let code = tokens[0].code.as_ref().unwrap();
        assert_eq!(code.form, CodeForm::Fenced);
        assert_eq!(code.language.as_deref(), Some("python"));
    }

    #[test]
    fn fence_without_language_has_none() {
        let tokens = tokenize("```\nx\n```");
        assert_eq!(tokens[0].code.as_ref().unwrap().language, None);
    }

    #[test]
    fn unterminated_fence_becomes_paragraph() {
        let tokens = tokenize("```python\nprint(1)");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, BlockKind::Paragraph);
        assert_eq!(tokens[0].content.as_deref(), Some("```python\nprint(1)"));
        assert_eq!(tokens[0].start_line, 1);
    }

    #[test]
    fn indented_code_strips_prefix() {
        let tokens = tokenize("    let x = 1;\n\tlet y = 2;");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, BlockKind::Code);
        assert_eq!(tokens[0].content.as_deref(), Some("let x = 1;\nlet y = 2;"));
        assert_eq!(tokens[0].code.as_ref().unwrap().form, CodeForm::Indented);
    }

    #[test]
    fn frontmatter_at_document_start() {
        let tokens = tokenize("---\ntitle: Test\n---\n\nBody");
        assert_eq!(tokens[0].kind, BlockKind::Frontmatter);
        assert_eq!(tokens[0].content.as_deref(), Some("title: Test"));
        assert_eq!(tokens[0].start_line, 1);
        assert_eq!(tokens[1].kind, BlockKind::Paragraph);
    }

    #[test]
    fn unterminated_frontmatter_takes_rest_of_input() {
        let tokens = tokenize("---\ntitle: Test\nmore");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, BlockKind::Frontmatter);
        assert_eq!(tokens[0].content.as_deref(), Some("title: Test\nmore"));
    }

    #[test]
    fn three_dashes_mid_document_is_a_rule_not_frontmatter() {
        let tokens = tokenize("para\n\n---\n\nafter");
        assert_eq!(tokens[1].kind, BlockKind::HorizontalRule);
        assert_eq!(tokens[1].start_line, 3);
    }

    #[test]
    fn blockquote_with_lazy_continuation() {
        let tokens = tokenize("> first\nlazy line\n> third");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, BlockKind::Blockquote);
        assert_eq!(tokens[0].content.as_deref(), Some("first\nlazy line\nthird"));
    }

    #[test]
    fn blockquote_stops_at_new_block() {
        let tokens = tokenize("> quoted\n# Header");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].content.as_deref(), Some("quoted"));
        assert_eq!(tokens[1].kind, BlockKind::Header);
    }

    #[test]
    fn paragraph_joins_and_trims() {
        let tokens = tokenize("  line one\nline two  \n\nnext");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].content.as_deref(), Some("line one\nline two"));
        assert_eq!(tokens[1].start_line, 4);
    }

    #[test]
    fn paragraph_ends_at_block_start() {
        let tokens = tokenize("prose\n> quote");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, BlockKind::Paragraph);
        assert_eq!(tokens[1].kind, BlockKind::Blockquote);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n\n\n").is_empty());
    }

    #[test]
    fn determinism() {
        let text = "# T\n\npara\n\n- a\n- b\n\n> q\n";
        assert_eq!(tokenize(text), tokenize(text));
    }

    #[test]
    fn token_order_follows_source_order() {
        let tokens = tokenize("# A\n\npara\n\n***\n\n> q");
        let kinds: Vec<BlockKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Header,
                BlockKind::Paragraph,
                BlockKind::HorizontalRule,
                BlockKind::Blockquote
            ]
        );
        let mut lines: Vec<usize> = tokens.iter().map(|t| t.start_line).collect();
        let sorted = {
            let mut s = lines.clone();
            s.sort_unstable();
            s
        };
        assert_eq!(lines, sorted);
        lines.dedup();
        assert_eq!(lines.len(), tokens.len());
    }
}
