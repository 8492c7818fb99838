use regex::Regex;

use super::BlockTokenizer;
use crate::parsing::token::BlockToken;

impl BlockTokenizer<'_> {
    /// Rule 5: HTML blocks.
    ///
    /// Three consumption modes, chosen from the first line:
    /// - `<!--` comment: consume through the line carrying `-->`.
    /// - paired tag: count the tag's opening and closing forms per line,
    ///   starting from zero, and stop once the balance reaches zero. The
    ///   first line always counts, so a one-line `<div>x</div>` closes
    ///   immediately and the balance can never end a block before it.
    /// - self-closing tag: consume until a blank line or another block start.
    ///
    /// Reaching end of input in the first two modes logs a warning and closes
    /// the block with everything consumed.
    pub(super) fn html_block(&mut self) {
        let start = self.pos;
        let first = self.lines[self.pos].trim();
        let comment = first.starts_with("<!--");
        let balance_tag = if comment {
            None
        } else {
            self.rules
                .html_block_start
                .captures(first)
                .and_then(|caps| caps.get(2))
                .filter(|_| !first.ends_with("/>"))
                .map(|tag| tag.as_str().to_string())
        };

        let mut body: Vec<&str> = Vec::new();
        let mut closed = false;
        if comment {
            while self.pos < self.lines.len() {
                let line = self.lines[self.pos];
                body.push(line);
                self.pos += 1;
                if self.rules.html_comment_end.is_match(line) {
                    closed = true;
                    break;
                }
            }
        } else if let Some(tag) = balance_tag {
            let (open_re, close_re) = tag_pair(&tag);
            let mut balance = 0i32;
            while self.pos < self.lines.len() {
                let line = self.lines[self.pos];
                body.push(line);
                self.pos += 1;
                balance += open_re.find_iter(line).count() as i32
                    - close_re.find_iter(line).count() as i32;
                if balance <= 0 {
                    closed = true;
                    break;
                }
            }
        } else {
            while self.pos < self.lines.len() {
                let line = self.lines[self.pos];
                if self.pos > start
                    && (line.trim().is_empty() || self.rules.starts_new_block(line.trim()))
                {
                    break;
                }
                body.push(line);
                self.pos += 1;
            }
            closed = true;
        }

        if !closed {
            log::warn!("html block opened at line {} is unterminated", start + 1);
        }
        self.tokens
            .push(BlockToken::html_block(body.join("\n"), start + 1));
    }
}

/// Opening- and closing-form patterns for one tag name, case-insensitive.
/// The name comes from the block-start capture and is always alphabetic.
fn tag_pair(tag: &str) -> (Regex, Regex) {
    let open = Regex::new(&format!(r"(?i)<{tag}[^>]*>")).expect("open tag pattern must compile");
    let close = Regex::new(&format!(r"(?i)</{tag}>")).expect("close tag pattern must compile");
    (open, close)
}
