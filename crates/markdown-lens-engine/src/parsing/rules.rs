use std::sync::OnceLock;

use regex::Regex;

/// The compiled pattern table for block and inline recognition.
///
/// Built once behind a [`OnceLock`] and handed out as a `&'static` reference;
/// nothing in here is mutated after initialization, so concurrent parses can
/// share it freely.
pub(crate) struct Rules {
    pub frontmatter: Regex,
    pub atx_header: Regex,
    pub setext_h1: Regex,
    pub setext_h2: Regex,
    pub fence: Regex,
    pub blockquote: Regex,
    pub ordered_list: Regex,
    pub unordered_list: Regex,
    pub horizontal_rule: Regex,
    pub table_separator: Regex,
    pub html_block_start: Regex,
    pub html_comment_end: Regex,
    pub task_marker: Regex,
    pub reference_def: Regex,
    pub footnote_def: Regex,
    pub image_or_link: Regex,
    pub code_span: Regex,
    pub emphasis: Regex,
    pub footnote_use: Regex,
}

impl Rules {
    fn compile() -> Self {
        let re = |pattern: &str| Regex::new(pattern).expect("rule pattern must compile");
        Self {
            frontmatter: re(r"^---\s*$"),
            atx_header: re(r"^(#{1,6})\s+(.*)$"),
            setext_h1: re(r"^=+\s*$"),
            setext_h2: re(r"^-+\s*$"),
            fence: re(r"^```([^`]*)$"),
            blockquote: re(r"^(>\s?)(.*)$"),
            ordered_list: re(r"^\s*\d+\.\s+(.*)$"),
            unordered_list: re(r"^\s*[-+*]\s+(.*)$"),
            horizontal_rule: re(r"^(\*{3,}|-{3,}|_{3,})\s*$"),
            table_separator: re(r"^\|?(\s*:?-+:?\s*\|)+\s*:?-+:?\s*\|?\s*$"),
            html_block_start: re(r"^(<([a-zA-Z]+)([^>]*)>|<!--)"),
            html_comment_end: re(r"-->\s*$"),
            task_marker: re(r"(?s)^\[([ xX])\]\s+(.*)$"),
            reference_def: re(r"(?m)^\[([^\]]+)\]:\s+(.*?)\s*$"),
            footnote_def: re(r"(?m)^\[\^([^\]]+)\]:\s+(.*?)\s*$"),
            image_or_link: re(r"(!?)\[([^\]]*)\](\(([^)]+)\)|\[([^\]]+)\])"),
            code_span: re(r"`([^`]+)`"),
            // The regex crate has no back-references, so strong markers are
            // spelled out as separate alternatives. First alternative wins.
            emphasis: re(r"\*\*(.*?)\*\*|__(.*?)__|\*(.*?)\*|_(.*?)_"),
            footnote_use: re(r"\[\^([^\]]+)\]"),
        }
    }

    /// The shared "does this line start a new block" predicate.
    ///
    /// Every multi-line consumer (HTML block, blockquote, list, paragraph,
    /// table rows) uses this one check against the trimmed line, so they all
    /// agree on where their block ends.
    pub fn starts_new_block(&self, trimmed: &str) -> bool {
        self.atx_header.is_match(trimmed)
            || self.frontmatter.is_match(trimmed)
            || self.fence.is_match(trimmed)
            || self.blockquote.is_match(trimmed)
            || self.ordered_list.is_match(trimmed)
            || self.unordered_list.is_match(trimmed)
            || self.horizontal_rule.is_match(trimmed)
            || self.html_block_start.is_match(trimmed)
    }
}

/// Process-wide read-only rule set.
pub(crate) fn rules() -> &'static Rules {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(Rules::compile)
}
