use std::collections::HashMap;

use super::rules::rules;

/// Link-reference and footnote definitions collected before tokenization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definitions {
    /// Lower-cased reference label -> target URL.
    pub references: HashMap<String, String>,
    /// Footnote id -> definition text.
    pub footnotes: HashMap<String, String>,
}

/// Scans the whole raw text once for `[label]: target` and `[^id]: text`
/// definition lines.
///
/// The scan is flat: it ignores block boundaries entirely, so a
/// definition-shaped line inside a fenced code block or HTML block is still
/// captured. Because the reference-label pattern accepts any non-`]`
/// characters, footnote definition lines also land in the reference map under
/// their caret-prefixed label.
pub fn scan(text: &str) -> Definitions {
    let rules = rules();
    let mut defs = Definitions::default();
    for caps in rules.reference_def.captures_iter(text) {
        defs.references
            .insert(caps[1].to_lowercase(), caps[2].to_string());
    }
    for caps in rules.footnote_def.captures_iter(text) {
        defs.footnotes.insert(caps[1].to_string(), caps[2].to_string());
    }
    defs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_reference_definitions_case_folded() {
        let defs = scan("[Ref]: http://example.com/a\n\ntext\n[OTHER]: http://example.com/b");
        assert_eq!(
            defs.references.get("ref").map(String::as_str),
            Some("http://example.com/a")
        );
        assert_eq!(
            defs.references.get("other").map(String::as_str),
            Some("http://example.com/b")
        );
    }

    #[test]
    fn collects_footnote_definitions() {
        let defs = scan("[^1]: First note\n[^alpha]: Second note");
        assert_eq!(defs.footnotes.get("1").map(String::as_str), Some("First note"));
        assert_eq!(
            defs.footnotes.get("alpha").map(String::as_str),
            Some("Second note")
        );
    }

    #[test]
    fn definition_inside_code_fence_is_still_captured() {
        // The pre-scan runs over the flat text, on purpose.
        let defs = scan("```\n[ref]: http://example.com\n```");
        assert!(defs.references.contains_key("ref"));
    }

    #[test]
    fn footnote_definition_also_lands_in_reference_map() {
        let defs = scan("[^note]: body");
        assert!(defs.footnotes.contains_key("note"));
        assert!(defs.references.contains_key("^note"));
    }

    #[test]
    fn trailing_whitespace_is_trimmed_from_targets() {
        let defs = scan("[ref]: http://example.com   ");
        assert_eq!(
            defs.references.get("ref").map(String::as_str),
            Some("http://example.com")
        );
    }

    #[test]
    fn empty_text_yields_empty_maps() {
        let defs = scan("");
        assert!(defs.references.is_empty());
        assert!(defs.footnotes.is_empty());
    }
}
