//! Inline entity extraction within a block's text.
//!
//! Given one block's textual content plus the pre-scanned reference and
//! footnote maps, produces the six per-category entity lists. Extraction
//! never fails: malformed syntax simply doesn't match, and unresolved
//! references or footnote ids yield no entity.

pub mod types;

mod cursor;
mod html;

use std::collections::{HashMap, HashSet};

use super::rules::rules;
use super::token::BlockToken;
use types::{FootnoteUse, ImageLink, InlineEntities, Link};

/// Extracts inline entities from one block's text.
///
/// `references` is keyed by lower-cased label; lookups fold the label's case.
/// Footnote usages are deduplicated so each id appears at most once per call.
pub fn annotate(
    text: &str,
    references: &HashMap<String, String>,
    footnotes: &HashMap<String, String>,
) -> InlineEntities {
    let rules = rules();
    let mut entities = InlineEntities::default();

    let mut used = HashSet::new();
    for caps in rules.footnote_use.captures_iter(text) {
        let id = &caps[1];
        if let Some(content) = footnotes.get(id)
            && used.insert(id.to_string())
        {
            entities.footnote_uses.push(FootnoteUse {
                id: id.to_string(),
                content: content.clone(),
            });
        }
    }

    for caps in rules.code_span.captures_iter(text) {
        entities.code_spans.push(caps[1].to_string());
    }

    for caps in rules.emphasis.captures_iter(text) {
        let span = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4));
        if let Some(span) = span
            && !span.as_str().is_empty()
        {
            entities.emphasis.push(span.as_str().to_string());
        }
    }

    entities.html_fragments = html::scan_fragments(text);

    for caps in rules.image_or_link.captures_iter(text) {
        let is_image = !caps[1].is_empty();
        let label = &caps[2];
        let url = if let Some(direct) = caps.get(4) {
            Some(direct.as_str().to_string())
        } else {
            caps.get(5)
                .and_then(|r| references.get(&r.as_str().to_lowercase()))
                .cloned()
        };
        let Some(url) = url else { continue };
        if is_image {
            entities.image_links.push(ImageLink {
                alt_text: label.to_string(),
                url,
            });
        } else {
            entities.text_links.push(Link {
                text: label.to_string(),
                url,
            });
        }
    }

    entities
}

/// Runs the inline pass over a freshly tokenized stream, attaching entities
/// to header/paragraph/blockquote content and to each list item's text.
pub(crate) fn annotate_tokens(
    tokens: &mut [BlockToken],
    references: &HashMap<String, String>,
    footnotes: &HashMap<String, String>,
) {
    for token in tokens {
        if token.has_inline_content() {
            if let Some(content) = &token.content {
                token.inline = Some(annotate(content, references, footnotes));
            }
        } else {
            for item in &mut token.items {
                item.inline = Some(annotate(&item.text, references, footnotes));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn empty_maps() -> (HashMap<String, String>, HashMap<String, String>) {
        (HashMap::new(), HashMap::new())
    }

    #[test]
    fn direct_link() {
        let (refs, notes) = empty_maps();
        let entities = annotate("see [a](http://x)", &refs, &notes);
        assert_eq!(
            entities.text_links,
            vec![Link {
                text: "a".to_string(),
                url: "http://x".to_string()
            }]
        );
        assert!(entities.image_links.is_empty());
    }

    #[test]
    fn image_link() {
        let (refs, notes) = empty_maps();
        let entities = annotate("![a](http://x)", &refs, &notes);
        assert_eq!(
            entities.image_links,
            vec![ImageLink {
                alt_text: "a".to_string(),
                url: "http://x".to_string()
            }]
        );
        assert!(entities.text_links.is_empty());
    }

    #[test]
    fn reference_link_resolves_case_insensitively() {
        let mut refs = HashMap::new();
        refs.insert("ref".to_string(), "http://y".to_string());
        let notes = HashMap::new();
        let entities = annotate("[a][REF]", &refs, &notes);
        assert_eq!(
            entities.text_links,
            vec![Link {
                text: "a".to_string(),
                url: "http://y".to_string()
            }]
        );
    }

    #[test]
    fn unresolvable_reference_yields_no_entity() {
        let (refs, notes) = empty_maps();
        let entities = annotate("[a][nowhere]", &refs, &notes);
        assert!(entities.text_links.is_empty());
    }

    #[test]
    fn code_spans_in_order() {
        let (refs, notes) = empty_maps();
        let entities = annotate("`first` then `second`", &refs, &notes);
        assert_eq!(entities.code_spans, vec!["first", "second"]);
    }

    #[test]
    fn emphasis_variants() {
        let (refs, notes) = empty_maps();
        let entities = annotate("*i*, _i2_, **b**, __b2__", &refs, &notes);
        assert_eq!(entities.emphasis, vec!["i", "i2", "b", "b2"]);
    }

    #[test]
    fn empty_emphasis_is_skipped() {
        let (refs, notes) = empty_maps();
        let entities = annotate("a ** b", &refs, &notes);
        assert!(entities.emphasis.is_empty());
    }

    #[test]
    fn footnote_usage_requires_definition() {
        let refs = HashMap::new();
        let mut notes = HashMap::new();
        notes.insert("1".to_string(), "the note".to_string());
        let entities = annotate("known[^1] unknown[^2]", &refs, &notes);
        assert_eq!(
            entities.footnote_uses,
            vec![FootnoteUse {
                id: "1".to_string(),
                content: "the note".to_string()
            }]
        );
    }

    #[test]
    fn repeated_footnote_id_is_deduplicated() {
        let refs = HashMap::new();
        let mut notes = HashMap::new();
        notes.insert("1".to_string(), "note".to_string());
        let entities = annotate("first[^1] again[^1]", &refs, &notes);
        assert_eq!(entities.footnote_uses.len(), 1);
    }

    #[test]
    fn inline_html_fragment() {
        let (refs, notes) = empty_maps();
        let entities = annotate("text <em>loud</em> more", &refs, &notes);
        assert_eq!(entities.html_fragments, vec!["<em>loud</em>"]);
    }

    #[test]
    fn empty_input_yields_all_empty_lists() {
        let (refs, notes) = empty_maps();
        let entities = annotate("", &refs, &notes);
        assert!(entities.is_empty());
    }
}
