//! Inline annotation behavior through the public API.

use markdown_lens_engine::Document;
use pretty_assertions::assert_eq;

#[test]
fn direct_link_and_image() {
    let doc = Document::parse("[a](http://x) and ![a](http://x)");
    let inline = doc.tokens()[0].inline.as_ref().unwrap();
    assert_eq!(inline.text_links.len(), 1);
    assert_eq!(inline.text_links[0].text, "a");
    assert_eq!(inline.text_links[0].url, "http://x");
    assert_eq!(inline.image_links.len(), 1);
    assert_eq!(inline.image_links[0].alt_text, "a");
    assert_eq!(inline.image_links[0].url, "http://x");
}

#[test]
fn reference_link_resolves_from_anywhere_in_the_document() {
    let doc = Document::parse("[a][ref]\n\nfiller\n\n[REF]: http://y");
    let inline = doc.tokens()[0].inline.as_ref().unwrap();
    assert_eq!(inline.text_links[0].url, "http://y");
}

#[test]
fn reference_lookup_is_case_insensitive() {
    let doc = Document::parse("[a][ReF]\n\n[rEf]: http://y");
    let inline = doc.tokens()[0].inline.as_ref().unwrap();
    assert_eq!(inline.text_links[0].text, "a");
    assert_eq!(inline.text_links[0].url, "http://y");
}

#[test]
fn unresolved_reference_and_broken_brackets_yield_nothing() {
    let doc = Document::parse("[a][missing] and [b](unclosed and `tick");
    let inline = doc.tokens()[0].inline.as_ref().unwrap();
    assert!(inline.text_links.is_empty());
    assert!(inline.image_links.is_empty());
    assert!(inline.code_spans.is_empty());
}

#[test]
fn undefined_footnote_yields_no_usage() {
    let doc = Document::parse("claim[^1] here");
    let inline = doc.tokens()[0].inline.as_ref().unwrap();
    assert!(inline.footnote_uses.is_empty());
}

#[test]
fn footnote_usage_carries_definition_text_and_dedupes() {
    let doc = Document::parse("claim[^1] and again[^1]\n\n[^1]: the proof");
    let inline = doc.tokens()[0].inline.as_ref().unwrap();
    assert_eq!(inline.footnote_uses.len(), 1);
    assert_eq!(inline.footnote_uses[0].id, "1");
    assert_eq!(inline.footnote_uses[0].content, "the proof");
}

#[test]
fn header_and_blockquote_content_is_annotated() {
    let doc = Document::parse("# Title with `code`\n\n> quote with *stress*");
    let header_inline = doc.tokens()[0].inline.as_ref().unwrap();
    assert_eq!(header_inline.code_spans, vec!["code"]);
    let quote_inline = doc.tokens()[1].inline.as_ref().unwrap();
    assert_eq!(quote_inline.emphasis, vec!["stress"]);
}

#[test]
fn entity_lists_keep_first_occurrence_order() {
    let doc = Document::parse("`one` mid `two` end `three`");
    let inline = doc.tokens()[0].inline.as_ref().unwrap();
    assert_eq!(inline.code_spans, vec!["one", "two", "three"]);
}

#[test]
fn paired_inline_html_is_a_whole_element() {
    let doc = Document::parse("before <span class=\"x\">inner <b>deep</b></span> after");
    let inline = doc.tokens()[0].inline.as_ref().unwrap();
    assert_eq!(
        inline.html_fragments,
        vec!["<span class=\"x\">inner <b>deep</b></span>", "<b>deep</b>"]
    );
}
