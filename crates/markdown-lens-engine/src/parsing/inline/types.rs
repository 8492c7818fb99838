use serde::Serialize;

/// A direct or reference-resolved link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// An image link (`![alt](url)` or `![alt][ref]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageLink {
    pub alt_text: String,
    pub url: String,
}

/// A resolved footnote usage. At most one per id per block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FootnoteUse {
    pub id: String,
    pub content: String,
}

/// The inline entities extracted from one block's text.
///
/// Each list is ordered by first occurrence within the block; an empty list
/// means "none found", never "not scanned".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineEntities {
    pub text_links: Vec<Link>,
    pub image_links: Vec<ImageLink>,
    pub code_spans: Vec<String>,
    pub emphasis: Vec<String>,
    pub footnote_uses: Vec<FootnoteUse>,
    pub html_fragments: Vec<String>,
}

impl InlineEntities {
    /// True when no category matched anything.
    pub fn is_empty(&self) -> bool {
        self.text_links.is_empty()
            && self.image_links.is_empty()
            && self.code_spans.is_empty()
            && self.emphasis.is_empty()
            && self.footnote_uses.is_empty()
            && self.html_fragments.is_empty()
    }
}
