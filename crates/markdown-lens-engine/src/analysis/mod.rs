//! # Analysis
//!
//! The query layer over a parsed token stream. Everything here is a pure
//! read of `&[BlockToken]` (plus the raw text for the word and character
//! counts): no re-parsing, no tokenizer internals.

use serde::Serialize;

use crate::parsing::inline::types::InlineEntities;
use crate::parsing::token::{BlockKind, BlockToken, CodeForm, ListItem, TableData};

/// A header occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub line: usize,
    pub level: u8,
    pub text: String,
}

/// A code block occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub start_line: usize,
    pub language: Option<String>,
    pub form: CodeForm,
    pub content: String,
}

/// A text link with the line of its owning block (list items are offset by
/// their index within the list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOccurrence {
    pub line: usize,
    pub text: String,
    pub url: String,
    pub from_list_item: bool,
}

/// An image link occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageOccurrence {
    pub line: usize,
    pub alt_text: String,
    pub url: String,
    pub from_list_item: bool,
}

/// All link occurrences in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    pub text_links: Vec<LinkOccurrence>,
    pub image_links: Vec<ImageOccurrence>,
}

/// A resolved footnote reference, deduplicated document-wide by id and
/// definition text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FootnoteOccurrence {
    pub line: usize,
    pub id: String,
    pub content: String,
}

/// A code span occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSpanOccurrence {
    pub line: usize,
    pub code: String,
}

/// An emphasis span occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmphasisOccurrence {
    pub line: usize,
    pub text: String,
}

/// A task list item with its computed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOccurrence {
    pub line: usize,
    pub text: String,
    pub checked: bool,
}

/// An HTML block occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlBlockOccurrence {
    pub line: usize,
    pub content: String,
}

/// An inline HTML fragment occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlFragmentOccurrence {
    pub line: usize,
    pub html: String,
}

/// Document-wide counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub headers: usize,
    pub paragraphs: usize,
    pub blockquotes: usize,
    pub code_blocks: usize,
    pub ordered_list_items: usize,
    pub unordered_list_items: usize,
    pub tables: usize,
    pub html_blocks: usize,
    pub html_fragments: usize,
    pub words: usize,
    pub characters: usize,
    pub links: usize,
    pub images: usize,
    pub footnotes: usize,
    pub task_items: usize,
    /// Only populated for MDX documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_imports: Option<usize>,
}

/// The element kind in the flattened sequential view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Frontmatter,
    Header,
    Paragraph,
    Blockquote,
    Code,
    HtmlBlock,
    OrderedList,
    UnorderedList,
    Table,
    HorizontalRule,
    ListItem,
    TaskItem,
}

impl From<BlockKind> for ElementKind {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Frontmatter => Self::Frontmatter,
            BlockKind::Header => Self::Header,
            BlockKind::Paragraph => Self::Paragraph,
            BlockKind::Blockquote => Self::Blockquote,
            BlockKind::Code => Self::Code,
            BlockKind::HtmlBlock => Self::HtmlBlock,
            BlockKind::OrderedList => Self::OrderedList,
            BlockKind::UnorderedList => Self::UnorderedList,
            BlockKind::Table => Self::Table,
            BlockKind::HorizontalRule => Self::HorizontalRule,
        }
    }
}

/// One inline entity in the sequential view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InlineElementKind {
    Emphasis { content: String },
    InlineCode { content: String },
    Link { text: String, url: String },
    Image { alt_text: String, url: String },
    HtmlInline { content: String },
    FootnoteRef { ref_id: String, content: String },
}

/// A numbered inline entity in the sequential view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineElement {
    pub id: usize,
    #[serde(flatten)]
    pub element: InlineElementKind,
}

/// A numbered element in the flattened sequential view of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequentialElement {
    pub id: usize,
    pub kind: ElementKind,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SequentialElement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inline_elements: Vec<InlineElement>,
}

/// A borrowed query view over a parsed document.
pub struct Analysis<'a> {
    text: &'a str,
    tokens: &'a [BlockToken],
}

impl<'a> Analysis<'a> {
    pub fn new(text: &'a str, tokens: &'a [BlockToken]) -> Self {
        Self { text, tokens }
    }

    fn of_kind(&self, kind: BlockKind) -> impl Iterator<Item = &'a BlockToken> {
        self.tokens.iter().filter(move |t| t.kind == kind)
    }

    pub fn headings(&self) -> Vec<Heading> {
        self.of_kind(BlockKind::Header)
            .map(|t| Heading {
                line: t.start_line,
                level: t.level.unwrap_or(1),
                text: t.content.clone().unwrap_or_default(),
            })
            .collect()
    }

    pub fn paragraphs(&self) -> Vec<String> {
        self.of_kind(BlockKind::Paragraph)
            .filter_map(|t| t.content.clone())
            .collect()
    }

    pub fn blockquotes(&self) -> Vec<String> {
        self.of_kind(BlockKind::Blockquote)
            .filter_map(|t| t.content.clone())
            .collect()
    }

    pub fn code_blocks(&self) -> Vec<CodeBlock> {
        self.of_kind(BlockKind::Code)
            .filter_map(|t| {
                let code = t.code.as_ref()?;
                Some(CodeBlock {
                    start_line: t.start_line,
                    language: code.language.clone(),
                    form: code.form,
                    content: t.content.clone().unwrap_or_default(),
                })
            })
            .collect()
    }

    pub fn ordered_lists(&self) -> Vec<Vec<ListItem>> {
        self.of_kind(BlockKind::OrderedList)
            .map(|t| t.items.clone())
            .collect()
    }

    pub fn unordered_lists(&self) -> Vec<Vec<ListItem>> {
        self.of_kind(BlockKind::UnorderedList)
            .map(|t| t.items.clone())
            .collect()
    }

    pub fn tables(&self) -> Vec<TableData> {
        self.of_kind(BlockKind::Table)
            .filter_map(|t| t.table.clone())
            .collect()
    }

    /// Every link and image occurrence, with list-item entities attributed to
    /// `list start line + item index`.
    pub fn links(&self) -> LinkReport {
        let mut report = LinkReport::default();
        for token in self.tokens {
            if let Some(inline) = &token.inline {
                collect_links(&mut report, inline, token.start_line, false);
            }
            for (idx, item) in token.items.iter().enumerate() {
                if let Some(inline) = &item.inline {
                    collect_links(&mut report, inline, token.start_line + idx, true);
                }
            }
        }
        report
    }

    /// Footnote references at block level, deduplicated document-wide by
    /// (id, content); the line is the first referencing block's.
    pub fn footnote_references(&self) -> Vec<FootnoteOccurrence> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for token in self.tokens {
            let Some(inline) = &token.inline else { continue };
            for usage in &inline.footnote_uses {
                if seen.insert((usage.id.clone(), usage.content.clone())) {
                    out.push(FootnoteOccurrence {
                        line: token.start_line,
                        id: usage.id.clone(),
                        content: usage.content.clone(),
                    });
                }
            }
        }
        out
    }

    pub fn code_spans(&self) -> Vec<CodeSpanOccurrence> {
        self.tokens
            .iter()
            .filter_map(|t| t.inline.as_ref().map(|i| (t.start_line, i)))
            .flat_map(|(line, inline)| {
                inline.code_spans.iter().map(move |code| CodeSpanOccurrence {
                    line,
                    code: code.clone(),
                })
            })
            .collect()
    }

    pub fn emphasis(&self) -> Vec<EmphasisOccurrence> {
        self.tokens
            .iter()
            .filter_map(|t| t.inline.as_ref().map(|i| (t.start_line, i)))
            .flat_map(|(line, inline)| {
                inline.emphasis.iter().map(move |text| EmphasisOccurrence {
                    line,
                    text: text.clone(),
                })
            })
            .collect()
    }

    pub fn task_items(&self) -> Vec<TaskOccurrence> {
        let mut out = Vec::new();
        for token in self.tokens {
            for (idx, item) in token.items.iter().enumerate() {
                if item.is_task {
                    out.push(TaskOccurrence {
                        line: token.start_line + idx,
                        text: item.text.clone(),
                        checked: item.checked,
                    });
                }
            }
        }
        out
    }

    pub fn html_blocks(&self) -> Vec<HtmlBlockOccurrence> {
        self.of_kind(BlockKind::HtmlBlock)
            .filter_map(|t| {
                t.content.as_ref().map(|content| HtmlBlockOccurrence {
                    line: t.start_line,
                    content: content.clone(),
                })
            })
            .collect()
    }

    pub fn html_fragments(&self) -> Vec<HtmlFragmentOccurrence> {
        self.tokens
            .iter()
            .filter_map(|t| t.inline.as_ref().map(|i| (t.start_line, i)))
            .flat_map(|(line, inline)| {
                inline.html_fragments.iter().map(move |html| {
                    HtmlFragmentOccurrence {
                        line,
                        html: html.clone(),
                    }
                })
            })
            .collect()
    }

    /// Whitespace-separated word count over the raw text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Non-whitespace character count over the raw text.
    pub fn character_count(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }

    pub fn summary(&self) -> Summary {
        let links = self.links();
        Summary {
            headers: self.of_kind(BlockKind::Header).count(),
            paragraphs: self.of_kind(BlockKind::Paragraph).count(),
            blockquotes: self.of_kind(BlockKind::Blockquote).count(),
            code_blocks: self.of_kind(BlockKind::Code).count(),
            ordered_list_items: self
                .of_kind(BlockKind::OrderedList)
                .map(|t| t.items.len())
                .sum(),
            unordered_list_items: self
                .of_kind(BlockKind::UnorderedList)
                .map(|t| t.items.len())
                .sum(),
            tables: self.of_kind(BlockKind::Table).count(),
            html_blocks: self.of_kind(BlockKind::HtmlBlock).count(),
            html_fragments: self.html_fragments().len(),
            words: self.word_count(),
            characters: self.character_count(),
            links: links.text_links.len() + links.image_links.len(),
            images: links.image_links.len(),
            footnotes: self.footnote_references().len(),
            task_items: self.task_items().len(),
            jsx_imports: None,
        }
    }

    /// The flattened, id-numbered element view of the whole document, list
    /// items nested under their list.
    pub fn sequential_elements(&self) -> Vec<SequentialElement> {
        let mut next_id = 1;
        let mut out = Vec::new();
        for token in self.tokens {
            out.push(sequential_element(token, &mut next_id));
        }
        out
    }
}

fn collect_links(report: &mut LinkReport, inline: &InlineEntities, line: usize, from_list: bool) {
    for link in &inline.text_links {
        report.text_links.push(LinkOccurrence {
            line,
            text: link.text.clone(),
            url: link.url.clone(),
            from_list_item: from_list,
        });
    }
    for image in &inline.image_links {
        report.image_links.push(ImageOccurrence {
            line,
            alt_text: image.alt_text.clone(),
            url: image.url.clone(),
            from_list_item: from_list,
        });
    }
}

fn take_id(next_id: &mut usize) -> usize {
    let id = *next_id;
    *next_id += 1;
    id
}

fn sequential_element(token: &BlockToken, next_id: &mut usize) -> SequentialElement {
    let mut element = SequentialElement {
        id: take_id(next_id),
        kind: token.kind.into(),
        line: token.start_line,
        level: token.level,
        content: token.content.clone(),
        language: token.code.as_ref().and_then(|c| c.language.clone()),
        checked: None,
        table: token.table.clone(),
        items: Vec::new(),
        inline_elements: Vec::new(),
    };
    if let Some(inline) = &token.inline {
        element.inline_elements = inline_elements(inline, next_id);
    }
    for (idx, item) in token.items.iter().enumerate() {
        let mut child = SequentialElement {
            id: take_id(next_id),
            kind: if item.is_task {
                ElementKind::TaskItem
            } else {
                ElementKind::ListItem
            },
            line: token.start_line + idx,
            level: None,
            content: Some(item.text.clone()),
            language: None,
            checked: item.is_task.then_some(item.checked),
            table: None,
            items: Vec::new(),
            inline_elements: Vec::new(),
        };
        if let Some(inline) = &item.inline {
            child.inline_elements = inline_elements(inline, next_id);
        }
        element.items.push(child);
    }
    element
}

/// Inline entities in the sequential view's fixed category order: emphasis,
/// code spans, text links, image links, html fragments, footnote refs.
fn inline_elements(inline: &InlineEntities, next_id: &mut usize) -> Vec<InlineElement> {
    let mut out = Vec::new();
    for text in &inline.emphasis {
        out.push(InlineElement {
            id: take_id(next_id),
            element: InlineElementKind::Emphasis {
                content: text.clone(),
            },
        });
    }
    for code in &inline.code_spans {
        out.push(InlineElement {
            id: take_id(next_id),
            element: InlineElementKind::InlineCode {
                content: code.clone(),
            },
        });
    }
    for link in &inline.text_links {
        out.push(InlineElement {
            id: take_id(next_id),
            element: InlineElementKind::Link {
                text: link.text.clone(),
                url: link.url.clone(),
            },
        });
    }
    for image in &inline.image_links {
        out.push(InlineElement {
            id: take_id(next_id),
            element: InlineElementKind::Image {
                alt_text: image.alt_text.clone(),
                url: image.url.clone(),
            },
        });
    }
    for html in &inline.html_fragments {
        out.push(InlineElement {
            id: take_id(next_id),
            element: InlineElementKind::HtmlInline {
                content: html.clone(),
            },
        });
    }
    for usage in &inline.footnote_uses {
        out.push(InlineElement {
            id: take_id(next_id),
            element: InlineElementKind::FootnoteRef {
                ref_id: usage.id.clone(),
                content: usage.content.clone(),
            },
        });
    }
    out
}
