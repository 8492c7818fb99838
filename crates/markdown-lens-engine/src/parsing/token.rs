use serde::Serialize;

use super::inline::types::InlineEntities;

/// The kind of a top-level block construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Delimited metadata block at the very start of a document.
    Frontmatter,
    /// ATX (`# Title`) or setext (`Title` + underline) header.
    Header,
    Paragraph,
    Blockquote,
    /// Fenced or indented code block.
    Code,
    HtmlBlock,
    OrderedList,
    UnorderedList,
    Table,
    HorizontalRule,
}

/// How a code block was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeForm {
    Fenced,
    Indented,
}

/// Code-block specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeInfo {
    /// Language label after the opening fence, if any. Always `None` for
    /// indented blocks.
    pub language: Option<String>,
    pub form: CodeForm,
}

/// A single list item after marker stripping and task detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub text: String,
    pub is_task: bool,
    pub checked: bool,
    /// Populated by the inline pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<InlineEntities>,
}

/// Table-specific fields. The separator row is validated and discarded
/// during tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableData {
    pub header_cells: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A block-level token.
///
/// One token per top-level construct, in source order. `content` carries the
/// raw text payload where the construct has one; lists, tables and horizontal
/// rules use the structured fields instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockToken {
    pub kind: BlockKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Header level 1-6, only for `Header`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// 1-based line number of the construct's first source line.
    pub start_line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,
    /// Populated by the inline pass for header/paragraph/blockquote tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<InlineEntities>,
}

impl BlockToken {
    fn bare(kind: BlockKind, start_line: usize) -> Self {
        Self {
            kind,
            content: None,
            level: None,
            start_line,
            code: None,
            items: Vec::new(),
            table: None,
            inline: None,
        }
    }

    pub fn frontmatter(content: String, start_line: usize) -> Self {
        Self {
            content: Some(content),
            ..Self::bare(BlockKind::Frontmatter, start_line)
        }
    }

    pub fn header(level: u8, text: String, start_line: usize) -> Self {
        Self {
            content: Some(text),
            level: Some(level),
            ..Self::bare(BlockKind::Header, start_line)
        }
    }

    pub fn paragraph(content: String, start_line: usize) -> Self {
        Self {
            content: Some(content),
            ..Self::bare(BlockKind::Paragraph, start_line)
        }
    }

    pub fn blockquote(content: String, start_line: usize) -> Self {
        Self {
            content: Some(content),
            ..Self::bare(BlockKind::Blockquote, start_line)
        }
    }

    pub fn code(content: String, info: CodeInfo, start_line: usize) -> Self {
        Self {
            content: Some(content),
            code: Some(info),
            ..Self::bare(BlockKind::Code, start_line)
        }
    }

    pub fn html_block(content: String, start_line: usize) -> Self {
        Self {
            content: Some(content),
            ..Self::bare(BlockKind::HtmlBlock, start_line)
        }
    }

    pub fn list(ordered: bool, items: Vec<ListItem>, start_line: usize) -> Self {
        let kind = if ordered {
            BlockKind::OrderedList
        } else {
            BlockKind::UnorderedList
        };
        Self {
            items,
            ..Self::bare(kind, start_line)
        }
    }

    pub fn table(data: TableData, start_line: usize) -> Self {
        Self {
            table: Some(data),
            ..Self::bare(BlockKind::Table, start_line)
        }
    }

    pub fn horizontal_rule(start_line: usize) -> Self {
        Self::bare(BlockKind::HorizontalRule, start_line)
    }

    /// True for the kinds whose `content` is run through the inline pass.
    pub fn has_inline_content(&self) -> bool {
        matches!(
            self.kind,
            BlockKind::Header | BlockKind::Paragraph | BlockKind::Blockquote
        )
    }
}
