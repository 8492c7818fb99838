use super::BlockTokenizer;
use crate::parsing::rules::rules;
use crate::parsing::token::{BlockToken, ListItem};

impl BlockTokenizer<'_> {
    /// Rule 11: list accumulation.
    ///
    /// A marker line opens a new item; non-marker, non-blank lines that don't
    /// start another block continue the current item. A blank line closes the
    /// current item, and the list survives it only when the very next line is
    /// a same-kind marker or indented continuation.
    pub(super) fn list(&mut self, ordered: bool) {
        let start = self.pos;
        let marker = if ordered {
            &self.rules.ordered_list
        } else {
            &self.rules.unordered_list
        };
        let mut items_text: Vec<String> = Vec::new();
        let mut current: Vec<String> = Vec::new();

        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            if line.trim().is_empty() {
                if !current.is_empty() {
                    items_text.push(current.join("\n").trim().to_string());
                    current.clear();
                }
                match self.lines.get(self.pos + 1) {
                    Some(peek)
                        if marker.is_match(peek)
                            || peek.starts_with("    ")
                            || peek.starts_with('\t') => {}
                    _ => {
                        self.pos += 1;
                        break;
                    }
                }
                self.pos += 1;
                continue;
            }
            if self.rules.starts_new_block(line.trim()) && !marker.is_match(line.trim()) {
                break;
            }
            if let Some(caps) = marker.captures(line) {
                if !current.is_empty() {
                    items_text.push(current.join("\n").trim().to_string());
                }
                current = vec![caps[1].to_string()];
            } else if !current.is_empty() {
                current.push(line.trim().to_string());
            } else {
                break;
            }
            self.pos += 1;
        }
        if !current.is_empty() {
            items_text.push(current.join("\n").trim().to_string());
        }

        let items = items_text.into_iter().map(list_item).collect();
        self.tokens.push(BlockToken::list(ordered, items, start + 1));
    }
}

/// Splits a finished item's text into the task-marker fields.
fn list_item(text: String) -> ListItem {
    if let Some(caps) = rules().task_marker.captures(&text) {
        return ListItem {
            text: caps[2].trim().to_string(),
            is_task: true,
            checked: caps[1].eq_ignore_ascii_case("x"),
            inline: None,
        };
    }
    ListItem {
        text,
        is_task: false,
        checked: false,
        inline: None,
    }
}
