use super::BlockTokenizer;
use crate::parsing::token::{BlockToken, TableData};

impl BlockTokenizer<'_> {
    /// Rule 4 lookahead: current and next line both carry a pipe, and the
    /// next line has the separator-row shape.
    pub(super) fn at_table_start(&self) -> bool {
        let Some(next) = self.lines.get(self.pos + 1) else {
            return false;
        };
        self.lines[self.pos].trim().contains('|')
            && next.trim().contains('|')
            && self.rules.table_separator.is_match(next.trim())
    }

    /// Rule 4: header row, separator row (validated, discarded), then data
    /// rows until a blank line, a new block, or a line without a pipe.
    pub(super) fn table(&mut self) {
        let start = self.pos;
        let header = self.lines[self.pos].trim();
        self.pos += 2;
        let mut rows = Vec::new();
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos].trim();
            if line.is_empty() || self.rules.starts_new_block(line) || !line.contains('|') {
                break;
            }
            rows.push(split_row(line));
            self.pos += 1;
        }
        let data = TableData {
            header_cells: split_row(header),
            rows,
        };
        self.tokens.push(BlockToken::table(data, start + 1));
    }
}

/// Splits a row on pipes, trimming cells and dropping the empty leading and
/// trailing cells produced by edge pipes.
fn split_row(row: &str) -> Vec<String> {
    let mut cells: Vec<String> = row.trim().split('|').map(|c| c.trim().to_string()).collect();
    if cells.first().is_some_and(String::is_empty) {
        cells.remove(0);
    }
    if cells.last().is_some_and(String::is_empty) {
        cells.pop();
    }
    cells
}
