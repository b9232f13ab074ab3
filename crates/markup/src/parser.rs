use crate::block::{ContentBlock, Item, Run};
use crate::inline::{parse_inline, strip_emphasis};
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\.\s+(.*)$").expect("BUG: invalid NUMBERED regex literal")
});
static LABEL_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\*\*([^*]+:)\*\*\s*(.*)$").expect("BUG: invalid LABEL_VALUE regex literal")
});
static BOLD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\*\*([^*]+)\*\*$").expect("BUG: invalid BOLD_LINE regex literal")
});

const BULLET_MARKERS: [&str; 3] = ["- ", "• ", "* "];

/// Parses line-oriented markdown-lite text into blocks and spacing directives.
///
/// Consecutive pipe rows are gathered into a single table. Blank lines become
/// [`Item::Spacing`] and also terminate a pending table. Parsing never fails.
pub fn parse(raw: &str) -> Vec<Item> {
    let mut items = Vec::new();
    let mut table: Vec<Vec<String>> = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim();

        if is_table_row(trimmed) {
            if !is_separator_row(trimmed) {
                table.push(split_cells(trimmed));
            }
            continue;
        }
        flush_table(&mut table, &mut items);

        if trimmed.is_empty() {
            items.push(Item::Spacing);
            continue;
        }

        items.push(Item::Block(parse_line(trimmed)));
    }
    flush_table(&mut table, &mut items);

    log::debug!("parsed {} narrative items", items.len());
    items
}

fn parse_line(trimmed: &str) -> ContentBlock {
    if is_divider(trimmed) {
        return ContentBlock::Divider;
    }

    if trimmed.starts_with('#') {
        let text = trimmed.trim_start_matches('#').trim();
        return ContentBlock::Heading(strip_emphasis(text));
    }

    if let Some(rest) = BULLET_MARKERS.iter().find_map(|m| trimmed.strip_prefix(m)) {
        return ContentBlock::ListItem { runs: parse_inline(rest.trim()), ordinal: None };
    }

    if let Some(caps) = NUMBERED.captures(trimmed) {
        if let Ok(ordinal) = caps[1].parse::<u32>() {
            return ContentBlock::ListItem {
                runs: parse_inline(caps[2].trim()),
                ordinal: Some(ordinal),
            };
        }
    }

    if let Some(caps) = BOLD_LINE.captures(trimmed) {
        return ContentBlock::Paragraph(vec![Run::emphasized(caps[1].trim())]);
    }

    if let Some(caps) = LABEL_VALUE.captures(trimmed) {
        let mut runs = vec![Run::emphasized(&caps[1])];
        let value = strip_emphasis(caps[2].trim());
        if !value.is_empty() {
            runs.push(Run::plain(format!(" {}", value)));
        }
        return ContentBlock::Paragraph(runs);
    }

    ContentBlock::Paragraph(parse_inline(trimmed))
}

fn flush_table(table: &mut Vec<Vec<String>>, items: &mut Vec<Item>) {
    if !table.is_empty() {
        items.push(Item::Block(ContentBlock::Table(std::mem::take(table))));
    }
}

fn is_table_row(trimmed: &str) -> bool {
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// `|---|:---:|` style alignment rows carry no data.
fn is_separator_row(trimmed: &str) -> bool {
    trimmed.contains('-') && trimmed.chars().all(|c| matches!(c, '-' | ':' | ' ' | '|'))
}

fn split_cells(trimmed: &str) -> Vec<String> {
    let inner = &trimmed[1..trimmed.len() - 1];
    inner.split('|').map(|cell| strip_emphasis(cell.trim())).collect()
}

fn is_divider(trimmed: &str) -> bool {
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|marker| compact.chars().all(|c| c == *marker))
}
