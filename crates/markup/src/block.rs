use serde::Serialize;

/// A span of text that is either emphasized (bold) or plain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub text: String,
    pub emphasized: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), emphasized: false }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self { text: text.into(), emphasized: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContentBlock {
    Heading(String),
    Paragraph(Vec<Run>),
    /// A bullet when `ordinal` is `None`, a numbered item otherwise.
    ListItem { runs: Vec<Run>, ordinal: Option<u32> },
    /// Row 0 is the header row. Rows may have differing lengths.
    Table(Vec<Vec<String>>),
    Divider,
}

impl ContentBlock {
    /// Concatenated text of the block without emphasis markers.
    pub fn plain_text(&self) -> String {
        match self {
            ContentBlock::Heading(text) => text.clone(),
            ContentBlock::Paragraph(runs) | ContentBlock::ListItem { runs, .. } => {
                runs.iter().map(|r| r.text.as_str()).collect()
            }
            ContentBlock::Table(rows) => rows
                .iter()
                .map(|row| row.join(" | "))
                .collect::<Vec<_>>()
                .join("\n"),
            ContentBlock::Divider => String::new(),
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, ContentBlock::Heading(_))
    }
}

/// One parsed unit of a narrative: either a block or a blank-line spacing directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Item {
    Block(ContentBlock),
    Spacing,
}

impl Item {
    pub fn block(&self) -> Option<&ContentBlock> {
        match self {
            Item::Block(block) => Some(block),
            Item::Spacing => None,
        }
    }
}
