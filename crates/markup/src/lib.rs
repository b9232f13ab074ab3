//! Parses the small markdown subset used by report narratives into typed content blocks.
//!
//! Supported: `#` headings, `**bold**` spans, `-`/`•`/`*` bullets, `1.` numbered items,
//! pipe tables and `---` dividers. Everything else is a paragraph.

mod block;
mod inline;
mod parser;

pub use block::{ContentBlock, Item, Run};
pub use inline::{parse_inline, strip_emphasis};
pub use parser::parse;
