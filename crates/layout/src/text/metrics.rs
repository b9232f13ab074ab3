//! Advance widths for the standard PDF Base-14 text faces, in 1/1000 em.

use folio_style::StyleToken;

/// Width used for characters outside the tables.
const DEFAULT_ADVANCE: u16 = 500;

/// Printable ASCII 0x20..=0x7E.
const ASCII_START: u32 = 0x20;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

/// One of the built-in metric sets a style token resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricSet {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
    Courier,
}

impl MetricSet {
    /// Picks the metric set for a token. Serif families ("Georgia", "Times", ...) map to
    /// Times, monospace families to Courier and everything else to Helvetica.
    pub fn for_style(style: &StyleToken) -> Self {
        let family = style.family.to_ascii_lowercase();
        let bold = style.weight.is_bold();
        if family.contains("courier") || family.contains("mono") {
            MetricSet::Courier
        } else if family.contains("times")
            || family.contains("georgia")
            || (family.contains("serif") && !family.contains("sans"))
        {
            if bold { MetricSet::TimesBold } else { MetricSet::TimesRoman }
        } else if bold {
            MetricSet::HelveticaBold
        } else {
            MetricSet::Helvetica
        }
    }

    /// PostScript name of the matching standard face.
    pub fn base_font(&self) -> &'static str {
        match self {
            MetricSet::Helvetica => "Helvetica",
            MetricSet::HelveticaBold => "Helvetica-Bold",
            MetricSet::TimesRoman => "Times-Roman",
            MetricSet::TimesBold => "Times-Bold",
            MetricSet::Courier => "Courier",
        }
    }

    pub fn advance(&self, ch: char) -> u16 {
        let table = match self {
            MetricSet::Courier => return 600,
            MetricSet::Helvetica => &HELVETICA,
            MetricSet::HelveticaBold => &HELVETICA_BOLD,
            MetricSet::TimesRoman => &TIMES_ROMAN,
            MetricSet::TimesBold => &TIMES_BOLD,
        };
        let code = ch as u32;
        if (ASCII_START..ASCII_START + 95).contains(&code) {
            return table[(code - ASCII_START) as usize];
        }
        self.extended_advance(ch)
    }

    fn extended_advance(&self, ch: char) -> u16 {
        let serif = matches!(self, MetricSet::TimesRoman | MetricSet::TimesBold);
        match ch {
            '\u{00A0}' => self.advance(' '),
            '•' => 350,
            '·' => if serif { 250 } else { 278 },
            '—' | '…' => 1000,
            '–' => if serif { 500 } else { 556 },
            '‘' | '’' => if serif { 333 } else { 222 },
            '“' | '”' => if serif { 444 } else { 333 },
            '×' | '±' => 584,
            _ => DEFAULT_ADVANCE,
        }
    }
}
