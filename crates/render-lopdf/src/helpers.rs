//! Conversions from surface primitives to PDF content-stream operations.

use folio_render_core::utils::{PathSegment, flip_y};
use folio_types::Color;
use lopdf::content::Operation;
use lopdf::Object;

/// Encodes text for the standard fonts' WinAnsi (cp1252) encoding. Characters the
/// encoding cannot represent become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            '‰' => 0x89,
            '‹' => 0x8B,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            '›' => 0x9B,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

pub fn fill_color(color: &Color) -> Operation {
    let (r, g, b) = color.unit_rgb();
    Operation::new("rg", vec![r.into(), g.into(), b.into()])
}

pub fn stroke_color(color: &Color) -> Operation {
    let (r, g, b) = color.unit_rgb();
    Operation::new("RG", vec![r.into(), g.into(), b.into()])
}

pub fn dash(pattern: Option<(f32, f32)>) -> Operation {
    let array = match pattern {
        Some((on, off)) => vec![Object::Real(on), Object::Real(off)],
        None => vec![],
    };
    Operation::new("d", vec![array.into(), 0.into()])
}

/// Path construction operators for segments in top-left coordinates.
pub fn path_operations(segments: &[PathSegment], page_height: f32) -> Vec<Operation> {
    let pt = |p: folio_types::Point| -> [Object; 2] {
        [p.x.into(), flip_y(p.y, page_height).into()]
    };
    segments
        .iter()
        .map(|segment| match *segment {
            PathSegment::MoveTo(p) => Operation::new("m", pt(p).to_vec()),
            PathSegment::LineTo(p) => Operation::new("l", pt(p).to_vec()),
            PathSegment::CurveTo(c1, c2, p) => {
                let mut operands = pt(c1).to_vec();
                operands.extend(pt(c2));
                operands.extend(pt(p));
                Operation::new("c", operands)
            }
            PathSegment::Close => Operation::new("h", vec![]),
        })
        .collect()
}
