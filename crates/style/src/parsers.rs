//! nom parsers for configuration values such as lengths and page sizes.

use crate::dimension::{Dimension, PageSize};
use nom::IResult;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while_m_n};
use nom::character::complete::{char, space0};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::sequence::{delimited, pair, separated_pair};
use thiserror::Error;

/// Errors that can occur while parsing style and page configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(space0, inner, space0)
}

fn digits(input: &str) -> IResult<&str, &str> {
    take_while_m_n(1, 10, |c: char| c.is_ascii_digit()).parse(input)
}

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize(pair(
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(pair(digits, opt(pair(char('.'), digits)))),
                recognize(pair(char('.'), digits)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        map(tag_no_case("pt"), |_| 1.0),
        map(tag_no_case("px"), |_| 1.0), // Treat px as pt
        map(tag_no_case("in"), |_| 72.0),
        map(tag_no_case("cm"), |_| 28.35),
        map(tag_no_case("mm"), |_| 2.835),
    ))
    .parse(input)
}

/// Parses a length value with optional unit (e.g., "54pt", "0.75in", "19mm").
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    let (input, value) = parse_f32(input)?;
    let (input, unit_multiplier) = opt(parse_unit).parse(input)?;
    Ok((input, value * unit_multiplier.unwrap_or(1.0)))
}

/// Parses a dimension value (length, percentage, or "auto").
pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    alt((
        map(tag_no_case("auto"), |_| Dimension::Auto),
        map(pair(parse_f32, char('%')), |(val, _)| Dimension::Percent(val)),
        map(parse_length, Dimension::Pt),
    ))
    .parse(input)
}

/// Parses a named page size or an explicit `WIDTH x HEIGHT` pair of lengths.
pub fn parse_page_size(input: &str) -> IResult<&str, PageSize> {
    alt((
        map(tag_no_case("letter"), |_| PageSize::Letter),
        map(tag_no_case("legal"), |_| PageSize::Legal),
        map(tag_no_case("a4"), |_| PageSize::A4),
        map(
            separated_pair(ws(parse_length), alt((char('x'), char('X'))), ws(parse_length)),
            |(width, height)| PageSize::Custom { width, height },
        ),
    ))
    .parse(input)
}

/// Helper to run a nom parser over the whole input and convert its result to a `StyleError`.
pub fn run_parser<'a, T, F>(parser: F, input: &'a str) -> Result<T, StyleError>
where
    F: Fn(&'a str) -> IResult<&'a str, T>,
{
    match all_consuming(ws(parser)).parse(input) {
        Ok((_, value)) => Ok(value),
        Err(e) => Err(StyleError::Parse(format!("could not parse '{}': {}", input, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_convert_units_to_points() {
        assert_eq!(run_parser(parse_length, "54").unwrap(), 54.0);
        assert_eq!(run_parser(parse_length, "54pt").unwrap(), 54.0);
        assert_eq!(run_parser(parse_length, "0.75in").unwrap(), 54.0);
        assert!((run_parser(parse_length, "10mm").unwrap() - 28.35).abs() < 0.001);
        assert_eq!(run_parser(parse_length, " 12px ").unwrap(), 12.0);
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        assert!(run_parser(parse_length, "12ptx").is_err());
        assert!(run_parser(parse_length, "wide").is_err());
    }

    #[test]
    fn page_sizes_accept_names_and_pairs() {
        assert_eq!(run_parser(parse_page_size, "Letter").unwrap(), PageSize::Letter);
        assert_eq!(run_parser(parse_page_size, "a4").unwrap(), PageSize::A4);
        assert_eq!(
            run_parser(parse_page_size, "5in x 8in").unwrap(),
            PageSize::Custom { width: 360.0, height: 576.0 }
        );
    }
}
