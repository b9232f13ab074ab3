pub mod dimension;
pub mod font;
pub mod palette;
pub mod parsers;
pub mod token;

pub use dimension::{Dimension, Length, PageSize};
pub use font::{FontSet, FontStyle, FontWeight, TextRole};
pub use palette::Palette;
pub use parsers::StyleError;
pub use token::StyleToken;
