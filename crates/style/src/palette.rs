use folio_types::Color;
use serde::{Deserialize, Serialize};

/// Named colors used by report chrome, cards and tables.
///
/// Every field accepts a hex string (`"#D4B038"`, `"#FFFFFF26"`) or an `{r, g, b, a}` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub background: Color,
    pub accent: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub positive: Color,
    pub negative: Color,
    pub caution: Color,
    pub table_border: Color,
    pub table_header: Color,
    pub table_zebra: Color,
    pub card: Color,
    pub card_border: Color,
    pub decoration: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_unit(0.06, 0.07, 0.12),
            accent: Color::from_unit(0.83, 0.69, 0.22),
            text: Color::WHITE.with_alpha(0.9),
            text_secondary: Color::WHITE.with_alpha(0.5),
            positive: Color::from_unit(0.30, 0.80, 0.50),
            negative: Color::from_unit(0.95, 0.35, 0.35),
            caution: Color::from_unit(0.95, 0.65, 0.20),
            table_border: Color::WHITE.with_alpha(0.15),
            table_header: Color::from_unit(0.10, 0.12, 0.20),
            table_zebra: Color::WHITE.with_alpha(0.04),
            card: Color::WHITE.with_alpha(0.05),
            card_border: Color::from_unit(0.83, 0.69, 0.22).with_alpha(0.3),
            decoration: Color::WHITE.with_alpha(0.12),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_merge_with_defaults() {
        let palette: Palette = serde_json::from_str(r##"{"accent": "#ff0000"}"##).unwrap();
        assert_eq!(palette.accent, Color::rgb(255, 0, 0));
        assert_eq!(palette.background, Palette::default().background);
    }
}
