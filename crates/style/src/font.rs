use crate::token::StyleToken;
use serde::{Deserialize, Deserializer, Serialize, de};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    SemiBold,
    Bold,
    Black,
    Numeric(u16),
}

impl FontWeight {
    /// Returns the numeric weight value (100-900 scale).
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
            FontWeight::Black => 900,
            FontWeight::Numeric(n) => *n,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.numeric_value() >= 600
    }

    /// Parse a font weight from a string (e.g., "bold", "400")
    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "thin" => Ok(FontWeight::Thin),
            "light" => Ok(FontWeight::Light),
            "regular" | "normal" => Ok(FontWeight::Regular),
            "medium" => Ok(FontWeight::Medium),
            "semibold" | "semi-bold" => Ok(FontWeight::SemiBold),
            "bold" => Ok(FontWeight::Bold),
            "black" => Ok(FontWeight::Black),
            _ => s
                .parse::<u16>()
                .map(FontWeight::Numeric)
                .map_err(|_| format!("Invalid font weight: '{}'", s)),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontWeightDef {
            Str(String),
            Num(u16),
        }

        match FontWeightDef::deserialize(deserializer)? {
            FontWeightDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            FontWeightDef::Num(n) => Ok(FontWeight::Numeric(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// The typographic roles a report draws text in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    Brand,
    Title,
    Heading,
    SectionTitle,
    Subtitle,
    Body,
    Small,
    Tiny,
    TableHeader,
    TableCell,
    RunningHeader,
    Score,
}

/// Families and sizes for every [`TextRole`]. All fields are optional in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontSet {
    /// Family used for titles and headings.
    pub display_family: String,
    /// Family used for body copy and tables.
    pub body_family: String,
    pub brand_size: f32,
    pub title_size: f32,
    pub heading_size: f32,
    pub section_title_size: f32,
    pub subtitle_size: f32,
    pub body_size: f32,
    pub small_size: f32,
    pub tiny_size: f32,
    pub table_size: f32,
    pub running_header_size: f32,
    pub score_size: f32,
    pub brand_letter_spacing: f32,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            display_family: "Georgia".to_string(),
            body_family: "Helvetica".to_string(),
            brand_size: 12.0,
            title_size: 26.0,
            heading_size: 18.0,
            section_title_size: 14.0,
            subtitle_size: 12.0,
            body_size: 11.0,
            small_size: 9.0,
            tiny_size: 8.0,
            table_size: 10.0,
            running_header_size: 8.0,
            score_size: 42.0,
            brand_letter_spacing: 3.0,
        }
    }
}

impl FontSet {
    /// Builds the style token for a role. Colors are left at the token default and are
    /// applied by the caller from its palette.
    pub fn token(&self, role: TextRole) -> StyleToken {
        let display = |size: f32| StyleToken::new(&self.display_family, size).bold();
        let body = |size: f32| StyleToken::new(&self.body_family, size);
        match role {
            TextRole::Brand => {
                display(self.brand_size).with_letter_spacing(self.brand_letter_spacing)
            }
            TextRole::Title => display(self.title_size),
            TextRole::Heading => display(self.heading_size),
            TextRole::SectionTitle => display(self.section_title_size),
            TextRole::Subtitle => display(self.subtitle_size),
            TextRole::Body => body(self.body_size),
            TextRole::Small => body(self.small_size),
            TextRole::Tiny => body(self.tiny_size),
            TextRole::TableHeader => body(self.table_size).bold(),
            TextRole::TableCell => body(self.table_size),
            TextRole::RunningHeader => body(self.running_header_size).with_letter_spacing(1.0),
            TextRole::Score => display(self.score_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_parse_from_names_and_numbers() {
        let bold: FontWeight = serde_json::from_str("\"bold\"").unwrap();
        assert!(bold.is_bold());
        let numeric: FontWeight = serde_json::from_str("550").unwrap();
        assert!(!numeric.is_bold());
        assert!(serde_json::from_str::<FontWeight>("\"heavy-ish\"").is_err());
    }

    #[test]
    fn partial_font_set_keeps_defaults() {
        let fonts: FontSet = serde_json::from_str(r#"{"bodySize": 12}"#).unwrap();
        assert_eq!(fonts.body_size, 12.0);
        assert_eq!(fonts.display_family, "Georgia");
        assert!(fonts.token(TextRole::Heading).weight.is_bold());
        assert!(!fonts.token(TextRole::Body).weight.is_bold());
    }
}
