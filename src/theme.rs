use crate::render::Rgb;
use serde::{Deserialize, Deserializer};

/// Presentation tag carried by every game. Has no meaning beyond picking a theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccentTag
{
    #[default]
    Primary,
    Secondary,
    Accent,
}

impl AccentTag
{
    pub const ALL: [AccentTag; 3] = [AccentTag::Primary, AccentTag::Secondary, AccentTag::Accent];

    /// Unrecognised tags fall back to `Primary`.
    pub fn parse(value: &str) -> Self
    {
        match value.trim().to_ascii_lowercase().as_str() {
            "secondary" => AccentTag::Secondary,
            "accent" => AccentTag::Accent,
            _ => AccentTag::Primary,
        }
    }

    pub fn as_str(self) -> &'static str
    {
        match self {
            AccentTag::Primary => "primary",
            AccentTag::Secondary => "secondary",
            AccentTag::Accent => "accent",
        }
    }

    fn index(self) -> usize
    {
        match self {
            AccentTag::Primary => 0,
            AccentTag::Secondary => 1,
            AccentTag::Accent => 2,
        }
    }

    pub fn theme(self) -> &'static Theme
    {
        &THEMES[self.index()]
    }
}

impl<'de> Deserialize<'de> for AccentTag
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(AccentTag::parse(&raw))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Theme
{
    pub label: &'static str,
    /// Title and selected-card text.
    pub accent: Rgb,
    /// Card border while not selected.
    pub border: Rgb,
    /// Fill used for the selected badge and start button.
    pub highlight: Rgb,
}

const THEMES: [Theme; 3] = [
    Theme {
        label: "primary",
        accent: Rgb { r: 0, g: 229, b: 255 },
        border: Rgb { r: 0, g: 96, b: 112 },
        highlight: Rgb { r: 128, g: 242, b: 255 },
    },
    Theme {
        label: "secondary",
        accent: Rgb { r: 255, g: 64, b: 200 },
        border: Rgb { r: 112, g: 28, b: 88 },
        highlight: Rgb { r: 255, g: 150, b: 225 },
    },
    Theme {
        label: "accent",
        accent: Rgb { r: 170, g: 255, b: 0 },
        border: Rgb { r: 72, g: 110, b: 0 },
        highlight: Rgb { r: 215, g: 255, b: 128 },
    },
];
