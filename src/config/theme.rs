use colored::{ ColoredString, Colorize };
use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseThemeError {
    message: String,
}

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for ThemeName {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            _ =>
                Err(ParseThemeError {
                    message: format!("Invalid theme: '{}' (expected light or dark)", s),
                }),
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeName::Light => write!(f, "light"),
            ThemeName::Dark => write!(f, "dark"),
        }
    }
}

impl ThemeName {
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeName::Light => LIGHT,
            ThemeName::Dark => DARK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub info: Rgb,
    pub error: Rgb,
    pub text_primary: Rgb,
    pub text_secondary: Rgb,
}

const LIGHT: Palette = Palette {
    primary: Rgb(0x1a, 0x23, 0x7e),
    secondary: Rgb(0x00, 0x96, 0x88),
    info: Rgb(0x02, 0x88, 0xd1),
    error: Rgb(0xff, 0x70, 0x43),
    text_primary: Rgb(0x21, 0x21, 0x21),
    text_secondary: Rgb(0x61, 0x61, 0x61),
};

const DARK: Palette = Palette {
    primary: Rgb(0x0a, 0x7b, 0xff),
    secondary: Rgb(0x75, 0x75, 0x75),
    info: Rgb(0x29, 0xb6, 0xf6),
    error: Rgb(0xff, 0x70, 0x43),
    text_primary: Rgb(0xe0, 0xe0, 0xe0),
    text_secondary: Rgb(0xb0, 0xb0, 0xb0),
};

impl Palette {
    pub fn paint(&self, text: &str, color: Rgb) -> ColoredString {
        text.truecolor(color.0, color.1, color.2)
    }
}

/// The one theme the whole application renders with.
///
/// Created at start-up from configuration and handed to the views
/// explicitly; the only way to change it is [`ThemeState::toggle`].
#[derive(Debug)]
pub struct ThemeState {
    name: ThemeName,
}

impl ThemeState {
    pub fn new(name: ThemeName) -> Self {
        Self { name }
    }

    pub fn name(&self) -> ThemeName {
        self.name
    }

    pub fn palette(&self) -> Palette {
        self.name.palette()
    }

    pub fn toggle(&mut self) -> ThemeName {
        self.name = self.name.toggled();
        self.name
    }
}
