//! Shared plumbing types: tokens, source locations, errors and settings.

mod parse_error;
mod settings;
mod source_location;
mod tokens;

pub use parse_error::{ErrorLocationProvider, ParseError, ParseErrorKind};
pub use settings::Settings;
pub use source_location::SourceLocation;
pub use tokens::Token;

/// Parsing mode: math typesetting rules or plain text rules.
///
/// Math mode ignores spaces, applies inter-atom glue and italic math fonts;
/// text mode preserves spaces and is entered by `\text{...}` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Mathematical typesetting rules.
    Math,
    /// Plain-text rules inside `\text{...}`.
    Text,
}

/// An RGBA color, stored as 0xAARRGGBB like the original engine's `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Opaque black, the default foreground.
    pub const BLACK: Self = Self(0xff00_0000);
    /// Fully transparent; used for phantom content.
    pub const TRANSPARENT: Self = Self(0);

    /// Build an opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xff00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Alpha channel, 0-255.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Named colors understood by `\color` and `\textcolor`, plus `#RGB` and
/// `#RRGGBB` hex forms.
pub fn parse_color(name: &str) -> Option<Color> {
    const NAMED: phf::Map<&'static str, u32> = phf::phf_map! {
        "black" => 0xff000000u32,
        "white" => 0xffffffffu32,
        "red" => 0xffff0000u32,
        "green" => 0xff00ff00u32,
        "blue" => 0xff0000ffu32,
        "cyan" => 0xff00ffffu32,
        "magenta" => 0xffff00ffu32,
        "yellow" => 0xffffff00u32,
        "gray" => 0xff808080u32,
        "grey" => 0xff808080u32,
        "darkgray" => 0xff404040u32,
        "lightgray" => 0xffbfbfbf_u32,
        "orange" => 0xffff7f00u32,
        "pink" => 0xffffc0cb_u32,
        "purple" => 0xff800080u32,
        "brown" => 0xffa52a2a_u32,
        "olive" => 0xff808000u32,
        "teal" => 0xff008080u32,
        "violet" => 0xffee82ee_u32,
        "lime" => 0xffbfff00u32,
    };

    if let Some(hex) = name.strip_prefix('#') {
        let value = u32::from_str_radix(hex, 16).ok()?;
        return match hex.len() {
            3 => {
                let r = (value >> 8 & 0xf) * 17;
                let g = (value >> 4 & 0xf) * 17;
                let b = (value & 0xf) * 17;
                Some(Color(0xff00_0000 | r << 16 | g << 8 | b))
            }
            6 => Some(Color(0xff00_0000 | value)),
            8 => Some(Color(value)),
            _ => None,
        };
    }
    NAMED.get(&name.to_ascii_lowercase()).map(|&c| Color(c))
}
