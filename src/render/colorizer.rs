use crossterm::style::{Attribute, Color as CrosstermColor, ContentStyle};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Terminal palette color usable as foreground or background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// Index into the 256-color palette.
    Ansi(u8),
    Rgb(u8, u8, u8),
}

impl TermColor {
    /// Resolves the color to 24-bit RGB using the xterm default palette.
    #[must_use]
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Black => (0, 0, 0),
            Self::Red => (205, 0, 0),
            Self::Green => (0, 205, 0),
            Self::Yellow => (205, 205, 0),
            Self::Blue => (0, 0, 238),
            Self::Magenta => (205, 0, 205),
            Self::Cyan => (0, 205, 205),
            Self::White => (229, 229, 229),
            Self::BrightBlack => (127, 127, 127),
            Self::BrightRed => (255, 0, 0),
            Self::BrightGreen => (0, 255, 0),
            Self::BrightYellow => (255, 255, 0),
            Self::BrightBlue => (92, 92, 255),
            Self::BrightMagenta => (255, 0, 255),
            Self::BrightCyan => (0, 255, 255),
            Self::BrightWhite => (255, 255, 255),
            Self::Ansi(index) => ansi_index_to_rgb(index),
            Self::Rgb(red, green, blue) => (red, green, blue),
        }
    }
}

const BASE_PALETTE: [TermColor; 16] = [
    TermColor::Black,
    TermColor::Red,
    TermColor::Green,
    TermColor::Yellow,
    TermColor::Blue,
    TermColor::Magenta,
    TermColor::Cyan,
    TermColor::White,
    TermColor::BrightBlack,
    TermColor::BrightRed,
    TermColor::BrightGreen,
    TermColor::BrightYellow,
    TermColor::BrightBlue,
    TermColor::BrightMagenta,
    TermColor::BrightCyan,
    TermColor::BrightWhite,
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn ansi_index_to_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => BASE_PALETTE[usize::from(index)].to_rgb(),
        16..=231 => {
            let cube = index - 16;
            (
                CUBE_LEVELS[usize::from(cube / 36)],
                CUBE_LEVELS[usize::from((cube % 36) / 6)],
                CUBE_LEVELS[usize::from(cube % 6)],
            )
        }
        _ => {
            let level = 8 + (index - 232) * 10;
            (level, level, level)
        }
    }
}

impl From<TermColor> for CrosstermColor {
    fn from(color: TermColor) -> Self {
        match color {
            TermColor::Black => Self::Black,
            TermColor::Red => Self::DarkRed,
            TermColor::Green => Self::DarkGreen,
            TermColor::Yellow => Self::DarkYellow,
            TermColor::Blue => Self::DarkBlue,
            TermColor::Magenta => Self::DarkMagenta,
            TermColor::Cyan => Self::DarkCyan,
            TermColor::White => Self::Grey,
            TermColor::BrightBlack => Self::DarkGrey,
            TermColor::BrightRed => Self::Red,
            TermColor::BrightGreen => Self::Green,
            TermColor::BrightYellow => Self::Yellow,
            TermColor::BrightBlue => Self::Blue,
            TermColor::BrightMagenta => Self::Magenta,
            TermColor::BrightCyan => Self::Cyan,
            TermColor::BrightWhite => Self::White,
            TermColor::Ansi(index) => Self::AnsiValue(index),
            TermColor::Rgb(r, g, b) => Self::Rgb { r, g, b },
        }
    }
}

/// One styling instruction applied by a [`Colorizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorToken {
    Foreground(TermColor),
    Background(TermColor),
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Reverse,
}

impl From<TermColor> for ColorToken {
    fn from(color: TermColor) -> Self {
        Self::Foreground(color)
    }
}

/// Ordered styling instructions; later tokens win over earlier ones of the same kind.
pub type ColorList = SmallVec<[ColorToken; 4]>;

/// Capability that wraps text with color styling.
///
/// Implementations must return the input unchanged when `colors` is empty.
pub trait Colorizer: Send + Sync + std::fmt::Debug {
    fn colorize(&self, text: &str, colors: &[ColorToken]) -> String;
}

/// Emits ANSI escape sequences through `crossterm` styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnsiColorizer;

impl Colorizer for AnsiColorizer {
    fn colorize(&self, text: &str, colors: &[ColorToken]) -> String {
        if colors.is_empty() {
            return text.to_owned();
        }

        let mut style = ContentStyle::new();
        for token in colors {
            match *token {
                ColorToken::Foreground(color) => style.foreground_color = Some(color.into()),
                ColorToken::Background(color) => style.background_color = Some(color.into()),
                ColorToken::Bold => style.attributes.set(Attribute::Bold),
                ColorToken::Dim => style.attributes.set(Attribute::Dim),
                ColorToken::Italic => style.attributes.set(Attribute::Italic),
                ColorToken::Underline => style.attributes.set(Attribute::Underlined),
                ColorToken::Blink => style.attributes.set(Attribute::SlowBlink),
                ColorToken::Reverse => style.attributes.set(Attribute::Reverse),
            }
        }
        style.apply(text).to_string()
    }
}

/// Wraps text in an inline-styled `<span>` for HTML output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlColorizer;

impl Colorizer for HtmlColorizer {
    fn colorize(&self, text: &str, colors: &[ColorToken]) -> String {
        if colors.is_empty() {
            return text.to_owned();
        }

        let mut declarations = Vec::with_capacity(colors.len());
        for token in colors {
            let declaration = match *token {
                ColorToken::Foreground(color) => format!("color:{}", css_hex(color)),
                ColorToken::Background(color) => format!("background-color:{}", css_hex(color)),
                ColorToken::Bold => "font-weight:bold".to_owned(),
                ColorToken::Dim => "opacity:0.6".to_owned(),
                ColorToken::Italic => "font-style:italic".to_owned(),
                ColorToken::Underline => "text-decoration:underline".to_owned(),
                ColorToken::Blink => "text-decoration:blink".to_owned(),
                ColorToken::Reverse => "filter:invert(100%)".to_owned(),
            };
            declarations.push(declaration);
        }

        format!(
            "<span style=\"{}\">{}</span>",
            declarations.join(";"),
            escape_html(text)
        )
    }
}

fn css_hex(color: TermColor) -> String {
    let (red, green, blue) = color.to_rgb();
    format!("#{red:02x}{green:02x}{blue:02x}")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Ignores every color token. Useful for logs and snapshot tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainColorizer;

impl Colorizer for PlainColorizer {
    fn colorize(&self, text: &str, _colors: &[ColorToken]) -> String {
        text.to_owned()
    }
}
