//! Geometry and colour.
//!
//! Coordinates are logical pixels relative to the host container, y down.

use std::fmt;

use cssparser::{ParseError, Parser, ParserInput, Token};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle: top-left origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }
}

/// An RGBA colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// CSS `green` (#008000).
    pub const GREEN: Self = Self::new(0.0, 128.0 / 255.0, 0.0, 1.0);
    /// CSS `orange` (#ffa500).
    pub const ORANGE: Self = Self::new(1.0, 165.0 / 255.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_rgb8_alpha(r, g, b, f32::from(a) / 255.0)
    }

    fn from_rgb8_alpha(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        let unit = |c: u8| f32::from(c) / 255.0;
        Self::new(unit(r), unit(g), unit(b), alpha)
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`; the `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let (r, g, b, alpha) = cssparser::color::parse_hash_color(digits.as_bytes()).ok()?;
        Some(Self::from_rgb8_alpha(r, g, b, alpha))
    }

    /// Parse a CSS colour value: hex, `rgb()`/`rgba()`, a named colour or
    /// `transparent`.
    pub fn from_css(value: &str) -> Option<Self> {
        let mut input = ParserInput::new(value.trim());
        let mut parser = Parser::new(&mut input);
        parser
            .parse_entirely(parse_css_color)
            .ok()
            .or_else(|| Self::from_hex(value))
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (byte(self.r), byte(self.g), byte(self.b), byte(self.a));
        if a == u8::MAX {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn parse_css_color<'i>(parser: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i, ()>> {
    let token = parser.next()?.clone();
    match token {
        Token::Hash(hash) | Token::IDHash(hash) => {
            Color::from_hex(&hash).ok_or_else(|| parser.new_custom_error(()))
        }
        Token::Ident(name) if name.eq_ignore_ascii_case("transparent") => Ok(Color::TRANSPARENT),
        Token::Ident(name) => cssparser::color::parse_named_color(&name.to_ascii_lowercase())
            .map(|(r, g, b)| Color::from_rgba8(r, g, b, u8::MAX))
            .map_err(|()| parser.new_custom_error(())),
        Token::Function(name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            parser.parse_nested_block(|p| {
                let r = rgb_component(p)?;
                separator(p);
                let g = rgb_component(p)?;
                separator(p);
                let b = rgb_component(p)?;
                let has_alpha = p.try_parse(|p| p.expect_comma()).is_ok()
                    || p.try_parse(|p| p.expect_delim('/')).is_ok();
                let a = if has_alpha { alpha_component(p)? } else { 1.0 };
                Ok(Color::new(r, g, b, a))
            })
        }
        _ => Err(parser.new_custom_error(())),
    }
}

/// Commas are optional so both `rgb(0, 0, 255)` and `rgb(0 0 255)` parse.
fn separator(parser: &mut Parser<'_, '_>) {
    let _ = parser.try_parse(|p| p.expect_comma());
}

fn rgb_component<'i>(parser: &mut Parser<'i, '_>) -> Result<f32, ParseError<'i, ()>> {
    let token = parser.next()?.clone();
    match token {
        Token::Number { value, .. } => Ok((value / 255.0).clamp(0.0, 1.0)),
        Token::Percentage { unit_value, .. } => Ok(unit_value.clamp(0.0, 1.0)),
        _ => Err(parser.new_custom_error(())),
    }
}

fn alpha_component<'i>(parser: &mut Parser<'i, '_>) -> Result<f32, ParseError<'i, ()>> {
    let token = parser.next()?.clone();
    match token {
        Token::Number { value, .. } | Token::Percentage { unit_value: value, .. } => {
            Ok(value.clamp(0.0, 1.0))
        }
        _ => Err(parser.new_custom_error(())),
    }
}
