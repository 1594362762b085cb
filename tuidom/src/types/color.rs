use std::str::FromStr;

use palette::{Hsl, IntoColor, Lighten, Srgb};

#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Rgb { r: u8, g: u8, b: u8 },
    Derived { base: Box<Color>, ops: Vec<ColorOp> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorOp {
    Lighten(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// Parse a CSS-style hex color (`#111`, `#1e1e2e`, with or without `#`).
    pub fn hex(code: &str) -> Option<Self> {
        let srgb = Srgb::<u8>::from_str(code).ok()?;
        let (r, g, b) = srgb.into_components();
        Some(Self::Rgb { r, g, b })
    }

    pub fn lighten(self, amount: f32) -> Self {
        self.with_op(ColorOp::Lighten(amount))
    }

    fn with_op(self, op: ColorOp) -> Self {
        match self {
            Self::Derived { base, mut ops } => {
                ops.push(op);
                Self::Derived { base, ops }
            }
            other => Self::Derived {
                base: Box::new(other),
                ops: vec![op],
            },
        }
    }

    pub fn to_rgb(&self) -> Rgb {
        match self {
            Self::Rgb { r, g, b } => Rgb::new(*r, *g, *b),
            Self::Derived { base, ops } => ops.iter().fold(base.to_rgb(), |rgb, op| op.apply(rgb)),
        }
    }
}

impl ColorOp {
    fn apply(&self, rgb: Rgb) -> Rgb {
        let hsl: Hsl = Srgb::new(rgb.r, rgb.g, rgb.b)
            .into_format::<f32>()
            .into_color();
        let shifted = match *self {
            Self::Lighten(amount) => hsl.lighten(amount),
        };
        let srgb: Srgb = shifted.into_color();
        let (r, g, b) = srgb.into_format::<u8>().into_components();
        Rgb::new(r, g, b)
    }
}
