#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Size {
    Fixed(u16),
    #[default]
    Auto,
    Fill,
    Percent(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Row,
    #[default]
    Column,
}

/// Absolute elements are placed at `left`/`top` relative to the viewport
/// and are taken out of their parent's flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self { bold: false }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}
