mod color;
mod edges;
mod enums;
mod style;

pub use color::{Color, ColorOp, Rgb};
pub use edges::Edges;
pub use enums::{Direction, Position, Size, TextStyle};
pub use style::Style;
