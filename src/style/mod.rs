//! Styling for prompt lines

mod color;
mod modifier;
mod style;
mod styled;
mod text_utils;

pub use color::Color;
pub use modifier::Modifier;
pub use style::Style;
pub use styled::{Line, Span};
pub use text_utils::{display_width, truncate_to_width};
