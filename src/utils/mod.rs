pub mod colors;

pub use colors::{Painter, strip_ansi};
