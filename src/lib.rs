#![warn(clippy::pedantic)]
pub mod address;
pub mod buffer;
pub mod command;
pub mod editor;
pub mod error;
pub mod line;
pub mod terminal;

pub use buffer::{Buffer, LINE_MAX_LEN};
pub use command::{Command, Letter};
pub use editor::{Editor, ErrorState, State};
pub use error::{ErrorKind, LoadError};
pub use line::Line;
pub use terminal::Terminal;
