pub mod command;
pub mod render;
pub mod session;

pub use command::{Command, CommandError};
pub use session::{ConsoleSession, Outcome};
