//! External tool invocation and platform detection.

pub mod command;
pub mod platform;
pub mod recording;

pub use command::{Invocation, RunOptions, SystemRunner, ToolOutput, ToolRunner};
pub use platform::{is_ci, is_elevated};
pub use recording::RecordingRunner;
