//! gptchat 固有のドメイン型（型と不変条件）

pub mod command;
pub mod input_buffer;
pub mod key;

pub use command::{ChatCommand, SessionOptions};
pub use input_buffer::InputBuffer;
pub use key::Key;
