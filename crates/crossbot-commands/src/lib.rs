//! Command descriptors, the text tokenizer and the dispatcher.
//!
//! Everything here is stateless: descriptors are immutable after
//! construction and dispatch is a synchronous text-to-[`Message`] transform,
//! safe to call from any number of platform loops at once.
//!
//! [`Message`]: crossbot_core::Message

pub mod descriptor;
pub mod dispatch;
pub mod prefill;
pub mod tokenizer;

pub use descriptor::{Command, CommandSet, TextCommand};
pub use dispatch::{run, run_fields, usage, Dispatch, Dispatcher};
pub use prefill::encode_prompt;
pub use tokenizer::{parse_arguments, parse_fields, strip_invocation};
