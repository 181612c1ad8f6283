//! CLI command handlers, one file per command.

mod cipher;
mod demo;
mod max_line;
mod tags;

pub use cipher::{run_decrypt, run_encrypt};
pub use demo::{run_demo, DemoArgs};
pub use max_line::run_max_line;
pub use tags::{run_tags, TagSource};
