//! Edit events, selection, and change detection

mod changes;
mod event;

pub use changes::touched_blocks;
pub use event::{EditEvent, Selection, StepRange};
