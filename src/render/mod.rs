//! Renderable output built from a layout pass

mod decoration;

pub use decoration::{build_decorations, continued_label, BreakDecoration, BreakLabel, MORE_MARKER};
