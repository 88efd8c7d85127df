//! Small self-contained helpers shared by services and bot handlers.

pub mod duration;
pub mod parse;
pub mod select;
