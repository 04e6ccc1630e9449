//! Command implementations for bamwindow.

pub mod count;

pub use count::{CountStats, WindowCountCommand};
