//! Ratatui front-end: raw-mode key input and screen drawing.

mod draw;
mod helpers;
mod terminal;

pub use terminal::TerminalFrontend;
