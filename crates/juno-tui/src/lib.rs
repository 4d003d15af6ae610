//! Terminal front end for the Juno wallet home screen.
//!
//! Renders the wallet with ratatui and feeds keyboard, mouse, and focus
//! events into the interaction engine from `juno-core`. Two screens are
//! available: one refreshed from a header button and one refreshed by
//! pulling the content down.

pub mod app;
pub mod playback;
pub mod screens;
pub mod shared;
pub mod terminal;
