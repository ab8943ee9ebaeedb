//! Binary-only front ends: the interactive menu and the JSON-lines server.

mod print;

pub mod menu;
pub mod serve;
