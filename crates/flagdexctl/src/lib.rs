//! flagdexctl library - command implementations and terminal output
//!
//! Split from the binary so integration tests can drive the same code.

pub mod commands;
pub mod display;
pub mod errors;
pub mod logging;
