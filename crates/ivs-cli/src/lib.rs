//! Library components for the IVS builder CLI.

pub mod logging;
pub mod pipeline;
