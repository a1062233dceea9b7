//! Core primitives for the ethscope project.
/// Gas price display conversion
pub mod gwei;
/// Transaction list preview helpers
pub mod preview;
