//! Server assembly helpers shared between the binary and its tests

pub mod initialization;
