//! File output for generated collections, used by the demo binary.
//!
//! The engine itself defines no file format; these writers are a convenience
//! for inspecting a dataset outside the presentation layer.

pub mod export;
