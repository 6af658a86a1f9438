//! Shared helpers: field grammars and record validators.

pub mod validation;
