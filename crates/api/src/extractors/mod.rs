//! Custom request extractors.

pub mod json;
