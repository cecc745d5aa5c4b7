//! Test modules for the field-value schema.
//!
//! Unit tests cover the edge cases kind by kind; proptest properties
//! cover scalar identity, rating bounds, and the content round-trip law.

#[cfg(test)]
pub mod config_tests;


#[cfg(test)]
pub mod registry_tests;
