//! Shared test helpers.

// Each test binary compiles this module separately and uses a different
// subset of the mocks.
#![allow(dead_code)]

pub mod mocks;
