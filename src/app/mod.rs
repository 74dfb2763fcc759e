//! Application Layer
//!
//! Host lifecycle contract, the controller registry, and the headless host
//! used by the binary and the tests.

pub mod headless;
pub mod host;
