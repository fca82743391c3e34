//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock devices and scripted transports.  All tests run on the
//! host with no real hardware required.

mod core_tests;
mod mock_dev;
