//! Backend test support utilities
//!
//! One logging setup shared by the backend's unit and integration test binaries.

pub mod logging;
