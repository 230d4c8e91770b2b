//! Infrastructure layer - database connection and schema setup.

pub mod db;
