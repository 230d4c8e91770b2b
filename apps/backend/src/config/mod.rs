pub mod coordinator;
pub mod db;
