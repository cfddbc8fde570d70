pub mod entry;
pub mod scheduler;
pub mod types;
