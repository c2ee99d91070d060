pub mod dock;
pub mod health;
pub mod location;
pub mod schedule;
