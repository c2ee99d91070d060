pub mod assignment;
pub mod dock;
pub mod location;
pub mod schedule;
