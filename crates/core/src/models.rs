pub mod cell;
pub mod entry;
pub mod location;
