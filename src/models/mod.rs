pub mod profile;
pub mod target;
