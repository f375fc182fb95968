pub mod channels;
pub mod clock;
pub mod log;
pub mod registry;
pub mod scheduler;
pub mod store;
