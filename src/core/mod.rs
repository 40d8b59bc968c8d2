pub mod locations;
pub mod logging;

// Durable key/value backends for the filter state
pub mod storage;
