pub mod credentials;
pub mod models;
pub mod ports;
pub mod service;
