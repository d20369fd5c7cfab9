pub mod actuator;
pub mod config;
pub mod control;
pub mod mapper;
pub mod report;
pub mod sensor;
pub mod servo;
pub mod sim;
