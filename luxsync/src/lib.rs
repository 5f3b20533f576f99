pub mod engine;
pub mod logging;
pub mod mapper;
pub mod settings;
