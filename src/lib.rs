pub mod config;
pub mod error;
pub mod games;
pub mod hub;
pub mod logging;
pub mod render;
pub mod router;
pub mod terminal;
pub mod theme;
