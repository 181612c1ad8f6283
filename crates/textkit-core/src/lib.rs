pub mod config;
pub mod logging;

pub mod cipher;
pub mod demo;
pub mod fetch;
pub mod line_scan;
pub mod tags;
