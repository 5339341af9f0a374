// Library for tests to access modules

pub mod api_client;
pub mod config;
pub mod error;
pub mod models;
pub mod readiness;
pub mod resource_monitor;
pub mod runner;
pub mod scenarios;
pub mod stats;
