pub mod auth;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod forecast;
pub mod pages;
pub mod req;
pub mod res;
pub mod server;
pub mod utils;
