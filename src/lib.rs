pub mod api;
pub mod auth;
pub mod client;
pub mod db;
pub mod model;
pub mod view;
