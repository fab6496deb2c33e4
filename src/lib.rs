pub mod alerts;
pub mod client;
pub mod config;
pub mod forms;
pub mod panel;
pub mod ui;
pub mod web;
