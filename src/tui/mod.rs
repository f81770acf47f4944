//! Terminal front end: a local hot-seat table driven from the keyboard.

pub mod app;
pub mod controller;
mod ui;
