pub mod app;
pub mod board;
pub mod canvas;
pub mod components;
pub mod data;
pub mod history;
pub mod navigation;
pub mod persistence;
pub mod search;
pub mod state;
