//! Agent Portal - a terminal portal for hands-on lessons on building AI agents
//!
//! Modules cover agents in LangGraph, secure tool calling, and memory. Each
//! lesson can be marked complete, and every code sample can be copied to the
//! system clipboard.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod curriculum;
pub mod page;
pub mod progress;
pub mod syntax;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
