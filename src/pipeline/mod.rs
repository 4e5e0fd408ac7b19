//! Page Pipeline
//!
//! Connects host events to the page's behavior.
//!
//! # Pipeline Architecture
//!
//! ```text
//! host event → Page → ChromeEvent → reduce → ChromeEffect → document / presenter
//!                  └→ IntersectionWatcher::poll → Dispatcher::deliver → one-shot actions
//! ```
//!
//! ## Key Design Principles
//!
//! - **Host-driven**: frames and the clock only move when the host says so
//! - **Pure reducer**: chrome transitions return effects; only the pipeline
//!   mutates the document
//! - **Published state**: the chrome state lives in a signal so host effects
//!   can track it

mod effects;
mod host;
mod mount;

pub use host::HostServices;
pub use mount::Page;
