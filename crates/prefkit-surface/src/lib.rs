//! # PrefKit Surface
//!
//! A headless reference backend for the PrefKit widget contract: controls
//! that implement the full contract with no rendering behind them, plus a
//! panel host driving the registry lifecycle. Used by the workspace's tests
//! and as the template for real toolkit backends.

pub mod control;
pub mod panel;

pub use control::{ControlProbe, HeadlessControl, HeadlessFactory};
pub use panel::SettingsPanel;
