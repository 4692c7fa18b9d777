//! Control panel entry point.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ControlPanel`] | Transport and synchronizer wired together |
//! | [`ControlPanelBuilder`] | Fluent configuration builder |
//! | [`PanelOptions`] | Path, reconnect delay and texts |
//!
//! # Example
//!
//! ```no_run
//! use ledbar_panel::{ControlPanel, Result, UiEvent};
//!
//! # async fn example() -> Result<()> {
//! let panel = ControlPanel::builder().host("192.168.1.40").build()?;
//! panel.start()?;
//!
//! panel.dispatch(UiEvent::BrightnessChanged { value: 80 })?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for panel configuration.
pub mod builder;

/// Core panel implementation.
pub mod core;

/// Panel options.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ControlPanelBuilder;
pub use self::core::ControlPanel;
pub use options::PanelOptions;
