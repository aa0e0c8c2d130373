//! Tests for the app module.
//!
//! This module is organized into submodules by functionality:
//! - `commands` - The task commands and their selection rules
//! - `helpers` - Shared test utilities
//! - `input` - Key bindings, focus and paste handling
//! - `integration` - Multi-step workflows driven by key presses
//! - `persistence` - Load and save through the app
//! - `ui` - Rendering against `TestBackend`

#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
