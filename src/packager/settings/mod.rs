//! Configuration structures for publish runs.
//!
//! This module provides the configuration types for multi-target
//! packaging: product identity, build tool invocation, target lists,
//! and a builder pattern for constructing validated settings.

mod build_tool;
mod builder;
mod core;
mod docker;
mod macos;
mod product;
mod target;

// Re-export all public types
pub use build_tool::{
    BuildToolSettings, CONFIGURATION_PLACEHOLDER, PROJECT_PLACEHOLDER, RUNTIME_PLACEHOLDER,
};
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use docker::DockerSettings;
pub use macos::MacOsSettings;
pub use product::ProductSettings;
pub use target::{PlatformTarget, TargetOs};
