//! Per-OS packaging behavior.
//!
//! Linux and Windows targets archive their publish directory as-is;
//! only macOS needs extra structure before archiving.

pub mod macos;
