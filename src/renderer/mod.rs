//! Rendering infrastructure.
//!
//! This module contains the wgpu surface/device management, the batched 2D
//! shape pipeline the board is drawn with, and the glyphon text layer.

/// Batched 2D shape rendering (grid lines, stones, highlights).
pub mod shapes;
/// Text rendering system.
pub mod text;
/// Core WGPU surface and device management.
pub mod wgpu_lib;
