//! Hexagonal Game of Life engine crate.
//!
//! This crate contains the simulation core used by the hexweb server: cube
//! coordinate hexagons (`hex`), the rectangular board with its life rules
//! (`grid`), and hex-to-pixel geometry for rendering and painting
//! (`layout`). It performs no I/O; the server owns the clock and the wire.
//!
/// Cube-coordinate hexagons and direction vectors
pub mod hex;
/// Rectangular board, life rules and generation stepping
pub mod grid;
/// Hex-to-pixel and pixel-to-hex conversion
pub mod layout;
