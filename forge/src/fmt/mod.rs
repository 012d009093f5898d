//! Text formatting helpers shared by the scene writers.

pub mod svg;
