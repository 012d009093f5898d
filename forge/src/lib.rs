//! Rendering core for generated digital-logic designs.
//!
//! A [`gateway::DesignGateway`] turns a natural-language prompt into a
//! [`design::GeneratedDesign`]. This crate projects that design into a
//! schematic scene and a waveform scene, writes both as SVG, and keeps the
//! interactive state (chat log, inspector tabs, pan viewport) in a [`session::Session`].

pub mod config;
pub mod design;
pub mod error;
pub mod fmt;
pub mod gateway;
pub mod io;
pub mod schematic;
pub mod session;
pub mod waveform;

pub mod deps {
    pub use arcstr;
    pub use forgegeom;
}

pub(crate) mod log;


pub trait Log {
    fn log(&self);
}
