//! Types shared between the simulation engine and its observers
//! (renderers, audio, UI).

pub mod config;
pub mod protocol;
pub mod types;
pub mod vec3;
