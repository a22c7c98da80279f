//! Tank arcade game library
//!
//! Drive a tank around a ground plane, collect green bonuses, avoid red
//! obstacles.  The simulation ([`session::Session`] and the modules it builds
//! on) is plain Rust with no rendering dependency; [`simulation`] and [`scene`]
//! connect it to Bevy.

pub mod camera;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod placement;
pub mod scene;
pub mod session;
pub mod simulation;
pub mod vehicle;
pub mod world_object;
