//! Yo-yo — an interactive damped-pendulum toy.
//!
//! A bob swings on a fixed-length string from a pivot, driven either by a
//! damped-pendulum integrator or directly by the pointer, with a fading trail
//! and stochastic spark particles as optional effects.  The core simulation
//! (integrator, mode machine, trail, sparks) is plain resource logic with no
//! rendering dependency, so it can be exercised headlessly.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod input;
pub mod pendulum;
pub mod rendering;
pub mod sparks;
pub mod theme;
pub mod trail;
