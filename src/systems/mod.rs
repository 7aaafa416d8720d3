//! Simulation systems. Each owns one piece of state and exposes a tick that
//! the engine calls in a fixed order.

pub mod fragments;
pub mod liquid;
pub mod residue;
pub mod session;
pub mod temperature;
pub mod vapor;
