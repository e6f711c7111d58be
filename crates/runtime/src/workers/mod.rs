//! Background tasks: the simulation loop and the action schedulers.

pub(crate) mod schedulers;
pub(crate) mod simulation;
