//! Concrete action transitions, one file per family.

pub mod care;
pub mod economy;
pub mod energy;
pub mod level;
pub mod ranking;
pub mod session;
pub mod tap;
pub mod tasks;
