//! Hardware-independent building blocks shared by the tasks
pub mod animation;
pub mod command;
pub mod drivers;
pub mod error;
pub mod glyph;
pub mod hysteresis;
pub mod links;
pub mod mode;
