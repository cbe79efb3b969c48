//! The four long-running tasks, generic over their drivers
pub mod dispatch;
pub mod display;
pub mod motor;
pub mod pixel;
