//! Client side of ideaswipe: the swipe gesture recognizer, the app state
//! machine, and the session that connects them to an idea source, a store,
//! and a presentation layer.

pub mod app;
pub mod gesture;
pub mod input;
pub mod session;
pub mod source;
pub mod view;
