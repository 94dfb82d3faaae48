//! HTTP Handlers

mod machine;
mod ping;
mod predict;
mod reading;

pub use machine::*;
pub use ping::*;
pub use predict::*;
pub use reading::*;
