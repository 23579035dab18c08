pub mod context;
pub mod intent;

pub use context::*;
pub use intent::*;
