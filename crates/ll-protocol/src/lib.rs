pub mod analysis;
pub mod id;

pub use analysis::*;
pub use id::*;
