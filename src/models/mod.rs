pub mod common;
pub mod generation;
pub mod pinning;

pub use common::*;
pub use generation::*;
pub use pinning::*;
