pub mod hash;
pub mod layer;
pub mod traits;
pub mod types;

pub use hash::*;
pub use layer::*;
pub use traits::*;
pub use types::*;

#[cfg(test)]
pub(crate) mod test_provider;

#[cfg(test)]
mod layer_tests;
