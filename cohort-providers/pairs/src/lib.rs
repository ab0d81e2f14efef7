//! Line-based providers for teaching relations and exported groupings.

mod errors;
mod groups;
mod parse;
mod provider;

pub use errors::PairsProviderError;
pub use groups::read_groupings;
pub use provider::PairsProvider;
