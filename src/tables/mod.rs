//! Static and precomputed lookup tables used by the converters.
//!
//! - [`lexicon`]: digit words and their context-sensitive alternates.
//! - [`scale`]: magnitude words per group index.
//! - [`group_cache`]: the 1000-entry phrase tables built once per engine.

pub mod group_cache;
pub mod lexicon;
pub mod scale;

pub use group_cache::GroupCache;
pub use lexicon::{DigitPosition, FourForm, Lexicon};
pub use scale::scale_word;
