//! Nearest-station resolution.
//!
//! Ranks a catalog by great-circle distance from a query point. Ranking is
//! pure and synchronous; the only suspend point is the optional address
//! lookup in [`resolve_nearest_by_address`], which completes (or fails)
//! before any ranking happens.

mod by_address;
mod error;
mod rank;

pub use by_address::{ResolvedAddress, resolve_nearest_by_address};
pub use error::ResolveError;
pub use rank::{RankedStation, Selection, rank, resolve_nearest};
