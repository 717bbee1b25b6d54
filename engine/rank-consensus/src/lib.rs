//! Rank Consensus - merges per-source player rankings into one consensus list
//!
//! Ranking sources format player names differently ("A.J. Brown", "aj brown").
//! This crate resolves those records to a shared identity and averages the
//! ranks each source assigned, producing a list sorted by average rank.

pub mod consensus;
pub mod identity;
pub mod types;

pub use consensus::{build_consensus, build_consensus_with};
pub use identity::{normalize, to_player_id, IdentityResolver, NormalizedNameResolver};
pub use types::{ConsensusPlayer, ConsensusResponse, RawRankingRecord};
