use crate::identity::{IdentityResolver, NormalizedNameResolver};
use crate::types::{ConsensusPlayer, RawRankingRecord};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Per-identity accumulator built up while scanning the records
#[derive(Debug)]
struct PlayerAccumulator {
    player_id: String,
    name: String,
    team: String,
    ranks: BTreeMap<String, u32>,
}

impl PlayerAccumulator {
    fn new(key: &str, record: &RawRankingRecord) -> Self {
        Self {
            player_id: key.replace(' ', "-"),
            name: record.display_name.clone(),
            team: record.team.clone(),
            ranks: BTreeMap::new(),
        }
    }

    /// Fold one record in: its rank replaces any earlier rank from the same
    /// source, and its team only fills an empty team
    fn absorb(&mut self, record: &RawRankingRecord) {
        self.ranks.insert(record.source.clone(), record.rank);

        if self.team.is_empty() && !record.team.is_empty() {
            self.team = record.team.clone();
        }
    }

    fn finish(self) -> ConsensusPlayer {
        // Never empty: an accumulator is only created alongside its first rank
        let sources = self.ranks.len();
        let total: f64 = self.ranks.values().map(|&rank| f64::from(rank)).sum();

        ConsensusPlayer {
            player_id: self.player_id,
            name: self.name,
            team: self.team,
            ranks: self.ranks,
            average_rank: total / sources as f64,
            sources,
        }
    }
}

/// Accumulators in order of first appearance, indexed by identity key
#[derive(Debug, Default)]
struct ConsensusTable {
    index_by_key: HashMap<String, usize>,
    players: Vec<PlayerAccumulator>,
}

impl ConsensusTable {
    fn absorb<R: IdentityResolver + ?Sized>(
        mut self,
        resolver: &R,
        record: &RawRankingRecord,
    ) -> Self {
        let key = resolver.resolve_identity(&record.display_name);

        let index = match self.index_by_key.get(&key) {
            Some(&index) => index,
            None => {
                self.players.push(PlayerAccumulator::new(&key, record));
                let index = self.players.len() - 1;
                self.index_by_key.insert(key, index);
                index
            }
        };

        self.players[index].absorb(record);
        self
    }
}

/// Build the consensus ranking using normalized-name identity matching
pub fn build_consensus(records: &[RawRankingRecord]) -> Vec<ConsensusPlayer> {
    build_consensus_with(&NormalizedNameResolver, records)
}

/// Build the consensus ranking with a custom identity resolver
///
/// Records are grouped by `resolver`'s key. Each player keeps the display
/// name of its first record and the first non-empty team. The result is
/// sorted by average rank; ties keep the order in which players first
/// appeared in `records`.
pub fn build_consensus_with<R: IdentityResolver + ?Sized>(
    resolver: &R,
    records: &[RawRankingRecord],
) -> Vec<ConsensusPlayer> {
    let table = records
        .iter()
        .fold(ConsensusTable::default(), |table, record| table.absorb(resolver, record));

    debug!("Grouped {} records into {} players", records.len(), table.players.len());

    let mut consensus: Vec<ConsensusPlayer> =
        table.players.into_iter().map(PlayerAccumulator::finish).collect();

    // sort_by is stable, which preserves first-appearance order on ties
    consensus.sort_by(|a, b| a.average_rank.total_cmp(&b.average_rank));
    consensus
}
