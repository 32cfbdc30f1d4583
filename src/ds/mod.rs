pub mod frequency_buckets;
pub mod ghost_list;
pub mod history;
pub mod recency_list;
pub mod shard;
pub mod slot_arena;

pub use frequency_buckets::FrequencyBuckets;
pub use ghost_list::GhostList;
pub use history::{AdmissionHistory, HistoryOutcome};
pub use recency_list::RecencyList;
pub use shard::ShardSelector;
pub use slot_arena::{SlotArena, SlotId};
