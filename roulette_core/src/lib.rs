pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod paytable;
pub mod recommend;
pub mod rng;
pub mod stats;
pub mod taxonomy;

pub use crate::config::Thresholds;
pub use crate::engine::RouletteAnalyzer;
pub use crate::error::{RouletteError, RouletteResult};
pub use crate::history::SpinHistory;
pub use crate::paytable::{settle, Bankroll, Paytable, PaytableEntry, RoundResult};
pub use crate::recommend::{evaluate, rank, reason, recommend, stake, Bet, Recommendation};
pub use crate::rng::{derive_floats, derive_hash_hex, spin_with_seeds, verify_outcome, ProvablyFairRng};
pub use crate::stats::{Category, RouletteStats, StatItem};
pub use crate::taxonomy::{member_keys_of, members_of, wheel_color, CategoryKind, WheelColor, MAX_OUTCOME};
