//! Interfaces to the services around the grading core.
//!
//! The core never talks to the network or disk itself. These traits are the
//! seams where a vision model, a market-data feed and a persistence backend
//! plug in; each reports its own outages as `UpstreamUnavailable` (or
//! `Storage`) and the core passes them through unchanged.

pub mod market;
pub mod storage;
pub mod vision;

pub use market::{MarketData, PriceList};
pub use storage::{GradingStore, InMemoryGradingStore, JsonFileStore};
pub use vision::{CardImage, ConditionAnalyzer, ImageSet, KnownScores, MAX_IMAGES_PER_CARD, MAX_IMAGE_SIZE};
