//! Ordered bidirectional map built on intrusive treaps.
//!
//! Every entry of a [`BiMap`] is one [`EntryRecord`](node::EntryRecord) holding two tree
//! participations, one per side:
//!
//! - **Left tree**: ordered by the left comparator, answers lookups, bounds
//!   and ordered traversal by left value.
//! - **Right tree**: ordered by the right comparator, the same for right
//!   values.
//!
//! Both trees are treaps ([`CartesianTree`](tree::CartesianTree)): a random priority per node
//! keeps the expected height logarithmic. Links are `Option<u32>` indices
//! into the map's record arena, and one index names the record in both
//! trees, so switching sides ([`LeftPos::flip`]) costs nothing.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`NodeStore`](types::NodeStore) trait, side tags, comparator shape |
//! | [`node`] | [`TreeNode`](node::TreeNode), [`EntryRecord`](node::EntryRecord), [`Records`](node::Records) arena |
//! | [`tree`] | [`CartesianTree`](tree::CartesianTree): split, merge, insert, remove, bounds, traversal |
//! | [`map`] | [`BiMap`] |
//! | [`cursor`] | [`LeftPos`] / [`RightPos`] positions and iterators |
//! | [`config`] | [`Config`] priority seeds |
//! | [`error`] | [`Error`] |
//!
//! The engine types stay in their modules; only the map surface is
//! re-exported here.
//!
//! The map is single-threaded: it does no locking of its own.

pub mod config;
pub mod cursor;
pub mod error;
pub mod map;
pub mod node;
pub mod tree;
pub mod types;

pub use config::Config;
pub use cursor::{LeftIter, LeftPos, RightIter, RightPos};
pub use error::{Error, Result};
pub use map::BiMap;
pub use types::{natural_order, Comparator};
