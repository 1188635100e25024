//! Bounded room admission and per-book mutual exclusion.
//!
//! [`ResourcePool`] knows nothing about readers or quotas. It hands out
//! a [`RoomPass`] per admitted session and a [`BookGuard`] per locked
//! book; dropping either one gives the resource back.

pub mod guard;
pub mod pool;
pub mod state;

pub use guard::{BookGuard, RoomPass};
pub use pool::ResourcePool;
pub use state::PoolState;
