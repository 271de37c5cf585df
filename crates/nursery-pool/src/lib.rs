//! `nursery-pool` — capacity-limited resource primitives.
//!
//! Two containers cover every shared resource in the facility:
//!
//! | Module          | Contents                                            |
//! |-----------------|-----------------------------------------------------|
//! | [`seat_pool`]   | `SeatPool` — slot↔occupant assignment table         |
//! | [`toilet_queue`]| `ToiletQueue` — bounded FIFO with rank positions    |
//! | [`error`]       | `PoolError`, `PoolResult`                           |
//!
//! Pool-full is *not* represented here as an error state: callers are
//! expected to check availability first and keep the requesting agent in a
//! waiting sub-state otherwise.  `PoolError` only reports contract
//! violations (assigning past capacity, freeing a slot nobody holds), which
//! indicate a scheduling-logic defect and must abort the run.

pub mod error;
pub mod seat_pool;
pub mod toilet_queue;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{PoolError, PoolResult};
pub use seat_pool::SeatPool;
pub use toilet_queue::ToiletQueue;
