//! Core types for MixDispatch.
//!
//! This crate holds the immutable Problem Instance consumed by the solver:
//! - [`Order`], [`Vehicle`], [`Station`] records
//! - [`ProblemInstance`] with its derived lookup tables and [`Bounds`]
//! - [`CostWeights`] for the five-term objective
//! - [`ProblemError`] for structurally malformed input
//!
//! # Example
//!
//! ```
//! use mixdispatch_core::{Order, ProblemInstance, Station, Vehicle};
//!
//! let mut order = Order::new("site-a", 6, 1, 10, 0, 1);
//! order.set_travel_to_yard(0, 2);
//! order.set_travel_from_yard(0, 2);
//!
//! let instance = ProblemInstance::new(
//!     vec![order],
//!     vec![Vehicle::new("truck-1", 6, 20, 2)],
//!     vec![Station::new("depot", 1)],
//! )
//! .unwrap();
//!
//! assert_eq!(instance.num_orders(), 1);
//! assert_eq!(instance.bounds().max_deliveries_per_order, 2);
//! ```

pub mod error;
pub mod instance;
pub mod order;
pub mod station;
pub mod vehicle;
pub mod weights;

pub use error::{ProblemError, Result};
pub use instance::{Bounds, ProblemInstance};
pub use order::{Order, UNREACHABLE};
pub use station::Station;
pub use vehicle::Vehicle;
pub use weights::CostWeights;
