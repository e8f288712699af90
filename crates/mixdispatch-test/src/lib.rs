//! Shared test fixtures for MixDispatch crates.
//!
//! Problem instances small enough to be solved to optimality in a unit
//! test, plus builders for writing new ones.
//!
//! - [`scenarios`] - the reference scenarios (trivial, multi-trip,
//!   contention, incompatible pump, preferred station, mixed fleet,
//!   staggered start)
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! mixdispatch-test = { workspace = true }
//! ```
//!
//! ```
//! use mixdispatch_test::scenarios;
//!
//! let instance = scenarios::multi_trip();
//! assert_eq!(instance.num_vehicles(), 1);
//! ```

pub mod scenarios;

use mixdispatch_core::Order;

/// An order with rate 1, reach 10 and the same travel times from every station.
pub fn order(name: &str, volume: i64, start: i64, stations: usize, travel: i64) -> Order {
    let mut order = Order::new(name, volume, 1, 10, start, stations);
    for s in 0..stations {
        order = order.with_travel(s, travel, travel);
    }
    order
}
