//! Loading stations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A loading depot shared by all vehicles. Station 0 is where every route begins.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Station {
    pub name: String,
    pub loading_time: i64,
}

impl Station {
    pub fn new(name: impl Into<String>, loading_time: i64) -> Self {
        Self {
            name: name.into(),
            loading_time,
        }
    }
}
