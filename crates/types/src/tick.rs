use serde::{Deserialize, Serialize};

/// An initialized tick as reported by the pool. Crossing it upward adds `liquidity_net`
/// to the active liquidity, crossing it downward subtracts it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawTick {
    pub index: i32,
    pub liquidity_net: i128,
}

impl RawTick {
    pub fn new(index: i32, liquidity_net: i128) -> Self {
        Self { index, liquidity_net }
    }
}

impl From<(i32, i128)> for RawTick {
    fn from(value: (i32, i128)) -> Self {
        Self::new(value.0, value.1)
    }
}
