use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Token {
    address: Address,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default = "default_decimals")]
    decimals: u8,
}

fn default_decimals() -> u8 {
    18
}

impl Hash for Token {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state)
    }
}

impl PartialEq for Token {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.address == other.get_address()
    }
}

impl Eq for Token {}

impl Ord for Token {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.address.cmp(&other.get_address())
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Token {
    #[inline]
    pub fn new(address: Address) -> Token {
        Self::new_with_data(address, None, None)
    }

    pub fn new_with_data(address: Address, symbol: Option<String>, decimals: Option<u8>) -> Token {
        Token { address, symbol, decimals: decimals.unwrap_or(default_decimals()) }
    }

    #[inline]
    pub fn get_symbol(&self) -> String {
        self.symbol.clone().unwrap_or(self.address.to_string())
    }

    #[inline]
    pub fn get_decimals(&self) -> u8 {
        self.decimals
    }

    #[inline]
    pub fn get_address(&self) -> Address {
        self.address
    }

    /// Pools order their tokens by address, the lower one being token0.
    #[inline]
    pub fn sorts_before(&self, other: &Token) -> bool {
        self.address < other.address
    }
}
