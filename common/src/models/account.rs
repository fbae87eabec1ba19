use serde::{Deserialize, Serialize};

/// Holdings of a single asset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Balance {
    pub asset: String,
    /// Available for trading
    pub free: f64,
    /// Locked in open orders
    pub lock: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub balances: Vec<Balance>,
}

impl Account {
    /// Balance for `asset`, if the account holds it.
    pub fn balance(&self, asset: &str) -> Option<&Balance> {
        self.balances.iter().find(|b| b.asset == asset)
    }
}

/// Free amounts of the two assets of a trading pair
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub asset: f64,
    pub quote: f64,
}
