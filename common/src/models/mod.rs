mod account;
mod candle;
mod order;

pub use account::{Account, Balance, Position};
pub use candle::Candle;
pub use order::{Order, OrderStatus, OrderType, Side};
