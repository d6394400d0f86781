pub mod protocol_state;
pub mod options_market;
pub mod option_contract;
pub mod buyer_position;

pub use protocol_state::*;
pub use options_market::*;
pub use option_contract::*;
pub use buyer_position::*;
