pub mod initialize_protocol;
pub mod create_options_market;
pub mod admin;
pub mod write_option;
pub mod buy_option;
pub mod exercise_option;
pub mod claim_expired_option;
pub mod close;

// Glob re-exports for Anchor compatibility
// Note: "ambiguous glob re-exports" warning for `handler` is benign -
// lib.rs uses fully qualified paths (e.g., instructions::buy_option::handler)
#[allow(ambiguous_glob_reexports)]
pub use initialize_protocol::*;
pub use create_options_market::*;
pub use admin::*;
pub use write_option::*;
pub use buy_option::*;
pub use exercise_option::*;
pub use claim_expired_option::*;
pub use close::*;
