//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `classify.rs` — full classification run: load, classify, assemble, write.
//! - `validate.rs` — rule config / mapping table consistency check.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod classify;
pub mod validate;

pub use classify::handle_classify;
pub use validate::handle_validate;
