//! Command builders and response parsers, one module per applet instruction
//!
//! Builders produce a generic [`Command`](ykoath_apdu_core::Command); parsers
//! consume the fully reassembled response payload. Chaining and status-word
//! handling live in the executor, never here.

pub mod calculate;
pub mod calculate_all;
pub mod delete;
pub mod list;
pub mod put;
pub mod reset;
pub mod select;
pub mod set_code;
pub mod validate;

pub use calculate::parse_calculate;
pub use calculate_all::parse_calculate_all;
pub use list::parse_list;
pub use select::SelectResponse;
pub use validate::parse_validate;
