//! Built-in request tables, one module per chip family.
//!
//! Every family builds on every target; use [`target`](crate::target) for
//! the one selected by the crate features.

pub mod at32f43x;
pub mod stm32f3;
pub mod stm32f4;
