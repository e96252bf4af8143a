#![no_std]

pub mod call_flags;
pub mod errors;
pub mod multisig;
pub mod payments;
pub mod rules;
