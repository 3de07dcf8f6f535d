//! Solana Actions ("Blinks") server: metadata discovery plus unsigned
//! transaction construction for wallet clients.

pub mod actions;
pub mod chain;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod protocol;
