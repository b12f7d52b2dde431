//! Inbound adapters translating transport requests onto domain ports.

pub mod http;
