//! Afdian Bridge - Payment bridge between a self-hosted storage site and Afdian
//!
//! The storage site creates signed orders here and is redirected to Afdian's
//! checkout. Afdian's payment callbacks are confirmed against its order query
//! API and the local order ledger before the site is notified.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
