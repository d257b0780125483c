//! Test harness for end to end scenarios of the order library.
//!
//! The scenarios run against [`setup::FakeLedger`], an in-memory stand-in for
//! the exchange contracts that answers the reads of the verifier and applies
//! the calls the library assembles.

pub mod setup;
