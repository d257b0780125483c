// <crate>/tests signals to Cargo that files inside of it are integration tests.
// Integration tests are compiled into separate binaries which is slow. To avoid
// this we create one integration test here and in this test we include all the
// tests we want to run.

mod cancellation;
mod collection_offer;
mod configuration;
mod maker_ask;
mod maker_bid;
mod signing;
mod smart_contract_wallet;
