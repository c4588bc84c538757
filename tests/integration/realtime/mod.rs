//! Relay integration tests

mod relay_scenarios;
mod socket_test;
mod transport_test;
