//! Tests for the connection operations

pub mod connection_tests;
