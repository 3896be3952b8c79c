//! tests/mod.rs
//! Pruebas unitarias y de endpoints.

mod csv_tests;
mod webhook_tests;
