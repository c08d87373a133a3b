//! Integration tests for the sweep and its downstream tools
//!
//! These tests use wiremock to stand in for the results portal and run the
//! full sweep → results file → ranked file → lookup/report chain.

mod pipeline_tests;
mod sweep_tests;
