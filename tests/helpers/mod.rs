// ABOUTME: Test helper module organization
// ABOUTME: Axum HTTP testing utilities shared across integration suites

pub mod axum_test;
