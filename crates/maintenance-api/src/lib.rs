//! HTTP service exposing the predictive maintenance engine

pub mod api;
pub mod config;
