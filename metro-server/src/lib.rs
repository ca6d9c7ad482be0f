//! Metro route planning server.
//!
//! A web application that answers: "how do I get from this station to that
//! one, with the fewest stops and then the fewest changes?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod graph;
pub mod logging;
pub mod network;
pub mod planner;
pub mod web;
