#![cfg_attr(not(test), deny(clippy::panic))]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::similar_names
)]

//! # Skirmish Server
//!
//! Authoritative WebSocket server for a two-player skirmish on a 5x5 board.
//!
//! One game, held in memory. Players connect as `A` or `B`, submit moves as
//! `CHARACTER:DIRECTION`, and every accepted move is broadcast to both
//! sides as a full state snapshot.

/// Server configuration and environment variables
pub mod config;

/// Board, pieces and the move rules
pub mod game;

/// Structured logging configuration
pub mod logging;

/// Metrics collection and reporting
pub mod metrics;

/// WebSocket message protocol definitions
pub mod protocol;

/// Game coordination and session tracking
pub mod server;

/// WebSocket connection handling
pub mod websocket;
