use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for connections, moves and outbound delivery.
#[derive(Debug)]
pub struct ServerMetrics {
    started_at: DateTime<Utc>,

    // Connection metrics
    pub total_connections: AtomicU64,
    pub active_connections: AtomicU64,
    pub disconnections: AtomicU64,
    pub superseded_connections: AtomicU64,

    // Game metrics
    pub moves_accepted: AtomicU64,
    pub moves_rejected: AtomicU64,
    pub games_finished: AtomicU64,
    pub games_reset: AtomicU64,

    // Delivery metrics
    pub broadcasts: AtomicU64,
    pub messages_dropped: AtomicU64,

    // Error tracking
    pub frame_errors: AtomicU64,
    pub internal_errors: AtomicU64,
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            total_connections: AtomicU64::new(0),
            active_connections: AtomicU64::new(0),
            disconnections: AtomicU64::new(0),
            superseded_connections: AtomicU64::new(0),
            moves_accepted: AtomicU64::new(0),
            moves_rejected: AtomicU64::new(0),
            games_finished: AtomicU64::new(0),
            games_reset: AtomicU64::new(0),
            broadcasts: AtomicU64::new(0),
            messages_dropped: AtomicU64::new(0),
            frame_errors: AtomicU64::new(0),
            internal_errors: AtomicU64::new(0),
        }
    }

    pub fn increment_connections(&self) {
        self.total_connections.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn decrement_connections(&self) {
        self.disconnections.fetch_add(1, Ordering::Relaxed);
        // Saturate at zero rather than wrapping if a release races a reset.
        let _ = self
            .active_connections
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }

    pub fn increment_superseded_connections(&self) {
        self.superseded_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_moves_accepted(&self) {
        self.moves_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_moves_rejected(&self) {
        self.moves_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_games_finished(&self) {
        self.games_finished.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_games_reset(&self) {
        self.games_reset.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_broadcasts(&self) {
        self.broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_messages_dropped(&self) {
        self.messages_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_frame_errors(&self) {
        self.frame_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_internal_errors(&self) {
        self.internal_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let now = Utc::now();
        MetricsSnapshot {
            started_at: self.started_at.to_rfc3339(),
            uptime_seconds: now
                .signed_duration_since(self.started_at)
                .num_seconds()
                .max(0) as u64,
            total_connections: self.total_connections.load(Ordering::Relaxed),
            active_connections: self.active_connections.load(Ordering::Relaxed),
            disconnections: self.disconnections.load(Ordering::Relaxed),
            superseded_connections: self.superseded_connections.load(Ordering::Relaxed),
            moves_accepted: self.moves_accepted.load(Ordering::Relaxed),
            moves_rejected: self.moves_rejected.load(Ordering::Relaxed),
            games_finished: self.games_finished.load(Ordering::Relaxed),
            games_reset: self.games_reset.load(Ordering::Relaxed),
            broadcasts: self.broadcasts.load(Ordering::Relaxed),
            messages_dropped: self.messages_dropped.load(Ordering::Relaxed),
            frame_errors: self.frame_errors.load(Ordering::Relaxed),
            internal_errors: self.internal_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`ServerMetrics`] for the `/metrics` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub started_at: String,
    pub uptime_seconds: u64,
    pub total_connections: u64,
    pub active_connections: u64,
    pub disconnections: u64,
    pub superseded_connections: u64,
    pub moves_accepted: u64,
    pub moves_rejected: u64,
    pub games_finished: u64,
    pub games_reset: u64,
    pub broadcasts: u64,
    pub messages_dropped: u64,
    pub frame_errors: u64,
    pub internal_errors: u64,
}
