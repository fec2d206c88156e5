use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::game::Player;
use crate::metrics::ServerMetrics;
use crate::protocol::{ErrorCode, ServerMessage};

/// Identifies one WebSocket connection for the lifetime of its session.
pub type ConnectionId = Uuid;

/// Outbound half of a connection's message queue.
pub type OutboundSender = mpsc::Sender<Arc<ServerMessage>>;

#[derive(Debug, Clone)]
struct Session {
    connection_id: ConnectionId,
    sender: OutboundSender,
    connected_at: Instant,
}

/// Identity to outbound-channel map.
///
/// At most one session exists per identity. Registering an identity that is
/// already present replaces the old channel; dropping that channel ends the
/// superseded connection's writer.
pub struct SessionRegistry {
    sessions: DashMap<Player, Session>,
    metrics: Arc<ServerMetrics>,
}

impl SessionRegistry {
    pub fn new(metrics: Arc<ServerMetrics>) -> Self {
        Self {
            sessions: DashMap::new(),
            metrics,
        }
    }

    pub fn register(&self, player: Player, sender: OutboundSender) -> ConnectionId {
        let connection_id = Uuid::new_v4();
        let session = Session {
            connection_id,
            sender,
            connected_at: Instant::now(),
        };

        if let Some(previous) = self.sessions.insert(player, session) {
            self.metrics.increment_superseded_connections();
            info!(
                %player,
                %connection_id,
                previous_connection_id = %previous.connection_id,
                previous_age_secs = previous.connected_at.elapsed().as_secs(),
                "Session replaced by newer connection"
            );
        } else {
            info!(%player, %connection_id, "Session registered");
        }

        connection_id
    }

    /// Remove the session for `player` regardless of which connection owns it.
    pub fn unregister(&self, player: Player) -> bool {
        self.sessions.remove(&player).is_some()
    }

    /// Remove the session only if `connection_id` still owns it.
    pub fn unregister_connection(&self, player: Player, connection_id: ConnectionId) -> bool {
        let removed = self
            .sessions
            .remove_if(&player, |_, session| session.connection_id == connection_id)
            .is_some();
        if removed {
            info!(%player, %connection_id, "Session unregistered");
        } else {
            debug!(%player, %connection_id, "Superseded connection closed; session kept");
        }
        removed
    }

    pub fn is_registered(&self, player: Player) -> bool {
        self.sessions.contains_key(&player)
    }

    pub fn connection_id(&self, player: Player) -> Option<ConnectionId> {
        self.sessions.get(&player).map(|s| s.connection_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Enqueue `message` for every registered session. Never waits: a full or
    /// closed queue drops the message for that recipient only. Returns the
    /// number of sessions the message was queued for.
    pub fn broadcast(&self, message: Arc<ServerMessage>) -> usize {
        // Clone senders out so no shard lock is held while enqueueing.
        let recipients: Vec<(Player, OutboundSender)> = self
            .sessions
            .iter()
            .map(|entry| (*entry.key(), entry.value().sender.clone()))
            .collect();

        let delivered = recipients
            .into_iter()
            .filter(|(player, sender)| self.enqueue(*player, sender, message.clone()))
            .count();
        self.metrics.increment_broadcasts();
        delivered
    }

    /// Send to `player` if registered; otherwise a no-op.
    pub fn send_to(&self, player: Player, message: Arc<ServerMessage>) -> bool {
        let Some(sender) = self.sessions.get(&player).map(|s| s.sender.clone()) else {
            return false;
        };
        self.enqueue(player, &sender, message)
    }

    /// Targeted error frame; silently dropped if `player` is not registered.
    pub fn send_error(&self, player: Player, code: ErrorCode) -> bool {
        self.send_to(player, Arc::new(ServerMessage::error(code)))
    }

    /// Targeted error frame for one specific connection. Dropped if that
    /// connection has been superseded.
    pub fn send_error_to_connection(
        &self,
        player: Player,
        connection_id: ConnectionId,
        code: ErrorCode,
    ) -> bool {
        let Some(sender) = self
            .sessions
            .get(&player)
            .filter(|s| s.connection_id == connection_id)
            .map(|s| s.sender.clone())
        else {
            return false;
        };
        self.enqueue(player, &sender, Arc::new(ServerMessage::error(code)))
    }

    fn enqueue(&self, player: Player, sender: &OutboundSender, message: Arc<ServerMessage>) -> bool {
        match sender.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.metrics.increment_messages_dropped();
                warn!(%player, "Outbound queue full; dropping message");
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!(%player, "Outbound queue closed; dropping message");
                false
            }
        }
    }
}
