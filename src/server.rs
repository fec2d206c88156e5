use crate::config::Config;
use crate::game::{GameSnapshot, GameState, MoveCommand, MoveError, MoveOutcome, Player};
use crate::metrics::ServerMetrics;
use crate::protocol::ServerMessage;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::Mutex;

mod message_router;
mod session_registry;

pub use session_registry::{ConnectionId, OutboundSender, SessionRegistry};

/// Authoritative game server.
///
/// Owns the single [`GameState`] behind one mutex. Every state transition
/// (move, reset, connect-time snapshot) runs inside that critical section,
/// and the resulting broadcast is enqueued before the lock is released so
/// every recipient observes states in commit order. Enqueueing never waits
/// on the network; each connection's writer task drains its own queue.
pub struct GameServer {
    state: Mutex<GameState>,
    sessions: SessionRegistry,
    metrics: Arc<ServerMetrics>,
    config: Config,
}

impl GameServer {
    pub fn new(config: Config) -> Arc<Self> {
        let state = GameState::new(config.game.direction_policy());
        Self::with_state(config, state)
    }

    /// Server running an arbitrary starting position.
    pub fn with_state(config: Config, state: GameState) -> Arc<Self> {
        let metrics = Arc::new(ServerMetrics::new());
        Arc::new(Self {
            state: Mutex::new(state),
            sessions: SessionRegistry::new(metrics.clone()),
            metrics,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<ServerMetrics> {
        &self.metrics
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Register a participant and show everyone the live board.
    pub async fn connect(&self, player: Player, sender: OutboundSender) -> ConnectionId {
        let state = self.state.lock().await;
        let connection_id = self.sessions.register(player, sender);
        self.metrics.increment_connections();
        self.sessions
            .broadcast(Arc::new(ServerMessage::State(GameSnapshot::from(&*state))));
        connection_id
    }

    /// Release the registry entry held by `connection_id`, if it still holds one.
    pub fn disconnect(&self, player: Player, connection_id: ConnectionId) {
        self.sessions.unregister_connection(player, connection_id);
        self.metrics.decrement_connections();
        tracing::info!(%player, %connection_id, "Connection closed");
    }

    pub async fn get_state(&self) -> GameSnapshot {
        GameSnapshot::from(&*self.state.lock().await)
    }

    /// Validate and apply a raw `CHAR:DIR` move.
    pub async fn handle_move(
        &self,
        player: Player,
        descriptor: &str,
    ) -> Result<MoveOutcome, MoveError> {
        self.transition(player, |state| state.handle_move(player, descriptor))
            .await
    }

    /// Apply a move that the connection layer already parsed.
    pub async fn submit_move(
        &self,
        player: Player,
        command: &MoveCommand,
    ) -> Result<MoveOutcome, MoveError> {
        self.transition(player, |state| state.apply_command(player, command))
            .await
    }

    /// Restore the opening layout, keeping the configured rules.
    pub async fn reset(&self) -> GameSnapshot {
        let mut state = self.state.lock().await;
        *state = GameState::new(state.policy());
        let snapshot = GameSnapshot::from(&*state);
        self.sessions
            .broadcast(Arc::new(ServerMessage::State(snapshot.clone())));
        self.metrics.increment_games_reset();
        tracing::info!("Game reset to opening layout");
        snapshot
    }

    /// Run `apply` against a staged copy of the state and commit it only on
    /// success. A panic inside `apply` is contained and reported as
    /// [`MoveError::Internal`], leaving the committed state untouched.
    async fn transition<F>(&self, player: Player, apply: F) -> Result<MoveOutcome, MoveError>
    where
        F: FnOnce(&mut GameState) -> Result<MoveOutcome, MoveError>,
    {
        let mut state = self.state.lock().await;
        let mut staged = state.clone();

        let result = match panic::catch_unwind(AssertUnwindSafe(|| apply(&mut staged))) {
            Ok(result) => result,
            Err(_) => {
                self.metrics.increment_internal_errors();
                tracing::error!(%player, "Move processing panicked; state left unchanged");
                Err(MoveError::Internal)
            }
        };

        match result {
            Ok(outcome) => {
                *state = staged;
                self.metrics.increment_moves_accepted();
                tracing::info!(
                    %player,
                    piece = %outcome.piece,
                    from = %outcome.from,
                    to = %outcome.to,
                    captured = outcome.captured.len(),
                    "Move accepted"
                );
                if state.is_over() {
                    self.metrics.increment_games_finished();
                    tracing::info!(winner = ?state.winner(), "Game over");
                }
                self.sessions
                    .broadcast(Arc::new(ServerMessage::State(GameSnapshot::from(&*state))));
                Ok(outcome)
            }
            Err(err) => {
                self.metrics.increment_moves_rejected();
                tracing::debug!(%player, error = %err, "Move rejected");
                Err(err)
            }
        }
    }
}
