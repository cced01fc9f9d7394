//! # Estado da Aplicação Web
//!
//! Estado compartilhado entre todos os handlers Axum:
//!
//! ```text
//! AppState
//!  ├── session    Arc<RwLock<Session>>     (única, em memória)
//!  ├── config     Arc<AppConfig>           (imutável após o boot)
//!  └── events_tx  broadcast::Sender        (SSE de geração)
//! ```
//!
//! O lock da sessão nunca atravessa um `.await`: handlers assíncronos
//! pegam o que precisam, soltam o guard e só então aguardam.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::session::Session;
use crate::web::events::GenerationEvent;

/// Capacidade do canal de eventos SSE.
const EVENT_CAPACITY: usize = 64;

/// Estado compartilhado da aplicação Axum.
#[derive(Clone)]
pub struct AppState {
    /// Sessão do construtor, protegida por `RwLock`.
    pub session: Arc<RwLock<Session>>,
    /// Configuração lida na inicialização.
    pub config: Arc<AppConfig>,
    /// Canal broadcast para eventos SSE do gerador.
    pub events_tx: Arc<broadcast::Sender<GenerationEvent>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            session: Arc::new(RwLock::new(Session::new())),
            config: Arc::new(config),
            events_tx: Arc::new(events_tx),
        }
    }

    /// Publica um evento. Sem assinantes, o evento é simplesmente perdido.
    pub fn publish(&self, event: GenerationEvent) {
        let _ = self.events_tx.send(event);
    }
}
