//! # Eventos SSE de Geração
//!
//! Define o enum [`GenerationEvent`], enviado ao frontend via Server-Sent
//! Events enquanto o gerador de queries trabalha.
//!
//! ## Ciclo de Vida
//!
//! ```text
//! Started{ticket} ──► Completed{ticket, query}
//!                 └─► Superseded{ticket}    (um pedido mais novo venceu)
//! ```
//!
//! ## Serialização
//!
//! `#[serde(tag = "type")]` produz JSON com discriminador:
//!
//! ```json
//! { "type": "Completed", "ticket": 3, "query": "site:example.com ext:env" }
//! ```

use serde::Serialize;

/// Evento do gerador de queries, enviado via SSE ao frontend.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
pub enum GenerationEvent {
    /// Pedido aceito; o resultado chega após o atraso simulado.
    Started {
        ticket: u64,
        prompt: String,
    },

    /// Resultado aplicado como query final da sessão.
    Completed {
        ticket: u64,
        query: String,
        description: String,
    },

    /// Resultado descartado porque um pedido mais novo foi emitido.
    Superseded {
        ticket: u64,
    },
}
