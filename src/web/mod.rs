//! # Módulo Web — A Interface do Construtor
//!
//! Camada web construída com **Axum** + **HTMX** + **Maud** + **SSE**.
//! Não reimplementa nada do núcleo: cada rota aplica um evento à
//! [`Session`](crate::session::Session) ou chama uma função pura de
//! [`query`](crate::query).
//!
//! ## Arquitetura Web
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Browser (HTMX + SSE + app.js)                            │
//! ├──────────────────────────────────────────────────────────┤
//! │ Axum Router (este módulo)                                │
//! │  ├── GET  /                        → página completa     │
//! │  ├── GET  /operators               → <option>s           │
//! │  ├── GET  /operators/input         → controle de valor   │
//! │  ├── POST /base                    → #workspace          │
//! │  ├── POST /parts                   → #workspace          │
//! │  ├── POST /parts/{index}/delete    → #workspace          │
//! │  ├── POST /parts/clear             → #workspace          │
//! │  ├── POST /query                   → #query-status       │
//! │  ├── POST /query/reset             → #workspace          │
//! │  ├── POST /examples/{index}        → #workspace + OOB    │
//! │  ├── POST /generate                → #workspace          │
//! │  ├── GET  /events                  → SSE (gerador)       │
//! │  └── /api/{catalog,session,compose,parse,generate} JSON  │
//! ├──────────────────────────────────────────────────────────┤
//! │ Static Assets (tower_http::ServeDir → /assets/)          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submódulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`state`] | Estado compartilhado (`AppState`) |
//! | [`events`] | Enum de eventos SSE do gerador |
//! | [`handlers`] | Handlers Axum para cada rota |
//! | [`templates`] | Templates Maud (HTML server-side) |

pub mod events;
pub mod handlers;
pub mod state;
pub mod templates;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Cria o router Axum com todas as rotas da aplicação.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // ── Página ────────────────────────────────────────────
        .route("/", get(handlers::index))
        // ── HTMX fragments ───────────────────────────────────
        .route("/operators", get(handlers::operators))
        .route("/operators/input", get(handlers::operator_input))
        .route("/base", post(handlers::set_base))
        .route("/parts", post(handlers::add_part))
        .route("/parts/{index}/delete", post(handlers::delete_part))
        .route("/parts/clear", post(handlers::clear_parts))
        .route("/query", post(handlers::edit_query))
        .route("/query/reset", post(handlers::reset_query))
        .route("/examples/{index}", post(handlers::use_example))
        .route("/generate", post(handlers::generate))
        // ── SSE ──────────────────────────────────────────────
        .route("/events", get(handlers::sse_events))
        // ── API JSON ─────────────────────────────────────────
        .route("/api/catalog", get(handlers::api_catalog))
        .route("/api/session", get(handlers::api_session))
        .route("/api/compose", post(handlers::api_compose))
        .route("/api/parse", post(handlers::api_parse))
        .route("/api/generate", post(handlers::api_generate))
        // ── Arquivos estáticos ────────────────────────────────
        .nest_service("/assets", ServeDir::new("assets"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
