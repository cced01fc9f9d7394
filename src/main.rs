#![allow(dead_code, unused_imports)]
#![allow(rustdoc::broken_intra_doc_links, rustdoc::invalid_html_tags)]
//! # Dork Builder
//!
//! **Ponto de entrada** do construtor de queries avançadas de busca
//! ("dorks"). O usuário monta a query a partir de um catálogo de operadores
//! (`site:`, `filetype:`, `intext:` ...) e de termos livres, e recebe:
//!
//! - a query final, pronta para copiar
//! - uma frase em linguagem natural descrevendo o que ela encontra
//! - um link que abre a busca em uma nova aba
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging
//!   ├── Lê AppConfig do ambiente (DORK_*)
//!   ├── Monta AppState (sessão + broadcast SSE) e Router
//!   └── Inicia servidor TCP
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Executar com logs padrão (info)
//! cargo run
//!
//! # Logs detalhados, outra porta, gerador sem atraso
//! RUST_LOG=debug DORK_ADDR=127.0.0.1:8080 DORK_GENERATE_DELAY_MS=0 cargo run
//! ```
//!
//! Nenhuma requisição é feita a buscadores: "pesquisar" significa abrir a
//! URL de busca no navegador do usuário.

/// Módulo `core` — catálogo de operadores, partes e erros.
mod core;

/// Módulo `query` — montagem, descrição e parser reverso.
mod query;

/// Módulo `generator` — gerador de queries por template com atraso simulado.
mod generator;

/// Módulo `session` — estado transitório do construtor.
mod session;

/// Módulo `examples_catalog` — exemplos curados de dorks.
mod examples_catalog;

/// Módulo `config` — configuração lida do ambiente.
mod config;

/// Módulo `web` — servidor axum, handlers HTTP, templates e SSE.
mod web;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::web::state::AppState;

/// Função principal assíncrona.
///
/// # Erros
///
/// Retorna erro se a configuração for inválida, se não conseguir fazer
/// bind no endereço configurado ou se o servidor axum falhar.
#[tokio::main]
async fn main() -> Result<()> {
    // Aceita RUST_LOG para configurar o nível. Ex: RUST_LOG=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🔎 Dork Builder — Starting...");

    let config = AppConfig::from_env().context("Falha ao ler configuração")?;
    tracing::info!(
        addr = %config.addr,
        search_url = %config.search_url,
        delay_ms = config.generate_delay.as_millis() as u64,
        "Configuração carregada"
    );

    let addr = config.addr;
    let state = AppState::new(config);
    let app = web::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Falha ao fazer bind em {addr}"))?;
    tracing::info!("🚀 Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
