//! # Handlers HTTP — Os Endpoints da Aplicação
//!
//! Cada função pública neste módulo é um handler Axum, mapeado a uma rota
//! em [`super::create_router()`]. Handlers de formulário seguem o padrão
//! **HTMX fragment**: aplicam o evento à sessão e devolvem o fragmento
//! re-renderizado.
//!
//! ## Padrão de Resposta
//!
//! | Handler | Método | Retorno |
//! |---------|--------|---------|
//! | `index` | GET | HTML completo |
//! | `operators` / `operator_input` | GET | Fragment do formulário |
//! | `set_base` / `add_part` / `delete_part` / `clear_parts` | POST | `#workspace` |
//! | `edit_query` | POST | `#query-status` |
//! | `reset_query` / `use_example` / `generate` | POST | `#workspace` |
//! | `sse_events` | GET | SSE stream |
//! | `api_*` | GET/POST | JSON |
//!
//! Entradas inválidas nunca viram erro HTTP: o handler registra um aviso e
//! devolve o estado atual.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::response::Html;
use axum::Json;
use futures_util::stream::StreamExt;
use maud::html;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::BroadcastStream;

use super::state::AppState;
use super::templates;
use crate::core::{catalog, part, Category, DorkPart, FileType, OperatorDefinition};
use crate::examples_catalog::{self, ExampleDork};
use crate::generator::{self, GenerationTicket};
use crate::query::{describe, parse_example, parser, render};
use crate::session::{Session, SessionSnapshot};
use crate::web::events::GenerationEvent;

/// Converte Maud Markup em resposta Html<String> do Axum.
fn markup_to_html(m: maud::Markup) -> Html<String> {
    Html(m.into_string())
}

/// Fragmento `#workspace` com o estado atual da sessão.
fn workspace_html(state: &AppState) -> Html<String> {
    let session = state.session.read();
    markup_to_html(templates::workspace(&session, &state.config))
}

// ─── Formulários ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub category: String,
}

#[derive(Deserialize)]
pub struct OperatorQuery {
    #[serde(default)]
    pub operator: String,
}

#[derive(Deserialize)]
pub struct BaseForm {
    #[serde(default)]
    pub base_query: String,
}

#[derive(Deserialize)]
pub struct PartForm {
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Deserialize)]
pub struct FinalQueryForm {
    #[serde(default)]
    pub final_query: String,
}

#[derive(Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    pub prompt: String,
}

// ─── Páginas e fragmentos ────────────────────────────────────────

/// GET `/` — Página principal.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.read();
    markup_to_html(templates::full_page(&session, &state.config))
}

/// GET `/operators?category=` — Opções do select de operadores.
///
/// Categoria vazia ou desconhecida lista o catálogo inteiro.
pub async fn operators(Query(q): Query<CategoryQuery>) -> Html<String> {
    markup_to_html(templates::operator_options(Category::from_id(&q.category)))
}

/// GET `/operators/input?operator=` — Controle de valor para o operador.
pub async fn operator_input(
    State(state): State<AppState>,
    Query(q): Query<OperatorQuery>,
) -> Html<String> {
    let op = if q.operator.is_empty() {
        None
    } else {
        catalog::require(&q.operator)
            .inspect_err(|e| tracing::warn!(error = %e, "Operador pedido pelo formulário"))
            .ok()
    };
    markup_to_html(templates::value_input(op, &state.config))
}

/// POST `/base` — Atualiza a base query.
pub async fn set_base(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<BaseForm>,
) -> Html<String> {
    state.session.write().set_base_query(&form.base_query);
    workspace_html(&state)
}

/// POST `/parts` — Adiciona uma parte; entrada incompleta é ignorada.
pub async fn add_part(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<PartForm>,
) -> Html<String> {
    let added = state.session.write().add_part(&form.operator, &form.value);
    if !added {
        tracing::debug!(operator = %form.operator, "Parte incompleta recusada");
    }
    workspace_html(&state)
}

/// POST `/parts/{index}/delete` — Remove a parte no índice.
pub async fn delete_part(State(state): State<AppState>, Path(index): Path<usize>) -> Html<String> {
    state.session.write().remove_part(index);
    workspace_html(&state)
}

/// POST `/parts/clear` — Remove todas as partes.
pub async fn clear_parts(State(state): State<AppState>) -> Html<String> {
    state.session.write().clear_all_parts();
    workspace_html(&state)
}

/// POST `/query` — Edição manual da query final.
///
/// Devolve apenas `#query-status` para não substituir o textarea em
/// edição.
pub async fn edit_query(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<FinalQueryForm>,
) -> Html<String> {
    let mut session = state.session.write();
    session.edit_final_query(&form.final_query);
    markup_to_html(templates::query_status(&session, &state.config))
}

/// POST `/query/reset` — Volta a derivar a query das partes.
pub async fn reset_query(State(state): State<AppState>) -> Html<String> {
    state.session.write().reset_to_generated();
    workspace_html(&state)
}

/// POST `/examples/{index}` — Carrega um exemplo curado.
///
/// Além de `#workspace`, devolve o campo da base query como troca
/// out-of-band, já que o exemplo limpa a base.
pub async fn use_example(State(state): State<AppState>, Path(index): Path<usize>) -> Html<String> {
    let Some(example) = examples_catalog::get(index) else {
        tracing::warn!(index, "Exemplo inexistente");
        return workspace_html(&state);
    };

    let mut session = state.session.write();
    session.use_example(example.query);
    markup_to_html(html! {
        (templates::workspace(&session, &state.config))
        (templates::base_input_oob(&session))
    })
}

/// POST `/generate` — Gera uma query a partir do prompt.
///
/// A resposta só sai após o atraso simulado. Se outro pedido for feito
/// nesse meio tempo, este devolve o estado atual sem aplicar o resultado.
pub async fn generate(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<PromptForm>,
) -> Html<String> {
    if !form.prompt.trim().is_empty() {
        run_generation(&state, form.prompt).await;
    }
    workspace_html(&state)
}

/// Emite um ticket, aguarda o gerador e aplica o resultado se ainda vigente.
///
/// ```text
/// write-lock ─ begin_generation() ─ unlock
///            ... sleep(delay) ...
/// write-lock ─ finish_generation(ticket) ─ unlock
/// ```
///
/// Se o future for descartado durante a espera (cliente desconectou), o
/// [`PendingGeneration`] encerra o pedido para que ele não fique pendente.
async fn run_generation(state: &AppState, prompt: String) -> GenerationOutcome {
    let ticket = state.session.write().begin_generation();
    let mut pending = PendingGeneration {
        session: state.session.clone(),
        ticket,
        settled: false,
    };
    state.publish(GenerationEvent::Started {
        ticket: ticket.0,
        prompt: prompt.clone(),
    });

    let query = generator::generate_with_delay(prompt, state.config.generate_delay).await;

    let (committed, description) = {
        let mut session = state.session.write();
        let committed = session.finish_generation(ticket, query.clone());
        (committed, session.description())
    };
    pending.settled = true;

    if committed {
        tracing::info!(ticket = ticket.0, query = %query, "Query gerada aplicada");
        state.publish(GenerationEvent::Completed {
            ticket: ticket.0,
            query: query.clone(),
            description,
        });
    } else {
        state.publish(GenerationEvent::Superseded { ticket: ticket.0 });
    }

    GenerationOutcome {
        ticket: Some(ticket),
        query,
        committed,
    }
}

/// Pedido de geração em andamento; abandona o ticket se for descartado antes
/// do resultado.
struct PendingGeneration {
    session: Arc<RwLock<Session>>,
    ticket: GenerationTicket,
    settled: bool,
}

impl Drop for PendingGeneration {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!(ticket = self.ticket.0, "Geração abandonada antes do resultado");
            self.session.write().abandon_generation(self.ticket);
        }
    }
}

/// GET `/events` — Stream SSE de eventos do gerador.
///
/// Keep-alive a cada 15s; mensagens perdidas por atraso do assinante são
/// descartadas.
pub async fn sse_events(
    State(state): State<AppState>,
) -> Sse<impl futures_util::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = state.events_tx.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(event) => {
                let data = serde_json::to_string(&event).ok()?;
                Some(Ok(SseEvent::default().data(data)))
            }
            Err(_) => None,
        }
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

// ─── API JSON ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CategoryEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Resposta de `GET /api/catalog`.
#[derive(Serialize)]
pub struct CatalogResponse {
    pub categories: Vec<CategoryEntry>,
    pub operators: Vec<&'static OperatorDefinition>,
    pub file_types: &'static [FileType],
    pub examples: &'static [ExampleDork],
}

/// GET `/api/catalog` — Categorias, operadores, extensões e exemplos.
pub async fn api_catalog() -> Json<CatalogResponse> {
    let categories = catalog::list_categories()
        .iter()
        .map(|c| CategoryEntry {
            id: c.id(),
            name: c.name(),
            description: c.description(),
        })
        .collect();
    Json(CatalogResponse {
        categories,
        operators: catalog::list_by_category(None),
        file_types: catalog::file_types(),
        examples: examples_catalog::EXAMPLES,
    })
}

/// GET `/api/session` — Fotografia da sessão.
pub async fn api_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.read().snapshot())
}

#[derive(Deserialize)]
pub struct ComposeRequest {
    #[serde(default)]
    pub base_query: String,
    #[serde(default)]
    pub parts: Vec<DorkPart>,
}

#[derive(Serialize)]
pub struct ComposeResponse {
    /// Partes aceitas, com valores já aparados.
    pub parts: Vec<DorkPart>,
    pub query: String,
    pub description: String,
}

/// POST `/api/compose` — Monta e descreve sem tocar na sessão.
///
/// Cada parte passa pelas mesmas regras de aceitação do formulário.
pub async fn api_compose(Json(req): Json<ComposeRequest>) -> Json<ComposeResponse> {
    let mut parts = Vec::with_capacity(req.parts.len());
    for p in &req.parts {
        part::add_part(&mut parts, &p.operator_id, &p.value);
    }
    Json(ComposeResponse {
        query: render(&req.base_query, &parts),
        description: describe(&req.base_query, &parts),
        parts,
    })
}

#[derive(Deserialize)]
pub struct ParseRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct ParseResponse {
    pub parts: Vec<DorkPart>,
    /// Texto livre fora dos operadores reconhecidos.
    pub residual: String,
    pub description: String,
}

/// POST `/api/parse` — Recupera as partes de uma query escrita.
pub async fn api_parse(Json(req): Json<ParseRequest>) -> Json<ParseResponse> {
    let parts = parse_example(&req.query);
    let residual = parser::residual_text(&req.query);
    Json(ParseResponse {
        description: describe(&residual, &parts),
        parts,
        residual,
    })
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Resultado de uma geração; `committed = false` quando foi superada ou
/// recusada (prompt vazio, sem ticket).
#[derive(Serialize)]
pub struct GenerationOutcome {
    pub ticket: Option<GenerationTicket>,
    pub query: String,
    pub committed: bool,
}

/// POST `/api/generate` — Gera uma query e tenta aplicá-la à sessão.
///
/// Prompt vazio é recusado sem emitir ticket; a query atual é devolvida.
pub async fn api_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Json<GenerationOutcome> {
    if req.prompt.trim().is_empty() {
        return Json(GenerationOutcome {
            ticket: None,
            query: state.session.read().final_query().to_string(),
            committed: false,
        });
    }
    Json(run_generation(&state, req.prompt).await)
}
