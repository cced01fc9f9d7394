//! # Templates Maud — HTML Server-Side Rendering
//!
//! Templates HTML compilados com o macro [`maud`](https://maud.lambda.xyz/).
//! O servidor devolve **fragmentos HTML** e o HTMX os injeta no DOM; o
//! único JavaScript próprio (`assets/app.js`) cuida de clipboard, abas,
//! tema e do feed SSE do gerador.
//!
//! ## Templates Disponíveis
//!
//! | Função | Tipo | Alvo HTMX |
//! |--------|------|-----------|
//! | [`full_page()`] | Página completa | — |
//! | [`workspace()`] | Fragment | `#workspace` (partes + query final) |
//! | [`query_status()`] | Fragment | `#query-status` (descrição + busca) |
//! | [`operator_options()`] | Fragment | `#operator-select` |
//! | [`value_input()`] | Fragment | `#value-input` |
//! | [`base_input()`] | Fragment OOB | `#base-query` |
//!
//! ## Layout Principal
//!
//! ```text
//! ┌──────────────── nav-bar ─────────────────────────┐
//! │ DB │ Builder │ Examples │ Guide │        [☾ tema] │
//! ├──────────────────────────┬───────────────────────┤
//! │ Base query [__________]  │  Final query          │
//! │ Category [▾] Operator [▾]│  ┌─────────────────┐  │
//! │ Value [______] [Add]     │  │ textarea        │  │
//! │                          │  └─────────────────┘  │
//! │ ┌ Parts ──────────────┐  │  Description ...      │
//! │ │ site:example.com  ✕ │  │  [Copy] [Search ↗]   │
//! │ └─────────────────────┘  │                       │
//! ├──────────────────────────┴───────────────────────┤
//! │ ✦ Generate with AI [______________] [Generate]   │
//! └──────────────────────────────────────────────────┘
//! ```

use maud::{html, Markup, DOCTYPE};

use crate::config::AppConfig;
use crate::core::{catalog, Category, OperatorDefinition, ValueKind};
use crate::examples_catalog::{self, DEMO_DOMAIN};
use crate::session::Session;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";

/// Página principal com as três abas (builder, exemplos, guia).
pub fn full_page(session: &Session, config: &AppConfig) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Dork Builder" }
                link rel="stylesheet" href="/assets/style.css";
                script src=(HTMX_SRC) {}
            }
            body {
                div class="app-shell" {
                    nav class="nav-bar" {
                        a href="/" class="nav-brand" {
                            span class="nav-brand-icon" { "DB" }
                            span class="nav-brand-text" { "Dork " em { "Builder" } }
                        }
                        div class="nav-links" {
                            button class="nav-link active" data-tab="builder" { "Builder" }
                            button class="nav-link" data-tab="examples" { "Examples" }
                            button class="nav-link" data-tab="guide" { "Guide" }
                        }
                        div class="nav-status" {
                            span class="nav-status-dot" id="status-dot" {}
                            span id="status-text" { "idle" }
                            button id="theme-toggle" class="icon-btn" title="Toggle theme" { "☾" }
                        }
                    }

                    section id="tab-builder" class="tab-view active" {
                        div class="app-container" {
                            div class="builder-panel" {
                                (base_input(session))
                                (add_part_form(config))
                            }
                            (workspace(session, config))
                        }
                        (generator_form())
                    }

                    section id="tab-examples" class="tab-view" {
                        (examples_list())
                    }

                    section id="tab-guide" class="tab-view" {
                        (guide())
                    }
                }
                script src="/assets/app.js" {}
            }
        }
    }
}

/// Campo da base query. Com `oob`, substitui o campo existente fora do alvo.
pub fn base_input(session: &Session) -> Markup {
    base_input_inner(session, false)
}

/// Mesmo campo, marcado para troca out-of-band pelo HTMX.
pub fn base_input_oob(session: &Session) -> Markup {
    base_input_inner(session, true)
}

fn base_input_inner(session: &Session, oob: bool) -> Markup {
    html! {
        div id="base-query" class="field" hx-swap-oob=[oob.then_some("true")] {
            label for="base-query-input" { "Base query" }
            input id="base-query-input" type="text" name="base_query"
                value=(session.base_query())
                placeholder="Free-text search terms"
                autocomplete="off"
                hx-post="/base"
                hx-trigger="input changed delay:300ms"
                hx-target="#workspace"
                hx-swap="outerHTML";
        }
    }
}

/// Formulário de nova parte: categoria → operador → valor.
fn add_part_form(config: &AppConfig) -> Markup {
    html! {
        form class="add-part" hx-post="/parts" hx-target="#workspace" hx-swap="outerHTML" {
            div class="field" {
                label for="category" { "Category" }
                select id="category" name="category"
                    hx-get="/operators"
                    hx-target="#operator-select"
                    hx-trigger="change" {
                    option value="" { "All categories" }
                    @for category in catalog::list_categories() {
                        option value=(category.id()) title=(category.description()) {
                            (category.name())
                        }
                    }
                }
            }
            div class="field" {
                label for="operator-select" { "Operator" }
                select id="operator-select" name="operator"
                    hx-get="/operators/input"
                    hx-target="#value-input"
                    hx-trigger="change" {
                    (operator_options(None))
                }
            }
            div class="field" {
                label { "Value" }
                div id="value-input" {
                    (value_input(None, config))
                }
            }
            button type="submit" class="primary-btn" { "Add operator" }
        }
    }
}

/// Opções do select de operadores, filtradas por categoria.
pub fn operator_options(category: Option<Category>) -> Markup {
    html! {
        option value="" { "Select an operator" }
        @for op in catalog::list_by_category(category) {
            option value=(op.id) title=(op.description) { (op.label) " · " (op.description) }
        }
    }
}

/// Controle de valor adequado ao tipo do operador escolhido.
pub fn value_input(op: Option<&OperatorDefinition>, config: &AppConfig) -> Markup {
    let kind = op.map(|o| o.value_kind()).unwrap_or(ValueKind::Text);
    html! {
        @match kind {
            ValueKind::Date => {
                @let (min, max) = config.date_bounds();
                input type="date" name="value" required
                    min=(min.format("%Y-%m-%d"))
                    max=(max.format("%Y-%m-%d"));
            }
            ValueKind::FileType => {
                select name="value" required {
                    option value="" { "Select a file type" }
                    @for ft in catalog::file_types() {
                        option value=(ft.value) { (ft.label) }
                    }
                }
            }
            ValueKind::Text => {
                input type="text" name="value" autocomplete="off"
                    placeholder=(op.map(|o| o.description).unwrap_or("Enter a value"));
            }
        }
    }
}

/// Lista de partes e painel da query final.
pub fn workspace(session: &Session, config: &AppConfig) -> Markup {
    html! {
        div id="workspace" class="workspace" {
            div class="parts-panel" {
                div class="panel-header" {
                    h2 { "Operators" }
                    @if !session.parts().is_empty() {
                        button class="link-btn"
                            hx-post="/parts/clear"
                            hx-target="#workspace"
                            hx-swap="outerHTML" { "Clear all" }
                    }
                }
                @if session.parts().is_empty() {
                    p class="hint" { "No operators yet. Pick one on the left to start." }
                } @else {
                    ul class="parts-list" {
                        @for (index, part) in session.parts().iter().enumerate() {
                            @let label = catalog::lookup(&part.operator_id)
                                .map(|op| op.label)
                                .unwrap_or(part.operator_id.as_str());
                            li class="part-chip" {
                                code { (label) (part.value) }
                                button class="remove-btn" title="Remove"
                                    hx-post=(format!("/parts/{index}/delete"))
                                    hx-target="#workspace"
                                    hx-swap="outerHTML" { "✕" }
                            }
                        }
                    }
                }
            }

            div class="query-panel" {
                div class="panel-header" {
                    h2 { "Final query" }
                    button class="link-btn" data-copy="#final-query" { "Copy" }
                }
                textarea id="final-query" name="final_query" rows="3" spellcheck="false"
                    hx-post="/query"
                    hx-trigger="input changed delay:300ms"
                    hx-target="#query-status"
                    hx-swap="outerHTML" {
                    (session.final_query())
                }
                (query_status(session, config))
            }
        }
    }
}

/// Descrição, aviso de edição manual e link de busca.
pub fn query_status(session: &Session, config: &AppConfig) -> Markup {
    let description = session.description();
    let search_href = session
        .search_url(&config.search_url)
        .map(|u| u.to_string())
        .ok();
    html! {
        div id="query-status" class="query-status" {
            @if session.manually_edited() {
                div class="manual-badge" {
                    "Edited by hand. "
                    button class="link-btn"
                        hx-post="/query/reset"
                        hx-target="#workspace"
                        hx-swap="outerHTML" { "Reset to generated" }
                }
            }
            @if description.is_empty() {
                p class="description hint" { "Add operators or a base query to see a description." }
            } @else {
                p class="description" { (description) }
            }
            @if let Some(href) = search_href.filter(|_| !session.final_query().trim().is_empty()) {
                a class="primary-btn" href=(href) target="_blank" rel="noopener noreferrer" {
                    "Search ↗"
                }
            }
        }
    }
}

/// Diálogo do gerador por template.
fn generator_form() -> Markup {
    html! {
        form class="generator" hx-post="/generate" hx-target="#workspace" hx-swap="outerHTML"
            hx-indicator="#generator-spinner" {
            label for="prompt" { "✦ Generate with AI" }
            input id="prompt" type="text" name="prompt" autocomplete="off"
                placeholder="e.g. find exposed .env files on acme.org";
            button type="submit" class="primary-btn" { "Generate" }
            span id="generator-spinner" class="htmx-indicator" { "Generating…" }
        }
    }
}

/// Cards dos exemplos curados.
fn examples_list() -> Markup {
    html! {
        p class="hint" {
            "Replace " code { (DEMO_DOMAIN) } " with the domain you are authorized to test."
        }
        div class="examples-grid" {
            @for (index, example) in examples_catalog::EXAMPLES.iter().enumerate() {
                div class="example-card" {
                    div class="example-header" {
                        span class="example-name" { (example.name) }
                        span class="example-ref" { (example.reference) }
                    }
                    span class="example-category" { (example.category) }
                    p { (example.description) }
                    code class="example-query" { (example.query) }
                    button class="primary-btn"
                        hx-post=(format!("/examples/{index}"))
                        hx-target="#workspace"
                        hx-swap="outerHTML"
                        data-switch-tab="builder" { "Use this dork" }
                }
            }
        }
    }
}

/// Guia de operadores agrupado por categoria.
fn guide() -> Markup {
    html! {
        @for category in catalog::list_categories() {
            div class="guide-section" {
                h3 { (category.name()) }
                p class="hint" { (category.description()) }
                table class="guide-table" {
                    @for op in catalog::list_by_category(Some(*category)) {
                        tr {
                            td { code { (op.label) } }
                            td { (op.description) }
                        }
                    }
                }
            }
        }
    }
}
