//! # Sessão — Estado Transitório do Construtor
//!
//! Uma única [`Session`] por processo, mantida em memória e nunca
//! persistida. Ela aplica os eventos do usuário ao núcleo e decide o que
//! fica registrado como query final.
//!
//! ## Máquina de Estados
//!
//! ```text
//!                 edit_final_query()
//!   ┌──────────┐ ───────────────────────► ┌──────────────┐
//!   │ Derivada │                          │ Editada à mão │
//!   │ (render) │ ◄─────────────────────── │  (literal)    │
//!   └──────────┘   reset_to_generated()   └──────────────┘
//!        ▲                                       ▲
//!        │ use_example() com partes              │ geração concluída
//!        │                                       │ use_example() sem partes
//! ```
//!
//! | Estado | `final_query` | Descrição |
//! |--------|---------------|-----------|
//! | Derivada | `render(base, partes)` a cada mudança | `describe(base, partes)` |
//! | Editada à mão | texto literal, não é sobrescrito | derivada do próprio texto literal |
//!
//! Enquanto a query está editada à mão (inclusive após uma geração), a
//! descrição é calculada a partir do texto literal: partes recuperadas pelo
//! parser mais o texto livre restante, sem conectivos como `OR` e sem
//! operadores negados. No estado derivado ela descreve `(base, partes)`;
//! após `use_example`, o texto livre do exemplo fica fora da descrição.

use serde::Serialize;
use url::Url;

use crate::core::{part, DorkPart};
use crate::generator::{GenerationTicket, GenerationTracker};
use crate::query::parser::residual_text;
use crate::query::{describe, parse_example, render};

/// Estado de edição de uma sessão do construtor.
#[derive(Clone, Debug, Default)]
pub struct Session {
    base_query: String,
    parts: Vec<DorkPart>,
    final_query: String,
    manually_edited: bool,
    generation: GenerationTracker,
}

/// Fotografia serializável da sessão (usada por `GET /api/session`).
#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot {
    pub base_query: String,
    pub parts: Vec<DorkPart>,
    pub final_query: String,
    pub manually_edited: bool,
    pub description: String,
    pub generation_pending: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_query(&self) -> &str {
        &self.base_query
    }

    pub fn parts(&self) -> &[DorkPart] {
        &self.parts
    }

    pub fn final_query(&self) -> &str {
        &self.final_query
    }

    pub fn manually_edited(&self) -> bool {
        self.manually_edited
    }

    pub fn generation_pending(&self) -> bool {
        self.generation.pending().is_some()
    }

    /// Recalcula a query final, exceto quando ela foi editada à mão.
    fn refresh(&mut self) {
        if !self.manually_edited {
            self.final_query = render(&self.base_query, &self.parts);
        }
    }

    pub fn set_base_query(&mut self, text: &str) {
        self.base_query = text.to_string();
        self.refresh();
    }

    /// Adiciona uma parte. Retorna `false` se a entrada estava incompleta.
    pub fn add_part(&mut self, operator_id: &str, value: &str) -> bool {
        let added = part::add_part(&mut self.parts, operator_id, value);
        if added {
            tracing::debug!(operator = %operator_id, total = self.parts.len(), "Parte adicionada");
            self.refresh();
        }
        added
    }

    /// Remove a parte em `index`. Índice inválido é ignorado com um aviso.
    pub fn remove_part(&mut self, index: usize) -> Option<DorkPart> {
        match part::remove_part(&mut self.parts, index) {
            Ok(removed) => {
                self.refresh();
                Some(removed)
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "Remoção ignorada");
                None
            }
        }
    }

    pub fn clear_all_parts(&mut self) {
        part::clear_all_parts(&mut self.parts);
        self.refresh();
    }

    /// Substitui a query final pelo texto do usuário e congela a derivação.
    pub fn edit_final_query(&mut self, text: &str) {
        self.final_query = text.to_string();
        self.manually_edited = true;
    }

    /// Volta a derivar a query final de `(base, partes)`.
    pub fn reset_to_generated(&mut self) {
        self.manually_edited = false;
        self.refresh();
    }

    /// Carrega uma query de exemplo.
    ///
    /// As partes passam a ser as recuperadas pelo parser, a base é limpa e a
    /// query final recebe o texto literal do exemplo. Se nada for
    /// reconhecido, a query fica marcada como editada à mão.
    pub fn use_example(&mut self, query: &str) {
        self.parts = parse_example(query);
        self.base_query.clear();
        self.final_query = query.to_string();
        self.manually_edited = self.parts.is_empty();
        tracing::info!(parts = self.parts.len(), "Exemplo carregado");
    }

    /// Registra um novo pedido de geração, invalidando qualquer anterior.
    pub fn begin_generation(&mut self) -> GenerationTicket {
        let ticket = self.generation.issue();
        tracing::info!(ticket = ticket.0, "Geração iniciada");
        ticket
    }

    /// Aplica o resultado de uma geração, se o ticket ainda for o mais recente.
    ///
    /// O resultado vira a query final e fica marcado como editado à mão.
    /// Retorna `false` quando o resultado foi descartado.
    pub fn finish_generation(&mut self, ticket: GenerationTicket, query: String) -> bool {
        if !self.generation.settle(ticket) {
            tracing::info!(ticket = ticket.0, "Resultado de geração obsoleto descartado");
            return false;
        }
        self.final_query = query;
        self.manually_edited = true;
        true
    }

    /// Encerra um pedido cujo resultado nunca vai chegar.
    pub fn abandon_generation(&mut self, ticket: GenerationTicket) {
        self.generation.abandon(ticket);
    }

    /// Descrição em linguagem natural do que a query final vai buscar.
    pub fn description(&self) -> String {
        if self.manually_edited {
            let parts = parse_example(&self.final_query);
            describe(&residual_text(&self.final_query), &parts)
        } else {
            describe(&self.base_query, &self.parts)
        }
    }

    /// URL de busca com a query final no parâmetro `q`.
    ///
    /// # Erros
    ///
    /// Retorna o erro do `url` se `engine` não for uma URL absoluta.
    pub fn search_url(&self, engine: &str) -> Result<Url, url::ParseError> {
        Url::parse_with_params(engine, &[("q", self.final_query.as_str())])
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            base_query: self.base_query.clone(),
            parts: self.parts.clone(),
            final_query: self.final_query.clone(),
            manually_edited: self.manually_edited,
            description: self.description(),
            generation_pending: self.generation_pending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;

    #[test]
    fn final_query_follows_parts() {
        let mut s = Session::new();
        s.set_base_query("foo");
        assert!(s.add_part("site", "example.com"));
        assert!(s.add_part("filetype", "pdf"));
        assert_eq!(s.final_query(), "foo site:example.com filetype:pdf");

        s.remove_part(0);
        assert_eq!(s.final_query(), "foo filetype:pdf");

        s.clear_all_parts();
        assert_eq!(s.final_query(), "foo");
    }

    #[test]
    fn incomplete_input_is_declined() {
        let mut s = Session::new();
        assert!(!s.add_part("site", "   "));
        assert!(!s.add_part("filetype", "exe"));
        assert!(s.parts().is_empty());
    }

    #[test]
    fn invalid_remove_is_noop() {
        let mut s = Session::new();
        s.add_part("site", "a.com");
        assert_eq!(s.remove_part(5), None);
        assert_eq!(s.parts().len(), 1);
        assert_eq!(s.final_query(), "site:a.com");
    }

    #[test]
    fn manual_edit_freezes_final_query() {
        let mut s = Session::new();
        s.add_part("site", "a.com");
        s.edit_final_query("my own query");
        s.add_part("filetype", "pdf");
        assert_eq!(s.final_query(), "my own query");
        assert!(s.manually_edited());

        s.reset_to_generated();
        assert!(!s.manually_edited());
        assert_eq!(s.final_query(), "site:a.com filetype:pdf");
    }

    #[test]
    fn description_tracks_literal_after_manual_edit() {
        let mut s = Session::new();
        s.add_part("site", "a.com");
        s.edit_final_query("site:example.com");
        assert_eq!(
            s.description(),
            "This search will find pages that are only on the website example.com."
        );
    }

    #[test]
    fn description_of_free_text_edit() {
        let mut s = Session::new();
        s.edit_final_query("secret");
        assert_eq!(s.description(), r#"This search will find pages containing "secret"."#);
    }

    #[test]
    fn use_example_recovers_parts() {
        let mut s = Session::new();
        s.set_base_query("leftover");
        s.use_example("site:example.com filetype:pdf confidential");
        assert_eq!(s.base_query(), "");
        assert_eq!(s.parts().len(), 2);
        assert_eq!(s.final_query(), "site:example.com filetype:pdf confidential");
        assert!(!s.manually_edited());
    }

    #[test]
    fn use_example_without_operators_is_literal() {
        let mut s = Session::new();
        s.use_example("plain words only");
        assert!(s.parts().is_empty());
        assert!(s.manually_edited());
        assert_eq!(s.final_query(), "plain words only");
    }

    #[test]
    fn superseded_generation_commits_latest_only() {
        let mut s = Session::new();
        let a = s.begin_generation();
        let b = s.begin_generation();
        assert!(s.generation_pending());

        assert!(s.finish_generation(b, "site:b.com".into()));
        assert!(!s.finish_generation(a, "site:a.com".into()));

        assert_eq!(s.final_query(), "site:b.com");
        assert!(s.manually_edited());
        assert!(!s.generation_pending());
    }

    #[test]
    fn stale_result_arriving_first_is_discarded() {
        let mut s = Session::new();
        let a = s.begin_generation();
        let b = s.begin_generation();
        assert!(!s.finish_generation(a, "site:a.com".into()));
        assert_eq!(s.final_query(), "");
        assert!(s.finish_generation(b, "site:b.com".into()));
        assert_eq!(s.final_query(), "site:b.com");
    }

    #[test]
    fn generated_query_description_skips_connectives_and_exclusions() {
        let mut s = Session::new();
        let ticket = s.begin_generation();
        assert!(s.finish_generation(ticket, generate("exposed api keys on acme.org")));

        let text = s.description();
        assert!(text.starts_with("This search will find pages that are only on the website acme.org"));
        assert!(text.contains(r#"with content containing "api_key""#));
        assert!(!text.contains("containing \"OR"));
        assert!(!text.contains(r#""example""#));
    }

    #[test]
    fn generated_backup_query_has_no_base_text() {
        let mut s = Session::new();
        let ticket = s.begin_generation();
        assert!(s.finish_generation(ticket, generate("database dumps on acme.org")));

        let text = s.description();
        assert!(text.contains("that are SQL files"));
        assert!(!text.contains("containing \""));
    }

    #[test]
    fn abandoned_generation_is_not_pending() {
        let mut s = Session::new();
        let ticket = s.begin_generation();
        s.abandon_generation(ticket);
        assert!(!s.generation_pending());
        assert_eq!(s.final_query(), "");
    }

    #[test]
    fn search_url_encodes_query() {
        let mut s = Session::new();
        s.edit_final_query(r#"intitle:"index of" site:a.com"#);
        let url = s.search_url("https://www.google.com/search").unwrap();
        let q = url.query_pairs().find(|(k, _)| k == "q").map(|(_, v)| v.into_owned());
        assert_eq!(q.as_deref(), Some(r#"intitle:"index of" site:a.com"#));
        assert!(s.search_url("not a url").is_err());
    }

    #[test]
    fn snapshot_carries_description() {
        let mut s = Session::new();
        s.add_part("site", "example.com");
        let snap = s.snapshot();
        assert_eq!(snap.final_query, "site:example.com");
        assert!(snap.description.starts_with("This search will"));
        assert!(!snap.generation_pending);
    }
}
