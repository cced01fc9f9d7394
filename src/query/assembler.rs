//! # Montador de Query
//!
//! Combina a query base (texto livre) com a sequência de partes em uma única
//! string de busca.
//!
//! ## Algoritmo
//!
//! ```text
//! dork = base.trim()
//! para cada parte (na ordem de inserção):
//!   operador desconhecido → pula
//!   se dork não vazio     → dork += " "
//!   dork += label + valor            (sem separador: "site:" + "a.com")
//! ```
//!
//! [`render()`] é uma função pura — mesmas entradas, mesma saída — e nunca
//! toca o estado da sessão.

use crate::core::{catalog, DorkPart};

/// Monta a query final a partir da base e das partes.
pub fn render(base_query: &str, parts: &[DorkPart]) -> String {
    let mut dork = base_query.trim().to_string();

    for (def, value) in catalog::resolve(parts) {
        if !dork.is_empty() {
            dork.push(' ');
        }
        dork.push_str(def.label);
        dork.push_str(value);
    }

    dork
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_render_empty() {
        assert_eq!(render("", &[]), "");
    }

    #[test]
    fn base_only() {
        assert_eq!(render("foo", &[]), "foo");
        assert_eq!(render("   foo  ", &[]), "foo");
    }

    #[test]
    fn single_part_without_base() {
        let parts = vec![DorkPart::new("site", "example.com")];
        assert_eq!(render("", &parts), "site:example.com");
    }

    #[test]
    fn base_and_parts_in_order() {
        let parts = vec![
            DorkPart::new("site", "example.com"),
            DorkPart::new("filetype", "pdf"),
        ];
        assert_eq!(render("foo", &parts), "foo site:example.com filetype:pdf");
    }

    #[test]
    fn unknown_operator_is_skipped() {
        let parts = vec![
            DorkPart::new("bogus", "x"),
            DorkPart::new("intitle", "login"),
        ];
        assert_eq!(render("", &parts), "intitle:login");
    }

    #[test]
    fn multi_token_labels_are_emitted_verbatim() {
        let parts = vec![
            DorkPart::new("around", "3"),
            DorkPart::new("intitle_index", "backup"),
        ];
        assert_eq!(render("a b", &parts), "a b AROUND(n)3 intitle:\"index of\"backup");
    }

    #[test]
    fn render_is_referentially_transparent() {
        let parts = vec![
            DorkPart::new("site", "example.com"),
            DorkPart::new("before", "2020-01-01"),
        ];
        let first = render("report", &parts);
        let second = render("report", &parts);
        assert_eq!(first, second);
    }
}
