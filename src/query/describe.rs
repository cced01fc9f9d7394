//! # Gerador de Descrições — A Query em Linguagem Natural
//!
//! Traduz `(base, partes)` em **uma frase** que explica o que a busca vai
//! encontrar. É a mesma entrada do [montador](super::assembler), lida de
//! outra forma:
//!
//! ```text
//! base = "secret", partes = [site:example.com, filetype:pdf]
//!   ↓
//! This search will find pages containing "secret" that are only on the
//! website example.com and that are PDF files.
//! ```
//!
//! ## Tabela de Fraseado
//!
//! Cada operador tem uma regra fixa em [`PHRASINGS`], indexada pelo id.
//! As regras são variantes de [`Phrasing`]:
//!
//! | Variante | Forma | Exemplo |
//! |----------|-------|---------|
//! | `Plain` | `prefixo valor` | `only on the website example.com` |
//! | `Quoted` | `prefixo "valor"` | `with page titles containing "login"` |
//! | `FileType` | `that are VALOR files` | `that are PDF files` |
//! | `Date` | `prefixo Mês D, AAAA` | `published before March 5, 2020` |
//! | `Around` | fixa | `where terms appear within 3 words of each other` |
//! | `Clause` | oração completa | `show Google's cached version of a.com` |
//!
//! Operadores sem regra usam a descrição do catálogo em minúsculas seguida
//! do valor entre aspas.
//!
//! ## Montagem da Frase
//!
//! ```text
//! "This search will"
//!   ├── com base:  + ' find pages containing "<base>"'
//!   ├── sem base, 1ª frase é Clause (cache): + " <frase>"
//!   └── sem base:  + " find pages"
//! lista de frases:
//!   1ª      → " that are <frase>"   (ou " <frase>" se já começa com "that ")
//!   meio    → ", <frase>"
//!   última  → " and <frase>"        (só quando há 2 ou mais)
//! + "."
//! ```
//!
//! Exatamente um "that are" introduz a lista. Determinístico e sem efeitos.

use chrono::NaiveDate;

use crate::core::{catalog, DorkPart, OperatorDefinition};

/// Regra de fraseado de um operador.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phrasing {
    /// `"<prefixo> <valor>"`.
    Plain(&'static str),
    /// `"<prefixo> \"<valor>\""`.
    Quoted(&'static str),
    /// `"that are <VALOR> files"`, valor em maiúsculas.
    FileType,
    /// `"<prefixo> <Mês D, AAAA>"`, ou o valor literal se a data não for válida.
    Date(&'static str),
    /// `"where terms appear within <valor> words of each other"`.
    Around,
    /// Oração completa que dispensa o "find pages" quando abre a frase.
    Clause(&'static str),
}

/// Regras de fraseado indexadas pelo id do operador.
pub const PHRASINGS: &[(&str, Phrasing)] = &[
    ("site", Phrasing::Plain("only on the website")),
    ("filetype", Phrasing::FileType),
    ("ext", Phrasing::FileType),
    ("inurl", Phrasing::Quoted("with URLs containing")),
    ("allinurl", Phrasing::Quoted("with URLs containing all of these terms:")),
    ("intitle", Phrasing::Quoted("with page titles containing")),
    ("allintitle", Phrasing::Quoted("with page titles containing all of these terms:")),
    ("intext", Phrasing::Quoted("with content containing")),
    ("allintext", Phrasing::Quoted("with content containing all of these terms:")),
    ("cache", Phrasing::Clause("show Google's cached version of")),
    ("link", Phrasing::Plain("that link to")),
    ("related", Phrasing::Plain("that are related to")),
    ("info", Phrasing::Plain("showing information about")),
    ("define", Phrasing::Quoted("showing the definition of")),
    ("before", Phrasing::Date("published before")),
    ("after", Phrasing::Date("published after")),
    ("around", Phrasing::Around),
    ("source", Phrasing::Plain("from the news source")),
    ("location", Phrasing::Plain("from the location")),
    ("safesearch", Phrasing::Plain("with SafeSearch")),
    ("stocks", Phrasing::Plain("showing stock information for")),
    ("weather", Phrasing::Plain("showing weather information for")),
    ("map", Phrasing::Plain("showing a map of")),
    ("movie", Phrasing::Quoted("showing information about the movie")),
    ("book", Phrasing::Quoted("showing information about the book")),
    ("author", Phrasing::Plain("written by")),
    ("intitle_index", Phrasing::Quoted("with directory listings containing")),
    ("error_messages", Phrasing::Quoted("containing error messages with")),
    ("login_pages", Phrasing::Quoted("with login or admin pages containing")),
    ("config_files", Phrasing::Quoted("with configuration files containing")),
    ("exposed_logs", Phrasing::Quoted("with log files containing")),
    ("db_files", Phrasing::Quoted("with database files containing")),
    ("robots_txt", Phrasing::Quoted("with robots.txt files containing")),
    ("sql_errors", Phrasing::Quoted("with SQL error messages containing")),
    ("env_files", Phrasing::Quoted("with environment files containing credentials like")),
];

/// Fragmento de frase produzido para uma parte.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Phrase {
    text: String,
    /// `true` para orações completas (hoje só `cache:`).
    clause: bool,
}

/// Regra de fraseado de um operador, se houver uma específica.
pub fn phrasing_for(operator_id: &str) -> Option<Phrasing> {
    PHRASINGS
        .iter()
        .find(|(id, _)| *id == operator_id)
        .map(|(_, phrasing)| *phrasing)
}

/// Formata `YYYY-MM-DD` como `Month D, YYYY`. Datas inválidas → `None`.
pub fn format_date(value: &str) -> Option<String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%B %-d, %Y").to_string())
}

fn phrase(def: &OperatorDefinition, value: &str) -> Phrase {
    let plain = |text: String| Phrase { text, clause: false };
    match phrasing_for(def.id) {
        Some(Phrasing::Plain(prefix)) => plain(format!("{} {}", prefix, value)),
        Some(Phrasing::Quoted(prefix)) => plain(format!("{} \"{}\"", prefix, value)),
        Some(Phrasing::FileType) => plain(format!("that are {} files", value.to_uppercase())),
        Some(Phrasing::Date(prefix)) => {
            // Data inválida só degrada o texto.
            let date = format_date(value).unwrap_or_else(|| value.to_string());
            plain(format!("{} {}", prefix, date))
        }
        Some(Phrasing::Around) => plain(format!(
            "where terms appear within {} words of each other",
            value
        )),
        Some(Phrasing::Clause(prefix)) => Phrase {
            text: format!("{} {}", prefix, value),
            clause: true,
        },
        None => plain(format!(
            "{} \"{}\"",
            def.description.to_lowercase(),
            value
        )),
    }
}

/// Anexa as frases a partir de `start`, com ", " no meio e " and " na última.
fn join_tail(out: &mut String, phrases: &[Phrase], start: usize) {
    let last = phrases.len().saturating_sub(1);
    for (i, p) in phrases.iter().enumerate().skip(start) {
        if i == 0 {
            if p.text.starts_with("that ") {
                out.push(' ');
            } else {
                out.push_str(" that are ");
            }
        } else if i == last {
            out.push_str(" and ");
        } else {
            out.push_str(", ");
        }
        out.push_str(&p.text);
    }
}

/// Gera a frase descritiva de `(base, partes)`.
///
/// Retorna string vazia quando a base está vazia e nenhuma parte é resolvida.
pub fn describe(base_query: &str, parts: &[DorkPart]) -> String {
    let base = base_query.trim();
    let phrases: Vec<Phrase> = catalog::resolve(parts)
        .map(|(def, value)| phrase(def, value))
        .collect();

    if phrases.is_empty() && base.is_empty() {
        return String::new();
    }

    let mut description = String::from("This search will");

    if !base.is_empty() {
        description.push_str(&format!(" find pages containing \"{}\"", base));
        join_tail(&mut description, &phrases, 0);
    } else if phrases[0].clause {
        description.push(' ');
        description.push_str(&phrases[0].text);
        join_tail(&mut description, &phrases, 1);
    } else {
        description.push_str(" find pages");
        join_tail(&mut description, &phrases, 0);
    }

    description.push('.');
    description
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str, value: &str) -> DorkPart {
        DorkPart::new(id, value)
    }

    #[test]
    fn empty_inputs_describe_nothing() {
        assert_eq!(describe("", &[]), "");
        assert_eq!(describe("   ", &[]), "");
        assert_eq!(describe("", &[p("bogus", "x")]), "");
    }

    #[test]
    fn single_site_without_base() {
        assert_eq!(
            describe("", &[p("site", "example.com")]),
            "This search will find pages that are only on the website example.com."
        );
    }

    #[test]
    fn base_only() {
        assert_eq!(
            describe("secret", &[]),
            "This search will find pages containing \"secret\"."
        );
    }

    #[test]
    fn file_type_phrase_is_not_doubled() {
        let text = describe("secret", &[p("filetype", "pdf")]);
        assert_eq!(
            text,
            "This search will find pages containing \"secret\" that are PDF files."
        );
        assert_eq!(text.matches("that are").count(), 1);
    }

    #[test]
    fn two_phrases_join_with_and() {
        assert_eq!(
            describe("secret", &[p("site", "example.com"), p("filetype", "pdf")]),
            "This search will find pages containing \"secret\" that are only on the \
             website example.com and that are PDF files."
        );
    }

    #[test]
    fn three_phrases_use_comma_then_and() {
        assert_eq!(
            describe(
                "",
                &[
                    p("site", "example.com"),
                    p("intitle", "login"),
                    p("ext", "bak"),
                ]
            ),
            "This search will find pages that are only on the website example.com, \
             with page titles containing \"login\" and that are BAK files."
        );
    }

    #[test]
    fn leading_that_phrase_skips_that_are() {
        assert_eq!(
            describe("", &[p("link", "example.com")]),
            "This search will find pages that link to example.com."
        );
    }

    #[test]
    fn cache_first_is_a_complete_clause() {
        assert_eq!(
            describe("", &[p("cache", "example.com")]),
            "This search will show Google's cached version of example.com."
        );
        assert_eq!(
            describe("", &[p("cache", "example.com"), p("intext", "admin")]),
            "This search will show Google's cached version of example.com and \
             with content containing \"admin\"."
        );
    }

    #[test]
    fn date_is_formatted_as_month_day_year() {
        assert_eq!(
            describe("", &[p("before", "2020-03-05")]),
            "This search will find pages that are published before March 5, 2020."
        );
    }

    #[test]
    fn invalid_date_falls_back_to_raw_value() {
        assert_eq!(
            describe("", &[p("after", "last tuesday")]),
            "This search will find pages that are published after last tuesday."
        );
        assert_eq!(format_date("2021-02-30"), None);
    }

    #[test]
    fn around_phrase() {
        assert_eq!(
            describe("cats dogs", &[p("around", "3")]),
            "This search will find pages containing \"cats dogs\" that are where terms \
             appear within 3 words of each other."
        );
    }

    #[test]
    fn operator_without_rule_uses_catalog_description() {
        assert_eq!(
            describe("", &[p("jenkins", "ci")]),
            "This search will find pages that are find jenkins dashboards \"ci\"."
        );
    }

    #[test]
    fn unknown_parts_are_skipped() {
        assert_eq!(
            describe("", &[p("bogus", "x"), p("site", "a.com")]),
            "This search will find pages that are only on the website a.com."
        );
    }

    #[test]
    fn every_phrasing_refers_to_a_catalog_operator() {
        for (id, _) in PHRASINGS {
            assert!(catalog::lookup(id).is_some(), "regra órfã: {}", id);
        }
    }
}
