//! # Parser Reverso de Exemplos
//!
//! Recupera a sequência de partes a partir de uma query já escrita (ex: um
//! dos [exemplos curados](crate::examples_catalog)). É uma heurística, não
//! uma gramática:
//!
//! ```text
//! "site:example.com filetype:pdf confidential"
//!   ├── site:      → "example.com"
//!   ├── filetype:  → "pdf"
//!   └── confidential  (sem operador — sobra como texto livre)
//! ```
//!
//! ## Estratégia
//!
//! 1. Para cada operador do catálogo, um padrão `label` + (`"frase"` | `\S+`)
//! 2. Todas as ocorrências de todos os padrões são coletadas com sua posição
//! 3. Ordenação pela posição na string (não pela ordem do catálogo)
//! 4. Sobreposições são descartadas: vence o início mais cedo e, em empate,
//!    o trecho mais longo — assim `intext:` não casa dentro de `allintext:`
//! 5. Aspas ao redor do valor são removidas
//! 6. Operadores negados (`-intext:"x"`) são reconhecidos, mas não viram
//!    partes: a query exclui aquele termo, não o exige
//!
//! ## Falhas
//!
//! O parser nunca falha para o chamador: se os padrões não puderem ser
//! compilados, o resultado é vazio e a string deve ser tratada como literal.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::catalog::OPERATORS;
use crate::core::DorkPart;

/// Uma ocorrência de operador na string analisada.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMatch {
    /// Trecho (em bytes) ocupado por `label + valor`.
    pub span: Range<usize>,
    /// Parte recuperada, com aspas já removidas.
    pub part: DorkPart,
    /// Precedido por `-` (o span inclui o sinal).
    pub negated: bool,
}

/// Conectivos booleanos que não são termos de busca.
const CONNECTIVES: &[&str] = &["OR", "AND", "|", "||", "-"];

/// Parser com um padrão pré-compilado por operador do catálogo.
pub struct ExampleParser {
    patterns: Vec<(&'static str, Regex)>,
}

impl ExampleParser {
    /// Compila um padrão para cada operador do catálogo.
    ///
    /// # Erros
    ///
    /// Retorna o erro do `regex` se algum padrão não compilar. Como os
    /// labels são escapados, isso não deve ocorrer na prática.
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = OPERATORS
            .iter()
            .map(|op| {
                // Valor entre aspas tem prioridade sobre a sequência sem espaços
                let pattern = format!(r#"{}("[^"]+"|\S+)"#, regex::escape(op.label));
                Regex::new(&pattern).map(|re| (op.id, re))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Todas as ocorrências não sobrepostas, na ordem em que aparecem.
    pub fn matches(&self, query: &str) -> Vec<LabelMatch> {
        let mut found: Vec<LabelMatch> = Vec::new();
        for (id, re) in &self.patterns {
            for cap in re.captures_iter(query) {
                let (Some(whole), Some(value)) = (cap.get(0), cap.get(1)) else {
                    continue;
                };
                let negated = query[..whole.start()].ends_with('-');
                let start = if negated { whole.start() - 1 } else { whole.start() };
                found.push(LabelMatch {
                    span: start..whole.end(),
                    part: DorkPart::new(*id, strip_quotes(value.as_str())),
                    negated,
                });
            }
        }

        found.sort_by(|a, b| {
            a.span
                .start
                .cmp(&b.span.start)
                .then(b.span.end.cmp(&a.span.end))
        });

        let mut kept: Vec<LabelMatch> = Vec::with_capacity(found.len());
        let mut cursor = 0;
        for m in found {
            if m.span.start >= cursor {
                cursor = m.span.end;
                kept.push(m);
            }
        }
        kept
    }

    /// Partes recuperadas de `query`, na ordem da string. Negadas ficam de fora.
    pub fn parse(&self, query: &str) -> Vec<DorkPart> {
        self.matches(query)
            .into_iter()
            .filter(|m| !m.negated)
            .map(|m| m.part)
            .collect()
    }

    /// Texto que sobra após remover todas as ocorrências de operadores.
    ///
    /// Espaços são normalizados (`"a  site:x   b"` → `"a b"`) e conectivos
    /// como `OR`, `AND` e `|` são descartados.
    pub fn residual(&self, query: &str) -> String {
        let mut rest = String::with_capacity(query.len());
        let mut cursor = 0;
        for m in self.matches(query) {
            rest.push_str(&query[cursor..m.span.start]);
            rest.push(' ');
            cursor = m.span.end;
        }
        rest.push_str(&query[cursor..]);
        rest.split_whitespace()
            .filter(|w| !CONNECTIVES.contains(w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Remove um par de aspas envolvendo o valor, se houver.
fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parser compartilhado. `None` se a compilação dos padrões falhou.
pub fn shared() -> Option<&'static ExampleParser> {
    static PARSER: OnceLock<Option<ExampleParser>> = OnceLock::new();
    PARSER
        .get_or_init(|| match ExampleParser::new() {
            Ok(parser) => Some(parser),
            Err(e) => {
                tracing::error!(error = %e, "Falha ao compilar padrões do parser");
                None
            }
        })
        .as_ref()
}

/// Recupera as partes de uma query de exemplo. Nunca falha: em erro, vazio.
pub fn parse_example(query: &str) -> Vec<DorkPart> {
    shared().map(|p| p.parse(query)).unwrap_or_default()
}

/// Texto livre que sobra em `query` fora dos operadores reconhecidos.
pub fn residual_text(query: &str) -> String {
    match shared() {
        Some(p) => p.residual(query),
        None => query.trim().to_string(),
    }
}
