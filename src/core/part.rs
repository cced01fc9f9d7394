//! # DorkPart — Um Operador Aplicado
//!
//! Um [`DorkPart`] é um par `(operador, valor)` escolhido pelo usuário. A
//! sequência de partes é ordenada por inserção, e essa ordem é **semântica**:
//! define a ordem dos operadores na query final e na descrição gerada.
//!
//! ## Ciclo de Vida
//!
//! ```text
//! add_part()        → anexa ao final (nunca reordena, nunca deduplica)
//! remove_part(i)    → remove exatamente a parte i
//! clear_all_parts() → sequência vazia
//! ```
//!
//! ## Regras de Aceitação
//!
//! | Tipo de operador | Aceita quando |
//! |------------------|---------------|
//! | Texto | id e valor não vazios |
//! | Data (`before`/`after`) | há uma data informada |
//! | Arquivo (`filetype`/`ext`) | valor pertence a [`FILE_TYPES`](super::operator::FILE_TYPES) |
//!
//! Entradas recusadas não são erros — a ação é simplesmente ignorada.

use serde::{Deserialize, Serialize};

use super::catalog;
use super::error::DorkError;
use super::operator::ValueKind;

/// Instância de um operador aplicado.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DorkPart {
    /// Referência a [`OperatorDefinition::id`](super::operator::OperatorDefinition::id).
    pub operator_id: String,
    /// Valor livre informado pelo usuário.
    pub value: String,
}

impl DorkPart {
    /// Cria uma parte sem validação (usada pelo parser e pelos testes).
    pub fn new(operator_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            operator_id: operator_id.into(),
            value: value.into(),
        }
    }
}

/// Anexa uma parte ao final da sequência, se a entrada estiver completa.
///
/// Retorna `true` quando a parte foi adicionada. O valor é armazenado sem
/// espaços nas bordas.
pub fn add_part(parts: &mut Vec<DorkPart>, operator_id: &str, value: &str) -> bool {
    let operator_id = operator_id.trim();
    let value = value.trim();
    if operator_id.is_empty() || value.is_empty() {
        return false;
    }

    // Ids fora do catálogo são aceitos aqui e pulados na montagem.
    let kind = catalog::lookup(operator_id)
        .map(|def| def.value_kind())
        .unwrap_or(ValueKind::Text);
    if kind == ValueKind::FileType && !catalog::is_file_type(value) {
        tracing::debug!(operator = %operator_id, value = %value, "Extensão fora do conjunto aceito");
        return false;
    }

    parts.push(DorkPart::new(operator_id, value));
    true
}

/// Remove a parte no índice `index`, preservando a ordem das demais.
///
/// # Erros
///
/// [`DorkError::IndexOutOfRange`] se `index >= parts.len()` — a sequência
/// fica intacta.
pub fn remove_part(parts: &mut Vec<DorkPart>, index: usize) -> Result<DorkPart, DorkError> {
    if index >= parts.len() {
        return Err(DorkError::IndexOutOfRange {
            index,
            len: parts.len(),
        });
    }
    Ok(parts.remove(index))
}

/// Esvazia a sequência.
pub fn clear_all_parts(parts: &mut Vec<DorkPart>) {
    parts.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DorkPart> {
        vec![
            DorkPart::new("site", "example.com"),
            DorkPart::new("filetype", "pdf"),
            DorkPart::new("intext", "secret"),
        ]
    }

    #[test]
    fn add_appends_in_order() {
        let mut parts = Vec::new();
        assert!(add_part(&mut parts, "site", "example.com"));
        assert!(add_part(&mut parts, "intext", "admin"));
        assert_eq!(
            parts,
            vec![DorkPart::new("site", "example.com"), DorkPart::new("intext", "admin")]
        );
    }

    #[test]
    fn add_allows_duplicates() {
        let mut parts = Vec::new();
        assert!(add_part(&mut parts, "site", "a.com"));
        assert!(add_part(&mut parts, "site", "a.com"));
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn add_rejects_incomplete_input() {
        let mut parts = Vec::new();
        assert!(!add_part(&mut parts, "", "value"));
        assert!(!add_part(&mut parts, "site", ""));
        assert!(!add_part(&mut parts, "site", "   "));
        assert!(!add_part(&mut parts, "before", ""));
        assert!(parts.is_empty());
    }

    #[test]
    fn add_trims_value() {
        let mut parts = Vec::new();
        assert!(add_part(&mut parts, "site", "  example.com "));
        assert_eq!(parts[0].value, "example.com");
    }

    #[test]
    fn file_type_requires_known_extension() {
        let mut parts = Vec::new();
        assert!(!add_part(&mut parts, "filetype", "exe"));
        assert!(!add_part(&mut parts, "ext", "PDF"));
        assert!(add_part(&mut parts, "filetype", "pdf"));
        assert!(add_part(&mut parts, "ext", "bak"));
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn date_operator_accepts_present_date() {
        let mut parts = Vec::new();
        assert!(add_part(&mut parts, "after", "2020-01-31"));
        assert_eq!(parts[0], DorkPart::new("after", "2020-01-31"));
    }

    #[test]
    fn remove_each_valid_index_keeps_relative_order() {
        let original = sample();
        for i in 0..original.len() {
            let mut parts = original.clone();
            let removed = remove_part(&mut parts, i).unwrap();
            assert_eq!(removed, original[i]);
            assert_eq!(parts.len(), original.len() - 1);
            let expected: Vec<_> = original
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, p)| p.clone())
                .collect();
            assert_eq!(parts, expected);
        }
    }

    #[test]
    fn remove_out_of_range_is_error_and_no_op() {
        let mut parts = sample();
        let err = remove_part(&mut parts, 3).unwrap_err();
        assert_eq!(err, DorkError::IndexOutOfRange { index: 3, len: 3 });
        assert_eq!(parts, sample());
    }

    #[test]
    fn clear_empties_sequence() {
        let mut parts = sample();
        clear_all_parts(&mut parts);
        assert!(parts.is_empty());
    }
}
