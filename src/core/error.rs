//! Erros das operações do núcleo.
//!
//! Quase nada no núcleo falha: entradas incompletas são recusadas com `false`,
//! ids desconhecidos são pulados e datas inválidas só degradam o texto. As
//! poucas operações falíveis retornam [`DorkError`].

/// Erros das operações sobre a sequência de partes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DorkError {
    /// Índice fora do intervalo `0..len` em [`remove_part`](super::part::remove_part).
    #[error("index {index} out of range for {len} parts")]
    IndexOutOfRange { index: usize, len: usize },

    /// Id de operador que não existe no catálogo.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
}
