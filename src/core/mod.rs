//! # Módulo Core — Catálogo e Partes
//!
//! Tipos fundamentais sobre os quais todo o resto é construído:
//!
//! - [`OperatorDefinition`] — entrada imutável do catálogo (`site:`, `filetype:`...)
//! - [`Category`] — agrupamento organizacional dos operadores
//! - [`DorkPart`] — um operador aplicado com seu valor
//! - [`DorkError`] — erros das poucas operações falíveis
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use crate::core::{catalog, part, DorkPart};
//!
//! let mut parts = Vec::new();
//! part::add_part(&mut parts, "site", "example.com");
//! part::add_part(&mut parts, "filetype", "pdf");
//!
//! let site = catalog::lookup("site");
//! ```

/// Tabela estática de operadores, categorias e extensões.
pub mod catalog;

/// Erros do núcleo ([`DorkError`]).
pub mod error;

/// Definições de operador, categoria e tipo de arquivo.
pub mod operator;

/// [`DorkPart`] e as operações sobre a sequência de partes.
pub mod part;

pub use error::DorkError;
pub use operator::{Category, FileType, OperatorDefinition, ValueKind};
pub use part::DorkPart;
