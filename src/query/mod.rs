//! # Módulo Query — Montagem, Descrição e Parsing
//!
//! As três transformações puras sobre `(base, partes)`:
//!
//! ```text
//!                 ┌──────────────┐
//!  (base, partes) │  assembler   │──► "foo site:example.com filetype:pdf"
//!        │        └──────────────┘
//!        │        ┌──────────────┐
//!        └───────►│  describe    │──► "This search will find pages ..."
//!                 └──────────────┘
//!                 ┌──────────────┐
//!  query escrita ►│   parser     │──► [site:example.com, filetype:pdf]
//!                 └──────────────┘
//! ```
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`assembler`] | `render(base, partes)` → query final |
//! | [`describe`] | `describe(base, partes)` → frase em linguagem natural |
//! | [`parser`] | `parse_example(query)` → partes recuperadas |

pub mod assembler;
pub mod describe;
pub mod parser;

pub use assembler::render;
pub use describe::describe;
pub use parser::parse_example;
