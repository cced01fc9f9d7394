//! # Operator — Definição de um Operador de Busca
//!
//! Um [`OperatorDefinition`] descreve **um modificador avançado** do motor de
//! busca (ex: `site:`, `filetype:`, `intext:`). É a unidade do catálogo —
//! imutável, declarada em tempo de compilação e nunca alterada.
//!
//! ## Campos
//!
//! | Campo | Tipo | Descrição |
//! |-------|------|-----------|
//! | `id` | `&'static str` | Chave estável e única (ex: `"site"`) |
//! | `label` | `&'static str` | Token literal emitido na query (ex: `"site:"`) |
//! | `description` | `&'static str` | Texto de ajuda, também usado como fraseado genérico |
//! | `category` | [`Category`] | Agrupamento puramente organizacional |
//!
//! ## Label + Valor
//!
//! O label é concatenado ao valor **sem separador**:
//!
//! ```text
//! "site:" + "example.com"  →  site:example.com
//! ```
//!
//! Por isso quase todos os labels terminam em `:`.

use std::fmt;

use serde::Serialize;

/// Categoria de um operador — usada apenas para filtrar a lista na interface.
///
/// A ordem das variantes é a ordem de exibição.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Busca no conteúdo da página.
    Content,
    /// Busca em URLs e domínios.
    Url,
    /// Tipos de arquivo.
    File,
    /// Metadados e informações técnicas.
    Meta,
    /// Operadores úteis para testes de segurança.
    Security,
    /// Buscas baseadas em data.
    Date,
    /// Mídia e informações (definições, clima, mapas...).
    Media,
    /// Serviços específicos do motor de busca.
    Special,
}

impl Category {
    /// Todas as categorias, na ordem de declaração.
    pub const ALL: [Category; 8] = [
        Category::Content,
        Category::Url,
        Category::File,
        Category::Meta,
        Category::Security,
        Category::Date,
        Category::Media,
        Category::Special,
    ];

    /// Identificador curto usado em formulários e na API JSON.
    pub fn id(&self) -> &'static str {
        match self {
            Category::Content => "content",
            Category::Url => "url",
            Category::File => "file",
            Category::Meta => "meta",
            Category::Security => "security",
            Category::Date => "date",
            Category::Media => "media",
            Category::Special => "special",
        }
    }

    /// Nome de exibição da categoria.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Content => "Content Search",
            Category::Url => "URL & Domain",
            Category::File => "File Types",
            Category::Meta => "Metadata & Technical",
            Category::Security => "Security",
            Category::Date => "Date & Time",
            Category::Media => "Media & Information",
            Category::Special => "Special Searches",
        }
    }

    /// Descrição curta exibida abaixo do seletor.
    pub fn description(&self) -> &'static str {
        match self {
            Category::Content => "Search within page content",
            Category::Url => "Search within URLs and domains",
            Category::File => "Search for specific file types",
            Category::Meta => "Search for technical information",
            Category::Security => "Operators useful for security testing",
            Category::Date => "Time-based searches",
            Category::Media => "Search for specific types of information",
            Category::Special => "Specific Google services",
        }
    }

    /// Resolve uma categoria a partir do seu id. Ids desconhecidos → `None`.
    pub fn from_id(id: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tipo de valor que um operador aceita.
///
/// Determina qual controle de entrada a interface mostra e quais valores
/// [`add_part`](super::part::add_part) aceita:
/// - `Date` → data `YYYY-MM-DD` (operadores `before`/`after`)
/// - `FileType` → extensão do conjunto fixo [`FILE_TYPES`] (`filetype`/`ext`)
/// - `Text` → texto livre
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Date,
    FileType,
}

/// Entrada imutável do catálogo de operadores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OperatorDefinition {
    /// Chave estável e única.
    pub id: &'static str,
    /// Token literal emitido na query.
    pub label: &'static str,
    /// Explicação legível.
    pub description: &'static str,
    /// Agrupamento organizacional.
    pub category: Category,
}

impl OperatorDefinition {
    /// Tipo de valor aceito por este operador.
    pub fn value_kind(&self) -> ValueKind {
        match self.id {
            "before" | "after" => ValueKind::Date,
            "filetype" | "ext" => ValueKind::FileType,
            _ => ValueKind::Text,
        }
    }
}

/// Extensão de arquivo oferecida para os operadores de tipo de arquivo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FileType {
    /// Valor emitido na query (ex: `"pdf"`).
    pub value: &'static str,
    /// Label de exibição (ex: `"PDF"`).
    pub label: &'static str,
}

/// Conjunto fixo de extensões aceitas por `filetype:` e `ext:`.
pub const FILE_TYPES: &[FileType] = &[
    FileType { value: "pdf", label: "PDF" },
    FileType { value: "doc", label: "DOC" },
    FileType { value: "docx", label: "DOCX" },
    FileType { value: "xls", label: "XLS" },
    FileType { value: "xlsx", label: "XLSX" },
    FileType { value: "ppt", label: "PPT" },
    FileType { value: "pptx", label: "PPTX" },
    FileType { value: "txt", label: "TXT" },
    FileType { value: "csv", label: "CSV" },
    FileType { value: "log", label: "LOG" },
    FileType { value: "sql", label: "SQL" },
    FileType { value: "xml", label: "XML" },
    FileType { value: "json", label: "JSON" },
    FileType { value: "conf", label: "CONF" },
    FileType { value: "config", label: "CONFIG" },
    FileType { value: "ini", label: "INI" },
    FileType { value: "env", label: "ENV" },
    FileType { value: "bak", label: "BAK" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ids_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_id(category.id()), Some(category));
        }
        assert_eq!(Category::from_id("nope"), None);
    }

    #[test]
    fn value_kind_follows_operator_id() {
        let before = OperatorDefinition {
            id: "before",
            label: "before:",
            description: "",
            category: Category::Date,
        };
        let ext = OperatorDefinition { id: "ext", label: "ext:", ..before };
        let site = OperatorDefinition { id: "site", label: "site:", ..before };
        assert_eq!(before.value_kind(), ValueKind::Date);
        assert_eq!(ext.value_kind(), ValueKind::FileType);
        assert_eq!(site.value_kind(), ValueKind::Text);
    }

    #[test]
    fn category_serializes_as_lowercase_id() {
        let json = serde_json::to_string(&Category::Security).unwrap();
        assert_eq!(json, "\"security\"");
    }
}
