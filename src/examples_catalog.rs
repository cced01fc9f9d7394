//! # Exemplos Curados
//!
//! Queries prontas exibidas na aba de exemplos. Ao escolher uma, a sessão
//! tenta recuperar as partes com o [parser reverso](crate::query::parser)
//! para que a descrição possa ser gerada.
//!
//! Todos os exemplos usam `example.com` como domínio de demonstração. A
//! interface destaca esse trecho para lembrar o usuário de trocá-lo.

use serde::Serialize;

/// Uma query de exemplo com metadados de exibição.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ExampleDork {
    pub name: &'static str,
    pub query: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    /// Código de referência exibido no card (ex: `"SEC-1.2"`).
    pub reference: &'static str,
}

/// Domínio de demonstração destacado na interface.
pub const DEMO_DOMAIN: &str = "example.com";

pub const EXAMPLES: &[ExampleDork] = &[
    ExampleDork {
        name: "Exposed Documents",
        query: "site:example.com filetype:pdf confidential",
        description: "Find confidential PDF documents on a specific domain",
        category: "Security",
        reference: "SEC-1.2",
    },
    ExampleDork {
        name: "Directory Listings",
        query: "intitle:\"Index of\" site:example.com",
        description: "Find open directory listings on a specific domain",
        category: "Reconnaissance",
        reference: "REC-2.1",
    },
    ExampleDork {
        name: "Login Pages",
        query: "inurl:login site:example.com",
        description: "Find login pages on a specific domain",
        category: "Authentication",
        reference: "AUTH-3.4",
    },
    ExampleDork {
        name: "Configuration Files",
        query: "site:example.com filetype:xml | filetype:conf | filetype:cnf | filetype:reg | \
                filetype:inf | filetype:rdp | filetype:cfg | filetype:txt | filetype:ora | filetype:ini",
        description: "Find configuration files on a specific domain",
        category: "Configuration",
        reference: "CONF-4.3",
    },
    ExampleDork {
        name: "Database Files",
        query: "site:example.com filetype:sql | filetype:dbf | filetype:mdb",
        description: "Find database files on a specific domain",
        category: "Database",
        reference: "DB-5.2",
    },
    ExampleDork {
        name: "Exposed Environment Files",
        query: "site:example.com filetype:env \"DB_PASSWORD\" | \"API_KEY\" | \"SECRET\"",
        description: "Find environment files with potential credentials",
        category: "Security",
        reference: "SEC-6.1",
    },
    ExampleDork {
        name: "SQL Error Messages",
        query: "site:example.com intext:\"sql syntax near\" | intext:\"syntax error has occurred\" | \
                intext:\"incorrect syntax near\"",
        description: "Find pages with SQL error messages that might indicate vulnerabilities",
        category: "Vulnerability",
        reference: "VUL-7.3",
    },
];

/// Exemplo pelo índice na lista.
pub fn get(index: usize) -> Option<&'static ExampleDork> {
    EXAMPLES.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{describe, parse_example};

    #[test]
    fn every_example_parses_into_parts() {
        for example in EXAMPLES {
            let parts = parse_example(example.query);
            assert!(!parts.is_empty(), "exemplo sem partes: {}", example.name);
            assert!(!describe("", &parts).is_empty());
        }
    }

    #[test]
    fn every_example_uses_demo_domain() {
        assert!(EXAMPLES.iter().all(|e| e.query.contains(DEMO_DOMAIN)));
    }

    #[test]
    fn long_queries_are_single_spaced() {
        assert!(EXAMPLES.iter().all(|e| !e.query.contains("  ")));
    }

    #[test]
    fn get_by_index() {
        assert_eq!(get(0).map(|e| e.reference), Some("SEC-1.2"));
        assert!(get(EXAMPLES.len()).is_none());
    }
}
