//! # Regras por Palavra-Chave — O "Gerador por IA"
//!
//! Não há modelo aqui: um prompt livre é transformado em query por uma
//! **lista ordenada de regras**. A primeira regra cujo gatilho casa vence.
//!
//! ## Pipeline
//!
//! ```text
//! prompt
//!   ├── 1. NFKC + lowercase
//!   ├── 2. Extrair domínio (label.label.tld) — padrão "example.com"
//!   ├── 3. "subdomain" mencionado? → site:*.dominio  senão site:dominio
//!   ├── 4. Regras em ordem (primeira que casar vence):
//!   │      url_pattern → documents → directory_listing → credentials
//!   │      → configuration → api_keys → backups → admin → errors
//!   └── 5. Fallback: até 3 termos significativos após o prefixo site:
//! ```
//!
//! ## Ordem Importa
//!
//! A lista é uma **prioridade**, não um placar. "find login pages" casa
//! `credentials` (sub-caso de página de login) e nunca chega em `admin`.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Domínio usado quando o prompt não menciona nenhum.
pub const DEFAULT_DOMAIN: &str = "example.com";

/// Terminações que parecem TLD mas são extensões de arquivo (`wp-config.php`).
const FILE_SUFFIXES: &[&str] = &[
    "php", "html", "htm", "asp", "aspx", "jsp", "cgi", "js", "css", "txt", "env", "log", "sql",
    "bak", "conf", "config", "cfg", "ini", "json", "xml", "yml", "yaml", "pdf", "doc", "docx",
    "xls", "xlsx", "ppt", "pptx", "csv", "git", "zip", "tar", "gz",
];

/// Extensões de documento reconhecidas pela regra `documents`.
const DOCUMENT_TYPES: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "csv"];

/// Palavras genéricas descartadas no fallback.
const STOPWORDS: &[&str] = &[
    "find", "search", "show", "look", "looking", "page", "pages", "with", "that", "this", "from",
    "what", "where", "which", "about", "into", "over", "have", "some", "site", "sites", "website",
    "websites", "domain", "please", "want", "need", "give", "list", "results", "containing",
    "contain", "contains", "anything", "everything", "file", "files", "subdomain", "subdomains",
    "google", "dork", "query", "exposed", "public", "publicly", "url", "urls", "path", "paths",
];

/// Contexto derivado do prompt, compartilhado por todas as regras.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptContext {
    /// Prompt normalizado (NFKC) e em minúsculas.
    pub lower: String,
    /// Domínio extraído, ou [`DEFAULT_DOMAIN`].
    pub domain: String,
    /// `true` se o prompt pede subdomínios.
    pub subdomain: bool,
    words: HashSet<String>,
}

impl PromptContext {
    /// Analisa o prompt uma única vez.
    pub fn new(prompt: &str) -> Self {
        let lower: String = prompt.nfkc().collect::<String>().to_lowercase();
        let domain = extract_domain(&lower).unwrap_or_else(|| DEFAULT_DOMAIN.to_string());
        let subdomain = lower.contains("subdomain");
        let words = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            lower,
            domain,
            subdomain,
            words,
        }
    }

    /// Prefixo de escopo: `site:dominio` ou `site:*.dominio`.
    pub fn site(&self) -> String {
        if self.subdomain {
            format!("site:*.{}", self.domain)
        } else {
            format!("site:{}", self.domain)
        }
    }

    /// Alguma das substrings aparece no prompt?
    fn mentions(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lower.contains(n))
    }

    /// Alguma das palavras aparece inteira no prompt?
    fn mentions_word(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.words.contains(*w))
    }

    /// Palavras significativas, na ordem do prompt, sem o domínio.
    ///
    /// Com `strip_inner = true`, toda pontuação é removida (`wp-admin` →
    /// `wpadmin`); senão só a das bordas.
    fn key_terms(&self, strip_inner: bool) -> Vec<String> {
        let text = self.lower.replace(&self.domain, " ");
        text.split_whitespace()
            .map(|w| {
                if strip_inner {
                    w.chars()
                        .filter(|c| c.is_alphanumeric() || *c == '_')
                        .collect::<String>()
                } else {
                    w.trim_matches(|c: char| !c.is_alphanumeric()).to_string()
                }
            })
            .filter(|w| w.chars().count() > 3 && !STOPWORDS.contains(&w.as_str()))
            .collect()
    }
}

/// Extrai o primeiro trecho com forma de domínio, ignorando nomes de arquivo.
pub fn extract_domain(lower: &str) -> Option<String> {
    static DOMAIN_RE: OnceLock<Regex> = OnceLock::new();
    let re = DOMAIN_RE.get_or_init(|| {
        Regex::new(r"\b(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,24}\b")
            .expect("padrão de domínio é válido")
    });
    re.find_iter(lower)
        .map(|m| m.as_str())
        .find(|candidate| {
            let tld = candidate.rsplit('.').next().unwrap_or_default();
            !FILE_SUFFIXES.contains(&tld)
        })
        .map(str::to_string)
}

/// Regra de geração: gatilho + construtor.
pub struct Rule {
    /// Nome usado em logs e testes.
    pub name: &'static str,
    /// `true` se a regra se aplica ao prompt.
    pub matches: fn(&PromptContext) -> bool,
    /// Constrói a query completa.
    pub build: fn(&PromptContext) -> String,
}

/// Regras em ordem de prioridade.
pub const RULES: &[Rule] = &[
    Rule {
        name: "url_pattern",
        matches: |ctx| ctx.mentions(&["url", "path", "endpoint"]),
        build: |ctx| {
            let term = ctx
                .key_terms(false)
                .into_iter()
                .next()
                .unwrap_or_else(|| "admin".to_string());
            format!("{} inurl:{}", ctx.site(), term)
        },
    },
    Rule {
        name: "documents",
        matches: |ctx| {
            ctx.mentions(&["document", "spreadsheet", "presentation", "filetype"])
                || ctx.mentions_word(DOCUMENT_TYPES)
        },
        build: |ctx| {
            let mut types: Vec<&str> = DOCUMENT_TYPES
                .iter()
                .copied()
                .filter(|t| ctx.mentions_word(&[*t]))
                .collect();
            if types.is_empty() {
                types = if ctx.mentions(&["spreadsheet"]) {
                    vec!["xls", "xlsx", "csv"]
                } else if ctx.mentions(&["presentation"]) {
                    vec!["ppt", "pptx"]
                } else {
                    vec!["pdf", "doc", "docx"]
                };
            }
            let filetypes: Vec<String> = types.iter().map(|t| format!("filetype:{}", t)).collect();
            let mut query = format!("{} {}", ctx.site(), filetypes.join(" OR "));
            if ctx.mentions(&["confidential", "internal"]) {
                query.push_str(" intext:\"confidential\"");
            }
            query
        },
    },
    Rule {
        name: "directory_listing",
        matches: |ctx| {
            ctx.mentions(&["directory", "directories", "index of", "listing", "open folder"])
        },
        build: |ctx| format!("{} intitle:\"index of\" \"parent directory\"", ctx.site()),
    },
    Rule {
        name: "credentials",
        matches: |ctx| {
            ctx.mentions(&["password", "credential", "username", "log in", "sign in", "signin"])
                || ctx.mentions_word(&["login", "logins"])
        },
        build: |ctx| {
            let login = ctx.mentions(&["log in", "sign in", "signin"])
                || ctx.mentions_word(&["login", "logins"]);
            let page = ctx.mentions(&["page", "portal", "form", "screen"]);
            if login && page {
                format!("{} inurl:login OR inurl:signin OR inurl:auth intitle:\"login\"", ctx.site())
            } else {
                format!(
                    "{} intext:\"username\" AND intext:\"password\" OR intext:\"credentials\"",
                    ctx.site()
                )
            }
        },
    },
    Rule {
        name: "configuration",
        matches: |ctx| ctx.mentions(&["config", "settings", ".env", "environment file"]),
        build: |ctx| {
            format!(
                "{} filetype:conf OR filetype:config OR filetype:env OR intitle:\"configuration\"",
                ctx.site()
            )
        },
    },
    Rule {
        name: "api_keys",
        matches: |ctx| {
            ctx.mentions_word(&["api", "apikey", "key", "keys", "token", "tokens", "secret", "secrets"])
        },
        build: |ctx| {
            format!(
                "{} intext:\"api_key\" OR intext:\"apikey\" OR intext:\"secret_key\" -intext:\"example\"",
                ctx.site()
            )
        },
    },
    Rule {
        name: "backups",
        matches: |ctx| {
            ctx.mentions(&["backup", "database", "dump"]) || ctx.mentions_word(&["sql", "db"])
        },
        build: |ctx| {
            format!(
                "{} filetype:sql OR filetype:bak OR filetype:backup OR ext:dump",
                ctx.site()
            )
        },
    },
    Rule {
        name: "admin",
        matches: |ctx| ctx.mentions(&["admin", "dashboard", "control panel", "cpanel"]),
        build: |ctx| {
            format!(
                "{} inurl:admin OR inurl:dashboard OR intitle:\"admin panel\"",
                ctx.site()
            )
        },
    },
    Rule {
        name: "errors",
        matches: |ctx| ctx.mentions(&["error", "warning", "exception", "stack trace", "debug"]),
        build: |ctx| {
            format!(
                "{} intext:\"error\" OR intext:\"warning\" OR intext:\"stack trace\"",
                ctx.site()
            )
        },
    },
];

/// Regra que se aplica ao prompt, se alguma.
pub fn matching_rule(ctx: &PromptContext) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.matches)(ctx))
}

/// Fallback: prefixo `site:` seguido de até três termos significativos.
fn fallback(ctx: &PromptContext) -> String {
    let terms: Vec<String> = ctx.key_terms(true).into_iter().take(3).collect();
    if terms.is_empty() {
        ctx.site()
    } else {
        format!("{} {}", ctx.site(), terms.join(" "))
    }
}

/// Gera a query para um prompt livre. Síncrono e determinístico.
pub fn generate(prompt: &str) -> String {
    let ctx = PromptContext::new(prompt);
    match matching_rule(&ctx) {
        Some(rule) => {
            tracing::debug!(rule = rule.name, domain = %ctx.domain, "Regra de geração aplicada");
            (rule.build)(&ctx)
        }
        None => {
            tracing::debug!(domain = %ctx.domain, "Nenhuma regra casou, usando fallback");
            fallback(&ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_name(prompt: &str) -> Option<&'static str> {
        matching_rule(&PromptContext::new(prompt)).map(|r| r.name)
    }

    #[test]
    fn domain_is_extracted_or_defaulted() {
        assert_eq!(extract_domain("look at shop.acme.co.uk please"), Some("shop.acme.co.uk".into()));
        assert_eq!(extract_domain("nothing here"), None);
        assert_eq!(PromptContext::new("nothing here").domain, DEFAULT_DOMAIN);
    }

    #[test]
    fn file_names_are_not_domains() {
        assert_eq!(extract_domain("find wp-config.php on acme.org"), Some("acme.org".into()));
        assert_eq!(extract_domain("robots.txt"), None);
    }

    #[test]
    fn subdomain_switches_site_prefix() {
        let ctx = PromptContext::new("Admin panels on any subdomain of Acme.org");
        assert_eq!(ctx.domain, "acme.org");
        assert_eq!(ctx.site(), "site:*.acme.org");
        assert_eq!(PromptContext::new("acme.org").site(), "site:acme.org");
    }

    #[test]
    fn url_pattern_has_top_priority() {
        assert_eq!(rule_name("urls with admin in the path"), Some("url_pattern"));
        assert_eq!(generate("find urls with wp-admin on acme.org"), "site:acme.org inurl:wp-admin");
    }

    #[test]
    fn documents_use_mentioned_extensions() {
        assert_eq!(
            generate("confidential pdf and xlsx on acme.org"),
            "site:acme.org filetype:pdf OR filetype:xlsx intext:\"confidential\""
        );
        assert_eq!(
            generate("spreadsheets from acme.org"),
            "site:acme.org filetype:xls OR filetype:xlsx OR filetype:csv"
        );
    }

    #[test]
    fn directory_listing() {
        assert_eq!(
            generate("open directory listing"),
            "site:example.com intitle:\"index of\" \"parent directory\""
        );
    }

    #[test]
    fn credentials_and_login_page_subcase() {
        assert_eq!(
            generate("leaked passwords on acme.org"),
            "site:acme.org intext:\"username\" AND intext:\"password\" OR intext:\"credentials\""
        );
        assert_eq!(
            generate("login pages on acme.org"),
            "site:acme.org inurl:login OR inurl:signin OR inurl:auth intitle:\"login\""
        );
    }

    #[test]
    fn configuration_and_api_keys() {
        assert_eq!(rule_name("configuration leaks"), Some("configuration"));
        assert_eq!(
            generate("exposed api keys"),
            "site:example.com intext:\"api_key\" OR intext:\"apikey\" OR intext:\"secret_key\" -intext:\"example\""
        );
        // "monkey" contém "key" mas não é a palavra
        assert_eq!(rule_name("monkey business"), None);
    }

    #[test]
    fn backups_admin_and_errors() {
        assert_eq!(rule_name("database dumps"), Some("backups"));
        assert_eq!(rule_name("admin dashboard"), Some("admin"));
        assert_eq!(rule_name("stack trace leaks"), Some("errors"));
    }

    #[test]
    fn priority_is_fixed() {
        // credentials vence admin; configuration vence api_keys
        assert_eq!(rule_name("admin login portal"), Some("credentials"));
        assert_eq!(rule_name("config with secret key"), Some("configuration"));
    }

    #[test]
    fn fallback_takes_three_meaningful_terms() {
        assert_eq!(
            generate("Show me marketing brochures about widgets and gadgets on acme.org!"),
            "site:acme.org marketing brochures widgets"
        );
        assert_eq!(generate("hi"), "site:example.com");
    }

    #[test]
    fn generate_is_deterministic() {
        assert_eq!(generate("acme.org backups"), generate("acme.org backups"));
    }
}
