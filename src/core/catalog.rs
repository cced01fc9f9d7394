//! # Catálogo de Operadores
//!
//! Tabela estática e imutável com todos os operadores conhecidos. É o
//! componente folha do sistema — montador, gerador de descrições e parser
//! reverso consultam o catálogo, mas o catálogo não depende de ninguém.
//!
//! ## Resolução Silenciosa
//!
//! [`lookup()`] retorna `Option`. Um [`DorkPart`] cujo `operator_id` não
//! existe no catálogo é **omitido** — nunca é um erro fatal. Todos os
//! consumidores passam por [`resolve()`], que aplica essa regra em um
//! único lugar:
//!
//! ```text
//! parts ──resolve()──► [(definição, valor), ...]   (ids desconhecidos somem)
//! ```

use super::error::DorkError;
use super::operator::{Category, FileType, OperatorDefinition, FILE_TYPES};
use super::part::DorkPart;

/// Atalho para declarar entradas do catálogo de forma compacta.
const fn op(
    id: &'static str,
    label: &'static str,
    description: &'static str,
    category: Category,
) -> OperatorDefinition {
    OperatorDefinition {
        id,
        label,
        description,
        category,
    }
}

/// Todos os operadores, na ordem de declaração (que é a ordem de exibição).
pub const OPERATORS: &[OperatorDefinition] = &[
    // ── Content Search ────────────────────────────────────────
    op("intext", "intext:", "Search for pages containing specific text", Category::Content),
    op("allintext", "allintext:", "All terms must appear in the text of the page", Category::Content),
    op("intitle", "intitle:", "Search for pages with specific text in the title", Category::Content),
    op("allintitle", "allintitle:", "All terms must appear in the title", Category::Content),
    op("around", "AROUND(n)", "Find pages where terms appear within n words of each other", Category::Content),
    op("author", "author:", "Find content written by a specific author", Category::Content),
    // ── URL & Domain ──────────────────────────────────────────
    op("site", "site:", "Search within a specific website or domain", Category::Url),
    op("inurl", "inurl:", "Search for URLs containing specific text", Category::Url),
    op("allinurl", "allinurl:", "All terms must appear in the URL", Category::Url),
    op("link", "link:", "Find pages that link to a specific URL", Category::Url),
    op("related", "related:", "Find sites related to a specific domain", Category::Url),
    // ── File Types ────────────────────────────────────────────
    op("filetype", "filetype:", "Search for specific file types", Category::File),
    op("ext", "ext:", "Alternative to filetype, search by file extension", Category::File),
    // ── Metadata & Technical ──────────────────────────────────
    op("cache", "cache:", "View Google's cached version of a specific page", Category::Meta),
    op("info", "info:", "Get information about a specific page", Category::Meta),
    // ── Security ──────────────────────────────────────────────
    op("intitle_index", "intitle:\"index of\"", "Find directory listings", Category::Security),
    op("error_messages", "intext:error OR intext:warning", "Find pages with error messages", Category::Security),
    op("login_pages", "inurl:login OR inurl:admin", "Find login pages", Category::Security),
    op("config_files", "filetype:conf OR filetype:config", "Find configuration files", Category::Security),
    op("exposed_logs", "filetype:log", "Find log files", Category::Security),
    op("db_files", "filetype:sql OR filetype:dbf", "Find database files", Category::Security),
    op("robots_txt", "inurl:robots.txt", "Find robots.txt files", Category::Security),
    op("sql_errors", "intext:\"sql syntax near\"", "Find SQL error messages", Category::Security),
    op("env_files", "filetype:env \"DB_PASSWORD\"", "Find environment files with credentials", Category::Security),
    op("exposed_credentials", "intext:\"username\" AND intext:\"password\"", "Find exposed credentials", Category::Security),
    op("api_keys", "intext:\"api_key\" OR intext:\"apikey\"", "Find exposed API keys", Category::Security),
    op("server_status", "intitle:\"Apache Status\" \"Apache Server Status\"", "Find Apache server status pages", Category::Security),
    op("phpinfo", "intitle:\"phpinfo()\" \"php version\"", "Find PHP information disclosure pages", Category::Security),
    op("open_ftp", "intitle:\"index of\" inurl:ftp", "Find open FTP directories", Category::Security),
    op("wp_config", "filetype:php \"wp-config.php\"", "Find WordPress configuration files", Category::Security),
    op("git_exposed", "inurl:\".git\"", "Find exposed Git repositories", Category::Security),
    op("jenkins", "intitle:\"Dashboard [Jenkins]\"", "Find Jenkins dashboards", Category::Security),
    op("backup_files", "ext:bak OR ext:backup OR ext:old", "Find backup files", Category::Security),
    op("open_redirect", "inurl:redirect= OR inurl:return= OR inurl:redir=", "Find potential open redirects", Category::Security),
    // ── Date & Time ───────────────────────────────────────────
    op("before", "before:", "Search for pages published before a specific date", Category::Date),
    op("after", "after:", "Search for pages published after a specific date", Category::Date),
    // ── Media & Information ───────────────────────────────────
    op("define", "define:", "Show definition of a word or phrase", Category::Media),
    op("stocks", "stocks:", "Get stock information for specified ticker symbols", Category::Media),
    op("weather", "weather:", "Show weather information for a location", Category::Media),
    op("map", "map:", "Show map of an area", Category::Media),
    op("movie", "movie:", "Get information about a movie", Category::Media),
    op("book", "book:", "Get information about a book", Category::Media),
    // ── Special Searches ──────────────────────────────────────
    op("source", "source:", "Find news from a specific source", Category::Special),
    op("location", "location:", "Find news from a specific location", Category::Special),
    op("safesearch", "safesearch:", "Filter explicit content (on/off)", Category::Special),
];

/// Busca um operador pelo id. Ids desconhecidos → `None`.
pub fn lookup(id: &str) -> Option<&'static OperatorDefinition> {
    OPERATORS.iter().find(|op| op.id == id)
}

/// Como [`lookup()`], mas para chamadores que precisam reportar o id inválido.
pub fn require(id: &str) -> Result<&'static OperatorDefinition, DorkError> {
    lookup(id).ok_or_else(|| DorkError::UnknownOperator(id.to_string()))
}

/// Resolve cada parte no seu operador, **omitindo** ids desconhecidos.
///
/// Ponto único onde a regra "id não resolvido = pular" é aplicada.
pub fn resolve<'a>(
    parts: &'a [DorkPart],
) -> impl Iterator<Item = (&'static OperatorDefinition, &'a str)> + 'a {
    parts.iter().filter_map(|part| {
        let Some(def) = lookup(&part.operator_id) else {
            tracing::debug!(operator = %part.operator_id, "Operador desconhecido ignorado");
            return None;
        };
        Some((def, part.value.as_str()))
    })
}

/// Lista operadores de uma categoria, ou o catálogo inteiro quando `None`.
///
/// A ordem de declaração é preservada.
pub fn list_by_category(category: Option<Category>) -> Vec<&'static OperatorDefinition> {
    OPERATORS
        .iter()
        .filter(|op| category.map_or(true, |c| op.category == c))
        .collect()
}

/// Todas as categorias, na ordem de exibição.
pub fn list_categories() -> &'static [Category] {
    &Category::ALL
}

/// Extensões aceitas pelos operadores de tipo de arquivo.
pub fn file_types() -> &'static [FileType] {
    FILE_TYPES
}

/// `true` se `value` pertence ao conjunto fixo de extensões.
pub fn is_file_type(value: &str) -> bool {
    FILE_TYPES.iter().any(|ft| ft.value == value)
}
