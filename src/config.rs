//! # Configuração
//!
//! Lida das variáveis de ambiente na inicialização, com valores padrão
//! para todas elas:
//!
//! | Variável | Padrão | Uso |
//! |----------|--------|-----|
//! | `DORK_ADDR` | `0.0.0.0:3000` | endereço do servidor HTTP |
//! | `DORK_SEARCH_URL` | `https://www.google.com/search` | buscador do botão "Search" |
//! | `DORK_GENERATE_DELAY_MS` | `1500` | latência simulada do gerador |
//! | `DORK_MIN_DATE` | `2015-01-01` | limite inferior dos campos de data |
//!
//! O limite superior das datas é sempre o dia corrente (`chrono::Local`).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub search_url: String,
    pub generate_delay: Duration,
    pub min_date: NaiveDate,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            search_url: "https://www.google.com/search".to_string(),
            generate_delay: Duration::from_millis(1500),
            min_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
        }
    }
}

impl AppConfig {
    /// Lê a configuração do ambiente do processo.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Lê a configuração a partir de uma função de consulta arbitrária.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("DORK_ADDR") {
            config.addr = addr
                .parse()
                .with_context(|| format!("DORK_ADDR inválido: {addr}"))?;
        }
        if let Some(url) = lookup("DORK_SEARCH_URL") {
            config.search_url = url;
        }
        if let Some(ms) = lookup("DORK_GENERATE_DELAY_MS") {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("DORK_GENERATE_DELAY_MS inválido: {ms}"))?;
            config.generate_delay = Duration::from_millis(ms);
        }
        if let Some(date) = lookup("DORK_MIN_DATE") {
            config.min_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("DORK_MIN_DATE inválido: {date}"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Verifica os campos que não podem ser checados no parse.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.search_url)
            .with_context(|| format!("URL de busca inválida: {}", self.search_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("URL de busca deve usar http ou https: {}", self.search_url);
        }
        if self.min_date > today() {
            bail!("data mínima {} está no futuro", self.min_date);
        }
        Ok(())
    }

    /// Intervalo aceito pelos campos de data: `min_date..=hoje`.
    pub fn date_bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.min_date, today())
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.search_url, "https://www.google.com/search");
        assert_eq!(config.generate_delay, Duration::from_millis(1500));
        assert_eq!(config.min_date, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
    }

    #[test]
    fn overrides_are_applied() {
        let config = from_pairs(&[
            ("DORK_ADDR", "127.0.0.1:8080"),
            ("DORK_SEARCH_URL", "https://duckduckgo.com/"),
            ("DORK_GENERATE_DELAY_MS", "0"),
            ("DORK_MIN_DATE", "2020-06-01"),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.search_url, "https://duckduckgo.com/");
        assert!(config.generate_delay.is_zero());
        assert_eq!(config.date_bounds().0, NaiveDate::from_ymd_opt(2020, 6, 1).unwrap());
    }

    #[test]
    fn bad_values_are_rejected_with_context() {
        let err = from_pairs(&[("DORK_GENERATE_DELAY_MS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("DORK_GENERATE_DELAY_MS"));

        let err = from_pairs(&[("DORK_ADDR", "nowhere")]).unwrap_err();
        assert!(err.to_string().contains("DORK_ADDR"));
    }

    #[test]
    fn invalid_search_url_rejected() {
        let config = AppConfig {
            search_url: "not a url".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            search_url: "ftp://example.com/search".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn future_min_date_rejected() {
        let config = AppConfig {
            min_date: today() + chrono::Duration::days(30),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn date_bounds_end_today() {
        let (min, max) = AppConfig::default().date_bounds();
        assert!(min <= max);
        assert_eq!(max, today());
    }
}
