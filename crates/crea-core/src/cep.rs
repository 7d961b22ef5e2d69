//! Brazilian postal code (CEP) normalization and address lookup.

use crate::error::CreaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const VIACEP_BASE_URL: &str = "https://viacep.com.br/ws";

/// An 8-digit postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cep(String);

impl Cep {
    /// Strip `-`, `.` and whitespace; the rest must be exactly 8 digits.
    pub fn parse(input: &str) -> Result<Cep, CreaError> {
        let digits: String = input
            .chars()
            .filter(|c| !matches!(c, '-' | '.') && !c.is_whitespace())
            .collect();
        if digits.len() == 8 && digits.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Cep(digits))
        } else {
            Err(CreaError::InvalidCep(input.trim().to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `20040-020` style.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address returned by a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub cep: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Something that resolves a CEP to an address.
pub trait AddressLookup {
    fn lookup(&self, cep: &Cep) -> Result<Address, CreaError>;
}

/// Blocking client for the ViaCEP web service.
pub struct ViaCepClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CreaError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("crea/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CreaError::Lookup(format!("failed to build HTTP client: {e}")))?;
        Ok(ViaCepClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, cep: &Cep) -> String {
        format!("{}/{}/json/", self.base_url, cep)
    }
}

impl AddressLookup for ViaCepClient {
    fn lookup(&self, cep: &Cep) -> Result<Address, CreaError> {
        let url = self.url_for(cep);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CreaError::Lookup(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CreaError::Lookup(format!("{url} returned HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|e| CreaError::Lookup(e.to_string()))?;
        parse_viacep_response(&body, cep)
    }
}

#[derive(Debug, Deserialize)]
struct ViaCepBody {
    #[serde(default)]
    cep: Option<String>,
    #[serde(default)]
    logradouro: Option<String>,
    #[serde(default)]
    bairro: Option<String>,
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    uf: Option<String>,
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

/// Parse a ViaCEP JSON body. A body carrying `"erro"` means "not found".
pub fn parse_viacep_response(body: &str, cep: &Cep) -> Result<Address, CreaError> {
    let parsed: ViaCepBody = serde_json::from_str(body)
        .map_err(|e| CreaError::Lookup(format!("unexpected response: {e}")))?;

    let not_found = match &parsed.erro {
        None => false,
        Some(serde_json::Value::Bool(flag)) => *flag,
        Some(serde_json::Value::String(s)) => s != "false",
        Some(_) => true,
    };
    if not_found {
        return Err(CreaError::CepNotFound(cep.formatted()));
    }

    Ok(Address {
        cep: parsed.cep.unwrap_or_else(|| cep.formatted()),
        street: parsed.logradouro.unwrap_or_default(),
        neighborhood: parsed.bairro.unwrap_or_default(),
        city: parsed.localidade.unwrap_or_default(),
        state: parsed.uf.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_punctuation() {
        assert_eq!(Cep::parse("20.040-020").unwrap().as_str(), "20040020");
        assert_eq!(Cep::parse(" 20040 020 ").unwrap().as_str(), "20040020");
        assert_eq!(Cep::parse("20040020").unwrap().formatted(), "20040-020");
    }

    #[test]
    fn test_parse_rejects_wrong_length_or_letters() {
        assert!(matches!(Cep::parse("1234"), Err(CreaError::InvalidCep(_))));
        assert!(Cep::parse("200400201").is_err());
        assert!(Cep::parse("2004A020").is_err());
        assert!(Cep::parse("").is_err());
        assert!(Cep::parse("２００４００２０").is_err());
    }

    #[test]
    fn test_parse_found_response() {
        let cep = Cep::parse("20040020").unwrap();
        let body = r#"{
            "cep": "20040-020",
            "logradouro": "Praça Pio X",
            "complemento": "",
            "bairro": "Centro",
            "localidade": "Rio de Janeiro",
            "uf": "RJ",
            "ibge": "3304557"
        }"#;
        let addr = parse_viacep_response(body, &cep).unwrap();
        assert_eq!(addr.street, "Praça Pio X");
        assert_eq!(addr.neighborhood, "Centro");
        assert_eq!(addr.city, "Rio de Janeiro");
        assert_eq!(addr.state, "RJ");
    }

    #[test]
    fn test_parse_not_found_response() {
        let cep = Cep::parse("99999999").unwrap();
        assert!(matches!(
            parse_viacep_response(r#"{"erro": true}"#, &cep),
            Err(CreaError::CepNotFound(_))
        ));
        assert!(matches!(
            parse_viacep_response(r#"{"erro": "true"}"#, &cep),
            Err(CreaError::CepNotFound(_))
        ));
    }

    #[test]
    fn test_parse_garbage_response() {
        let cep = Cep::parse("20040020").unwrap();
        assert!(matches!(
            parse_viacep_response("<html>", &cep),
            Err(CreaError::Lookup(_))
        ));
    }

    #[test]
    fn test_url_for() {
        let client = ViaCepClient::new("https://viacep.com.br/ws/", Duration::from_secs(5)).unwrap();
        let cep = Cep::parse("20.040-020").unwrap();
        assert_eq!(client.url_for(&cep), "https://viacep.com.br/ws/20040020/json/");
    }
}
