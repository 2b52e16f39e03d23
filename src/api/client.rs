use crate::api::model::{ApiPokemon, ApiSpecies};
use crate::api::DexSource;
use crate::config::{self, ScrapeConfig};
use crate::error::{AppError, AppResult};
use crate::logging::{log, LogLevel};
use crate::model::common::PokemonId;
use bytes::Bytes;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const BODY_SNIPPET_LEN: usize = 200;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    pokemon_url: String,
    species_url: String,
}

impl ApiClient {
    pub fn new(cfg: &ScrapeConfig) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(config::USER_AGENT)
            .timeout(Duration::from_secs(config::HTTP_TIMEOUT_SECONDS))
            .connect_timeout(Duration::from_secs(config::HTTP_CONNECT_TIMEOUT))
            .build()
            .map_err(AppError::from)?;
        Ok(ApiClient {
            client,
            pokemon_url: cfg.pokemon_url.trim_end_matches('/').to_string(),
            species_url: cfg.species_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn resource_url(base: &str, id: PokemonId) -> String {
        format!("{}/{}", base.trim_end_matches('/'), id)
    }

    /// Single GET, no retries. Anything but `200 OK` becomes `HttpStatus`;
    /// a 200 whose body does not match `T` becomes `ResponseInvalid`.
    pub async fn get_json<T>(
        &self,
        base: &str,
        endpoint: &'static str,
        id: PokemonId,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let url = Self::resource_url(base, id);
        let log_prefix = format!("API Req GET {} #{}", endpoint, id);

        let resp = self.client.get(&url).send().await.map_err(|e| {
            let context_str = if e.is_timeout() {
                "Timeout"
            } else if e.is_connect() {
                "Connection"
            } else {
                "Request"
            };
            tracing::debug!("{} {} Error: {}", log_prefix, context_str, e);
            AppError::from(e)
        })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Self::handle_http_error(resp, status, endpoint, id, &log_prefix).await);
        }

        let bytes = resp.bytes().await.map_err(|e| {
            log(
                LogLevel::Warning,
                &format!("{} - Error reading success response body: {}", log_prefix, e),
            );
            AppError::from(e)
        })?;

        parse_body(&bytes, endpoint, id)
    }

    async fn handle_http_error(
        resp: Response,
        status: StatusCode,
        endpoint: &'static str,
        id: PokemonId,
        log_prefix: &str,
    ) -> AppError {
        let resp_text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        tracing::debug!(
            "{} HTTP {} ({}). Body: {}...",
            log_prefix,
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status"),
            resp_text.chars().take(150).collect::<String>()
        );
        AppError::http_status(status.as_u16(), endpoint, id)
    }
}

/// Decodes a successful body, logging a snippet when it does not fit `T`.
pub fn parse_body<T>(bytes: &Bytes, endpoint: &str, id: PokemonId) -> AppResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(bytes).map_err(|e| {
        let snippet_len = bytes.len().min(BODY_SNIPPET_LEN);
        let snippet = String::from_utf8_lossy(&bytes[..snippet_len]);
        log(
            LogLevel::Error,
            &format!(
                "Fail parse {} #{} as {}: {}. Snippet: '{}'",
                endpoint,
                id,
                std::any::type_name::<T>(),
                e,
                snippet
            ),
        );
        AppError::response_invalid(e.to_string(), endpoint, id)
    })
}

impl DexSource for ApiClient {
    async fn fetch_pokemon(&self, id: PokemonId) -> AppResult<ApiPokemon> {
        self.get_json(&self.pokemon_url, config::ENDPOINT_POKEMON, id)
            .await
    }

    async fn fetch_species(&self, id: PokemonId) -> AppResult<ApiSpecies> {
        self.get_json(&self.species_url, config::ENDPOINT_SPECIES, id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_url_tolerates_trailing_slash() {
        assert_eq!(
            ApiClient::resource_url("https://pokeapi.co/api/v2/pokemon/", 25),
            "https://pokeapi.co/api/v2/pokemon/25"
        );
        assert_eq!(
            ApiClient::resource_url(config::DEFAULT_SPECIES_URL, 1),
            "https://pokeapi.co/api/v2/pokemon-species/1"
        );
    }

    #[test]
    fn parse_body_maps_missing_fields_to_response_invalid() {
        let body = Bytes::from_static(br#"{"name": "bulbasaur"}"#);
        let err = parse_body::<ApiPokemon>(&body, config::ENDPOINT_POKEMON, 1).unwrap_err();
        assert!(matches!(err, AppError::ResponseInvalid { id: 1, .. }));
    }

    #[test]
    fn parse_body_maps_non_json_to_response_invalid() {
        let body = Bytes::from_static(b"<html>Not Found</html>");
        let err = parse_body::<ApiSpecies>(&body, config::ENDPOINT_SPECIES, 9).unwrap_err();
        assert!(matches!(err, AppError::ResponseInvalid { .. }));
    }
}
