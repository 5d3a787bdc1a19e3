//! Fetch functions - one adapter per provider

use crate::lookup::error::LookupError;
use crate::lookup::parse::{parse_brasilapi, parse_viacep};
use crate::lookup::types::{LookupResult, Provider};
use crate::lookup::utils::{brasilapi_url, http_get, viacep_url};
use reqwest::Client;
use tracing::info;

/// Look up a CEP on BrasilAPI
pub async fn fetch_brasilapi(
    client: &Client,
    base_url: &str,
    cep: &str,
) -> Result<LookupResult, LookupError> {
    let body = http_get(client, Provider::BrasilApi, &brasilapi_url(base_url, cep)).await?;
    let address = parse_brasilapi(&body)?;

    info!("[{}] resolved {}", Provider::BrasilApi, address.cep);
    Ok(LookupResult::BrasilApi(address))
}

/// Look up a CEP on ViaCEP
pub async fn fetch_viacep(
    client: &Client,
    base_url: &str,
    cep: &str,
) -> Result<LookupResult, LookupError> {
    let body = http_get(client, Provider::ViaCep, &viacep_url(base_url, cep)).await?;
    let address = parse_viacep(&body, cep)?;

    info!("[{}] resolved {}", Provider::ViaCep, address.cep);
    Ok(LookupResult::ViaCep(address))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::types::AddressRecord;
    use crate::lookup::utils::build_client;
    use mockito::Server;
    use serde_json::json;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::time::sleep;

    fn client() -> Client {
        Client::new()
    }

    #[tokio::test]
    async fn test_fetch_brasilapi() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/cep/v1/71503507")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "cep": "71503507",
                    "state": "DF",
                    "city": "Brasília",
                    "neighborhood": "Setor de Habitações Individuais Norte",
                    "street": "SHIN QI 1 Conjunto 7",
                    "service": "open-cep"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let result = fetch_brasilapi(&client(), &server.url(), "71503507")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            result,
            LookupResult::BrasilApi(AddressRecord {
                cep: "71503507".to_string(),
                street: "SHIN QI 1 Conjunto 7".to_string(),
                neighborhood: "Setor de Habitações Individuais Norte".to_string(),
                city: "Brasília".to_string(),
                state: "DF".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_fetch_viacep() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/ws/71503507/json/")
            .with_status(200)
            .with_body(
                json!({
                    "cep": "71503-507",
                    "logradouro": "SHIN QI 1 Conjunto 7",
                    "complemento": "",
                    "bairro": "Setor de Habitações Individuais Norte",
                    "localidade": "Brasília",
                    "uf": "DF"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let result = fetch_viacep(&client(), &server.url(), "71503507")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.provider(), Provider::ViaCep);
        assert_eq!(result.address().cep, "71503-507");
        assert_eq!(result.address().city, "Brasília");
        assert_eq!(result.address().state, "DF");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/cep/v1/00000000")
            .with_status(404)
            .with_body(r#"{"name": "CepPromiseError", "message": "not found"}"#)
            .create_async()
            .await;

        let err = fetch_brasilapi(&client(), &server.url(), "00000000")
            .await
            .unwrap_err();

        match err {
            LookupError::Status { provider, status } => {
                assert_eq!(provider, Provider::BrasilApi);
                assert_eq!(status.as_u16(), 404);
            }
            other => panic!("Expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/ws/71503507/json/")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = fetch_viacep(&client(), &server.url(), "71503507")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Decode { provider: Provider::ViaCep, .. }));
    }

    #[tokio::test]
    async fn test_fetch_viacep_unknown_cep() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/ws/99999999/json/")
            .with_status(200)
            .with_body(r#"{"erro": true}"#)
            .create_async()
            .await;

        let err = fetch_viacep(&client(), &server.url(), "99999999")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::NotFound { .. }));
        assert_eq!(err.provider(), Provider::ViaCep);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // nothing listens on port 1
        let err = fetch_brasilapi(&client(), "http://127.0.0.1:1", "71503507")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Network { provider: Provider::BrasilApi, .. }));
    }

    #[tokio::test]
    async fn test_fetch_times_out_on_stalled_server() {
        // accepts the connection and never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stalled = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            sleep(Duration::from_secs(30)).await;
        });

        let client = build_client(Some(Duration::from_secs(1))).unwrap();
        let err = fetch_viacep(&client, &format!("http://{}", addr), "71503507")
            .await
            .unwrap_err();

        match err {
            LookupError::Network { provider, source } => {
                assert_eq!(provider, Provider::ViaCep);
                assert!(source.is_timeout());
            }
            other => panic!("Expected Network, got {:?}", other),
        }

        stalled.abort();
    }

    #[tokio::test]
    #[ignore] // Ignore by default since it hits real API
    async fn test_fetch_real_providers() {
        let client = client();

        let brasilapi = fetch_brasilapi(&client, "https://brasilapi.com.br", "71503507").await;
        assert!(brasilapi.is_ok());

        let viacep = fetch_viacep(&client, "https://viacep.com.br", "71503507").await;
        assert!(viacep.is_ok());
    }
}
