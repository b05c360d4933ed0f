use std::fs;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_metals_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn create_gold_api_mock_server(currency: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/XAU/{currency}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(config_file.path(), content).expect("Failed to write config file");
    config_file
}

#[test_log::test(tokio::test)]
async fn test_quote_flow_with_free_source_mock() {
    // 1 INR buys 0.000005 oz -> 200000 INR/oz -> ~6430.15 INR/g
    let mock_response = r#"{"success": true, "base": "INR", "rates": {"XAU": 0.000005}}"#;
    let mock_server = test_utils::create_metals_mock_server(mock_response).await;

    let config_content = format!(
        r#"
        rate:
          source: free
          base_currency: "INR"
        providers:
          metals_api:
            base_url: {}
        "#,
        mock_server.uri()
    );
    let config_file = write_config(&config_content);

    let args = goldq::cli::quote::QuoteArgs {
        weight_g: Some(10.0),
        karat: Some(22),
        ..Default::default()
    };
    let result = goldq::run_command(
        goldq::AppCommand::Quote(args),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Quote flow failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_rate_flow_with_paid_source_mock() {
    let mock_response = r#"{"price": 200000.0, "currency": "INR", "metal": "XAU"}"#;
    let mock_server = test_utils::create_gold_api_mock_server("INR", mock_response).await;

    let config_content = format!(
        r#"
        rate:
          source: paid
          api_key: "test-key"
          base_currency: "INR"
        providers:
          gold_api:
            base_url: {}
        "#,
        mock_server.uri()
    );
    let config_file = write_config(&config_content);

    info!("Running rate command against mock paid upstream");
    let result = goldq::run_command(
        goldq::AppCommand::Rate,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Rate flow failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_quote_flow_degrades_to_fallback_rate() {
    // Unreachable upstream: the quote must still succeed, on the fallback rate.
    let config_content = r#"
        rate:
          source: free
          base_currency: "INR"
          fallback_per_gram: 6000.0
          timeout_secs: 1
        providers:
          metals_api:
            base_url: "http://127.0.0.1:1"
    "#;
    let config_file = write_config(config_content);

    let args = goldq::cli::quote::QuoteArgs {
        weight_g: Some(10.0),
        karat: Some(22),
        ..Default::default()
    };
    let result = goldq::run_command(
        goldq::AppCommand::Quote(args),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Degraded quote flow failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_quote_flow_with_catalogue_sku() {
    let mock_response = r#"{"rates": {"XAU": 0.000005}}"#;
    let mock_server = test_utils::create_metals_mock_server(mock_response).await;

    let config_content = format!(
        r#"
        rate:
          source: free
        providers:
          metals_api:
            base_url: {}
        catalogue:
          - sku: "BNG100"
            type: "Bangle"
            karat: 20
            weight_g: 12.0
        "#,
        mock_server.uri()
    );
    let config_file = write_config(&config_content);

    // Config-supplied SKU seeds the quote
    let args = goldq::cli::quote::QuoteArgs {
        sku: Some("BNG100".to_string()),
        ..Default::default()
    };
    let result = goldq::run_command(
        goldq::AppCommand::Quote(args),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "SKU quote failed with: {:?}", result.err());

    // Unknown SKU is a caller error, not a crash
    let args = goldq::cli::quote::QuoteArgs {
        sku: Some("NOPE".to_string()),
        ..Default::default()
    };
    let result = goldq::run_command(
        goldq::AppCommand::Quote(args),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_err(), "Unknown SKU should fail");
}

#[test_log::test(tokio::test)]
async fn test_catalogue_flow_with_mock() {
    let mock_response = r#"{"rates": {"XAU": 0.000005}}"#;
    let mock_server = test_utils::create_metals_mock_server(mock_response).await;

    let config_content = format!(
        r#"
        rate:
          source: free
        providers:
          metals_api:
            base_url: {}
        "#,
        mock_server.uri()
    );
    let config_file = write_config(&config_content);

    let result = goldq::run_command(
        goldq::AppCommand::Catalogue,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Catalogue flow failed with: {:?}",
        result.err()
    );
}
