//! End-to-end runs of the secret fetch flow against stub endpoints.

use auth_workload_identity::IdentityError;
use keyvault_sample::{SampleConfig, SampleError, build_credential, run};
use std::collections::HashMap;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lookup_from(pairs: Vec<(&str, String)>) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    move |name| map.get(name).cloned()
}

async fn mount_token_endpoint(idp: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/tid/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "A",
            "expires_in": 3600
        })))
        .expect(expected_calls)
        .mount(idp)
        .await;
}

async fn mount_secret(vault: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/secrets/foo"))
        .and(header("authorization", "Bearer A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": "bar"
        })))
        .expect(1)
        .mount(vault)
        .await;
}

fn federation_env(idp: &MockServer, token_file: &std::path::Path) -> Vec<(&'static str, String)> {
    vec![
        ("AZURE_CLIENT_ID", "cid".to_string()),
        ("AZURE_TENANT_ID", "tid".to_string()),
        ("AZURE_AUTHORITY_HOST", format!("{}/", idp.uri())),
        (
            "AZURE_FEDERATED_TOKEN_FILE",
            token_file.display().to_string(),
        ),
    ]
}

#[tokio::test]
async fn test_prints_fetched_secret() {
    let idp = MockServer::start().await;
    let vault = MockServer::start().await;
    mount_token_endpoint(&idp, 1).await;
    mount_secret(&vault).await;

    let token_file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(token_file.path(), "sa-token").unwrap();

    let mut env = federation_env(&idp, token_file.path());
    env.push(("KEYVAULT_URL", vault.uri()));
    env.push(("SECRET_NAME", "foo".to_string()));
    let lookup = lookup_from(env);

    let config = SampleConfig::from_lookup(&lookup).unwrap();
    let credential = build_credential(&config, &lookup).unwrap();
    let mut out = Vec::new();
    run(&config, credential, &mut out).await.unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "successfully got secret, secret=bar\n"
    );
}

#[tokio::test]
async fn test_missing_secret_name_fails_before_network() {
    let idp = MockServer::start().await;
    mount_token_endpoint(&idp, 0).await;

    let token_file = tempfile::NamedTempFile::new().unwrap();
    let mut env = federation_env(&idp, token_file.path());
    env.push(("KEYVAULT_URL", "https://x.vault.azure.net".to_string()));

    let err = SampleConfig::from_lookup(&lookup_from(env)).unwrap_err();
    assert!(matches!(err, SampleError::Config(_)));
    assert!(err.to_string().contains("SECRET_NAME"));
}

#[tokio::test]
async fn test_missing_vault_fails_before_network() {
    let idp = MockServer::start().await;
    mount_token_endpoint(&idp, 0).await;

    let token_file = tempfile::NamedTempFile::new().unwrap();
    let mut env = federation_env(&idp, token_file.path());
    env.push(("SECRET_NAME", "foo".to_string()));

    let err = SampleConfig::from_lookup(&lookup_from(env)).unwrap_err();
    assert!(err.to_string().contains("KEYVAULT_URL"));
    assert!(err.to_string().contains("KEYVAULT_NAME"));
}

#[tokio::test]
async fn test_default_credential_with_client_secret() {
    let idp = MockServer::start().await;
    let vault = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tid/oauth2/v2.0/token"))
        .and(body_string_contains("client_secret=s3cr3t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "A",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&idp)
        .await;
    mount_secret(&vault).await;

    let lookup = lookup_from(vec![
        ("AZURE_CLIENT_ID", "cid".to_string()),
        ("AZURE_TENANT_ID", "tid".to_string()),
        ("AZURE_AUTHORITY_HOST", format!("{}/", idp.uri())),
        ("AZURE_CLIENT_SECRET", "s3cr3t".to_string()),
        ("KEYVAULT_URL", vault.uri()),
        ("SECRET_NAME", "foo".to_string()),
        ("SAMPLE_CREDENTIAL", "default".to_string()),
    ]);

    let config = SampleConfig::from_lookup(&lookup).unwrap();
    let credential = build_credential(&config, &lookup).unwrap();
    let mut out = Vec::new();
    run(&config, credential, &mut out).await.unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "successfully got secret, secret=bar\n"
    );
}

#[tokio::test]
async fn test_polling_fetches_fresh_token_each_time() {
    let idp = MockServer::start().await;
    let vault = MockServer::start().await;
    mount_token_endpoint(&idp, 2).await;

    Mock::given(method("GET"))
        .and(path("/secrets/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": "bar"
        })))
        .up_to_n_times(1)
        .mount(&vault)
        .await;
    Mock::given(method("GET"))
        .and(path("/secrets/foo"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&vault)
        .await;

    let token_file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(token_file.path(), "sa-token").unwrap();

    let mut env = federation_env(&idp, token_file.path());
    env.push(("KEYVAULT_URL", vault.uri()));
    env.push(("SECRET_NAME", "foo".to_string()));
    env.push(("POLL_INTERVAL_SECS", "1".to_string()));
    let lookup = lookup_from(env);

    let config = SampleConfig::from_lookup(&lookup).unwrap();
    let credential = build_credential(&config, &lookup).unwrap();
    let mut out = Vec::new();
    let err = run(&config, credential, &mut out).await.unwrap_err();

    assert!(matches!(
        err,
        SampleError::Identity(IdentityError::SecretNotFound(_))
    ));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "successfully got secret, secret=bar\n"
    );
}

#[tokio::test]
async fn test_unreadable_token_file_propagates() {
    let idp = MockServer::start().await;
    let vault = MockServer::start().await;
    mount_token_endpoint(&idp, 0).await;

    let dir = tempfile::tempdir().unwrap();
    let mut env = federation_env(&idp, &dir.path().join("azure-identity-token"));
    env.push(("KEYVAULT_URL", vault.uri()));
    env.push(("SECRET_NAME", "foo".to_string()));
    let lookup = lookup_from(env);

    let config = SampleConfig::from_lookup(&lookup).unwrap();
    let credential = build_credential(&config, &lookup).unwrap();
    let mut out = Vec::new();
    let err = run(&config, credential, &mut out).await.unwrap_err();

    assert!(matches!(
        err,
        SampleError::Identity(IdentityError::FederatedTokenRead { .. })
    ));
    assert!(out.is_empty());
}
