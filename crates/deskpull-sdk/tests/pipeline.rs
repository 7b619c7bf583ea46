//! End-to-end pulls against the in-process mock services.
//!
//! Each test binds the mock router on an ephemeral port and drives the
//! SDK over real HTTP, so the request counters verify the one-call /
//! no-retry contract rather than assuming it.

use std::io::Write;

use deskpull_sdk::{
    load_snapshot, records_to_frame, write_snapshot, DirectoryClient, DirectoryKey, EnvFile,
    PullError, QueueClient, QueueCredentials,
};
use mock_desk::DeskState;

async fn spawn_mock(state: DeskState) -> String {
    let app = mock_desk::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn accepted_credentials(state: &DeskState) -> QueueCredentials {
    QueueCredentials {
        client_id: state.client_id().to_string(),
        client_secret: state.client_secret().to_string(),
        session_cookie: state.session_cookie().to_string(),
    }
}

#[tokio::test]
async fn token_exchange_issues_exactly_one_post() {
    let state = DeskState::new();
    let url = spawn_mock(state.clone()).await;

    let client =
        QueueClient::connect_with_client_credentials(&url, &url, &accepted_credentials(&state))
            .await
            .unwrap();

    assert_eq!(client.token(), state.issued_token());
    assert_eq!(state.token_posts(), 1);
}

#[tokio::test]
async fn ticket_pull_makes_one_authenticated_get() {
    let state = DeskState::new();
    let url = spawn_mock(state.clone()).await;

    let client =
        QueueClient::connect_with_client_credentials(&url, &url, &accepted_credentials(&state))
            .await
            .unwrap();
    let tickets = client.fetch_open_tickets().await.unwrap();

    assert_eq!(tickets, mock_desk::sample_tickets());
    assert_eq!(state.token_posts(), 1);
    assert_eq!(state.ticket_gets(), 1);

    let frame = records_to_frame(&tickets).unwrap();
    assert_eq!(frame.height(), 3);
    assert!(frame.column("user_email").is_ok());
}

#[tokio::test]
async fn bad_secret_surfaces_the_status_with_no_retry() {
    let state = DeskState::new();
    let url = spawn_mock(state.clone()).await;

    let mut creds = accepted_credentials(&state);
    creds.client_secret = "wrong".to_string();

    let err = QueueClient::connect_with_client_credentials(&url, &url, &creds)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
    assert_eq!(state.token_posts(), 1);
}

#[tokio::test]
async fn stale_token_on_the_resource_endpoint_surfaces_the_status() {
    // Token minted by one IDP, presented to an API that never issued it.
    let idp_state = DeskState::new();
    let idp_url = spawn_mock(idp_state.clone()).await;

    let api_state = DeskState::with_credentials("other", "other", "session=o", "k");
    let api_url = spawn_mock(api_state.clone()).await;

    let client = QueueClient::connect_with_client_credentials(
        &idp_url,
        &api_url,
        &accepted_credentials(&idp_state),
    )
    .await
    .unwrap();

    let err = client.fetch_open_tickets().await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
    assert_eq!(api_state.ticket_gets(), 1);
}

#[tokio::test]
async fn missing_secret_aborts_before_any_network_call() {
    let state = DeskState::new();
    let _url = spawn_mock(state.clone()).await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "QUEUE_OAUTH_CLIENT_ID=id").unwrap();
    writeln!(file, "QUEUE_OAUTH_CLIENT_SECRET=secret").unwrap();
    let env = EnvFile::load(file.path()).unwrap();

    let err = QueueCredentials::from_env_file(&env).unwrap_err();
    assert!(matches!(err, PullError::MissingSecret { .. }));
    assert_eq!(state.token_posts(), 0);
}

#[tokio::test]
async fn snapshot_round_trip_matches_the_direct_frame() {
    let state = DeskState::new();
    let url = spawn_mock(state.clone()).await;

    let client =
        QueueClient::connect_with_client_credentials(&url, &url, &accepted_credentials(&state))
            .await
            .unwrap();
    let tickets = client.fetch_open_tickets().await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_sync/queue_snapshot.json");
    write_snapshot(&path, &tickets).unwrap();

    let direct = records_to_frame(&tickets).unwrap();
    let local = records_to_frame(&load_snapshot(&path).unwrap()).unwrap();
    assert!(direct.equals_missing(&local));
}

#[tokio::test]
async fn directory_pulls_build_keyed_frames() {
    let state = DeskState::new();
    let url = spawn_mock(state.clone()).await;

    let key = DirectoryKey::Example(state.rest_api_key());
    let client = DirectoryClient::new(&url, &key).unwrap();

    let users = client.users().await.unwrap();
    assert_eq!(users.height(), 3);
    assert!(users.column("email").is_ok());

    let licenses = client.licenses().await.unwrap();
    assert_eq!(licenses.height(), 2);

    let allocations = client.license_allocations().await.unwrap();
    assert_eq!(allocations.height(), 3);
}

#[tokio::test]
async fn directory_rejects_an_unknown_key() {
    let state = DeskState::new();
    let url = spawn_mock(state.clone()).await;

    let key = DirectoryKey::Personal("not-a-real-key");
    let client = DirectoryClient::new(&url, &key).unwrap();

    let err = client.users().await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
}
