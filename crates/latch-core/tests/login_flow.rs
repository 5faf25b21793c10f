//! Integration tests for the login flow
//!
//! These tests drive the controller against a mock authentication endpoint and
//! scripted biometric hardware, and check navigation, alerts and the loading
//! flag from the outside.

use std::sync::Arc;
use std::time::Duration;

use latch_core::{
    AlertLog, AuthOutcome, AuthStrategy, BiometricProvider, HttpAuthClient, Locale,
    LoginController, LoginErrorKind, NavigationShell, NoBiometrics, Screen, ScriptedBiometrics,
};
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Controller pointed at `endpoint` with the given biometrics
fn controller_for(
    endpoint: &str,
    biometrics: Arc<dyn BiometricProvider>,
    alerts: Arc<AlertLog>,
) -> LoginController {
    let client = HttpAuthClient::new(endpoint).expect("valid endpoint");
    LoginController::new(Arc::new(client), biometrics, alerts)
        .with_request_timeout(Some(Duration::from_secs(5)))
}

async fn mock_login(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Password login
// ============================================================================

#[tokio::test]
async fn test_accepted_credentials_reach_main_screen() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "username": "alice", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let alerts = Arc::new(AlertLog::new());
    let controller = controller_for(
        &format!("{}/login", server.uri()),
        Arc::new(NoBiometrics),
        alerts.clone(),
    );
    let mut shell = NavigationShell::new();

    controller.set_username("alice");
    controller.set_password("secret");
    let outcome = controller.authenticate(AuthStrategy::Password).await;

    assert_eq!(outcome, AuthOutcome::Authenticated(AuthStrategy::Password));
    assert!(shell.apply(outcome));
    assert_eq!(shell.current(), Screen::Main);
    assert!(alerts.is_empty());
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_rejected_credentials_show_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mock_login(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "success": false, "message": "Invalid password" })),
    )
    .await;

    let alerts = Arc::new(AlertLog::new());
    let controller = controller_for(
        &format!("{}/login", server.uri()),
        Arc::new(NoBiometrics),
        alerts.clone(),
    );
    let mut shell = NavigationShell::new();

    controller.set_username("alice");
    controller.set_password("wrong");
    let outcome = controller.authenticate(AuthStrategy::Password).await;

    assert_eq!(outcome, AuthOutcome::Failed(LoginErrorKind::AuthRejected));
    assert!(!shell.apply(outcome));
    assert_eq!(shell.current(), Screen::Login);
    assert_eq!(alerts.last().unwrap().message, "Invalid password");
    assert!(!controller.is_loading());
}

#[rstest]
#[case::ok_status_success_false(200, json!({ "success": false }), "Login failed. Check your credentials.")]
#[case::error_status_success_true(500, json!({ "success": true }), "Login failed. Check your credentials.")]
#[case::missing_flag(200, json!({ "token": "abc" }), "Login failed. Check your credentials.")]
#[case::unauthorized_with_message(401, json!({ "success": false, "message": "Locked" }), "Locked")]
#[tokio::test]
async fn test_failure_responses_stay_on_login(
    #[case] status: u16,
    #[case] body: serde_json::Value,
    #[case] expected_message: &str,
) {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mock_login(&server, ResponseTemplate::new(status).set_body_json(body)).await;

    let alerts = Arc::new(AlertLog::new());
    let controller = controller_for(
        &format!("{}/login", server.uri()),
        Arc::new(NoBiometrics),
        alerts.clone(),
    );
    let mut shell = NavigationShell::new();

    controller.set_username("alice");
    controller.set_password("secret");
    let outcome = controller.authenticate(AuthStrategy::Password).await;

    assert!(!shell.apply(outcome));
    assert_eq!(shell.current(), Screen::Login);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts.last().unwrap().message, expected_message);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_non_json_body_is_rejection() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mock_login(&server, ResponseTemplate::new(200).set_body_string("<html>ok</html>")).await;

    let alerts = Arc::new(AlertLog::new());
    let controller = controller_for(
        &format!("{}/login", server.uri()),
        Arc::new(NoBiometrics),
        alerts.clone(),
    );
    controller.set_username("alice");
    controller.set_password("secret");

    assert_eq!(
        controller.authenticate(AuthStrategy::Password).await,
        AuthOutcome::Failed(LoginErrorKind::AuthRejected)
    );
}

#[tokio::test]
async fn test_blank_username_sends_nothing() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let alerts = Arc::new(AlertLog::new());
    let controller = controller_for(
        &format!("{}/login", server.uri()),
        Arc::new(NoBiometrics),
        alerts.clone(),
    );
    controller.set_username("");
    controller.set_password("x");

    let outcome = controller.authenticate(AuthStrategy::Password).await;

    assert_eq!(outcome, AuthOutcome::Failed(LoginErrorKind::Validation));
    assert_eq!(
        alerts.last().unwrap().message,
        "Username and password are required."
    );
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_unreachable_server_reports_connectivity() {
    // Port 1 on loopback is reserved and refuses connections
    let alerts = Arc::new(AlertLog::new());
    let controller = controller_for(
        "http://127.0.0.1:1/login",
        Arc::new(NoBiometrics),
        alerts.clone(),
    )
    .with_locale(Locale::PortugueseBr);
    let mut shell = NavigationShell::new();

    controller.set_username("alice");
    controller.set_password("secret");
    let outcome = controller.authenticate(AuthStrategy::Password).await;

    assert!(matches!(
        outcome,
        AuthOutcome::Failed(LoginErrorKind::Transport | LoginErrorKind::Timeout)
    ));
    assert!(!shell.apply(outcome));
    let alert = alerts.last().unwrap();
    assert_eq!(alert.title, "Erro");
    assert_eq!(
        alert.message,
        "Não foi possível conectar ao servidor. Verifique sua conexão."
    );
    assert!(!controller.is_loading());
}

// ============================================================================
// Loading flag
// ============================================================================

#[tokio::test]
async fn test_loading_spans_the_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mock_login(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "success": true }))
            .set_delay(Duration::from_millis(300)),
    )
    .await;

    let alerts = Arc::new(AlertLog::new());
    let controller = Arc::new(controller_for(
        &format!("{}/login", server.uri()),
        Arc::new(NoBiometrics),
        alerts,
    ));
    controller.set_username("alice");
    controller.set_password("secret");
    let mut state = controller.subscribe();

    let attempt = tokio::spawn({
        let controller = controller.clone();
        async move { controller.authenticate(AuthStrategy::Password).await }
    });

    state.wait_for(|s| s.loading).await.unwrap();
    assert!(controller.is_loading());
    assert!(!attempt.is_finished());

    let outcome = attempt.await.unwrap();
    assert!(outcome.is_authenticated());
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_second_submission_while_loading_is_ignored() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let alerts = Arc::new(AlertLog::new());
    let controller = Arc::new(controller_for(
        &format!("{}/login", server.uri()),
        Arc::new(NoBiometrics),
        alerts.clone(),
    ));
    controller.set_username("alice");
    controller.set_password("secret");
    let mut state = controller.subscribe();

    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.authenticate(AuthStrategy::Password).await }
    });
    state.wait_for(|s| s.loading).await.unwrap();

    let second = controller.authenticate(AuthStrategy::Password).await;
    assert_eq!(second, AuthOutcome::Ignored);
    assert!(controller.is_loading());

    assert!(first.await.unwrap().is_authenticated());
    assert!(alerts.is_empty());
}

#[tokio::test]
async fn test_timeout_clears_loading() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mock_login(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "success": true }))
            .set_delay(Duration::from_secs(10)),
    )
    .await;

    let alerts = Arc::new(AlertLog::new());
    let controller = controller_for(
        &format!("{}/login", server.uri()),
        Arc::new(NoBiometrics),
        alerts.clone(),
    )
    .with_request_timeout(Some(Duration::from_millis(100)));
    controller.set_username("alice");
    controller.set_password("secret");

    let outcome = controller.authenticate(AuthStrategy::Password).await;

    assert_eq!(outcome, AuthOutcome::Failed(LoginErrorKind::Timeout));
    assert_eq!(
        alerts.last().unwrap().message,
        "Could not connect to the server. Check your connection."
    );
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_cancelled_attempt_clears_loading() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mock_login(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "success": true }))
            .set_delay(Duration::from_secs(10)),
    )
    .await;

    let controller = Arc::new(controller_for(
        &format!("{}/login", server.uri()),
        Arc::new(NoBiometrics),
        Arc::new(AlertLog::new()),
    ));
    controller.set_username("alice");
    controller.set_password("secret");
    let mut state = controller.subscribe();

    let attempt = tokio::spawn({
        let controller = controller.clone();
        async move { controller.authenticate(AuthStrategy::Password).await }
    });
    state.wait_for(|s| s.loading).await.unwrap();

    attempt.abort();
    let _ = attempt.await;

    assert!(!controller.is_loading());
}

// ============================================================================
// Biometric login
// ============================================================================

#[tokio::test]
async fn test_biometric_success_reaches_main_screen() {
    let biometrics = Arc::new(ScriptedBiometrics::enrolled(true));
    let alerts = Arc::new(AlertLog::new());
    let controller = controller_for("http://127.0.0.1:1/login", biometrics.clone(), alerts.clone());
    let mut shell = NavigationShell::new();

    let outcome = controller.authenticate(AuthStrategy::Biometric).await;

    assert!(shell.apply(outcome));
    assert_eq!(shell.current(), Screen::Main);
    assert_eq!(biometrics.prompt_count(), 1);
    assert!(alerts.is_empty());
}

#[tokio::test]
async fn test_biometric_mismatch_alerts() {
    let biometrics = Arc::new(ScriptedBiometrics::enrolled(false));
    let alerts = Arc::new(AlertLog::new());
    let controller = controller_for("http://127.0.0.1:1/login", biometrics.clone(), alerts.clone())
        .with_locale(Locale::PortugueseBr);

    let outcome = controller.authenticate(AuthStrategy::Biometric).await;

    assert_eq!(outcome, AuthOutcome::Failed(LoginErrorKind::BiometricRejected));
    assert_eq!(alerts.last().unwrap().message, "Falha na autenticação biométrica.");
    assert_eq!(
        biometrics.last_prompt().as_deref(),
        Some("Autentique-se para continuar")
    );
}

#[rstest]
#[case::no_hardware(ScriptedBiometrics::absent())]
#[case::nothing_enrolled(ScriptedBiometrics::not_enrolled())]
#[tokio::test]
async fn test_unavailable_biometrics_never_prompt(#[case] biometrics: ScriptedBiometrics) {
    let biometrics = Arc::new(biometrics);
    let alerts = Arc::new(AlertLog::new());
    let controller = controller_for("http://127.0.0.1:1/login", biometrics.clone(), alerts.clone());
    let mut shell = NavigationShell::new();

    let outcome = controller.authenticate(AuthStrategy::Biometric).await;

    assert_eq!(
        outcome,
        AuthOutcome::Failed(LoginErrorKind::BiometricUnavailable)
    );
    assert!(!shell.apply(outcome));
    assert_eq!(biometrics.prompt_count(), 0);
    assert_eq!(
        alerts.last().unwrap().message,
        "Biometric authentication is unavailable."
    );
}

#[tokio::test]
async fn test_biometrics_ignore_password_in_flight() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    mock_login(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "success": false }))
            .set_delay(Duration::from_millis(300)),
    )
    .await;

    let biometrics = Arc::new(ScriptedBiometrics::enrolled(true));
    let controller = Arc::new(controller_for(
        &format!("{}/login", server.uri()),
        biometrics.clone(),
        Arc::new(AlertLog::new()),
    ));
    controller.set_username("alice");
    controller.set_password("secret");
    let mut state = controller.subscribe();

    let password = tokio::spawn({
        let controller = controller.clone();
        async move { controller.authenticate(AuthStrategy::Password).await }
    });
    state.wait_for(|s| s.loading).await.unwrap();

    let biometric = controller.authenticate(AuthStrategy::Biometric).await;
    assert!(biometric.is_authenticated());
    assert!(controller.is_loading());

    assert_eq!(
        password.await.unwrap(),
        AuthOutcome::Failed(LoginErrorKind::AuthRejected)
    );
    assert!(!controller.is_loading());
}
