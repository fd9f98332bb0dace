#[cfg(test)]
use axum::Router;

/// Serve `router` on an ephemeral local port and return its base URL.
///
/// Used to stand in for Firebase and the geocoding providers in tests.
#[cfg(test)]
pub async fn spawn_mock_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    format!("http://{}", addr)
}

/// Base URL that refuses connections, for "provider unreachable" cases
#[cfg(test)]
pub async fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}
