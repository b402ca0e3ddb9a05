//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use follow_graph::lifecycle::{Shutdown, Stores};
use follow_graph::{HttpServer, ServiceConfig};
use serde_json::{json, Value};

/// A server running on a background task.
pub struct TestServer {
    pub addr: SocketAddr,
    pub stores: Stores,
    pub shutdown: Shutdown,
    pub client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Register `username` and return its token.
    pub async fn register(&self, username: &str) -> String {
        let res = self
            .client
            .post(self.url("/register"))
            .json(&json!({ "username": username }))
            .send()
            .await
            .expect("server unreachable");
        assert_eq!(res.status(), 200, "registering {username}");
        let body: Value = res.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    /// POST /follow/{username} as the token's owner.
    pub async fn follow(&self, token: &str, username: &str) -> (u16, Value) {
        let res = self
            .client
            .post(self.url(&format!("/follow/{username}")))
            .header("Authorization", format!("Token {token}"))
            .send()
            .await
            .expect("server unreachable");
        let status = res.status().as_u16();
        (status, res.json().await.unwrap_or(Value::Null))
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Start a server bound to `addr` with the given config.
pub async fn start_server(addr: SocketAddr, mut config: ServiceConfig) -> TestServer {
    config.listener.bind_address = addr.to_string();

    let stores = Stores::load(&config).unwrap();
    let server = HttpServer::new(config, stores.app_state());
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    TestServer {
        addr,
        stores,
        shutdown,
        client,
        handle,
    }
}
