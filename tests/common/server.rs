use std::net::SocketAddr;

use axum::Router;
use reqwest::Url;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

const API_BASE: &str = "/api/v1/";

/// A served app on an ephemeral port. Dropping it stops the server.
pub struct TestAppHandle {
    pub address: Url,
    _shutdown: oneshot::Sender<()>,
    _server_task: JoinHandle<()>,
}

fn api_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}"))
        .and_then(|root| root.join(API_BASE))
        .unwrap()
}

pub async fn spawn_test_app(app: Router) -> TestAppHandle {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let address = api_url(listener.local_addr().unwrap());

    let (shutdown, stopped) = oneshot::channel::<()>();
    let server_task = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                // a dropped sender resolves too
                let _ = stopped.await;
            })
            .await;
        if let Err(e) = result {
            eprintln!("test server stopped with error: {e}");
        }
    });

    TestAppHandle {
        address,
        _shutdown: shutdown,
        _server_task: server_task,
    }
}
