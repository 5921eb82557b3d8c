#![allow(dead_code, unused_imports)]

mod client;
mod server;

use axum::Router;
pub use client::TestAppClient;
use todo_api::{build_app, init_storage, Service, Settings, TestStorageBuilder};

pub use server::{spawn_test_app, TestAppHandle};

pub async fn create_test_app() -> Router {
    let builder = TestStorageBuilder::new().await;
    let (todo_storage, _) = builder.build_todo().await;
    let close_storage = builder.build_close().await;

    build_app(Service::new(todo_storage, close_storage))
}

/// Builds the app the way the binary does, from `config/<settings_file>.toml`.
pub async fn create_app_from_settings(settings_file: &str) -> Router {
    let settings = Settings::from_file(settings_file).unwrap();
    let service = init_storage(&settings).await.unwrap();

    build_app(service)
}
