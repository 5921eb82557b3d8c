#![allow(dead_code)]
use reqwest::Url;
use serde_json::Value;

/// Thin client over the `/api/v1/` base url.
pub struct TestAppClient {
    url: Url,
    client: reqwest::Client,
}

impl TestAppClient {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    fn todo_url(&self, todo_id: &str) -> Url {
        self.url.join("todos/").unwrap().join(todo_id).unwrap()
    }

    pub async fn health(&self) -> reqwest::Response {
        self.client
            .get(self.url.join("health").unwrap())
            .send()
            .await
            .unwrap()
    }

    pub async fn create_todo(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url.join("todos").unwrap())
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn get_todo(&self, todo_id: &str) -> reqwest::Response {
        self.client
            .get(self.todo_url(todo_id))
            .send()
            .await
            .unwrap()
    }

    pub async fn get_all_todos(&self, query: &[(&str, &str)]) -> reqwest::Response {
        let mut url = self.url.join("todos").unwrap();

        if !query.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in query {
                query_pairs.append_pair(key, value);
            }
        }

        self.client.get(url).send().await.unwrap()
    }

    pub async fn update_todo(&self, todo_id: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.todo_url(todo_id))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn delete_todo(&self, todo_id: &str) -> reqwest::Response {
        self.client
            .delete(self.todo_url(todo_id))
            .send()
            .await
            .unwrap()
    }
}
