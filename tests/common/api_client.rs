use std::str::FromStr;

use authgate::web::response::ApiResponse;
use reqwest::{Response, Url, header};
use serde::{Serialize, de::DeserializeOwned};

pub struct ApiClient {
    pub url: String,
    pub client: reqwest::Client,
}

impl ApiClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn path(&self, endpoint: &str) -> Url {
        Url::from_str(&format!("{}/{endpoint}", self.url)).expect("Invalid test url")
    }

    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Response {
        self.client
            .post(self.path(endpoint))
            .json(body)
            .send()
            .await
            .expect("Failed to send http request")
    }

    pub async fn post_raw(&self, endpoint: &str, body: &'static str) -> Response {
        self.client
            .post(self.path(endpoint))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send http request")
    }

    pub async fn get_with_token(&self, endpoint: &str, token: &str) -> Response {
        self.client
            .get(self.path(endpoint))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to send http request")
    }
}

pub async fn envelope<T: DeserializeOwned>(response: Response) -> ApiResponse<T> {
    response.json().await.expect("Couldn't Parse Value")
}
