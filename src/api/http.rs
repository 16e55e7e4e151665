//! Implements the `Rest` trait with `reqwest`.

use crate::api::{Body, Method, Reply, Request, Rest};
use crate::Result;
use anyhow::Context;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::trace;
use url::Url;

/// Sends requests to the backend at `base_url`, adding `Authorization: Bearer <token>` when the
/// request carries a token.
pub(super) struct HttpRest {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpRest {
    pub(super) fn new(base_url: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Unable to build the HTTP client")?;
        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).with_context(|| format!("Unable to build a URL for '{path}'"))
    }
}

#[async_trait::async_trait]
impl Rest for HttpRest {
    async fn send(&mut self, request: Request) -> Result<Reply> {
        let url = self.url(&request.path)?;
        trace!("{:?} {url}", request.method);

        let mut builder = match request.method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()),
            Method::Put => self.client.put(url.clone()),
            Method::Delete => self.client.delete(url.clone()),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(json) => builder.json(&json),
            Body::File { name, bytes } => {
                let part = Part::bytes(bytes).file_name(name);
                builder.multipart(Form::new().part("file", part))
            }
        };

        let response = builder
            .send()
            .await
            .with_context(|| format!("Unable to reach {url}"))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .with_context(|| format!("Unable to read the response from {url}"))?;
        trace!("{status} from {url}");

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok(Reply::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_paths() {
        let rest = HttpRest::new(Url::parse("https://keuangan.example.org/backend/").unwrap())
            .unwrap();
        assert_eq!(
            rest.url("/api/income").unwrap().as_str(),
            "https://keuangan.example.org/backend/api/income"
        );
        let rest = HttpRest::new(Url::parse("http://localhost:8000").unwrap()).unwrap();
        assert_eq!(
            rest.url("/login").unwrap().as_str(),
            "http://localhost:8000/login"
        );
    }
}
