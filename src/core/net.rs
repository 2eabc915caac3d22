// src/core/net.rs
// Blocking HTTP over reqwest. Every non-2xx answer becomes Error::Status.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::consts::{
    HTTP_TIMEOUT_SECS, SCRAPE_ACCEPT, SCRAPE_ACCEPT_LANGUAGE, SCRAPE_USER_AGENT,
};
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let inner = Client::builder().timeout(timeout).gzip(true).build()?;
        Ok(Self { inner })
    }

    /// GET a JSON API endpoint with a bearer token. The body is returned
    /// unparsed; the readers under `specs` decode it.
    pub fn get_api<Q>(&self, url: &str, bearer: &str, query: &Q) -> Result<String>
    where
        Q: Serialize + ?Sized,
    {
        let req = self
            .inner
            .get(url)
            .bearer_auth(bearer)
            .header(header::ACCEPT, "application/json")
            .query(query);
        Ok(send(req, url)?.text()?)
    }

    /// GET an HTML page the way a desktop browser would ask for it.
    pub fn get_html(&self, url: &str) -> Result<String> {
        let req = self.inner.get(url).headers(browser_headers());
        Ok(send(req, url)?.text()?)
    }

    /// GET with caller-supplied headers, JSON back.
    pub fn get_with<T: DeserializeOwned>(&self, url: &str, headers: HeaderMap) -> Result<T> {
        let req = self.inner.get(url).headers(headers);
        let body = send(req, url)?.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a JSON body with caller-supplied headers, JSON back.
    pub fn post_json<B, T>(&self, url: &str, headers: HeaderMap, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.inner.post(url).headers(headers).json(body);
        let text = send(req, url)?.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn send(req: RequestBuilder, url: &str) -> Result<Response> {
    let resp = req.send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Status { status: status.as_u16(), url: s!(url) });
    }
    Ok(resp)
}

pub fn browser_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(header::USER_AGENT, HeaderValue::from_static(SCRAPE_USER_AGENT));
    h.insert(header::ACCEPT, HeaderValue::from_static(SCRAPE_ACCEPT));
    h.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(SCRAPE_ACCEPT_LANGUAGE));
    h.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    h
}
