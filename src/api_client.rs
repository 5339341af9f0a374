// HTTP surface of the API under test. The server is a black box reached only
// through these four endpoints; each call yields one latency sample.

use crate::error::HarnessError;
use std::time::{Duration, Instant};

/// Status and elapsed wall-clock time of one settled request.
#[derive(Debug, Clone, Copy)]
pub struct CallOutcome {
    pub status: u16,
    pub elapsed: Duration,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /status - readiness probe. Any response at all counts as "up".
    pub async fn status(&self) -> Result<CallOutcome, HarnessError> {
        let started = Instant::now();
        let res = self
            .http
            .get(format!("{}/status", self.base_url))
            .send()
            .await?;
        Ok(CallOutcome {
            status: res.status().as_u16(),
            elapsed: started.elapsed(),
        })
    }

    /// GET /login/?login=..&password=..
    pub async fn login(&self, login: &str, password: &str) -> Result<CallOutcome, HarnessError> {
        let started = Instant::now();
        let res = self
            .http
            .get(format!("{}/login/", self.base_url))
            .query(&[("login", login), ("password", password)])
            .send()
            .await?;
        Ok(CallOutcome {
            status: res.status().as_u16(),
            elapsed: started.elapsed(),
        })
    }

    /// POST /feedback/ with a JSON body {name, message}.
    pub async fn submit_feedback(
        &self,
        name: &str,
        message: &str,
    ) -> Result<CallOutcome, HarnessError> {
        let started = Instant::now();
        let res = self
            .http
            .post(format!("{}/feedback/", self.base_url))
            .json(&serde_json::json!({ "name": name, "message": message }))
            .send()
            .await?;
        Ok(CallOutcome {
            status: res.status().as_u16(),
            elapsed: started.elapsed(),
        })
    }

    /// GET /auth/ with a raw Authorization header.
    pub async fn auth(&self, token: &str) -> Result<CallOutcome, HarnessError> {
        let started = Instant::now();
        let res = self
            .http
            .get(format!("{}/auth/", self.base_url))
            .header(reqwest::header::AUTHORIZATION, token)
            .send()
            .await?;
        Ok(CallOutcome {
            status: res.status().as_u16(),
            elapsed: started.elapsed(),
        })
    }
}
