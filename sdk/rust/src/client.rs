use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope returned by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub code: u32,
    pub info: Option<String>,
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub amount: Option<u64>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub responses: Option<Vec<ApiEnvelope>>,
}

impl ApiEnvelope {
    /// True when the semantic code is in the success class.
    pub fn is_success(&self) -> bool {
        self.code / 1000 == 200
    }
}

pub struct AuthClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
            token: None,
        }
    }

    /// Attach an access token sent as X-Auth-Token on every call.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.header("X-Auth-Token", token);
        }
        builder
    }

    /// Check whether authentication is enforced on the server.
    pub async fn auth_status(&self) -> Result<ApiEnvelope, Box<dyn std::error::Error>> {
        let resp = self.request(reqwest::Method::GET, "/auth/status").send().await?;
        Ok(resp.json().await?)
    }

    /// Authenticate with name and password.
    pub async fn login(
        &self,
        name: &str,
        password: &str,
    ) -> Result<ApiEnvelope, Box<dyn std::error::Error>> {
        let resp = self
            .request(reqwest::Method::POST, "/user/login")
            .json(&serde_json::json!({ "name": name, "password": password }))
            .send()
            .await?;
        Ok(resp.json().await?)
    }

    /// Create a batch of users; each entry is one user message.
    pub async fn create_users(
        &self,
        users: &[Value],
    ) -> Result<ApiEnvelope, Box<dyn std::error::Error>> {
        let resp = self
            .request(reqwest::Method::POST, "/users")
            .json(&users)
            .send()
            .await?;
        Ok(resp.json().await?)
    }

    /// List users matching the given query parameters.
    pub async fn get_users(
        &self,
        params: &[(&str, &str)],
    ) -> Result<ApiEnvelope, Box<dyn std::error::Error>> {
        let resp = self
            .request(reqwest::Method::GET, "/users")
            .query(params)
            .send()
            .await?;
        Ok(resp.json().await?)
    }

    /// Fetch one user's token by user id.
    pub async fn get_user_token(
        &self,
        id: &str,
    ) -> Result<ApiEnvelope, Box<dyn std::error::Error>> {
        let resp = self
            .request(reqwest::Method::GET, "/user/token")
            .query(&[("id", id)])
            .send()
            .await?;
        Ok(resp.json().await?)
    }
}
