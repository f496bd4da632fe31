//! REST implementation of [`VaultClient`] over `reqwest`.

use super::model::{Account, AccountQuery, CcpCredential, Platform, Safe, ServerInfo, User};
use super::{ClientSettings, Connector, Credentials, VaultClient};
use crate::config::CcpConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

const API_ROOT: &str = "PasswordVault/API";
const VERIFY_PATH: &str = "PasswordVault/WebServices/PIMServices.svc/Verify";
const CCP_PATH: &str = "AIMWebService/api/Accounts";

/// Builds [`HttpVaultClient`]s.
#[derive(Debug, Default, Clone)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    fn connect(&self, settings: &ClientSettings) -> Result<Arc<dyn VaultClient>, ApiError> {
        Ok(Arc::new(HttpVaultClient::new(settings)?))
    }
}

pub struct HttpVaultClient {
    http: Client,
    base_url: String,
}

/// `{"value": [...], "count": n}` wrapper used by accounts and safes.
#[derive(Deserialize)]
struct ValueList<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UserList {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PlatformList {
    #[serde(default)]
    platforms: Vec<Platform>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "ErrorMessage", alias = "errorMessage", alias = "Details")]
    message: Option<String>,
}

impl HttpVaultClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&settings.server)?;
        let http = Client::builder()
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn api(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(&format!("{}/{}", API_ROOT, path)))
            .header(reqwest::header::AUTHORIZATION, token)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = check(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Map non-success responses to an [`ApiError`], keeping the server message.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.trim().to_string());
    debug!(status = status.as_u16(), url = %url, "Vault request failed");
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(if message.is_empty() { url } else { message }),
        _ => ApiError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

fn normalize_base_url(server: &str) -> Result<String, ApiError> {
    let server = server.trim().trim_end_matches('/');
    if server.is_empty() {
        return Err(ApiError::Config(
            "No server configured (use 'set server <url>' or --server)".to_string(),
        ));
    }
    if server.starts_with("http://") || server.starts_with("https://") {
        Ok(server.to_string())
    } else {
        Ok(format!("https://{}", server))
    }
}

#[async_trait]
impl VaultClient for HttpVaultClient {
    async fn verify(&self) -> Result<ServerInfo, ApiError> {
        self.send_json(self.http.get(self.url(VERIFY_PATH))).await
    }

    async fn logon(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let url = self.url(&format!(
            "{}/auth/{}/Logon",
            API_ROOT,
            credentials.method.endpoint_name()
        ));
        let body = json!({
            "username": credentials.username,
            "password": credentials.password,
            "concurrentSession": true,
        });
        let token: String = self.send_json(self.http.post(url).json(&body)).await?;
        if token.is_empty() {
            return Err(ApiError::InvalidResponse("empty session token".to_string()));
        }
        Ok(token)
    }

    async fn logoff(&self, token: &str) -> Result<(), ApiError> {
        let request = self.api(Method::POST, "auth/Logoff", token);
        check(request.send().await?).await?;
        Ok(())
    }

    async fn list_accounts(
        &self,
        token: &str,
        query: &AccountQuery,
    ) -> Result<Vec<Account>, ApiError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(search) = &query.search {
            params.push(("search", search.clone()));
        }
        if let Some(safe) = &query.safe {
            params.push(("filter", format!("safeName eq {}", safe)));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = query.offset {
            params.push(("offset", offset.to_string()));
        }
        let request = self.api(Method::GET, "Accounts", token).query(&params);
        let list: ValueList<Account> = self.send_json(request).await?;
        Ok(list.value)
    }

    async fn get_account(&self, token: &str, id: &str) -> Result<Account, ApiError> {
        let request = self.api(Method::GET, &format!("Accounts/{}", id), token);
        self.send_json(request).await
    }

    async fn retrieve_password(
        &self,
        token: &str,
        id: &str,
        reason: Option<&str>,
    ) -> Result<String, ApiError> {
        let body = match reason {
            Some(reason) => json!({ "reason": reason }),
            None => json!({}),
        };
        let request = self
            .api(Method::POST, &format!("Accounts/{}/Password/Retrieve", id), token)
            .json(&body);
        self.send_json(request).await
    }

    async fn delete_account(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let request = self.api(Method::DELETE, &format!("Accounts/{}", id), token);
        check(request.send().await?).await?;
        Ok(())
    }

    async fn list_safes(&self, token: &str, search: Option<&str>) -> Result<Vec<Safe>, ApiError> {
        let mut request = self.api(Method::GET, "Safes", token);
        if let Some(search) = search {
            request = request.query(&[("search", search)]);
        }
        let list: ValueList<Safe> = self.send_json(request).await?;
        Ok(list.value)
    }

    async fn get_safe(&self, token: &str, name: &str) -> Result<Safe, ApiError> {
        let request = self.api(Method::GET, &format!("Safes/{}", name), token);
        self.send_json(request).await
    }

    async fn list_users(&self, token: &str, search: Option<&str>) -> Result<Vec<User>, ApiError> {
        let mut request = self.api(Method::GET, "Users", token);
        if let Some(search) = search {
            request = request.query(&[("search", search)]);
        }
        let list: UserList = self.send_json(request).await?;
        Ok(list.users)
    }

    async fn get_user(&self, token: &str, id: i64) -> Result<User, ApiError> {
        let request = self.api(Method::GET, &format!("Users/{}", id), token);
        self.send_json(request).await
    }

    async fn list_platforms(
        &self,
        token: &str,
        active_only: bool,
    ) -> Result<Vec<Platform>, ApiError> {
        let mut request = self.api(Method::GET, "Platforms", token);
        if active_only {
            request = request.query(&[("Active", "true")]);
        }
        let list: PlatformList = self.send_json(request).await?;
        Ok(list.platforms)
    }

    async fn fetch_ccp_credential(&self, ccp: &CcpConfig) -> Result<CcpCredential, ApiError> {
        let base = normalize_base_url(&ccp.url)?;
        let request = self.http.get(format!("{}/{}", base, CCP_PATH)).query(&[
            ("AppID", ccp.app_id.as_str()),
            ("Safe", ccp.safe.as_str()),
            ("Object", ccp.object.as_str()),
        ]);
        self.send_json(request).await
    }
}
