use reqwest::{Client, Response, Url};
use serde::Deserialize;
use tracing::{debug, info};

use super::error::DirectoryError;
use super::model::{ApplicationPage, ApplicationRegistration};
use super::DirectoryClient;
use crate::settings::{RunSettings, Secret};

const TOKEN_PATH: &str = "oauth2/v2.0/token";
const APPLICATIONS_PATH: &str = "v1.0/applications";
const APPLICATION_FIELDS: &str = "appId,displayName,tags,passwordCredentials";
const MAX_PAGES: usize = 1000;

/// Microsoft Graph client authenticated with the OAuth2 client-credentials
/// grant.
///
/// A token is requested for every listing; the tool makes one listing per
/// run, so there is no token cache.
#[derive(Debug)]
pub struct GraphClient {
    http: Client,
    token_url: Url,
    applications_url: Url,
    scope: String,
    client_id: String,
    client_secret: Secret,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct OAuthErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Deserialize)]
struct GraphErrorBody {
    error: GraphErrorDetail,
}

#[derive(Deserialize)]
struct GraphErrorDetail {
    code: Option<String>,
    message: Option<String>,
}

impl GraphClient {
    /// Creates a client for the tenant, credentials and endpoints in
    /// `settings`. No network access happens here.
    pub fn new(settings: &RunSettings) -> Result<Self, DirectoryError> {
        let authority = endpoint_base("authority_host", &settings.authority_host)?;
        let graph = endpoint_base("graph_endpoint", &settings.graph_endpoint)?;

        let token_url = join_endpoint(
            "authority_host",
            &authority,
            &format!("{}/{}", settings.tenant_id.trim(), TOKEN_PATH),
        )?;
        let mut applications_url = join_endpoint("graph_endpoint", &graph, APPLICATIONS_PATH)?;
        applications_url
            .query_pairs_mut()
            .append_pair("$select", APPLICATION_FIELDS);

        let http = Client::builder()
            .user_agent(concat!("azure-secret-monitor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DirectoryError::ClientBuild)?;

        Ok(Self {
            http,
            token_url,
            applications_url,
            scope: format!("{graph}/.default"),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
        })
    }

    #[cfg(test)]
    fn token_url(&self) -> &Url {
        &self.token_url
    }

    #[cfg(test)]
    fn applications_url(&self) -> &Url {
        &self.applications_url
    }

    async fn acquire_token(&self) -> Result<String, DirectoryError> {
        debug!(url = %self.token_url, client_id = %self.client_id, "requesting access token");

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose()),
            ("grant_type", "client_credentials"),
            ("scope", self.scope.as_str()),
        ];
        let response = self
            .http
            .post(self.token_url.clone())
            .form(&params)
            .send()
            .await
            .map_err(DirectoryError::TokenRequest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Authentication {
                status: status.as_u16(),
                message: token_error_message(&body_text(response).await),
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|source| DirectoryError::Decode {
                what: "token response",
                source,
            })?;
        Ok(token.access_token)
    }

    /// Next links must stay on the Graph origin the token was issued for.
    fn checked_next_link(&self, link: String) -> Result<String, DirectoryError> {
        let same_origin = Url::parse(&link).is_ok_and(|url| {
            url.scheme() == self.applications_url.scheme()
                && url.host_str() == self.applications_url.host_str()
                && url.port_or_known_default() == self.applications_url.port_or_known_default()
        });
        if same_origin {
            Ok(link)
        } else {
            Err(DirectoryError::ForeignNextLink(link))
        }
    }

    async fn fetch_page(&self, url: &str, token: &str) -> Result<ApplicationPage, DirectoryError> {
        debug!(%url, "fetching applications page");

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(DirectoryError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: graph_error_message(&body_text(response).await),
            });
        }

        response
            .json()
            .await
            .map_err(|source| DirectoryError::Decode {
                what: "applications response",
                source,
            })
    }
}

impl DirectoryClient for GraphClient {
    async fn list_applications(&self) -> Result<Vec<ApplicationRegistration>, DirectoryError> {
        let token = self.acquire_token().await?;

        let mut applications = Vec::new();
        let mut next = Some(self.applications_url.to_string());
        let mut pages = 0;

        while let Some(url) = next {
            if pages == MAX_PAGES {
                return Err(DirectoryError::TooManyPages(MAX_PAGES));
            }
            let page = self.fetch_page(&url, &token).await?;
            pages += 1;
            applications.extend(page.value);
            next = page
                .next_link
                .map(|link| self.checked_next_link(link))
                .transpose()?;
        }

        info!(applications = applications.len(), pages, "listed application registrations");
        Ok(applications)
    }
}

/// Parses a configured endpoint and strips any trailing slash.
fn endpoint_base(setting: &'static str, value: &str) -> Result<String, DirectoryError> {
    let trimmed = value.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| DirectoryError::InvalidEndpoint {
        setting,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DirectoryError::InvalidEndpoint {
            setting,
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(trimmed.to_string())
}

fn join_endpoint(setting: &'static str, base: &str, path: &str) -> Result<Url, DirectoryError> {
    let joined = format!("{base}/{path}");
    Url::parse(&joined).map_err(|e| DirectoryError::InvalidEndpoint {
        setting,
        value: joined,
        reason: e.to_string(),
    })
}

async fn body_text(response: Response) -> String {
    response.text().await.unwrap_or_default()
}

fn token_error_message(body: &str) -> String {
    match serde_json::from_str::<OAuthErrorBody>(body) {
        Ok(OAuthErrorBody {
            error_description: Some(description),
            ..
        }) => first_line(&description),
        Ok(OAuthErrorBody {
            error: Some(error), ..
        }) => error,
        _ => raw_body_message(body),
    }
}

fn graph_error_message(body: &str) -> String {
    match serde_json::from_str::<GraphErrorBody>(body) {
        Ok(GraphErrorBody { error }) => match (error.code, error.message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (None, Some(message)) => message,
            (Some(code), None) => code,
            (None, None) => raw_body_message(body),
        },
        Err(_) => raw_body_message(body),
    }
}

// Entra ID descriptions carry trace and correlation ids on later lines.
fn first_line(s: &str) -> String {
    s.lines().next().unwrap_or_default().trim().to_string()
}

fn raw_body_message(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        "empty response body".to_string()
    } else {
        body.to_string()
    }
}
