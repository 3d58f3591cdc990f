//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::{
    AccountName, Address, AoMessage, AoRecord, AoToken, ApiResponse, ApplicationName, Carrier,
    CarrierGuid, Channel, ChannelName, Country, CountryIso, CustomAttributes, Password, SendAo,
    SendAoResponse, ValidationError,
};
use crate::transport::{self, ResponseBody, TransportError};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum RequestBody {
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
}

#[derive(Debug, Clone)]
struct BasicAuth {
    username: String,
    password: Password,
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: Url,
    auth: Option<BasicAuth>,
    body: RequestBody,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    /// Header names are lowercase.
    headers: BTreeMap<String, String>,
    body: String,
}

impl HttpResponse {
    fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    fn into_status_error(self) -> NuntiumError {
        let body = if self.body.trim().is_empty() {
            None
        } else {
            Some(self.body)
        };
        NuntiumError::HttpStatus {
            status: self.status,
            body,
        }
    }

    fn into_api_response(self) -> ApiResponse {
        ApiResponse {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

trait HttpTransport: Send + Sync {
    fn send<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method.into(), request.url);
            if let Some(auth) = request.auth.as_ref() {
                builder = builder.basic_auth(&auth.username, Some(auth.password.as_str()));
            }
            builder = match request.body {
                RequestBody::Empty => builder,
                RequestBody::Json(body) => builder.json(&body),
                RequestBody::Form(params) => builder.form(&params),
            };

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_owned(), value.to_owned()))
                })
                .collect();
            let body = response.text().await?;
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        })
    }
}

#[derive(Clone)]
/// Application credentials for Nuntium API calls.
///
/// Requests are authenticated with HTTP basic auth using
/// `"{account}/{application}"` as the user name and the application password.
pub struct Credentials {
    account: AccountName,
    application: ApplicationName,
    password: Password,
}

impl Credentials {
    /// Create credentials, validating that every part is non-empty.
    pub fn new(
        account: impl Into<String>,
        application: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account: AccountName::new(account)?,
            application: ApplicationName::new(application)?,
            password: Password::new(password)?,
        })
    }

    pub fn account(&self) -> &AccountName {
        &self.account
    }

    pub fn application(&self) -> &ApplicationName {
        &self.application
    }

    /// Basic-auth user name: `"{account}/{application}"`.
    pub fn username(&self) -> String {
        format!("{}/{}", self.account.as_str(), self.application.as_str())
    }

    fn basic_auth(&self) -> BasicAuth {
        BasicAuth {
            username: self.username(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("application", &self.application)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`NuntiumClient`].
///
/// "Not found" is not an error: lookups return `Ok(None)` for it.
pub enum NuntiumError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected shape.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),

    /// Base URL could not be used to build endpoint URLs.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<TransportError> for NuntiumError {
    fn from(value: TransportError) -> Self {
        Self::Parse(Box::new(value))
    }
}

#[derive(Debug, Clone)]
/// Builder for [`NuntiumClient`].
///
/// Use this when you need to customize the timeout or user-agent.
pub struct NuntiumClientBuilder {
    base_url: String,
    credentials: Credentials,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl NuntiumClientBuilder {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`NuntiumClient`].
    pub fn build(self) -> Result<NuntiumClient, NuntiumError> {
        let base_url = parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| NuntiumError::Transport(Box::new(err)))?;

        Ok(NuntiumClient {
            base_url,
            credentials: self.credentials,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, NuntiumError> {
    let url = Url::parse(raw.trim()).map_err(|err| NuntiumError::InvalidUrl(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(NuntiumError::InvalidUrl(format!("{url} cannot be a base")));
    }
    Ok(url)
}

#[derive(Clone)]
/// High-level Nuntium client.
///
/// Every method issues exactly one HTTP request relative to the configured
/// base URL. Country and carrier lookups are anonymous; everything else is
/// authenticated with the application [`Credentials`].
///
/// Lookups return `Ok(None)` when the server answers with its "not found"
/// string instead of a JSON object.
pub struct NuntiumClient {
    base_url: Url,
    credentials: Credentials,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for NuntiumClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NuntiumClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl NuntiumClient {
    /// Create a client with default transport settings.
    ///
    /// For more customization, use [`NuntiumClient::builder`].
    pub fn new(base_url: impl AsRef<str>, credentials: Credentials) -> Result<Self, NuntiumError> {
        Ok(Self {
            base_url: parse_base_url(base_url.as_ref())?,
            credentials,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        })
    }

    /// Start building a client with custom settings.
    pub fn builder(base_url: impl Into<String>, credentials: Credentials) -> NuntiumClientBuilder {
        NuntiumClientBuilder::new(base_url, credentials)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// List every country known to Nuntium.
    pub async fn list_countries(&self) -> Result<Vec<Country>, NuntiumError> {
        let url = self.endpoint(&["api", "countries.json"])?;
        let response = self.anonymous(HttpMethod::Get, url).await?;
        let response = ensure_success(response)?;
        Ok(transport::decode_countries(&response.body)?)
    }

    /// Get a country by its ISO2 or ISO3 code, or `None` if there is no such country.
    pub async fn get_country(&self, iso: &CountryIso) -> Result<Option<Country>, NuntiumError> {
        let file = format!("{}.json", iso.as_str());
        let url = self.endpoint(&["api", "countries", file.as_str()])?;
        let response = self.anonymous(HttpMethod::Get, url).await?;
        match classify_lookup(response)? {
            Some(value) => Ok(Some(transport::decode_country(value)?)),
            None => Ok(None),
        }
    }

    /// List carriers, optionally only those of one country (ISO2 or ISO3 code).
    pub async fn list_carriers(
        &self,
        country: Option<&CountryIso>,
    ) -> Result<Vec<Carrier>, NuntiumError> {
        let mut url = self.endpoint(&["api", "carriers.json"])?;
        if let Some(country) = country {
            url.query_pairs_mut()
                .append_pair("country_id", country.as_str());
        }
        let response = self.anonymous(HttpMethod::Get, url).await?;
        let response = ensure_success(response)?;
        Ok(transport::decode_carriers(&response.body)?)
    }

    /// Get a carrier by GUID, or `None` if there is no such carrier.
    pub async fn get_carrier(&self, guid: &CarrierGuid) -> Result<Option<Carrier>, NuntiumError> {
        let file = format!("{}.json", guid.as_str());
        let url = self.endpoint(&["api", "carriers", file.as_str()])?;
        let response = self.anonymous(HttpMethod::Get, url).await?;
        match classify_lookup(response)? {
            Some(value) => Ok(Some(transport::decode_carrier(value)?)),
            None => Ok(None),
        }
    }

    /// List the channels of the application plus those not bound to any application.
    pub async fn list_channels(&self) -> Result<Option<Vec<Channel>>, NuntiumError> {
        let url = self.endpoint(&["api", "channels.json"])?;
        let response = self
            .authenticated(HttpMethod::Get, url, RequestBody::Empty)
            .await?;
        match classify_lookup(response)? {
            Some(value) => Ok(Some(transport::decode_channels(value)?)),
            None => Ok(None),
        }
    }

    /// Get a channel by name, or `None` if it does not exist.
    ///
    /// A 404 with any body, or a 2xx with a text or `null` body, means the
    /// channel does not exist.
    ///
    /// Errors:
    /// - [`NuntiumError::HttpStatus`] for any other non-2xx response, whatever
    ///   its body (a 401 with a text body included).
    pub async fn get_channel(&self, name: &ChannelName) -> Result<Option<Channel>, NuntiumError> {
        let url = self.channel_endpoint(name)?;
        let response = self
            .authenticated(HttpMethod::Get, url, RequestBody::Empty)
            .await?;
        return_channel(response)
    }

    /// Create a channel. `configuration` is sent as a list of `{name, value}` records.
    ///
    /// Errors:
    /// - [`NuntiumError::HttpStatus`] when the server rejects the channel
    ///   (the body usually carries the validation errors).
    pub async fn create_channel(&self, channel: &Channel) -> Result<Option<Channel>, NuntiumError> {
        let url = self.endpoint(&["api", "channels.json"])?;
        let body = transport::encode_channel_json(channel)
            .map_err(|err| NuntiumError::Parse(Box::new(err)))?;
        let response = self
            .authenticated(HttpMethod::Post, url, RequestBody::Json(body))
            .await?;
        return_channel(response)
    }

    /// Update the channel named `channel.name`.
    pub async fn update_channel(&self, channel: &Channel) -> Result<Option<Channel>, NuntiumError> {
        let url = self.channel_endpoint(&channel.name)?;
        let body = transport::encode_channel_json(channel)
            .map_err(|err| NuntiumError::Parse(Box::new(err)))?;
        let response = self
            .authenticated(HttpMethod::Put, url, RequestBody::Json(body))
            .await?;
        return_channel(response)
    }

    /// Delete a channel by name. The response is returned as-is.
    pub async fn delete_channel(&self, name: &ChannelName) -> Result<ApiResponse, NuntiumError> {
        let url = self.endpoint(&["api", "channels", name.as_str()])?;
        let response = self
            .authenticated(HttpMethod::Delete, url, RequestBody::Empty)
            .await?;
        Ok(ensure_success(response)?.into_api_response())
    }

    /// Channels that routing would consider for `message`, without sending it.
    pub async fn candidate_channels_for_ao(
        &self,
        message: &AoMessage,
    ) -> Result<Option<Vec<Channel>>, NuntiumError> {
        let url = self.endpoint(&["api", "candidate", "channels.json"])?;
        let body = RequestBody::Form(transport::encode_ao_form(message));
        let response = self.authenticated(HttpMethod::Get, url, body).await?;
        match classify_lookup(response)? {
            Some(value) => Ok(Some(transport::decode_channels(value)?)),
            None => Ok(None),
        }
    }

    /// Send one AO message (form-encoded to `send_ao`) or a batch (JSON array
    /// to `send_ao.json`).
    ///
    /// The result carries the `x-nuntium-id`, `x-nuntium-token` and
    /// `x-nuntium-guid` headers on both paths. Set [`AoMessage::token`] to
    /// choose the token yourself.
    pub async fn send_ao(&self, request: &SendAo) -> Result<SendAoResponse, NuntiumError> {
        let (url, body) = match request {
            SendAo::One(message) => (
                self.application_endpoint("send_ao")?,
                RequestBody::Form(transport::encode_ao_form(message)),
            ),
            SendAo::Many(batch) => (
                self.application_endpoint("send_ao.json")?,
                RequestBody::Json(transport::encode_ao_batch_json(batch.messages())),
            ),
        };
        let response = self.authenticated(HttpMethod::Post, url, body).await?;
        let response = ensure_success(response)?;
        let result =
            transport::decode_send_ao_response(response.status, &response.headers, response.body);
        debug!(
            messages = request.len(),
            id = ?result.id,
            guid = ?result.guid,
            "nuntium accepted AO"
        );
        Ok(result)
    }

    /// Get the AO messages sent with `token`.
    pub async fn get_ao(&self, token: &AoToken) -> Result<Vec<AoRecord>, NuntiumError> {
        let mut url = self.application_endpoint("get_ao.json")?;
        url.query_pairs_mut()
            .append_pair(AoToken::FIELD, token.as_str());
        let response = self
            .authenticated(HttpMethod::Get, url, RequestBody::Empty)
            .await?;
        let response = ensure_success(response)?;
        Ok(transport::decode_ao_records(&response.body)?)
    }

    /// Custom attributes stored for `address`, or `None` if the server answers
    /// with anything other than a JSON object.
    pub async fn get_custom_attributes(
        &self,
        address: &Address,
    ) -> Result<Option<CustomAttributes>, NuntiumError> {
        let url = self.custom_attributes_endpoint(address)?;
        let response = self
            .authenticated(HttpMethod::Get, url, RequestBody::Empty)
            .await?;
        match classify_lookup(response)? {
            Some(value) => Ok(transport::decode_custom_attributes(
                ResponseBody::Structured(value),
            )),
            None => Ok(None),
        }
    }

    /// Replace the custom attributes of `address`. The response is returned as-is.
    pub async fn set_custom_attributes(
        &self,
        address: &Address,
        attributes: &CustomAttributes,
    ) -> Result<ApiResponse, NuntiumError> {
        let url = self.custom_attributes_endpoint(address)?;
        let body = RequestBody::Form(transport::encode_custom_attributes_form(attributes));
        let response = self.authenticated(HttpMethod::Post, url, body).await?;
        Ok(ensure_success(response)?.into_api_response())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, NuntiumError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| NuntiumError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn channel_endpoint(&self, name: &ChannelName) -> Result<Url, NuntiumError> {
        let file = format!("{}.json", name.as_str());
        self.endpoint(&["api", "channels", file.as_str()])
    }

    fn application_endpoint(&self, action: &str) -> Result<Url, NuntiumError> {
        self.endpoint(&[
            self.credentials.account.as_str(),
            self.credentials.application.as_str(),
            action,
        ])
    }

    fn custom_attributes_endpoint(&self, address: &Address) -> Result<Url, NuntiumError> {
        let mut url = self.endpoint(&["api", "custom_attributes"])?;
        url.query_pairs_mut()
            .append_pair(Address::FIELD, address.as_str());
        Ok(url)
    }

    async fn anonymous(&self, method: HttpMethod, url: Url) -> Result<HttpResponse, NuntiumError> {
        self.execute(HttpRequest {
            method,
            url,
            auth: None,
            body: RequestBody::Empty,
        })
        .await
    }

    async fn authenticated(
        &self,
        method: HttpMethod,
        url: Url,
        body: RequestBody,
    ) -> Result<HttpResponse, NuntiumError> {
        self.execute(HttpRequest {
            method,
            url,
            auth: Some(self.credentials.basic_auth()),
            body,
        })
        .await
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, NuntiumError> {
        let method = request.method;
        let url = request.url.clone();
        debug!(method = method.as_str(), url = %url, "nuntium request");

        let response = self
            .http
            .send(request)
            .await
            .map_err(NuntiumError::Transport)?;

        debug!(
            method = method.as_str(),
            url = %url,
            status = response.status,
            "nuntium response"
        );
        Ok(response)
    }
}

fn ensure_success(response: HttpResponse) -> Result<HttpResponse, NuntiumError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(response.into_status_error())
    }
}

/// Shared not-found handling for lookups.
///
/// A 404 means "not found" whatever its body, and so does a text or `null`
/// body on a 2xx. Other non-2xx statuses are errors even with a text body, so
/// an auth failure is never mistaken for a missing entity.
fn classify_lookup(response: HttpResponse) -> Result<Option<Value>, NuntiumError> {
    if response.status == 404 {
        debug!(status = response.status, "nuntium lookup not found");
        return Ok(None);
    }
    if !response.is_success() {
        return Err(response.into_status_error());
    }
    match transport::classify_body(&response.body) {
        ResponseBody::Text(text) => {
            debug!(status = response.status, sentinel = %text, "nuntium lookup not found");
            Ok(None)
        }
        ResponseBody::Structured(Value::Null) => {
            debug!(status = response.status, "nuntium lookup returned null");
            Ok(None)
        }
        ResponseBody::Structured(value) => Ok(Some(value)),
    }
}

fn return_channel(response: HttpResponse) -> Result<Option<Channel>, NuntiumError> {
    match classify_lookup(response)? {
        Some(value) => Ok(Some(transport::decode_channel(value)?)),
        None => Ok(None),
    }
}
