//! Client layer: configuration, authentication, and the send/retry loop.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{AccountSid, AuthToken, SendMessage, SenderNumber, ValidationError};

const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Maximum message length in bytes for a single SMS segment.
pub const SINGLE_MESSAGE_MAX_BYTES: usize = 160;

/// Maximum message length in bytes when the account sends concatenated
/// (multi-segment) messages.
pub const CONCATENATED_MESSAGE_MAX_BYTES: usize = 1600;

/// Upper bound on a single backoff delay between rate-limited attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(4);

const HTTP_TOO_MANY_REQUESTS: u16 = 429;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    status_line: String,
}

trait HttpTransport: Send + Sync + std::fmt::Debug {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: (&'a str, &'a str),
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: (&'a str, &'a str),
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let (username, password) = auth;
            // `.form` sets `Content-Type: application/x-www-form-urlencoded`.
            let response = self
                .client
                .post(url)
                .basic_auth(username, Some(password))
                .header(reqwest::header::ACCEPT, "application/json")
                .form(&params)
                .send()
                .await?;
            let status = response.status();
            Ok(HttpResponse {
                status: status.as_u16(),
                status_line: status.to_string(),
            })
        })
    }
}

#[derive(Debug, Clone)]
/// Validated account configuration for one sender identity.
///
/// Holds the credential pair, the sender number, the derived maximum message
/// length, and the per-attempt HTTP timeout. Read-only once constructed.
pub struct Config {
    account_sid: AccountSid,
    auth_token: AuthToken,
    from: SenderNumber,
    max_msg_len: usize,
    timeout: Duration,
}

impl Config {
    /// Validate and assemble a [`Config`].
    ///
    /// Required fields are checked in a fixed order: account SID, then auth
    /// token, then sender number; the error names the first missing one.
    /// `enable_concatenation` selects the maximum message length
    /// ([`SINGLE_MESSAGE_MAX_BYTES`] or [`CONCATENATED_MESSAGE_MAX_BYTES`]).
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from: impl Into<String>,
        timeout: Duration,
        enable_concatenation: bool,
    ) -> Result<Self, ValidationError> {
        let account_sid = AccountSid::new(account_sid)?;
        let auth_token = AuthToken::new(auth_token)?;
        let from = SenderNumber::new(from)?;

        let max_msg_len = if enable_concatenation {
            CONCATENATED_MESSAGE_MAX_BYTES
        } else {
            SINGLE_MESSAGE_MAX_BYTES
        };

        Ok(Self {
            account_sid,
            auth_token,
            from,
            max_msg_len,
            timeout,
        })
    }

    pub fn account_sid(&self) -> &AccountSid {
        &self.account_sid
    }

    /// The sender number messages are delivered from.
    pub fn sender(&self) -> &SenderNumber {
        &self.from
    }

    /// Maximum message body length in bytes, fixed at construction.
    pub fn max_msg_len(&self) -> usize {
        self.max_msg_len
    }

    /// Timeout applied to each individual HTTP attempt.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Display for Config {
    /// Shows the account SID only; the auth token never appears in any
    /// textual representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.account_sid.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TwilioClient`].
pub enum TwilioError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc). Surfaced
    /// immediately; never retried.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-2xx HTTP status from the API, including a 429 that survived the
    /// retry loop. Displays the status line verbatim, e.g. `400 Bad Request`.
    #[error("{status_line}")]
    Remote { status_line: String },

    /// A domain constructor or send precondition rejected the input.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this when you need to point the client at a different API base (e.g.
/// a mock server) or override the user-agent.
pub struct TwilioClientBuilder {
    config: Config,
    api_base: String,
    user_agent: Option<String>,
}

impl TwilioClientBuilder {
    /// Create a builder with the default API base and no user-agent override.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            api_base: DEFAULT_API_BASE.to_owned(),
            user_agent: None,
        }
    }

    /// Override the API base URL (scheme and host).
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TwilioClient`].
    ///
    /// Fails if the API base is not a parseable URL or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<TwilioClient, TwilioError> {
        Url::parse(&self.api_base).map_err(|err| TwilioError::Transport(Box::new(err)))?;

        let mut builder = reqwest::Client::builder().timeout(self.config.timeout());
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TwilioError::Transport(Box::new(err)))?;

        Ok(TwilioClient {
            config: self.config,
            api_base: self.api_base,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone, Debug)]
/// Twilio Messages API client.
///
/// One [`TwilioClient::send_message`] call performs exactly one logical send,
/// including its rate-limit retries. The client is cheap to clone and safe to
/// share across tasks: the configuration is read-only and the underlying
/// HTTP client multiplexes concurrent requests.
pub struct TwilioClient {
    config: Config,
    api_base: String,
    http: Arc<dyn HttpTransport>,
}

impl TwilioClient {
    /// Create a client against the production API base.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(config: Config) -> Self {
        let http = ReqwestTransport {
            client: reqwest::Client::new(),
        };
        Self {
            config,
            api_base: DEFAULT_API_BASE.to_owned(),
            http: Arc::new(http),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(config: Config) -> TwilioClientBuilder {
        TwilioClientBuilder::new(config)
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send one SMS through the Messages API.
    ///
    /// The body length is checked against [`Config::max_msg_len`] before any
    /// network activity. A valid request is POSTed form-encoded with Basic
    /// auth; a 429 response is retried with a doubling delay of 1, 2, then 4
    /// seconds, and any other status ends the loop immediately.
    ///
    /// Errors:
    /// - [`TwilioError::Validation`] when the body exceeds the configured
    ///   limit (no request is made),
    /// - [`TwilioError::Transport`] for connection-level failures (never
    ///   retried),
    /// - [`TwilioError::Remote`] for any non-2xx status, carrying the status
    ///   line verbatim.
    pub async fn send_message(&self, request: SendMessage) -> Result<(), TwilioError> {
        if request.body().len() > self.config.max_msg_len {
            return Err(ValidationError::MessageTooLong {
                max: self.config.max_msg_len,
            }
            .into());
        }

        let url = crate::transport::messages_url(&self.api_base, &self.config.account_sid);
        let params = crate::transport::encode_send_message_form(&request, &self.config.from);
        let auth = (
            self.config.account_sid.as_str(),
            self.config.auth_token.as_str(),
        );

        let mut delay = Duration::ZERO;
        loop {
            if !delay.is_zero() {
                tracing::debug!(delay_secs = delay.as_secs(), "rate limited, backing off");
                tokio::time::sleep(delay).await;
            }

            let response = self
                .http
                .post_form(&url, auth, params.clone())
                .await
                .map_err(TwilioError::Transport)?;

            if response.status != HTTP_TOO_MANY_REQUESTS {
                if (200..300).contains(&response.status) {
                    tracing::debug!(status = response.status, "message accepted");
                    return Ok(());
                }
                return Err(TwilioError::Remote {
                    status_line: response.status_line,
                });
            }

            delay = if delay.is_zero() {
                Duration::from_secs(1)
            } else {
                delay * 2
            };
            if delay > MAX_BACKOFF {
                return Err(TwilioError::Remote {
                    status_line: response.status_line,
                });
            }
        }
    }
}
