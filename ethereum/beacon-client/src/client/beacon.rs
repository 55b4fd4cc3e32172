// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Beacon client module
//!
//! This module contains the client for a single Beacon Node. It sends one request to one node,
//! classifies the response status and resolves successful responses into an [`Envelope`].
//!
//! It maintains an internal HTTP client to handle communication with the Beacon Node.

use crate::api::ApiRequest;
use crate::client::endpoint::{CapabilitySet, Endpoint};
use crate::client::envelope::{
    resolve_consensus_version, resolve_content_type, Envelope, Versioning, ACCEPT_PREFER_SSZ,
};
use crate::client::error::ClientError;
use crate::client::provider::Provider;
use crate::client::utils::RequestIds;
use bytes::Bytes;
use getset::Getters;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use std::sync::Arc;
use tracing::{debug, debug_span, field, trace, Instrument, Span};

/// `User-Agent` of POST requests, unless the endpoint sets its own.
pub const DEFAULT_USER_AGENT: &str = concat!("ethereum-beacon-client/", env!("CARGO_PKG_VERSION"));

/// Maximum number of body bytes included in debug logs.
const LOGGED_BODY_LEN: usize = 512;

/// A client to handle communication with a single Beacon Node.
#[derive(Debug, Clone, Getters)]
pub struct BeaconClient {
    /// Configuration of the Beacon Node.
    #[getset(get = "pub")]
    endpoint: Arc<Endpoint>,
    /// The inner HTTP client.
    inner: Client,
    request_ids: Arc<RequestIds>,
}

/// Status, headers and body of a response read in full.
struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl BeaconClient {
    /// Create a new client with the given address and default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid.
    pub fn new(address: &str) -> Result<Self, ClientError> {
        Self::with_endpoint(Endpoint::new(address)?)
    }

    /// Create a new client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the inner HTTP client can not be built.
    pub fn with_endpoint(endpoint: Endpoint) -> Result<Self, ClientError> {
        let inner = Client::builder()
            .connect_timeout(endpoint.timeout())
            .build()
            .map_err(|err| ClientError::Transport {
                endpoint: endpoint.address().to_string(),
                source: err.into(),
            })?;

        Ok(Self {
            endpoint: Arc::new(endpoint),
            inner,
            request_ids: Arc::new(RequestIds::default()),
        })
    }

    /// `get` sends a GET request to the Beacon Node and resolves the consensus version of the
    /// response.
    ///
    /// # Arguments
    ///
    /// * `path` - The path of the endpoint, query included.
    ///
    /// # Returns
    ///
    /// The envelope of the response. A `404` resolves to a `NotFound` envelope and a `204` to a
    /// `NoContent` envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the node answers with any other non-2xx status or
    /// the response can not be resolved.
    pub async fn get(&self, path: &str) -> Result<Envelope, ClientError> {
        self.get_with(path, Versioning::Required).await
    }

    /// `get_with` sends a GET request to the Beacon Node, resolving the consensus version of the
    /// response only if `versioning` requires it.
    pub async fn get_with(
        &self,
        path: &str,
        versioning: Versioning,
    ) -> Result<Envelope, ClientError> {
        let span = self.call_span("GET", path);

        async {
            let url = self.endpoint.url_for(path);
            trace!("Sending request");

            let request = self
                .inner
                .get(&url)
                .headers(self.request_headers(&Method::GET));
            let response = self.send(&url, request).await?;
            let status = response.status;
            Span::current().record("status_code", status.as_u16());

            match status {
                StatusCode::NOT_FOUND => {
                    debug!("Resource not found");
                    Ok(Envelope::not_found())
                }
                StatusCode::NO_CONTENT => {
                    trace!("No content");
                    Ok(Envelope::no_content())
                }
                status if !status.is_success() => Err(http_error(Method::GET, path, response)),
                _ => resolve(path, response, versioning),
            }
        }
        .instrument(span)
        .await
    }

    /// `post` sends a POST request with a JSON body to the Beacon Node and resolves the consensus
    /// version of the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the node answers with a non-2xx status, `404`
    /// included, or the response can not be resolved.
    pub async fn post(&self, path: &str, body: Vec<u8>) -> Result<Envelope, ClientError> {
        self.post_with(path, body, Versioning::Required).await
    }

    /// `post_with` sends a POST request with a JSON body to the Beacon Node, resolving the
    /// consensus version of the response only if `versioning` requires it.
    pub async fn post_with(
        &self,
        path: &str,
        body: Vec<u8>,
        versioning: Versioning,
    ) -> Result<Envelope, ClientError> {
        let span = self.call_span("POST", path);

        async {
            let url = self.endpoint.url_for(path);
            trace!(body = %String::from_utf8_lossy(&body), "Sending request");

            let request = self
                .inner
                .post(&url)
                .headers(self.request_headers(&Method::POST))
                .body(body);
            let response = self.send(&url, request).await?;
            let status = response.status;
            Span::current().record("status_code", status.as_u16());

            match status {
                status if !status.is_success() => Err(http_error(Method::POST, path, response)),
                StatusCode::NO_CONTENT => {
                    trace!("No content");
                    Ok(Envelope::no_content())
                }
                _ => resolve(path, response, versioning),
            }
        }
        .instrument(span)
        .await
    }

    fn call_span(&self, method: &'static str, path: &str) -> Span {
        debug_span!(
            "beacon_call",
            request_id = %self.request_ids.next(),
            address = %self.endpoint.address(),
            method,
            path,
            status_code = field::Empty,
            content_type = field::Empty,
        )
    }

    /// Headers of a request: the endpoint headers, then the ones set by the client.
    fn request_headers(&self, method: &Method) -> HeaderMap {
        let mut headers = self.endpoint.extra_headers().clone();

        if *method == Method::POST {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
            if !headers.contains_key(USER_AGENT) {
                headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
            }
        } else {
            headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_PREFER_SSZ));
        }

        headers
    }

    /// Send a request and read its response in full, within the endpoint timeout.
    async fn send(&self, url: &str, request: RequestBuilder) -> Result<RawResponse, ClientError> {
        let timeout = self.endpoint.timeout();

        let exchange = async {
            let response = request.send().await.map_err(|err| transport_error(url, err))?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response
                .bytes()
                .await
                .map_err(|err| transport_error(url, err))?;

            Ok::<_, ClientError>(RawResponse {
                status,
                headers,
                body,
            })
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => {
                if let Err(err) = &result {
                    debug!(error = %err, "Request failed");
                }
                result
            }
            Err(_) => {
                debug!(?timeout, "Request timed out");
                Err(ClientError::Timeout {
                    endpoint: url.to_string(),
                    timeout,
                })
            }
        }
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> ClientError {
    ClientError::Transport {
        endpoint: url.to_string(),
        source: err.into(),
    }
}

fn http_error(method: Method, path: &str, response: RawResponse) -> ClientError {
    let shown = response.body.len().min(LOGGED_BODY_LEN);
    debug!(
        status_code = response.status.as_u16(),
        body = %String::from_utf8_lossy(&response.body[..shown]),
        "Request not successful"
    );

    ClientError::Http {
        method: method.to_string(),
        endpoint: path.to_string(),
        status_code: response.status.as_u16(),
        data: response.body.to_vec(),
    }
}

fn resolve(
    path: &str,
    response: RawResponse,
    versioning: Versioning,
) -> Result<Envelope, ClientError> {
    let content_type = resolve_content_type(path, &response.headers)?;
    Span::current().record("content_type", content_type.media_type());

    let consensus_version = match versioning {
        Versioning::Required => Some(resolve_consensus_version(
            path,
            &response.headers,
            content_type,
            &response.body,
        )?),
        Versioning::Ignored => None,
    };
    trace!(?consensus_version, len = response.body.len(), "Response resolved");

    Ok(Envelope::success(
        content_type,
        consensus_version,
        response.body,
    ))
}

impl Provider for BeaconClient {
    fn address(&self) -> &str {
        self.endpoint.address().as_str()
    }

    fn capabilities(&self) -> &CapabilitySet {
        self.endpoint.capabilities()
    }

    async fn execute<R: ApiRequest>(&self, request: &R) -> Result<Option<R::Output>, ClientError> {
        if !self.capabilities().contains(request.capability()) {
            return Err(ClientError::Unsupported {
                capability: request.capability(),
            });
        }

        let path = request.path();
        let body = request.body().map_err(|err| ClientError::Encode {
            endpoint: path.clone(),
            source: err.into(),
        })?;

        let envelope = match body {
            Some(body) => self.post_with(&path, body, request.versioning()).await?,
            None => self.get_with(&path, request.versioning()).await?,
        };

        if !envelope.is_success() {
            return Ok(None);
        }

        request
            .decode(&envelope)
            .map(Some)
            .map_err(|err| ClientError::Decode {
                endpoint: path,
                source: err.into(),
            })
    }
}
