// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Multi-endpoint client module
//!
//! [`MultiClient`] presents a set of independent Beacon Nodes as a single logical client. Each
//! operation is dispatched to every member able to serve it, concurrently, and a
//! [`SelectionPolicy`] decides which answer is returned.
//!
//! Member calls run as separate tasks. Once a decision is reached, or the overall deadline elapses,
//! the calls still in flight are aborted.

use crate::api::ApiRequest;
use crate::client::beacon::BeaconClient;
use crate::client::endpoint::{CapabilitySet, Endpoint, DEFAULT_TIMEOUT};
use crate::client::error::ClientError;
use crate::client::provider::Provider;
use crate::client::selection::{FirstSuccess, MemberOutcome, Outcome, Selection, SelectionPolicy};
use crate::client::utils::RequestIds;
use getset::CopyGetters;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, debug_span, info_span, warn, Instrument};

/// Behaviour of a call whose deadline elapses before its selection policy settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeadlinePolicy {
    /// Decide over every dispatched member, members that did not answer counting as failures.
    #[default]
    Fail,
    /// Decide over the members that answered before the deadline.
    BestEffort,
}

/// Configuration of a [`MultiClient`].
#[derive(Debug, Clone, Copy, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct MultiClientConfig {
    /// Deadline of a whole operation, across members.
    timeout: Duration,
    deadline_policy: DeadlinePolicy,
}

impl Default for MultiClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            deadline_policy: DeadlinePolicy::Fail,
        }
    }
}

impl MultiClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_deadline_policy(mut self, deadline_policy: DeadlinePolicy) -> Self {
        self.deadline_policy = deadline_policy;
        self
    }
}

/// A set of providers behaving as a single one.
#[derive(Debug, Clone)]
pub struct MultiClient<P = BeaconClient> {
    members: Vec<Arc<P>>,
    config: MultiClientConfig,
    capabilities: CapabilitySet,
    name: String,
    request_ids: Arc<RequestIds>,
}

impl MultiClient<BeaconClient> {
    /// Create a client over the Beacon Nodes at the given addresses, with default endpoint
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no address is given or if one of them is invalid.
    pub fn from_addresses<S: AsRef<str>>(
        addresses: &[S],
        config: MultiClientConfig,
    ) -> Result<Self, ClientError> {
        let members = addresses
            .iter()
            .map(|address| BeaconClient::new(address.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(members, config)
    }

    /// Create a client over the given endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint is given or if a client can not be built.
    pub fn from_endpoints(
        endpoints: Vec<Endpoint>,
        config: MultiClientConfig,
    ) -> Result<Self, ClientError> {
        let members = endpoints
            .into_iter()
            .map(BeaconClient::with_endpoint)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(members, config)
    }
}

impl<P: Provider> MultiClient<P> {
    /// Create a client over the given members.
    ///
    /// # Errors
    ///
    /// Returns an error if `members` is empty.
    pub fn new(members: Vec<P>, config: MultiClientConfig) -> Result<Self, ClientError> {
        if members.is_empty() {
            return Err(ClientError::NoEndpoints);
        }

        let capabilities = members
            .iter()
            .fold(CapabilitySet::empty(), |union, member| {
                union.union(member.capabilities())
            });
        let name = format!(
            "multi[{}]",
            members
                .iter()
                .map(Provider::address)
                .collect::<Vec<_>>()
                .join(",")
        );

        Ok(Self {
            members: members.into_iter().map(Arc::new).collect(),
            config,
            capabilities,
            name,
            request_ids: Arc::new(RequestIds::default()),
        })
    }

    pub fn members(&self) -> &[Arc<P>] {
        &self.members
    }

    pub const fn config(&self) -> &MultiClientConfig {
        &self.config
    }

    /// `call` dispatches a request to every capable member and returns the first successful
    /// answer.
    pub async fn call<R: ApiRequest>(&self, request: R) -> Result<Option<R::Output>, ClientError> {
        self.call_with(request, &FirstSuccess).await
    }

    /// `call_with` dispatches a request to every capable member and lets `policy` decide the
    /// answer.
    ///
    /// # Arguments
    ///
    /// * `request` - The request to dispatch.
    /// * `policy` - The policy combining the outcomes of the members.
    ///
    /// # Returns
    ///
    /// The selected answer, or `None` if the policy decided the resource does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` if no member can serve the request. A client made of a single member
    /// returns the error of that member. Otherwise returns an `Aggregate` error listing the failure
    /// of each capable member if they all failed, or an `Inconclusive` error if the policy could not
    /// decide.
    pub async fn call_with<R, S>(
        &self,
        request: R,
        policy: &S,
    ) -> Result<Option<R::Output>, ClientError>
    where
        R: ApiRequest,
        S: SelectionPolicy<R::Output> + ?Sized,
    {
        let capability = request.capability();
        let operation = request.name();
        let capable: Vec<Arc<P>> = self
            .members
            .iter()
            .filter(|member| member.capabilities().contains(capability))
            .cloned()
            .collect();

        if capable.is_empty() {
            return Err(ClientError::Unsupported { capability });
        }

        let dispatched = capable.len();
        // Timeouts beyond the clock range run without deadline.
        let deadline = Instant::now().checked_add(self.config.timeout);
        let span = info_span!(
            "multi_call",
            request_id = %self.request_ids.next(),
            operation,
            policy = policy.name(),
            dispatched,
        );

        async move {
            let request = Arc::new(request);
            let mut tasks = JoinSet::new();

            for (index, member) in capable.iter().enumerate() {
                let member = Arc::clone(member);
                let request = Arc::clone(&request);
                let member_span = debug_span!("member_call", address = member.address());

                tasks.spawn(
                    async move { (index, member.execute(request.as_ref()).await) }
                        .instrument(member_span),
                );
            }

            let mut outcomes: Vec<MemberOutcome<R::Output>> = Vec::with_capacity(dispatched);
            let mut reported = vec![false; dispatched];
            let mut deadline_elapsed = false;

            while !policy.is_settled(&outcomes, dispatched) {
                let joined = match deadline {
                    Some(deadline) => tokio::time::timeout_at(deadline, tasks.join_next()).await,
                    None => Ok(tasks.join_next().await),
                };

                match joined {
                    Ok(Some(Ok((index, result)))) => {
                        reported[index] = true;
                        let address = capable[index].address();
                        let outcome = Outcome::from(result);

                        if let Outcome::Error(err) = &outcome {
                            warn!(address, error = %err, "Endpoint call failed");
                        }
                        outcomes.push(MemberOutcome::new(address, outcome));
                    }
                    Ok(Some(Err(err))) => {
                        warn!(error = %err, "Endpoint task did not complete");
                    }
                    Ok(None) => break,
                    Err(_) => {
                        debug!("Deadline elapsed");
                        deadline_elapsed = true;
                        break;
                    }
                }
            }

            // Abort the calls still in flight.
            drop(tasks);

            let settled = policy.is_settled(&outcomes, dispatched);
            let responded = outcomes.len();

            if !settled {
                for (index, member) in capable.iter().enumerate() {
                    if reported[index] {
                        continue;
                    }

                    let endpoint = member.address().to_string();
                    let error = if deadline_elapsed {
                        ClientError::DeadlineExceeded {
                            operation: operation.to_string(),
                            endpoint: endpoint.clone(),
                        }
                    } else {
                        ClientError::Task {
                            operation: operation.to_string(),
                            endpoint: endpoint.clone(),
                            reason: String::from("task aborted or panicked"),
                        }
                    };
                    outcomes.push(MemberOutcome::new(endpoint, Outcome::Error(error)));
                }
            }

            let quorum = match (deadline_elapsed, self.config.deadline_policy) {
                (true, DeadlinePolicy::BestEffort) => responded,
                _ => dispatched,
            };

            match policy.select(outcomes, quorum) {
                Selection::Found(value) => Ok(Some(value)),
                Selection::NotFound => {
                    debug!("Resource not found");
                    Ok(None)
                }
                Selection::Failed(mut failures) => {
                    if self.members.len() == 1 && failures.len() == 1 {
                        return Err(failures.remove(0).into_error());
                    }

                    Err(ClientError::Aggregate {
                        operation: operation.to_string(),
                        failures,
                    })
                }
                Selection::Inconclusive { reason, failures } => Err(ClientError::Inconclusive {
                    operation: operation.to_string(),
                    reason,
                    failures,
                }),
            }
        }
        .instrument(span)
        .await
    }
}

impl<P: Provider> Provider for MultiClient<P> {
    fn address(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    async fn execute<R: ApiRequest>(&self, request: &R) -> Result<Option<R::Output>, ClientError> {
        self.call(request.clone()).await
    }
}
