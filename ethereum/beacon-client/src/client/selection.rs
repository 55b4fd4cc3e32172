// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Selection module
//!
//! A [`SelectionPolicy`] decides, from the outcomes reported by the members of a multi-endpoint
//! call, when the call can stop waiting and which result it returns.
//!
//! Two policies are provided:
//! - [`FirstSuccess`] returns the first successful answer, in arrival order.
//! - [`Majority`] returns the answer given by more than half of the members.

use crate::client::error::{ClientError, MemberFailure};
use getset::Getters;

/// Result of a call to a single member.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    NotFound,
    Error(ClientError),
}

impl<T> From<Result<Option<T>, ClientError>> for Outcome<T> {
    fn from(result: Result<Option<T>, ClientError>) -> Self {
        match result {
            Ok(Some(value)) => Outcome::Success(value),
            Ok(None) => Outcome::NotFound,
            Err(err) => Outcome::Error(err),
        }
    }
}

/// [`Outcome`] of a named member.
#[derive(Debug, Getters)]
#[getset(get = "pub")]
pub struct MemberOutcome<T> {
    endpoint: String,
    outcome: Outcome<T>,
}

impl<T> MemberOutcome<T> {
    pub fn new(endpoint: impl Into<String>, outcome: Outcome<T>) -> Self {
        Self {
            endpoint: endpoint.into(),
            outcome,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self.outcome, Outcome::NotFound)
    }
}

/// Decision of a [`SelectionPolicy`].
#[derive(Debug)]
pub enum Selection<T> {
    Found(T),
    NotFound,
    Failed(Vec<MemberFailure>),
    Inconclusive {
        reason: String,
        failures: Vec<MemberFailure>,
    },
}

/// Combines the outcomes of the members of a multi-endpoint call.
pub trait SelectionPolicy<T>: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the outcomes received so far are enough to decide, out of `dispatched` members.
    fn is_settled(&self, outcomes: &[MemberOutcome<T>], dispatched: usize) -> bool;

    /// Decide the result of the call. `quorum` is the number of members the decision is based on.
    fn select(&self, outcomes: Vec<MemberOutcome<T>>, quorum: usize) -> Selection<T>;
}

/// Outcomes split by kind, in arrival order.
#[derive(Debug)]
pub struct Tally<T> {
    pub successes: Vec<(String, T)>,
    pub not_found: Vec<String>,
    pub failures: Vec<MemberFailure>,
}

impl<T> Tally<T> {
    pub fn new(outcomes: Vec<MemberOutcome<T>>) -> Self {
        let mut tally = Self {
            successes: vec![],
            not_found: vec![],
            failures: vec![],
        };

        for MemberOutcome { endpoint, outcome } in outcomes {
            match outcome {
                Outcome::Success(value) => tally.successes.push((endpoint, value)),
                Outcome::NotFound => tally.not_found.push(endpoint),
                Outcome::Error(err) => tally.failures.push(MemberFailure::new(endpoint, err)),
            }
        }

        tally
    }
}

/// Returns the first successful answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSuccess;

impl<T> SelectionPolicy<T> for FirstSuccess {
    fn name(&self) -> &'static str {
        "first-success"
    }

    fn is_settled(&self, outcomes: &[MemberOutcome<T>], dispatched: usize) -> bool {
        outcomes.len() >= dispatched || outcomes.iter().any(MemberOutcome::is_success)
    }

    fn select(&self, outcomes: Vec<MemberOutcome<T>>, _quorum: usize) -> Selection<T> {
        let tally = Tally::new(outcomes);

        if let Some((_, value)) = tally.successes.into_iter().next() {
            Selection::Found(value)
        } else if !tally.not_found.is_empty() {
            Selection::NotFound
        } else {
            Selection::Failed(tally.failures)
        }
    }
}

/// Returns the answer given by more than half of the members.
#[derive(Debug, Clone, Copy, Default)]
pub struct Majority;

impl Majority {
    pub const fn threshold(quorum: usize) -> usize {
        quorum / 2 + 1
    }
}

/// Index of the value with the most votes and its number of votes, earliest first on ties.
fn leading_value<T: PartialEq>(values: &[&T]) -> Option<(usize, usize)> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| (index, values.iter().filter(|other| *other == value).count()))
        .fold(None, |best, (index, votes)| match best {
            Some((_, best_votes)) if best_votes >= votes => best,
            _ => Some((index, votes)),
        })
}

impl<T: PartialEq> SelectionPolicy<T> for Majority {
    fn name(&self) -> &'static str {
        "majority"
    }

    fn is_settled(&self, outcomes: &[MemberOutcome<T>], dispatched: usize) -> bool {
        if outcomes.len() >= dispatched {
            return true;
        }

        let threshold = Self::threshold(dispatched);
        let values: Vec<&T> = outcomes
            .iter()
            .filter_map(|outcome| match outcome.outcome() {
                Outcome::Success(value) => Some(value),
                _ => None,
            })
            .collect();
        let not_found = outcomes.iter().filter(|o| o.is_not_found()).count();

        not_found >= threshold
            || leading_value(&values).is_some_and(|(_, votes)| votes >= threshold)
    }

    fn select(&self, outcomes: Vec<MemberOutcome<T>>, quorum: usize) -> Selection<T> {
        let threshold = Self::threshold(quorum);
        let mut tally = Tally::new(outcomes);

        let values: Vec<&T> = tally.successes.iter().map(|(_, value)| value).collect();
        let leading = leading_value(&values);

        if let Some((index, votes)) = leading {
            if votes >= threshold {
                let (_, value) = tally.successes.swap_remove(index);
                return Selection::Found(value);
            }
        }

        if tally.not_found.len() >= threshold {
            return Selection::NotFound;
        }

        if tally.successes.is_empty() && tally.not_found.is_empty() {
            return Selection::Failed(tally.failures);
        }

        let votes = leading.map_or(0, |(_, votes)| votes);
        Selection::Inconclusive {
            reason: format!(
                "no answer reached {threshold} of {quorum} votes (best answer {votes}, not found {})",
                tally.not_found.len()
            ),
            failures: tally.failures,
        }
    }
}
