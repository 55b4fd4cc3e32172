// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier correlating the log events of a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06x}", self.0)
    }
}

/// Monotonic source of [`RequestId`], owned by a client.
#[derive(Debug, Default)]
pub(crate) struct RequestIds(AtomicU64);

impl RequestIds {
    pub(crate) fn next(&self) -> RequestId {
        RequestId(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let ids = RequestIds::default();

        let first = ids.next();
        let second = ids.next();

        assert!(first < second);
        assert_eq!(first.to_string(), "000000");
        assert_eq!(second.to_string(), "000001");
    }
}
