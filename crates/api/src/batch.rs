// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Concurrent id lookups settled behind a single barrier.

use std::collections::HashMap;
use std::future::Future;

use cinema_domain::BatchLookup;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::GatewayError;

/// Runs one lookup per id concurrently and waits for all of them.
///
/// Ids that are not found or whose lookup fails are left out of the map.
/// If every lookup fails the batch is [`BatchLookup::Unavailable`]. A 401 from
/// any lookup aborts the whole batch.
pub async fn lookup_all<T, F, Fut>(
    kind: &'static str,
    ids: &[i64],
    lookup: F,
) -> Result<BatchLookup<T>, GatewayError>
where
    F: Fn(i64) -> Fut,
    Fut: Future<Output = Result<Option<T>, GatewayError>>,
{
    if ids.is_empty() {
        return Ok(BatchLookup::default());
    }

    let lookup: &F = &lookup;
    let settled: Vec<(i64, Result<Option<T>, GatewayError>)> =
        join_all(ids.iter().map(|&id| async move { (id, lookup(id).await) })).await;

    let mut resolved: HashMap<i64, T> = HashMap::with_capacity(settled.len());
    let mut failures: usize = 0;
    for (id, result) in settled {
        match result {
            Ok(Some(item)) => {
                resolved.insert(id, item);
            }
            Ok(None) => debug!(kind, id, "Lookup returned not found"),
            Err(GatewayError::Unauthorized) => return Err(GatewayError::Unauthorized),
            Err(err) => {
                failures += 1;
                warn!(kind, id, error = %err, "Lookup failed");
            }
        }
    }

    if failures == ids.len() {
        warn!(kind, count = ids.len(), "Every lookup in the batch failed");
        return Ok(BatchLookup::Unavailable);
    }
    Ok(BatchLookup::Resolved(resolved))
}
