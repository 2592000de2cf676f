//! Run a batch of fallible futures concurrently and keep whatever succeeded.

use futures::future::join_all;
use std::future::Future;

/// The outcomes of a batch, split by success. Both sides keep the order the
/// futures were supplied in, regardless of the order they completed in.
#[derive(Debug, PartialEq, Eq)]
pub struct Settled<T, E> {
    pub successes: Vec<T>,
    pub failures: Vec<E>,
}

impl<T, E> Settled<T, E> {
    pub fn is_partial(&self) -> bool {
        !self.successes.is_empty() && !self.failures.is_empty()
    }
}

/// Drive every future to completion, waiting for all of them even when some
/// fail. There's no limit on how many are in flight at once.
pub async fn gather_settled<I, F, T, E>(futs: I) -> Settled<T, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let outcomes = join_all(futs).await;

    let mut successes = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(x) => successes.push(x),
            Err(e) => failures.push(e),
        }
    }

    Settled {
        successes,
        failures,
    }
}
