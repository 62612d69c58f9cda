//! Collapse a stream of results into its last value.

use futures::{Stream, StreamExt};

/// Why a stream produced no usable value
#[derive(Debug, PartialEq, Eq)]
pub enum Collapse<E> {
    /// Completed without emitting anything
    Empty,
    /// Emitted an error; nothing after it was polled
    Failed(E),
}

/// Drain `stream` and return the most recent value
///
/// Stops at the first error item.
pub async fn last_value<S, T, E>(stream: S) -> Result<T, Collapse<E>>
where
    S: Stream<Item = Result<T, E>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut last = None;

    while let Some(item) = stream.next().await {
        match item {
            Ok(value) => last = Some(value),
            Err(e) => return Err(Collapse::Failed(e)),
        }
    }

    last.ok_or(Collapse::Empty)
}
