//! Paced generation: an optional, cancellable delay before generating.
//!
//! Generation itself never blocks. Interactive callers that want a visible
//! "working" pause can wrap it here; cancelling during the pause discards the
//! call with nothing to unwind.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::input::ProtocolInput;
use crate::protocol::{GeneratedProtocol, generate_protocol_with};
use crate::taxonomy::Taxonomy;

/// Errors from [`generate_paced`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacingError {
    #[error("protocol generation cancelled")]
    Cancelled,
}

/// Wait for `delay`, then generate. `today` should be captured by the caller
/// before calling so the milestone anchor does not depend on the delay.
///
/// Returns [`PacingError::Cancelled`] if `cancel` fires before the delay
/// elapses. A zero delay still honors an already-cancelled token.
pub async fn generate_paced(
    taxonomy: &Taxonomy,
    input: &ProtocolInput,
    today: NaiveDate,
    delay: Duration,
    cancel: &CancellationToken,
) -> Result<GeneratedProtocol, PacingError> {
    if cancel.is_cancelled() {
        return Err(PacingError::Cancelled);
    }

    if !delay.is_zero() {
        tracing::debug!(delay_ms = delay.as_millis() as u64, "pacing protocol generation");
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("protocol generation cancelled during pacing delay");
                return Err(PacingError::Cancelled);
            }
            _ = tokio::time::sleep(delay) => {}
        }
    }

    Ok(generate_protocol_with(taxonomy, input, today))
}
