use nlbeta_core::{BetaError, Capability};

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// This wraps `futures::future::join_all(tasks)` with a timeout; on expiry the
/// whole join fails with `RequestTimeout` for `capability`.
///
/// # Errors
/// Returns `RequestTimeout` when the deadline elapses before every task completes.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
    capability: Capability,
) -> Result<Vec<T>, BetaError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, capability, futures::future::join_all(tasks)).await
}

/// Collapse a set of provider errors into a uniform `BetaError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If exactly one provider was attempted → its error, unchanged.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    mut errors: Vec<BetaError>,
    not_found_what: Option<String>,
) -> BetaError {
    if !attempted_any {
        return BetaError::unsupported(capability.as_str());
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, BetaError::NotFound { .. }))
    {
        return BetaError::not_found(what);
    }
    if errors.len() == 1
        && let Some(only) = errors.pop()
    {
        return only;
    }
    BetaError::AllProvidersFailed(errors)
}
