//! Four-state lifecycle container for asynchronously produced values.
//!
//! [`AsyncData`] models the life of one activity's parse result:
//! `NotAsked -> Loading -> {Failure, Success}`. A re-import may re-enter
//! `Loading` from a terminal state, carrying the prior payload so a consumer
//! can keep rendering stale data with a "loading" indicator instead of
//! blanking out.
//!
//! Transitions never mutate: every state change produces a new value. The
//! enum is closed, so a `match` (or [`AsyncData::fold`]) is forced to handle
//! all four states at every call site.

/// Lifecycle of one asynchronously computed value.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncData<E, A> {
    /// Work has not been requested yet
    NotAsked,
    /// Work is in flight; optionally carries the previous successful payload
    Loading(Option<A>),
    /// Work resolved with an error
    Failure(E),
    /// Work resolved with a value
    Success(A),
}

impl<E, A> AsyncData<E, A> {
    pub fn is_not_asked(&self) -> bool {
        matches!(self, AsyncData::NotAsked)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AsyncData::Loading(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, AsyncData::Failure(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AsyncData::Success(_))
    }

    /// The successful payload, if resolved.
    pub fn success(&self) -> Option<&A> {
        match self {
            AsyncData::Success(data) => Some(data),
            _ => None,
        }
    }

    /// The error, if resolved with a failure.
    pub fn failure(&self) -> Option<&E> {
        match self {
            AsyncData::Failure(err) => Some(err),
            _ => None,
        }
    }

    /// The stale payload carried through a reload, if any.
    pub fn loading_prev(&self) -> Option<&A> {
        match self {
            AsyncData::Loading(prev) => prev.as_ref(),
            _ => None,
        }
    }

    /// Re-enter `Loading`, keeping the current success payload (if any) as
    /// the stale value shown while the reload runs.
    pub fn reload(self) -> Self {
        match self {
            AsyncData::Success(data) => AsyncData::Loading(Some(data)),
            AsyncData::Loading(prev) => AsyncData::Loading(prev),
            _ => AsyncData::Loading(None),
        }
    }

    /// Transform the success/loading payload, leaving the other states as-is.
    pub fn map<B, F>(self, f: F) -> AsyncData<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            AsyncData::NotAsked => AsyncData::NotAsked,
            AsyncData::Loading(prev) => AsyncData::Loading(prev.map(f)),
            AsyncData::Failure(err) => AsyncData::Failure(err),
            AsyncData::Success(data) => AsyncData::Success(f(data)),
        }
    }

    /// Consume the value with one handler per state.
    pub fn fold<T>(
        &self,
        on_not_asked: impl FnOnce() -> T,
        on_loading: impl FnOnce(Option<&A>) -> T,
        on_failure: impl FnOnce(&E) -> T,
        on_success: impl FnOnce(&A) -> T,
    ) -> T {
        match self {
            AsyncData::NotAsked => on_not_asked(),
            AsyncData::Loading(prev) => on_loading(prev.as_ref()),
            AsyncData::Failure(err) => on_failure(err),
            AsyncData::Success(data) => on_success(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Ad = AsyncData<String, u32>;

    #[test]
    fn test_predicates() {
        assert!(Ad::NotAsked.is_not_asked());
        assert!(Ad::Loading(None).is_loading());
        assert!(Ad::Failure("boom".into()).is_failure());
        assert!(Ad::Success(1).is_success());
        assert!(!Ad::Success(1).is_loading());
    }

    #[test]
    fn test_reload_keeps_previous_success() {
        let reloading = Ad::Success(7).reload();
        assert!(reloading.is_loading());
        assert_eq!(reloading.loading_prev(), Some(&7));
    }

    #[test]
    fn test_reload_from_failure_has_no_prev() {
        let reloading = Ad::Failure("boom".into()).reload();
        assert_eq!(reloading, Ad::Loading(None));
    }

    #[test]
    fn test_map_preserves_non_success_states() {
        assert_eq!(Ad::NotAsked.map(|v| v * 2), AsyncData::NotAsked);
        assert_eq!(
            Ad::Failure("boom".into()).map(|v| v * 2),
            AsyncData::Failure("boom".to_string())
        );
        assert_eq!(Ad::Loading(Some(3)).map(|v| v * 2), AsyncData::Loading(Some(6)));
        assert_eq!(Ad::Success(3).map(|v| v * 2), AsyncData::Success(6));
    }

    #[test]
    fn test_fold_dispatches_per_state() {
        let describe = |ad: &Ad| {
            ad.fold(
                || "not asked".to_string(),
                |prev| format!("loading (prev: {:?})", prev),
                |err| format!("failed: {err}"),
                |data| format!("loaded: {data}"),
            )
        };
        assert_eq!(describe(&Ad::NotAsked), "not asked");
        assert_eq!(describe(&Ad::Loading(Some(9))), "loading (prev: Some(9))");
        assert_eq!(describe(&Ad::Failure("boom".into())), "failed: boom");
        assert_eq!(describe(&Ad::Success(9)), "loaded: 9");
    }
}
