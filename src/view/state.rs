use crate::client::ApiError;

/// Lifecycle of one fetched value. `Failed` keeps the message only; stale
/// rows never survive a failure, the page shows a retry action instead.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Populated(T),
    Failed(String),
}

/// A fetched value plus a monotonically increasing request sequence.
/// Overlapping fetches are resolved by issue order: a response may only
/// apply if it belongs to the latest issued request, so an early response
/// to a superseded request is discarded instead of overwriting newer state.
#[derive(Debug)]
pub struct Remote<T> {
    state: FetchState<T>,
    issued: u64,
}

impl<T> Remote<T> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            issued: 0,
        }
    }

    /// Enters `Loading` and returns the sequence number of this fetch.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.state = FetchState::Loading;
        self.issued
    }

    /// Applies the outcome of fetch `seq`. Returns false when the response
    /// is stale (a newer fetch has been issued since) and was dropped.
    pub fn resolve(&mut self, seq: u64, outcome: Result<T, ApiError>) -> bool {
        if seq != self.issued {
            return false;
        }
        self.state = match outcome {
            Ok(value) => FetchState::Populated(value),
            Err(e) => FetchState::Failed(e.to_string()),
        };
        true
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            FetchState::Populated(v) => Some(v),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            FetchState::Populated(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// How a page reconciles its collection after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Patch the in-memory rows directly. Only sound when the entity
    /// carries every field the view needs (no server-derived aggregates).
    PatchLocal,
    /// Re-enter `Loading` and fetch again. Required whenever the server
    /// computes derived fields a local patch cannot reconstruct.
    Refetch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Patched,
    RefetchNeeded,
}

/// Collection state for one resource page: the fetched rows, the search
/// term, and the policy for reconciling mutations.
#[derive(Debug)]
pub struct ListView<T> {
    remote: Remote<Vec<T>>,
    policy: RefreshPolicy,
    pub search: String,
}

impl<T> ListView<T> {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            remote: Remote::new(),
            policy,
            search: String::new(),
        }
    }

    pub fn begin_fetch(&mut self) -> u64 {
        self.remote.begin()
    }

    pub fn resolve(&mut self, seq: u64, outcome: Result<Vec<T>, ApiError>) -> bool {
        self.remote.resolve(seq, outcome)
    }

    pub fn state(&self) -> &FetchState<Vec<T>> {
        self.remote.state()
    }

    pub fn rows(&self) -> Option<&[T]> {
        self.remote.value().map(Vec::as_slice)
    }

    pub fn is_loading(&self) -> bool {
        self.remote.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.remote.error()
    }

    /// Reconciles a freshly created entity. Prepends (newest first) under
    /// `PatchLocal`; otherwise tells the caller a refetch is due.
    pub fn apply_create(&mut self, item: T) -> MutationOutcome {
        if self.policy == RefreshPolicy::Refetch {
            return MutationOutcome::RefetchNeeded;
        }
        match self.remote.value_mut() {
            Some(rows) => {
                rows.insert(0, item);
                MutationOutcome::Patched
            }
            None => MutationOutcome::RefetchNeeded,
        }
    }

    /// Reconciles a deletion by dropping every row matching `is_deleted`.
    pub fn apply_delete(&mut self, is_deleted: impl Fn(&T) -> bool) -> MutationOutcome {
        if self.policy == RefreshPolicy::Refetch {
            return MutationOutcome::RefetchNeeded;
        }
        match self.remote.value_mut() {
            Some(rows) => {
                rows.retain(|r| !is_deleted(r));
                MutationOutcome::Patched
            }
            None => MutationOutcome::RefetchNeeded,
        }
    }
}
