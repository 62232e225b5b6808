use std::marker::PhantomData;

/// Reducer seam: a pure transition function from (state, event) to the next
/// state, plus the state's initial value.
pub trait StateHolder: 'static {
    type State: Clone;
    type Event;

    fn initial_state() -> Self::State;
    fn reduce(state: &Self::State, event: Self::Event) -> Self::State;
}

/// Loading/success/error record for one asynchronous operation.
///
/// At most one of `data`/`error` is `Some` at any time; both are `None`
/// while `loading` is true and before the first attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsyncState<T, E> {
    pub loading: bool,
    pub data: Option<T>,
    pub error: Option<E>,
}

impl<T, E> AsyncState<T, E> {
    pub fn idle() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !self.loading && (self.data.is_some() || self.error.is_some())
    }
}

impl<T, E> Default for AsyncState<T, E> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Events driving the load state machine. The enum is closed: there is no
/// catch-all transition, an unknown kind cannot be expressed.
#[derive(Debug)]
pub enum LoadEvent<T, E> {
    Started,
    Resolved(T),
    Rejected(E),
}

/// Reducer for async loads. Never constructed; used through [`StateHolder`].
pub struct AsyncLoader<T, E>(PhantomData<(T, E)>);

impl<T: Clone + 'static, E: Clone + 'static> StateHolder for AsyncLoader<T, E> {
    type State = AsyncState<T, E>;
    type Event = LoadEvent<T, E>;

    fn initial_state() -> Self::State {
        AsyncState::idle()
    }

    // Each transition fully determines the next record, so the prior state
    // is not consulted. Settling while not loading is reachable when fires
    // overlap; the last write wins.
    fn reduce(_state: &Self::State, event: Self::Event) -> Self::State {
        match event {
            LoadEvent::Started => AsyncState {
                loading: true,
                data: None,
                error: None,
            },
            LoadEvent::Resolved(v) => AsyncState {
                loading: false,
                data: Some(v),
                error: None,
            },
            LoadEvent::Rejected(e) => AsyncState {
                loading: false,
                data: None,
                error: Some(e),
            },
        }
    }
}
