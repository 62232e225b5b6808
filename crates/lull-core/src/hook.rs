use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::effects::on_key_change;
use crate::executor;
use crate::runtime::remember;
use crate::signal::{Signal, signal};
use crate::state::{AsyncLoader, AsyncState, LoadEvent, StateHolder};

type BoxedProducer<T, E> = Rc<dyn Fn() -> Pin<Box<dyn Future<Output = Result<T, E>>>>>;

/// Starts one producer invocation each time it is fired. Cloneable; firing
/// is never blocked by the `skip` flag of [`remember_async`].
#[derive(Clone)]
pub struct Trigger {
    run: Rc<dyn Fn()>,
}

impl Trigger {
    pub fn fire(&self) {
        (self.run)()
    }
}

/// Remembered async load state for the current callsite.
///
/// On the first render pass, and again whenever `deps` compares unequal to
/// the previously recorded value, the producer is fired automatically exactly
/// once — unless `skip` is true for that pass, in which case the dep key is
/// still recorded but nothing runs until the returned [`Trigger`] is fired
/// by hand. Use `()` for `deps` to load on mount only.
///
/// Every fire re-enters the loading state with `data` and `error` cleared,
/// then settles to exactly one of them when the producer's future completes
/// on the thread's executor. A failed producer lands its error value in
/// `AsyncState::error`.
///
/// Overlapping fires are not serialized: transitions land in completion
/// order and the last write wins the state slot.
pub fn remember_async<T, E, Fut, P, K>(
    producer: P,
    deps: K,
    skip: bool,
) -> (Signal<AsyncState<T, E>>, Trigger)
where
    T: Clone + 'static,
    E: Clone + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
    P: Fn() -> Fut + 'static,
    K: PartialEq + Clone + 'static,
{
    let state = remember(|| signal(AsyncLoader::<T, E>::initial_state()));
    let state = Signal::clone(&state);

    // Re-box the producer every pass so fires always see current captures,
    // not the ones from the mounting pass.
    let boxed: BoxedProducer<T, E> = Rc::new(move || {
        let fut: Pin<Box<dyn Future<Output = Result<T, E>>>> = Box::pin(producer());
        fut
    });
    let producer_slot = remember(|| RefCell::new(boxed.clone()));
    *producer_slot.borrow_mut() = boxed;

    let trigger = {
        let state = state.clone();
        Trigger {
            run: Rc::new(move || {
                state.set(AsyncLoader::<T, E>::reduce(&state.get(), LoadEvent::Started));
                log::debug!("async load fired");

                let fut = (producer_slot.borrow().clone())();
                let state = state.clone();
                executor::spawn_local(async move {
                    match fut.await {
                        Ok(v) => state.set(AsyncLoader::<T, E>::reduce(
                            &state.get(),
                            LoadEvent::Resolved(v),
                        )),
                        Err(e) => state.set(AsyncLoader::<T, E>::reduce(
                            &state.get(),
                            LoadEvent::Rejected(e),
                        )),
                    }
                });
            }),
        }
    };

    on_key_change(deps, {
        let trigger = trigger.clone();
        move || {
            if !skip {
                trigger.fire();
            }
        }
    });

    (state, trigger)
}
