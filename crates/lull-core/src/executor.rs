//! Single-threaded cooperative task queue.
//!
//! Futures spawned with [`spawn_local`] are parked in a per-thread table and
//! polled by [`run_until_idle`]. A host embedding the runtime calls
//! `run_until_idle` from its event loop; tests call it directly to drain
//! pending work synchronously. There is no cancellation: a spawned task runs
//! to completion even if the composition that spawned it is gone.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    struct TaskKey;
}

type LocalFuture = Pin<Box<dyn Future<Output = ()>>>;

thread_local! {
    static EXECUTOR: RefCell<Executor> = RefCell::new(Executor::default());
}

#[derive(Default)]
struct Executor {
    // A task's slot is empty while it is being polled.
    tasks: SlotMap<TaskKey, Option<LocalFuture>>,
    ready: Arc<Mutex<VecDeque<TaskKey>>>,
}

struct TaskWaker {
    key: TaskKey,
    ready: Arc<Mutex<VecDeque<TaskKey>>>,
}

impl Wake for TaskWaker {
    fn wake(self: Arc<Self>) {
        self.ready.lock().push_back(self.key);
    }
}

/// Queues a future on this thread's executor. Fire-and-forget: completion is
/// observed through whatever state the future writes.
pub fn spawn_local(fut: impl Future<Output = ()> + 'static) {
    EXECUTOR.with(|e| {
        let mut e = e.borrow_mut();
        let key = e.tasks.insert(Some(Box::pin(fut)));
        e.ready.lock().push_back(key);
    });
}

/// Number of tasks that have been spawned and not yet completed.
pub fn pending_tasks() -> usize {
    EXECUTOR.with(|e| e.borrow().tasks.len())
}

/// Polls ready tasks in FIFO order until none is runnable. Returns how many
/// tasks completed. Tasks waiting on an external wake stay parked.
pub fn run_until_idle() -> usize {
    let ready = EXECUTOR.with(|e| e.borrow().ready.clone());
    let mut completed = 0;

    loop {
        let Some(key) = ready.lock().pop_front() else {
            break;
        };

        // Take the future out so polling happens without the table borrowed;
        // a stale wake for a finished task finds the slot gone.
        let Some(mut fut) =
            EXECUTOR.with(|e| e.borrow_mut().tasks.get_mut(key).and_then(Option::take))
        else {
            continue;
        };

        let waker = Waker::from(Arc::new(TaskWaker {
            key,
            ready: ready.clone(),
        }));
        let mut cx = Context::from_waker(&waker);

        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(()) => {
                EXECUTOR.with(|e| {
                    e.borrow_mut().tasks.remove(key);
                });
                completed += 1;
            }
            Poll::Pending => {
                EXECUTOR.with(|e| {
                    if let Some(slot) = e.borrow_mut().tasks.get_mut(key) {
                        *slot = Some(fut);
                    }
                });
            }
        }
    }

    completed
}

/// Suspends once and resumes on the next executor pass.
pub async fn yield_now() {
    struct YieldNow(bool);

    impl Future for YieldNow {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    YieldNow(false).await
}
