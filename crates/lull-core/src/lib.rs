//! # Async loading state for slot-based composition
//!
//! `lull-core` packages one hook — [`remember_async`] — together with the
//! minimal composition runtime it needs: slot-based `remember*` storage,
//! `Signal<T>` state cells, keyed side effects, and a single-threaded task
//! queue for driving producer futures.
//!
//! ## The hook
//!
//! [`remember_async`] tracks one asynchronous operation as a
//! `{loading, data, error}` record and hands back a [`Trigger`] for manual
//! refires:
//!
//! ```rust
//! use lull_core::prelude::*;
//!
//! let mut host = Composition::new();
//!
//! let snap = host.render(|| {
//!     let (state, _refresh) = remember_async(|| async { Ok::<_, String>(7) }, (), false);
//!     state.get()
//! });
//! assert!(snap.loading);
//!
//! run_until_idle();
//!
//! let snap = host.render(|| {
//!     let (state, _refresh) = remember_async(|| async { Ok::<_, String>(7) }, (), false);
//!     state.get()
//! });
//! assert_eq!(snap.data, Some(7));
//! host.dispose();
//! ```
//!
//! The second parameter is the dependency key: the producer re-fires
//! automatically whenever it changes between passes. The third suppresses
//! the automatic fire for a registration without blocking manual ones.
//!
//! ## Remembered state
//!
//! State lives in `remember_*` slots owned by a [`Composition`]:
//!
//! ```rust
//! use lull_core::prelude::*;
//!
//! let mut host = Composition::new();
//! for expected in 1..=3 {
//!     let seen = host.render(|| {
//!         let count = remember_state(|| 0);
//!         *count.borrow_mut() += 1;
//!         *count.borrow()
//!     });
//!     assert_eq!(seen, expected);
//! }
//! host.dispose();
//! ```
//!
//! - `remember` and `remember_state` are order-based: the Nth call in a
//!   render pass always refers to the Nth stored value.
//! - `remember_with_key` is key-based and stable across conditional
//!   branches.
//!
//! ## Signals and re-rendering
//!
//! [`Signal<T>`] is a cloneable observable cell. Every write raises an
//! invalidation flag; a host loop re-renders while the flag is raised,
//! either by polling [`take_invalidated`] or through
//! [`Composition::render_until_settled`].
//!
//! ## Effects and cleanup
//!
//! [`on_key_change`] runs a closure once per distinct key at its callsite —
//! the mount/update side-effect primitive the hook itself is built on.
//! [`effect`] runs its body once when a callsite first composes; pair it
//! with [`on_unmount`] for cleanups that run when the owning
//! [`Composition`] is disposed.

pub mod effects;
pub mod error;
pub mod executor;
pub mod hook;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod state;

pub use effects::*;
pub use error::*;
pub use executor::*;
pub use hook::*;
pub use prelude::*;
pub use runtime::*;
pub use scope::*;
pub use signal::*;
pub use state::*;
