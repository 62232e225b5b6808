pub use crate::effects::{Dispose, effect, on_key_change, on_unmount};
pub use crate::error::ComposeError;
pub use crate::executor::{pending_tasks, run_until_idle, spawn_local, yield_now};
pub use crate::hook::{Trigger, remember_async};
pub use crate::runtime::{
    Composition, invalidate, remember, remember_state, remember_with_key, take_invalidated,
};
pub use crate::scope::{Scope, current_scope};
pub use crate::signal::{Signal, signal};
pub use crate::state::{AsyncLoader, AsyncState, LoadEvent, StateHolder};
