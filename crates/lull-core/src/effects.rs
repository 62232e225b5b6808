use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::remember;

#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        if let Some(f) = self.0.borrow_mut().take() {
            f()
        }
    }
}

/// Runs `f()` once when this callsite is first composed and returns its
/// `Dispose`. Later render passes return the stored `Dispose` without
/// re-running the body, so a long-lived composition does not accumulate
/// disposers. Must be called during a render pass.
pub fn effect<F>(f: F) -> Dispose
where
    F: FnOnce() -> Dispose + 'static,
{
    let slot = remember(|| RefCell::new(None::<Dispose>));

    let mut stored = slot.borrow_mut();
    if let Some(d) = stored.as_ref() {
        return d.clone();
    }

    let d = f();

    // auto-register cleanup in the current scope if one exists
    if let Some(scope) = crate::scope::current_scope() {
        let d2 = d.clone();
        scope.add_disposer(move || d2.run());
    }

    *stored = Some(d.clone());
    d
}

/// Helper to register cleanup inside effect.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}

/// Runs `f` on the first pass at this callsite and again whenever `key`
/// compares unequal to the key recorded on the previous pass. Slot-based, so
/// two callsites never collide and it stays correct when called from inside
/// another hook.
pub fn on_key_change<K: PartialEq + Clone + 'static>(key: K, f: impl FnOnce()) {
    let last_key = remember(|| RefCell::new(None::<K>));

    let mut last = last_key.borrow_mut();
    if last.as_ref() != Some(&key) {
        *last = Some(key);
        f();
    }
}
