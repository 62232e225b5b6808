use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::ComposeError;
use crate::scope::Scope;

thread_local! {
    // Stack of compositions currently rendering on this thread. `remember`
    // resolves slots against the top entry.
    static ACTIVE: RefCell<Vec<Rc<RefCell<Composer>>>> = const { RefCell::new(Vec::new()) };
    static DIRTY: Cell<bool> = const { Cell::new(false) };
}

/// Slot table for one composition: positional slots addressed by a cursor
/// that restarts at zero each render pass, plus a keyed side table.
#[derive(Default)]
pub struct Composer {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
    keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// Raise the re-render flag. Called by every signal write; a host embedding
/// this runtime can also raise it directly.
pub fn invalidate() {
    DIRTY.with(|d| d.set(true));
}

/// Clears and returns the re-render flag.
pub fn take_invalidated() -> bool {
    DIRTY.with(|d| d.replace(false))
}

fn active_composer() -> Rc<RefCell<Composer>> {
    ACTIVE.with(|stack| {
        stack
            .borrow()
            .last()
            .cloned()
            .expect("remember called outside of Composition::render")
    })
}

/// Slot-based remember (sequential composition only): the Nth call in a
/// render pass always resolves to the Nth stored value.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let composer = active_composer();
    let mut c = composer.borrow_mut();
    let cursor = c.cursor;
    c.cursor += 1;

    if cursor >= c.slots.len() {
        let rc: Rc<T> = Rc::new(init());
        c.slots.push(Box::new(rc.clone()));
        return rc;
    }

    if let Some(rc) = c.slots[cursor].downcast_ref::<Rc<T>>() {
        rc.clone()
    } else {
        // replace (else panics)
        log::warn!(
            "remember: slot {} type changed; replacing. \
             If this is due to conditional composition, prefer remember_with_key.",
            cursor
        );
        let rc: Rc<T> = Rc::new(init());
        c.slots[cursor] = Box::new(rc.clone());
        rc
    }
}

/// Key-based remember, stable across conditional branches.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let composer = active_composer();
    let mut c = composer.borrow_mut();
    let key = key.into();

    if let Some(existing) = c.keyed_slots.get(&key) {
        if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
            return rc.clone();
        } else {
            log::warn!(
                "remember_with_key: key '{}' reused with a different type; replacing.",
                key
            );
        }
    }

    let rc: Rc<T> = Rc::new(init());
    c.keyed_slots.insert(key, Box::new(rc.clone()));
    rc
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

/// One host instance: owns a slot table and a cleanup scope. State remembered
/// during `render` lives exactly as long as the composition; `dispose` runs
/// all registered cleanups and drops the slots.
pub struct Composition {
    composer: Rc<RefCell<Composer>>,
    scope: Scope,
}

impl Composition {
    pub fn new() -> Self {
        Self {
            composer: Rc::new(RefCell::new(Composer::default())),
            scope: Scope::new(),
        }
    }

    /// Runs one render pass. Slots persist across passes; the cursor restarts
    /// at zero.
    pub fn render<R>(&mut self, f: impl FnOnce() -> R) -> R {
        self.composer.borrow_mut().cursor = 0;
        ACTIVE.with(|stack| stack.borrow_mut().push(self.composer.clone()));
        let out = self.scope.run(f);
        ACTIVE.with(|stack| {
            stack.borrow_mut().pop();
        });
        out
    }

    /// Re-renders while state writes keep invalidating the composition, up to
    /// `limit` passes. Errs when the passes never settle, which means some
    /// render closure writes state unconditionally.
    pub fn render_until_settled<R>(
        &mut self,
        limit: usize,
        mut f: impl FnMut() -> R,
    ) -> Result<R, ComposeError> {
        for _ in 0..limit {
            take_invalidated();
            let out = self.render(&mut f);
            if !take_invalidated() {
                return Ok(out);
            }
        }
        Err(ComposeError::Unsettled(limit))
    }

    /// Tears the instance down: cleanups first, slots after.
    pub fn dispose(self) {
        self.scope.clone().dispose();
        let mut c = self.composer.borrow_mut();
        c.slots.clear();
        c.keyed_slots.clear();
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}
