// Element types used by the unit tests to observe allocation and drop behavior.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

/// A zero-sized element type for exercising the paths that never touch the allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Zst;

/// An element type that increments a shared counter every time an instance is dropped.
///
/// Clones share the counter, so the total number of drops across a whole family of clones can
/// be read from any surviving handle.
#[derive(Debug, Clone)]
pub struct DropCounter(Rc<Cell<usize>>);

impl DropCounter {
    pub fn new() -> DropCounter {
        DropCounter(Rc::new(Cell::new(0)))
    }

    /// The number of instances dropped so far across all clones of this counter.
    pub fn count(&self) -> usize {
        self.0.get()
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

/// An element type for exercising unwind paths: it counts its drops through a shared handle
/// and can be armed to panic on its first drop or when cloned.
#[derive(Debug)]
pub struct DropBomb {
    drops: Rc<Cell<usize>>,
    panic_on_drop: bool,
    panic_on_clone: bool,
}

impl DropBomb {
    pub fn inert() -> DropBomb {
        DropBomb {
            drops: Rc::new(Cell::new(0)),
            panic_on_drop: false,
            panic_on_clone: false,
        }
    }

    /// An instance whose destructor panics the first time it runs.
    pub fn arm_drop() -> DropBomb {
        DropBomb {
            drops: Rc::new(Cell::new(0)),
            panic_on_drop: true,
            panic_on_clone: false,
        }
    }

    /// An instance that refuses to be cloned.
    pub fn arm_clone() -> DropBomb {
        DropBomb {
            drops: Rc::new(Cell::new(0)),
            panic_on_drop: false,
            panic_on_clone: true,
        }
    }

    /// A handle to this instance's drop count that outlives the instance. Clones share the
    /// count, so a family's total drops can be read from one handle.
    pub fn tracker(&self) -> Rc<Cell<usize>> {
        self.drops.clone()
    }
}

impl Clone for DropBomb {
    fn clone(&self) -> DropBomb {
        if self.panic_on_clone {
            panic!("armed clone");
        }

        DropBomb {
            drops: self.drops.clone(),
            panic_on_drop: self.panic_on_drop,
            panic_on_clone: false,
        }
    }
}

impl Drop for DropBomb {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);

        if self.panic_on_drop && self.drops.get() == 1 {
            panic!("armed drop");
        }
    }
}
