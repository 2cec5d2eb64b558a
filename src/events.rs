use crate::bounds::Dimensions;
use fnv::FnvHashMap;
use nalgebra::Vector2;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

type ResizeListener = Rc<RefCell<dyn FnMut(Dimensions)>>;
type PointerListener = Rc<RefCell<dyn FnMut(Vector2<f64>)>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    resize: FnvHashMap<ListenerId, ResizeListener>,
    pointer: FnvHashMap<ListenerId, PointerListener>,
}

impl Listeners {
    fn allocate(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Viewport resize and pointer-move notifications from the host.
///
/// Listeners may register or remove listeners while being notified. A
/// listener removed during a dispatch is not called for the rest of it.
#[derive(Clone, Default)]
pub struct HostEvents {
    listeners: Rc<RefCell<Listeners>>,
}

impl HostEvents {
    pub fn new() -> HostEvents {
        HostEvents::default()
    }

    pub fn on_resize(&self, listener: impl FnMut(Dimensions) + 'static) -> ListenerId {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.allocate();
        listeners.resize.insert(id, Rc::new(RefCell::new(listener)));
        id
    }

    pub fn on_pointer_move(&self, listener: impl FnMut(Vector2<f64>) + 'static) -> ListenerId {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.allocate();
        listeners.pointer.insert(id, Rc::new(RefCell::new(listener)));
        id
    }

    /// Returns whether a listener was registered under `id`.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        listeners.resize.remove(&id).is_some() || listeners.pointer.remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        let listeners = self.listeners.borrow();
        listeners.resize.len() + listeners.pointer.len()
    }

    pub fn dispatch_resize(&self, dimensions: Dimensions) {
        let mut targets: Vec<(ListenerId, ResizeListener)> = self
            .listeners
            .borrow()
            .resize
            .iter()
            .map(|(id, listener)| (*id, listener.clone()))
            .collect();
        targets.sort_by_key(|(id, _)| *id);
        for (id, listener) in targets {
            if self.listeners.borrow().resize.contains_key(&id) {
                (&mut *listener.borrow_mut())(dimensions);
            }
        }
    }

    pub fn dispatch_pointer(&self, position: Vector2<f64>) {
        let mut targets: Vec<(ListenerId, PointerListener)> = self
            .listeners
            .borrow()
            .pointer
            .iter()
            .map(|(id, listener)| (*id, listener.clone()))
            .collect();
        targets.sort_by_key(|(id, _)| *id);
        for (id, listener) in targets {
            if self.listeners.borrow().pointer.contains_key(&id) {
                (&mut *listener.borrow_mut())(position);
            }
        }
    }
}
