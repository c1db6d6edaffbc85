//! Thread-local session storage (wasm runs on one thread)

use std::cell::RefCell;

use crate::controller::Controller;

thread_local! {
    static CONTROLLER: RefCell<Controller> = RefCell::new(Controller::default());
}

pub(crate) fn with_controller<R>(f: impl FnOnce(&mut Controller) -> R) -> R {
    CONTROLLER.with(|cell| f(&mut cell.borrow_mut()))
}

pub(crate) fn read_controller<R>(f: impl FnOnce(&Controller) -> R) -> R {
    CONTROLLER.with(|cell| f(&cell.borrow()))
}
