use std::cell::RefCell;
use std::rc::Rc;

use emojimix_types::{ChangeNotification, Mix};

use crate::generator::derive_color;
use crate::store::MixStore;


/// Mix whose color is derived from each char of `symbols`.
fn mix(symbols: &str) -> Mix {
    let parts: Vec<String> = symbols.chars().map(String::from).collect();
    Mix::new(symbols, derive_color(&parts))
}

/// In-memory store whose observer records every notification.
fn recording_store() -> (MixStore, Rc<RefCell<Vec<ChangeNotification>>>) {
    let mut store = MixStore::open_in_memory().unwrap();
    let notes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&notes);
    store.set_observer(move |note| sink.borrow_mut().push(note.clone()));
    (store, notes)
}
