//! Generator → store → presenter, through the public API only.

use std::cell::RefCell;
use std::rc::Rc;

use emojimix_core::generator::{derive_color, MixGenerator};
use emojimix_core::presenter::MixListPresenter;
use emojimix_core::store::MixStore;
use emojimix_core::types::{ColorRgba, Mix};
use tempfile::NamedTempFile;

#[test]
fn grapes_melon_watermelon_round_trip() {
    let tmp = NamedTempFile::new().unwrap();
    let mut store = MixStore::open(tmp.path()).unwrap();

    let color = derive_color(&["🍇", "🍈", "🍉"]);
    store.create(&Mix::new("🍇🍈🍉", color)).unwrap();

    let listed = store.list_all().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].symbols, "🍇🍈🍉");

    let again = derive_color(&["🍇", "🍈", "🍉"]);
    assert_eq!(color, again);
    assert_eq!(listed[0].color.to_hex(), again.to_hex());
    for channel in [listed[0].color.red, listed[0].color.green, listed[0].color.blue] {
        assert!((0.25..0.75).contains(&channel));
    }
}

#[test]
fn presenter_survives_a_restart() {
    let tmp = NamedTempFile::new().unwrap();
    let palette = vec!["🍋".to_string(), "🍌".to_string()];

    let created = {
        let store = MixStore::open(tmp.path()).unwrap();
        let mut presenter =
            MixListPresenter::new(store, MixGenerator::with_seed(palette.clone(), 5)).unwrap();
        for _ in 0..4 {
            presenter.request_new_mix().unwrap();
        }
        presenter.mixes().to_vec()
    };

    let store = MixStore::open(tmp.path()).unwrap();
    let presenter = MixListPresenter::new(store, MixGenerator::with_seed(palette, 6)).unwrap();
    assert_eq!(presenter.mixes(), created.as_slice());
    assert_eq!(presenter.mixes().len(), 4);
}

#[test]
fn display_sees_every_change() {
    let store = MixStore::open_in_memory().unwrap();
    let generator = MixGenerator::with_seed(vec!["🥝".to_string()], 0).with_symbols_per_mix(2);
    let mut presenter = MixListPresenter::new(store, generator).unwrap();

    let frames: Rc<RefCell<Vec<Vec<String>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&frames);
    presenter.bind(move |mixes| {
        sink.borrow_mut()
            .push(mixes.iter().map(|m| m.symbols.clone()).collect());
    });

    presenter.request_new_mix().unwrap();
    presenter.request_new_mix().unwrap();
    presenter.request_clear_all().unwrap();

    let frames = frames.borrow();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0], vec!["🥝🥝"]);
    assert_eq!(frames[1], vec!["🥝🥝", "🥝🥝"]);
    assert!(frames[2].is_empty());

    let expected = derive_color(&["🥝", "🥝"]);
    assert_eq!(expected.blue, 0.25);
    assert_ne!(expected, ColorRgba::opaque(0.25, 0.25, 0.25));
}
