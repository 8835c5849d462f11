//! # emojimix-core
//!
//! Backend library for emojimix: mix generation, SQLite persistence with
//! batched change notifications, and the list presenter that keeps a
//! display-ready projection in sync with the store.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use emojimix_core::config::Config;
//! use emojimix_core::presenter::MixListPresenter;
//! use emojimix_core::store::MixStore;
//!
//! let config = Config::load();
//! let store = MixStore::open(&config.database_path())?;
//! let mut presenter = MixListPresenter::new(store, config.generator())?;
//!
//! presenter.bind(|mixes| println!("{} mixes", mixes.len()));
//! presenter.request_new_mix()?;
//! presenter.request_clear_all()?;
//! ```
//!
//! ## Module Overview
//!
//! - [`generator`] — `MixGenerator` and `derive_color`
//! - [`store`] — `MixStore`, schema, change diffing, `StoreError`
//! - [`presenter`] — `MixListPresenter`
//! - [`config`] — TOML configuration (embedded defaults + user override)

pub mod config;
pub mod generator;
pub mod presenter;
pub mod store;

pub use emojimix_types as types;
