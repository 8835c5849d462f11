//! List presenter: owns the store and generator, keeps the display-ready
//! projection and pushes it to a bound display on every store change.
//!
//! The store's observer forwards notifications into a channel; the presenter
//! drains it after each request and rebuilds the whole projection rather than
//! applying index diffs.

use crossbeam_channel::{unbounded, Receiver};

use emojimix_types::{ChangeNotification, Mix, PresentableMix};

use crate::generator::MixGenerator;
use crate::store::{MixStore, StoreResult};

/// Display callback receiving the full projection after each change.
pub type MixesBinding = Box<dyn FnMut(&[PresentableMix])>;

pub struct MixListPresenter {
    store: MixStore,
    generator: MixGenerator,
    changes: Receiver<ChangeNotification>,
    mixes: Vec<PresentableMix>,
    binding: Option<MixesBinding>,
    /// A change arrived but the rebuild failed; retried by `process_changes`.
    stale: bool,
}

impl MixListPresenter {
    /// Take over `store` (replacing its observer) and load the initial projection.
    pub fn new(mut store: MixStore, generator: MixGenerator) -> StoreResult<Self> {
        let (tx, rx) = unbounded();
        store.set_observer(move |note: &ChangeNotification| {
            if tx.send(note.clone()).is_err() {
                log::warn!(target: "presenter", "change dropped, presenter is gone");
            }
        });
        let mixes = store.records()?;
        log::debug!(target: "presenter", "initial projection: {} mixes", mixes.len());
        Ok(Self {
            store,
            generator,
            changes: rx,
            mixes,
            binding: None,
            stale: false,
        })
    }

    pub fn mixes(&self) -> &[PresentableMix] {
        &self.mixes
    }

    pub fn store(&self) -> &MixStore {
        &self.store
    }

    /// Set the display binding, replacing any previous one.
    pub fn bind(&mut self, binding: impl FnMut(&[PresentableMix]) + 'static) {
        self.binding = Some(Box::new(binding));
    }

    /// Generate a mix, persist it and refresh the projection.
    ///
    /// An error from the refresh means the mix was stored but the projection
    /// is stale; the next `process_changes` or `reload` picks it up.
    pub fn request_new_mix(&mut self) -> StoreResult<Mix> {
        let mix = self.generator.make_mix();
        self.store.create(&mix)?;
        self.process_changes()?;
        Ok(mix)
    }

    /// Delete every mix and refresh the projection.
    pub fn request_clear_all(&mut self) -> StoreResult<usize> {
        let removed = self.store.delete_all()?;
        self.process_changes()?;
        Ok(removed)
    }

    /// Re-read the store for writes made elsewhere.
    pub fn refresh(&mut self) -> StoreResult<bool> {
        self.store.refresh()?;
        self.process_changes()
    }

    /// Drain queued notifications; rebuild once if any arrived or an earlier
    /// rebuild failed.
    pub fn process_changes(&mut self) -> StoreResult<bool> {
        let batches = self.changes.try_iter().count();
        if batches == 0 && !self.stale {
            return Ok(false);
        }
        log::debug!(target: "presenter", "{} change batch(es), rebuilding", batches);
        self.stale = true;
        self.reload()?;
        Ok(true)
    }

    /// Replace the projection with the store's current contents and notify the
    /// binding. On failure the previous projection is kept.
    pub fn reload(&mut self) -> StoreResult<()> {
        self.mixes = self.store.records()?;
        self.stale = false;
        if let Some(binding) = self.binding.as_mut() {
            binding(&self.mixes);
        }
        Ok(())
    }
}
