use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::bank::{LoadProgress, SoundBank};
use super::unlock::UnlockState;
use super::SoundLoader;
use crate::backend::BufferBackend;
use crate::conf::Conf;
use crate::fs::resolve_path;
use crate::logging::{debug, error};
use crate::Error;

struct Shared<B: BufferBackend> {
    backend: B,
    assets_folder: Option<String>,
    bank: RefCell<SoundBank<B::Buffer, B::Node>>,
    unlock: RefCell<UnlockState>,
}

/// Sound loader for decoded-buffer audio (Web Audio, `quad-snd`).
///
/// Every `play` starts a fresh node from the shared decoded buffer, so the same sound
/// can overlap itself.
///
/// ### Autoplay
/// Nothing plays until the first click, key press or touch after the first `load`.
/// A `play` issued before that is parked and runs inside the input handler. Only the
/// most recent parked request survives: `play("a")` then `play("b")` before any input
/// plays only `"b"`.
pub struct BufferSoundLoader<B: BufferBackend> {
    shared: Rc<Shared<B>>,
}

impl<B: BufferBackend> BufferSoundLoader<B> {
    pub fn new(backend: B, conf: Conf) -> Self {
        Self {
            shared: Rc::new(Shared {
                backend,
                assets_folder: conf.assets_folder,
                bank: RefCell::new(SoundBank::new(conf.muted)),
                unlock: RefCell::new(UnlockState::default()),
            }),
        }
    }

    /// Whether a user interaction already unlocked audio output.
    pub fn is_unlocked(&self) -> bool {
        self.shared.unlock.borrow().is_unlocked()
    }
}

impl<B: BufferBackend> Shared<B> {
    fn arm_unlock(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.backend.on_first_interaction(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.unlock_now();
            }
        }));
    }

    fn unlock_now(&self) {
        if self.unlock.borrow().is_unlocked() {
            return;
        }
        self.backend.unlock();
        let pending = self.unlock.borrow_mut().unlock();
        debug!("Audio unlocked");

        if let Some(pending) = pending {
            self.play(&pending.name, pending.looped);
        }
    }

    fn fetched(weak: Weak<Self>, name: String, path: String, payload: B::Payload) {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let decode_path = path.clone();
        shared.backend.decode(
            &decode_path,
            payload,
            Box::new(move |res: Result<B::Buffer, Error>| {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                match res {
                    Ok(buffer) => {
                        debug!("Loaded sound {name} from {path}");
                        shared.bank.borrow_mut().insert(name, buffer);
                    }
                    Err(err) => error!("Error decoding audio data for {path}: {err}"),
                }
            }),
        );
    }

    fn play(&self, name: &str, looped: bool) {
        if looped && self.bank.borrow().is_looping(name) {
            return;
        }
        if self.unlock.borrow_mut().defer(name, looped) {
            return;
        }

        let buffer = {
            let bank = self.bank.borrow();
            if bank.muted {
                return;
            }
            bank.sound(name).cloned()
        };
        let Some(buffer) = buffer else {
            error!("Unknown sound: {name}");
            return;
        };

        match self.backend.start(&buffer, looped) {
            Ok(node) => {
                if looped {
                    self.bank.borrow_mut().start_loop(name, node);
                }
            }
            Err(err) => error!("Failed to start sound {name}: {err}"),
        }
    }
}

impl<B: BufferBackend> SoundLoader for BufferSoundLoader<B> {
    fn load(&self, name: &str, path: &str) {
        let first = self.shared.bank.borrow_mut().request();
        if first {
            self.shared.arm_unlock();
        }

        let path = resolve_path(self.shared.assets_folder.as_deref(), path);
        let weak = Rc::downgrade(&self.shared);
        let name = name.to_string();
        let fetch_path = path.clone();

        self.shared.backend.fetch(
            &fetch_path,
            Box::new(move |res: Result<B::Payload, Error>| match res {
                Ok(payload) => Shared::fetched(weak, name, path, payload),
                Err(err) => error!("Error loading sound {path}: {err}"),
            }),
        );
    }

    fn all_loaded(&self) -> bool {
        self.progress().all_loaded()
    }

    fn play(&self, name: &str, looped: bool) {
        self.shared.play(name, looped);
    }

    fn stop(&self, name: &str) {
        let node = self.shared.bank.borrow_mut().end_loop(name);
        if let Some(node) = node {
            self.shared.backend.stop(node);
        }
    }

    fn set_muted(&self, muted: bool) {
        self.shared.bank.borrow_mut().muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.shared.bank.borrow().muted
    }

    fn progress(&self) -> LoadProgress {
        self.shared.bank.borrow().progress()
    }

    fn is_loaded(&self, name: &str) -> bool {
        self.shared.bank.borrow().sound(name).is_some()
    }

    fn is_looping(&self, name: &str) -> bool {
        self.shared.bank.borrow().is_looping(name)
    }
}
