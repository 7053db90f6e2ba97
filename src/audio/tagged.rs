use std::cell::RefCell;
use std::rc::Rc;

use super::bank::{LoadProgress, SoundBank};
use super::SoundLoader;
use crate::backend::MediaBackend;
use crate::conf::Conf;
use crate::fs::resolve_path;
use crate::logging::{debug, error};
use crate::Error;

struct Shared<M: MediaBackend> {
    backend: M,
    assets_folder: Option<String>,
    bank: RefCell<SoundBank<M::Handle, M::Handle>>,
}

/// Sound loader for media-element audio (`<audio>` tags).
///
/// Each sound owns exactly one element, so a sound can't overlap itself, and playing a
/// sound that was interrupted halfway continues from where it stopped. Only
/// [SoundLoader::stop] on a looping sound rewinds it.
pub struct MediaSoundLoader<M: MediaBackend> {
    shared: Rc<Shared<M>>,
}

impl<M: MediaBackend> MediaSoundLoader<M> {
    pub fn new(backend: M, conf: Conf) -> Self {
        Self {
            shared: Rc::new(Shared {
                backend,
                assets_folder: conf.assets_folder,
                bank: RefCell::new(SoundBank::new(conf.muted)),
            }),
        }
    }
}

impl<M: MediaBackend> SoundLoader for MediaSoundLoader<M> {
    fn load(&self, name: &str, path: &str) {
        self.shared.bank.borrow_mut().request();

        let path = resolve_path(self.shared.assets_folder.as_deref(), path);
        let weak = Rc::downgrade(&self.shared);
        let name = name.to_string();
        let open_path = path.clone();

        self.shared.backend.open(
            &open_path,
            Box::new(move |res: Result<M::Handle, Error>| {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                match res {
                    Ok(handle) => {
                        debug!("Loaded sound {name} from {path}");
                        shared.bank.borrow_mut().insert(name, handle);
                    }
                    Err(err) => error!("Error loading sound {path}: {err}"),
                }
            }),
        );
    }

    fn all_loaded(&self) -> bool {
        self.progress().all_loaded()
    }

    fn play(&self, name: &str, looped: bool) {
        let handle = {
            let bank = self.shared.bank.borrow();
            if looped && bank.is_looping(name) {
                return;
            }
            if bank.muted {
                return;
            }
            bank.sound(name).cloned()
        };
        let Some(handle) = handle else {
            error!("Unknown sound: {name}");
            return;
        };

        let backend = &self.shared.backend;
        if looped {
            backend.set_looping(&handle, true);
            self.shared.bank.borrow_mut().start_loop(name, handle.clone());
        }
        backend.resume(&handle);
    }

    fn stop(&self, name: &str) {
        let handle = self.shared.bank.borrow_mut().end_loop(name);
        let Some(handle) = handle else {
            return;
        };

        let backend = &self.shared.backend;
        backend.set_looping(&handle, false);
        backend.pause(&handle);
        backend.rewind(&handle);
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
