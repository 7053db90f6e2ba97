//! Loading and playing sounds.
//!
//! ```ignore
//! let sounds = new_sound_loader(Conf::default())?;
//! sounds.load("coin", "coin.wav");
//! // ... later, once `sounds.all_loaded()`
//! sounds.play("coin", false);
//! ```
//!
//! Which loader you get depends on the platform, see [select]. They all behave the
//! same from the outside: loading is fire and forget, and a sound that fails to load
//! is logged and simply never becomes playable.

use std::sync::OnceLock;

use crate::conf::Conf;
use crate::logging::info;
use crate::Error;

mod bank;
mod buffered;
mod stub;
mod tagged;
mod unlock;

pub use bank::LoadProgress;
pub use buffered::BufferSoundLoader;
pub use stub::NullSoundLoader;
pub use tagged::MediaSoundLoader;

/// Something that loads sounds by name and plays them.
///
/// All methods take `&self`: loads complete later, from platform callbacks, so the
/// state is shared with them anyway.
pub trait SoundLoader {
    /// Start loading `path` and remember it as `name` once it's ready.
    ///
    /// Returns immediately. Failures are logged, never returned.
    fn load(&self, name: &str, path: &str);

    /// True when every `load` so far has finished successfully.
    fn all_loaded(&self) -> bool;

    /// Play a loaded sound. With `looped`, the sound repeats until [SoundLoader::stop]
    /// and asking to loop it again while it loops does nothing.
    ///
    /// Unknown names are logged and ignored.
    fn play(&self, name: &str, looped: bool);

    /// Stop a looping sound. Does nothing for sounds that aren't looping.
    fn stop(&self, name: &str);

    /// While muted, `play` does nothing. Sounds already playing keep playing.
    fn set_muted(&self, muted: bool);

    fn is_muted(&self) -> bool;

    fn progress(&self) -> LoadProgress;

    fn is_loaded(&self, name: &str) -> bool;

    fn is_looping(&self, name: &str) -> bool;
}

/// What the platform can do, audio-wise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Decoded sample buffers (Web Audio `AudioContext`, or `quad-snd` on PC).
    pub buffer_audio: bool,
    /// Media elements (`Audio` on the web).
    pub media_element: bool,
}

impl Capabilities {
    /// Look at the current platform.
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Capabilities {
        Capabilities {
            buffer_audio: crate::backend::web_has_audio_context(),
            media_element: crate::backend::web_has_audio_element(),
        }
    }

    /// Look at the current platform.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Capabilities {
        Capabilities {
            buffer_audio: cfg!(feature = "audio"),
            media_element: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Buffer,
    MediaElement,
    Stub,
}

/// Pick the best backend for `caps`: buffers, then media elements, then nothing.
pub fn select(caps: Capabilities) -> BackendKind {
    if caps.buffer_audio {
        BackendKind::Buffer
    } else if caps.media_element {
        BackendKind::MediaElement
    } else {
        BackendKind::Stub
    }
}

/// The backend for this process. Detected on first call, fixed afterwards.
pub fn selected_backend() -> BackendKind {
    static SELECTED: OnceLock<BackendKind> = OnceLock::new();

    *SELECTED.get_or_init(|| {
        let kind = select(Capabilities::detect());
        if kind == BackendKind::Stub {
            info!("This platform doesn't support audio playback, sounds are disabled");
        }
        kind
    })
}

/// Create a sound loader for [selected_backend].
///
/// Fails only if the chosen backend can't be created (on the web, if the
/// `AudioContext` constructor throws). There is no fallback to another backend.
pub fn new_sound_loader(conf: Conf) -> Result<Box<dyn SoundLoader>, Error> {
    let loader: Box<dyn SoundLoader> = match selected_backend() {
        BackendKind::Buffer => new_buffer_loader(conf)?,
        BackendKind::MediaElement => new_media_loader(conf)?,
        BackendKind::Stub => Box::new(NullSoundLoader::new()),
    };
    Ok(loader)
}

#[cfg(target_arch = "wasm32")]
fn new_buffer_loader(conf: Conf) -> Result<Box<dyn SoundLoader>, Error> {
    let backend = crate::backend::WebAudioBackend::new()?;
    Ok(Box::new(BufferSoundLoader::new(backend, conf)))
}

#[cfg(all(feature = "audio", not(target_arch = "wasm32")))]
fn new_buffer_loader(conf: Conf) -> Result<Box<dyn SoundLoader>, Error> {
    let backend = crate::backend::QuadSndBackend::new();
    Ok(Box::new(BufferSoundLoader::new(backend, conf)))
}

#[cfg(all(not(feature = "audio"), not(target_arch = "wasm32")))]
fn new_buffer_loader(_conf: Conf) -> Result<Box<dyn SoundLoader>, Error> {
    Err(Error::Unsupported("buffer audio without the \"audio\" feature"))
}

#[cfg(target_arch = "wasm32")]
fn new_media_loader(conf: Conf) -> Result<Box<dyn SoundLoader>, Error> {
    Ok(Box::new(MediaSoundLoader::new(
        crate::backend::WebMediaBackend,
        conf,
    )))
}

#[cfg(not(target_arch = "wasm32"))]
fn new_media_loader(_conf: Conf) -> Result<Box<dyn SoundLoader>, Error> {
    Err(Error::Unsupported("media element audio"))
}
