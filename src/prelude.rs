//! Most common types that can be glob-imported `use quad_sfx::prelude::*` for convenience.

pub use crate::audio::{
    new_sound_loader, selected_backend, BackendKind, BufferSoundLoader, LoadProgress,
    MediaSoundLoader, NullSoundLoader, SoundLoader,
};
pub use crate::conf::Conf;
pub use crate::Error;

pub use crate::logging::*;
