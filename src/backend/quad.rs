use std::rc::Rc;

pub use quad_snd::{AudioContext, PlaySoundParams, Playback, Sound as SoundId};

use super::{BufferBackend, Completion};
use crate::Error;

/// Buffer backend on top of `quad-snd`, for PC.
///
/// Files are read through [crate::fs::load_file] and decoded synchronously, so loads
/// finish before `load` returns. Desktop platforms have no autoplay policy: the
/// interaction handler runs as soon as it is armed.
///
/// ### Warning
/// Decoded sounds are never deleted from the audio context while it's alive.
pub struct QuadSndBackend {
    ctx: AudioContext,
}

impl QuadSndBackend {
    pub fn new() -> Self {
        Self {
            ctx: AudioContext::new(),
        }
    }

    pub fn context(&self) -> &AudioContext {
        &self.ctx
    }
}

impl Default for QuadSndBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferBackend for QuadSndBackend {
    type Payload = Vec<u8>;
    type Buffer = Rc<SoundId>;
    type Node = Playback;

    fn fetch(&self, path: &str, done: Completion<Vec<u8>>) {
        crate::fs::load_file(path, done);
    }

    fn decode(&self, path: &str, payload: Vec<u8>, done: Completion<Rc<SoundId>>) {
        if payload.is_empty() {
            done(Err(Error::Decode {
                path: path.to_string(),
                reason: "empty file".to_string(),
            }));
            return;
        }
        // quad-snd panics on data it can't parse (unknown format, too many channels).
        let sound = super::decode_or_recover(path, || SoundId::load(&self.ctx, &payload));
        done(sound.map(Rc::new));
    }

    fn start(&self, buffer: &Rc<SoundId>, looped: bool) -> Result<Playback, Error> {
        Ok(buffer.play(
            &self.ctx,
            PlaySoundParams {
                looped,
                volume: 1.0,
            },
        ))
    }

    fn stop(&self, node: Playback) {
        node.stop(&self.ctx);
    }

    fn unlock(&self) {}

    fn on_first_interaction(&self, handler: Box<dyn FnOnce()>) {
        handler();
    }
}
