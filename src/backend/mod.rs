//! Platform audio backends.
//!
//! The loaders in [crate::audio] never touch a platform API directly. They talk to one of
//! two traits:
//! - [BufferBackend]: fetch bytes, decode them into a sample buffer, start one-shot
//!   playback nodes from it. Web Audio on the web, `quad-snd` on PC.
//! - [MediaBackend]: one reusable media element per sound. `<audio>` on the web.
//!
//! Every asynchronous operation reports back exactly once through a [Completion].
//! A backend is free to call it before returning.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::Error;

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(all(feature = "audio", not(target_arch = "wasm32")))]
mod quad;

#[cfg(test)]
pub(crate) mod fake;

#[cfg(target_arch = "wasm32")]
pub use web::{WebAudioBackend, WebMediaBackend};
#[cfg(target_arch = "wasm32")]
pub(crate) use web::{web_has_audio_context, web_has_audio_element};
#[cfg(all(feature = "audio", not(target_arch = "wasm32")))]
pub use quad::QuadSndBackend;

/// Called once when an asynchronous backend operation finishes.
pub type Completion<T> = Box<dyn FnOnce(Result<T, Error>)>;

/// Decoded-buffer audio, with one playback node per play.
pub trait BufferBackend: 'static {
    /// Raw fetched bytes, in whatever form the decoder wants them.
    type Payload: 'static;
    /// A decoded sample buffer. Cloning shares the same data.
    type Buffer: Clone + 'static;
    /// A started playback node. Dropping it must not stop playback.
    type Node: 'static;

    fn fetch(&self, path: &str, done: Completion<Self::Payload>);

    fn decode(&self, path: &str, payload: Self::Payload, done: Completion<Self::Buffer>);

    /// Create a node for `buffer`, connect it to the output and start it right away.
    fn start(&self, buffer: &Self::Buffer, looped: bool) -> Result<Self::Node, Error>;

    fn stop(&self, node: Self::Node);

    /// Start and immediately stop a silent tone. Must be called from inside a user
    /// input handler to count.
    fn unlock(&self);

    /// Run `handler` on the first user interaction, then forget about it.
    ///
    /// Platforms without an autoplay policy may run it immediately.
    fn on_first_interaction(&self, handler: Box<dyn FnOnce()>);
}

/// Media-element audio: one element per sound, paused and resumed in place.
pub trait MediaBackend: 'static {
    /// A media element. Cloning refers to the same element.
    type Handle: Clone + 'static;

    /// Create an element for `path` and start buffering it. `done` gets the element once
    /// it can play through, or the error if it never will.
    fn open(&self, path: &str, done: Completion<Self::Handle>);

    fn set_looping(&self, handle: &Self::Handle, looped: bool);

    /// Play from the current position.
    fn resume(&self, handle: &Self::Handle);

    fn pause(&self, handle: &Self::Handle);

    /// Move the playback position back to the start.
    fn rewind(&self, handle: &Self::Handle);
}

/// A [Completion] that several event listeners race to call. The first result wins,
/// every later one is dropped. Cloning shares the slot.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) struct CompletionSlot<T>(Rc<RefCell<Option<Completion<T>>>>);

impl<T> Clone for CompletionSlot<T> {
    fn clone(&self) -> Self {
        CompletionSlot(self.0.clone())
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl<T> CompletionSlot<T> {
    pub fn new(done: Completion<T>) -> Self {
        CompletionSlot(Rc::new(RefCell::new(Some(done))))
    }

    /// Hand `result` over, unless a result already was. Returns whether this one counted.
    pub fn finish(&self, result: Result<T, Error>) -> bool {
        let done = self.0.borrow_mut().take();
        match done {
            Some(done) => {
                done(result);
                true
            }
            None => false,
        }
    }
}

/// Whether an http response status means the body is the file.
///
/// `file://` pages get status 0 on success.
pub fn fetch_succeeded(status: u16) -> bool {
    status == 200 || status == 0
}

/// Turn a finished request into its body, or the reason there isn't one.
///
/// A network error also reports status 0, but comes without a body.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn response_payload<T>(path: &str, status: u16, body: Option<T>) -> Result<T, Error> {
    if !fetch_succeeded(status) {
        return Err(Error::HttpStatus {
            path: path.to_string(),
            status,
        });
    }
    body.ok_or_else(|| Error::Network {
        path: path.to_string(),
    })
}

/// Run a decoder that reports bad input by panicking, turning the panic into
/// [Error::Decode]. Does nothing for builds with `panic = "abort"`.
#[cfg_attr(any(not(feature = "audio"), target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn decode_or_recover<T>(path: &str, decode: impl FnOnce() -> T) -> Result<T, Error> {
    panic::catch_unwind(AssertUnwindSafe(decode)).map_err(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|msg| msg.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "decoder panicked".to_string());
        Error::Decode {
            path: path.to_string(),
            reason,
        }
    })
}
