//! In-memory backends for tests. Fetches and element loads stay pending until the
//! test resolves them, the way a browser completes them on a later tick.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{BufferBackend, Completion, CompletionSlot, MediaBackend};
use crate::Error;

#[derive(Default)]
struct FakeAudioState {
    pending: Vec<(String, Completion<Vec<u8>>)>,
    interaction: Option<Box<dyn FnOnce()>>,
    armed: usize,
    unlocks: usize,
    next_node: u32,
    started: Vec<Started>,
    stopped: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Started {
    pub node: u32,
    pub sound: Rc<str>,
    pub looped: bool,
}

/// Fake buffer backend. Bytes decode to the UTF-8 text they contain; empty bytes fail
/// to decode.
#[derive(Clone, Default)]
pub(crate) struct FakeAudio {
    state: Rc<RefCell<FakeAudioState>>,
}

impl FakeAudio {
    /// Complete the oldest pending fetch of `path`.
    pub fn respond(&self, path: &str, result: Result<&str, Error>) {
        let done = {
            let mut state = self.state.borrow_mut();
            let ix = state
                .pending
                .iter()
                .position(|(p, _)| p == path)
                .unwrap_or_else(|| panic!("no pending fetch for {path}"));
            state.pending.remove(ix).1
        };
        done(result.map(|text| text.as_bytes().to_vec()));
    }

    pub fn pending_fetches(&self) -> Vec<String> {
        self.state.borrow().pending.iter().map(|(p, _)| p.clone()).collect()
    }

    /// Simulate a click. Returns whether a listener was there to hear it.
    pub fn interact(&self) -> bool {
        let handler = self.state.borrow_mut().interaction.take();
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn times_armed(&self) -> usize {
        self.state.borrow().armed
    }

    pub fn unlocks(&self) -> usize {
        self.state.borrow().unlocks
    }

    pub fn started(&self) -> Vec<Started> {
        self.state.borrow().started.clone()
    }

    pub fn stopped(&self) -> Vec<u32> {
        self.state.borrow().stopped.clone()
    }
}

impl BufferBackend for FakeAudio {
    type Payload = Vec<u8>;
    type Buffer = Rc<str>;
    type Node = u32;

    fn fetch(&self, path: &str, done: Completion<Vec<u8>>) {
        self.state.borrow_mut().pending.push((path.to_string(), done));
    }

    fn decode(&self, path: &str, payload: Vec<u8>, done: Completion<Rc<str>>) {
        let result = match String::from_utf8(payload) {
            Ok(text) if !text.is_empty() => Ok(Rc::from(text)),
            _ => Err(Error::Decode {
                path: path.to_string(),
                reason: "not audio".to_string(),
            }),
        };
        done(result);
    }

    fn start(&self, buffer: &Rc<str>, looped: bool) -> Result<u32, Error> {
        let mut state = self.state.borrow_mut();
        state.next_node += 1;
        let node = state.next_node;
        state.started.push(Started {
            node,
            sound: buffer.clone(),
            looped,
        });
        Ok(node)
    }

    fn stop(&self, node: u32) {
        self.state.borrow_mut().stopped.push(node);
    }

    fn unlock(&self) {
        self.state.borrow_mut().unlocks += 1;
    }

    fn on_first_interaction(&self, handler: Box<dyn FnOnce()>) {
        let mut state = self.state.borrow_mut();
        state.armed += 1;
        state.interaction = Some(handler);
    }
}

/// A fake `<audio>` element.
#[derive(Debug, Default)]
pub(crate) struct FakeElement {
    pub path: String,
    pub looping: Cell<bool>,
    pub playing: Cell<bool>,
    pub position: Cell<f64>,
    pub plays: Cell<u32>,
}

#[derive(Default)]
struct FakeMediaState {
    pending: Vec<(Rc<FakeElement>, CompletionSlot<Rc<FakeElement>>)>,
}

/// Fake media backend. Elements fire their events only when the test says so, and may
/// report "can play through" more than once like real ones do.
#[derive(Clone, Default)]
pub(crate) struct FakeMedia {
    state: Rc<RefCell<FakeMediaState>>,
}

impl FakeMedia {
    fn listener(&self, path: &str) -> (Rc<FakeElement>, CompletionSlot<Rc<FakeElement>>) {
        let state = self.state.borrow();
        let (element, listener) = state
            .pending
            .iter()
            .find(|(e, _)| e.path == path)
            .unwrap_or_else(|| panic!("no element for {path}"));
        (element.clone(), listener.clone())
    }

    pub fn can_play_through(&self, path: &str) -> Rc<FakeElement> {
        let (element, listener) = self.listener(path);
        listener.finish(Ok(element.clone()));
        element
    }

    pub fn fail(&self, path: &str) {
        let (_, listener) = self.listener(path);
        listener.finish(Err(Error::Network {
            path: path.to_string(),
        }));
    }
}

impl MediaBackend for FakeMedia {
    type Handle = Rc<FakeElement>;

    fn open(&self, path: &str, done: Completion<Rc<FakeElement>>) {
        let element = Rc::new(FakeElement {
            path: path.to_string(),
            ..Default::default()
        });
        // Same first-event-wins slot the `<audio>` backend hands its listeners.
        self.state
            .borrow_mut()
            .pending
            .push((element, CompletionSlot::new(done)));
    }

    fn set_looping(&self, handle: &Rc<FakeElement>, looped: bool) {
        handle.looping.set(looped);
    }

    fn resume(&self, handle: &Rc<FakeElement>) {
        handle.playing.set(true);
        handle.plays.set(handle.plays.get() + 1);
    }

    fn pause(&self, handle: &Rc<FakeElement>) {
        handle.playing.set(false);
    }

    fn rewind(&self, handle: &Rc<FakeElement>) {
        handle.position.set(0.0);
    }
}
