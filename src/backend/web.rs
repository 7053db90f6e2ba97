//! Browser backends: the Web Audio API and `<audio>` elements.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, ArrayBuffer, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    AudioBuffer, AudioBufferSourceNode, AudioContext, HtmlAudioElement, XmlHttpRequest,
    XmlHttpRequestResponseType,
};

use super::{response_payload, BufferBackend, Completion, CompletionSlot, MediaBackend};
use crate::input::UnlockTrigger;
use crate::logging::warn;
use crate::Error;

/// A constructor on `window`, if the browser has one by that name.
fn global_constructor(name: &str) -> Option<Function> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

// Older Safari only has the prefixed name.
fn audio_context_constructor() -> Option<Function> {
    global_constructor("AudioContext").or_else(|| global_constructor("webkitAudioContext"))
}

pub(crate) fn web_has_audio_context() -> bool {
    audio_context_constructor().is_some()
}

pub(crate) fn web_has_audio_element() -> bool {
    global_constructor("Audio").is_some()
}

/// Web Audio API backend. One `AudioContext` per backend.
pub struct WebAudioBackend {
    ctx: AudioContext,
}

impl WebAudioBackend {
    pub fn new() -> Result<Self, Error> {
        let constructor =
            audio_context_constructor().ok_or(Error::Unsupported("the Web Audio API"))?;
        let ctx = Reflect::construct(&constructor, &Array::new())?;
        Ok(Self {
            ctx: ctx.unchecked_into(),
        })
    }

    pub fn context(&self) -> &AudioContext {
        &self.ctx
    }

    fn request(path: &str, slot: CompletionSlot<ArrayBuffer>) -> Result<(), JsValue> {
        let xhr = XmlHttpRequest::new()?;
        xhr.open_with_async("GET", path, true)?;
        xhr.set_response_type(XmlHttpRequestResponseType::Arraybuffer);

        // `loadend` fires exactly once, after success, error or abort alike.
        let request = xhr.clone();
        let path = path.to_string();
        let on_loadend = Closure::once_into_js(move || {
            slot.finish(response_body(&request, &path));
        });
        xhr.add_event_listener_with_callback("loadend", on_loadend.unchecked_ref())?;
        xhr.send()
    }
}

fn response_body(xhr: &XmlHttpRequest, path: &str) -> Result<ArrayBuffer, Error> {
    let status = xhr.status().unwrap_or(0);
    let body = xhr
        .response()
        .ok()
        .and_then(|body| body.dyn_into::<ArrayBuffer>().ok());
    response_payload(path, status, body)
}

fn decode_error(path: &str, err: JsValue) -> Error {
    Error::Decode {
        path: path.to_string(),
        reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

impl BufferBackend for WebAudioBackend {
    type Payload = ArrayBuffer;
    type Buffer = AudioBuffer;
    type Node = AudioBufferSourceNode;

    fn fetch(&self, path: &str, done: Completion<ArrayBuffer>) {
        let slot = CompletionSlot::new(done);
        if let Err(err) = Self::request(path, slot.clone()) {
            slot.finish(Err(err.into()));
        }
    }

    fn decode(&self, path: &str, payload: ArrayBuffer, done: Completion<AudioBuffer>) {
        let promise = match self.ctx.decode_audio_data(&payload) {
            Ok(promise) => promise,
            Err(err) => {
                done(Err(decode_error(path, err)));
                return;
            }
        };

        let path = path.to_string();
        spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|buffer| buffer.unchecked_into::<AudioBuffer>())
                .map_err(|err| decode_error(&path, err));
            done(result);
        });
    }

    fn start(&self, buffer: &AudioBuffer, looped: bool) -> Result<AudioBufferSourceNode, Error> {
        let node = self.ctx.create_buffer_source()?;
        node.set_buffer(Some(buffer));
        node.connect_with_audio_node(&self.ctx.destination())?;
        node.set_loop(looped);
        node.start()?;
        Ok(node)
    }

    fn stop(&self, node: AudioBufferSourceNode) {
        let _ = node.stop();
    }

    fn unlock(&self) {
        let tone = || -> Result<(), JsValue> {
            let _ = self.ctx.resume()?;
            let oscillator = self.ctx.create_oscillator()?;
            oscillator.connect_with_audio_node(&self.ctx.destination())?;
            oscillator.start_with_when(0.0)?;
            oscillator.stop_with_when(0.0)?;
            Ok(())
        };
        if let Err(err) = tone() {
            warn!("Couldn't play the audio unlock tone: {err:?}");
        }
    }

    fn on_first_interaction(&self, handler: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let handler = RefCell::new(Some(handler));
        let registered: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let slot = registered.clone();
        let target = window.clone();

        let listener = Closure::wrap(Box::new(move || {
            let closure = slot.borrow_mut().take();
            if let Some(closure) = closure {
                for trigger in UnlockTrigger::ALL {
                    let _ = target.remove_event_listener_with_callback(
                        trigger.event_name(),
                        closure.as_ref().unchecked_ref(),
                    );
                }
                // Can't drop a closure while it runs; the JS GC collects it instead.
                let _ = closure.into_js_value();
            }

            let handler = handler.borrow_mut().take();
            if let Some(handler) = handler {
                handler();
            }
        }) as Box<dyn FnMut()>);

        for trigger in UnlockTrigger::ALL {
            if let Err(err) = window
                .add_event_listener_with_callback(trigger.event_name(), listener.as_ref().unchecked_ref())
            {
                warn!("Couldn't listen for {}: {err:?}", trigger.event_name());
            }
        }
        *registered.borrow_mut() = Some(listener);
    }
}

/// `<audio>` element backend, for browsers without Web Audio.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebMediaBackend;

impl MediaBackend for WebMediaBackend {
    type Handle = HtmlAudioElement;

    fn open(&self, path: &str, done: Completion<HtmlAudioElement>) {
        let audio = match HtmlAudioElement::new() {
            Ok(audio) => audio,
            Err(err) => {
                done(Err(err.into()));
                return;
            }
        };
        let slot = CompletionSlot::new(done);

        // `canplaythrough` fires again after seeks; only the first one counts.
        let on_ready = {
            let slot = slot.clone();
            let element = audio.clone();
            Closure::wrap(Box::new(move || {
                slot.finish(Ok(element.clone()));
            }) as Box<dyn FnMut()>)
        };
        let on_error = {
            let slot = slot.clone();
            let path = path.to_string();
            Closure::wrap(Box::new(move || {
                slot.finish(Err(Error::Network {
                    path: path.clone(),
                }));
            }) as Box<dyn FnMut()>)
        };

        let listen = audio
            .add_event_listener_with_callback("canplaythrough", on_ready.as_ref().unchecked_ref())
            .and_then(|_| {
                audio.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
            });
        if let Err(err) = listen {
            slot.finish(Err(err.into()));
            return;
        }
        // The element lives as long as the page, and so do its listeners.
        on_ready.forget();
        on_error.forget();

        audio.set_src(path);
        audio.load();
    }

    fn set_looping(&self, handle: &HtmlAudioElement, looped: bool) {
        handle.set_loop(looped);
    }

    fn resume(&self, handle: &HtmlAudioElement) {
        // The returned promise rejects when autoplay is blocked; nothing to do about it.
        let _ = handle.play();
    }

    fn pause(&self, handle: &HtmlAudioElement) {
        let _ = handle.pause();
    }

    fn rewind(&self, handle: &HtmlAudioElement) {
        handle.set_current_time(0.0);
    }
}
