/// Everything that can go wrong while loading or playing a sound.
///
/// Loaders never hand these to the caller of `load` or `play`; they end up in the log.
/// The only place an [Error] reaches user code is backend construction.
#[derive(Debug)]
pub enum Error {
    FileError {
        kind: miniquad::fs::Error,
        path: String,
    },
    /// The request completed with a status other than 200 (or 0 for `file://`).
    HttpStatus {
        path: String,
        status: u16,
    },
    /// The request never produced a response body.
    Network {
        path: String,
    },
    Decode {
        path: String,
        reason: String,
    },
    Unsupported(&'static str),
    #[cfg(target_arch = "wasm32")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Error {
        Error::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::FileError { kind, path } => write!(f, "couldn't load file {path}: {kind:?}"),
            Self::HttpStatus { path, status } => {
                write!(f, "request for {path} failed with status {status}")
            }
            Self::Network { path } => write!(f, "request for {path} returned no data"),
            Self::Decode { path, reason } => write!(f, "couldn't decode {path}: {reason}"),
            Self::Unsupported(what) => write!(f, "{what} is not supported on this platform"),
            #[cfg(target_arch = "wasm32")]
            Self::Js(msg) => write!(f, "javascript error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
