//! Sound file paths and native file loading.

/// Join `path` onto the configured assets folder, if there is one.
///
/// There are super common project layouts like this:
/// ```text
///    .
///    ├── assets
///    ├── └── coin.wav
///    ├── src
///    ├── └── main.rs
///    └── Cargo.toml
/// ```
/// On PC assets are referenced relative to the current directory, while on web they
/// are usually relative to the page. Setting [crate::conf::Conf::assets_folder] on PC
/// keeps the same `load` paths working on both.
pub fn resolve_path(assets_folder: Option<&str>, path: &str) -> String {
    match assets_folder {
        Some(folder) if !folder.is_empty() => {
            format!("{}/{}", folder.trim_end_matches('/'), path)
        }
        _ => path.to_string(),
    }
}

/// Load a file without blocking, calling `on_loaded` once with the result.
///
/// Uses the filesystem on PC and an http request on web. On PC the callback runs
/// before this function returns.
pub fn load_file<F>(path: &str, on_loaded: F)
where
    F: FnOnce(Result<Vec<u8>, crate::Error>) + 'static,
{
    #[cfg(target_os = "ios")]
    if let Some(dir) = std::env::current_exe().ok().as_deref().and_then(std::path::Path::parent) {
        let _ = std::env::set_current_dir(dir);
    }

    // miniquad takes an `Fn`, but only ever calls it once.
    let on_loaded = std::cell::RefCell::new(Some(on_loaded));
    let owned_path = path.to_string();

    miniquad::fs::load_file(path, move |res| {
        if let Some(on_loaded) = on_loaded.borrow_mut().take() {
            on_loaded(res.map_err(|kind| crate::Error::FileError {
                kind,
                path: owned_path.clone(),
            }));
        }
    });
}
