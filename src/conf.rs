//! Loader configuration.

/// Settings applied to a sound loader at creation.
///
/// ```
/// # use quad_sfx::conf::Conf;
/// let conf = Conf {
///     assets_folder: Some("assets/sfx".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conf {
    /// Folder every `load` path is relative to. With `Some("assets")`, loading
    /// `"coin.wav"` requests `"assets/coin.wav"`.
    ///
    /// On the web this is usually left at [`None`], since paths are relative to the page.
    pub assets_folder: Option<String>,

    /// Start muted.
    pub muted: bool,
}
