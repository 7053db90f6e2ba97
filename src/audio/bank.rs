use std::collections::HashMap;

/// How many sounds were requested and how many finished loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadProgress {
    total: usize,
    loaded: usize,
}

impl LoadProgress {
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// True once every requested sound loaded, including when nothing was requested.
    ///
    /// A sound that failed to load is never counted, so a single failure keeps this
    /// false for good.
    pub fn all_loaded(&self) -> bool {
        self.loaded == self.total
    }

    /// Fraction loaded, in `0.0..=1.0`. Handy for loading bars.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.loaded as f32 / self.total as f32
        }
    }
}

/// Bookkeeping shared by the buffer and media loaders: loaded sounds, active loops,
/// counters and the mute flag. `S` is what a sound loads into, `P` is what a loop plays
/// through.
pub(crate) struct SoundBank<S, P> {
    sounds: HashMap<String, S>,
    looping: HashMap<String, P>,
    progress: LoadProgress,
    pub muted: bool,
}

impl<S, P> SoundBank<S, P> {
    pub fn new(muted: bool) -> Self {
        Self {
            sounds: HashMap::new(),
            looping: HashMap::new(),
            progress: LoadProgress::default(),
            muted,
        }
    }

    /// Count a new load request. Returns true if it's the first one ever.
    pub fn request(&mut self) -> bool {
        self.progress.total += 1;
        self.progress.total == 1
    }

    /// Store a sound whose load finished.
    pub fn insert(&mut self, name: String, sound: S) {
        debug_assert!(self.progress.loaded < self.progress.total);
        self.sounds.insert(name, sound);
        self.progress.loaded += 1;
    }

    pub fn sound(&self, name: &str) -> Option<&S> {
        self.sounds.get(name)
    }

    pub fn progress(&self) -> LoadProgress {
        self.progress
    }

    pub fn is_looping(&self, name: &str) -> bool {
        self.looping.contains_key(name)
    }

    pub fn start_loop(&mut self, name: &str, playback: P) {
        self.looping.insert(name.to_string(), playback);
    }

    pub fn end_loop(&mut self, name: &str) -> Option<P> {
        self.looping.remove(name)
    }
}
