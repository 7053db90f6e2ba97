use super::bank::LoadProgress;
use super::SoundLoader;

/// Sound loader for platforms with no audio at all. Does nothing, and always reports
/// everything as loaded so nobody waits on it forever.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSoundLoader;

impl NullSoundLoader {
    pub fn new() -> Self {
        NullSoundLoader
    }
}

impl SoundLoader for NullSoundLoader {
    fn load(&self, _name: &str, _path: &str) {}

    fn all_loaded(&self) -> bool {
        true
    }

    fn play(&self, _name: &str, _looped: bool) {}

    fn stop(&self, _name: &str) {}

    fn set_muted(&self, _muted: bool) {}

    fn is_muted(&self) -> bool {
        false
    }

    fn progress(&self) -> LoadProgress {
        LoadProgress::default()
    }

    fn is_loaded(&self, _name: &str) -> bool {
        false
    }

    fn is_looping(&self, _name: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_loaded() {
        let sounds = NullSoundLoader::new();
        sounds.load("coin", "coin.wav");
        sounds.play("coin", true);
        sounds.stop("coin");
        assert!(sounds.all_loaded());
        assert!(!sounds.is_looping("coin"));
    }
}
