use crate::config::app::{CipherSettings, Features, Paths, SelfTestSettings};
use crate::consts::{DEFAULT_CIPHER_KEY, DEFAULT_SYNTHETIC_STUDENTS};

pub const DEFAULT_DATA_DIR: &str = ".";

pub fn default_paths() -> Paths {
    Paths {
        data_dir: DEFAULT_DATA_DIR.into(),
    }
}

pub fn default_cipher() -> CipherSettings {
    CipherSettings {
        key: DEFAULT_CIPHER_KEY.into(),
    }
}

pub fn default_features() -> Features {
    Features {
        autosave: true,
        strict_course_refs: false,
    }
}

pub fn default_selftest() -> SelfTestSettings {
    SelfTestSettings {
        synthetic_students: DEFAULT_SYNTHETIC_STUDENTS,
        rng_seed: None,
    }
}
