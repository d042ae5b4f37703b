#![no_main]

use asset_link::domain::ports::ManifestRepository;
use asset_link::domain::entities::MANIFEST_FILE_NAME;
use asset_link::{JsonManifestRepository, Platform};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(dir) = tempfile::tempdir() else {
        return;
    };
    if std::fs::write(dir.path().join(MANIFEST_FILE_NAME), data).is_err() {
        return;
    }
    // Any stored shape must either migrate or be rejected
    for platform in [Platform::Ios, Platform::Android] {
        let _ = JsonManifestRepository::new().read(dir.path(), platform);
    }
});
