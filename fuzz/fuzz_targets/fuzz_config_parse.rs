#![no_main]

use algoviz_runtime::SessionConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let parsed = [SessionConfig::from_toml_str(text), SessionConfig::from_json_str(text)];
    for config in parsed.into_iter().flatten() {
        // Validation must never panic, and a clean config must build.
        if config.validate().is_empty() {
            let session = algoviz_runtime::PlaybackSession::new(config);
            assert!(session.is_ok());
        }
    }
});
