#![cfg(windows)]

use std::time::{Duration, Instant};

use autoreader::sapi::{self, SapiSpeaker};
use autoreader::{Reader, ReaderConfig};

#[test]
fn test_read_to_wave_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("speech.wav");

    sapi::initialize().unwrap();
    {
        let config = ReaderConfig {
            auto_save: true,
            exit_on_ready: true,
            ..ReaderConfig::default()
        };
        let prompt_path = path.clone();
        let mut reader = Reader::new(&config, SapiSpeaker::new)
            .unwrap()
            .with_save_prompt(move || Some(prompt_path.clone()));

        reader.paste("The quick brown fox jumps over the lazy dog.").unwrap();

        let mut highlighted = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(30);
        while !reader.should_exit() {
            assert!(Instant::now() < deadline, "speech did not finish in time");
            reader.pump().unwrap();
            if let Some(range) = reader.highlight() {
                if highlighted.last() != Some(&range) {
                    highlighted.push(range);
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        assert!(!highlighted.is_empty());
        assert!(highlighted.windows(2).all(|pair| pair[0].start < pair[1].start));
        assert_eq!(None, reader.highlight());
    }
    sapi::finalize();

    let len = std::fs::metadata(&path).unwrap().len();
    assert!(len > 44, "wave file holds no audio");
}
