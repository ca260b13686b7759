mod common;

use std::path::PathBuf;

use autoreader::document::TextDocument;
use autoreader::highlight::{Color, Emphasis};
use autoreader::playback::{Notification, SynthesizerState};
use autoreader::reader::{ButtonLabel, Information};
use autoreader::scroll::Viewport;
use autoreader::speech::{Rate, SpeechOutput, Volume};
use autoreader::tracker::{Anchor, PausePolicy};
use autoreader::{Error, Reader, ReaderConfig, WordRange};

use common::FakeSpeaker;

const FOX: &str = "The quick brown fox";
const YELLOW: Emphasis = Emphasis::Background(Color::YELLOW);

fn reader_with(config: ReaderConfig) -> Reader<FakeSpeaker> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Reader::new(&config, FakeSpeaker::connect).unwrap()
}

fn reader() -> Reader<FakeSpeaker> {
    reader_with(ReaderConfig::default())
}

#[test]
fn test_initial_status() {
    let reader = reader();
    assert_eq!(Information::Ready, reader.status().information);
    assert_eq!(ButtonLabel::Start, reader.status().button);
    assert_eq!("Ready.", reader.status().information.text());
    assert_eq!("Start", reader.status().button.text());
    assert_eq!(None, reader.highlight());
    assert!(!reader.should_exit());
}

#[test]
fn test_engine_configured_from_config() {
    let reader = reader_with(ReaderConfig {
        rate: 30,
        volume: 20,
        ..ReaderConfig::default()
    });
    assert_eq!(Some(Rate::new(10)), reader.speaker().rate);
    assert_eq!(Some(Volume::new(20)), reader.speaker().volume);
    assert_eq!(None, reader.speaker().lexicon);
}

#[test]
fn test_lexicon_loaded_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lexicon.pls");
    std::fs::write(
        &path,
        "<lexicon><lexeme><grapheme>SAPI</grapheme><alias>sappy</alias></lexeme></lexicon>",
    )
    .unwrap();
    let reader = reader_with(ReaderConfig {
        lexicon: Some(path),
        ..ReaderConfig::default()
    });
    assert_eq!(1, reader.speaker().lexicon.as_ref().unwrap().len());

    let missing = ReaderConfig {
        lexicon: Some(dir.path().join("missing.pls")),
        ..ReaderConfig::default()
    };
    assert!(matches!(Reader::new(&missing, FakeSpeaker::connect), Err(Error::Io(_))));
}

#[test]
fn test_paste_reads_and_highlights() {
    let mut reader = reader();
    assert!(reader.paste(FOX).unwrap());
    assert_eq!(vec![FOX.to_string()], reader.speaker().spoken);
    assert_eq!(vec![SpeechOutput::Default], reader.speaker().outputs);

    reader.speaker().start();
    reader.speaker().offset(4);
    assert_eq!(2, reader.pump().unwrap());
    assert_eq!(1, reader.speaker().polls);

    assert_eq!(Information::Speaking, reader.status().information);
    assert_eq!(ButtonLabel::Stop, reader.status().button);
    assert_eq!(Some(WordRange::new(4, 9)), reader.highlight());
    assert_eq!(vec![(WordRange::new(4, 9), YELLOW)], reader.document().emphasized_ranges());

    reader.speaker().offset(10);
    reader.pump().unwrap();
    assert_eq!(vec![(WordRange::new(10, 15), YELLOW)], reader.document().emphasized_ranges());

    reader.speaker_mut().finish();
    reader.pump().unwrap();
    assert_eq!(None, reader.highlight());
    assert!(reader.document().emphasized_ranges().is_empty());
    assert_eq!(Information::Done, reader.status().information);
    assert_eq!("Done. Ready.", reader.status().information.text());
    assert_eq!(ButtonLabel::Start, reader.status().button);
    assert!(!reader.should_exit());
}

#[test]
fn test_word_anchors_follow_reading_order() {
    let mut reader = reader();
    reader.paste("the cat saw the dog").unwrap();
    reader.speaker().start();
    for word in ["the", "cat", "saw", "the"] {
        reader.speaker().word(word);
    }
    reader.pump().unwrap();
    assert_eq!(Some(WordRange::new(12, 15)), reader.highlight());

    reader.speaker().word("cat");
    reader.pump().unwrap();
    assert_eq!(Some(WordRange::new(12, 15)), reader.highlight());
}

#[test]
fn test_stale_offsets_are_ignored() {
    let mut reader = reader();
    reader.paste("A much longer text than the one that replaces it").unwrap();
    reader.speaker().start();
    reader.speaker().offset(2);
    reader.pump().unwrap();
    assert_eq!(Some(WordRange::new(2, 6)), reader.highlight());

    reader.set_text("Short");
    assert_eq!(None, reader.highlight());
    reader.speaker().offset(30);
    reader.pump().unwrap();
    assert_eq!(None, reader.highlight());
    assert!(reader.document().emphasized_ranges().is_empty());
}

#[test]
fn test_progress_of_replaced_text_is_ignored() {
    let mut reader = reader();
    reader.paste("Old words being spoken right now").unwrap();
    reader.speaker().start();
    reader.speaker().offset(4);
    reader.pump().unwrap();
    assert_eq!(Some(WordRange::new(4, 9)), reader.highlight());

    // The engine is still busy, so this paste only replaces the text.
    assert!(reader.paste("New text").unwrap());
    assert_eq!(1, reader.speaker().spoken.len());
    reader.speaker().offset(4);
    reader.pump().unwrap();
    assert_eq!(None, reader.highlight());
    assert!(reader.document().emphasized_ranges().is_empty());

    reader.speaker_mut().finish();
    reader.pump().unwrap();
    reader.play().unwrap();
    assert_eq!("New text", reader.speaker().spoken[1]);
    reader.speaker().start();
    reader.speaker().offset(4);
    reader.pump().unwrap();
    assert_eq!(Some(WordRange::new(4, 8)), reader.highlight());
}

#[test]
fn test_toggle_stops_then_starts() {
    let mut reader = reader();
    reader.set_text(FOX);
    reader.toggle().unwrap();
    assert_eq!(1, reader.speaker().spoken.len());

    reader.speaker().start();
    reader.speaker().offset(0);
    reader.pump().unwrap();

    reader.toggle().unwrap();
    assert_eq!(1, reader.speaker().cancels);
    // The highlight stays until the engine says it has stopped.
    assert_eq!(Some(WordRange::new(0, 3)), reader.highlight());

    reader.speaker_mut().finish();
    reader.pump().unwrap();
    assert_eq!(None, reader.highlight());
    assert_eq!(ButtonLabel::Start, reader.status().button);

    reader.toggle().unwrap();
    assert_eq!(2, reader.speaker().spoken.len());
}

#[test]
fn test_play_while_busy_is_ignored() {
    let mut reader = reader();
    reader.paste(FOX).unwrap();
    reader.play().unwrap();
    assert_eq!(1, reader.speaker().spoken.len());
    assert_eq!(1, reader.speaker().outputs.len());
}

#[test]
fn test_paste_without_auto_play() {
    let mut reader = reader_with(ReaderConfig {
        auto_play: false,
        ..ReaderConfig::default()
    });
    assert!(!reader.paste(FOX).unwrap());
    assert!(reader.speaker().spoken.is_empty());
    assert_eq!("", reader.document().plain_text());
}

#[test]
fn test_auto_save_without_file() {
    let mut reader = reader_with(ReaderConfig {
        auto_save: true,
        ..ReaderConfig::default()
    });
    reader.paste(FOX).unwrap();
    assert!(reader.speaker().spoken.is_empty());
    assert_eq!(Information::NoFileSelected, reader.status().information);

    let mut reader = reader_with(ReaderConfig {
        auto_save: true,
        ..ReaderConfig::default()
    })
    .with_save_prompt(|| Some(PathBuf::new()));
    reader.paste(FOX).unwrap();
    assert!(reader.speaker().spoken.is_empty());
    assert_eq!("No file selected.", reader.status().information.text());
}

#[test]
fn test_auto_save_to_chosen_file() {
    let mut reader = reader_with(ReaderConfig {
        auto_save: true,
        ..ReaderConfig::default()
    })
    .with_save_prompt(|| Some(PathBuf::from("speech.wav")));
    reader.paste(FOX).unwrap();

    assert_eq!(
        vec![SpeechOutput::Default, SpeechOutput::wave_file("speech.wav")],
        reader.speaker().outputs
    );
    assert_eq!(vec![FOX.to_string()], reader.speaker().spoken);
    assert_eq!(Information::FileSaveComplete, reader.status().information);
}

#[test]
fn test_exit_on_ready() {
    let mut reader = reader_with(ReaderConfig {
        exit_on_ready: true,
        ..ReaderConfig::default()
    });
    reader.paste(FOX).unwrap();
    reader.speaker().start();
    reader.pump().unwrap();
    assert!(!reader.should_exit());

    reader.speaker_mut().finish();
    reader.pump().unwrap();
    assert!(reader.should_exit());
}

#[test]
fn test_clear_and_paste_while_busy() {
    let mut reader = reader();
    reader.paste("first text").unwrap();
    reader.speaker().start();
    reader.speaker().offset(6);
    reader.pump().unwrap();

    reader.clear_and_paste("second text").unwrap();
    assert_eq!(1, reader.speaker().cancels);
    assert_eq!(1, reader.speaker().spoken.len());
    assert_eq!("second text", reader.document().plain_text());
    assert_eq!(None, reader.highlight());

    reader.speaker_mut().finish();
    reader.pump().unwrap();
    assert_eq!(
        vec!["first text".to_string(), "second text".to_string()],
        reader.speaker().spoken
    );
    assert_eq!(SynthesizerState::Speaking, reader.speaker().state);
}

#[test]
fn test_clear_and_paste_while_ready() {
    let mut reader = reader();
    reader.clear_and_paste(FOX).unwrap();
    assert_eq!(0, reader.speaker().cancels);
    assert_eq!(vec![FOX.to_string()], reader.speaker().spoken);
}

#[test]
fn test_highlight_persists_through_pause() {
    let mut reader = reader();
    reader.paste(FOX).unwrap();
    reader.speaker().start();
    reader.speaker().offset(4);
    reader.pump().unwrap();

    reader.pause().unwrap();
    reader.pump().unwrap();
    assert_eq!(Information::Paused, reader.status().information);
    assert_eq!(Some(WordRange::new(4, 9)), reader.highlight());

    reader.resume().unwrap();
    reader.pump().unwrap();
    assert_eq!(Information::Speaking, reader.status().information);
    assert_eq!(Some(WordRange::new(4, 9)), reader.highlight());
}

#[test]
fn test_highlight_cleared_on_pause() {
    let mut reader = reader_with(ReaderConfig {
        pause_policy: PausePolicy::Clear,
        ..ReaderConfig::default()
    });
    reader.paste(FOX).unwrap();
    reader.speaker().start();
    reader.speaker().word("The");
    reader.speaker().word("quick");
    reader.pump().unwrap();

    reader.pause().unwrap();
    reader.pump().unwrap();
    assert_eq!(None, reader.highlight());
    assert!(reader.document().emphasized_ranges().is_empty());

    reader.resume().unwrap();
    reader.speaker().word("brown");
    reader.pump().unwrap();
    assert_eq!(Some(WordRange::new(10, 15)), reader.highlight());
}

#[test]
fn test_viewport_follows_spoken_word() {
    let mut reader = reader_with(ReaderConfig {
        viewport: Viewport::new(32.0, 16.0),
        ..ReaderConfig::default()
    });
    let text = (0..10).map(|line| format!("line{}", line)).collect::<Vec<_>>().join("\n");
    reader.paste(&text).unwrap();
    reader.speaker().start();

    reader.speaker().offset(6);
    reader.pump().unwrap();
    assert_eq!(0.0, reader.viewport().offset);

    // "line5" starts at offset 30, on the sixth line.
    reader.speaker().offset(30);
    reader.pump().unwrap();
    assert_eq!(80.0, reader.viewport().offset);

    reader.viewport_mut().offset = 0.0;
    reader.speaker().offset(0);
    reader.pump().unwrap();
    assert_eq!(0.0, reader.viewport().offset);
}

#[test]
fn test_dispatch_directly() {
    let mut reader = reader();
    reader.set_text(FOX);
    reader.dispatch(Notification::StateChanged(SynthesizerState::Speaking)).unwrap();
    reader.dispatch(Notification::Progress(Anchor::Offset(17))).unwrap();
    assert_eq!(Some(WordRange::new(16, 19)), reader.highlight());
    assert_eq!(0, reader.speaker().polls);
}
