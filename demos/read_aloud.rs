//! This example reads a text out loud, printing every word as it is spoken. The text is taken from
//! the file named on the command line, or from the standard input if no file is given. A
//! `reader.toml` in the working directory, if present, configures the reader.

#[cfg(windows)]
fn main() {
    use std::io::Read;
    use std::thread::sleep;
    use std::time::Duration;

    use autoreader::document::TextDocument;
    use autoreader::sapi::{self, SapiSpeaker};
    use autoreader::{Reader, ReaderConfig};

    tracing_subscriber::fmt::init();

    // Read the text to speak.
    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path).unwrap(),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).unwrap();
            text
        }
    };

    // Load the configuration, and make sure we stop once the text has been read.
    let mut config = match std::path::Path::new("reader.toml").exists() {
        true => ReaderConfig::load("reader.toml").unwrap(),
        false => ReaderConfig::default(),
    };
    config.auto_play = true;
    config.exit_on_ready = true;

    // Initialize SAPI and connect the reader to a synthesizer.
    sapi::initialize().unwrap();
    let mut reader = Reader::new(&config, SapiSpeaker::new).unwrap();

    // Pasting starts the reading right away.
    reader.paste(&text).unwrap();

    // Pump the notifications until the synthesizer is done, printing every new highlight.
    let mut last = None;
    while !reader.should_exit() {
        reader.pump().unwrap();
        let current = reader.highlight();
        if current != last {
            if let Some(range) = current {
                println!("{}", reader.document().flat_view().slice(range));
            }
            last = current;
        }
        sleep(Duration::from_millis(10));
    }
    println!("{}", reader.status().information.text());

    // Release the synthesizer before cleaning up SAPI.
    drop(reader);
    sapi::finalize();
}

#[cfg(not(windows))]
fn main() {
    eprintln!("This example needs the Windows Speech API.");
}
