#![allow(dead_code)]

use autoreader::playback::{Notification, NotificationSender, SynthesizerState};
use autoreader::speech::{Lexicon, Rate, Speaker, SpeechOutput, Volume};
use autoreader::tracker::Anchor;
use autoreader::Result;

/// A speech engine that records what it is asked to do. Tests post the engine's notifications
/// through it explicitly.
pub struct FakeSpeaker {
    pub notifier: NotificationSender,
    pub state: SynthesizerState,
    pub spoken: Vec<String>,
    pub outputs: Vec<SpeechOutput>,
    pub cancels: usize,
    pub polls: usize,
    pub rate: Option<Rate>,
    pub volume: Option<Volume>,
    pub lexicon: Option<Lexicon>,
}

impl FakeSpeaker {
    pub fn connect(notifier: NotificationSender) -> Result<Self> {
        Ok(Self {
            notifier,
            state: SynthesizerState::Ready,
            spoken: Vec::new(),
            outputs: Vec::new(),
            cancels: 0,
            polls: 0,
            rate: None,
            volume: None,
            lexicon: None,
        })
    }

    pub fn post(&self, notification: Notification) {
        self.notifier.send(notification).unwrap();
    }

    pub fn start(&self) {
        self.post(Notification::StateChanged(SynthesizerState::Speaking));
    }

    pub fn offset(&self, offset: usize) {
        self.post(Notification::Progress(Anchor::Offset(offset)));
    }

    pub fn word(&self, word: &str) {
        self.post(Notification::Progress(Anchor::Word(word.to_string())));
    }

    pub fn finish(&mut self) {
        self.state = SynthesizerState::Ready;
        self.post(Notification::StateChanged(SynthesizerState::Ready));
    }
}

impl Speaker for FakeSpeaker {
    fn speak(&mut self, text: &str) -> Result<()> {
        self.spoken.push(text.to_string());
        self.state = SynthesizerState::Speaking;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if self.state == SynthesizerState::Speaking {
            self.state = SynthesizerState::Paused;
            self.post(Notification::StateChanged(SynthesizerState::Paused));
        }
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        if self.state == SynthesizerState::Paused {
            self.state = SynthesizerState::Speaking;
            self.post(Notification::StateChanged(SynthesizerState::Speaking));
        }
        Ok(())
    }

    fn cancel_all(&mut self) -> Result<()> {
        self.cancels += 1;
        Ok(())
    }

    fn set_output(&mut self, output: SpeechOutput) -> Result<()> {
        self.outputs.push(output);
        Ok(())
    }

    fn set_rate(&mut self, rate: Rate) -> Result<()> {
        self.rate = Some(rate);
        Ok(())
    }

    fn set_volume(&mut self, volume: Volume) -> Result<()> {
        self.volume = Some(volume);
        Ok(())
    }

    fn set_lexicon(&mut self, lexicon: Lexicon) -> Result<()> {
        self.lexicon = Some(lexicon);
        Ok(())
    }

    fn state(&self) -> SynthesizerState {
        self.state
    }

    fn poll_events(&mut self) -> Result<()> {
        self.polls += 1;
        Ok(())
    }
}
