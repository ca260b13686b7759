//! A [`Speaker`] backed by Microsoft's Speech API (SAPI).
//!
//! SAPI queues the events it raises while speaking. [`SapiSpeaker`] subscribes to the start and
//! end of each speech and to word boundaries, and drains that queue whenever
//! [`poll_events`](Speaker::poll_events) is called, so every notification is posted from the
//! thread that owns the speaker.

use std::mem::MaybeUninit;
use std::ptr::null;

use windows as Windows;
use Windows::core::{IUnknown, Interface};
use Windows::Win32::Media::Speech::{
    ISpEventSource, ISpVoice, SpVoice, SPEVENT, SPEI_END_INPUT_STREAM, SPEI_START_INPUT_STREAM,
    SPEI_WORD_BOUNDARY, SPEVENTENUM, SPF_ASYNC, SPF_IS_NOT_XML, SPF_IS_XML, SPF_PARSE_SAPI,
    SPF_PURGEBEFORESPEAK,
};
use Windows::Win32::System::Com::{CoCreateInstance, CoInitialize, CoUninitialize, CLSCTX_ALL};

use crate::audio::WaveFileStream;
use crate::playback::{Notification, NotificationSender, SynthesizerState};
use crate::speech::{Lexicon, Rate, SourceMap, Speaker, Speech, SpeechOutput, Volume};
use crate::tracker::Anchor;
use crate::Result;

mod event;

use self::event::SynthEvent;

/// Initializes SAPI on the current thread. This function must be called for every thread that
/// intends to use SAPI.
pub fn initialize() -> Result<()> {
    Ok(unsafe { CoInitialize(null()) }?)
}

/// Deinitializes SAPI for the current thread. This function must be called for every thread that
/// called `initialize()`, the same number of times.
pub fn finalize() {
    unsafe { CoUninitialize() }
}

// SAPI rejects interest masks that don't have both reserved bits (SPEI_RESERVED1 and
// SPEI_RESERVED2) set.
const SPFEI_FLAGCHECK: u64 = (1 << 30) | (1 << 33);

fn event_mask(ids: &[SPEVENTENUM]) -> u64 {
    ids.iter().fold(SPFEI_FLAGCHECK, |mask, id| mask | (1u64 << id.0))
}

fn next_event(events: &ISpEventSource) -> Result<Option<SPEVENT>> {
    let mut event = MaybeUninit::<SPEVENT>::uninit();
    let mut fetched = 0u32;
    unsafe { events.GetEvents(1, event.as_mut_ptr(), &mut fetched) }?;
    Ok((fetched > 0).then(|| unsafe { event.assume_init() }))
}

struct ActiveSpeech {
    stream: u32,
    map: SourceMap,
    purge: bool,
}

/// A speech synthesizer that renders to the default audio device or a wave file, and reports the
/// offset of every word it speaks.
pub struct SapiSpeaker {
    voice: ISpVoice,
    events: ISpEventSource,
    notifier: NotificationSender,
    lexicon: Lexicon,
    active: Option<ActiveSpeech>,
    wave_file: Option<WaveFileStream>,
    state: SynthesizerState,
}

impl SapiSpeaker {
    /// Creates a new synthesizer, configured to output its speech to the default audio device and
    /// post its notifications to the given sender.
    pub fn new(notifier: NotificationSender) -> Result<Self> {
        let voice: ISpVoice = unsafe { CoCreateInstance(&SpVoice, None, CLSCTX_ALL) }?;
        let events: ISpEventSource = voice.cast()?;
        let interest =
            event_mask(&[SPEI_START_INPUT_STREAM, SPEI_END_INPUT_STREAM, SPEI_WORD_BOUNDARY]);
        unsafe { events.SetInterest(interest, interest) }?;
        Ok(Self {
            voice,
            events,
            notifier,
            lexicon: Lexicon::new(),
            active: None,
            wave_file: None,
            state: SynthesizerState::Ready,
        })
    }

    fn post(&self, notification: Notification) {
        // A dropped receiver means nobody is listening any more.
        let _ = self.notifier.send(notification);
    }

    fn is_active(&self, stream: u32) -> bool {
        self.active.as_ref().map_or(false, |active| active.stream == stream)
    }

    fn handle(&mut self, event: SynthEvent) -> Result<()> {
        match event {
            SynthEvent::StreamStarted(stream) if self.is_active(stream) => {
                if !self.active.as_ref().map_or(false, |active| active.purge) {
                    self.post(Notification::StateChanged(SynthesizerState::Speaking));
                }
            }
            SynthEvent::WordBoundary {
                stream,
                position,
                length,
            } if self.is_active(stream) => {
                let offset = self.active.as_ref().and_then(|active| active.map.to_source(position));
                tracing::trace!(position, length, ?offset, "word boundary");
                if let Some(offset) = offset {
                    self.post(Notification::Progress(Anchor::Offset(offset)));
                }
            }
            SynthEvent::StreamFinished(stream) if self.is_active(stream) => {
                self.active = None;
                self.release_wave_file()?;
                self.state = SynthesizerState::Ready;
                self.post(Notification::StateChanged(SynthesizerState::Ready));
            }
            _ => {}
        }
        Ok(())
    }

    fn release_wave_file(&mut self) -> Result<()> {
        if let Some(wave_file) = self.wave_file.take() {
            unsafe { self.voice.SetOutput(None::<IUnknown>, true) }?;
            wave_file.close()?;
        }
        Ok(())
    }
}

impl Speaker for SapiSpeaker {
    fn speak(&mut self, text: &str) -> Result<()> {
        let rendered = self.lexicon.render(text);
        let flags = match rendered.speech {
            Speech::Text(_) => SPF_IS_NOT_XML.0,
            Speech::Xml(_) => SPF_IS_XML.0 | SPF_PARSE_SAPI.0,
        };
        let stream = unsafe {
            self.voice.Speak(rendered.speech.contents(), (flags | SPF_ASYNC.0) as _)
        }?;
        self.active = Some(ActiveSpeech {
            stream,
            map: rendered.map,
            purge: false,
        });
        self.state = SynthesizerState::Speaking;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if self.state == SynthesizerState::Speaking {
            unsafe { self.voice.Pause() }?;
            self.state = SynthesizerState::Paused;
            self.post(Notification::StateChanged(SynthesizerState::Paused));
        }
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        if self.state == SynthesizerState::Paused {
            unsafe { self.voice.Resume() }?;
            self.state = SynthesizerState::Speaking;
            self.post(Notification::StateChanged(SynthesizerState::Speaking));
        }
        Ok(())
    }

    fn cancel_all(&mut self) -> Result<()> {
        if self.active.is_none() {
            return Ok(());
        }
        // The purge is itself an (empty) speech; its end is what reports the voice as ready.
        let stream =
            unsafe { self.voice.Speak("", (SPF_PURGEBEFORESPEAK.0 | SPF_ASYNC.0) as _) }?;
        self.active = Some(ActiveSpeech {
            stream,
            map: SourceMap::default(),
            purge: true,
        });
        if self.state == SynthesizerState::Paused {
            unsafe { self.voice.Resume() }?;
        }
        Ok(())
    }

    fn set_output(&mut self, output: SpeechOutput) -> Result<()> {
        self.release_wave_file()?;
        if let SpeechOutput::WaveFile {
            path,
            format,
        } = output
        {
            let wave_file = WaveFileStream::create(path, &format)?;
            unsafe { self.voice.SetOutput(Some(wave_file.to_sapi()?), true) }?;
            self.wave_file = Some(wave_file);
        }
        Ok(())
    }

    fn set_rate(&mut self, rate: Rate) -> Result<()> {
        Ok(unsafe { self.voice.SetRate(rate.value()) }?)
    }

    fn set_volume(&mut self, volume: Volume) -> Result<()> {
        Ok(unsafe { self.voice.SetVolume(volume.sapi_value()) }?)
    }

    fn set_lexicon(&mut self, lexicon: Lexicon) -> Result<()> {
        self.lexicon = lexicon;
        Ok(())
    }

    fn state(&self) -> SynthesizerState {
        self.state
    }

    fn poll_events(&mut self) -> Result<()> {
        while let Some(sapi_event) = next_event(&self.events)? {
            self.handle(SynthEvent::from_sapi(sapi_event)?)?;
        }
        Ok(())
    }
}
