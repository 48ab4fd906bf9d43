//! Audio boundary: fire-and-forget speech with an on/off switch

use serde::{Deserialize, Serialize};

use crate::config::AudioConfig;

/// One line of speech with the voice settings it should be read with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

/// Speech backend
pub trait Speaker {
    fn speak(&mut self, utterance: &Utterance);
    /// Stop whatever is being said right now
    fn cancel(&mut self);
}

impl<V: Speaker + ?Sized> Speaker for Box<V> {
    fn speak(&mut self, utterance: &Utterance) {
        (**self).speak(utterance)
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}

/// Backend for platforms without speech support
#[derive(Debug, Default)]
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&mut self, _utterance: &Utterance) {}
    fn cancel(&mut self) {}
}

/// Prints utterances to stdout
#[derive(Debug, Default)]
pub struct ConsoleSpeaker;

impl Speaker for ConsoleSpeaker {
    fn speak(&mut self, utterance: &Utterance) {
        println!("🔊 {}", utterance.text);
    }

    fn cancel(&mut self) {}
}

/// Keeps everything it was asked to say
#[derive(Debug, Default)]
pub struct RecordingSpeaker {
    pub spoken: Vec<Utterance>,
    pub cancels: usize,
}

impl RecordingSpeaker {
    pub fn last_text(&self) -> Option<&str> {
        self.spoken.last().map(|u| u.text.as_str())
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&mut self, utterance: &Utterance) {
        self.spoken.push(utterance.clone());
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

/// Wraps a backend with the audio switch and voice settings
pub struct Narrator<V: Speaker> {
    speaker: V,
    voice: AudioConfig,
}

impl<V: Speaker> Narrator<V> {
    pub fn new(speaker: V, voice: AudioConfig) -> Self {
        Self { speaker, voice }
    }

    /// Speak `text`, interrupting any utterance in flight. No-op when muted.
    pub fn speak(&mut self, text: &str) {
        if !self.voice.enabled {
            return;
        }

        self.speaker.cancel();
        let utterance = Utterance {
            text: text.to_string(),
            lang: self.voice.lang.clone(),
            rate: self.voice.rate,
            pitch: self.voice.pitch,
        };
        tracing::debug!(text = %utterance.text, "Speaking");
        self.speaker.speak(&utterance);
    }

    /// Flip the audio switch. Muting silences the current utterance.
    pub fn toggle(&mut self) -> bool {
        self.voice.enabled = !self.voice.enabled;
        if !self.voice.enabled {
            self.speaker.cancel();
        }
        self.voice.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.voice.enabled
    }

    pub fn speaker(&self) -> &V {
        &self.speaker
    }
}
