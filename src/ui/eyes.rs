//! The "eyes closed" signal
//!
//! Holding Ctrl means the eyes are closed, releasing it opens them. The
//! listener sees events even when the search input has captured them, and
//! Ctrl alone never types into the query. Ctrl used as a shortcut modifier
//! (Ctrl+A, Ctrl+V, ...) takes its close back instead of opening the eyes.

use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::{event, window, Event, Subscription};

use crate::Message;

/// Keyboard activity relevant to the eyes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyesKey {
    Pressed,
    Released,
    /// Another key went down while Ctrl was held
    Chord,
}

/// What the app should do with the eyes flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyesSignal {
    Close,
    Open,
    /// The close was a shortcut after all; reopen without advancing
    Cancel,
}

/// Tells holding Ctrl apart from using it in a shortcut
#[derive(Debug, Default)]
pub struct EyesTracker {
    held: bool,
    chorded: bool,
}

impl EyesTracker {
    pub fn on_key(&mut self, key: EyesKey) -> Option<EyesSignal> {
        match key {
            // Key repeat sends more presses while held
            EyesKey::Pressed if self.held => None,
            EyesKey::Pressed => {
                self.held = true;
                self.chorded = false;
                Some(EyesSignal::Close)
            }
            EyesKey::Chord if self.held && !self.chorded => {
                self.chorded = true;
                Some(EyesSignal::Cancel)
            }
            EyesKey::Chord => None,
            EyesKey::Released if !self.held => None,
            EyesKey::Released => {
                self.held = false;
                if self.chorded {
                    None
                } else {
                    Some(EyesSignal::Open)
                }
            }
        }
    }
}

pub fn subscription() -> Subscription<Message> {
    event::listen_with(on_event)
}

fn on_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    let Event::Keyboard(event) = event else {
        return None;
    };

    let key = match event {
        keyboard::Event::KeyPressed { key, .. } if is_eyes_key(&key) => EyesKey::Pressed,
        keyboard::Event::KeyReleased { key, .. } if is_eyes_key(&key) => EyesKey::Released,
        keyboard::Event::KeyPressed { modifiers, .. } if is_chord(modifiers) => EyesKey::Chord,
        _ => return None,
    };
    Some(Message::EyesKey(key))
}

fn is_eyes_key(key: &Key) -> bool {
    matches!(key, Key::Named(Named::Control))
}

fn is_chord(modifiers: Modifiers) -> bool {
    modifiers.control()
}
