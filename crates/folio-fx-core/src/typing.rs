#![forbid(unsafe_code)]

//! Typing/deleting text cycler.
//!
//! Cycles indefinitely through an ordered list of strings, revealing one
//! grapheme cluster at a time, pausing, deleting one at a time, pausing, and
//! moving on to the next string.
//!
//! ```text
//!            speed                 pauseTime              deleteSpeed
//!  Typing ──(full)──▶ PauseBeforeDelete ──▶ Deleting ──(empty, idx+1)──▶ PauseBeforeType
//!    ▲                                                                        │
//!    └──────────────────────────────── pauseTime ─────────────────────────────┘
//! ```
//!
//! Each arrow is one [`TimedEffect::fire`] taken after the delay of the
//! phase it leaves.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use crate::config::TypingConfig;
use crate::error::FxError;
use crate::schedule::TimedEffect;

/// Lines shown in the page subtitle when the host does not supply its own.
pub const DEFAULT_SUBTITLES: [&str; 4] = [
    "Developer | Creator | Executive",
    "Bot Developer | Programmer",
    "Server Administrator",
    "TAOG Executive",
];

/// Class added to the element being typed into.
pub const TYPING_CLASS: &str = "typing-text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    /// Revealing characters left to right.
    Typing,
    /// Full text shown; waiting before deletion starts.
    PauseBeforeDelete,
    /// Removing characters right to left.
    Deleting,
    /// Text empty; waiting before the next string starts.
    PauseBeforeType,
}

/// Typing state machine.
#[derive(Debug, Clone)]
pub struct TypingEffect {
    /// Each text pre-split into grapheme clusters.
    texts: Vec<Vec<String>>,
    timing: TypingConfig,
    text_index: usize,
    char_offset: usize,
    phase: TypingPhase,
}

impl TypingEffect {
    /// Create an effect positioned before the first character of `texts[0]`.
    pub fn new<I, S>(texts: I, timing: TypingConfig) -> Result<Self, FxError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let texts: Vec<Vec<String>> = texts
            .into_iter()
            .map(|t| t.as_ref().graphemes(true).map(str::to_owned).collect())
            .collect();
        if texts.is_empty() {
            return Err(FxError::EmptyTextList);
        }
        Ok(Self {
            texts,
            timing,
            text_index: 0,
            char_offset: 0,
            phase: TypingPhase::Typing,
        })
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    /// Number of grapheme clusters currently shown.
    pub fn char_offset(&self) -> usize {
        self.char_offset
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    /// The text currently displayed.
    pub fn visible_text(&self) -> String {
        self.texts[self.text_index][..self.char_offset].concat()
    }

    fn current_len(&self) -> usize {
        self.texts[self.text_index].len()
    }
}

impl TimedEffect for TypingEffect {
    /// The new visible text, or `None` when the transition only changes phase.
    type Output = Option<String>;

    fn pending_delay(&self) -> Option<Duration> {
        Some(match self.phase {
            TypingPhase::Typing => self.timing.type_delay(),
            TypingPhase::Deleting => self.timing.delete_delay(),
            TypingPhase::PauseBeforeDelete | TypingPhase::PauseBeforeType => self.timing.pause(),
        })
    }

    fn fire(&mut self) -> Option<String> {
        match self.phase {
            TypingPhase::Typing => {
                let len = self.current_len();
                let changed = self.char_offset < len;
                if changed {
                    self.char_offset += 1;
                }
                if self.char_offset >= len {
                    self.phase = TypingPhase::PauseBeforeDelete;
                }
                changed.then(|| self.visible_text())
            }
            TypingPhase::PauseBeforeDelete => {
                self.phase = TypingPhase::Deleting;
                None
            }
            TypingPhase::Deleting => {
                let changed = self.char_offset > 0;
                if changed {
                    self.char_offset -= 1;
                }
                let text = changed.then(|| self.visible_text());
                if self.char_offset == 0 {
                    self.text_index = (self.text_index + 1) % self.texts.len();
                    self.phase = TypingPhase::PauseBeforeType;
                    tracing::trace!(next = self.text_index, "typing advanced to next text");
                }
                text
            }
            TypingPhase::PauseBeforeType => {
                self.phase = TypingPhase::Typing;
                None
            }
        }
    }
}
