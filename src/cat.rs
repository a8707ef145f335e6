//! Cat widget: petting, eye tracking and idle chatter.
//!
//! [`CatController::handle`] is a pure transition: it takes one [`CatEvent`],
//! updates mood / pet count / pending timers, and returns the [`CatEffect`]s
//! the DOM layer must carry out. Timers come back in as
//! [`CatEvent::TimerElapsed`] carrying the [`TaskId`] they were armed with.

use crate::config::CatConfig;
use crate::geometry::Point;
use crate::task::{TaskId, TaskSlot};
use crate::theme::ThemePreference;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CatMood {
    #[default]
    Normal,
    Happy,
}

/// Which line the cat says after being petted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeechKind {
    Happy,
    Secondary,
    Default,
}

/// Every 5th pet is happy, otherwise every 3rd is secondary. 15 is happy.
pub fn select_message(pet_count: u64) -> SpeechKind {
    if pet_count % 5 == 0 {
        SpeechKind::Happy
    } else if pet_count % 3 == 0 {
        SpeechKind::Secondary
    } else {
        SpeechKind::Default
    }
}

/// Pupil translation for a pointer at `pointer` and a widget centred on `center`.
pub fn pupil_offset(center: Point, pointer: Point, max_offset: f64, distance_scale: f64) -> Point {
    let delta = pointer - center;
    let angle = delta.angle();
    let distance = (delta.length() / distance_scale).min(max_offset);
    Point::new(angle.cos() * distance, angle.sin() * distance)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatTimer {
    /// Speech bubble falls back to the prompt.
    Speech,
    /// Excited animation ends, mood back to normal.
    Happy,
    /// Pupils recentre after the pointer goes still.
    Pupils,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatEvent {
    /// The widget was clicked; `theme` is the mode after the click's toggle.
    Clicked { theme: ThemePreference },
    PointerMoved { center: Point, pointer: Point },
    /// Periodic idle tick. `roll` in [0, 1), `pick` selects the phrase.
    IdleTick { roll: f64, pick: usize },
    TimerElapsed { timer: CatTimer, task: TaskId },
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatEffect {
    SetSpeech(String),
    SetSpeaking(bool),
    SetExcited(bool),
    SetPupilOffset(Point),
    ClearPupils,
    Schedule { timer: CatTimer, task: TaskId, delay_ms: u32 },
}

pub struct CatController {
    config: CatConfig,
    mood: CatMood,
    pet_count: u64,
    speech: TaskSlot,
    happy: TaskSlot,
    pupils: TaskSlot,
}

impl CatController {
    pub fn new(config: CatConfig) -> Self {
        Self {
            config,
            mood: CatMood::Normal,
            pet_count: 0,
            speech: TaskSlot::new(),
            happy: TaskSlot::new(),
            pupils: TaskSlot::new(),
        }
    }

    pub fn mood(&self) -> CatMood {
        self.mood
    }

    pub fn pet_count(&self) -> u64 {
        self.pet_count
    }

    pub fn config(&self) -> &CatConfig {
        &self.config
    }

    pub fn handle(&mut self, event: CatEvent) -> Vec<CatEffect> {
        match event {
            CatEvent::Clicked { theme } => self.on_click(theme),
            CatEvent::PointerMoved { center, pointer } => self.on_pointer_moved(center, pointer),
            CatEvent::IdleTick { roll, pick } => self.on_idle_tick(roll, pick),
            CatEvent::TimerElapsed { timer, task } => self.on_timer(timer, task),
        }
    }

    fn on_click(&mut self, theme: ThemePreference) -> Vec<CatEffect> {
        self.pet_count = self.pet_count.saturating_add(1);
        let kind = select_message(self.pet_count);
        if kind == SpeechKind::Happy {
            self.mood = CatMood::Happy;
        }
        let mut effects = vec![
            CatEffect::SetSpeech(self.message(kind, theme).to_string()),
            CatEffect::SetSpeaking(true),
        ];
        // Any pet while happy keeps the cat excited for another full period.
        if self.mood == CatMood::Happy {
            effects.push(CatEffect::SetExcited(true));
            effects.push(CatEffect::Schedule {
                timer: CatTimer::Happy,
                task: self.happy.arm(),
                delay_ms: self.config.happy_ms,
            });
        }
        effects.push(CatEffect::Schedule {
            timer: CatTimer::Speech,
            task: self.speech.arm(),
            delay_ms: self.config.click_speech_ms,
        });
        effects
    }

    fn on_pointer_moved(&mut self, center: Point, pointer: Point) -> Vec<CatEffect> {
        let offset = pupil_offset(
            center,
            pointer,
            self.config.pupil_max_offset,
            self.config.pupil_distance_scale,
        );
        vec![
            CatEffect::SetPupilOffset(offset),
            CatEffect::Schedule {
                timer: CatTimer::Pupils,
                task: self.pupils.arm(),
                delay_ms: self.config.pupil_reset_ms,
            },
        ]
    }

    fn on_idle_tick(&mut self, roll: f64, pick: usize) -> Vec<CatEffect> {
        let phrases = &self.config.idle_phrases;
        if roll >= self.config.idle_chance || phrases.is_empty() {
            return Vec::new();
        }
        let phrase = phrases[pick % phrases.len()].clone();
        vec![
            CatEffect::SetSpeech(phrase),
            CatEffect::SetSpeaking(true),
            CatEffect::Schedule {
                timer: CatTimer::Speech,
                task: self.speech.arm(),
                delay_ms: self.config.idle_speech_ms,
            },
        ]
    }

    fn on_timer(&mut self, timer: CatTimer, task: TaskId) -> Vec<CatEffect> {
        match timer {
            CatTimer::Speech if self.speech.fire(task) => vec![
                CatEffect::SetSpeaking(false),
                CatEffect::SetSpeech(self.config.prompt.clone()),
            ],
            CatTimer::Happy if self.happy.fire(task) => {
                self.mood = CatMood::Normal;
                vec![CatEffect::SetExcited(false)]
            }
            CatTimer::Pupils if self.pupils.fire(task) => vec![CatEffect::ClearPupils],
            _ => Vec::new(),
        }
    }

    fn message(&self, kind: SpeechKind, theme: ThemePreference) -> &str {
        let cfg = &self.config;
        match (kind, theme) {
            (SpeechKind::Happy, _) => &cfg.happy_message,
            (SpeechKind::Secondary, ThemePreference::Light) => &cfg.light_secondary,
            (SpeechKind::Secondary, ThemePreference::Dark) => &cfg.dark_secondary,
            (SpeechKind::Default, ThemePreference::Light) => &cfg.light_default,
            (SpeechKind::Default, ThemePreference::Dark) => &cfg.dark_default,
        }
    }
}
