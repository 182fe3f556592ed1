//! The app controller: a pure state machine over [`ClientState`].
//!
//! [`update`] applies one event and returns the effects the caller must run
//! (render, fetch, persist, feedback). It performs no I/O itself.

use ideaswipe_core::store::Persisted;
use ideaswipe_core::{FavoriteEntry, HistoryEntry, Idea, Stamp, Stats};

use crate::gesture::SwipeOutcome;
use crate::view::View;

pub const GENERATE_FAILED: &str = "Failed to generate a new idea. Please try again.";
pub const REFINE_FAILED: &str = "Failed to refine the idea. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    ShowingCard,
    ShowingDetail,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    /// A committed swipe, or `None` for a snap-back.
    pub fn from_swipe(outcome: SwipeOutcome) -> Option<Self> {
        match outcome {
            SwipeOutcome::Accept => Some(Decision::Accept),
            SwipeOutcome::Reject => Some(Decision::Reject),
            SwipeOutcome::Cancel => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start,
    Decision(Decision),
    Refine,
    Back,
    Retry,
    Loaded(Idea),
    /// A fetch failed; the detail is logged, not shown.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Generate,
    Refine(Idea),
}

/// Cues a presentation may turn into sound or vibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Generated,
    Like,
    Pass,
    Refine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Render(View),
    Fetch(Request),
    Persist,
    Feedback(Feedback),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Generate,
    Refine,
}

#[derive(Debug, Clone)]
pub struct ClientState {
    pub screen: Screen,
    pub current: Option<Idea>,
    pub history: Vec<HistoryEntry>,
    pub favorites: Vec<FavoriteEntry>,
    pub stats: Stats,
    pending: Option<Pending>,
}

impl ClientState {
    pub fn new(persisted: Persisted) -> Self {
        Self {
            screen: Screen::Loading,
            current: None,
            history: Vec::new(),
            favorites: persisted.favorites,
            stats: persisted.stats,
            pending: None,
        }
    }

    /// The part of the state that outlives the session.
    pub fn persisted(&self) -> Persisted {
        Persisted {
            stats: self.stats,
            favorites: self.favorites.clone(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}

/// Apply one event. `stamp` is used only when an entry is recorded.
pub fn update(state: &mut ClientState, event: Event, stamp: Stamp) -> Vec<Effect> {
    match (state.screen, event) {
        (Screen::Loading, Event::Start) if state.pending.is_none() => begin_generate(state),
        (Screen::Error, Event::Retry) => begin_generate(state),

        (Screen::Loading, Event::Loaded(idea)) if state.pending.is_some() => {
            state.pending = None;
            state.history.push(HistoryEntry::new(idea.clone(), stamp));
            state.stats.total_generated += 1;
            let view = View::card(&idea);
            state.current = Some(idea);
            state.screen = Screen::ShowingCard;
            vec![
                Effect::Persist,
                Effect::Render(view),
                Effect::Feedback(Feedback::Generated),
            ]
        }
        (Screen::Loading, Event::Failed(_)) if state.pending.is_some() => {
            let message = match state.pending.take() {
                Some(Pending::Refine) => REFINE_FAILED,
                _ => GENERATE_FAILED,
            };
            state.screen = Screen::Error;
            vec![Effect::Render(View::Error {
                message: message.to_string(),
            })]
        }

        (Screen::ShowingCard, Event::Decision(Decision::Reject)) => {
            state.stats.total_passed += 1;
            let mut effects = vec![Effect::Feedback(Feedback::Pass), Effect::Persist];
            effects.extend(begin_generate(state));
            effects
        }
        (Screen::ShowingCard, Event::Decision(Decision::Accept)) => {
            let Some(idea) = state.current.as_ref() else {
                return vec![];
            };
            let view = View::detail(idea);
            state.favorites.push(FavoriteEntry::new(idea.clone(), stamp));
            state.stats.total_liked += 1;
            state.screen = Screen::ShowingDetail;
            vec![
                Effect::Feedback(Feedback::Like),
                Effect::Persist,
                Effect::Render(view),
            ]
        }
        (Screen::ShowingCard | Screen::ShowingDetail, Event::Refine) => {
            let Some(idea) = state.current.clone() else {
                return vec![];
            };
            state.stats.total_refined += 1;
            state.pending = Some(Pending::Refine);
            state.screen = Screen::Loading;
            vec![
                Effect::Feedback(Feedback::Refine),
                Effect::Persist,
                Effect::Render(View::Loading),
                Effect::Fetch(Request::Refine(idea)),
            ]
        }
        (Screen::ShowingDetail, Event::Back) => match state.current.as_ref() {
            Some(idea) => {
                state.screen = Screen::ShowingCard;
                vec![Effect::Render(View::card(idea))]
            }
            None => vec![],
        },

        _ => vec![],
    }
}

fn begin_generate(state: &mut ClientState) -> Vec<Effect> {
    state.pending = Some(Pending::Generate);
    state.screen = Screen::Loading;
    vec![
        Effect::Render(View::Loading),
        Effect::Fetch(Request::Generate),
    ]
}
