use std::collections::VecDeque;

use ideaswipe_core::store::ClientStore;
use ideaswipe_core::Stamp;
use tracing::{debug, error, warn};

use crate::app::{update, ClientState, Decision, Effect, Event, Feedback, Request};
use crate::gesture::{GestureController, Point, PointerId, Preview};
use crate::source::IdeaSource;
use crate::view::View;

/// The replaceable presentation layer.
pub trait Presenter {
    fn render(&mut self, view: &View);

    fn feedback(&mut self, _cue: Feedback) {}

    fn preview(&mut self, _preview: &Preview) {}

    /// A drag ended short of the commit threshold.
    fn snap_back(&mut self) {}
}

/// Runs the app state machine against real collaborators, one event at a time.
pub struct Session<S, P, R> {
    state: ClientState,
    gestures: GestureController,
    source: S,
    store: P,
    /// Off when loading failed, so unread data on disk is never overwritten.
    writable: bool,
    presenter: R,
}

impl<S: IdeaSource, P: ClientStore, R: Presenter> Session<S, P, R> {
    /// Loads persisted stats and favorites. A failed load starts from zero
    /// and disables saving for the session.
    pub fn new(source: S, store: P, presenter: R) -> Self {
        let (persisted, writable) = match store.load() {
            Ok(persisted) => (persisted, true),
            Err(e) => {
                warn!("Could not load saved data, changes will not be saved: {e}");
                (Default::default(), false)
            }
        };
        Self {
            state: ClientState::new(persisted),
            gestures: GestureController::new(),
            source,
            store,
            writable,
            presenter,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn presenter(&self) -> &R {
        &self.presenter
    }

    /// Apply an event and everything it triggers, including fetch results.
    pub async fn dispatch(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            debug!("event {event:?} on {:?}", self.state.screen);
            for effect in update(&mut self.state, event, Stamp::fresh()) {
                match effect {
                    Effect::Render(view) => self.presenter.render(&view),
                    Effect::Feedback(cue) => self.presenter.feedback(cue),
                    Effect::Persist => self.persist(),
                    Effect::Fetch(request) => queue.push_back(self.fetch(request).await),
                }
            }
        }
    }

    pub fn pointer_down(&mut self, pointer: PointerId, at: Point) {
        self.gestures.press(pointer, at);
    }

    pub fn pointer_move(&mut self, pointer: PointerId, at: Point) {
        if let Some(preview) = self.gestures.move_to(pointer, at) {
            self.presenter.preview(&preview);
        }
    }

    /// Pointer released or left the card.
    pub async fn pointer_up(&mut self, pointer: PointerId, at: Point) {
        let Some(outcome) = self.gestures.release(pointer, at) else {
            return;
        };
        match Decision::from_swipe(outcome) {
            Some(decision) => self.dispatch(Event::Decision(decision)).await,
            None => self.presenter.snap_back(),
        }
    }

    async fn fetch(&self, request: Request) -> Event {
        let result = match &request {
            Request::Generate => self.source.generate().await,
            Request::Refine(current) => self.source.refine(current).await,
        };
        match result {
            Ok(idea) => Event::Loaded(idea),
            Err(e) => {
                error!("Error fetching idea: {e}");
                Event::Failed(e.to_string())
            }
        }
    }

    fn persist(&self) {
        if !self.writable {
            return;
        }
        if let Err(e) = self.store.save(&self.state.persisted()) {
            error!("Failed to save data: {e}");
        }
    }
}
