//! Stories and the story board, the root of the element tree.

use crate::element::{Element, ElementKind, ElementState};
use crate::observer::StateObserver;
use crate::story::act::Act;

/// A container of trigger-gated acts.
///
/// Starting a story does not start its acts — each act waits for its own
/// trigger.
#[derive(Debug)]
pub struct Story {
    element: Element,
    acts: Vec<Act>,
}

impl Story {
    /// Creates an empty story.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            element: Element::new(ElementKind::Story, name),
            acts: Vec::new(),
        }
    }

    /// Adds an act to the story.
    pub fn add_act(&mut self, act: Act) {
        self.acts.push(act);
    }

    /// The story's acts.
    #[inline]
    pub fn acts(&self) -> &[Act] {
        &self.acts
    }

    /// Mutable access for the trigger evaluator and orchestrator.
    #[inline]
    pub fn acts_mut(&mut self) -> &mut [Act] {
        &mut self.acts
    }

    /// The underlying element state machine.
    #[inline]
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Mutable access for orchestrators driving transitions directly.
    #[inline]
    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    /// Identifier used for diagnostics and notification.
    #[inline]
    pub fn name(&self) -> &str {
        self.element.name()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.element.is_active()
    }

    #[inline]
    pub fn is_triggable(&self) -> bool {
        self.element.is_triggable()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.element.state() == ElementState::Complete
    }

    /// True once every act has reached Complete.
    pub fn all_acts_complete(&self) -> bool {
        self.acts.iter().all(Act::is_complete)
    }

    /// Starts the story. Acts stay in Standby awaiting their triggers.
    pub fn start(&mut self, sim_time: f64, dt: f64, observer: &mut dyn StateObserver) {
        self.element.start(sim_time, dt, observer);
    }

    /// Ends still-running acts, then the story itself.
    pub fn end(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for act in &mut self.acts {
            if act.element().state() == ElementState::Running {
                act.end(sim_time, observer);
            }
        }
        self.element.end(sim_time, observer);
    }

    /// Forces the story and its unfinished subtree to Complete.
    pub fn stop(&mut self, observer: &mut dyn StateObserver) {
        for act in &mut self.acts {
            if !act.is_complete() {
                act.stop(observer);
            }
        }
        self.element.stop(observer);
    }

    /// Bottom-up per-tick update: acts first, then completion
    /// aggregation, then own housekeeping.
    pub fn update_state(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for act in &mut self.acts {
            act.update_state(sim_time, observer);
        }
        if self.element.is_active() && self.all_acts_complete() {
            self.element.end(sim_time, observer);
        }
        self.element.update_state();
    }

    /// Recursively returns the story and its subtree to their pristine
    /// pre-run state.
    pub fn reset(&mut self) {
        for act in &mut self.acts {
            act.reset();
        }
        self.element.reset();
    }
}

/// Root of the story tree.
///
/// The story board owns its stories exclusively (strict tree, no sharing,
/// no cycles). Starting the board starts every story; acts and deeper
/// trigger-gated levels wait for the trigger evaluator.
#[derive(Debug)]
pub struct StoryBoard {
    element: Element,
    stories: Vec<Story>,
}

impl StoryBoard {
    /// Creates an empty story board.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            element: Element::new(ElementKind::StoryBoard, name),
            stories: Vec::new(),
        }
    }

    /// Adds a story to the board.
    pub fn add_story(&mut self, story: Story) {
        self.stories.push(story);
    }

    /// The board's stories.
    #[inline]
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Mutable access for the trigger evaluator and orchestrator.
    #[inline]
    pub fn stories_mut(&mut self) -> &mut [Story] {
        &mut self.stories
    }

    /// The underlying element state machine.
    #[inline]
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Mutable access for orchestrators driving transitions directly.
    #[inline]
    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    /// Identifier used for diagnostics and notification.
    #[inline]
    pub fn name(&self) -> &str {
        self.element.name()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.element.is_active()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.element.state() == ElementState::Complete
    }

    /// True once every story has reached Complete.
    pub fn all_stories_complete(&self) -> bool {
        self.stories.iter().all(Story::is_complete)
    }

    /// Starts the scenario run: the board and all of its stories.
    pub fn start(&mut self, sim_time: f64, dt: f64, observer: &mut dyn StateObserver) {
        if !self.element.is_triggable() {
            self.element.start(sim_time, dt, observer);
            return;
        }
        self.element.start(sim_time, dt, observer);
        for story in &mut self.stories {
            story.start(sim_time, dt, observer);
        }
    }

    /// Ends still-running stories, then the board itself.
    pub fn end(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for story in &mut self.stories {
            if story.element().state() == ElementState::Running {
                story.end(sim_time, observer);
            }
        }
        self.element.end(sim_time, observer);
    }

    /// Terminates the scenario run, forcing the whole tree to Complete.
    pub fn stop(&mut self, observer: &mut dyn StateObserver) {
        for story in &mut self.stories {
            if !story.is_complete() {
                story.stop(observer);
            }
        }
        self.element.stop(observer);
    }

    /// Bottom-up per-tick update of the whole tree.
    pub fn update_state(&mut self, sim_time: f64, observer: &mut dyn StateObserver) {
        for story in &mut self.stories {
            story.update_state(sim_time, observer);
        }
        if self.element.is_active() && self.all_stories_complete() {
            self.element.end(sim_time, observer);
        }
        self.element.update_state();
    }

    /// Returns the whole tree to its pristine pre-run state, enabling
    /// scenario restart without reallocation.
    pub fn reset(&mut self) {
        for story in &mut self.stories {
            story.reset();
        }
        self.element.reset();
    }
}
