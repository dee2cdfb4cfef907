//! Swipe stack controller.
//!
//! Owns the ordered deck, the interested/rejected partitions, the single
//! level of undo and the drag lock for the expanded top card. Rendering
//! lives elsewhere; everything here is synchronous and driven by the
//! caller's clock so it can be tested without sleeping.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::gesture::{Drag, Outcome};
use crate::layout::{self, CardOffset};
use crate::models::{Card, CardId, Decision, Direction};

/// What happens to a card once it leaves the top of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissPolicy {
    /// Right goes to interested, left to rejected.
    Partition,
    /// The card goes to the back of the stack, unclassified.
    Recycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Delay between the decision and the card leaving the stack.
    pub removal_delay: Duration,
    /// Extra time after removal during which dismisses are still ignored.
    pub settle: Duration,
}

impl Timing {
    pub fn partition() -> Self {
        Self {
            removal_delay: Duration::from_millis(10),
            settle: Duration::ZERO,
        }
    }

    pub fn recycle() -> Self {
        Self {
            removal_delay: Duration::from_millis(200),
            settle: Duration::from_millis(100),
        }
    }
}

/// A dismissed card that is still playing its exit animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exiting {
    pub card_id: CardId,
    pub direction: Direction,
    pub due: Instant,
}

pub struct SwipeStack {
    source: Vec<Card>,
    stack: VecDeque<Card>,
    layout: Vec<CardOffset>,
    interested: Vec<Card>,
    rejected: Vec<Card>,
    last_dismissed: Option<Decision>,
    exiting: Option<Exiting>,
    cooldown_until: Option<Instant>,
    expanded: bool,
    drag: Drag,
    policy: DismissPolicy,
    timing: Timing,
    animation_key: u64,
    rng: StdRng,
}

impl SwipeStack {
    pub fn new(cards: Vec<Card>, policy: DismissPolicy, timing: Timing) -> Self {
        Self::with_rng(cards, policy, timing, StdRng::from_entropy())
    }

    /// Deterministic layout, for tests and reproducible screenshots.
    pub fn with_seed(cards: Vec<Card>, policy: DismissPolicy, timing: Timing, seed: u64) -> Self {
        Self::with_rng(cards, policy, timing, StdRng::seed_from_u64(seed))
    }

    fn with_rng(cards: Vec<Card>, policy: DismissPolicy, timing: Timing, rng: StdRng) -> Self {
        let mut stack = Self {
            source: Vec::new(),
            stack: VecDeque::new(),
            layout: Vec::new(),
            interested: Vec::new(),
            rejected: Vec::new(),
            last_dismissed: None,
            exiting: None,
            cooldown_until: None,
            expanded: false,
            drag: Drag::default(),
            policy,
            timing,
            animation_key: 0,
            rng,
        };
        stack.replace_source(cards);
        stack
    }

    pub fn set_drag_threshold(&mut self, threshold: i32) {
        self.drag = Drag::new(threshold);
    }

    // --- Lifecycle ---

    /// Loads `cards` as the stack and discards all progress. The source
    /// deck is left untouched; see `replace_source`.
    pub fn initialize(&mut self, cards: Vec<Card>) {
        self.layout = self.fresh_layout(cards.len());
        self.stack = cards.into();
        self.interested.clear();
        self.rejected.clear();
        self.last_dismissed = None;
        self.exiting = None;
        self.cooldown_until = None;
        self.expanded = false;
        self.drag.cancel();
        self.animation_key += 1;
        debug!(cards = self.stack.len(), policy = ?self.policy, "stack initialized");
    }

    /// Upstream data changed (e.g. switching between job and candidate mode).
    pub fn replace_source(&mut self, cards: Vec<Card>) {
        self.source = cards.clone();
        self.initialize(cards);
    }

    pub fn reset(&mut self) {
        self.initialize(self.source.clone());
    }

    fn fresh_layout(&mut self, count: usize) -> Vec<CardOffset> {
        match self.policy {
            DismissPolicy::Partition => layout::random_layout(count, &mut self.rng),
            DismissPolicy::Recycle => layout::hub_layout(count, &mut self.rng),
        }
    }

    // --- Dismiss ---

    pub fn can_dismiss(&self, now: Instant) -> bool {
        !self.stack.is_empty()
            && !self.expanded
            && self.exiting.is_none()
            && self.cooldown_until.is_none_or(|until| now >= until)
    }

    /// Records a decision on the top card. The card itself leaves the stack
    /// once the removal delay has elapsed (see `tick`). Returns false when
    /// the request was dropped: empty stack, expanded card or cooldown.
    pub fn dismiss_top(&mut self, direction: Direction, now: Instant) -> bool {
        if !self.can_dismiss(now) {
            debug!(%direction, "dismiss ignored");
            return false;
        }
        let Some(top) = self.stack.front() else {
            return false;
        };

        let due = now + self.timing.removal_delay;
        if self.policy == DismissPolicy::Partition {
            self.last_dismissed = Some(Decision {
                card: top.clone(),
                direction,
            });
        }
        self.exiting = Some(Exiting {
            card_id: top.id,
            direction,
            due,
        });
        self.cooldown_until = Some(due + self.timing.settle);
        self.drag.cancel();
        debug!(card = %top.id, %direction, "dismiss accepted");
        true
    }

    /// Advances timers. Returns true if the stack changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.cooldown_until.is_some_and(|until| now >= until) && self.exiting.is_none() {
            self.cooldown_until = None;
        }
        match self.exiting {
            Some(exiting) if now >= exiting.due => {
                self.complete_removal();
                if self.cooldown_until.is_some_and(|until| now >= until) {
                    self.cooldown_until = None;
                }
                true
            }
            _ => false,
        }
    }

    /// Completes a pending removal immediately.
    pub fn flush(&mut self) {
        if self.exiting.is_some() {
            self.complete_removal();
        }
        self.cooldown_until = None;
    }

    fn complete_removal(&mut self) {
        let Some(exiting) = self.exiting.take() else {
            return;
        };
        let Some(card) = self.stack.pop_front() else {
            return;
        };
        if !self.layout.is_empty() {
            self.layout.remove(0);
        }

        match self.policy {
            DismissPolicy::Partition => match exiting.direction {
                Direction::Right => self.interested.push(card),
                Direction::Left => self.rejected.push(card),
            },
            DismissPolicy::Recycle => {
                self.stack.push_back(card);
                self.layout = self.fresh_layout(self.stack.len());
            }
        }
        self.animation_key += 1;
        debug!(
            stack = self.stack.len(),
            interested = self.interested.len(),
            rejected = self.rejected.len(),
            "card removed"
        );
    }

    /// Undoes the most recent dismiss. No-op without one.
    pub fn rewind(&mut self) -> bool {
        if self.last_dismissed.is_none() {
            return false;
        }
        self.flush();
        let Some(decision) = self.last_dismissed.take() else {
            return false;
        };

        let list = match decision.direction {
            Direction::Right => &mut self.interested,
            Direction::Left => &mut self.rejected,
        };
        if let Some(pos) = list.iter().rposition(|c| c.id == decision.card.id) {
            list.remove(pos);
        }

        debug!(card = %decision.card.id, direction = %decision.direction, "rewind");
        self.stack.push_front(decision.card);
        self.layout.insert(0, CardOffset::NEUTRAL);
        self.expanded = false;
        self.animation_key += 1;
        true
    }

    // --- Expanded detail (drag lock) ---

    pub fn expand_top(&mut self) -> bool {
        if self.stack.is_empty() || self.exiting.is_some() {
            return false;
        }
        self.expanded = true;
        self.drag.cancel();
        true
    }

    pub fn collapse_top(&mut self) {
        self.expanded = false;
    }

    pub fn toggle_expanded(&mut self) {
        if self.expanded {
            self.collapse_top();
        } else {
            self.expand_top();
        }
    }

    // --- Pointer drag ---

    pub fn begin_drag(&mut self, x: i32) {
        if self.expanded || self.stack.is_empty() || self.exiting.is_some() {
            return;
        }
        self.drag.begin(x);
    }

    pub fn drag_to(&mut self, x: i32) {
        if self.expanded {
            return;
        }
        self.drag.move_to(x);
    }

    /// Nudges the top card by `delta` without a pointer, starting a drag if needed.
    pub fn nudge(&mut self, delta: i32) {
        if self.expanded || self.stack.is_empty() || self.exiting.is_some() {
            return;
        }
        let dx = self.drag.dx() + delta;
        self.drag.set_dx(dx);
    }

    /// Ends the drag; commits a dismiss only past the threshold.
    pub fn release_drag(&mut self, now: Instant) -> Option<Direction> {
        match self.drag.release() {
            Outcome::Commit(direction) if self.dismiss_top(direction, now) => Some(direction),
            _ => None,
        }
    }

    // --- Accessors ---

    pub fn stack(&self) -> impl Iterator<Item = &Card> {
        self.stack.iter()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn top(&self) -> Option<&Card> {
        self.stack.front()
    }

    pub fn interested(&self) -> &[Card] {
        &self.interested
    }

    pub fn rejected(&self) -> &[Card] {
        &self.rejected
    }

    pub fn last_dismissed(&self) -> Option<&Decision> {
        self.last_dismissed.as_ref()
    }

    pub fn exiting(&self) -> Option<&Exiting> {
        self.exiting.as_ref()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn drag(&self) -> &Drag {
        &self.drag
    }

    pub fn animation_key(&self) -> u64 {
        self.animation_key
    }

    /// Offset of the card at `depth`; the top card is always neutral.
    pub fn offset_at(&self, depth: usize) -> CardOffset {
        if depth == 0 {
            return CardOffset::NEUTRAL;
        }
        self.layout.get(depth).copied().unwrap_or_default()
    }
}
