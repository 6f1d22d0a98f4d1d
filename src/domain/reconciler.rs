//! Interaction reconciliation.
//!
//! An interaction is turned into an [`InteractionDelta`]: a set of conditional
//! membership operations that does not depend on the current state of the
//! resource. Whether a counter moves is decided against the state the delta is
//! applied to, so a store can apply the whole delta in one atomic statement
//! instead of a load-then-save sequence.

use crate::domain::entities::{Engagement, EngagementView};
use crate::domain::value_objects::{InteractionAction, Polarity, ReactionChange, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChange {
    Save,
    Unsave,
}

/// Operation on a single membership set, with its counter following along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Keep,
    /// Add the user if absent
    Insert,
    /// Remove the user if present
    Remove,
}

impl SetOp {
    /// Compact code used when binding the op into a store statement
    pub fn code(&self) -> i16 {
        match self {
            SetOp::Keep => 0,
            SetOp::Insert => 1,
            SetOp::Remove => 2,
        }
    }
}

/// Per-set view of a delta, as a store statement consumes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipOps {
    pub liked: SetOp,
    pub disliked: SetOp,
    pub saved: SetOp,
    /// Append to the flag ledger if absent
    pub flag: bool,
    pub downloads: u64,
}

/// State change requested by one interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionDelta {
    reaction: Option<ReactionChange>,
    save: Option<SaveChange>,
    flag: bool,
    downloads: u64,
}

impl InteractionDelta {
    /// Plan the delta for `action`.
    ///
    /// `value` sets membership for like, dislike and save. Flags cannot be
    /// retracted, so `flag` with `value == false` plans nothing. `download`
    /// ignores `value`.
    pub fn plan(action: InteractionAction, value: bool) -> Self {
        match (action, value) {
            (InteractionAction::Like, true) => {
                Self::reacting(ReactionChange::Adopt(Polarity::Like))
            }
            (InteractionAction::Like, false) => {
                Self::reacting(ReactionChange::Retract(Polarity::Like))
            }
            (InteractionAction::Dislike, true) => {
                Self::reacting(ReactionChange::Adopt(Polarity::Dislike))
            }
            (InteractionAction::Dislike, false) => {
                Self::reacting(ReactionChange::Retract(Polarity::Dislike))
            }
            (InteractionAction::Save, true) => Self {
                save: Some(SaveChange::Save),
                ..Self::default()
            },
            (InteractionAction::Save, false) => Self {
                save: Some(SaveChange::Unsave),
                ..Self::default()
            },
            (InteractionAction::Flag, true) => Self {
                flag: true,
                ..Self::default()
            },
            (InteractionAction::Flag, false) => Self::default(),
            (InteractionAction::Download, _) => Self {
                downloads: 1,
                ..Self::default()
            },
        }
    }

    fn reacting(change: ReactionChange) -> Self {
        Self {
            reaction: Some(change),
            ..Self::default()
        }
    }

    pub fn reaction(&self) -> Option<ReactionChange> {
        self.reaction
    }

    pub fn save(&self) -> Option<SaveChange> {
        self.save
    }

    pub fn flags(&self) -> bool {
        self.flag
    }

    pub fn downloads(&self) -> u64 {
        self.downloads
    }

    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }

    /// Expand the delta into one operation per membership set.
    ///
    /// Adopting a polarity inserts into its set and removes from the opposite
    /// one in the same delta, so both memberships are never set at once.
    pub fn membership_ops(&self) -> MembershipOps {
        let (liked, disliked) = match self.reaction {
            Some(ReactionChange::Adopt(Polarity::Like)) => (SetOp::Insert, SetOp::Remove),
            Some(ReactionChange::Adopt(Polarity::Dislike)) => (SetOp::Remove, SetOp::Insert),
            Some(ReactionChange::Retract(Polarity::Like)) => (SetOp::Remove, SetOp::Keep),
            Some(ReactionChange::Retract(Polarity::Dislike)) => (SetOp::Keep, SetOp::Remove),
            None => (SetOp::Keep, SetOp::Keep),
        };

        let saved = match self.save {
            Some(SaveChange::Save) => SetOp::Insert,
            Some(SaveChange::Unsave) => SetOp::Remove,
            None => SetOp::Keep,
        };

        MembershipOps {
            liked,
            disliked,
            saved,
            flag: self.flag,
            downloads: self.downloads,
        }
    }
}

/// Outcome of reconciling one interaction against a known state
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub delta: InteractionDelta,
    pub engagement: Engagement,
    pub view: EngagementView,
}

/// Reconcile `action` by `user` against `engagement` without touching it.
///
/// Returns the planned delta, the post-update engagement, and the view of that
/// state from `user`'s perspective.
pub fn reconcile(
    engagement: &Engagement,
    user: &UserId,
    action: InteractionAction,
    value: bool,
) -> Reconciliation {
    let delta = InteractionDelta::plan(action, value);
    let mut next = engagement.clone();
    next.apply(user, &delta);
    let view = next.view_for(Some(user));

    Reconciliation {
        delta,
        engagement: next,
        view,
    }
}
