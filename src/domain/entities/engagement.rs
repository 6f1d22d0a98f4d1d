use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::reconciler::{InteractionDelta, SaveChange};
use crate::domain::value_objects::{Reaction, UserId};

/// Denormalized engagement counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub likes: u64,
    pub dislikes: u64,
    pub downloads: u64,
    pub flags: u64,
}

/// Append-only record of users who flagged a resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagLedger(BTreeSet<UserId>);

impl FlagLedger {
    /// Returns true when the user had not flagged before
    pub fn record(&mut self, user: &UserId) -> bool {
        self.0.insert(user.clone())
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.0.contains(user)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }
}

impl FromIterator<UserId> for FlagLedger {
    fn from_iter<T: IntoIterator<Item = UserId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Engagement numbers of a resource as seen by one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngagementView {
    pub likes: u64,
    pub dislikes: u64,
    pub downloads: u64,
    pub flags: u64,
    pub user_liked: bool,
    pub user_disliked: bool,
    pub user_saved: bool,
    pub user_flagged: bool,
}

/// Counters and membership sets of a resource.
///
/// Reactions are stored per user as a single tri-state value; the `likedBy` and
/// `dislikedBy` sets are projections of it. Counters are moved by the
/// transitions `apply` observes and are never recomputed from set sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Engagement {
    counters: Counters,
    reactions: BTreeMap<UserId, Reaction>,
    saved_by: BTreeSet<UserId>,
    flagged_by: FlagLedger,
}

impl Engagement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruct from persisted membership sets.
    ///
    /// A user present in both `liked_by` and `disliked_by` is read as liked.
    pub fn from_membership(
        counters: Counters,
        liked_by: impl IntoIterator<Item = UserId>,
        disliked_by: impl IntoIterator<Item = UserId>,
        saved_by: impl IntoIterator<Item = UserId>,
        flagged_by: impl IntoIterator<Item = UserId>,
    ) -> Self {
        let mut reactions = BTreeMap::new();
        for user in disliked_by {
            reactions.insert(user, Reaction::Disliked);
        }
        for user in liked_by {
            reactions.insert(user, Reaction::Liked);
        }

        Self {
            counters,
            reactions,
            saved_by: saved_by.into_iter().collect(),
            flagged_by: flagged_by.into_iter().collect(),
        }
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn reaction_of(&self, user: &UserId) -> Reaction {
        self.reactions.get(user).copied().unwrap_or_default()
    }

    pub fn has_saved(&self, user: &UserId) -> bool {
        self.saved_by.contains(user)
    }

    pub fn has_flagged(&self, user: &UserId) -> bool {
        self.flagged_by.contains(user)
    }

    pub fn liked_by(&self) -> impl Iterator<Item = &UserId> {
        self.reactions
            .iter()
            .filter(|(_, reaction)| reaction.is_liked())
            .map(|(user, _)| user)
    }

    pub fn disliked_by(&self) -> impl Iterator<Item = &UserId> {
        self.reactions
            .iter()
            .filter(|(_, reaction)| reaction.is_disliked())
            .map(|(user, _)| user)
    }

    pub fn saved_by(&self) -> impl Iterator<Item = &UserId> {
        self.saved_by.iter()
    }

    pub fn flagged_by(&self) -> &FlagLedger {
        &self.flagged_by
    }

    /// Project the engagement for `viewer`; anonymous viewers get all flags false
    pub fn view_for(&self, viewer: Option<&UserId>) -> EngagementView {
        let reaction = viewer.map(|u| self.reaction_of(u)).unwrap_or_default();

        EngagementView {
            likes: self.counters.likes,
            dislikes: self.counters.dislikes,
            downloads: self.counters.downloads,
            flags: self.counters.flags,
            user_liked: reaction.is_liked(),
            user_disliked: reaction.is_disliked(),
            user_saved: viewer.is_some_and(|u| self.has_saved(u)),
            user_flagged: viewer.is_some_and(|u| self.has_flagged(u)),
        }
    }

    /// Apply an interaction delta on behalf of `user`
    pub fn apply(&mut self, user: &UserId, delta: &InteractionDelta) {
        if let Some(change) = delta.reaction() {
            let before = self.reaction_of(user);
            let after = before.after(change);

            if before != after {
                match before {
                    Reaction::Liked => {
                        self.counters.likes = self.counters.likes.saturating_sub(1)
                    }
                    Reaction::Disliked => {
                        self.counters.dislikes = self.counters.dislikes.saturating_sub(1)
                    }
                    Reaction::Neutral => {}
                }
                match after {
                    Reaction::Liked => self.counters.likes += 1,
                    Reaction::Disliked => self.counters.dislikes += 1,
                    Reaction::Neutral => {}
                }

                if after == Reaction::Neutral {
                    self.reactions.remove(user);
                } else {
                    self.reactions.insert(user.clone(), after);
                }
            }
        }

        match delta.save() {
            Some(SaveChange::Save) => {
                self.saved_by.insert(user.clone());
            }
            Some(SaveChange::Unsave) => {
                self.saved_by.remove(user);
            }
            None => {}
        }

        if delta.flags() && self.flagged_by.record(user) {
            self.counters.flags += 1;
        }

        self.counters.downloads += delta.downloads();
    }
}
