/// Direction of an opinion a user can hold on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Like,
    Dislike,
}

/// A user's standing reaction to a resource.
///
/// Like and dislike are two states of one value, so a user can never hold both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Reaction {
    #[default]
    Neutral,
    Liked,
    Disliked,
}

/// Requested change to a user's reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionChange {
    /// Move to the given polarity, leaving the opposite one
    Adopt(Polarity),
    /// Leave the given polarity if currently held
    Retract(Polarity),
}

impl Reaction {
    pub fn from_polarity(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Like => Reaction::Liked,
            Polarity::Dislike => Reaction::Disliked,
        }
    }

    /// State after applying `change`
    pub fn after(self, change: ReactionChange) -> Reaction {
        match change {
            ReactionChange::Adopt(polarity) => Reaction::from_polarity(polarity),
            ReactionChange::Retract(polarity) if self == Reaction::from_polarity(polarity) => {
                Reaction::Neutral
            }
            ReactionChange::Retract(_) => self,
        }
    }

    pub fn is_liked(&self) -> bool {
        matches!(self, Reaction::Liked)
    }

    pub fn is_disliked(&self) -> bool {
        matches!(self, Reaction::Disliked)
    }
}
