//! Reaction Aggregator
//!
//! Like/dislike bookkeeping for posts and comments. Membership is kept in
//! [`ReactionSet`], a set of user ids with O(1) membership tests, and the
//! record-level invariants are owned by the wrapper types:
//!
//! - [`PostReactions`]: a user id is in at most one of `likes` / `dislikes`.
//! - [`CommentLikes`]: `numberOfLikes` always equals the size of `likes`.
//!
//! Both types expose toggles only; there is no way to insert into one set
//! without going through the rules above.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Set of user ids that reacted to a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionSet(HashSet<Uuid>);

impl ReactionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, user_id: Uuid) -> bool {
        self.0.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Uuid> {
        self.0.iter()
    }

    /// Add or remove `user_id`; returns `true` when the user is a member afterwards
    pub fn toggle(&mut self, user_id: Uuid) -> bool {
        if self.0.remove(&user_id) {
            false
        } else {
            self.0.insert(user_id);
            true
        }
    }

    fn insert(&mut self, user_id: Uuid) -> bool {
        self.0.insert(user_id)
    }

    fn remove(&mut self, user_id: Uuid) -> bool {
        self.0.remove(&user_id)
    }

    /// Ids as a vector, for persistence layers that store arrays
    pub fn to_vec(&self) -> Vec<Uuid> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<Uuid> for ReactionSet {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which reaction a user is toggling on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

/// What a toggle did to the sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// The user was added to the requested set
    Added,
    /// The user was already in the requested set and got removed
    Removed,
    /// The user moved from the opposite set into the requested one
    Switched,
}

/// Like and dislike sets of a post
///
/// Invariant: `likes ∩ dislikes = ∅`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPostReactions")]
pub struct PostReactions {
    likes: ReactionSet,
    dislikes: ReactionSet,
}

#[derive(Deserialize)]
struct RawPostReactions {
    #[serde(default)]
    likes: ReactionSet,
    #[serde(default)]
    dislikes: ReactionSet,
}

impl From<RawPostReactions> for PostReactions {
    fn from(raw: RawPostReactions) -> Self {
        Self::from_sets(raw.likes, raw.dislikes)
    }
}

impl PostReactions {
    /// Build from stored sets. An id present in both keeps the like.
    pub fn from_sets(likes: ReactionSet, mut dislikes: ReactionSet) -> Self {
        dislikes.0.retain(|id| !likes.contains(*id));
        Self { likes, dislikes }
    }

    pub fn likes(&self) -> &ReactionSet {
        &self.likes
    }

    pub fn dislikes(&self) -> &ReactionSet {
        &self.dislikes
    }

    pub fn toggle_like(&mut self, user_id: Uuid) -> ReactionOutcome {
        Self::toggle_into(&mut self.likes, &mut self.dislikes, user_id)
    }

    pub fn toggle_dislike(&mut self, user_id: Uuid) -> ReactionOutcome {
        Self::toggle_into(&mut self.dislikes, &mut self.likes, user_id)
    }

    pub fn apply(&mut self, reaction: Reaction, user_id: Uuid) -> ReactionOutcome {
        match reaction {
            Reaction::Like => self.toggle_like(user_id),
            Reaction::Dislike => self.toggle_dislike(user_id),
        }
    }

    fn toggle_into(
        target: &mut ReactionSet,
        opposite: &mut ReactionSet,
        user_id: Uuid,
    ) -> ReactionOutcome {
        if target.remove(user_id) {
            return ReactionOutcome::Removed;
        }
        target.insert(user_id);
        if opposite.remove(user_id) {
            ReactionOutcome::Switched
        } else {
            ReactionOutcome::Added
        }
    }
}

/// Likes of a comment together with their cached count
///
/// Invariant: `number_of_likes == likes.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCommentLikes", rename_all = "camelCase")]
pub struct CommentLikes {
    likes: ReactionSet,
    number_of_likes: i64,
}

#[derive(Deserialize)]
struct RawCommentLikes {
    #[serde(default)]
    likes: ReactionSet,
}

impl From<RawCommentLikes> for CommentLikes {
    fn from(raw: RawCommentLikes) -> Self {
        Self::from_set(raw.likes)
    }
}

impl CommentLikes {
    /// Build from a stored set; the count is always recomputed
    pub fn from_set(likes: ReactionSet) -> Self {
        let number_of_likes = likes.len() as i64;
        Self {
            likes,
            number_of_likes,
        }
    }

    pub fn likes(&self) -> &ReactionSet {
        &self.likes
    }

    pub fn number_of_likes(&self) -> i64 {
        self.number_of_likes
    }

    /// Toggle the user's like; returns `true` when the comment is liked afterwards
    pub fn toggle(&mut self, user_id: Uuid) -> bool {
        let liked = self.likes.toggle(user_id);
        self.number_of_likes = self.likes.len() as i64;
        liked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_set_toggle() {
        let user = Uuid::new_v4();
        let mut set = ReactionSet::new();
        assert!(set.toggle(user));
        assert!(set.contains(user));
        assert!(!set.toggle(user));
        assert!(set.is_empty());
    }

    #[test]
    fn test_like_then_unlike() {
        let user = Uuid::new_v4();
        let mut reactions = PostReactions::default();
        assert_eq!(reactions.toggle_like(user), ReactionOutcome::Added);
        assert!(reactions.likes().contains(user));
        assert_eq!(reactions.toggle_like(user), ReactionOutcome::Removed);
        assert_eq!(reactions, PostReactions::default());
    }

    #[test]
    fn test_like_removes_dislike() {
        let user = Uuid::new_v4();
        let mut reactions = PostReactions::default();
        reactions.toggle_dislike(user);
        assert!(reactions.dislikes().contains(user));

        assert_eq!(reactions.toggle_like(user), ReactionOutcome::Switched);
        assert!(reactions.likes().contains(user));
        assert!(!reactions.dislikes().contains(user));
    }

    #[test]
    fn test_dislike_removes_like() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut reactions = PostReactions::default();
        reactions.toggle_like(user);
        reactions.toggle_like(other);

        assert_eq!(reactions.apply(Reaction::Dislike, user), ReactionOutcome::Switched);
        assert_eq!(reactions.likes().len(), 1);
        assert!(reactions.likes().contains(other));
        assert!(reactions.dislikes().contains(user));
    }

    #[test]
    fn test_from_sets_resolves_overlap() {
        let user = Uuid::new_v4();
        let likes: ReactionSet = [user].into_iter().collect();
        let dislikes: ReactionSet = [user, Uuid::new_v4()].into_iter().collect();
        let reactions = PostReactions::from_sets(likes, dislikes);
        assert!(reactions.likes().contains(user));
        assert!(!reactions.dislikes().contains(user));
        assert_eq!(reactions.dislikes().len(), 1);
    }

    #[test]
    fn test_post_reactions_deserialize_normalizes() {
        let user = Uuid::new_v4();
        let json = serde_json::json!({ "likes": [user], "dislikes": [user] });
        let reactions: PostReactions = serde_json::from_value(json).unwrap();
        assert!(reactions.likes().contains(user));
        assert!(reactions.dislikes().is_empty());
    }

    #[test]
    fn test_comment_likes_count_tracks_set() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut likes = CommentLikes::default();
        assert!(likes.toggle(a));
        assert!(likes.toggle(b));
        assert_eq!(likes.number_of_likes(), 2);
        assert!(!likes.toggle(a));
        assert_eq!(likes.number_of_likes(), 1);
        assert_eq!(likes.likes().len(), 1);
    }

    #[test]
    fn test_comment_likes_serialization() {
        let user = Uuid::new_v4();
        let mut likes = CommentLikes::default();
        likes.toggle(user);
        let value = serde_json::to_value(&likes).unwrap();
        assert_eq!(value["numberOfLikes"], 1);
        assert_eq!(value["likes"][0], user.to_string());

        // A stale stored count is ignored in favour of the set size.
        let stale = serde_json::json!({ "likes": [user], "numberOfLikes": 7 });
        let decoded: CommentLikes = serde_json::from_value(stale).unwrap();
        assert_eq!(decoded.number_of_likes(), 1);
    }
}
