use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed social-media post mentioning a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub price: f64,
    pub created_utc: DateTime<Utc>,
    /// Subscriber count of the community the post came from.
    pub subscribers: u32,
    /// Raw engagement score (upvotes).
    pub score: u32,
    pub sku: String,
}

/// Discrete demand rank. `S` is the highest tier, `D` the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    /// All tiers from highest to lowest.
    pub const ALL: [Tier; 5] = [Tier::S, Tier::A, Tier::B, Tier::C, Tier::D];

    /// Numeric rank where a larger value is a better tier.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Tier::S => 4,
            Tier::A => 3,
            Tier::B => 2,
            Tier::C => 1,
            Tier::D => 0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        }
    }
}

impl PartialOrd for Tier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_order_from_s_down_to_d() {
        assert!(Tier::S > Tier::A);
        assert!(Tier::A > Tier::B);
        assert!(Tier::B > Tier::C);
        assert!(Tier::C > Tier::D);
    }

    #[test]
    fn all_is_sorted_highest_first() {
        let mut sorted = Tier::ALL.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(sorted, Tier::ALL.to_vec());
    }

    #[test]
    fn tier_serializes_as_bare_label() {
        let json = serde_json::to_string(&Tier::A).unwrap();
        assert_eq!(json, "\"A\"");
        assert_eq!(Tier::C.to_string(), "C");
    }

    #[test]
    fn post_round_trips_through_json() {
        let post = Post {
            title: "Review: Gadget".to_string(),
            price: 129.5,
            created_utc: DateTime::from_timestamp(1_704_067_200, 0).unwrap(),
            subscribers: 25_000,
            score: 42,
            sku: "sku_a".to_string(),
        };
        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(back, post);
    }
}
