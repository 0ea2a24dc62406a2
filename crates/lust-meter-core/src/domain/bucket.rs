//! Classification buckets.

use std::ops::RangeInclusive;

/// A fixed classification tuple: score range plus the messages shown for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Short identifier.
    pub name: &'static str,
    /// Lowest score in the bucket.
    pub low: u8,
    /// Highest score in the bucket.
    pub high: u8,
    /// Title shown with the percentage.
    pub title: &'static str,
    /// One-sentence description.
    pub description: &'static str,
    /// One-sentence advice.
    pub advice: &'static str,
}

impl Bucket {
    /// Returns the inclusive score range.
    #[must_use]
    pub const fn range(&self) -> RangeInclusive<u8> {
        self.low..=self.high
    }

    /// Returns true if `score` falls in this bucket.
    #[must_use]
    pub const fn contains(&self, score: u8) -> bool {
        score >= self.low && score <= self.high
    }
}

/// The buckets in lookup priority order. The last one is the fallback.
pub static BUCKETS: [Bucket; 4] = [
    Bucket {
        name: "irresistible",
        low: 85,
        high: 95,
        title: "Absolutely Irresistible! 🔥",
        description: "Your aura radiates pure magnetism and intense attraction.",
        advice: "You have that rare combination of confidence and allure that drives people wild!",
    },
    Bucket {
        name: "highly_desirable",
        low: 75,
        high: 84,
        title: "Highly Desirable ✨",
        description: "You possess an enchanting charm that captivates hearts effortlessly.",
        advice: "Your natural charisma and appeal make you incredibly attractive to others.",
    },
    Bucket {
        name: "quite_alluring",
        low: 65,
        high: 74,
        title: "Quite Alluring 💫",
        description: "There's something mysteriously attractive about your presence.",
        advice: "Your subtle magnetism and inner beauty shine through beautifully.",
    },
    Bucket {
        name: "charmingly_appealing",
        low: 50,
        high: 64,
        title: "Charmingly Appealing 💖",
        description: "You have a warm and inviting energy that draws people in.",
        advice: "Your genuine personality and kind spirit make you wonderfully attractive.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_cover_score_domain_without_overlap() {
        for score in 50..=90u8 {
            let matches = BUCKETS.iter().filter(|b| b.contains(score)).count();
            assert_eq!(matches, 1, "score {score} matched {matches} buckets");
        }
    }

    #[test]
    fn test_range_matches_contains() {
        for bucket in &BUCKETS {
            for score in 0..=u8::MAX {
                assert_eq!(bucket.range().contains(&score), bucket.contains(score));
            }
        }
    }
}
