//! Level catalog - static level definitions per minigame type
//!
//! Pure data: no storage, no timing. The presentation layer reads these to
//! lay out a puzzle; the progression engine reads them for star scoring and
//! unlock gating.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One slot of a puzzle sequence: a visible number or the gap to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Number(i32),
    Blank,
}

/// Coarse difficulty rating shown on level select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// A single puzzle level.
///
/// `sequence` holds exactly one [`Slot::Blank`], at `target_position`.
/// Exactly one entry of `options` equals `missing_number`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// Stable level code, e.g. `"seq_001"`.
    pub id: String,
    /// The displayed sequence, one slot blank.
    pub sequence: Vec<Slot>,
    /// The value that belongs in the blank slot.
    pub missing_number: i32,
    /// Draggable candidate values offered to the player.
    pub options: Vec<i32>,
    /// Index of the blank slot within `sequence`.
    pub target_position: usize,
    pub difficulty: Difficulty,
    /// Category id, matching one of [`MinigameConfig::categories`].
    pub category: String,
    pub title: String,
    pub description: String,
    /// Guide hints, shown in order on request.
    pub hints: Vec<String>,
    /// Total stars needed before the level shows as reachable on the menu.
    pub required_stars: u32,
    /// Time budget for the speed star, in seconds.
    pub max_time_secs: f64,
    /// Base point value, multiplied by stars awarded on completion.
    pub points: u32,
}

impl LevelDefinition {
    /// Whether `candidate` is the value that completes this level.
    pub fn is_correct(&self, candidate: i32) -> bool {
        candidate == self.missing_number
    }
}

/// A named group of levels on the level-select screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCategory {
    pub id: String,
    pub name: String,
    pub levels: Vec<u32>,
}

/// Minigame-wide presentation data and level grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinigameConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub total_levels: u32,
    pub categories: Vec<LevelCategory>,
}

/// All levels of one minigame, keyed by level number starting at 1.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    pub config: MinigameConfig,
    levels: BTreeMap<u32, LevelDefinition>,
}

impl LevelCatalog {
    /// Catalog for a minigame type, or `None` if the type is unknown.
    pub fn for_minigame(minigame_type: &str) -> Option<Self> {
        match minigame_type {
            "sequence" => Some(Self::sequence()),
            _ => None,
        }
    }

    /// Look up a level by number.
    pub fn get(&self, level_number: u32) -> Option<&LevelDefinition> {
        self.levels.get(&level_number)
    }

    /// Whether a level number exists in this catalog.
    pub fn contains(&self, level_number: u32) -> bool {
        self.levels.contains_key(&level_number)
    }

    /// Number of levels in the catalog.
    pub fn total_levels(&self) -> u32 {
        self.config.total_levels
    }

    /// Level numbers in ascending order.
    pub fn level_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }

    /// The number-sequence minigame: fill the gap in a numeric pattern.
    pub fn sequence() -> Self {
        let levels = sequence_levels();
        let config = MinigameConfig {
            id: "sequence".to_string(),
            name: "Complete the Sequence".to_string(),
            description: "Find the number missing from the pattern".to_string(),
            total_levels: levels.len() as u32,
            categories: vec![
                LevelCategory {
                    id: "sequential".to_string(),
                    name: "Counting up".to_string(),
                    levels: vec![1, 2],
                },
                LevelCategory {
                    id: "even_numbers".to_string(),
                    name: "Even numbers".to_string(),
                    levels: vec![3, 4],
                },
                LevelCategory {
                    id: "odd_numbers".to_string(),
                    name: "Odd numbers".to_string(),
                    levels: vec![5, 6],
                },
                LevelCategory {
                    id: "multiples".to_string(),
                    name: "Multiples".to_string(),
                    levels: vec![7, 8],
                },
                LevelCategory {
                    id: "decreasing".to_string(),
                    name: "Counting down".to_string(),
                    levels: vec![9, 10],
                },
            ],
        };
        Self { config, levels }
    }
}

/// Shorthand for building a level's sequence: the value at `blank` becomes
/// the gap and the rest stay visible.
fn slots(values: &[i32], blank: usize) -> Vec<Slot> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| if i == blank { Slot::Blank } else { Slot::Number(v) })
        .collect()
}

fn sequence_levels() -> BTreeMap<u32, LevelDefinition> {
    let mut levels = BTreeMap::new();

    levels.insert(
        1,
        LevelDefinition {
            id: "seq_001".to_string(),
            sequence: slots(&[1, 2, 3, 4, 5], 2),
            missing_number: 3,
            options: vec![1, 2, 3],
            target_position: 2,
            difficulty: Difficulty::Easy,
            category: "sequential".to_string(),
            title: "Numbers 1 to 5".to_string(),
            description: "Complete the basic sequence".to_string(),
            hints: vec![
                "The numbers follow one after another".to_string(),
                "Which number goes between 2 and 4?".to_string(),
            ],
            required_stars: 0,
            max_time_secs: 60.0,
            points: 100,
        },
    );

    levels.insert(
        2,
        LevelDefinition {
            id: "seq_002".to_string(),
            sequence: slots(&[3, 4, 5, 6, 7], 3),
            missing_number: 6,
            options: vec![5, 6, 7],
            target_position: 3,
            difficulty: Difficulty::Easy,
            category: "sequential".to_string(),
            title: "Keep on counting".to_string(),
            description: "Follow the number pattern".to_string(),
            hints: vec!["Each number is one more than the last".to_string()],
            required_stars: 1,
            max_time_secs: 55.0,
            points: 110,
        },
    );

    levels.insert(
        3,
        LevelDefinition {
            id: "seq_003".to_string(),
            sequence: slots(&[2, 4, 6, 8, 10], 2),
            missing_number: 6,
            options: vec![5, 6, 7],
            target_position: 2,
            difficulty: Difficulty::Easy,
            category: "even_numbers".to_string(),
            title: "Even numbers".to_string(),
            description: "Complete the even-number sequence".to_string(),
            hints: vec![
                "Only numbers you can split into two equal halves".to_string(),
                "2, 4, ?, 8, 10".to_string(),
            ],
            required_stars: 3,
            max_time_secs: 50.0,
            points: 120,
        },
    );

    levels.insert(
        4,
        LevelDefinition {
            id: "seq_004".to_string(),
            sequence: slots(&[10, 12, 14, 16, 18], 1),
            missing_number: 12,
            options: vec![11, 12, 13],
            target_position: 1,
            difficulty: Difficulty::Easy,
            category: "even_numbers".to_string(),
            title: "Bigger even numbers".to_string(),
            description: "The even pattern continues past ten".to_string(),
            hints: vec!["Count up by twos from 10".to_string()],
            required_stars: 5,
            max_time_secs: 50.0,
            points: 130,
        },
    );

    levels.insert(
        5,
        LevelDefinition {
            id: "seq_005".to_string(),
            sequence: slots(&[1, 3, 5, 7, 9], 3),
            missing_number: 7,
            options: vec![6, 7, 8],
            target_position: 3,
            difficulty: Difficulty::Medium,
            category: "odd_numbers".to_string(),
            title: "Odd numbers".to_string(),
            description: "A sequence of odd numbers".to_string(),
            hints: vec![
                "Numbers that cannot be split in half".to_string(),
                "They go up by two each time".to_string(),
            ],
            required_stars: 7,
            max_time_secs: 45.0,
            points: 150,
        },
    );

    levels.insert(
        6,
        LevelDefinition {
            id: "seq_006".to_string(),
            sequence: slots(&[11, 13, 15, 17, 19], 2),
            missing_number: 15,
            options: vec![14, 15, 16],
            target_position: 2,
            difficulty: Difficulty::Medium,
            category: "odd_numbers".to_string(),
            title: "Odd numbers past ten".to_string(),
            description: "Keep the odd pattern going".to_string(),
            hints: vec!["11, 13, ?, 17, 19".to_string()],
            required_stars: 9,
            max_time_secs: 45.0,
            points: 160,
        },
    );

    levels.insert(
        7,
        LevelDefinition {
            id: "seq_007".to_string(),
            sequence: slots(&[5, 10, 15, 20, 25], 3),
            missing_number: 20,
            options: vec![18, 20, 22],
            target_position: 3,
            difficulty: Difficulty::Medium,
            category: "multiples".to_string(),
            title: "Multiples of 5".to_string(),
            description: "Count up five at a time".to_string(),
            hints: vec![
                "They all end in 0 or 5".to_string(),
                "5, 10, 15, ?, 25".to_string(),
            ],
            required_stars: 12,
            max_time_secs: 40.0,
            points: 180,
        },
    );

    levels.insert(
        8,
        LevelDefinition {
            id: "seq_008".to_string(),
            sequence: slots(&[10, 20, 30, 40, 50], 2),
            missing_number: 30,
            options: vec![25, 30, 35],
            target_position: 2,
            difficulty: Difficulty::Medium,
            category: "multiples".to_string(),
            title: "Multiples of 10".to_string(),
            description: "Count up ten at a time".to_string(),
            hints: vec!["They all end in zero".to_string()],
            required_stars: 15,
            max_time_secs: 40.0,
            points: 200,
        },
    );

    levels.insert(
        9,
        LevelDefinition {
            id: "seq_009".to_string(),
            sequence: slots(&[100, 90, 80, 70, 60], 3),
            missing_number: 70,
            options: vec![65, 70, 75],
            target_position: 3,
            difficulty: Difficulty::Hard,
            category: "decreasing".to_string(),
            title: "Counting down".to_string(),
            description: "The numbers run backwards".to_string(),
            hints: vec![
                "Each number is ten less".to_string(),
                "100, 90, 80, ?, 60".to_string(),
            ],
            required_stars: 18,
            max_time_secs: 35.0,
            points: 220,
        },
    );

    levels.insert(
        10,
        LevelDefinition {
            id: "seq_010".to_string(),
            sequence: slots(&[25, 20, 15, 10, 5], 1),
            missing_number: 20,
            options: vec![18, 20, 22],
            target_position: 1,
            difficulty: Difficulty::Hard,
            category: "decreasing".to_string(),
            title: "Down by fives".to_string(),
            description: "Count backwards five at a time".to_string(),
            hints: vec!["Start at 25 and take five away each step".to_string()],
            required_stars: 21,
            max_time_secs: 35.0,
            points: 250,
        },
    );

    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_minigame_has_no_catalog() {
        assert!(LevelCatalog::for_minigame("matching").is_none());
        assert!(LevelCatalog::for_minigame("").is_none());
    }

    #[test]
    fn test_sequence_catalog_is_contiguous_from_one() {
        let catalog = LevelCatalog::sequence();
        let numbers: Vec<u32> = catalog.level_numbers().collect();
        let expected: Vec<u32> = (1..=catalog.total_levels()).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_every_level_has_exactly_one_blank_at_target() {
        let catalog = LevelCatalog::sequence();
        for n in catalog.level_numbers() {
            let level = catalog.get(n).unwrap();
            let blanks: Vec<usize> = level
                .sequence
                .iter()
                .enumerate()
                .filter(|(_, s)| **s == Slot::Blank)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(blanks, vec![level.target_position], "level {}", n);
        }
    }

    #[test]
    fn test_every_level_has_exactly_one_correct_option() {
        let catalog = LevelCatalog::sequence();
        for n in catalog.level_numbers() {
            let level = catalog.get(n).unwrap();
            let correct = level
                .options
                .iter()
                .filter(|&&o| level.is_correct(o))
                .count();
            assert_eq!(correct, 1, "level {}", n);
        }
    }

    #[test]
    fn test_config_matches_level_data() {
        let catalog = LevelCatalog::sequence();
        assert_eq!(
            catalog.config.total_levels as usize,
            catalog.level_numbers().count()
        );
        for cat in &catalog.config.categories {
            for n in &cat.levels {
                let level = catalog.get(*n).expect("category references real level");
                assert_eq!(level.category, cat.id, "level {}", n);
            }
        }
    }
}
