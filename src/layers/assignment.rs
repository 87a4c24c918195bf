//! One display category per location.
//!
//! A location named by several excerpts, or by one excerpt with several true
//! topics, would otherwise show one icon per matching category layer. The
//! pass below keeps exactly one, chosen with the session seed, and caps the
//! number of uncategorized fallback markers.

use crate::core::{constants::DEFAULT_NONE_CAP, seed::SessionSeed};
use crate::data::feature::{Category, LiteraryFeature};
use crate::prelude::{HashMap, HashSet};

/// Location name to display category. Locations without an entry render in
/// no category layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryAssignment {
    entries: Vec<(String, Category)>,
    index: HashMap<String, usize>,
    none_count: usize,
}

impl CategoryAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, location: &str, category: Category) {
        if self.index.contains_key(location) {
            return;
        }
        self.index.insert(location.to_string(), self.entries.len());
        self.entries.push((location.to_string(), category));
        if category.is_fallback() {
            self.none_count += 1;
        }
    }

    pub fn get(&self, location: &str) -> Option<Category> {
        self.index.get(location).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, location: &str) -> bool {
        self.index.contains_key(location)
    }

    /// Locations assigned to `category`, in the order they were assigned
    pub fn locations_for(&self, category: Category) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, c)| *c == category)
            .map(|(l, _)| l.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Category)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }

    /// Number of locations given the fallback category
    pub fn none_count(&self) -> usize {
        self.none_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Two-pass category assignment over a loaded feature set
#[derive(Debug, Clone)]
pub struct AssignmentPass {
    seed: SessionSeed,
    categories: Vec<Category>,
    none_cap: usize,
}

impl AssignmentPass {
    pub fn new(seed: SessionSeed, categories: Vec<Category>) -> Self {
        Self {
            seed,
            categories,
            none_cap: DEFAULT_NONE_CAP,
        }
    }

    pub fn with_none_cap(mut self, none_cap: usize) -> Self {
        self.none_cap = none_cap;
        self
    }

    /// Assigns every location of `features` at most one category.
    ///
    /// Features are folded by location first: only the first-seen feature of
    /// a location contributes its topics. The first pass gives each location
    /// with a true topic one of those topics, picked by hashing its name. The
    /// second pass gives locations with no true topic the fallback category
    /// until `none_cap` is reached; the rest stay unassigned.
    pub fn run(&self, features: &[LiteraryFeature]) -> CategoryAssignment {
        // unnamed features can never pass a location filter
        let mut representatives: Vec<(&str, &LiteraryFeature)> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::default();
        for feature in features {
            if let Some(name) = feature.location_name() {
                if seen.insert(name) {
                    representatives.push((name, feature));
                }
            }
        }

        let mut assignment = CategoryAssignment::new();

        for &(name, feature) in &representatives {
            let candidates = feature.true_categories(&self.categories);
            if let Some(&category) = self.seed.pick(name, &candidates) {
                assignment.insert(name, category);
            }
        }

        let fallback_enabled = self.categories.iter().any(Category::is_fallback);
        for &(name, feature) in &representatives {
            if !fallback_enabled || assignment.none_count() >= self.none_cap {
                break;
            }
            if !assignment.contains(name) && !feature.has_any_category(&self.categories) {
                assignment.insert(name, Category::None);
            }
        }

        log::debug!(
            "assigned {} of {} locations ({} fallback, cap {})",
            assignment.len(),
            representatives.len(),
            assignment.none_count(),
            self.none_cap
        );
        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass(seed: u32, cap: usize) -> AssignmentPass {
        AssignmentPass::new(SessionSeed::fixed(seed), Category::ALL.to_vec()).with_none_cap(cap)
    }

    fn example_features() -> Vec<LiteraryFeature> {
        vec![
            LiteraryFeature::new("A").with_topic(Category::River, true),
            LiteraryFeature::new("B"),
            LiteraryFeature::new("C")
                .with_topic(Category::River, true)
                .with_topic(Category::Lake, true),
        ]
    }

    #[test]
    fn test_empty_input() {
        let assignment = pass(1, 20).run(&[]);
        assert!(assignment.is_empty());
        assert_eq!(assignment.none_count(), 0);
    }

    #[test]
    fn test_small_example_with_cap_one() {
        for seed in 0..50 {
            let assignment = pass(seed, 1).run(&example_features());
            assert_eq!(assignment.get("A"), Some(Category::River));
            assert_eq!(assignment.get("B"), Some(Category::None));
            assert!(matches!(
                assignment.get("C"),
                Some(Category::River) | Some(Category::Lake)
            ));
            assert_eq!(assignment.len(), 3);
        }
    }

    #[test]
    fn test_pick_follows_hash() {
        let seed = SessionSeed::fixed(12_345);
        let expected = if seed.hash("C") % 2 == 0 {
            Category::River
        } else {
            Category::Lake
        };
        let assignment = AssignmentPass::new(seed, Category::ALL.to_vec()).run(&example_features());
        assert_eq!(assignment.get("C"), Some(expected));
    }

    #[test]
    fn test_fallback_cap() {
        let features: Vec<_> = (0..5)
            .map(|i| LiteraryFeature::new(format!("loc-{}", i)))
            .collect();
        let assignment = pass(3, 2).run(&features);
        assert_eq!(assignment.none_count(), 2);
        assert_eq!(assignment.locations_for(Category::None), vec!["loc-0", "loc-1"]);
        assert!(!assignment.contains("loc-2"));

        assert!(pass(3, 0).run(&features).is_empty());
    }

    #[test]
    fn test_cap_does_not_hide_categorized_locations() {
        let mut features: Vec<_> = (0..3)
            .map(|i| LiteraryFeature::new(format!("empty-{}", i)))
            .collect();
        features.push(LiteraryFeature::new("late").with_topic(Category::Camp, true));

        let assignment = pass(9, 1).run(&features);
        assert_eq!(assignment.get("late"), Some(Category::Camp));
        assert_eq!(assignment.none_count(), 1);
    }

    #[test]
    fn test_first_seen_feature_wins() {
        let features = vec![
            LiteraryFeature::new("Denver"),
            LiteraryFeature::new("Denver").with_topic(Category::Road, true),
            LiteraryFeature::new("Boise").with_topic(Category::Desert, true),
            LiteraryFeature::new("Boise").with_topic(Category::Forest, true),
        ];
        let assignment = pass(5, 20).run(&features);
        assert_eq!(assignment.get("Denver"), Some(Category::None));
        assert_eq!(assignment.get("Boise"), Some(Category::Desert));
    }

    #[test]
    fn test_soundness_and_idempotence() {
        let features = vec![
            LiteraryFeature::new("Big Sur")
                .with_topic(Category::Road, true)
                .with_topic(Category::Forest, true)
                .with_topic(Category::Camp, true),
            LiteraryFeature::new("Stampede Trail")
                .with_topic(Category::Trail, true)
                .with_topic(Category::Wilderness, true)
                .with_topic(Category::River, false),
            LiteraryFeature::new("Nowhere"),
        ];

        for seed in 0..100 {
            let first = pass(seed, 20).run(&features);
            assert_eq!(first, pass(seed, 20).run(&features));
            for feature in &features {
                match first.get(feature.location()) {
                    Some(Category::None) => assert!(!feature.has_any_category(&Category::ALL)),
                    Some(category) => assert!(feature.topics.is_set(category.as_str())),
                    None => panic!("{} unassigned", feature.location()),
                }
            }
        }
    }

    #[test]
    fn test_seed_changes_choice_not_membership() {
        let features = example_features();
        let reference = pass(0, 1).run(&features);
        for seed in 1..100 {
            let other = pass(seed, 1).run(&features);
            let a: Vec<_> = reference.iter().map(|(l, _)| l).collect();
            let b: Vec<_> = other.iter().map(|(l, _)| l).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_category_list_restricts_candidates() {
        let features = vec![LiteraryFeature::new("C")
            .with_topic(Category::River, true)
            .with_topic(Category::Lake, true)];
        let assignment = AssignmentPass::new(
            SessionSeed::fixed(0),
            vec![Category::Lake, Category::None],
        )
        .run(&features);
        assert_eq!(assignment.get("C"), Some(Category::Lake));
    }

    #[test]
    fn test_no_fallback_without_none_category() {
        let features = vec![LiteraryFeature::new("B")];
        let assignment =
            AssignmentPass::new(SessionSeed::fixed(0), vec![Category::River]).run(&features);
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_unnamed_features_are_not_assigned() {
        let mut unnamed = LiteraryFeature::new("ignored");
        unnamed.location = None;
        let features = vec![unnamed, LiteraryFeature::new("B")];

        let assignment = pass(0, 1).run(&features);
        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment.get("B"), Some(Category::None));
        assert!(!assignment.contains("Unknown Location"));
    }
}
