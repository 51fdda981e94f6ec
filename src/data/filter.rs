use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::model::{NumericField, Player, PlayerDataset};

// ---------------------------------------------------------------------------
// Filter criteria: selected values per facet, plus the age range
// ---------------------------------------------------------------------------

/// The three categorical facets a player can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Club,
    Nationality,
    Position,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::Club, Facet::Nationality, Facet::Position];

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Facet::Club => "Club",
            Facet::Nationality => "Nationality",
            Facet::Position => "Position",
        }
    }

    /// Distinct values observed in the dataset for this facet.
    pub fn values(self, dataset: &PlayerDataset) -> &BTreeSet<String> {
        match self {
            Facet::Club => &dataset.clubs,
            Facet::Nationality => &dataset.nationalities,
            Facet::Position => &dataset.positions,
        }
    }

    /// The matching selection set inside a criteria value.
    pub fn selection(self, criteria: &FilterCriteria) -> &BTreeSet<String> {
        match self {
            Facet::Club => &criteria.clubs,
            Facet::Nationality => &criteria.nationalities,
            Facet::Position => &criteria.positions,
        }
    }

    pub fn selection_mut(self, criteria: &mut FilterCriteria) -> &mut BTreeSet<String> {
        match self {
            Facet::Club => &mut criteria.clubs,
            Facet::Nationality => &mut criteria.nationalities,
            Facet::Position => &mut criteria.positions,
        }
    }

    fn player_value(self, p: &Player) -> Option<&str> {
        match self {
            Facet::Club => p.club_name.as_deref(),
            Facet::Nationality => p.nationality_name.as_deref(),
            Facet::Position => p.player_positions.as_deref(),
        }
    }
}

/// User-selected constraints, immutable per filter pass.
///
/// An empty selection set places no constraint on its facet; the age range is
/// always active, and a player without a parseable age never passes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub clubs: BTreeSet<String>,
    pub nationalities: BTreeSet<String>,
    pub positions: BTreeSet<String>,
    pub age_min: u32,
    pub age_max: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            clubs: BTreeSet::new(),
            nationalities: BTreeSet::new(),
            positions: BTreeSet::new(),
            age_min: 0,
            age_max: 0,
        }
    }
}

/// Initial criteria for a freshly loaded dataset: no facet constraints, and
/// both age bounds parked on the integer midpoint of the observed range (the
/// age slider's starting position).
pub fn init_criteria(dataset: &PlayerDataset) -> FilterCriteria {
    let (lo, hi) = dataset.age_bounds();
    let mid = (lo + hi) / 2;
    FilterCriteria {
        age_min: mid,
        age_max: mid,
        ..FilterCriteria::default()
    }
}

/// Return indices of players that pass every active constraint.
///
/// A player passes when:
/// * each facet with a non-empty selection contains the player's value
///   (a player missing that attribute fails the facet);
/// * the player's age is known and lies within `[age_min, age_max]`.
///
/// Relative order of the input is preserved, and the result may be empty.
pub fn filtered_indices(dataset: &PlayerDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| passes(p, criteria))
        .map(|(i, _)| i)
        .collect()
}

fn passes(p: &Player, criteria: &FilterCriteria) -> bool {
    for facet in Facet::ALL {
        let selected = facet.selection(criteria);
        if selected.is_empty() {
            continue;
        }
        match facet.player_value(p) {
            Some(value) if selected.contains(value) => {}
            _ => return false,
        }
    }
    match p.age {
        Some(age) => age >= criteria.age_min as f64 && age <= criteria.age_max as f64,
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Derived views over a filtered slice
// ---------------------------------------------------------------------------

/// Restrict to rows where every named field parsed: the dense subset used by
/// analyses that need a fully populated numeric matrix. Order preserved.
pub fn dense_rows<'a>(players: &[&'a Player], fields: &[NumericField]) -> Vec<&'a Player> {
    players
        .iter()
        .copied()
        .filter(|p| fields.iter().all(|f| f.get(p).is_some()))
        .collect()
}

/// The `n` players with the highest value of `field`, descending.
///
/// The sort is stable: ties keep their original relative order, and players
/// missing the field sort last. Returns fewer than `n` only when the input
/// has fewer rows.
pub fn top_n_by<'a>(players: &[&'a Player], field: NumericField, n: usize) -> Vec<&'a Player> {
    let mut sorted: Vec<&Player> = players.to_vec();
    sorted.sort_by(|a, b| match (field.get(a), field.get(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, age: f64, pace: f64) -> Player {
        Player {
            short_name: name.to_string(),
            age: Some(age),
            pace: Some(pace),
            ..Player::default()
        }
    }

    fn abc_dataset() -> PlayerDataset {
        PlayerDataset::from_players(vec![
            player("A", 20.0, 80.0),
            player("B", 30.0, 95.0),
            player("C", 25.0, 60.0),
        ])
    }

    fn wide_criteria() -> FilterCriteria {
        FilterCriteria {
            age_min: 0,
            age_max: 100,
            ..FilterCriteria::default()
        }
    }

    fn view<'a>(ds: &'a PlayerDataset, indices: &[usize]) -> Vec<&'a Player> {
        indices.iter().map(|&i| &ds.players[i]).collect()
    }

    #[test]
    fn unconstrained_criteria_keep_everything_in_order() {
        let ds = abc_dataset();
        assert_eq!(filtered_indices(&ds, &wide_criteria()), vec![0, 1, 2]);
    }

    #[test]
    fn full_age_range_keeps_all_three_and_top_two_by_pace() {
        let ds = abc_dataset();
        let criteria = FilterCriteria {
            age_min: 20,
            age_max: 30,
            ..FilterCriteria::default()
        };
        let indices = filtered_indices(&ds, &criteria);
        assert_eq!(indices, vec![0, 1, 2]);

        let visible = view(&ds, &indices);
        let top = top_n_by(&visible, NumericField::Pace, 2);
        let names: Vec<&str> = top.iter().map(|p| p.short_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn narrow_age_range_keeps_only_matching_rows() {
        let ds = abc_dataset();
        let criteria = FilterCriteria {
            age_min: 26,
            age_max: 30,
            ..FilterCriteria::default()
        };
        let indices = filtered_indices(&ds, &criteria);
        assert_eq!(view(&ds, &indices)[0].short_name, "B");
        assert_eq!(indices.len(), 1);
    }

    #[test]
    fn facet_selections_are_anded_with_the_age_range() {
        let mut a = player("A", 20.0, 80.0);
        a.club_name = Some("Ajax".to_string());
        a.nationality_name = Some("NL".to_string());
        let mut b = player("B", 30.0, 95.0);
        b.club_name = Some("Bayern".to_string());
        b.nationality_name = Some("DE".to_string());
        let ds = PlayerDataset::from_players(vec![a, b]);

        let mut criteria = wide_criteria();
        criteria.clubs.insert("Ajax".to_string());
        assert_eq!(filtered_indices(&ds, &criteria), vec![0]);

        // Conflicting nationality empties the result.
        criteria.nationalities.insert("DE".to_string());
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn player_missing_a_constrained_attribute_fails_that_facet() {
        let mut a = player("A", 20.0, 80.0);
        a.club_name = None;
        let ds = PlayerDataset::from_players(vec![a]);

        let mut criteria = wide_criteria();
        criteria.clubs.insert("Ajax".to_string());
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn player_without_age_never_passes_the_age_bound() {
        let mut a = player("A", 20.0, 80.0);
        a.age = None;
        let ds = PlayerDataset::from_players(vec![a]);
        assert!(filtered_indices(&ds, &wide_criteria()).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = abc_dataset();
        let criteria = FilterCriteria {
            age_min: 20,
            age_max: 25,
            ..FilterCriteria::default()
        };
        let once = filtered_indices(&ds, &criteria);
        let survivors: Vec<Player> = once.iter().map(|&i| ds.players[i].clone()).collect();

        let again = filtered_indices(&PlayerDataset::from_players(survivors), &criteria);
        assert_eq!(again, (0..once.len()).collect::<Vec<_>>());
    }

    #[test]
    fn init_criteria_collapses_both_age_bounds_to_the_midpoint() {
        let ds = abc_dataset();
        let criteria = init_criteria(&ds);
        assert_eq!((criteria.age_min, criteria.age_max), (25, 25));
        assert!(criteria.clubs.is_empty());

        // (20 + 31) / 2 floors to 25.
        let ds = PlayerDataset::from_players(vec![
            player("A", 20.0, 80.0),
            player("B", 31.0, 95.0),
        ]);
        let criteria = init_criteria(&ds);
        assert_eq!((criteria.age_min, criteria.age_max), (25, 25));
    }

    #[test]
    fn dense_rows_drop_exactly_the_rows_with_gaps() {
        let full = player("A", 20.0, 80.0);
        let mut gap = player("B", 30.0, 95.0);
        gap.pace = None;
        let players = vec![&full, &gap];

        let dense = dense_rows(&players, &[NumericField::Age, NumericField::Pace]);
        assert_eq!(dense.len(), 1);
        assert_eq!(dense[0].short_name, "A");
        assert!(dense.iter().all(|p| p.pace.is_some() && p.age.is_some()));
    }

    #[test]
    fn top_n_is_stable_and_sorts_nulls_last() {
        let first = player("First", 20.0, 90.0);
        let second = player("Second", 21.0, 90.0);
        let slow = player("Slow", 22.0, 10.0);
        let mut unknown = player("Unknown", 23.0, 0.0);
        unknown.pace = None;
        let players = vec![&unknown, &first, &second, &slow];

        let top = top_n_by(&players, NumericField::Pace, 3);
        let names: Vec<&str> = top.iter().map(|p| p.short_name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Slow"]);

        // Asking for more than the table holds returns the whole table.
        let all = top_n_by(&players, NumericField::Pace, 10);
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].short_name, "Unknown");
    }
}
