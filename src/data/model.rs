use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Player – one row of the source table
// ---------------------------------------------------------------------------

/// A single player (one row of the source table).
///
/// Categorical cells that are blank in the source become `None`; numeric
/// cells that fail to parse become `None` (see [`coerce_numeric`]). A null
/// never removes the row from the dataset, it only excludes the row from
/// derivations that require the affected attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub short_name: String,
    pub club_name: Option<String>,
    pub nationality_name: Option<String>,
    pub player_positions: Option<String>,
    pub age: Option<f64>,
    pub height_cm: Option<f64>,
    pub wage_eur: Option<f64>,
    pub value_eur: Option<f64>,
    pub overall: Option<f64>,
    pub pace: Option<f64>,
    pub shooting: Option<f64>,
    pub passing: Option<f64>,
    pub dribbling: Option<f64>,
    pub defending: Option<f64>,
    pub physic: Option<f64>,
    pub attacking_heading_accuracy: Option<f64>,
    pub skill_ball_control: Option<f64>,
    pub power_stamina: Option<f64>,
}

// ---------------------------------------------------------------------------
// NumericField – typed access to the numeric columns
// ---------------------------------------------------------------------------

/// The numeric attributes of a [`Player`], addressable as values so chart
/// and derivation code can name columns without string lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Age,
    HeightCm,
    WageEur,
    ValueEur,
    Overall,
    Pace,
    Shooting,
    Passing,
    Dribbling,
    Defending,
    Physic,
    HeadingAccuracy,
    BallControl,
    Stamina,
}

impl NumericField {
    /// Read this field from a player.
    pub fn get(self, p: &Player) -> Option<f64> {
        match self {
            NumericField::Age => p.age,
            NumericField::HeightCm => p.height_cm,
            NumericField::WageEur => p.wage_eur,
            NumericField::ValueEur => p.value_eur,
            NumericField::Overall => p.overall,
            NumericField::Pace => p.pace,
            NumericField::Shooting => p.shooting,
            NumericField::Passing => p.passing,
            NumericField::Dribbling => p.dribbling,
            NumericField::Defending => p.defending,
            NumericField::Physic => p.physic,
            NumericField::HeadingAccuracy => p.attacking_heading_accuracy,
            NumericField::BallControl => p.skill_ball_control,
            NumericField::Stamina => p.power_stamina,
        }
    }

    /// Human label for axis and legend text.
    pub fn label(self) -> &'static str {
        match self {
            NumericField::Age => "Age of Player",
            NumericField::HeightCm => "Height (cm)",
            NumericField::WageEur => "Wage (EUR)",
            NumericField::ValueEur => "Value (EUR)",
            NumericField::Overall => "Overall Rating",
            NumericField::Pace => "Pace",
            NumericField::Shooting => "Shooting",
            NumericField::Passing => "Passing",
            NumericField::Dribbling => "Dribbling",
            NumericField::Defending => "Defending",
            NumericField::Physic => "Physic",
            NumericField::HeadingAccuracy => "Heading Accuracy",
            NumericField::BallControl => "Ball Control Skill",
            NumericField::Stamina => "Stamina",
        }
    }
}

/// Lenient numeric coercion: `"72"` / `"72.5"` parse, anything else (blank,
/// `"N/A"`, stray text) becomes `None`.
pub fn coerce_numeric(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// PlayerDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with distinct-value indices computed once.
///
/// The dataset is read-only after construction: the sidebar option lists and
/// the age slider bounds all come from the indices built here, never from a
/// rescan of the rows.
#[derive(Debug, Clone)]
pub struct PlayerDataset {
    /// All players (rows), in file order.
    pub players: Vec<Player>,
    /// Distinct club names.
    pub clubs: BTreeSet<String>,
    /// Distinct nationality names.
    pub nationalities: BTreeSet<String>,
    /// Distinct position strings (kept whole, e.g. `"ST, LW"`).
    pub positions: BTreeSet<String>,
    age_bounds: (u32, u32),
}

impl PlayerDataset {
    /// Build the distinct-value indices from the loaded rows.
    pub fn from_players(players: Vec<Player>) -> Self {
        let mut clubs = BTreeSet::new();
        let mut nationalities = BTreeSet::new();
        let mut positions = BTreeSet::new();
        let mut lo = u32::MAX;
        let mut hi = 0u32;

        for p in &players {
            if let Some(club) = &p.club_name {
                clubs.insert(club.clone());
            }
            if let Some(nat) = &p.nationality_name {
                nationalities.insert(nat.clone());
            }
            if let Some(pos) = &p.player_positions {
                positions.insert(pos.clone());
            }
            if let Some(age) = p.age {
                let a = age as u32;
                lo = lo.min(a);
                hi = hi.max(a);
            }
        }

        let age_bounds = if lo <= hi { (lo, hi) } else { (0, 0) };
        PlayerDataset {
            players,
            clubs,
            nationalities,
            positions,
            age_bounds,
        }
    }

    /// Observed integer age range `(min, max)`; `(0, 0)` when no row has a
    /// parseable age.
    pub fn age_bounds(&self) -> (u32, u32) {
        self.age_bounds
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, club: Option<&str>, age: Option<f64>) -> Player {
        Player {
            short_name: name.to_string(),
            club_name: club.map(String::from),
            age,
            ..Player::default()
        }
    }

    #[test]
    fn coerce_numeric_parses_numbers_and_nulls_everything_else() {
        assert_eq!(coerce_numeric("72"), Some(72.0));
        assert_eq!(coerce_numeric(" 72.5 "), Some(72.5));
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("   "), None);
        assert_eq!(coerce_numeric("N/A"), None);
        assert_eq!(coerce_numeric("fast"), None);
    }

    #[test]
    fn distinct_values_skip_missing_cells() {
        let ds = PlayerDataset::from_players(vec![
            player("A", Some("Arsenal"), Some(20.0)),
            player("B", None, Some(30.0)),
            player("C", Some("Arsenal"), Some(25.0)),
        ]);
        assert_eq!(ds.clubs.iter().collect::<Vec<_>>(), vec!["Arsenal"]);
        assert!(ds.nationalities.is_empty());
    }

    #[test]
    fn age_bounds_cover_observed_ages_only() {
        let ds = PlayerDataset::from_players(vec![
            player("A", None, Some(20.0)),
            player("B", None, None),
            player("C", None, Some(34.0)),
        ]);
        assert_eq!(ds.age_bounds(), (20, 34));

        let no_ages = PlayerDataset::from_players(vec![player("A", None, None)]);
        assert_eq!(no_ages.age_bounds(), (0, 0));
    }

    #[test]
    fn numeric_field_round_trips_through_get() {
        let p = Player {
            pace: Some(91.0),
            skill_ball_control: Some(88.0),
            ..Player::default()
        };
        assert_eq!(NumericField::Pace.get(&p), Some(91.0));
        assert_eq!(NumericField::BallControl.get(&p), Some(88.0));
        assert_eq!(NumericField::Overall.get(&p), None);
    }
}
