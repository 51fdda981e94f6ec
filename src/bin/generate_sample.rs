use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() as usize) % items.len()]
    }

    /// Uniform integer in `[lo, hi]`.
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as u32
    }
}

/// One CSV row. Skill cells are strings so goalkeepers can carry blanks and
/// a few cells can hold literal `N/A`, like the real export does.
#[derive(Serialize)]
struct SampleRow {
    short_name: String,
    club_name: String,
    nationality_name: String,
    player_positions: String,
    age: u32,
    height_cm: String,
    wage_eur: u64,
    value_eur: u64,
    overall: u32,
    pace: String,
    shooting: String,
    passing: String,
    dribbling: String,
    defending: String,
    physic: String,
    attacking_heading_accuracy: String,
    skill_ball_control: String,
    power_stamina: String,
}

static CLUBS: [&str; 10] = [
    "Arsenal",
    "Bayern Munich",
    "FC Barcelona",
    "Inter Milan",
    "Ajax",
    "Paris Saint-Germain",
    "River Plate",
    "Flamengo",
    "Celtic",
    "Feyenoord",
];

static NATIONALITIES: [&str; 10] = [
    "England",
    "Germany",
    "Spain",
    "Italy",
    "Netherlands",
    "France",
    "Argentina",
    "Brazil",
    "Scotland",
    "Portugal",
];

static FIRST_INITIALS: [&str; 12] = ["A", "B", "C", "D", "E", "F", "G", "J", "L", "M", "R", "T"];

static LAST_NAMES: [&str; 16] = [
    "Silva", "Costa", "Fernandez", "Muller", "Janssen", "Rossi", "Moreau", "Smith", "Jones",
    "Santos", "Garcia", "Weber", "Visser", "Bianchi", "Martin", "Lopez",
];

/// Rating profile per role: mean
/// (pace, shooting, passing, dribbling, defending, physic, heading, ball control, stamina).
struct Role {
    positions: &'static [&'static str],
    height_mean: f64,
    skills: [f64; 9],
}

static ROLES: [Role; 4] = [
    Role {
        positions: &["GK"],
        height_mean: 190.0,
        skills: [0.0; 9], // goalkeepers get blank outfield skills
    },
    Role {
        positions: &["CB", "CB, RB", "LB", "RB"],
        height_mean: 186.0,
        skills: [64.0, 45.0, 60.0, 58.0, 74.0, 74.0, 72.0, 60.0, 68.0],
    },
    Role {
        positions: &["CM", "CDM", "CAM", "CM, CAM"],
        height_mean: 179.0,
        skills: [68.0, 62.0, 74.0, 72.0, 60.0, 66.0, 58.0, 74.0, 75.0],
    },
    Role {
        positions: &["ST", "LW", "RW", "ST, LW", "CF"],
        height_mean: 180.0,
        skills: [78.0, 74.0, 66.0, 74.0, 38.0, 66.0, 66.0, 74.0, 70.0],
    },
];

fn rating(rng: &mut SimpleRng, mean: f64, boost: f64) -> String {
    let v = rng.gauss(mean + boost, 6.0).round().clamp(30.0, 99.0);
    format!("{v:.0}")
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let n_players = 250;
    let output_path = "fifa_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    for _ in 0..n_players {
        let role = rng.pick(&ROLES);
        let age = rng.range(16, 40);
        // Ratings peak in the late twenties.
        let age_boost = 8.0 - (age as f64 - 28.0).abs() * 0.8;
        let overall = rng
            .gauss(68.0 + age_boost, 5.0)
            .round()
            .clamp(45.0, 95.0) as u32;

        // Pay scales steeply with rating.
        let quality = (overall as f64 - 44.0) / 50.0;
        let wage_eur = (quality.powi(3) * 550_000.0 * rng.gauss(1.0, 0.15).max(0.3)) as u64 + 500;
        let value_eur = wage_eur * rng.range(120, 260) as u64;

        let height_cm = if rng.next_f64() < 0.01 {
            "N/A".to_string()
        } else {
            format!("{:.0}", rng.gauss(role.height_mean, 5.0).round())
        };

        let skill = |rng: &mut SimpleRng, i: usize| {
            if role.skills[i] == 0.0 {
                String::new()
            } else {
                rating(rng, role.skills[i], age_boost)
            }
        };

        let row = SampleRow {
            short_name: format!("{}. {}", rng.pick(&FIRST_INITIALS), rng.pick(&LAST_NAMES)),
            club_name: rng.pick(&CLUBS).to_string(),
            nationality_name: rng.pick(&NATIONALITIES).to_string(),
            player_positions: rng.pick(role.positions).to_string(),
            age,
            height_cm,
            wage_eur,
            value_eur,
            overall,
            pace: skill(&mut rng, 0),
            shooting: skill(&mut rng, 1),
            passing: skill(&mut rng, 2),
            dribbling: skill(&mut rng, 3),
            defending: skill(&mut rng, 4),
            physic: skill(&mut rng, 5),
            attacking_heading_accuracy: skill(&mut rng, 6),
            skill_ball_control: skill(&mut rng, 7),
            power_stamina: skill(&mut rng, 8),
        };

        writer.serialize(row).expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_players} players to {output_path}");
}
