use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Player, PlayerDataset, coerce_numeric};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Columns every source file must provide. Cell values may still be blank or
/// unparsable; only a missing column (or an empty table) aborts the load.
pub const REQUIRED_COLUMNS: [&str; 18] = [
    "short_name",
    "club_name",
    "nationality_name",
    "player_positions",
    "age",
    "height_cm",
    "wage_eur",
    "value_eur",
    "overall",
    "pace",
    "shooting",
    "passing",
    "dribbling",
    "defending",
    "physic",
    "attacking_heading_accuracy",
    "skill_ball_control",
    "power_stamina",
];

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("dataset contains no player rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a player dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the columns (the usual distribution format)
/// * `.json`    – `[{ "short_name": ..., "age": ..., ... }, ...]`
/// * `.parquet` – flat columnar file with the same column names
pub fn load_file(path: &Path) -> Result<PlayerDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Assemble a [`Player`] from per-column accessors shared by all loaders.
fn player_from_cells(
    text: impl Fn(&'static str) -> Option<String>,
    num: impl Fn(&'static str) -> Option<f64>,
) -> Player {
    Player {
        short_name: text("short_name").unwrap_or_default(),
        club_name: text("club_name"),
        nationality_name: text("nationality_name"),
        player_positions: text("player_positions"),
        age: num("age"),
        height_cm: num("height_cm"),
        wage_eur: num("wage_eur"),
        value_eur: num("value_eur"),
        overall: num("overall"),
        pace: num("pace"),
        shooting: num("shooting"),
        passing: num("passing"),
        dribbling: num("dribbling"),
        defending: num("defending"),
        physic: num("physic"),
        attacking_heading_accuracy: num("attacking_heading_accuracy"),
        skill_ball_control: num("skill_ball_control"),
        power_stamina: num("power_stamina"),
    }
}

fn finish(players: Vec<Player>) -> Result<PlayerDataset> {
    let dataset = PlayerDataset::from_players(players);
    if dataset.is_empty() {
        return Err(SchemaError::Empty.into());
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<PlayerDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV from any reader (kept separate from [`load_csv`] so tests can
/// feed in-memory bytes).
fn read_csv<R: Read>(input: R) -> Result<PlayerDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = column_indices(&headers)?;

    let mut players = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        players.push(player_from_cells(
            |name| {
                record
                    .get(col[name])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
            },
            |name| record.get(col[name]).and_then(coerce_numeric),
        ));
    }
    finish(players)
}

/// Map every required column name to its position in the header row.
fn column_indices(headers: &[String]) -> Result<BTreeMap<&'static str, usize>, SchemaError> {
    REQUIRED_COLUMNS
        .iter()
        .map(|&name| {
            headers
                .iter()
                .position(|h| h == name)
                .map(|i| (name, i))
                .ok_or(SchemaError::MissingColumn(name))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "short_name": "A. Striker",
///     "club_name": "Arsenal",
///     "age": 24,
///     "pace": "88",
///     ...
///   },
///   ...
/// ]
/// ```
///
/// Numeric cells may be JSON numbers or strings; either way a failed parse
/// becomes a null cell rather than an error.
fn load_json(path: &Path) -> Result<PlayerDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    // The schema check runs against the first record; later records with
    // dropped keys just yield null cells.
    if let Some(first) = records.first() {
        let obj = first.as_object().context("Row 0 is not a JSON object")?;
        for &name in &REQUIRED_COLUMNS {
            if !obj.contains_key(name) {
                return Err(SchemaError::MissingColumn(name).into());
            }
        }
    }

    let mut players = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        players.push(player_from_cells(
            |name| {
                obj.get(name)
                    .and_then(JsonValue::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
            },
            |name| json_numeric(obj.get(name)),
        ));
    }
    finish(players)
}

/// A numeric JSON cell: a number, a numeric string, or null on anything else.
fn json_numeric(val: Option<&JsonValue>) -> Option<f64> {
    match val? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => coerce_numeric(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet file of player rows.
///
/// Categorical columns must be string-typed; numeric columns may be any Arrow
/// integer/float type, or strings that go through the same lenient coercion
/// as CSV cells.  Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<PlayerDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut players = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut cols: BTreeMap<&'static str, Arc<dyn Array>> = BTreeMap::new();
        for &name in &REQUIRED_COLUMNS {
            let idx = schema
                .index_of(name)
                .map_err(|_| SchemaError::MissingColumn(name))?;
            cols.insert(name, batch.column(idx).clone());
        }

        for row in 0..batch.num_rows() {
            players.push(player_from_cells(
                |name| extract_text(&cols[name], row),
                |name| extract_numeric(&cols[name], row),
            ));
        }
    }
    finish(players)
}

// -- Arrow helpers --

/// Read a string cell from an Arrow column; null or blank becomes `None`.
fn extract_text(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let s = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }?;
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Read a numeric cell from an Arrow column; strings go through
/// [`coerce_numeric`], anything unreadable becomes `None`.
fn extract_numeric(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .and_then(|a| coerce_numeric(a.value(row))),
        DataType::LargeUtf8 => coerce_numeric(col.as_string::<i64>().value(row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterCriteria, dense_rows, filtered_indices};
    use crate::data::model::NumericField;

    const HEADER: &str = "short_name,club_name,nationality_name,player_positions,age,\
                          height_cm,wage_eur,value_eur,overall,pace,shooting,passing,\
                          dribbling,defending,physic,attacking_heading_accuracy,\
                          skill_ball_control,power_stamina";

    fn csv_data(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        out.push_str(&rows.join("\n"));
        out
    }

    #[test]
    fn read_csv_parses_rows_in_order() {
        let data = csv_data(&[
            "L. Messi,PSG,Argentina,RW,34,170,320000,78000000,93,85,92,91,95,34,65,70,96,72",
            "C. Ronaldo,Man Utd,Portugal,ST,36,187,270000,45000000,91,87,93,80,88,35,77,90,88,74",
        ]);
        let ds = read_csv(data.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.players[0].short_name, "L. Messi");
        assert_eq!(ds.players[0].club_name.as_deref(), Some("PSG"));
        assert_eq!(ds.players[1].age, Some(36.0));
        assert_eq!(ds.age_bounds(), (34, 36));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let data = "short_name,age\nL. Messi,34\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("club_name"), "{err}");
    }

    #[test]
    fn empty_table_is_fatal() {
        let data = csv_data(&[]);
        let err = read_csv(data.trim_end().as_bytes()).unwrap_err();
        assert!(err.downcast_ref::<SchemaError>().is_some(), "{err}");
    }

    #[test]
    fn unparsable_cell_becomes_null_but_keeps_the_row() {
        let data = csv_data(&[
            "GK One,Ajax,NL,GK,28,190,50000,9000000,80,N/A,,55,60,30,80,40,50,45",
            "Winger,Ajax,NL,LW,22,176,40000,12000000,78,90,70,72,84,40,60,55,82,80",
        ]);
        let ds = read_csv(data.as_bytes()).unwrap();
        assert_eq!(ds.players[0].pace, None);
        assert_eq!(ds.players[0].shooting, None);

        // The row still passes the filter; only the dense view drops it.
        let criteria = FilterCriteria {
            age_min: 0,
            age_max: 100,
            ..FilterCriteria::default()
        };
        let indices = filtered_indices(&ds, &criteria);
        assert_eq!(indices, vec![0, 1]);

        let visible: Vec<&Player> = indices.iter().map(|&i| &ds.players[i]).collect();
        let dense = dense_rows(&visible, &[NumericField::Pace]);
        assert_eq!(dense.len(), 1);
        assert_eq!(dense[0].short_name, "Winger");
    }

    #[test]
    fn json_records_load_with_numbers_or_numeric_strings() {
        let dir = std::env::temp_dir().join("scout_bench_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("players.json");
        std::fs::write(
            &path,
            r#"[{
                "short_name": "A. Striker", "club_name": "Arsenal",
                "nationality_name": "England", "player_positions": "ST",
                "age": 24, "height_cm": 180, "wage_eur": 100000,
                "value_eur": 20000000, "overall": 84, "pace": "88",
                "shooting": 85, "passing": 70, "dribbling": 82,
                "defending": 40, "physic": 75,
                "attacking_heading_accuracy": 80, "skill_ball_control": 83,
                "power_stamina": "not a number"
            }]"#,
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.players[0].pace, Some(88.0));
        assert_eq!(ds.players[0].power_stamina, None);
    }

    #[test]
    fn json_missing_column_is_fatal() {
        let dir = std::env::temp_dir().join("scout_bench_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, r#"[{"short_name": "A"}]"#).unwrap();
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(load_file(Path::new("players.xlsx")).is_err());
    }
}
