//! Cross-check a JSON dump of the device database against a dump of the
//! vendor's InfoIC.dll database.
//!
//! Usage: cargo run --bin check-db -- --our-db ours.json --win-db infoic.json
//!
//! `ours.json` is the output of `minipro-query-db -a -j`. The vendor dump is
//! an array of manufacturers, each with an `ics` array of part objects.
//! Parts are matched by `name` and every field present in both is compared.

use clap::{ArgAction, Parser};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "check-db")]
#[command(about = "Compare the device database against an InfoIC.dll dump")]
struct Args {
    /// JSON dump of our device database (`minipro-query-db -a -j`)
    #[arg(long, value_name = "FILE")]
    our_db: PathBuf,

    /// JSON dump of the InfoIC.dll device database
    #[arg(long, value_name = "FILE")]
    win_db: PathBuf,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

type Part = Map<String, Value>;

/// One differing field of a part present in both databases
#[derive(Debug, Clone, PartialEq)]
struct Mismatch {
    part: String,
    field: String,
    theirs: Value,
    ours: Value,
}

#[derive(Debug, Clone, PartialEq)]
enum Finding {
    Mismatch(Mismatch),
    Missing(String),
}

/// Fields compared and fields that matched, for one key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct KeyScore {
    correct: usize,
    total: usize,
}

impl KeyScore {
    fn percent(self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.correct as f64 / self.total as f64
    }
}

#[derive(Debug, Default)]
struct Report {
    /// In vendor dump order
    findings: Vec<Finding>,
    scores: BTreeMap<String, KeyScore>,
}

impl Report {
    fn mismatch_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| matches!(f, Finding::Mismatch(_)))
            .count()
    }

    fn missing_count(&self) -> usize {
        self.findings.len() - self.mismatch_count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finding in &self.findings {
            match finding {
                Finding::Mismatch(m) => writeln!(
                    f,
                    "MISMATCH: in part <{}>, field {}: <{}> != <{}> (ours)",
                    m.part,
                    m.field,
                    plain(&m.theirs),
                    plain(&m.ours)
                )?,
                Finding::Missing(name) => writeln!(
                    f,
                    "NOT FOUND: part {} was not found in our database",
                    name
                )?,
            }
        }
        for (key, score) in &self.scores {
            writeln!(f, "{}: {:.2}% correct", key, score.percent())?;
        }
        writeln!(f, "{} mismatches", self.mismatch_count())?;
        writeln!(f, "{} parts missing", self.missing_count())
    }
}

/// Strings without their JSON quotes, everything else as JSON
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Field equality where `35` and `35.0` are the same number
fn same(theirs: &Value, ours: &Value) -> bool {
    match (theirs, ours) {
        (Value::Number(a), Value::Number(b)) if a != b => a.as_f64() == b.as_f64(),
        _ => theirs == ours,
    }
}

fn as_parts<'a>(value: &'a Value, what: &str) -> Result<Vec<&'a Part>, String> {
    let array = value
        .as_array()
        .ok_or_else(|| format!("{}: expected a JSON array", what))?;
    array
        .iter()
        .map(|item| {
            item.as_object()
                .ok_or_else(|| format!("{}: expected an array of objects", what))
        })
        .collect()
}

fn part_name<'a>(part: &'a Part, what: &str) -> Result<&'a str, String> {
    part.get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| format!("{}: part without a string \"name\"", what))
}

/// Compare every vendor part against our part of the same name
fn compare(ours: &Value, theirs: &Value) -> Result<Report, String> {
    let mut by_name: HashMap<&str, &Part> = HashMap::new();
    for part in as_parts(ours, "our database")? {
        // A later duplicate replaces the earlier entry
        by_name.insert(part_name(part, "our database")?, part);
    }

    let mut report = Report::default();
    for manufacturer in as_parts(theirs, "vendor database")? {
        let ics = manufacturer
            .get("ics")
            .ok_or("vendor database: manufacturer without \"ics\"")?;
        for their_part in as_parts(ics, "vendor database")? {
            let name = part_name(their_part, "vendor database")?;
            let Some(our_part) = by_name.get(name) else {
                report.findings.push(Finding::Missing(name.to_string()));
                continue;
            };

            for (field, their_value) in their_part {
                let Some(our_value) = our_part.get(field) else {
                    continue;
                };
                let score = report.scores.entry(field.clone()).or_default();
                score.total += 1;
                if same(their_value, our_value) {
                    score.correct += 1;
                } else {
                    report.findings.push(Finding::Mismatch(Mismatch {
                        part: name.to_string(),
                        field: field.clone(),
                        theirs: their_value.clone(),
                        ours: our_value.clone(),
                    }));
                }
            }
        }
    }
    Ok(report)
}

fn load(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("Cannot parse {}: {}", path.display(), e))?;
    log::debug!("Loaded {}", path.display());
    Ok(value)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let ours = load(&args.our_db)?;
    let theirs = load(&args.win_db)?;

    let report = compare(&ours, &theirs)?;
    log::info!(
        "Compared {} fields over {} keys",
        report.scores.values().map(|s| s.total).sum::<usize>(),
        report.scores.len()
    );
    if report.missing_count() > 0 {
        log::warn!(
            "{} vendor parts have no entry in our database",
            report.missing_count()
        );
    }

    print!("{}", report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    fn ours() -> Value {
        json!([
            {
                "name": "AT24C01",
                "protocol_id": 3,
                "code_memory_size": 128,
                "chip_id": "",
                "has_fuses": false
            },
            {
                "name": "ATMEGA8",
                "protocol_id": 35,
                "code_memory_size": 8192,
                "chip_id": "1e9307",
                "has_fuses": true
            }
        ])
    }

    fn vendor() -> Value {
        json!([
            {
                "name": "Atmel",
                "ics": [
                    { "name": "AT24C01", "protocol_id": 3, "code_memory_size": 256 },
                    { "name": "ATMEGA8", "protocol_id": 35.0, "code_memory_size": 8192,
                      "chip_id": "1e9307", "vendor_only": 7 },
                    { "name": "AT24C1024", "protocol_id": 3 }
                ]
            }
        ])
    }

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_mismatch_reported() {
        let report = compare(&ours(), &vendor()).unwrap();
        assert_eq!(report.mismatch_count(), 1);
        assert_eq!(
            report.findings[0],
            Finding::Mismatch(Mismatch {
                part: "AT24C01".into(),
                field: "code_memory_size".into(),
                theirs: json!(256),
                ours: json!(128),
            })
        );
    }

    #[test]
    fn test_missing_part_reported() {
        let report = compare(&ours(), &vendor()).unwrap();
        assert_eq!(report.missing_count(), 1);
        assert_eq!(
            report.findings.last(),
            Some(&Finding::Missing("AT24C1024".into()))
        );
    }

    #[test]
    fn test_key_percentages() {
        let report = compare(&ours(), &vendor()).unwrap();
        let scores: Vec<(&str, KeyScore)> = report
            .scores
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        // Fields only one side has are not scored
        assert_eq!(
            scores,
            [
                ("chip_id", KeyScore { correct: 1, total: 1 }),
                ("code_memory_size", KeyScore { correct: 1, total: 2 }),
                ("name", KeyScore { correct: 2, total: 2 }),
                ("protocol_id", KeyScore { correct: 2, total: 2 }),
            ]
        );
        assert_eq!(report.scores["code_memory_size"].percent(), 50.0);
    }

    #[test]
    fn test_report_text() {
        let out = compare(&ours(), &vendor()).unwrap().to_string();
        assert_eq!(
            out,
            "MISMATCH: in part <AT24C01>, field code_memory_size: <256> != <128> (ours)\n\
             NOT FOUND: part AT24C1024 was not found in our database\n\
             chip_id: 100.00% correct\n\
             code_memory_size: 50.00% correct\n\
             name: 100.00% correct\n\
             protocol_id: 100.00% correct\n\
             1 mismatches\n\
             1 parts missing\n"
        );
    }

    #[test]
    fn test_string_fields_print_unquoted() {
        let theirs = json!([{ "ics": [{ "name": "X", "chip_id": "1e93" }] }]);
        let ours = json!([{ "name": "X", "chip_id": "1e92" }]);
        let out = compare(&ours, &theirs).unwrap().to_string();
        assert!(out.starts_with("MISMATCH: in part <X>, field chip_id: <1e93> != <1e92> (ours)\n"));
    }

    #[test]
    fn test_malformed_dumps_rejected() {
        assert!(compare(&json!({}), &vendor()).is_err());
        assert!(compare(&ours(), &json!([{ "name": "Atmel" }])).is_err());
        assert!(compare(&json!([{ "protocol_id": 3 }]), &vendor()).is_err());
    }
}
