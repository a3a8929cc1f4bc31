use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use carediary::models::{DiaryEntry, Medication, NewMedication, SaveDiaryEntry};
use carediary::services::{care_summary, dates};
use carediary::{Config, Database};

use cli::{Cli, Command, DiaryCommand, MedCommand, MedicationArgs, PutEntryArgs};

mod cli;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayReport<'a> {
    date: String,
    relative: String,
    entry: Option<&'a DiaryEntry>,
    has_observations: bool,
    food: Option<String>,
    litter: Option<String>,
    taken_medications: Vec<&'a Medication>,
    dangling_medication_ids: Vec<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carediary=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let db = Database::new(config.clone());

    let result = run(cli.command, &db, &config).await;
    db.close().await;

    result
}

async fn run(command: Command, db: &Database, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Diary { diary_command } => run_diary(diary_command, db).await,
        Command::Med { med_command } => run_med(med_command, db).await,
        Command::Today => {
            let today = dates::today();
            let entry = db
                .diaries()
                .get_by_date(today)
                .await
                .context("Failed to load today's entry")?;
            let medications = db
                .medications()
                .get_all()
                .await
                .context("Failed to load medications")?;

            let report = day_report(today, entry.as_ref(), &medications);
            print_json(&report)
        }
        Command::Info => {
            let version = db
                .schema_version()
                .await
                .context("Failed to open database")?;
            print_json(&serde_json::json!({
                "database": config.database_url,
                "schemaVersion": version,
                "version": env!("CARGO_PKG_VERSION"),
            }))
        }
    }
}

async fn run_diary(command: DiaryCommand, db: &Database) -> anyhow::Result<()> {
    let store = db.diaries();

    match command {
        DiaryCommand::Put(args) => {
            let input = save_entry_from_args(args)?;
            let saved = store.put(input).await.context("Failed to save entry")?;
            print_json(&saved)
        }
        DiaryCommand::Show { date } => {
            let date = dates::parse_date(&date)?;
            let entry = store
                .get_by_date(date)
                .await
                .context("Failed to load entry")?;
            let medications = db
                .medications()
                .get_all()
                .await
                .context("Failed to load medications")?;

            print_json(&day_report(date, entry.as_ref(), &medications))
        }
        DiaryCommand::List { from, to } => {
            let entries = match (from, to) {
                (None, None) => store.get_all().await,
                (from, to) => {
                    let start = range_bound(from, 1, 1, 1)?;
                    let end = range_bound(to, 9999, 12, 31)?;
                    store.get_range(start, end).await
                }
            }
            .context("Failed to list entries")?;

            print_json(&entries)
        }
        DiaryCommand::Delete { date } => {
            let date = dates::parse_date(&date)?;
            store
                .delete_by_date(date)
                .await
                .context("Failed to delete entry")?;
            println!("Deleted entry for {date}");
            Ok(())
        }
    }
}

async fn run_med(command: MedCommand, db: &Database) -> anyhow::Result<()> {
    let store = db.medications();

    match command {
        MedCommand::Add(args) => {
            let created = store
                .add(new_medication_from_args(args))
                .await
                .context("Failed to add medication")?;
            print_json(&created)
        }
        MedCommand::Update { id, fields } => {
            let updated = store
                .update(id, new_medication_from_args(fields))
                .await
                .context("Failed to update medication")?;
            print_json(&updated)
        }
        MedCommand::Delete { id } => {
            store
                .delete(id)
                .await
                .context("Failed to delete medication")?;
            println!("Deleted medication {id}");
            Ok(())
        }
        MedCommand::List { medication_type } => {
            let medications = match medication_type {
                Some(t) => store.get_by_type(t).await,
                None => store.get_all().await,
            }
            .context("Failed to list medications")?;
            print_json(&medications)
        }
        MedCommand::Show { id } => {
            let medication = store
                .get_by_id(id)
                .await
                .context("Failed to load medication")?;
            match medication {
                Some(m) => print_json(&m),
                None => anyhow::bail!("Medication {id} does not exist"),
            }
        }
    }
}

fn save_entry_from_args(args: PutEntryArgs) -> anyhow::Result<SaveDiaryEntry> {
    let date = match args.date {
        Some(d) => dates::parse_date(&d)?,
        None => dates::today(),
    };

    Ok(SaveDiaryEntry {
        photo: args.photo,
        mention: args.mention.trim().to_string(),
        weight: args.weight,
        dry_food: args.dry_food,
        wet_food: args.wet_food,
        poop_count: args.poop,
        pee_count: args.pee,
        vomit_count: args.vomit,
        vomit_type: args.vomit_type,
        fluid_amount: args.fluid,
        taken_medications: args.taken_medications,
        ..SaveDiaryEntry::new(date)
    })
}

/// Stored keys are `YYYY-MM-DD` text, so open ends stay within four-digit years.
fn range_bound(
    value: Option<String>,
    year: i32,
    month: u32,
    day: u32,
) -> anyhow::Result<chrono::NaiveDate> {
    match value {
        Some(d) => Ok(dates::parse_date(&d)?),
        None => chrono::NaiveDate::from_ymd_opt(year, month, day).context("Invalid range bound"),
    }
}

fn new_medication_from_args(args: MedicationArgs) -> NewMedication {
    NewMedication {
        name: args.name,
        medication_type: args.medication_type,
        dosage: args.dosage,
        note: args.note,
    }
}

fn day_report<'a>(
    date: chrono::NaiveDate,
    entry: Option<&'a DiaryEntry>,
    medications: &'a [Medication],
) -> DayReport<'a> {
    let today = dates::today();

    DayReport {
        date: dates::format_readable(date),
        relative: dates::format_relative(date, today),
        entry,
        has_observations: entry.is_some_and(care_summary::has_recorded_observations),
        food: entry.and_then(care_summary::food_summary),
        litter: entry.and_then(care_summary::litter_summary),
        taken_medications: entry
            .map(|e| care_summary::resolve_taken_medications(e, medications))
            .unwrap_or_default(),
        dangling_medication_ids: entry
            .map(|e| care_summary::dangling_medication_ids(e, medications))
            .unwrap_or_default(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carediary::models::MedicationType;
    use chrono::{NaiveDate, Utc};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn medication(id: i64, name: &str) -> Medication {
        Medication {
            id,
            name: name.into(),
            medication_type: MedicationType::Supplement,
            dosage: None,
            note: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn open_range_ends_default_to_four_digit_years() {
        assert_eq!(range_bound(None, 1, 1, 1).unwrap(), ymd(1, 1, 1));
        assert_eq!(range_bound(None, 9999, 12, 31).unwrap(), ymd(9999, 12, 31));
        assert_eq!(
            range_bound(Some("2024-06-01".into()), 1, 1, 1).unwrap(),
            ymd(2024, 6, 1)
        );
        assert!(range_bound(Some("06/01/2024".into()), 1, 1, 1).is_err());
    }

    #[test]
    fn report_for_a_day_without_entry_is_empty() {
        let medications = vec![medication(1, "오메가3")];
        let report = day_report(ymd(2024, 1, 15), None, &medications);

        assert_eq!(report.date, "2024년 1월 15일");
        assert!(report.entry.is_none());
        assert!(!report.has_observations);
        assert!(report.food.is_none());
        assert!(report.litter.is_none());
        assert!(report.taken_medications.is_empty());
        assert!(report.dangling_medication_ids.is_empty());
    }

    #[test]
    fn report_joins_entry_with_medications() {
        let now = Utc::now();
        let entry = DiaryEntry {
            date: ymd(2024, 6, 1),
            photo: None,
            mention: String::new(),
            weight: None,
            dry_food: Some(45.0),
            wet_food: None,
            poop_count: None,
            pee_count: Some(3),
            vomit_count: None,
            vomit_type: Vec::new(),
            fluid_amount: None,
            taken_medications: vec![1, 99],
            created_at: now,
            updated_at: now,
        };
        let medications = vec![medication(1, "오메가3"), medication(2, "유산균")];

        let report = day_report(entry.date, Some(&entry), &medications);

        assert!(report.has_observations);
        assert_eq!(report.food.as_deref(), Some("건45g"));
        assert_eq!(report.litter.as_deref(), Some("💧3"));
        assert_eq!(report.taken_medications.len(), 1);
        assert_eq!(report.taken_medications[0].name, "오메가3");
        assert_eq!(report.dangling_medication_ids, vec![99]);
    }
}
