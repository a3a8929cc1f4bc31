use clap::{Args, Parser, Subcommand};

use carediary::models::MedicationType;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Manage daily diary entries
    Diary {
        #[clap(subcommand)]
        diary_command: DiaryCommand,
    },
    /// Manage the medication list
    Med {
        #[clap(subcommand)]
        med_command: MedCommand,
    },
    /// Show today's entry with the medications taken
    Today,
    /// Show database location and schema version
    Info,
}

#[derive(Subcommand, Clone)]
pub enum DiaryCommand {
    /// Save the entry for a day, replacing any existing one
    Put(PutEntryArgs),
    /// Show the entry for a day
    Show {
        /// Day to show (YYYY-MM-DD)
        date: String,
    },
    /// List entries, most recent first
    List {
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Delete the entry for a day
    Delete {
        /// Day to delete (YYYY-MM-DD)
        date: String,
    },
}

#[derive(Args, Clone)]
pub struct PutEntryArgs {
    /// Day of the entry (YYYY-MM-DD), today when omitted
    #[arg(long)]
    pub date: Option<String>,

    /// Photo as a data URI
    #[arg(long)]
    pub photo: Option<String>,

    /// Free-text note
    #[arg(long, short = 'm', default_value = "")]
    pub mention: String,

    /// Weight in kg
    #[arg(long)]
    pub weight: Option<f64>,

    /// Dry food in g
    #[arg(long)]
    pub dry_food: Option<f64>,

    /// Wet food in g
    #[arg(long)]
    pub wet_food: Option<f64>,

    /// Number of poops
    #[arg(long)]
    pub poop: Option<u32>,

    /// Number of pees
    #[arg(long)]
    pub pee: Option<u32>,

    /// Number of vomiting episodes
    #[arg(long)]
    pub vomit: Option<u32>,

    /// Vomit tag, repeatable (공복토, 사료토, 분수토)
    #[arg(long = "vomit-type")]
    pub vomit_type: Vec<String>,

    /// Fluid therapy volume in ml
    #[arg(long)]
    pub fluid: Option<f64>,

    /// Id of a medication taken, repeatable
    #[arg(long = "med")]
    pub taken_medications: Vec<i64>,
}

#[derive(Subcommand, Clone)]
pub enum MedCommand {
    /// Add a medication
    Add(MedicationArgs),
    /// Replace a medication's fields
    Update {
        /// Id of the medication
        id: i64,

        #[clap(flatten)]
        fields: MedicationArgs,
    },
    /// Delete a medication
    Delete {
        /// Id of the medication
        id: i64,
    },
    /// List medications
    List {
        /// Only list this type (prescription or supplement)
        #[arg(long = "type")]
        medication_type: Option<MedicationType>,
    },
    /// Show one medication
    Show {
        /// Id of the medication
        id: i64,
    },
}

#[derive(Args, Clone)]
pub struct MedicationArgs {
    /// Name of the medication
    pub name: String,

    /// prescription or supplement
    #[arg(long = "type", short = 't')]
    pub medication_type: MedicationType,

    /// Dosage, e.g. "1/2정"
    #[arg(long)]
    pub dosage: Option<String>,

    /// Free-form note
    #[arg(long)]
    pub note: Option<String>,
}
