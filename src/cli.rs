use std::{io::Write as _, path::PathBuf};

use anyhow::{anyhow, bail, Result};
use chrono::{Duration, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::{
    commands::{data, emergency, medications, reports, settings, symptoms, vitals},
    default_data_dir,
    models::{
        format_date, format_time, today, EmergencyContacts, MedicationInput, Position,
        SymptomForm, VitalsInput,
    },
    orthostatic::commands as ortho,
    settings::SettingsUpdate,
    AppState,
};

#[derive(Parser)]
#[command(name = "pots-tracker", version, about = "Personal POTS health log")]
struct Cli {
    /// Where the tracker keeps its database and settings [env: POTS_TRACKER_DATA_DIR]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Heart rate, blood pressure, sodium and fluid
    #[command(subcommand)]
    Vitals(VitalsCommand),
    /// Symptom severity log
    #[command(subcommand)]
    Symptoms(SymptomsCommand),
    /// Medication list and doses taken
    #[command(subcommand)]
    Meds(MedsCommand),
    /// Emergency contacts and alert
    #[command(subcommand)]
    Emergency(EmergencyCommand),
    /// Guided lying/standing heart-rate test
    Ortho,
    /// Today's totals and recent activity
    Dashboard,
    /// Everything logged today
    History,
    /// Averages and adherence over the last 7 days
    Weekly,
    /// Text summary for a date range
    Report(RangeArgs),
    /// Write vitals in a date range to a CSV file
    ExportCsv {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Write every collection to a JSON backup
    Backup {
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Replace all data with a JSON backup
    Restore {
        file: PathBuf,
        /// Confirm replacing all current data
        #[arg(long)]
        yes: bool,
    },
    /// Delete all data permanently
    Clear {
        #[arg(long)]
        yes: bool,
    },
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand)]
enum VitalsCommand {
    Add {
        #[arg(long, default_value = "sitting")]
        position: Position,
        #[arg(long = "hr", default_value = "")]
        heart_rate: String,
        #[arg(long, default_value = "")]
        systolic: String,
        #[arg(long, default_value = "")]
        diastolic: String,
        /// Sodium in mg
        #[arg(long, default_value = "")]
        sodium: String,
        /// Fluid in ml
        #[arg(long, default_value = "")]
        fluid: String,
    },
    /// Log one glass of water
    Water,
    Today,
}

#[derive(Subcommand)]
enum SymptomsCommand {
    Add {
        /// NAME=SEVERITY with severity 0-5; repeat for each symptom
        #[arg(long = "symptom", value_parser = parse_severity)]
        symptoms: Vec<(String, u8)>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Today,
}

#[derive(Subcommand)]
enum MedsCommand {
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        dosage: String,
        #[arg(long, default_value = "")]
        frequency: String,
        #[arg(long, default_value = "")]
        times: String,
    },
    List,
    /// Mark a dose as taken
    Take { id: i64 },
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Doses taken today
    Log,
}

#[derive(Subcommand)]
enum EmergencyCommand {
    Set {
        #[arg(long, default_value = "")]
        contact_name: String,
        #[arg(long, default_value = "")]
        contact_phone: String,
        #[arg(long, default_value = "")]
        physician_name: String,
        #[arg(long, default_value = "")]
        physician_phone: String,
    },
    Show,
    Alert,
}

#[derive(Subcommand)]
enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        sodium_target: Option<u32>,
        #[arg(long)]
        fluid_target: Option<u32>,
        #[arg(long)]
        quick_water: Option<u32>,
        #[arg(long)]
        pots_threshold: Option<i64>,
    },
}

/// Defaults to the last week through today.
#[derive(Args)]
struct RangeArgs {
    #[arg(long)]
    start: Option<NaiveDate>,
    #[arg(long)]
    end: Option<NaiveDate>,
}

impl RangeArgs {
    fn resolve(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let end = self.end.unwrap_or_else(today);
        let start = self.start.unwrap_or(end - Duration::days(7));
        (Some(start), Some(end))
    }
}

fn parse_severity(raw: &str) -> Result<(String, u8), String> {
    let (name, level) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=SEVERITY, got `{raw}`"))?;
    let level: u8 = level
        .trim()
        .parse()
        .map_err(|_| format!("severity must be a number from 0 to 5, got `{level}`"))?;
    if level > 5 {
        return Err(format!("severity must be from 0 to 5, got {level}"));
    }
    Ok((name.trim().to_string(), level))
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let state = AppState::open(data_dir)?;

    match cli.command {
        Command::Vitals(cmd) => run_vitals(&state, cmd).await,
        Command::Symptoms(cmd) => run_symptoms(&state, cmd).await,
        Command::Meds(cmd) => run_meds(&state, cmd).await,
        Command::Emergency(cmd) => run_emergency(&state, cmd).await,
        Command::Ortho => run_orthostatic(&state).await,
        Command::Dashboard => print_dashboard(&state).await,
        Command::History => print_history(&state).await,
        Command::Weekly => print_weekly(&state).await,
        Command::Report(range) => {
            let (start, end) = range.resolve();
            let report = reports::generate_report(&state, start, end)
                .await
                .map_err(|e| anyhow!(e))?;
            print!("{}", report.render());
            Ok(())
        }
        Command::ExportCsv { range, out_dir } => {
            let (start, end) = range.resolve();
            let file = data::export_csv(&state, start, end, &out_dir)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("Exported {} reading(s) to {}", file.records, file.path.display());
            Ok(())
        }
        Command::Backup { out_dir } => {
            let file = data::backup_data(&state, &out_dir)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("Backed up {} record(s) to {}", file.records, file.path.display());
            Ok(())
        }
        Command::Restore { file, yes } => {
            if !yes {
                bail!("This will replace all current data. Re-run with --yes to continue.");
            }
            let restored = data::restore_data(&state, &file)
                .await
                .map_err(|e| anyhow!(e))?;
            println!(
                "Data restored successfully: {} vitals, {} symptom logs, {} medications, {} doses",
                restored.vitals.len(),
                restored.symptoms.len(),
                restored.medications.len(),
                restored.med_log.len()
            );
            Ok(())
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("This will delete ALL data permanently. Re-run with --yes to continue.");
            }
            data::clear_all_data(&state).await.map_err(|e| anyhow!(e))?;
            println!("All data cleared");
            Ok(())
        }
        Command::Settings(cmd) => run_settings(&state, cmd),
    }
}

async fn run_vitals(state: &AppState, cmd: VitalsCommand) -> Result<()> {
    match cmd {
        VitalsCommand::Add {
            position,
            heart_rate,
            systolic,
            diastolic,
            sodium,
            fluid,
        } => {
            let input = VitalsInput {
                position,
                heart_rate,
                systolic,
                diastolic,
                sodium,
                fluid,
            };
            vitals::log_vitals(state, input)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("Vitals logged successfully");
        }
        VitalsCommand::Water => {
            let reading = vitals::add_water(state).await.map_err(|e| anyhow!(e))?;
            println!("Added {}ml water", reading.fluid);
        }
        VitalsCommand::Today => {
            let readings = vitals::get_today_vitals(state)
                .await
                .map_err(|e| anyhow!(e))?;
            if readings.is_empty() {
                println!("No vitals logged today");
            }
            for v in readings {
                println!(
                    "{}  {:<8}  HR {:>3}  BP {}/{}  Na {}mg  Fluid {}ml",
                    format_time(v.timestamp),
                    v.position,
                    v.heart_rate,
                    v.systolic,
                    v.diastolic,
                    v.sodium,
                    v.fluid
                );
            }
        }
    }
    Ok(())
}

async fn run_symptoms(state: &AppState, cmd: SymptomsCommand) -> Result<()> {
    match cmd {
        SymptomsCommand::Add {
            symptoms: selected,
            notes,
        } => {
            let mut form = SymptomForm::new();
            for (name, level) in selected {
                form.select(name, level);
            }
            form.set_notes(notes);
            symptoms::save_symptoms(state, &mut form)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("Symptoms logged successfully");
        }
        SymptomsCommand::Today => {
            let entries = symptoms::get_today_symptoms(state)
                .await
                .map_err(|e| anyhow!(e))?;
            if entries.is_empty() {
                println!("No symptoms logged today");
            }
            for entry in entries {
                println!("{}  {}", format_time(entry.timestamp), entry.describe());
                if !entry.notes.is_empty() {
                    println!("    {}", entry.notes);
                }
            }
        }
    }
    Ok(())
}

async fn run_meds(state: &AppState, cmd: MedsCommand) -> Result<()> {
    match cmd {
        MedsCommand::Add {
            name,
            dosage,
            frequency,
            times,
        } => {
            let input = MedicationInput {
                name,
                dosage,
                frequency,
                times,
            };
            let med = medications::add_medication(state, input)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("Medication added: {} (id {})", med.name, med.id);
        }
        MedsCommand::List => {
            let meds = medications::list_medications(state)
                .await
                .map_err(|e| anyhow!(e))?;
            if meds.is_empty() {
                println!("No medications added");
            }
            for med in meds {
                println!("{}  {} {}", med.id, med.name, med.dosage);
                println!("    {} - {}", med.frequency, med.times);
            }
        }
        MedsCommand::Take { id } => {
            let entry = medications::take_medication(state, id)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("{} marked as taken", entry.name);
        }
        MedsCommand::Delete { id, yes } => {
            if !yes {
                bail!("Delete this medication? Re-run with --yes to confirm.");
            }
            medications::delete_medication(state, id)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("Medication deleted");
        }
        MedsCommand::Log => {
            let doses = medications::get_today_med_log(state)
                .await
                .map_err(|e| anyhow!(e))?;
            if doses.is_empty() {
                println!("No medications taken today");
            }
            for dose in doses {
                println!("{}  {}", format_time(dose.timestamp), dose.name);
            }
        }
    }
    Ok(())
}

async fn run_emergency(state: &AppState, cmd: EmergencyCommand) -> Result<()> {
    match cmd {
        EmergencyCommand::Set {
            contact_name,
            contact_phone,
            physician_name,
            physician_phone,
        } => {
            let contacts = EmergencyContacts {
                contact_name,
                contact_phone,
                physician_name,
                physician_phone,
            };
            emergency::save_emergency_contacts(state, contacts)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("Emergency contacts saved");
        }
        EmergencyCommand::Show => {
            match emergency::get_emergency_contacts(state)
                .await
                .map_err(|e| anyhow!(e))?
            {
                Some(c) => {
                    println!("Primary contact: {} {}", c.contact_name, c.contact_phone);
                    println!("Physician:       {} {}", c.physician_name, c.physician_phone);
                }
                None => println!("No emergency contacts saved"),
            }
        }
        EmergencyCommand::Alert => {
            let alert = emergency::trigger_emergency(state)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("{}", alert.message);
            if let Some(uri) = alert.dial_uri {
                println!("\nCall primary contact: {uri}");
            }
        }
    }
    Ok(())
}

async fn prompt<R>(lines: &mut Lines<R>, label: &str) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    print!("{label}");
    std::io::stdout().flush()?;
    lines
        .next_line()
        .await?
        .ok_or_else(|| anyhow!("input closed before the test finished"))
}

async fn run_orthostatic(state: &AppState) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    ortho::start_orthostatic_test(state)
        .await
        .map_err(|e| anyhow!(e))?;

    println!("Step 1: LYING DOWN - ENTER HEART RATE");
    loop {
        let raw = prompt(&mut lines, "Heart rate: ").await?;
        match ortho::submit_lying_heart_rate(state, &raw).await {
            Ok(_) => break,
            Err(message) => println!("{message}"),
        }
    }

    println!();
    println!("Step 2: STAND UP - WAIT 1 MINUTE");
    println!("Stand up and wait for 1 minute, then enter your heart rate");
    let outcome = loop {
        let raw = prompt(&mut lines, "Heart rate: ").await?;
        match ortho::submit_standing_heart_rate(state, &raw).await {
            Ok(outcome) => break outcome,
            Err(message) => println!("{message}"),
        }
    };

    println!();
    println!("TEST COMPLETE");
    println!("Lying HR: {} BPM", outcome.result.lying_hr);
    println!("Standing HR: {} BPM", outcome.result.standing_hr);
    println!("Increase: {} BPM", outcome.result.delta);
    println!("{}", outcome.verdict);
    Ok(())
}

async fn print_dashboard(state: &AppState) -> Result<()> {
    let dashboard = reports::get_dashboard(state)
        .await
        .map_err(|e| anyhow!(e))?;
    let day = &dashboard.today;

    println!("{}", format_date(day.date));
    match &day.current {
        Some(current) => {
            let hr = current
                .heart_rate
                .map_or_else(|| "--".to_string(), |hr| hr.to_string());
            println!("Heart rate:     {hr} BPM ({})", current.position);
            println!("Blood pressure: {}/{}", current.systolic, current.diastolic);
        }
        None => {
            println!("Heart rate:     -- BPM");
            println!("Blood pressure: --/--");
        }
    }
    println!(
        "Sodium: {}mg ({:.0}%)",
        day.sodium_total,
        day.sodium_progress * 100.0
    );
    println!(
        "Fluid:  {}ml ({:.0}%)",
        day.fluid_total,
        day.fluid_progress * 100.0
    );

    println!();
    println!("Recent activity");
    if dashboard.activity.is_empty() {
        println!("  No recent activity");
    }
    for item in &dashboard.activity {
        println!("  {}  {}", format_time(item.timestamp), item.text);
    }
    Ok(())
}

async fn print_history(state: &AppState) -> Result<()> {
    let history = reports::get_today_history(state)
        .await
        .map_err(|e| anyhow!(e))?;

    println!("{}", format_date(history.date));
    println!("Vitals: {}", history.vitals.len());
    for v in &history.vitals {
        println!(
            "  {}  HR {} BP {}/{} ({})",
            format_time(v.timestamp),
            v.heart_rate,
            v.systolic,
            v.diastolic,
            v.position
        );
    }
    println!("Symptoms: {}", history.symptoms.len());
    for s in &history.symptoms {
        println!("  {}  {}", format_time(s.timestamp), s.describe());
    }
    println!("Medications: {}", history.doses.len());
    for d in &history.doses {
        println!("  {}  {}", format_time(d.timestamp), d.name);
    }
    Ok(())
}

async fn print_weekly(state: &AppState) -> Result<()> {
    let week = reports::get_weekly_summary(state)
        .await
        .map_err(|e| anyhow!(e))?;

    match week.averages {
        Some(avg) => {
            println!("Avg heart rate:     {} BPM", avg.heart_rate);
            println!("Avg blood pressure: {}/{}", avg.systolic, avg.diastolic);
        }
        None => {
            println!("Avg heart rate:     -- BPM");
            println!("Avg blood pressure: --/--");
        }
    }
    println!("Symptom days:       {}", week.symptom_days);
    match week.adherence_percent {
        Some(percent) => println!("Med adherence:      {percent}%"),
        None => println!("Med adherence:      N/A"),
    }
    Ok(())
}

fn run_settings(state: &AppState, cmd: SettingsCommand) -> Result<()> {
    let current = match cmd {
        SettingsCommand::Show => settings::get_settings(state),
        SettingsCommand::Set {
            sodium_target,
            fluid_target,
            quick_water,
            pots_threshold,
        } => settings::update_settings(
            state,
            SettingsUpdate {
                sodium_target_mg: sodium_target,
                fluid_target_ml: fluid_target,
                quick_water_ml: quick_water,
                pots_threshold_bpm: pots_threshold,
            },
        ),
    }
    .map_err(|e| anyhow!(e))?;

    println!("Sodium target:  {}mg", current.sodium_target_mg);
    println!("Fluid target:   {}ml", current.fluid_target_ml);
    println!("Quick water:    {}ml", current.quick_water_ml);
    println!("POTS threshold: {} BPM", current.pots_threshold_bpm);
    Ok(())
}
