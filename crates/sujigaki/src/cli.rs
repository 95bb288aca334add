//! Command-line interface: inspect, build, export.
//!
//! Each subcommand is one pipeline run end to end. Nothing is cached between
//! invocations; the roster and template files are the whole state.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;

use sujigaki_render::{
    export_csv, export_xlsx, ColumnSpec, DrawBackend, PageChrome, PdfBackend, RenderError,
    TableSpec, TextBackend,
};

use crate::config::ScenarioConfig;
use crate::error::ScenarioError;
use crate::merge::{SubstitutionMap, LEAD_SEPARATOR};
use crate::session::{ColumnRole, Session};
use crate::template::{load_template_path, FIELD_TITLES};

/// Meeting scenario generator: roster + script template in, paginated
/// scenario document out.
#[derive(Debug, Parser)]
#[command(name = "sujigaki", version, about)]
pub struct Cli {
    /// Optional YAML file overriding marker glyphs and column keywords.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show resolved column roles and classification counts for a roster.
    Inspect {
        /// Attendee roster CSV.
        roster: PathBuf,

        #[command(flatten)]
        columns: ColumnOverrides,
    },
    /// Render the scenario document (PDF or plain text).
    Build {
        #[command(flatten)]
        inputs: ScenarioInputs,

        /// Output file.
        #[arg(short, long, value_name = "PATH")]
        out: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = BuildFormat::Pdf)]
        format: BuildFormat,

        /// TrueType/OpenType font file for PDF output.
        #[arg(long, value_name = "PATH", default_value = "IPAexGothic.ttf")]
        font: PathBuf,
    },
    /// Export the merged rows as a spreadsheet.
    Export {
        #[command(flatten)]
        inputs: ScenarioInputs,

        /// Output file.
        #[arg(short, long, value_name = "PATH")]
        out: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,
    },
}

/// Inputs shared by `build` and `export`.
#[derive(Debug, Args)]
pub struct ScenarioInputs {
    /// Attendee roster CSV.
    #[arg(long, value_name = "PATH")]
    pub roster: PathBuf,

    /// Script template CSV (time, owner, prep, content).
    #[arg(long, value_name = "PATH")]
    pub template: PathBuf,

    /// Meeting label for the page header, e.g. "第56回例会".
    #[arg(long, value_name = "LABEL")]
    pub meeting: Option<String>,

    /// Event date (YYYY-MM-DD) for the page header.
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// MC name; repeat the flag for co-hosts.
    #[arg(long = "host", value_name = "NAME")]
    pub hosts: Vec<String>,

    /// Timekeeper name.
    #[arg(long, value_name = "NAME")]
    pub timekeeper: Option<String>,

    #[command(flatten)]
    pub columns: ColumnOverrides,
}

/// Manual column-role overrides for rosters the keyword heuristics miss.
#[derive(Debug, Default, Args)]
pub struct ColumnOverrides {
    /// Roster column holding attendee names.
    #[arg(long, value_name = "COLUMN")]
    pub name_column: Option<String>,

    /// Roster column holding the status tag (★, ゲスト, …).
    #[arg(long, value_name = "COLUMN")]
    pub status_column: Option<String>,

    /// Roster column holding the introducer.
    #[arg(long, value_name = "COLUMN")]
    pub introducer_column: Option<String>,

    /// Roster column holding the company name.
    #[arg(long, value_name = "COLUMN")]
    pub company_column: Option<String>,

    /// Roster column holding the after-party opt-in.
    #[arg(long, value_name = "COLUMN")]
    pub after_party_column: Option<String>,
}

impl ColumnOverrides {
    fn apply(&self, session: &mut Session) -> Result<(), ScenarioError> {
        let overrides = [
            (ColumnRole::Name, &self.name_column),
            (ColumnRole::Status, &self.status_column),
            (ColumnRole::Introducer, &self.introducer_column),
            (ColumnRole::Company, &self.company_column),
            (ColumnRole::AfterParty, &self.after_party_column),
        ];
        for (role, column) in overrides {
            if column.is_some() {
                session.set_role(role, column.clone())?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BuildFormat {
    Pdf,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

/// The script table geometry, in display cells. Proportions follow the
/// printed form: two narrow label columns, a prep column, and a wide
/// content column.
pub fn script_table_spec() -> TableSpec {
    TableSpec::builder()
        .column(ColumnSpec::centered(FIELD_TITLES[0], 8))
        .column(ColumnSpec::centered(FIELD_TITLES[1], 8))
        .column(ColumnSpec::wrapped(FIELD_TITLES[2], 24))
        .column(ColumnSpec::wrapped(FIELD_TITLES[3], 72))
        .build()
}

/// Page header chrome from the meeting label and date.
pub fn page_chrome(meeting: Option<&str>, date: Option<&str>) -> PageChrome {
    let title = match meeting {
        Some(label) => format!("{label} 進行シナリオ"),
        None => "進行シナリオ".to_string(),
    };
    let mut chrome = PageChrome::titled(title);
    if let Some(date) = date {
        chrome = chrome.subtitle(format_date(date));
    }
    chrome
}

/// `YYYY-MM-DD` formatted as `YYYY年M月D日`; anything else passes through
/// verbatim so free-form labels like "令和8年度" still work.
fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%Y年%-m月%-d日").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ScenarioConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Inspect { roster, columns } => inspect(&config, &roster, &columns),
        Command::Build {
            inputs,
            out,
            format,
            font,
        } => build(&config, &inputs, &out, format, &font),
        Command::Export {
            inputs,
            out,
            format,
        } => export(&config, &inputs, &out, format),
    }
}

fn load_session(
    config: &ScenarioConfig,
    roster: &Path,
    columns: &ColumnOverrides,
) -> Result<Session, ScenarioError> {
    let mut session =
        Session::with_config(config.markers.clone(), config.keywords.clone());
    session.load_roster_path(roster)?;
    columns.apply(&mut session)?;
    Ok(session)
}

fn report_summary(session: &Session) {
    let summary = session.summary();
    let resolved = |ok: bool, name: &str| {
        if ok {
            name.to_string()
        } else {
            format!("{name}（未定）")
        }
    };
    eprintln!(
        "{} リーダー {} 名 / ゲスト {} 名 / 懇親会 {} 名 / {} / {}",
        style("classified:").green().bold(),
        summary.leads,
        summary.guests,
        summary.after_party,
        resolved(summary.representative_resolved, "代表"),
        resolved(summary.flag_bearer_resolved, "旗手"),
    );
}

fn inspect(
    config: &ScenarioConfig,
    roster: &Path,
    columns: &ColumnOverrides,
) -> anyhow::Result<()> {
    let session = load_session(config, roster, columns)?;
    let roles = session.roles();
    let show = |col: &Option<String>| col.as_deref().unwrap_or("(none)").to_string();

    println!("{}", style("column roles").bold());
    println!("  name:        {}", show(&roles.name));
    println!("  status:      {}", show(&roles.status));
    println!("  introducer:  {}", show(&roles.introducer));
    println!("  company:     {}", show(&roles.company));
    println!("  after-party: {}", show(&roles.after_party));
    report_summary(&session);
    Ok(())
}

fn merged_session(
    config: &ScenarioConfig,
    inputs: &ScenarioInputs,
) -> anyhow::Result<Session> {
    let mut session = load_session(config, &inputs.roster, &inputs.columns)?;
    report_summary(&session);

    let template = load_template_path(&inputs.template)?;
    let mut subs = SubstitutionMap::from_facts(session.facts());
    subs.set("hosts", inputs.hosts.join(LEAD_SEPARATOR));
    if let Some(tk) = &inputs.timekeeper {
        subs.set("timekeeper", tk.clone());
    }
    session.merge_template(&template, &subs);
    Ok(session)
}

fn row_cells(session: &Session) -> Vec<Vec<String>> {
    session.rows().iter().map(|r| r.to_cells()).collect()
}

fn build(
    config: &ScenarioConfig,
    inputs: &ScenarioInputs,
    out: &Path,
    format: BuildFormat,
    font: &Path,
) -> anyhow::Result<()> {
    let session = merged_session(config, inputs)?;
    let spec = script_table_spec();
    let chrome = page_chrome(inputs.meeting.as_deref(), inputs.date.as_deref());
    let rows = row_cells(&session);

    let bytes = match format {
        BuildFormat::Pdf => {
            let backend = PdfBackend::new(font);
            match backend.render(&spec, &chrome, &rows) {
                Ok(bytes) => bytes,
                Err(err @ RenderError::FontUnavailable { .. }) => {
                    eprintln!(
                        "{} {err}\n{}",
                        style("error:").red().bold(),
                        "hint: place the font file next to the binary, pass --font, \
                         or use `sujigaki export` for a font-free spreadsheet"
                    );
                    return Err(err.into());
                }
                Err(err) => return Err(err.into()),
            }
        }
        BuildFormat::Text => TextBackend::new().render(&spec, &chrome, &rows)?,
    };

    std::fs::write(out, &bytes).with_context(|| format!("writing {}", out.display()))?;
    eprintln!(
        "{} {} rows -> {}",
        style("built:").green().bold(),
        session.rows().len(),
        out.display()
    );
    Ok(())
}

fn export(
    config: &ScenarioConfig,
    inputs: &ScenarioInputs,
    out: &Path,
    format: ExportFormat,
) -> anyhow::Result<()> {
    let session = merged_session(config, inputs)?;
    let rows = row_cells(&session);

    let bytes = match format {
        ExportFormat::Xlsx => export_xlsx(&FIELD_TITLES, &rows)?,
        ExportFormat::Csv => export_csv(&FIELD_TITLES, &rows)?,
    };

    std::fs::write(out, &bytes).with_context(|| format!("writing {}", out.display()))?;
    eprintln!(
        "{} {} rows -> {}",
        style("exported:").green().bold(),
        session.rows().len(),
        out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_parses_repeated_hosts() {
        let cli = Cli::parse_from([
            "sujigaki",
            "build",
            "--roster",
            "r.csv",
            "--template",
            "t.csv",
            "--out",
            "out.pdf",
            "--host",
            "桜井 有里",
            "--host",
            "神田橋 あずさ",
            "--date",
            "2026-09-05",
        ]);
        match cli.command {
            Command::Build { inputs, format, .. } => {
                assert_eq!(inputs.hosts.len(), 2);
                assert_eq!(format, BuildFormat::Pdf);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn inspect_accepts_column_overrides() {
        let cli = Cli::parse_from([
            "sujigaki",
            "inspect",
            "roster.csv",
            "--name-column",
            "会員氏名",
        ]);
        match cli.command {
            Command::Inspect { columns, .. } => {
                assert_eq!(columns.name_column.as_deref(), Some("会員氏名"));
                assert!(columns.status_column.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn export_defaults_to_xlsx() {
        let cli = Cli::parse_from([
            "sujigaki", "export", "--roster", "r.csv", "--template", "t.csv", "--out", "o.xlsx",
        ]);
        match cli.command {
            Command::Export { format, .. } => assert_eq!(format, ExportFormat::Xlsx),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn iso_dates_format_as_japanese() {
        assert_eq!(format_date("2026-09-05"), "2026年9月5日");
        assert_eq!(format_date("第56回例会当日"), "第56回例会当日");
    }

    #[test]
    fn chrome_title_includes_meeting_label() {
        let chrome = page_chrome(Some("第56回例会"), Some("2026-09-05"));
        assert_eq!(chrome.title, "第56回例会 進行シナリオ");
        assert_eq!(chrome.subtitle.as_deref(), Some("2026年9月5日"));
        let plain = page_chrome(None, None);
        assert_eq!(plain.title, "進行シナリオ");
        assert!(plain.subtitle.is_none());
    }

    #[test]
    fn table_spec_matches_field_titles() {
        let spec = script_table_spec();
        assert_eq!(spec.titles(), FIELD_TITLES);
    }
}
