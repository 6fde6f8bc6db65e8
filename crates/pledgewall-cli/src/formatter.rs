//! Output formatters for wall pages, stats and certificates.

use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use comfy_table::{Cell, Table};
use pledgewall_core::query::describe_age;
use pledgewall_core::{FormValidation, Pledge, PledgeStats, PublicPledge, WallPage};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter: Send + Sync {
    /// Format one page of the public wall.
    fn format_wall(&self, page: &WallPage, now: DateTime<Utc>) -> String;

    /// Format the impact dashboard numbers.
    fn format_stats(&self, stats: &PledgeStats, target: u64) -> String;

    /// Format the certificate for a pledge.
    fn format_certificate(&self, pledge: &Pledge) -> String;

    /// Format form validation failures.
    fn format_validation(&self, validation: &FormValidation) -> String;

    /// Format a single-column listing.
    fn format_list(&self, header: &str, items: &[String]) -> String;

    /// Format an error message.
    fn format_error(&self, error: &str) -> String;

    /// Format a simple message.
    fn format_message(&self, message: &str) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_wall(&self, page: &WallPage, now: DateTime<Utc>) -> String {
        if page.pledges.is_empty() {
            return "No pledges found".to_string();
        }

        let mut table = Table::new();
        table.set_header(vec!["ID", "Name", "State", "Profile", "Commitments", "Stars", "Taken"]);
        for pledge in &page.pledges {
            table.add_row(vec![
                Cell::new(pledge.id.as_str()),
                Cell::new(&pledge.name),
                Cell::new(&pledge.state),
                Cell::new(pledge.profile_type.as_str()),
                Cell::new(pledge.commitments.len()),
                Cell::new(render_stars(pledge.stars)),
                Cell::new(describe_age(pledge.timestamp, now)),
            ]);
        }

        format!(
            "{}\nPage {} of {} ({} pledge(s))",
            table,
            page.page,
            page.total_pages.max(1),
            page.total_matches
        )
    }

    fn format_stats(&self, stats: &PledgeStats, target: u64) -> String {
        let mut table = Table::new();
        table.set_header(vec!["Metric", "Value"]);
        table.add_row(vec![Cell::new("Total pledges"), Cell::new(stats.total)]);
        table.add_row(vec![Cell::new("Students"), Cell::new(stats.students)]);
        table.add_row(vec![
            Cell::new("Working professionals"),
            Cell::new(stats.working_professionals),
        ]);
        table.add_row(vec![Cell::new("Others"), Cell::new(stats.others)]);
        table.add_row(vec![Cell::new("Workshops"), Cell::new(stats.workshops)]);
        table.add_row(vec![
            Cell::new(format!("Progress to {}", target)),
            Cell::new(format!("{:.2}%", stats.progress_percent(target))),
        ]);
        table.to_string()
    }

    fn format_certificate(&self, pledge: &Pledge) -> String {
        let lines = [
            "Climate Action Champion".to_string(),
            "Certificate of Commitment".to_string(),
            String::new(),
            "This certifies that".to_string(),
            pledge.name.clone(),
            "has pledged to take climate action by committing to".to_string(),
            format!("{} sustainable practices", pledge.commitments.len()),
            String::new(),
            "Cool Enough to Care!".to_string(),
            render_stars(pledge.stars),
            "Love for Planet Rating".to_string(),
            String::new(),
            format!("Pledge ID: {}", pledge.id),
            format!("Date: {}", pledge.timestamp.format("%-d %B %Y")),
        ];

        let mut commitments = Table::new();
        commitments.set_header(vec!["Commitments"]);
        for commitment in &pledge.commitments {
            commitments.add_row(vec![commitment.as_str()]);
        }

        format!("{}\n\n{}", lines.join("\n"), commitments)
    }

    fn format_validation(&self, validation: &FormValidation) -> String {
        let mut table = Table::new();
        table.set_header(vec!["Field", "Error"]);
        for (field, message) in validation.messages() {
            table.add_row(vec![field.as_str().to_string(), message]);
        }
        table.to_string()
    }

    fn format_list(&self, header: &str, items: &[String]) -> String {
        let mut table = Table::new();
        table.set_header(vec![header]);
        for item in items {
            table.add_row(vec![item]);
        }
        table.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_wall(&self, page: &WallPage, _now: DateTime<Utc>) -> String {
        serde_json::to_string_pretty(page).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_stats(&self, stats: &PledgeStats, target: u64) -> String {
        let mut value = serde_json::to_value(stats).unwrap_or(serde_json::Value::Null);
        if let serde_json::Value::Object(map) = &mut value {
            map.insert("target".to_string(), target.into());
            if let Some(progress) = serde_json::Number::from_f64(stats.progress_percent(target)) {
                map.insert("progressPercent".to_string(), serde_json::Value::Number(progress));
            }
        }
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_certificate(&self, pledge: &Pledge) -> String {
        serde_json::to_string_pretty(&pledge.to_public()).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_validation(&self, validation: &FormValidation) -> String {
        serde_json::json!({
            "valid": validation.is_valid(),
            "errors": validation.messages(),
        })
        .to_string()
    }

    fn format_list(&self, _header: &str, items: &[String]) -> String {
        serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({
            "error": error
        })
        .to_string()
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({
            "message": message
        })
        .to_string()
    }
}

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_wall(&self, page: &WallPage, _now: DateTime<Utc>) -> String {
        let mut output = String::from("id,name,state,profileType,commitments,stars,timestamp\n");
        for pledge in &page.pledges {
            output.push_str(&pledge_csv_row(pledge));
            output.push('\n');
        }
        output
    }

    fn format_stats(&self, stats: &PledgeStats, target: u64) -> String {
        format!(
            "total,students,workingProfessionals,others,workshops,target,progressPercent\n{},{},{},{},{},{},{:.4}\n",
            stats.total,
            stats.students,
            stats.working_professionals,
            stats.others,
            stats.workshops,
            target,
            stats.progress_percent(target)
        )
    }

    fn format_certificate(&self, pledge: &Pledge) -> String {
        format!(
            "id,name,state,profileType,commitments,stars,timestamp\n{}\n",
            pledge_csv_row(&pledge.to_public())
        )
    }

    fn format_validation(&self, validation: &FormValidation) -> String {
        let mut output = String::from("field,error\n");
        for (field, message) in validation.messages() {
            output.push_str(&format!("{},\"{}\"\n", field, escape_csv(&message)));
        }
        output
    }

    fn format_list(&self, header: &str, items: &[String]) -> String {
        let mut output = format!("{}\n", header);
        for item in items {
            output.push_str(&format!("\"{}\"\n", escape_csv(item)));
        }
        output
    }

    fn format_error(&self, error: &str) -> String {
        format!("error\n\"{}\"", escape_csv(error))
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}

/// One pledge as a CSV row. Commitments are joined with `;`.
fn pledge_csv_row(pledge: &PublicPledge) -> String {
    let commitments: Vec<&str> = pledge.commitments.iter().map(|c| c.as_str()).collect();
    format!(
        "{},\"{}\",\"{}\",\"{}\",\"{}\",{},{}",
        pledge.id,
        escape_csv(&pledge.name),
        escape_csv(&pledge.state),
        pledge.profile_type,
        escape_csv(&commitments.join(";")),
        pledge.stars,
        pledge.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Render a star rating.
fn render_stars(count: u8) -> String {
    "★".repeat(usize::from(count))
}

/// Escape a string for CSV.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pledgewall_core::{Commitment, PledgeDraft, PledgeId, ProfileType};

    fn pledge() -> Pledge {
        Pledge::from_draft(
            PledgeId::from_sequence(12),
            PledgeDraft {
                name: "Navya \"Nav\" Rao".to_string(),
                email: "navya@example.com".to_string(),
                mobile: "9812345678".to_string(),
                state: "Odisha".to_string(),
                profile_type: ProfileType::WorkingProfessional,
                commitments: vec![Commitment::UsePublicTransport, Commitment::RecycleAndCompost],
            },
            Utc.with_ymd_and_hms(2024, 1, 26, 6, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("hello"), "hello");
        assert_eq!(escape_csv("hello, world"), "hello, world");
        assert_eq!(escape_csv("say \"hi\""), "say \"\"hi\"\"");
    }

    #[test]
    fn test_render_stars() {
        assert_eq!(render_stars(3), "★★★");
        assert_eq!(render_stars(5).chars().count(), 5);
    }

    #[test]
    fn test_csv_row() {
        let row = pledge_csv_row(&pledge().to_public());
        assert_eq!(
            row,
            "CLP-0012,\"Navya \"\"Nav\"\" Rao\",\"Odisha\",\"Working Professional\",\"Use public transport;Recycle & compost\",3,2024-01-26T06:00:00.000Z"
        );
    }

    #[test]
    fn test_table_certificate_mentions_practices() {
        let text = TableFormatter.format_certificate(&pledge());
        assert!(text.contains("Certificate of Commitment"));
        assert!(text.contains("2 sustainable practices"));
        assert!(text.contains("Pledge ID: CLP-0012"));
        assert!(text.contains("Date: 26 January 2024"));
    }

    #[test]
    fn test_json_certificate_hides_contact() {
        let text = JsonFormatter.format_certificate(&pledge());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["id"], "CLP-0012");
        assert!(value.get("email").is_none());
        assert!(value.get("mobile").is_none());
    }

    #[test]
    fn test_json_stats_include_progress() {
        let stats = PledgeStats {
            total: 500,
            ..Default::default()
        };
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_stats(&stats, 1000)).unwrap();
        assert_eq!(value["total"], 500);
        assert_eq!(value["target"], 1000);
        assert_eq!(value["progressPercent"], 50.0);
    }
}
