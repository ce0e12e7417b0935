//! Console rendering of sampled results.
//!
//! Each record prints as a numbered entry: title in the default color, the
//! command in green, the optional description in blue, and the optional
//! source site in cyan. `colored` drops the escape codes on its own when
//! stdout is not a terminal.

use crate::models::ResultRecord;
use colored::Colorize;

/// Message printed when the sampled pool is empty.
const NO_RESULT: &str = "Not result found.";

/// Print the final record list to stdout.
pub fn render(records: &[ResultRecord], show_description: bool, show_source_links: bool) {
    if records.is_empty() {
        println!("{NO_RESULT}");
        return;
    }
    for (index, record) in records.iter().enumerate() {
        print!(
            "{}",
            format_record(index + 1, record, show_description, show_source_links)
        );
    }
}

/// Format one numbered entry, including its trailing newline.
fn format_record(
    number: usize,
    record: &ResultRecord,
    show_description: bool,
    show_source_links: bool,
) -> String {
    let mut out = format!("{number}: {}\n", record.title);
    out.push_str(&format!("   {}\n", record.command.green()));
    if show_description && !record.description.is_empty() {
        out.push_str(&format!("   {}\n", record.description.blue()));
    }
    if show_source_links {
        out.push_str(&format!(
            "   {}\n",
            format!("{} <{}>", record.site_name, record.site_url).cyan()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ResultRecord {
        ResultRecord {
            site_name: "commandlinefu".to_string(),
            site_url: "https://www.commandlinefu.com".to_string(),
            title: "Extract a tarball".to_string(),
            command: "tar -xzf archive.tar.gz".to_string(),
            description: "x extracts, z filters through gzip".to_string(),
        }
    }

    #[test]
    fn test_minimal_entry_shows_title_and_command() {
        colored::control::set_override(false);
        let text = format_record(1, &record(), false, false);
        assert_eq!(text, "1: Extract a tarball\n   tar -xzf archive.tar.gz\n");
    }

    #[test]
    fn test_description_flag_adds_description_line() {
        colored::control::set_override(false);
        let text = format_record(2, &record(), true, false);
        assert!(text.contains("   x extracts, z filters through gzip\n"));
    }

    #[test]
    fn test_empty_description_is_omitted_even_with_flag() {
        colored::control::set_override(false);
        let mut rec = record();
        rec.description = String::new();
        let text = format_record(1, &rec, true, false);
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_source_flag_adds_site_and_url() {
        colored::control::set_override(false);
        let text = format_record(1, &record(), false, true);
        assert!(text.contains("   commandlinefu <https://www.commandlinefu.com>\n"));
    }
}
