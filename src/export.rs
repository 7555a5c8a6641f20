use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::{Result, ScrapeError};
use crate::models::Dataset;

const HEADER: &str = "company_name,employee_count,sector,headquarters,website_url,linkedin_url,facebook_url,twitter_url,instagram_url";

/// Serializes the dataset to a CSV file, creating or overwriting it.
/// Unknown values become empty cells.
pub fn export_csv(dataset: &Dataset, path: &str) -> Result<()> {
    let write_err = |source| ScrapeError::Write {
        path: path.to_string(),
        source,
    };

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let mut file = File::create(path).map_err(write_err)?;
    writeln!(file, "{}", HEADER).map_err(write_err)?;

    for record in &dataset.records {
        let employee_count = record
            .employee_count
            .map(|n| n.to_string())
            .unwrap_or_default();
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{}",
            csv_field(&record.name),
            csv_field(&employee_count),
            csv_field(opt(&record.sector)),
            csv_field(opt(&record.headquarters)),
            csv_field(opt(&record.website_url)),
            csv_field(opt(&record.linkedin_url)),
            csv_field(opt(&record.facebook_url)),
            csv_field(opt(&record.twitter_url)),
            csv_field(opt(&record.instagram_url)),
        )
        .map_err(write_err)?;
    }

    info!("📤 Wrote {} records to {}", dataset.records.len(), path);
    Ok(())
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// RFC 4180 quoting: company names on the site do contain commas.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompanyRecord;

    fn record(name: &str) -> CompanyRecord {
        CompanyRecord {
            name: name.to_string(),
            employee_count: Some(250),
            sector: Some("Tecnología".to_string()),
            headquarters: Some("Madrid".to_string()),
            website_url: Some("https://acme.example".to_string()),
            linkedin_url: None,
            facebook_url: None,
            twitter_url: None,
            instagram_url: None,
        }
    }

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("certified_scraper_{}_{}.csv", name, std::process::id()))
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn plain_fields_pass_through_unquoted() {
        assert_eq!(csv_field("Acme"), "Acme");
        assert_eq!(csv_field(""), "");
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(csv_field("Acme, S.L."), "\"Acme, S.L.\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn empty_dataset_writes_only_the_header() {
        let path = temp_path("empty");
        export_csv(&Dataset::new(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{}\n", HEADER));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unknown_values_become_empty_cells() {
        let mut dataset = Dataset::new();
        dataset.records.push(CompanyRecord {
            name: "Beta SL".to_string(),
            employee_count: None,
            sector: None,
            headquarters: Some("Bilbao".to_string()),
            website_url: None,
            linkedin_url: None,
            facebook_url: None,
            twitter_url: None,
            instagram_url: None,
        });

        let path = temp_path("unknowns");
        export_csv(&dataset, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(row, "Beta SL,,,Bilbao,,,,,");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn writing_the_same_dataset_twice_is_byte_identical() {
        let mut dataset = Dataset::new();
        dataset.records.push(record("Acme, S.L."));
        dataset.records.push(record("Beta"));

        let first = temp_path("idempotent_a");
        let second = temp_path("idempotent_b");
        export_csv(&dataset, &first).unwrap();
        export_csv(&dataset, &second).unwrap();

        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
        std::fs::remove_file(&first).unwrap();
        std::fs::remove_file(&second).unwrap();
    }

    #[test]
    fn missing_parent_directory_is_created() {
        let dir = std::env::temp_dir().join(format!("certified_scraper_dir_{}", std::process::id()));
        let path = dir.join("out.csv").to_string_lossy().to_string();

        export_csv(&Dataset::new(), &path).unwrap();
        assert!(Path::new(&path).exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
