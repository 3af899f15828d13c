use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ics2csv_core::upload::{CALENDAR_CONTENT_TYPE, output_file_name, with_bom};
use ics2csv_core::{Ics2CsvConfig, Upload};
use tokio::io::AsyncWriteExt;

use crate::render::Render;

/// Where the CSV goes.
pub enum Target {
    /// A file; `None` derives the name from the input
    File(Option<PathBuf>),
    Stdout,
}

pub async fn run(config: &Ics2CsvConfig, input: &Path, target: Target) -> Result<()> {
    let converter = config.converter()?;

    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("Could not read {}", input.display()))?;

    let file_name = input.file_name().map(|n| n.to_string_lossy().into_owned());
    let upload = Upload::new(file_name, guess_content_type(input), bytes);

    let conversion = converter
        .convert_upload(Some(&upload))
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    match target {
        Target::Stdout => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(conversion.csv.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        Target::File(output) => {
            let output = output.unwrap_or_else(|| {
                input.with_file_name(output_file_name(upload.file_name.as_deref()))
            });

            let contents = if config.bom {
                with_bom(&conversion.csv)
            } else {
                conversion.csv.clone().into_bytes()
            };

            tokio::fs::write(&output, contents)
                .await
                .with_context(|| format!("Could not write {}", output.display()))?;

            println!("{}", conversion.render());
            println!("   {}", output.display());
        }
    }

    Ok(())
}

/// Local files carry no MIME type; trust the extension.
fn guess_content_type(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.eq_ignore_ascii_case("ics") || ext.eq_ignore_ascii_case("ical"))
        .map(|_| CALENDAR_CONTENT_TYPE.to_string())
}
