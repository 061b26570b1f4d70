use anyhow::Context;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

use tahsilat_core::CollectionEntry;

use crate::config::CliConfig;

pub async fn scan(
    config: &CliConfig,
    image: &Path,
    lang: Option<String>,
    tessdata: Option<PathBuf>,
) -> anyhow::Result<()> {
    let lang = lang.unwrap_or_else(|| config.ocr.lang.clone());
    let tessdata = tessdata.or_else(|| config.ocr.tessdata.clone());
    let result = run_scan(image, &lang, tessdata.as_deref()).await?;
    info!(confidence = result.confidence, "scan finished");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(feature = "tesseract")]
async fn run_scan(
    image: &Path,
    lang: &str,
    tessdata: Option<&Path>,
) -> anyhow::Result<tahsilat_ocr::ScanResult> {
    use tahsilat_ocr::recognizer::tesseract_backend::TesseractRecognizer;
    use tahsilat_ocr::ScanPipeline;

    let data_path = tessdata.map(|p| p.to_string_lossy().into_owned());
    let pipeline = ScanPipeline::new(TesseractRecognizer::new(data_path, lang));
    pipeline
        .scan_file(image)
        .await
        .with_context(|| format!("scanning {}", image.display()))
}

#[cfg(not(feature = "tesseract"))]
async fn run_scan(
    _image: &Path,
    _lang: &str,
    _tessdata: Option<&Path>,
) -> anyhow::Result<tahsilat_ocr::ScanResult> {
    anyhow::bail!(
        "OCR backend not built in; rebuild with `--features tesseract` \
         (requires system libtesseract + libleptonica)"
    )
}

pub async fn resize(
    config: &CliConfig,
    image: &Path,
    out: Option<PathBuf>,
    max_width: Option<u32>,
) -> anyhow::Result<()> {
    let max_width = max_width.unwrap_or(config.upload.max_width);
    let out = out.unwrap_or_else(|| default_resize_target(image));

    let data = tokio::fs::read(image)
        .await
        .with_context(|| format!("reading {}", image.display()))?;
    let resized = tahsilat_ocr::resize_for_storage(&data, max_width)
        .with_context(|| format!("resizing {}", image.display()))?;
    tokio::fs::write(&out, &resized)
        .await
        .with_context(|| format!("writing {}", out.display()))?;

    info!(bytes = resized.len(), "wrote {}", out.display());
    Ok(())
}

fn default_resize_target(image: &Path) -> PathBuf {
    let stem = image.file_stem().and_then(|s| s.to_str()).unwrap_or("resized");
    image.with_file_name(format!("{stem}-web.jpg"))
}

pub fn report(
    entries_path: &Path,
    date: Option<NaiveDate>,
    salesperson: Option<&str>,
) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(entries_path)
        .with_context(|| format!("reading {}", entries_path.display()))?;
    let entries: Vec<CollectionEntry> =
        serde_json::from_str(&data).context("entries file is not a JSON array of collection entries")?;
    let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());

    match salesperson {
        Some(name) => {
            println!("{name}");
            println!("  Günlük  : {}", tahsilat_report::daily_total(&entries, Some(name), today));
            println!("  Haftalık: {}", tahsilat_report::weekly_total(&entries, Some(name), today));
            println!("  Aylık   : {}", tahsilat_report::monthly_total(&entries, Some(name), today));
        }
        None => {
            for (name, totals) in tahsilat_report::salesperson_rollup(&entries, today) {
                println!(
                    "{name}: günlük {} | haftalık {} | aylık {} ({} kayıt)",
                    totals.daily, totals.weekly, totals.monthly, totals.entry_count
                );
            }
            println!("Toplam: {}", tahsilat_report::grand_total(&entries));
        }
    }
    Ok(())
}
