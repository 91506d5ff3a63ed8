//! Report writers
//!
//! Each site gets a machine-readable `atas.jsonl` (one record per line) and
//! a human-readable `atas_resumo.txt`. After the full run the same records,
//! accumulated across all sites, go into `atas_geral.jsonl` and
//! `atas_geral.txt` at the output root. Callers log and swallow write
//! failures; a broken report never aborts the run.

use std::path::Path;

use chrono::Local;
use tokio::fs;
use tracing::info;

use crate::error::Result;
use crate::extractor::MetadataRecord;

const RULE_WIDTH: usize = 80;

fn jsonl(records: &[MetadataRecord]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

fn summary_block(record: &MetadataRecord) -> String {
    format!(
        "RPPS: {} ({})\nTipo de Reunião: {}\nData: {}\nArquivo: {}\nOrigem: {}\nLink: {}\n{}\n",
        record.rpps.as_deref().unwrap_or("-"),
        record.uf.as_deref().unwrap_or("-"),
        record.tipo_reuniao,
        record.data_reuniao,
        record.file_name,
        record.source_page.as_deref().unwrap_or("-"),
        record.file_url.as_deref().unwrap_or("-"),
        "-".repeat(RULE_WIDTH),
    )
}

fn summary(header: &str, records: &[MetadataRecord]) -> String {
    let mut out = format!("{}\n{}\n\n", header, "=".repeat(RULE_WIDTH));
    for record in records {
        out.push_str(&summary_block(record));
    }
    out
}

/// Write one site's `atas.jsonl` and `atas_resumo.txt` into `out_dir`.
pub async fn save_site_reports(records: &[MetadataRecord], out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).await?;

    let jsonl_path = out_dir.join("atas.jsonl");
    let txt_path = out_dir.join("atas_resumo.txt");

    fs::write(&jsonl_path, jsonl(records)?).await?;

    let header = format!(
        "Relatório gerado em {}",
        Local::now().format("%d/%m/%Y %H:%M:%S")
    );
    fs::write(&txt_path, summary(&header, records)).await?;

    info!(
        jsonl = %jsonl_path.display(),
        txt = %txt_path.display(),
        records = records.len(),
        "site reports saved"
    );
    Ok(())
}

/// Write the consolidated `atas_geral.jsonl` and `atas_geral.txt` at the
/// output root, covering every site processed in this run.
pub async fn save_consolidated_reports(records: &[MetadataRecord], base_out: &Path) -> Result<()> {
    fs::create_dir_all(base_out).await?;

    let jsonl_path = base_out.join("atas_geral.jsonl");
    let txt_path = base_out.join("atas_geral.txt");

    fs::write(&jsonl_path, jsonl(records)?).await?;
    fs::write(
        &txt_path,
        summary(
            "Relatório geral consolidado de todas as atas coletadas",
            records,
        ),
    )
    .await?;

    info!(
        jsonl = %jsonl_path.display(),
        txt = %txt_path.display(),
        records = records.len(),
        "consolidated reports saved"
    );
    Ok(())
}
