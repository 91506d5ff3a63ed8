//! # coleta-atas CLI
//!
//! Runs the full collection pipeline over the built-in RPPS site list:
//! discovery of candidate meeting pages, document download, metadata
//! extraction and report writing, one site at a time. The only flag is the
//! base output directory; everything else uses the default rules.
//!
//! Nothing here exits early: failed sites are skipped with a log line and
//! the consolidated report is always attempted at the end.

use std::path::PathBuf;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use coleta_atas::discovery::find_meeting_links;
use coleta_atas::downloader::download_files;
use coleta_atas::extractor::{MeetingKeywords, extract_metadata_from_files};
use coleta_atas::fetch::{FetchConfig, HttpFetcher, SpiderRenderer};
use coleta_atas::report::{save_consolidated_reports, save_site_reports};
use coleta_atas::rules::LinkRules;
use coleta_atas::site::default_sites;

#[derive(Parser)]
#[command(author, version, about = "Coleta Autônoma de Atas de RPPS", long_about = None)]
struct Cli {
    /// Diretório base de saída
    #[arg(long, default_value = "./data")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    tokio::fs::create_dir_all(&cli.out).await?;

    println!("Iniciando busca de atas de RPPS...\n");

    let renderer = SpiderRenderer::default();
    let fetcher = HttpFetcher::new(FetchConfig::default());
    let rules = LinkRules::default();
    let keywords = MeetingKeywords::default();

    let mut all_metadata = Vec::new();

    for site in default_sites() {
        let tag = if site.name.contains("Umuarama") {
            " (Extra)"
        } else {
            ""
        };
        println!("Buscando atas em: {} ({}){}", site.name, site.uf, tag);

        let base_path = site.data_dir(&cli.out);
        if let Err(e) = tokio::fs::create_dir_all(&base_path).await {
            warn!(site = %site.name, error = %e, "could not create site directory");
            continue;
        }

        let links = match find_meeting_links(&renderer, &site.url, &rules).await {
            Ok(links) => links,
            Err(e) => {
                warn!(site = %site.name, error = %e, "discovery failed");
                Vec::new()
            }
        };
        if links.is_empty() {
            println!("Nenhuma ata encontrada para {}. Pulando...\n", site.name);
            continue;
        }

        let files = download_files(&fetcher, &links, &base_path, &site, &rules).await;
        let metadata = extract_metadata_from_files(&files, &keywords);
        all_metadata.extend(metadata.iter().cloned());

        let report_dir = base_path.join("relatorios");
        if let Err(e) = save_site_reports(&metadata, &report_dir).await {
            warn!(site = %site.name, error = %e, "could not save site reports");
        }

        println!("Concluído: {} ({} arquivos)\n", site.name, files.len());
    }

    if let Err(e) = save_consolidated_reports(&all_metadata, &cli.out).await {
        warn!(error = %e, "could not save consolidated reports");
    }

    println!("Processo finalizado com sucesso!");
    Ok(())
}
