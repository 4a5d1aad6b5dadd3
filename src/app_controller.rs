use anyhow::{anyhow, Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::translation::TranslationService;
use crate::xliff::{
    cyrillize_document, strip_target_comments, translate_document, CyrillicOptions, CyrillicReport,
    CyrillicStatus, TranslateReport, XliffDocument,
};

// @module: Application controller for XLIFF batch processing

/// Counters for one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Candidate files found
    pub discovered: usize,
    /// Files written
    pub processed: usize,
    /// Files skipped because their output already exists
    pub skipped: usize,
    /// Files that needed no change
    pub unchanged: usize,
    /// Files that could not be read, parsed or written
    pub failed: usize,
    /// Segments filled by the provider
    pub translated: usize,
    /// Segments converted to Cyrillic
    pub transliterated: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files: {} processed, {} skipped, {} unchanged, {} errors ({} segments translated, {} transliterated)",
            self.discovered,
            self.processed,
            self.skipped,
            self.unchanged,
            self.failed,
            self.translated,
            self.transliterated
        )
    }
}

/// Main application controller for XLIFF translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Service shared by every file of a run
    service: TranslationService,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(&config);
        Ok(Self::with_service(config, service))
    }

    /// Create a controller around an existing translation service
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self { config, service }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Translate every `*.<source_suffix>.xlf` file in `input_dir`
    ///
    /// Output goes to `<input_dir>/<output_dir>/<base>.<target_suffix>.xlf`.
    /// Files whose output already exists are skipped unless `force` is set.
    pub async fn run_translate(&self, input_dir: &Path, force: bool) -> Result<BatchSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let batch = &self.config.batch;
        let input_ending = batch.input_ending();
        let output_ending = batch.output_ending();
        let output_dir = input_dir.join(&batch.output_dir);

        let files = FileManager::list_files_with_ending(input_dir, &input_ending)?;
        let mut summary = BatchSummary {
            discovered: files.len(),
            ..Default::default()
        };
        if files.is_empty() {
            warn!("No *{} files found in {:?}", input_ending, input_dir);
            return Ok(summary);
        }

        info!(
            "Translating {} files to '{}' with {}",
            files.len(),
            batch.target_language,
            self.service.provider_name()
        );

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
        folder_pb.set_style(Self::bar_style("files"));

        for input_file in &files {
            let file_name = Self::display_name(input_file);
            folder_pb.set_message(format!("Processing: {}", file_name));

            let Some(output_path) =
                FileManager::generate_output_path(input_file, &output_dir, &input_ending, &output_ending)
            else {
                warn!("Cannot derive an output name for {}", file_name);
                summary.failed += 1;
                folder_pb.inc(1);
                continue;
            };

            if FileManager::file_exists(&output_path) && !force {
                info!("Skipping {}, translation already exists (use -f to force overwrite)", file_name);
                summary.skipped += 1;
                folder_pb.inc(1);
                continue;
            }

            let unit_pb = multi_progress.add(ProgressBar::new(0));
            unit_pb.set_style(Self::bar_style("units"));
            match self.translate_file(input_file, &output_path, &unit_pb).await {
                Ok(report) => {
                    info!(
                        "{}: {}/{} units translated -> {:?}",
                        file_name, report.translated, report.total_units, output_path
                    );
                    summary.processed += 1;
                    summary.translated += report.translated;
                }
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }
            unit_pb.finish_and_clear();
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");
        info!(
            "Translation completed in {}: {}",
            Self::format_duration(start_time.elapsed()),
            summary
        );
        Ok(summary)
    }

    async fn translate_file(
        &self,
        input_file: &Path,
        output_path: &Path,
        progress: &ProgressBar,
    ) -> Result<TranslateReport> {
        let content = FileManager::read_to_string(input_file)?;
        let mut doc = XliffDocument::parse(&content)
            .with_context(|| format!("Failed to parse {:?}", input_file))?;

        let report = translate_document(&mut doc, &self.service, &self.config.batch.target_language, progress).await;
        FileManager::write_atomic(output_path, &doc.to_xml_string())?;
        Ok(report)
    }

    /// Convert every XLIFF file under `root` to Cyrillic, in place
    pub async fn run_cyrillic(&self, root: &Path) -> Result<BatchSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(root) {
            return Err(anyhow!("Directory does not exist: {:?}", root));
        }

        let files = FileManager::find_files(root, &self.config.cyrillic.extensions)?;
        let mut summary = BatchSummary {
            discovered: files.len(),
            ..Default::default()
        };
        if files.is_empty() {
            warn!("No XLIFF files found under {:?}", root);
            return Ok(summary);
        }

        let options = CyrillicOptions::for_tag(self.config.cyrillic.target_language.as_str());
        info!(
            "Converting {} files to '{}' (missing targets requested in '{}')",
            files.len(),
            options.target_tag,
            options.base_language
        );

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
        folder_pb.set_style(Self::bar_style("files"));

        for path in &files {
            let file_name = Self::display_name(path);
            folder_pb.set_message(format!("Processing: {}", file_name));

            let unit_pb = multi_progress.add(ProgressBar::new(0));
            unit_pb.set_style(Self::bar_style("units"));
            match self.cyrillize_file(path, &options, &unit_pb).await {
                Ok(report) => {
                    summary.translated += report.translated;
                    summary.transliterated += report.transliterated;
                    match report.status {
                        CyrillicStatus::Updated => {
                            info!(
                                "{}: {} transliterated, {} translated, {} failed",
                                file_name, report.transliterated, report.translated, report.failed
                            );
                            summary.processed += 1;
                        }
                        CyrillicStatus::AlreadyConverted => {
                            debug!("{} is already in Cyrillic", file_name);
                            summary.unchanged += 1;
                        }
                        CyrillicStatus::Unchanged => {
                            debug!("{} needs no changes", file_name);
                            summary.unchanged += 1;
                        }
                    }
                }
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }
            unit_pb.finish_and_clear();
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");
        info!(
            "Cyrillic conversion completed in {}: {}",
            Self::format_duration(start_time.elapsed()),
            summary
        );
        Ok(summary)
    }

    async fn cyrillize_file(
        &self,
        path: &Path,
        options: &CyrillicOptions,
        progress: &ProgressBar,
    ) -> Result<CyrillicReport> {
        let content = FileManager::read_to_string(path)?;
        let mut doc = XliffDocument::parse(&content).with_context(|| format!("Failed to parse {:?}", path))?;

        let report = cyrillize_document(&mut doc, &self.service, options, progress).await;
        if report.is_updated() {
            FileManager::write_atomic(path, &doc.to_xml_string())?;
        }
        Ok(report)
    }

    /// Remove comments inside `<target>` elements of one file, or of every
    /// XLIFF file under a directory
    pub fn run_strip_comments(&self, path: &Path) -> Result<BatchSummary> {
        let files: Vec<PathBuf> = if FileManager::file_exists(path) {
            vec![path.to_path_buf()]
        } else if FileManager::dir_exists(path) {
            FileManager::find_files(path, &self.config.cyrillic.extensions)?
        } else {
            return Err(anyhow!("Path does not exist: {:?}", path));
        };

        let mut summary = BatchSummary {
            discovered: files.len(),
            ..Default::default()
        };

        for file in &files {
            let file_name = Self::display_name(file);
            match Self::strip_file(file) {
                Ok(true) => {
                    info!("Removed target comments from {}", file_name);
                    summary.processed += 1;
                }
                Ok(false) => summary.unchanged += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }
        }

        info!("Comment cleanup completed: {}", summary);
        Ok(summary)
    }

    fn strip_file(path: &Path) -> Result<bool> {
        let content = FileManager::read_to_string(path)?;
        let cleaned = strip_target_comments(&content);
        if cleaned == content {
            return Ok(false);
        }
        FileManager::write_atomic(path, &cleaned)?;
        Ok(true)
    }

    /// Translate a single string, failing if the provider does
    pub async fn translate_text(&self, text: &str, target_language: &str) -> Result<String> {
        self.service
            .translate_strict(text, target_language)
            .await
            .with_context(|| format!("Failed to translate '{}'", text))
    }

    fn bar_style(unit: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
                unit
            ))
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }

    fn display_name(path: &Path) -> String {
        path.file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
