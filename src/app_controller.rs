use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{SubtitleFile, is_translatable};
use crate::translation_service::TranslationService;

// @module: Application controller for batch subtitle translation

/// Result of running the pipeline over one file
#[derive(Debug, PartialEq, Eq)]
pub enum FileOutcome {
    /// Translated and written to the given output path
    Translated(PathBuf),
    /// Skipped: the file name already carries the translated suffix marker
    SkippedAlreadyTranslated,
    /// Skipped: a translation already exists at the computed output path
    SkippedOutputExists,
}

/// Main application controller for subtitle translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Translation service built from the configured provider
    service: TranslationService,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(
            &config.translation,
            &config.source_language,
            &config.target_language,
        )?;

        Ok(Self { config, service })
    }

    /// Create a controller around an existing translation service. Used by
    /// tests to inject a stub provider.
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self { config, service }
    }

    /// Run the main workflow on an input path: a single subtitle file or a
    /// directory scanned recursively for .srt files
    pub async fn run(&self, input_path: PathBuf) -> Result<()> {
        if input_path.is_file() {
            // Single file: mirror relative to its own directory
            let scan_root = input_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf();

            let progress_bar = ProgressBar::new(0);
            progress_bar.set_style(Self::line_progress_style());
            let pb = progress_bar.clone();

            let outcome = self
                .process_file(&input_path, &scan_root, move |done, total| {
                    pb.set_length(total as u64);
                    pb.set_position(done as u64);
                })
                .await?;
            progress_bar.finish_and_clear();

            if let FileOutcome::Translated(output_path) = outcome {
                info!("Success: {}", output_path.display());
            }

            Ok(())
        } else if input_path.is_dir() {
            self.run_folder(&input_path).await
        } else {
            Err(anyhow::anyhow!(
                "Input path does not exist: {:?}",
                input_path
            ))
        }
    }

    /// Run the workflow in folder mode, processing every .srt file under the
    /// scan root. Files that already have a translation are skipped; a failed
    /// file is reported and does not abort its siblings.
    pub async fn run_folder(&self, scan_root: &Path) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        if !scan_root.exists() {
            return Err(anyhow::anyhow!(
                "Input directory does not exist: {:?}",
                scan_root
            ));
        }

        let subtitle_files = FileManager::find_files(scan_root, "srt")?;

        // Zero files found is a normal no-op completion, not an error
        if subtitle_files.is_empty() {
            info!(
                "No .srt files found under {:?}, nothing to do",
                scan_root
            );
            return Ok(());
        }

        info!(
            "Translating {} -> {} with {}",
            self.config.source_language,
            self.config.target_language,
            self.service.provider_name()
        );

        // Probe the provider once up front; a failure here is advisory since
        // per-line translation falls back to the original text anyway
        if let Err(e) = self.service.test_connection().await {
            warn!(
                "{} connection test failed: {}",
                self.service.provider_name(),
                e
            );
        }

        // Create multi-progress instance for multiple file processing
        let multi_progress = MultiProgress::new();

        // Create a progress bar for folder processing
        let folder_pb = multi_progress.add(ProgressBar::new(subtitle_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        // Track success and failure counts
        let mut success_count = 0;
        let mut skip_count = 0;
        let mut error_count = 0;

        for subtitle_file in subtitle_files.iter() {
            let file_name = subtitle_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            folder_pb.set_message(format!("Processing: {}", file_name));

            // Per-file line progress below the folder bar
            let line_pb = multi_progress.add(ProgressBar::new(0));
            line_pb.set_style(Self::line_progress_style());
            let pb = line_pb.clone();

            match self
                .process_file(subtitle_file, scan_root, move |done, total| {
                    pb.set_length(total as u64);
                    pb.set_position(done as u64);
                })
                .await
            {
                Ok(FileOutcome::Translated(output_path)) => {
                    success_count += 1;
                    info!("Success: {}", output_path.display());
                }
                Ok(_) => {
                    skip_count += 1;
                }
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    error_count += 1;
                }
            }

            line_pb.finish_and_clear();
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        let duration = start_time.elapsed();
        info!(
            "Folder processing completed: {} translated, {} skipped, {} errors - Duration: {}",
            success_count,
            skip_count,
            error_count,
            Self::format_duration(duration)
        );

        Ok(())
    }

    /// Run the pipeline over one subtitle file.
    ///
    /// Skip checks come first (translated-suffix name, existing output), then
    /// the file is read once, every translatable line is replaced by its
    /// translation while structural lines pass through verbatim, and the
    /// result is written atomically. The `on_line` observer is called with
    /// `(lines_done, total_lines)` after each line.
    pub async fn process_file(
        &self,
        path: &Path,
        scan_root: &Path,
        mut on_line: impl FnMut(usize, usize),
    ) -> Result<FileOutcome> {
        debug!("Processing file: {:?}", path);

        // Skip-check A: the source itself is already a translated file
        if FileManager::is_already_translated(path, &self.config.target_language) {
            warn!("Skipping file, already translated: {:?}", path);
            return Ok(FileOutcome::SkippedAlreadyTranslated);
        }

        let source_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let output_dir =
            FileManager::mirrored_output_dir(&self.config.output_folder, source_dir, scan_root);
        let output_path =
            output_dir.join(FileManager::translated_file_name(path, &self.config.target_language));

        // Skip-check B: idempotent resume across runs
        if FileManager::file_exists(&output_path) {
            warn!(
                "Skipping file, translation already exists: {:?}",
                output_path
            );
            return Ok(FileOutcome::SkippedOutputExists);
        }

        let subtitle = SubtitleFile::read(path)?;
        let total_lines = subtitle.line_count();

        let mut output = String::new();
        for (idx, line) in subtitle.lines.iter().enumerate() {
            if is_translatable(&line.text) {
                let translated = self.service.translate_line(line.text.trim()).await;
                output.push_str(&translated);
                output.push_str(line.terminator_or_newline());
            } else {
                // Structural line: byte-for-byte, including its terminator
                output.push_str(&line.text);
                output.push_str(&line.terminator);
            }

            on_line(idx + 1, total_lines);
        }

        FileManager::write_atomic(&output_path, &output)?;

        Ok(FileOutcome::Translated(output_path))
    }

    // Progress bar style for per-line progress within one file
    fn line_progress_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} lines ({percent}%)")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{bar:40}] {pos}/{len} ({percent}%)"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }

    // Format duration in a human-readable format
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
