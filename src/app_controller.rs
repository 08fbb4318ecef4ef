use std::path::PathBuf;
use std::sync::Arc;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::language_utils;
use crate::names::{self, DisplayMode, TranslatedNames, TranslationResult};
use crate::operator::Operator;
use crate::providers::Translator;
use crate::rebuild::RebuildPlan;
use crate::translation::{BatchTranslator, TranslationOptions, TranslationService};
use crate::tree::SourceTree;
use crate::tree_view;
use crate::validator;

// @module: Application controller for folder translation

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Directory holding the translated copy
    pub destination_root: PathBuf,
    /// Number of files and folders translated
    pub entry_count: usize,
    /// Number of distinct texts sent to the backend
    pub unique_text_count: usize,
    /// Number of names replaced by their sanitized form
    pub sanitized_count: usize,
}

/// Main application controller for folder translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translation service for the configured backend
    service: TranslationService,
}

impl Controller {
    // @method: Create a controller using the configured production backend
    pub fn with_config(config: Config) -> Self {
        let service = TranslationService::new(&config.translator);
        Self { config, service }
    }

    // @method: Create a controller around a specific backend
    pub fn with_translator(config: Config, translator: Arc<dyn Translator>) -> Self {
        let options = TranslationOptions::from(&config.translator);
        let service = TranslationService::with_translator(translator, options);
        Self { config, service }
    }

    /// Run the whole pipeline for one source folder.
    ///
    /// Both confirmation gates come before any filesystem change; declining
    /// either returns an error and leaves the disk untouched.
    pub async fn run(
        &self,
        input_path: Option<PathBuf>,
        operator: &mut dyn Operator,
    ) -> Result<RunSummary, AppError> {
        let start_time = std::time::Instant::now();

        let input_path = match input_path {
            Some(path) => path,
            None => PathBuf::from(operator.input_text("Input folder path")?),
        };

        let tree = SourceTree::enumerate(&input_path)?;
        operator.show(&format!(
            "Folder structure of selected path:\n{}\n",
            tree_view::render_tree(&tree)
        ));

        let units = names::dedupe(&tree.name_texts());
        let texts = names::unique_texts(&units);

        let target_language = self.resolve_target_language(operator)?;
        let results = self.translate_with_progress(&texts, &target_language).await?;

        let mode = self.resolve_display_mode(operator)?;
        let mut translated = TranslatedNames::build(&tree, &units, &results, mode)?;

        let sanitized_count = self.sanitize_names(&mut translated, operator)?;

        let plan = RebuildPlan::new(&tree, &translated, &self.config.destination_suffix)?;
        operator.show(&format!("Preview translated:\n{}\n", tree_view::render_plan(&plan)));

        if !operator.confirm("Confirm creating new folder with translation?")? {
            return Err(AppError::CopyDeclined);
        }

        plan.execute()?;

        let result_tree = SourceTree::enumerate(&plan.destination_root)?;
        operator.show(&format!(
            "New folder creation succeed. Results:\n{}",
            tree_view::render_tree(&result_tree)
        ));

        info!(
            "Translated {} names ({} unique) in {:.1}s",
            tree.len(),
            units.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(RunSummary {
            destination_root: plan.destination_root,
            entry_count: tree.len(),
            unique_text_count: units.len(),
            sanitized_count,
        })
    }

    fn resolve_target_language(&self, operator: &mut dyn Operator) -> Result<String, AppError> {
        let language = if self.config.target_language.is_empty() {
            operator.input_text("Input destination language abbreviation (e.g., ru, en, zh-cn)")?
        } else {
            self.config.target_language.clone()
        };

        match language_utils::get_language_name(&language) {
            Ok(name) => debug!("Destination language: {} ({})", name, language),
            Err(_) => warn!("Unrecognized language code '{}', sending it as is", language),
        }
        Ok(language.trim().to_string())
    }

    fn resolve_display_mode(&self, operator: &mut dyn Operator) -> Result<DisplayMode, AppError> {
        if let Some(mode) = self.config.display_mode {
            return Ok(mode);
        }

        let options: Vec<String> = DisplayMode::ALL.iter().map(|m| m.to_string()).collect();
        let descriptions: Vec<String> = DisplayMode::ALL
            .iter()
            .map(|m| format!("    {}: {}", m, m.description()))
            .collect();
        let prompt = format!(
            "Translation complete. Show translation as:\n{}",
            descriptions.join("\n")
        );
        let choice = operator.choose(&prompt, &options)?;
        Ok(DisplayMode::parse_lenient(&choice))
    }

    async fn translate_with_progress(
        &self,
        texts: &[String],
        target_language: &str,
    ) -> Result<Vec<TranslationResult>, AppError> {
        let progress_bar = ProgressBar::new(texts.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} names {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);
        progress_bar.set_message("translating");

        info!("Translating {} unique names with {}", texts.len(), self.service.backend_name());

        let batch_translator = BatchTranslator::new(self.service.clone());
        let pb = progress_bar.clone();
        let results = batch_translator
            .translate_batch(texts, target_language, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await;

        progress_bar.finish_and_clear();
        results
    }

    fn sanitize_names(
        &self,
        translated: &mut TranslatedNames,
        operator: &mut dyn Operator,
    ) -> Result<usize, AppError> {
        let fixes = validator::find_invalid(translated);
        if fixes.is_empty() {
            return Ok(0);
        }

        let listing: Vec<String> = fixes.iter().map(|f| format!("  {}", f)).collect();
        operator.show(&format!(
            "Following names are invalid and have to be changed:\n{}",
            listing.join("\n")
        ));

        if !operator.confirm("Change accordingly?")? {
            return Err(AppError::NameValidationDeclined);
        }

        validator::apply_fixes(translated, &fixes);
        Ok(fixes.len())
    }
}
