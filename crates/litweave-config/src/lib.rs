use litweave_engine::{Format, Language, Target};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No config file found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("No known output format selected by `generate` (expected any of markdown, notebook, slideshow)")]
    NoFormats,
}

/// Build configuration, read from `litweave.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output formats to produce, by name. Unknown names are skipped.
    pub generate: Vec<String>,
    /// Format whose documents the printed index links to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default)]
    pub folders: Folders,
    #[serde(default)]
    pub sources: Sources,
    #[serde(default)]
    pub language: Language,
}

/// Per-format output folders; each defaults to the format's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slideshow: Option<PathBuf>,
}

impl Folders {
    pub fn get(&self, format: Format) -> Option<&Path> {
        match format {
            Format::Markdown => self.markdown.as_deref(),
            Format::Notebook => self.notebook.as_deref(),
            Format::Slideshow => self.slideshow.as_deref(),
        }
    }
}

/// Where annotated sources are found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub directory: PathBuf,
    /// Suffix a file name must end with, including the dot.
    pub extension: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            extension: ".jsh".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generate: Format::ALL.iter().map(|f| f.name().to_string()).collect(),
            index: Some(Format::Markdown.name().to_string()),
            folders: Folders::default(),
            sources: Sources::default(),
            language: Language::default(),
        }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "litweave.toml";

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Err(ConfigError::NotFound(config_path.to_path_buf()));
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the source directory
        config.sources.directory =
            Self::expand_path(&config.sources.directory).unwrap_or(config.sources.directory);

        Ok(config)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Selected formats in declaration order, without duplicates.
    pub fn formats(&self) -> Vec<Format> {
        let mut formats = Vec::new();
        for name in &self.generate {
            match name.trim().parse::<Format>() {
                Ok(format) if !formats.contains(&format) => formats.push(format),
                Ok(_) => {}
                Err(e) => log::warn!("Skipping `generate` entry: {e}"),
            }
        }
        formats
    }

    pub fn index_format(&self) -> Option<Format> {
        let name = self.index.as_deref()?;
        match name.trim().parse::<Format>() {
            Ok(format) => Some(format),
            Err(e) => {
                log::warn!("Ignoring `index`: {e}");
                None
            }
        }
    }

    /// Output folder for `format`, with tilde and variables expanded.
    pub fn folder(&self, format: Format) -> PathBuf {
        let folder = self
            .folders
            .get(format)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(format.name()));
        Self::expand_path(&folder).unwrap_or(folder)
    }

    /// One generation target per selected format.
    pub fn targets(&self) -> Result<Vec<Target>, ConfigError> {
        let targets: Vec<Target> = self
            .formats()
            .into_iter()
            .map(|format| Target::new(format, self.folder(format)))
            .collect();
        if targets.is_empty() {
            return Err(ConfigError::NoFormats);
        }
        Ok(targets)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litweave_engine::LineClassifier;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    fn parse(content: &str) -> Config {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse(r#"generate = ["markdown"]"#);

        assert_eq!(config.formats(), vec![Format::Markdown]);
        assert_eq!(config.index_format(), None);
        assert_eq!(config.folder(Format::Markdown), PathBuf::from("markdown"));
        assert_eq!(config.sources, Sources::default());
        assert_eq!(config.language, Language::default());
    }

    #[test]
    fn test_missing_generate_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("litweave.toml");
        std::fs::write(&config_file, "index = \"markdown\"\n").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r##"
generate = ["markdown", "slideshow"]
index = "slideshow"

[folders]
markdown = "docs"
slideshow = "slides"

[sources]
directory = "lessons"
extension = ".java"

[language]
name = "Python"
fence = "python"
kernel = "python3"
comment = "#"
"##,
        );

        assert_eq!(config.formats(), vec![Format::Markdown, Format::Slideshow]);
        assert_eq!(config.index_format(), Some(Format::Slideshow));
        assert_eq!(config.folder(Format::Markdown), PathBuf::from("docs"));
        assert_eq!(config.folder(Format::Notebook), PathBuf::from("notebook"));
        assert_eq!(config.folder(Format::Slideshow), PathBuf::from("slides"));
        assert_eq!(config.sources.directory, PathBuf::from("lessons"));
        assert_eq!(config.sources.extension, ".java");
        assert_eq!(config.language.comment, "#");
        // Unset language keys keep their defaults
        assert_eq!(config.language.mimetype, "text/x-java-source");
    }

    #[test]
    fn test_load_hash_comment_token() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("litweave.toml");
        std::fs::write(
            &config_file,
            "# Python lessons\ngenerate = [\"notebook\"]\n\n[language]\ncomment = \"#\"\nfence = \"python\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap();

        assert_eq!(config.language.comment, "#");
        assert_eq!(config.language.fence, "python");
        assert_eq!(config.language.classifier(), LineClassifier::new("#"));
    }

    #[test]
    fn test_unknown_formats_are_skipped() {
        let config = parse(
            r#"
generate = ["pdf", "notebook", "notebook", " markdown "]
index = "html"
"#,
        );

        assert_eq!(config.formats(), vec![Format::Notebook, Format::Markdown]);
        assert_eq!(config.index_format(), None);
    }

    #[test]
    fn test_targets_require_a_known_format() {
        let config = parse(r#"generate = ["pdf"]"#);
        assert!(matches!(config.targets(), Err(ConfigError::NoFormats)));

        let config = parse(r#"generate = []"#);
        assert!(matches!(config.targets(), Err(ConfigError::NoFormats)));
    }

    #[test]
    fn test_targets_pair_formats_with_folders() {
        let config = parse(
            r#"
generate = ["notebook", "markdown"]
[folders]
notebook = "out/nb"
"#,
        );

        let targets = config.targets().unwrap();

        assert_eq!(
            targets,
            vec![
                Target::new(Format::Notebook, "out/nb"),
                Target::new(Format::Markdown, "markdown"),
            ]
        );
    }

    #[test]
    fn test_expand_folder_with_tilde() {
        let config = parse(
            r#"
generate = ["markdown"]
[folders]
markdown = "~/docs/out"
"#,
        );

        let folder = config.folder(Format::Markdown);

        assert!(!folder.to_string_lossy().starts_with('~'));
        assert!(folder.to_string_lossy().ends_with("docs/out"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("LITWEAVE_TEST_OUT", "/test/env/path");
        }

        let path = PathBuf::from("$LITWEAVE_TEST_OUT/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("LITWEAVE_TEST_OUT");
        }
    }

    #[test]
    fn test_expand_path_with_undefined_var_fails() {
        let path = PathBuf::from("$LITWEAVE_SURELY_UNDEFINED_VAR/x");
        assert_eq!(Config::expand_path(&path), None);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_save_and_load_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("litweave.toml");
        let config = Config::default();

        config.save_to_path(&config_file).unwrap();
        let loaded = Config::load_from_path(&config_file).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(
            loaded.formats(),
            vec![Format::Markdown, Format::Notebook, Format::Slideshow]
        );
        assert_eq!(loaded.index_format(), Some(Format::Markdown));
    }

    #[test]
    fn test_source_directory_is_expanded_on_load() {
        unsafe {
            env::set_var("LITWEAVE_TEST_SRC", "/lessons");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("litweave.toml");
        std::fs::write(
            &config_file,
            "generate = [\"markdown\"]\n[sources]\ndirectory = \"$LITWEAVE_TEST_SRC/java\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap();

        assert_eq!(config.sources.directory, PathBuf::from("/lessons/java"));
        unsafe {
            env::remove_var("LITWEAVE_TEST_SRC");
        }
    }
}
