use super::*;
use tempfile::TempDir;

#[test]
fn test_default_config_values() {
    let config = Config::default();

    // Model defaults
    assert_eq!(config.model.model, SpeechModel::WhisperBase);
    assert_eq!(config.model.language, "auto");

    // Segmentation defaults
    assert_eq!(config.segmentation.max_chars, 120);
    assert_eq!(config.segmentation.mode, SegmentationMode::WordAnchored);
    assert_eq!(config.segmentation.anchor, AnchorScope::Span);
    assert!((config.segmentation.uniform_segment_secs - 10.0 / 60.0).abs() < f64::EPSILON);
}

#[test]
fn test_load_valid_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
[model]
model = "whisper-base-en"
language = "en"

[segmentation]
max_chars = 80
mode = "uniform"
anchor = "transcript"

[logging]
level = "debug"
"#;

    std::fs::write(&config_path, toml_content).unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.model.model, SpeechModel::WhisperBaseEn);
    assert_eq!(config.model.language, "en");
    assert_eq!(config.segmentation.max_chars, 80);
    assert_eq!(config.segmentation.mode, SegmentationMode::Uniform);
    assert_eq!(config.segmentation.anchor, AnchorScope::Transcript);
    assert_eq!(config.logging.level, LogLevel::Debug);
}

#[test]
fn test_missing_config_file_returns_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent.toml");

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_toml_returns_error() {
    let invalid_toml = "this is not valid { toml [";

    let result = Config::parse(invalid_toml);

    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(err.to_string().contains("TOML"));
}

#[test]
fn test_invalid_model_name_returns_error() {
    let toml_content = r#"
[model]
model = "not-a-real-model"
"#;

    let result = Config::parse(toml_content);
    assert!(result.is_err());
}

#[test]
fn test_invalid_mode_returns_error() {
    let toml_content = r#"
[segmentation]
mode = "psychic"
"#;

    let result = Config::parse(toml_content);
    assert!(result.is_err());
}

#[test]
fn test_partial_config_uses_defaults_for_missing() {
    let partial_toml = r#"
[segmentation]
max_chars = 42
"#;

    let config = Config::parse(partial_toml).unwrap();

    // Specified value
    assert_eq!(config.segmentation.max_chars, 42);
    // Default values for unspecified fields
    assert_eq!(config.model.model, SpeechModel::WhisperBase);
    assert_eq!(config.segmentation.mode, SegmentationMode::WordAnchored);
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn test_config_paths() {
    // These should return valid paths on any system
    let config_dir = Config::config_dir().unwrap();
    let config_path = Config::config_path().unwrap();
    let data_dir = Config::data_dir().unwrap();
    let models_dir = Config::models_dir().unwrap();

    assert!(config_dir.ends_with("capscribe"));
    assert!(config_path.ends_with("config.toml"));
    assert!(data_dir.ends_with("capscribe"));
    assert!(models_dir.ends_with("models"));

    // Verify parent relationships
    assert_eq!(config_path.parent().unwrap(), config_dir);
    assert_eq!(models_dir.parent().unwrap(), data_dir);
}

#[test]
fn test_save_and_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let original = Config {
        model: ModelConfig {
            model: SpeechModel::WhisperMedium,
            language: "cs".to_string(),
        },
        segmentation: SegmentationConfig {
            max_chars: 60,
            mode: SegmentationMode::Uniform,
            anchor: AnchorScope::Transcript,
            uniform_segment_secs: 5.0,
        },
        logging: LoggingConfig {
            level: LogLevel::Debug,
        },
    };

    original.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();

    assert_eq!(original, loaded);
}

#[test]
fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested/dir/config.toml");

    let config = Config::default();
    config.save_to(&config_path).unwrap();

    assert!(config_path.exists());
}

#[test]
fn test_mode_serialization() {
    // Modes serialize to kebab-case
    let config = Config {
        segmentation: SegmentationConfig {
            mode: SegmentationMode::WordAnchored,
            ..Default::default()
        },
        ..Default::default()
    };

    let toml_str = toml::to_string(&config).unwrap();
    assert!(toml_str.contains("mode = \"word-anchored\""));
}

#[test]
fn test_speech_model_serialization() {
    let config = Config {
        model: ModelConfig {
            model: SpeechModel::WhisperBase,
            ..Default::default()
        },
        ..Default::default()
    };

    let toml_str = toml::to_string(&config).unwrap();
    assert!(toml_str.contains("model = \"whisper-base\""));
}

#[test]
fn test_segmentation_options_mapping() {
    let config = SegmentationConfig {
        max_chars: 90,
        mode: SegmentationMode::Uniform,
        anchor: AnchorScope::Span,
        uniform_segment_secs: 2.5,
    };

    let opts = config.options();

    assert_eq!(opts.max_chars, 90);
    assert_eq!(opts.mode, SegmentationMode::Uniform);
    assert!((opts.uniform_unit_secs - 2.5).abs() < f64::EPSILON);
}

#[test]
fn test_language_hint() {
    let auto = ModelConfig {
        language: "auto".to_string(),
        ..Default::default()
    };
    assert_eq!(auto.language_hint(), None);

    let specific = ModelConfig {
        language: "en".to_string(),
        ..Default::default()
    };
    assert_eq!(specific.language_hint(), Some("en".to_string()));
}
