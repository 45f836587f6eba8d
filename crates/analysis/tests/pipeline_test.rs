use chatstat_analysis::ChatStatistics;
use chatstat_core::config::{AnalysisConfig, WordCloudConfig};
use chatstat_core::Error;
use chatstat_visual::{RenderOptions, RenderResult, WordCloudRenderer};
use std::path::{Path, PathBuf};

const EXPORT: &str = r#"{
    "name": "Study group",
    "type": "private_group",
    "messages": [
        {"id": 1, "type": "message", "from": "Sara", "text": "Who has the slides?"},
        {"id": 2, "type": "message", "from": "Reza", "text": "I do", "reply_to_message_id": 1},
        {"id": 3, "type": "service", "actor": "Sara", "action": "pin_message"},
        {"id": 4, "type": "message", "from": "Nima", "text": [
            "Check ",
            {"type": "link", "text": "drive.example.com"},
            " please"
        ], "reply_to_message_id": 1},
        {"id": 5, "type": "message", "from": "Sara", "text": "Thanks", "reply_to_message_id": 4},
        {"id": 6, "type": "message", "from": "Reza", "text": "کی جلسه داریم؟"},
        {"id": 7, "type": "message", "from": "Nima", "text": "فردا", "reply_to_message_id": 6},
        {"id": 8, "type": "message", "from": "Reza", "text": "late", "reply_to_message_id": 404},
        "not a message",
        {"id": 9, "type": "message", "from": "Sara", "text": 42}
    ]
}"#;

struct FixedBytes;

impl WordCloudRenderer for FixedBytes {
    fn render(&self, text: &str, _options: &RenderOptions) -> RenderResult<Vec<u8>> {
        Ok(text.as_bytes().to_vec())
    }
}

fn write_export(dir: &Path) -> PathBuf {
    let path = dir.join("result.json");
    std::fs::write(&path, EXPORT).expect("write export");
    path
}

#[test]
fn ranks_repliers_from_export() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stats = ChatStatistics::from_file(&write_export(dir.path()), AnalysisConfig::default())
        .expect("load export");

    assert_eq!(stats.transcript().name.as_deref(), Some("Study group"));
    assert_eq!(
        stats.top_repliers(10),
        vec![("Nima".to_string(), 2), ("Reza".to_string(), 1)]
    );
    assert_eq!(stats.top_repliers(1), vec![("Nima".to_string(), 2)]);
}

#[test]
fn corpus_keeps_entity_text_and_drops_stop_words() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stop_words = dir.path().join("stop_words.txt");
    std::fs::write(&stop_words, "the\nhas\n\n  who  \n").expect("write stop words");

    let config = AnalysisConfig {
        stop_words_path: Some(stop_words),
        ..AnalysisConfig::default()
    };
    let stats = ChatStatistics::from_file(&write_export(dir.path()), config).expect("load export");
    let corpus = stats.corpus().expect("corpus");

    assert!(corpus.contains("slides"));
    assert!(corpus.contains("drive"));
    assert!(!corpus.split_whitespace().any(|token| token == "the" || token == "has"));
}

#[test]
fn missing_stop_word_file_only_fails_the_word_cloud() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AnalysisConfig {
        stop_words_path: Some(dir.path().join("absent.txt")),
        ..AnalysisConfig::default()
    };
    let stats = ChatStatistics::from_file(&write_export(dir.path()), config).expect("load export");

    assert_eq!(
        stats.top_repliers(10),
        vec![("Nima".to_string(), 2), ("Reza".to_string(), 1)]
    );
    assert!(matches!(stats.corpus(), Err(Error::Resource(_))));

    let out = dir.path().join("out");
    let result = stats.generate_wordcloud(&out, &FixedBytes, &WordCloudConfig::default());
    assert!(matches!(result, Err(Error::Resource(_))));
    assert!(!out.join("wordcloud.png").exists());
}

#[test]
fn export_without_messages_is_an_input_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("result.json");
    std::fs::write(&path, r#"{"name": "empty"}"#).expect("write export");

    let result = ChatStatistics::from_file(&path, AnalysisConfig::default());
    assert!(matches!(result, Err(Error::Input(_))));
}

#[test]
fn word_cloud_replaces_previous_image() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("images");
    std::fs::create_dir_all(&out).expect("create output dir");
    std::fs::write(out.join("wordcloud.png"), b"stale").expect("write stale image");

    let stats = ChatStatistics::from_file(&write_export(dir.path()), AnalysisConfig::default())
        .expect("load export");
    let path = stats
        .generate_wordcloud(&out, &FixedBytes, &WordCloudConfig::default())
        .expect("generate word cloud");

    let written = std::fs::read(&path).expect("read image");
    assert_ne!(written, b"stale");
    assert_eq!(written, stats.corpus().expect("corpus").into_bytes());
}
