//! Integration tests for the interview analyzer

use interview_analyzer::config::{Config, OutputFormat};
use interview_analyzer::error::AnalyzerError;
use interview_analyzer::input::InputManager;
use interview_analyzer::output::{save_report_to_file, InterviewReport, ReportGenerator};
use interview_analyzer::processing::metrics::{Grade, Metric};
use interview_analyzer::session::{InterviewSession, InterviewType, SessionPlan};
use interview_analyzer::{generate_feedback, ResponseAnalyzer};
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/transcript.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("checkout service"));
    assert!(text.contains("connection pool"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/ideal_answer.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Profiling to find the bottleneck"));
    assert!(text.contains("problem"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains('#'));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/transcript.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(AnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(AnalyzerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_audio_features_from_json() {
    let manager = InputManager::new();
    let features = manager
        .load_audio_features(Path::new("tests/fixtures/audio_features.json"))
        .await
        .unwrap();

    assert_eq!(features.pause_count, 3);
    assert!((features.volume - 0.08).abs() < 1e-6);
    assert!((features.speech_rate - 142.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_analyze_files_end_to_end() {
    let mut manager = InputManager::new();
    let transcript = manager
        .extract_text(Path::new("tests/fixtures/transcript.txt"))
        .await
        .unwrap();
    let ideal = manager
        .extract_text(Path::new("tests/fixtures/ideal_answer.md"))
        .await
        .unwrap();
    let audio = manager
        .load_audio_features(Path::new("tests/fixtures/audio_features.json"))
        .await
        .unwrap();

    let analyzer = ResponseAnalyzer::new().unwrap();
    let analysis = analyzer.analyze(&transcript, &ideal, Some(&audio)).unwrap();

    assert!(analysis.clarity.score > 0.9);
    assert_eq!(analysis.clarity.filler_count, Some(0));
    for keyword in ["caching", "database", "latency"] {
        assert!(analysis
            .keyword_match
            .matched_keywords
            .contains(&keyword.to_string()));
    }
    // volume 0.8, pitch 0.95, pauses 0.15, silence 0.024
    assert!((analysis.confidence.score - 0.701).abs() < 1e-4);
    assert!(analysis.speech_quality.rate_score.is_some());

    for metric in Metric::ALL {
        let score = analysis.metric(metric).score();
        assert!((0.0..=1.0).contains(&score));
    }

    let feedback = generate_feedback(&analysis);
    assert!(feedback.contains("• Excellent clarity and articulation"));
    assert_eq!(feedback, generate_feedback(&analysis));
}

#[tokio::test]
async fn test_session_plan_pipeline() {
    let plan = SessionPlan::load(Path::new("tests/fixtures/session.toml")).unwrap();
    assert_eq!(plan.interview_type, InterviewType::Technical);

    let turns = plan.resolve(&mut InputManager::new()).await.unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].question, "How do you approach debugging complex issues?");

    let analyzer = ResponseAnalyzer::from_config(&Config::default()).unwrap();
    let mut session = InterviewSession::new(plan.interview_type);
    for turn in &turns {
        session
            .record(
                &turn.question,
                &turn.transcript,
                &turn.ideal_answer,
                turn.audio_features.as_ref(),
                &analyzer,
            )
            .unwrap();
    }

    let strong = &session.turns[0].analysis;
    let weak = &session.turns[1].analysis;
    assert!(weak.clarity.score < strong.clarity.score);
    assert_eq!(weak.clarity.filler_count, Some(5));
    assert!(weak.overall_score.score < strong.overall_score.score);
    assert!(session.turns[1]
        .feedback
        .contains("• Reduce filler words (um, uh, like) for better clarity"));

    let report = InterviewReport::from_session(&session);
    assert_eq!(report.summary.questions_answered, 2);
    assert!(report.summary.grade.is_some());

    let generator = ReportGenerator::with_options(false, true, true, true, true);
    let text = generator.generate_report(&report, &OutputFormat::Text).unwrap();
    assert!(text.starts_with("MOCK INTERVIEW ANALYSIS REPORT"));
    assert!(text.contains("QUESTION 2:\nQ: How do you approach debugging complex issues?"));

    let dir = tempfile::tempdir().unwrap();
    let html_path = dir.path().join("report.html");
    let html = generator.generate_report(&report, &OutputFormat::Html).unwrap();
    save_report_to_file(&html, &html_path).unwrap();
    assert!(std::fs::read_to_string(&html_path).unwrap().contains("Question 2"));
}

#[test]
fn test_empty_answer_grades_f() {
    let analyzer = ResponseAnalyzer::new().unwrap();
    let analysis = analyzer.analyze("", "", None).unwrap();

    assert_eq!(analysis.clarity.score, 0.0);
    assert_eq!(analysis.fluency.score, 0.0);
    assert_eq!(analysis.sentiment.score, 0.0);
    assert_eq!(analysis.keyword_match.score, 0.5);
    assert_eq!(analysis.confidence.score, 0.5);
    assert_eq!(analysis.speech_quality.score, 0.5);
    assert_eq!(analysis.overall_score.grade, Grade::F);
}

#[test]
fn test_config_file_drives_analyzer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.set_value("analysis.include_audio_analysis", "false").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load(Some(path.as_path())).unwrap();
    let analyzer = ResponseAnalyzer::from_config(&loaded).unwrap();
    let audio = interview_analyzer::AudioFeatureSummary {
        volume: 0.1,
        ..Default::default()
    };
    let analysis = analyzer.analyze("I shipped it.", "", Some(&audio)).unwrap();
    assert_eq!(analysis.confidence.score, 0.5);
}
