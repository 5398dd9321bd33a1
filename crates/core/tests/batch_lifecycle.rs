//! Batch lifecycle integration tests.
//!
//! These tests run whole batches through the orchestrator with a mock
//! converter: discovery -> probe -> resolve -> encode -> summary

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use tinyaudio_core::{
    discover_inputs, preset,
    testing::MockConverter,
    BatchError, BatchOrchestrator, FailureKind, JobOptions, JobResolver, JobStatus, OutputTarget,
};

/// Test helper owning a scratch directory of fake recordings.
struct TestHarness {
    converter: MockConverter,
    temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        Self {
            converter: MockConverter::new(),
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    fn add_file(&self, relative: &str, len: usize) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, vec![0u8; len]).expect("Failed to write input");
        path
    }

    fn orchestrator(
        &self,
        preset_name: &str,
        options: JobOptions,
        output: OutputTarget,
    ) -> BatchOrchestrator<MockConverter> {
        let preset = preset::lookup(preset_name).expect("Unknown preset");
        BatchOrchestrator::new(
            self.converter.clone(),
            JobResolver::new(preset, options),
            output,
        )
    }
}

fn alongside() -> OutputTarget {
    OutputTarget::Alongside {
        suffix: String::new(),
    }
}

#[tokio::test]
async fn test_one_probe_failure_does_not_stop_the_batch() {
    let harness = TestHarness::new();
    harness.add_file("a.wav", 10_000);
    let broken = harness.add_file("b.wav", 10_000);
    harness.add_file("c.flac", 10_000);
    harness.converter.fail_probe(&broken, "Invalid data found").await;

    let inputs = discover_inputs(&[harness.root().to_path_buf()]).unwrap();
    assert_eq!(inputs.len(), 3);

    let summary = harness
        .orchestrator("voice", JobOptions::default(), alongside())
        .run(&inputs)
        .await;

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 1);

    let failures: Vec<_> = summary.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].input_path, broken);
    assert_eq!(
        failures[0].status.failure_kind(),
        Some(FailureKind::ProbeFailure)
    );

    assert!(harness.root().join("a.opus").exists());
    assert!(!harness.root().join("b.opus").exists());
    assert!(harness.root().join("c.opus").exists());
}

#[tokio::test]
async fn test_results_follow_discovery_order() {
    let harness = TestHarness::new();
    harness.add_file("z/late.wav", 100);
    harness.add_file("a/early.mp3", 100);
    harness.add_file("notes.txt", 100);

    let inputs = discover_inputs(&[harness.root().to_path_buf()]).unwrap();
    let summary = harness
        .orchestrator("music", JobOptions::default(), alongside())
        .run(&inputs)
        .await;

    let processed: Vec<_> = summary.results.iter().map(|r| r.input_path.clone()).collect();
    assert_eq!(processed, inputs);
    assert_eq!(
        processed,
        vec![
            harness.root().join("a/early.mp3"),
            harness.root().join("z/late.wav"),
        ]
    );

    let jobs = harness.converter.recorded_jobs().await;
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].input_path, processed[0]);
}

#[tokio::test]
async fn test_failed_encode_leaves_no_output_behind() {
    let harness = TestHarness::new();
    let good = harness.add_file("good.wav", 5_000);
    let bad = harness.add_file("bad.wav", 5_000);
    harness.converter.fail_encode(&bad, true).await;

    let summary = harness
        .orchestrator("voice", JobOptions::default(), alongside())
        .run(&[good, bad.clone()])
        .await;

    assert_eq!(summary.succeeded(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(
        summary.failures().next().unwrap().status.failure_kind(),
        Some(FailureKind::EncodeError)
    );
    assert!(harness.root().join("good.opus").exists());
    assert!(!harness.root().join("bad.opus").exists());
    assert!(bad.exists());
}

#[tokio::test]
async fn test_missing_output_is_a_failure() {
    let harness = TestHarness::new();
    let input = harness.add_file("ghost.wav", 5_000);
    harness.converter.skip_output(&input).await;

    let summary = harness
        .orchestrator("voice", JobOptions::default(), alongside())
        .run(&[input])
        .await;

    assert_eq!(summary.failed(), 1);
    assert_eq!(
        summary.results[0].status.failure_kind(),
        Some(FailureKind::MissingOutput)
    );
}

#[tokio::test]
async fn test_output_directory_and_codec_extension() {
    let harness = TestHarness::new();
    let a = harness.add_file("in/a.wav", 1_000);
    let b = harness.add_file("in/b.wav", 1_000);
    let out_dir = harness.root().join("out");

    let options = JobOptions {
        codec: Some(tinyaudio_core::Codec::Mp3),
        ..Default::default()
    };
    let target = OutputTarget::choose(Some(out_dir.clone()), "_ignored", 2);
    let summary = harness
        .orchestrator("podcast", options, target)
        .run(&[a, b])
        .await;

    assert_eq!(summary.succeeded(), 2);
    assert!(out_dir.join("a.mp3").exists());
    assert!(out_dir.join("b.mp3").exists());
}

#[tokio::test]
async fn test_same_extension_gets_collision_marker() {
    let harness = TestHarness::new();
    let input = harness.add_file("memo.opus", 8_000);

    let summary = harness
        .orchestrator("voice", JobOptions::default(), alongside())
        .run(&[input.clone()])
        .await;

    let result = &summary.results[0];
    assert_eq!(result.status, JobStatus::Succeeded);
    assert_eq!(result.output_path, harness.root().join("memo-compressed.opus"));
    assert_eq!(std::fs::metadata(&input).unwrap().len(), 8_000);
}

#[tokio::test]
async fn test_target_size_drives_bitrate() {
    let harness = TestHarness::new();
    let input = harness.add_file("lecture.wav", 90_000_000);
    harness.converter.set_duration(&input, 3600.0).await;

    let options = JobOptions {
        target_size_bytes: Some(10 * 1024 * 1024),
        ..Default::default()
    };
    let summary = harness
        .orchestrator("voice", options, alongside())
        .run(&[input])
        .await;

    // 10 MiB * 8 * 0.97 / 3600 s, floored
    let result = &summary.results[0];
    assert_eq!(result.bitrate_bps, Some(22_602));
    assert!(result.estimated_size_bytes.unwrap() <= 10 * 1024 * 1024);

    let jobs = harness.converter.recorded_jobs().await;
    let expr = jobs[0].filters.to_ffmpeg_expr().unwrap();
    assert!(expr.contains("lowpass=f=8000"));
}

#[tokio::test]
async fn test_dry_run_touches_nothing() {
    let harness = TestHarness::new();
    let a = harness.add_file("a.wav", 1_000);
    let b = harness.add_file("b.wav", 1_000);

    let summary = harness
        .orchestrator("voice", JobOptions::default(), alongside())
        .with_dry_run(true)
        .run(&[a, b])
        .await;

    assert_eq!(summary.skipped(), 2);
    assert_eq!(summary.failed(), 0);
    assert_eq!(harness.converter.encode_count().await, 0);
    assert!(!harness.root().join("a.opus").exists());
}

#[tokio::test]
async fn test_no_inputs_found() {
    let harness = TestHarness::new();
    harness.add_file("readme.md", 10);

    let err = discover_inputs(&[harness.root().to_path_buf()]).unwrap_err();
    assert!(matches!(err, BatchError::NoInputsFound { .. }));
}
