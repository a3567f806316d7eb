// Tue Aug 18 2026 - Alex

use crate::artifact::{self, is_recognized, Artifact};
use crate::config::ValidatorConfig;
use crate::engine::core::Engine;
use crate::report::{aggregate, Finding, Location, Verdict};
use crate::rules::RuleRegistry;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Rule id attached to synthetic findings for work the deadline cut off.
pub const TIMEOUT_RULE_ID: &str = "ENGINE_TIMEOUT";

/// A file that never made it to rule evaluation.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file: String,
    pub message: String,
}

/// Result of a full run: the aggregated verdict plus any files that could
/// not be loaded. Failures are reported separately because they are not
/// findings; they drive the usage-error exit code.
#[derive(Debug)]
pub struct RunOutcome {
    pub verdict: Verdict,
    pub failures: Vec<FileFailure>,
}

impl RunOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Drives a whole validation run: path expansion, loading, rule
/// evaluation, and aggregation into a single verdict.
pub struct ValidationRunner {
    registry: Arc<RuleRegistry>,
    config: ValidatorConfig,
    engine: Engine,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl ValidationRunner {
    pub fn new(registry: RuleRegistry, config: ValidatorConfig) -> Self {
        let engine = Engine::new(config.parallel);
        let pool = if config.parallel {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(config.max_threads)
                .build()
            {
                Ok(pool) => Some(Arc::new(pool)),
                Err(e) => {
                    // Global pool still works; only the thread cap is lost.
                    warn!("Could not build a capped thread pool: {}", e);
                    None
                }
            }
        } else {
            None
        };
        Self {
            registry: Arc::new(registry),
            config,
            engine,
            pool,
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn run(&self, paths: &[PathBuf]) -> RunOutcome {
        self.run_with(paths, |_| {})
    }

    /// Runs validation over `paths`, invoking `progress` with each file
    /// name as its evaluation completes.
    pub fn run_with<F>(&self, paths: &[PathBuf], progress: F) -> RunOutcome
    where
        F: Fn(&str) + Send + Sync,
    {
        let (files, mut failures) = expand_paths(paths);
        info!("Validating {} file(s)", files.len());

        let mut artifacts = Vec::with_capacity(files.len());
        for file in &files {
            match artifact::load(file) {
                Ok(a) => artifacts.push(a),
                Err(e) => {
                    warn!("Skipping {}: {}", file.display(), e);
                    failures.push(FileFailure {
                        file: file.display().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let findings = match self.config.timeout_seconds {
            Some(seconds) => {
                self.evaluate_with_deadline(artifacts, Duration::from_secs(seconds), &progress)
            }
            None => self.evaluate_all(artifacts, &progress),
        };

        let verdict = aggregate(findings, &self.config.policy);
        RunOutcome { verdict, failures }
    }

    fn evaluate_all<F>(&self, artifacts: Vec<Artifact>, progress: &F) -> Vec<Finding>
    where
        F: Fn(&str) + Send + Sync,
    {
        if self.config.parallel {
            let evaluate = || {
                artifacts
                    .par_iter()
                    .flat_map_iter(|a| {
                        let findings = self.evaluate_artifact(a);
                        progress(&a.file);
                        findings
                    })
                    .collect()
            };
            match &self.pool {
                Some(pool) => pool.install(evaluate),
                None => evaluate(),
            }
        } else {
            artifacts
                .iter()
                .flat_map(|a| {
                    let findings = self.evaluate_artifact(a);
                    progress(&a.file);
                    findings
                })
                .collect()
        }
    }

    /// Evaluates on a worker thread while the caller waits on a channel
    /// with the time left until the deadline. Files whose results do not arrive before
    /// the deadline are reported as critical timeout findings; the worker
    /// is left to wind down on its own.
    fn evaluate_with_deadline<F>(
        &self,
        artifacts: Vec<Artifact>,
        timeout: Duration,
        progress: &F,
    ) -> Vec<Finding>
    where
        F: Fn(&str) + Send + Sync,
    {
        let deadline = Instant::now() + timeout;
        let names: Vec<String> = artifacts.iter().map(|a| a.file.clone()).collect();
        let locations: Vec<Location> = artifacts.iter().map(|a| a.file_location()).collect();

        let (tx, rx) = mpsc::channel();
        let registry = self.registry.clone();
        let engine = self.engine.clone();
        let pool = self.pool.clone();

        thread::spawn(move || {
            for (index, a) in artifacts.into_iter().enumerate() {
                let rules = registry.rules_for(a.kind);
                let findings = match &pool {
                    Some(pool) => pool.install(|| engine.evaluate(&a, &rules)),
                    None => engine.evaluate(&a, &rules),
                };
                if tx.send((index, findings)).is_err() {
                    return;
                }
            }
        });

        let mut findings = Vec::new();
        let mut completed = vec![false; names.len()];

        for _ in 0..names.len() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((index, mut batch)) => {
                    completed[index] = true;
                    progress(&names[index]);
                    findings.append(&mut batch);
                }
                Err(_) => break,
            }
        }

        for (index, done) in completed.iter().enumerate() {
            if !done {
                warn!("Deadline expired before {} was checked", names[index]);
                findings.push(Finding::critical(
                    TIMEOUT_RULE_ID,
                    &format!(
                        "Validation timed out after {}s before this file was checked",
                        timeout.as_secs()
                    ),
                    locations[index].clone(),
                ));
            }
        }

        findings
    }

    fn evaluate_artifact(&self, artifact: &Artifact) -> Vec<Finding> {
        let rules = self.registry.rules_for(artifact.kind);
        debug!("{}: {} applicable rule(s)", artifact.file, rules.len());
        self.engine.evaluate(artifact, &rules)
    }
}

/// Expands each input path: files pass through untouched, directories are
/// walked recursively for recognized configuration files. The result is
/// sorted so a run over a directory is deterministic.
pub fn expand_paths(paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<FileFailure>) {
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            collect_recognized(path, &mut files, &mut failures);
        } else {
            failures.push(FileFailure {
                file: path.display().to_string(),
                message: "No such file or directory".to_string(),
            });
        }
    }

    files.sort();
    files.dedup();
    (files, failures)
}

fn collect_recognized(dir: &Path, files: &mut Vec<PathBuf>, failures: &mut Vec<FileFailure>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            failures.push(FileFailure {
                file: dir.display().to_string(),
                message: e.to_string(),
            });
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_recognized(&path, files, failures);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if is_recognized(name) {
                files.push(path);
            }
        }
    }
}
