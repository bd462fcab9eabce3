//! Per-run artifact dumps under the state directory.

use fs_err as fs;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::pipeline::StageTrace;
use crate::wire::PipelineState;

pub struct SavedRun {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

fn run_dir(out_dir: &Path, run: Uuid) -> PathBuf {
    out_dir.join("run").join(run.to_string())
}

fn save_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> anyhow::Result<PathBuf> {
    let path = dir.join(format!("{name}.json"));
    fs::write(&path, to_string_pretty(value)?)?;
    Ok(path)
}

/// Write every published artifact plus the full final state to the run
/// directory. Called once, after the pipeline completes.
pub fn save_run(out_dir: &Path, run: Uuid, state: &PipelineState) -> anyhow::Result<SavedRun> {
    let dir = run_dir(out_dir, run);
    fs::create_dir_all(&dir)?;

    let mut files = Vec::new();
    files.push(save_json(&dir, "conversation", &state.conversation)?);
    if let Some(spec) = &state.business_spec {
        files.push(save_json(&dir, "business_spec", spec)?);
    }
    if let Some(page) = &state.landing_page {
        files.push(save_json(&dir, "landing_page", page)?);
    }
    if let Some(deck) = &state.pitch_deck {
        files.push(save_json(&dir, "pitch_deck", deck)?);
    }
    if let Some(assets) = &state.marketing_assets {
        files.push(save_json(&dir, "marketing_assets", assets)?);
    }
    files.push(save_json(&dir, "state", state)?);

    Ok(SavedRun { dir, files })
}

#[derive(Serialize)]
struct RequestDump<'a> {
    stage: &'a str,
    max_tokens: u32,
    prompt: &'a str,
}

#[derive(Serialize)]
struct ResponseDump<'a> {
    stage: &'a str,
    text: &'a str,
}

/// Write per-stage `<stage>.request.json` / `<stage>.response.json` dumps of
/// the gateway round trips into the run directory, gated by the save flags.
/// Stages that never produced response text get no response file.
pub fn save_traces(
    out_dir: &Path,
    run: Uuid,
    traces: &[StageTrace],
    save_request: bool,
    save_response: bool,
) -> anyhow::Result<SavedRun> {
    let dir = run_dir(out_dir, run);
    fs::create_dir_all(&dir)?;

    let mut files = Vec::new();
    for trace in traces {
        if save_request {
            let name = format!("{}.request", trace.stage.name());
            files.push(save_json(
                &dir,
                &name,
                &RequestDump {
                    stage: trace.stage.name(),
                    max_tokens: trace.max_tokens,
                    prompt: &trace.prompt,
                },
            )?);
        }
        if save_response {
            if let Some(text) = &trace.response {
                let name = format!("{}.response", trace.stage.name());
                files.push(save_json(
                    &dir,
                    &name,
                    &ResponseDump {
                        stage: trace.stage.name(),
                        text,
                    },
                )?);
            }
        }
    }

    Ok(SavedRun { dir, files })
}

pub fn print_planned_paths(out_dir: &Path, run: Uuid) {
    let dir = run_dir(out_dir, run);
    println!("debug: planned artifacts directory: {}", dir.display());
}

pub fn print_saved_paths(saved: &SavedRun) {
    println!("debug: artifacts directory: {}", saved.dir.display());
    for f in &saved.files {
        println!("debug: saved: {}", f.display());
    }
}
