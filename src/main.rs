use clap::Parser;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

mod cli;
mod config;
mod errors;
mod fallback;
mod log;
mod parse;
mod pipeline;
mod prompt;
mod provider;
mod session;
mod ux;
mod wire;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    let debug = args.debug;

    if let Err(e) = run(args).await {
        // The per-stage fallback machinery absorbs every expected failure, so
        // anything landing here is either bad input or a genuine defect.
        eprintln!("generation failed, please retry");
        if debug {
            eprintln!("debug: {e:#}");
        }
        std::process::exit(1);
    }
}

async fn run(args: cli::Args) -> anyhow::Result<()> {
    let mut cfg = config::Config::load(args.config.as_deref())?;
    if let Some(model) = args.model {
        cfg.model = model;
    }
    if let Some(out_dir) = args.out_dir {
        cfg.out_dir = out_dir;
    }
    if let Some(timeout) = args.timeout_secs {
        cfg.timeout_secs = timeout;
    }
    if let Some(delay) = args.message_delay_ms {
        cfg.message_delay_ms = delay;
    }

    let out_dir = Path::new(&cfg.out_dir).to_path_buf();
    let run_id = Uuid::new_v4();
    if args.debug {
        println!("debug: flag enabled");
        log::print_planned_paths(&out_dir, run_id);
    }

    // Submitted idea goes into the session; without one we fall back to the
    // stored session idea, and an empty session is the only input error.
    let idea = match args.idea {
        Some(idea) => {
            session::store_idea(&out_dir, &idea)?;
            idea.trim().to_string()
        }
        None => session::load_idea(&out_dir)?,
    };
    println!("Idea: {idea}");

    let provider = provider::make_provider(&cfg);
    if provider.is_none() {
        println!("(no ANTHROPIC_API_KEY configured; using template generation)");
    }

    let delay = Duration::from_millis(cfg.message_delay_ms);
    let mut pipeline = pipeline::Pipeline::new(provider, args.debug);

    let mut last_status = None;
    let mut conversation_shown = false;
    let state = pipeline
        .run(&idea, |snapshot| {
            if last_status != Some(snapshot.status) {
                last_status = Some(snapshot.status);
                ux::print_status(snapshot.status);
            }
            if !conversation_shown && !snapshot.conversation.is_empty() {
                conversation_shown = true;
                ux::show_conversation(&snapshot.conversation, delay);
            }
        })
        .await;

    ux::print_summary(&state);

    if args.save_artifacts {
        let saved = log::save_run(&out_dir, run_id, &state)?;
        println!("Artifacts saved to {}", saved.dir.display());
        if args.debug {
            log::print_saved_paths(&saved);
        }
    }

    if args.save_request || args.save_response {
        let saved = log::save_traces(
            &out_dir,
            run_id,
            pipeline.traces(),
            args.save_request,
            args.save_response,
        )?;
        if args.debug {
            log::print_saved_paths(&saved);
        }
    }

    if args.clear_session {
        session::clear(&out_dir)?;
    }

    Ok(())
}
