#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use args::Args;
use clap::Parser;
use gatecraft_gateway::{Config, Gateway, Input, RouteConstraints, TaskKind};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    gatecraft_telemetry::init(&args.log_filter);

    let task: TaskKind = args.task.parse().map_err(anyhow::Error::msg)?;

    tracing::info!(config_path = %args.config.display(), "loading gatecraft config");
    let config = Config::load(&args.config)?;
    let gateway = Gateway::from_config(config)?;

    let sizing = gateway.count_tokens(Input::Text(args.prompt.clone()), &args.sizing_model);
    tracing::info!(
        input_tokens = sizing.input_tokens,
        method = %sizing.method,
        "sized request"
    );

    let constraints = RouteConstraints {
        require_local: args.require_local,
        require_quality: args.min_quality,
        max_cost: args.max_cost,
    };

    let decision = gateway.route(task, sizing.input_tokens, sizing.estimated_output_tokens, constraints)?;

    let (allowed, reason) = gateway.check_budget(decision.estimated_cost);
    if !allowed {
        tracing::warn!(reason = %reason, "decision would exceed configured budget");
    }

    println!("{}", serde_json::to_string_pretty(&decision)?);

    Ok(())
}
