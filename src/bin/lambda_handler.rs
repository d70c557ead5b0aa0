//! AWS Lambda handler for claiming-strategy evaluations
//!
//! Accepts a `ClaimingRequest` as the JSON event and returns the
//! `ClaimingResult`. Invalid requests fail the invocation with the
//! validation message.

use claiming_strategy::{ClaimingEngine, ClaimingRequest, ClaimingResult};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

async fn handler(event: LambdaEvent<ClaimingRequest>) -> Result<ClaimingResult, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;
    request.validate()?;

    let result = ClaimingEngine::default().evaluate(&request);
    log::info!(
        "evaluated request {} in {:?} (optimal claim age {:?})",
        event.context.request_id,
        start.elapsed(),
        result.you.optimal_claim_age
    );
    Ok(result)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
