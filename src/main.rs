//! mose-report - Prints global weights and ranks the stored scenarios.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use mose_engine::adapters::NotebookResultCatalog;
use mose_engine::application::{init_tracing, DesignEvaluator};
use mose_engine::config::{ConfigStore, EngineConfig};
use mose_engine::domain::analysis::{CandidateRanker, Paradigm, ScoredCandidate};
use mose_engine::domain::foundation::{DomainError, ObjectiveKey};
use mose_engine::domain::weighting::WeightAggregator;

fn main() -> ExitCode {
    let config = match EngineConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_tracing(&config.evaluation.log_level, config.evaluation.json_logs) {
        eprintln!("failed to initialise tracing: {}", err);
    }

    let store = match ConfigStore::from_config(config) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            error!(error = %err, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let evaluator = DesignEvaluator::new(store, Arc::new(NotebookResultCatalog::builtin()));
    match report(&evaluator) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Report failed");
            ExitCode::FAILURE
        }
    }
}

fn report(evaluator: &DesignEvaluator) -> Result<(), DomainError> {
    let outcome = evaluator.configured_global_weights()?;
    info!(stakeholders = outcome.stakeholders.len(), "Configured weighting computed");

    println!("Global objective weights");
    for objective in ObjectiveKey::all() {
        println!(
            "  {:<20} {:>6.3}",
            objective.display_name(),
            outcome.global_weights.get(*objective)
        );
    }

    println!();
    println!("Stakeholder priorities");
    for stakeholder in &outcome.stakeholders {
        let top: Vec<String> = WeightAggregator::top_objectives(&stakeholder.objective_weights, 2)
            .into_iter()
            .map(|(objective, weight)| format!("{} {:.0}%", objective.display_name(), weight * 100.0))
            .collect();
        println!(
            "  {:<22} influence {:>5.1}%  {}",
            stakeholder.name,
            stakeholder.influence * 100.0,
            top.join(", ")
        );
    }

    for paradigm in Paradigm::all() {
        let scored = evaluator
            .catalog()
            .scenario_keys()
            .into_iter()
            .filter(|key| key.paradigm == *paradigm)
            .map(|key| {
                let rescored = evaluator.rescore_stored_result(&key)?;
                Ok(ScoredCandidate::new(key.to_string(), rescored.evaluation.score(*paradigm)))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        println!();
        println!("Stored scenarios under {}", paradigm.display_name());
        for ranked in CandidateRanker::rank(scored) {
            println!(
                "  {:>2}. {:<36} {}  rating {:>5.1}",
                ranked.rank, ranked.candidate.label, ranked.candidate.score, ranked.relative_rating
            );
        }
    }

    Ok(())
}
