//! Diagnosis example.
//!
//! Three variables: Disease (x0), Fever (x1), Cough (x2).
//! Only a few marginal and conditional probabilities are known; the rest is
//! filled in by maximum entropy, and bounds on `P(D & F)` are computed.
//!
//! Run with: `cargo run --example diagnosis -- --prior 0.3`

use boolprob_rs::backend::ClarabelSolver;
use boolprob_rs::constraint::{ConditionalProbability, Constraint};
use boolprob_rs::expr::probability;
use boolprob_rs::problem::{maximize_functional, maximum_entropy_with, minimize_functional};
use boolprob_rs::solver::SolverSettings;
use boolprob_rs::space::AtomSpace;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Maximum-entropy diagnosis over three boolean variables")]
struct Cli {
    /// Prior probability of the disease
    #[arg(long, default_value_t = 0.3)]
    prior: f64,

    /// P(fever | disease)
    #[arg(long, default_value_t = 0.9)]
    fever_given_disease: f64,

    /// P(cough | disease)
    #[arg(long, default_value_t = 0.8)]
    cough_given_disease: f64,

    /// Print solver iterations
    #[arg(long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut space = AtomSpace::named(3, "diagnosis")?;
    let disease = space.var(0)?.is_true()?;
    let fever = space.var(1)?.is_true()?;
    let cough = space.var(2)?.is_true()?;
    println!("space = {}", space);

    let assumptions = vec![
        Constraint::equal_to(&probability(&disease), args.prior)?,
        ConditionalProbability::new(&fever, &disease)?.equal_to(args.fever_given_disease)?,
        ConditionalProbability::new(&cough, &disease)?.equal_to(args.cough_given_disease)?,
        ConditionalProbability::new(&fever, &disease.not())?.at_most(0.1)?,
    ];
    for a in &assumptions {
        println!("assume {}", a);
    }

    let settings = SolverSettings::default().verbose(args.verbose);
    maximum_entropy_with(&mut space, &assumptions, &ClarabelSolver, &settings)?;

    println!();
    println!("Maximum-entropy distribution:");
    if let Some(distribution) = space.distribution() {
        for atom in space.atoms() {
            println!("  {} {:?} = {:.4}", atom, atom.assignment(3), distribution[atom.index()]);
        }
    }

    let disease_given_fever = ConditionalProbability::new(&disease, &fever)?;
    println!();
    println!("P(D)     = {:.4}", space.probability_of(&disease)?);
    println!("P(F)     = {:.4}", space.probability_of(&fever)?);
    println!("P(D | F) = {:.4}", disease_given_fever.evaluate(&space)?);

    let both = probability(&disease.and(&fever)?);
    let lower = minimize_functional(&mut space, &both, &assumptions, &ClarabelSolver)?;
    let upper = maximize_functional(&mut space, &both, &assumptions, &ClarabelSolver)?;
    println!("P(D & F) in [{:.4}, {:.4}]", lower, upper);

    Ok(())
}
