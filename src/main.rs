//! ferrite-w2v self-test.
//!
//! Gradient-checks the minibatch estimator for skip-gram and CBOW under both
//! objectives on a five-word toy vocabulary, then prints reference outputs.
//! Exits with status 1 if any check fails.
//!
//! Run with:
//!   cargo run --release -- --verbose

use clap::Parser;
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ferrite_w2v::{
    Context, ContextModel, EstimatorConfig, GradientChecker, LossType, Matrix,
    ModelGradient, Result, SgdEstimator, TokenIndex, UniformDataset,
};

const WORDS: [&str; 5] = ["a", "b", "c", "d", "e"];

#[derive(Parser)]
#[command(name = "ferrite-w2v")]
#[command(about = "Gradient self-test for skip-gram and CBOW word2vec objectives")]
struct Cli {
    /// Seed for context and negative-sample draws
    #[arg(long, default_value_t = 31415)]
    seed: u64,

    /// Seed for the random word vectors
    #[arg(long, default_value_t = 9265)]
    vector_seed: u64,

    /// Contexts per estimate
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Maximum context window
    #[arg(short, long)]
    context_size: Option<usize>,

    /// Check a single estimator configuration loaded from JSON
    #[arg(long)]
    config: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let tokens = TokenIndex::from_words(WORDS)?;
    let mut vectors = Matrix::random_normal(10, 3, &mut ChaCha8Rng::seed_from_u64(cli.vector_seed));
    vectors.normalize_rows();

    let configs = match &cli.config {
        Some(path) => vec![EstimatorConfig::load_json(path)?],
        None => [ContextModel::SkipGram, ContextModel::Cbow]
            .into_iter()
            .flat_map(|m| {
                [LossType::Softmax, LossType::negative_sampling(10)]
                    .into_iter()
                    .map(move |l| EstimatorConfig::new(m, l))
            })
            .collect(),
    };

    let checker = GradientChecker::default();
    for mut config in configs {
        if let Some(b) = cli.batch_size {
            config.batch_size = b;
        }
        if let Some(c) = cli.context_size {
            config.context_size = c;
        }
        config.seed = Some(cli.seed);

        let component = format!("{} estimator with {}", config.model.name(), config.loss.name());
        println!("==== Gradient check for {component} ====");
        let estimator = SgdEstimator::new(config)?;
        let report = checker.check(
            &component,
            |params| {
                let mut dataset = UniformDataset::new(WORDS, cli.seed)?;
                estimator.estimate_seeded(&tokens, params, &mut dataset)
            },
            &vectors,
        )?;
        println!(
            "passed: {} entries, max discrepancy {:.3e}",
            report.entries, report.max_discrepancy
        );
    }

    let (input, output) = vectors.split_rows(5);
    let mut dataset = UniformDataset::new(WORDS, cli.seed)?;
    let negative = LossType::negative_sampling(10);

    println!("\n=== Results ===");
    let skipgram = ContextModel::SkipGram;
    let cbow = ContextModel::Cbow;
    let scenarios: [(ContextModel, &str, usize, &[&str], LossType); 5] = [
        (skipgram, "c", 3, &["a", "b", "e", "d", "b", "c"], LossType::Softmax),
        (skipgram, "a", 3, &["a", "b", "c", "d", "b", "e"], negative),
        (skipgram, "c", 1, &["a", "b"], negative),
        (cbow, "a", 2, &["a", "b", "c", "a"], LossType::Softmax),
        (cbow, "a", 2, &["a", "b", "a", "c"], negative),
    ];

    for (model, center, size, words, loss) in scenarios {
        let context = Context::new(center, words.iter().copied());
        let out = model.run(&context, size, &tokens, &input, &output, &mut dataset, &loss)?;
        let title = format!("{} / {}", model.name(), loss.name());
        print_result(&title, &out);
    }

    info!("all gradient checks passed");
    Ok(())
}

fn print_result(title: &str, out: &ModelGradient) {
    println!("\n=== {title} ===");
    println!("cost: {:.8}", out.cost);
    println!("grad_in:\n{}", out.grad_in);
    println!("grad_out:\n{}", out.grad_out);
}
